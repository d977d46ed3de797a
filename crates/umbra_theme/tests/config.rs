use std::time::Duration;

use umbra_theme::{ConfigError, ThemeConfig, TintPreset};

#[test]
fn test_empty_toml_yields_defaults() {
    let config = ThemeConfig::from_toml_str("").unwrap();
    assert_eq!(config, ThemeConfig::default());
    assert!(config.background.enabled);
    assert!(!config.chat.enabled);
    assert!(!config.text.enabled);
    assert!(!config.hud.any());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = ThemeConfig::from_toml_str(
        r#"
        discovery_interval_secs = 2.5

        [popup]
        preset = "charcoal"
        darkness = 0.2

        [hud]
        hide_dialogue = true

        [thresholds]
        skip_small_images = true
        "#,
    )
    .unwrap();

    assert_eq!(config.popup.preset, TintPreset::Charcoal);
    assert_eq!(config.popup.darkness, 0.2);
    assert_eq!(config.popup.strength, 0.45, "unset popup strength keeps its default");
    assert!(config.hud.hide_dialogue);
    assert!(!config.hud.hide_center_and_right);
    assert!(config.thresholds.skip_small_images);
    assert_eq!(config.thresholds.small_icon_max, 40.0);
    assert_eq!(config.discovery_interval(), Duration::from_millis(2500));
}

#[test]
fn test_out_of_range_values_are_clamped_on_load() {
    let config = ThemeConfig::from_toml_str(
        r#"
        [background]
        strength = 4.0
        darkness = -2.0
        custom_rgb = [2.0, 0.5, -1.0]

        [text]
        tint_strength = 1.5
        "#,
    )
    .unwrap();

    assert_eq!(config.background.strength, 1.0);
    assert_eq!(config.background.darkness, 0.0);
    assert_eq!(config.background.custom_rgb, Some([1.0, 0.5, 0.0]));
    assert_eq!(config.text.tint_strength, 1.0);
}

#[test]
fn test_unknown_preset_is_a_parse_error() {
    let err = ThemeConfig::from_toml_str("[chat]\npreset = \"mauve\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn test_missing_file_reports_path() {
    let err = ThemeConfig::load("/definitely/not/here/umbra.toml").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("umbra.toml")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join(format!("umbra-theme-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("umbra.toml");
    std::fs::write(&path, "exclude_tokens = \"Cursor\"\n").unwrap();

    let config = ThemeConfig::load(&path).unwrap();
    assert_eq!(config.exclude_token_list(), vec!["cursor"]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_toml_round_trip() {
    let mut config = ThemeConfig::default();
    config.chat.enabled = true;
    config.chat.custom_rgb = Some([0.1, 0.1, 0.12]);
    config.hud.hide_journal_background = true;
    config.exclude_tokens = "minimap".to_string();

    let text = config.to_toml_string().unwrap();
    let parsed = ThemeConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_json_round_trip() {
    let mut config = ThemeConfig::default();
    config.text.enabled = true;
    config.text.spell_name.enabled = true;

    let json = serde_json::to_string(&config).unwrap();
    let parsed: ThemeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}
