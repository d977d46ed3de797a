//! Integration tests for the engine lifecycle and pass scheduling
//!
//! Tests cover:
//! - Enable / disable state machine, repeated signals, hook failures
//! - Deferred scene passes and stale sequence numbers
//! - Configuration changes with and without cache clearing

mod common;

use std::time::Duration;

use common::{config, enabled_engine, is_tinted, FRAME, PARCH};
use umbra_core::{RenderSpace, Size, UiHost};
use umbra_engine::{
    headless::HeadlessTree, transform, EngineError, LifecycleState, PassKind, Signal, ThemeEngine,
};

fn panel_tree() -> (HeadlessTree, umbra_core::NodeId) {
    let mut tree = HeadlessTree::new();
    let root = tree.add_root("Canvas", RenderSpace::Overlay);
    let bg = tree.add_image(root, "PanelBg", Size::new(400.0, 300.0), PARCH);
    (tree, bg)
}

/// Test that enabling installs hooks and schedules the initial pass
#[test]
fn test_enable_installs_hooks() {
    let (mut tree, bg) = panel_tree();
    let mut engine = ThemeEngine::new(Default::default());

    engine.handle(&mut tree, Signal::Enable).unwrap();

    assert_eq!(engine.state(), LifecycleState::Enabled);
    assert!(tree.hooks_installed());
    assert!(engine.scheduler().is_pending());
    assert_eq!(engine.scheduler().queued(), 1);
    // Nothing is written until the next frame
    assert_eq!(tree.color(bg), Some(PARCH));

    tree.step(&mut engine, FRAME);
    assert!(is_tinted(tree.color(bg).unwrap(), PARCH));
    assert!(!engine.scheduler().is_pending());
}

/// Test that the initial deferred pass runs once its delay elapses
#[test]
fn test_initial_pass_fires_after_delay() {
    let (mut tree, bg) = panel_tree();
    let mut engine = enabled_engine(&mut tree, Default::default());
    assert_eq!(engine.scheduler().queued(), 1);

    tree.assign_color_unhooked(bg, PARCH);
    tree.step(&mut engine, Duration::from_millis(300));

    assert_eq!(engine.scheduler().queued(), 0);
    assert!(is_tinted(tree.color(bg).unwrap(), PARCH));
}

/// Test that repeated enable and disable signals are no-ops
#[test]
fn test_repeated_signals_are_noops() {
    let (mut tree, _) = panel_tree();
    let mut engine = ThemeEngine::new(config());

    engine.disable(&mut tree).unwrap();
    assert_eq!(engine.state(), LifecycleState::Disabled);
    assert!(engine.lifecycle().history().is_empty());

    engine.enable(&mut tree).unwrap();
    let transitions = engine.lifecycle().history().len();
    engine.enable(&mut tree).unwrap();
    assert_eq!(engine.lifecycle().history().len(), transitions);

    engine.disable(&mut tree).unwrap();
    let transitions = engine.lifecycle().history().len();
    engine.disable(&mut tree).unwrap();
    assert_eq!(engine.lifecycle().history().len(), transitions);
    assert_eq!(engine.state(), LifecycleState::Disabled);
}

/// Test that a refused hook installation leaves the engine disabled
#[test]
fn test_hook_failure_returns_to_disabled() {
    let (mut tree, bg) = panel_tree();
    let mut engine = ThemeEngine::new(config());
    tree.refuse_hooks(true);

    let err = engine.enable(&mut tree).unwrap_err();
    assert!(matches!(err, EngineError::HookInstall(_)));
    assert_eq!(engine.state(), LifecycleState::Disabled);
    assert!(!tree.hooks_installed());

    tree.step(&mut engine, FRAME);
    assert_eq!(tree.color(bg), Some(PARCH));

    // A later attempt can succeed
    tree.refuse_hooks(false);
    engine.enable(&mut tree).unwrap();
    tree.step(&mut engine, FRAME);
    assert_eq!(engine.state(), LifecycleState::Enabled);
    assert!(is_tinted(tree.color(bg).unwrap(), PARCH));
}

/// Test that disable restores every node and drops all caches
#[test]
fn test_disable_restores_and_forgets() {
    let (mut tree, bg) = panel_tree();
    let mut engine = enabled_engine(&mut tree, config());
    assert!(!engine.originals().is_empty());

    engine.handle(&mut tree, Signal::Disable).unwrap();

    assert_eq!(tree.color(bg), Some(PARCH));
    assert!(engine.originals().is_empty());
    assert!(engine.role_cache().is_empty());
    assert_eq!(engine.discovery().roots().count(), 0);
    assert_eq!(engine.scheduler().queued(), 0);
    assert!(!tree.hooks_installed());

    // Frames after disable do nothing
    tree.step(&mut engine, Duration::from_secs(5));
    assert_eq!(tree.color(bg), Some(PARCH));
}

/// Test that a scene change queues an early and a late pass
#[test]
fn test_scene_change_queues_two_passes() {
    let (mut tree, _) = panel_tree();
    let mut engine = enabled_engine(&mut tree, config());

    engine.handle(&mut tree, Signal::SceneChanged).unwrap();
    assert_eq!(engine.scheduler().queued(), 2);

    tree.step(&mut engine, Duration::from_millis(600));
    assert_eq!(engine.scheduler().queued(), 1);
    tree.step(&mut engine, Duration::from_secs(3));
    assert_eq!(engine.scheduler().queued(), 0);
}

/// Test that a superseded late pass fires without running a full pass
#[test]
fn test_stale_scene_pass_is_skipped() {
    let (mut tree, bg) = panel_tree();
    let mut engine = enabled_engine(&mut tree, config());
    let tinted = tree.color(bg).unwrap();

    // Scene A at ~0.016s: early due ~0.516s, late due ~3.016s
    engine.handle(&mut tree, Signal::SceneChanged).unwrap();
    tree.advance(Duration::from_millis(984));
    tree.render_frame(&mut engine);

    // Scene B at 1.0s: early due 1.5s, late due 4.0s; scene A's late pass is stale
    engine.handle(&mut tree, Signal::SceneChanged).unwrap();
    tree.step(&mut engine, Duration::from_millis(600));

    // Something paints behind the hooks; only a full pass would notice
    tree.assign_color_unhooked(bg, PARCH);

    tree.advance(Duration::from_millis(1500));
    assert!(tree.elapsed() > Duration::from_millis(3016));
    assert!(tree.elapsed() < Duration::from_secs(4));
    tree.render_frame(&mut engine);
    assert_eq!(tree.color(bg), Some(PARCH), "stale pass must not run");
    assert_eq!(engine.scheduler().queued(), 1);

    tree.step(&mut engine, Duration::from_secs(1));
    assert_eq!(engine.scheduler().queued(), 0);
    assert!(tree.color(bg).unwrap().approx_eq(&tinted, 1e-5));
}

/// Test that scene changes are ignored while disabled
#[test]
fn test_scene_change_while_disabled() {
    let (mut tree, _) = panel_tree();
    let mut engine = ThemeEngine::new(config());

    engine.handle(&mut tree, Signal::SceneChanged).unwrap();
    assert_eq!(engine.scheduler().queued(), 0);
}

/// Test that new strengths are applied from the originals, not the tinted colors
#[test]
fn test_configuration_change_retints_from_original() {
    let (mut tree, bg) = panel_tree();
    let mut engine = enabled_engine(&mut tree, config());

    let mut cfg = engine.config().clone();
    cfg.background.strength = 0.2;
    engine
        .handle(
            &mut tree,
            Signal::ConfigurationChanged {
                config: cfg,
                clear_caches: false,
            },
        )
        .unwrap();
    tree.step(&mut engine, FRAME);

    let expected = transform::tint_color(PARCH, &engine.config().background);
    assert!(tree.color(bg).unwrap().approx_eq(&expected, 1e-5));
}

/// Test that clearing caches restores first and then recaptures
#[test]
fn test_configuration_change_with_cache_clear() {
    let (mut tree, bg) = panel_tree();
    let mut engine = enabled_engine(&mut tree, config());

    let cfg = engine.config().clone();
    engine
        .handle(
            &mut tree,
            Signal::ConfigurationChanged {
                config: cfg,
                clear_caches: true,
            },
        )
        .unwrap();
    tree.step(&mut engine, FRAME);

    // Recaptured from the restored color, so the tint is unchanged
    assert_eq!(engine.originals().get(bg).map(|o| o.color), Some(PARCH));
    let expected = transform::tint_color(PARCH, &engine.config().background);
    assert!(tree.color(bg).unwrap().approx_eq(&expected, 1e-5));
}

/// Test that reapply restores, forgets, and runs a pass on the spot
#[test]
fn test_reapply_now() {
    let (mut tree, bg) = panel_tree();
    let mut engine = ThemeEngine::new(config());
    assert_eq!(engine.reapply_now(&mut tree), None);

    engine.enable(&mut tree).unwrap();
    let summary = engine.reapply_now(&mut tree).unwrap();

    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.writes, 1);
    assert!(is_tinted(tree.color(bg).unwrap(), PARCH));
    assert_eq!(engine.last_pass(), Some(summary));
}

/// Test that the frame tick signal behaves like the pre-render hook
#[test]
fn test_frame_tick_signal() {
    let (mut tree, bg) = panel_tree();
    let mut engine = ThemeEngine::new(config());
    engine.handle(&mut tree, Signal::Enable).unwrap();

    engine.handle(&mut tree, Signal::FrameTick).unwrap();
    assert!(is_tinted(tree.color(bg).unwrap(), PARCH));
}

/// Test that a missing config file surfaces as a config error
#[test]
fn test_missing_config_file() {
    let result = ThemeEngine::from_config_file("/nonexistent/umbra/theme.toml");
    assert!(matches!(result, Err(EngineError::Config(_))));
}

/// Test that all pass kinds have distinct labels
#[test]
fn test_pass_kind_labels() {
    let labels: Vec<_> = PassKind::ALL.iter().map(|k| k.label()).collect();
    assert_eq!(labels, vec!["initial", "scene-early", "scene-late"]);
}
