//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use umbra_core::Color;
use umbra_engine::{headless::HeadlessTree, ThemeEngine};
use umbra_theme::ThemeConfig;

pub const PARCH: Color = Color::rgb(0.9, 0.85, 0.7);

pub const FRAME: Duration = Duration::from_millis(16);

/// Default config with the initial deferred pass firing on the first frame
pub fn config() -> ThemeConfig {
    ThemeConfig {
        initial_delay_secs: 0.0,
        ..ThemeConfig::default()
    }
}

/// Route engine logs to the test writer; `RUST_LOG` picks the level
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Enable an engine on `tree` and render one frame (the first full pass)
pub fn enabled_engine(tree: &mut HeadlessTree, config: ThemeConfig) -> ThemeEngine {
    init_logging();
    let mut engine = ThemeEngine::new(config);
    engine.enable(tree).expect("hooks install on the headless tree");
    tree.step(&mut engine, FRAME);
    engine
}

pub fn is_tinted(color: Color, original: Color) -> bool {
    !color.approx_eq(&original, 1e-3)
}
