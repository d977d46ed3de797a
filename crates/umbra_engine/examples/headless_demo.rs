//! Headless Demo
//!
//! Builds a small in-memory UI, enables the engine, plays a few frames of
//! host activity and a scene change, then disables and checks the restore.
//!
//! Run with:
//! `RUST_LOG=umbra_engine=debug cargo run -p umbra_engine --example headless_demo`

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use umbra_core::{Color, RenderSpace, Size, UiHost};
use umbra_engine::{headless::HeadlessTree, Signal, ThemeEngine};
use umbra_theme::{ThemeConfig, TintPreset};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let parchment = Color::rgb(0.91, 0.85, 0.69);
    let ink = Color::rgb(0.25, 0.2, 0.15);

    let mut tree = HeadlessTree::new();
    let ui = tree.add_root("GameUI", RenderSpace::Overlay);
    let inventory = tree.add_container(ui, "InventoryWindow");
    let inventory_bg = tree.add_image(inventory, "Background", Size::new(800.0, 600.0), parchment);
    let title = tree.add_text(inventory, "Title", 18.0, ink);
    let tooltip = tree.add_container(ui, "ItemTooltip");
    let tooltip_bg = tree.add_image(tooltip, "Bg", Size::new(320.0, 180.0), parchment);

    let hud = tree.add_root("GameHUD", RenderSpace::Overlay);
    let bar = tree.add_container(hud, "ActionBar");
    let bar_art = tree.add_image(bar, "ActionBarBackground", Size::new(900.0, 96.0), parchment);

    let mut config = ThemeConfig::default();
    config.background.preset = TintPreset::Charcoal;
    config.text.enabled = true;
    config.hud.hide_left_and_action_bar = true;
    config.debug_log = true;

    let mut engine = ThemeEngine::new(config);
    engine.handle(&mut tree, Signal::Enable)?;
    for _ in 0..20 {
        tree.step(&mut engine, FRAME);
    }

    for (label, node) in [
        ("inventory background", inventory_bg),
        ("inventory title", title),
        ("tooltip background", tooltip_bg),
        ("action bar art", bar_art),
    ] {
        tracing::info!(
            "{:<22} {:?} -> {:?}",
            label,
            engine.role_of(node),
            tree.color(node)
        );
    }

    // The host repaints the tooltip while it fades in
    tree.assign_color(&mut engine, tooltip_bg, parchment.with_alpha(0.4));
    tracing::info!("tooltip while fading: {:?}", tree.color(tooltip_bg));

    // A new scene builds more UI after a while
    engine.handle(&mut tree, Signal::SceneChanged)?;
    let journal = tree.add_container(ui, "JournalWindow");
    let page = tree.add_image(journal, "Page", Size::new(700.0, 500.0), parchment);
    for _ in 0..250 {
        tree.step(&mut engine, FRAME);
    }
    tracing::info!("journal page: {:?}", tree.color(page));

    if let Some(pass) = engine.last_pass() {
        tracing::info!(
            "last pass: {} candidates, {} writes, {} stale",
            pass.candidates,
            pass.writes,
            pass.stale
        );
    }
    let (hits, misses) = engine.role_cache().stats();
    tracing::info!("role cache: {} hits, {} misses", hits, misses);

    engine.handle(&mut tree, Signal::Disable)?;
    anyhow::ensure!(
        tree.color(inventory_bg) == Some(parchment),
        "inventory background was not restored"
    );
    anyhow::ensure!(tree.color(title) == Some(ink), "title ink was not restored");
    anyhow::ensure!(
        tree.unguarded_writes() == 0,
        "engine wrote outside its suppression scope"
    );
    tracing::info!("disabled; {} host writes in total", tree.write_count());

    Ok(())
}
