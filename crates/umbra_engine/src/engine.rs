//! The re-theming engine context
//!
//! [`ThemeEngine`] owns every cache (roles, originals, text inks, candidate
//! lists) so several engines can coexist. The host drives it through two
//! hooks and a handful of lifecycle signals:
//!
//! - [`ThemeEngine::on_pre_render`] once per frame: fires due deferred passes,
//!   runs a pending full pass, otherwise a throttled incremental discovery
//! - [`ThemeEngine::on_color_assign`] for every host-driven color write
//! - [`ThemeEngine::handle`] for [`Signal`]s
//!
//! Engine writes happen inside a [`Suppression`] scope, so the host's hook
//! facility can tell them apart from its own repaints.

use std::path::Path;

use anyhow::Context as _;
use umbra_core::{Color, HostError, NodeId, NodeKind, Suppression, UiHost};
use umbra_theme::ThemeConfig;

use crate::classify::Role;
use crate::discovery::Discovery;
use crate::error::{EngineError, Result};
use crate::intercept;
use crate::lifecycle::{Lifecycle, LifecycleEvent, LifecycleState};
use crate::original_state::OriginalStore;
use crate::role_cache::RoleCache;
use crate::scheduler::{PassKind, Scheduler};
use crate::text_ink::{self, InkCache};
use crate::transform;

/// Lifecycle and configuration notifications from the host
#[derive(Clone, Debug)]
pub enum Signal {
    Enable,
    Disable,
    /// A new scene finished loading; queues an early and a late pass
    SceneChanged,
    /// New settings. With `clear_caches`, everything is restored and
    /// forgotten before the next pass.
    ConfigurationChanged {
        config: ThemeConfig,
        clear_caches: bool,
    },
    /// Same as the pre-render hook
    FrameTick,
}

/// What a pass did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub candidates: usize,
    pub writes: usize,
    /// Nodes found dead and evicted
    pub stale: usize,
}

pub struct ThemeEngine {
    config: ThemeConfig,
    lifecycle: Lifecycle,
    scheduler: Scheduler,
    discovery: Discovery,
    roles: RoleCache,
    originals: OriginalStore,
    inks: InkCache,
    guard: Suppression,
    last_pass: Option<PassSummary>,
}

impl ThemeEngine {
    pub fn new(config: ThemeConfig) -> Self {
        let config = config.sanitized();
        let mut roles = RoleCache::new(config.role_cache_capacity);
        roles.sync_exclude_tokens(&config);

        Self {
            config,
            lifecycle: Lifecycle::new(),
            scheduler: Scheduler::new(),
            discovery: Discovery::new(),
            roles,
            originals: OriginalStore::new(),
            inks: InkCache::new(),
            guard: Suppression::new(),
            last_pass: None,
        }
    }

    /// Create an engine from a TOML config file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ThemeConfig::load(path)?))
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.current()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_in(LifecycleState::Enabled)
    }

    /// The guard handed to the hook facility
    pub fn suppression(&self) -> &Suppression {
        &self.guard
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn originals(&self) -> &OriginalStore {
        &self.originals
    }

    pub fn role_cache(&self) -> &RoleCache {
        &self.roles
    }

    /// Cached role for a node, if it has been classified
    pub fn role_of(&self, node: NodeId) -> Option<Role> {
        self.roles.peek(node)
    }

    pub fn last_pass(&self) -> Option<PassSummary> {
        self.last_pass
    }

    pub fn handle<H: UiHost + ?Sized>(&mut self, host: &mut H, signal: Signal) -> Result<()> {
        match signal {
            Signal::Enable => self.enable(host),
            Signal::Disable => self.disable(host),
            Signal::SceneChanged => {
                self.scene_changed(host);
                Ok(())
            }
            Signal::ConfigurationChanged {
                config,
                clear_caches,
            } => {
                self.set_config(config, clear_caches);
                Ok(())
            }
            Signal::FrameTick => {
                self.on_pre_render(host);
                Ok(())
            }
        }
    }

    /// Install hooks and schedule the first passes. No-op unless disabled.
    pub fn enable<H: UiHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if !self.lifecycle.can_send(LifecycleEvent::Enable) {
            return Ok(());
        }
        self.lifecycle.send(LifecycleEvent::Enable);

        if let Err(err) = host.install_hooks(self.guard.clone()) {
            self.lifecycle.send(LifecycleEvent::HookFailed);
            tracing::warn!("hook installation failed: {}", err);
            return Err(EngineError::HookInstall(err.to_string()));
        }
        self.lifecycle.send(LifecycleEvent::HooksInstalled);

        let now = host.elapsed();
        self.scheduler.request_apply(false);
        self.scheduler
            .queue_delayed(now, self.config.initial_delay(), PassKind::Initial);
        Ok(())
    }

    /// Restore every tracked node, drop caches, uninstall hooks. No-op unless enabled.
    pub fn disable<H: UiHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if !self.lifecycle.can_send(LifecycleEvent::Disable) {
            return Ok(());
        }
        self.lifecycle.send(LifecycleEvent::Disable);

        let restored = self.restore_all(host);
        self.clear_caches();
        self.scheduler.reset();
        host.uninstall_hooks();

        self.lifecycle.send(LifecycleEvent::TornDown);
        restored.map(|_| ())
    }

    fn scene_changed<H: UiHost + ?Sized>(&mut self, host: &H) {
        if !self.is_enabled() {
            return;
        }
        let now = host.elapsed();
        self.scheduler
            .queue_delayed(now, self.config.scene_early_delay(), PassKind::SceneEarly);
        self.scheduler
            .queue_delayed(now, self.config.scene_late_delay(), PassKind::SceneLate);
    }

    /// Swap in new settings and request a full pass
    pub fn set_config(&mut self, config: ThemeConfig, clear_caches: bool) {
        let config = config.sanitized();
        let thresholds_changed = config.thresholds != self.config.thresholds;

        self.roles.set_capacity(config.role_cache_capacity);
        self.config = config;

        let tokens_changed = self.roles.sync_exclude_tokens(&self.config);
        if thresholds_changed {
            self.roles.clear();
        }
        if tokens_changed || thresholds_changed {
            self.discovery.invalidate_all();
        }
        self.scheduler.request_apply(clear_caches);
    }

    /// Per-frame hook
    pub fn on_pre_render<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        if !self.is_enabled() {
            return;
        }
        self.scheduler.fire_due(host.elapsed());
        if self.run_pending(host).is_some() {
            return;
        }

        let report = self.discovery.discover(
            &*host,
            false,
            &self.config,
            &mut self.roles,
            &mut self.originals,
        );
        if report.rebuilt.is_empty() && report.released.is_empty() {
            return;
        }
        let nodes = self.discovery.candidates_of(&report.rebuilt);
        match self.transform_nodes(host, &nodes, &report.released) {
            Ok(summary) => tracing::debug!(
                "incremental pass over {} rebuilt roots: {} writes",
                report.rebuilt.len(),
                summary.writes
            ),
            Err(err) => log_pass_error(&err),
        }
    }

    /// Host color-assignment hook: the value the node should actually get
    pub fn on_color_assign<H: UiHost + ?Sized>(
        &mut self,
        host: &H,
        node: NodeId,
        proposed: Color,
    ) -> Color {
        if self.guard.is_active() || !self.is_enabled() {
            return proposed;
        }
        let Some(kind) = host.kind(node) else {
            return proposed;
        };
        let Some(role) = self.roles.resolve(host, node, &self.config) else {
            return proposed;
        };
        if role.passes_through() {
            return proposed;
        }

        match kind {
            NodeKind::Image | NodeKind::Surface => intercept::substitute_surface(
                host,
                node,
                role,
                proposed,
                &mut self.originals,
                &self.config,
            ),
            NodeKind::Text => intercept::substitute_text(
                host,
                node,
                role,
                proposed,
                &mut self.originals,
                &mut self.inks,
                &self.config,
            ),
            NodeKind::Container => proposed,
        }
    }

    /// Restore everything, forget caches, and run a full pass right away
    pub fn reapply_now<H: UiHost + ?Sized>(&mut self, host: &mut H) -> Option<PassSummary> {
        if !self.is_enabled() {
            return None;
        }
        self.scheduler.request_apply(true);
        self.run_pending(host)
    }

    /// Write every tracked node's original state back. Returns fields written.
    ///
    /// Dead nodes are evicted; other failures are logged and the walk goes on,
    /// the first one is returned at the end.
    pub fn restore_all<H: UiHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        let _scope = self.guard.enter();
        let mut writes = 0;
        let mut stale = Vec::new();
        let mut failure = None;

        for (node, original) in self.originals.entries() {
            if !host.is_alive(node) {
                stale.push(node);
                continue;
            }
            match transform::restore(host, node, &original) {
                Ok(w) => writes += w.total(),
                Err(HostError::StaleNode(_)) => stale.push(node),
                Err(err) => {
                    tracing::warn!("failed to restore {:?}: {}", node, err);
                    failure.get_or_insert(err);
                }
            }
        }

        for node in stale {
            self.evict(node);
        }
        self.inks.clear();
        tracing::debug!("restored {} fields on {} nodes", writes, self.originals.len());

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(writes),
        }
    }

    fn run_pending<H: UiHost + ?Sized>(&mut self, host: &mut H) -> Option<PassSummary> {
        let ticket = self.scheduler.begin_full_pass()?;
        let result = self.full_pass(host, ticket.clear_caches);
        self.scheduler.finish_full_pass();

        match result {
            Ok(summary) => {
                self.last_pass = Some(summary);
                Some(summary)
            }
            Err(err) => {
                log_pass_error(&err);
                None
            }
        }
    }

    fn full_pass<H: UiHost + ?Sized>(
        &mut self,
        host: &mut H,
        clear_caches: bool,
    ) -> anyhow::Result<PassSummary> {
        if clear_caches {
            self.restore_all(host)
                .context("failed to restore nodes before cache reset")?;
            self.clear_caches();
        }

        let report = self.discovery.discover(
            &*host,
            true,
            &self.config,
            &mut self.roles,
            &mut self.originals,
        );
        let nodes = self.discovery.all_candidates();
        let summary = self
            .transform_nodes(host, &nodes, &report.released)
            .context("full pass aborted")?;

        tracing::debug!(
            "full pass: {} roots, {} candidates, {} writes, {} stale",
            report.scanned.len(),
            summary.candidates,
            summary.writes,
            summary.stale
        );
        Ok(summary)
    }

    fn transform_nodes<H: UiHost + ?Sized>(
        &mut self,
        host: &mut H,
        nodes: &[NodeId],
        released: &[NodeId],
    ) -> anyhow::Result<PassSummary> {
        let _scope = self.guard.enter();
        let mut summary = PassSummary {
            candidates: nodes.len(),
            ..PassSummary::default()
        };

        for &node in released {
            let Some(original) = self.originals.get(node).copied() else {
                continue;
            };
            match transform::restore(host, node, &original) {
                Ok(w) => summary.writes += w.total(),
                Err(HostError::StaleNode(_)) => {
                    self.evict(node);
                    summary.stale += 1;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("restoring released node {node:?}"))
                }
            }
        }

        for &node in nodes {
            match self.transform_node(host, node) {
                Ok(writes) => summary.writes += writes,
                Err(HostError::StaleNode(_)) => {
                    tracing::warn!("node {:?} went stale mid-pass, evicting", node);
                    self.evict(node);
                    summary.stale += 1;
                }
                Err(err) => return Err(err).with_context(|| format!("transforming node {node:?}")),
            }
        }
        Ok(summary)
    }

    fn transform_node<H: UiHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
    ) -> std::result::Result<usize, HostError> {
        if !host.is_alive(node) {
            return Err(HostError::StaleNode(node));
        }
        let kind = host.kind(node).ok_or(HostError::StaleNode(node))?;
        let role = self
            .roles
            .resolve(&*host, node, &self.config)
            .ok_or(HostError::StaleNode(node))?;
        let original = self
            .originals
            .get_or_capture(&*host, node)
            .ok_or(HostError::StaleNode(node))?;

        match kind {
            NodeKind::Image | NodeKind::Surface if role.passes_through() => {
                Ok(transform::restore(host, node, &original)?.total())
            }
            NodeKind::Image | NodeKind::Surface => {
                Ok(transform::apply_surface(host, node, role, &original, &self.config)?.total())
            }
            NodeKind::Text if role.is_tintable() => {
                let wrote = text_ink::apply_text(host, node, &mut self.inks, &self.config.text)?;
                Ok(usize::from(wrote))
            }
            NodeKind::Text | NodeKind::Container => Ok(0),
        }
    }

    fn evict(&mut self, node: NodeId) {
        self.roles.invalidate(node);
        self.originals.remove(node);
        self.inks.remove(node);
        self.discovery.evict(node);
    }

    fn clear_caches(&mut self) {
        self.roles.clear();
        self.originals.clear();
        self.inks.clear();
        self.discovery.clear();
    }
}

fn log_pass_error(err: &anyhow::Error) {
    tracing::error!("theme pass failed: {}", err);
    for cause in err.chain().skip(1) {
        tracing::error!("  caused by: {}", cause);
    }
}

#[cfg(test)]
mod tests {
    use umbra_core::{RenderSpace, Size};

    use super::*;
    use crate::headless::HeadlessTree;

    #[test]
    fn test_pass_error_keeps_cause_chain() {
        let mut tree = HeadlessTree::new();
        let root = tree.add_root("Canvas", RenderSpace::Overlay);
        let bg = tree.add_image(root, "PanelBg", Size::new(400.0, 300.0), Color::WHITE);

        let mut engine = ThemeEngine::new(ThemeConfig::default());
        engine.enable(&mut tree).unwrap();
        tree.fail_writes_to(bg);

        let err = engine.full_pass(&mut tree, false).unwrap_err();
        let chain: Vec<String> = err.chain().map(|cause| cause.to_string()).collect();
        assert_eq!(
            chain,
            vec![
                "full pass aborted".to_string(),
                format!("transforming node {bg:?}"),
                HostError::Unsupported(bg).to_string(),
            ]
        );
        assert!(!engine.suppression().is_active());
    }
}
