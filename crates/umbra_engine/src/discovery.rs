//! Incremental tree discovery
//!
//! Keeps a candidate list per root canvas. Throttled runs only rescan a root
//! when its descendant count changes; forced runs rescan every root. Count
//! equality is a cheap freshness check, not a proof: a subtree swapped for one
//! of the same size keeps its stale list until the next forced run.

use std::time::Duration;

use indexmap::IndexMap;
use umbra_core::{NodeId, NodeKind, UiHost};
use umbra_theme::{ThemeConfig, Thresholds};

use crate::classify::Role;
use crate::original_state::OriginalStore;
use crate::role_cache::RoleCache;

/// Candidate lists for one root
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootCache {
    /// Sprite / sliced image candidates
    pub images: Vec<NodeId>,
    /// Raw texture surface candidates
    pub surfaces: Vec<NodeId>,
    pub text: Vec<NodeId>,
    /// Descendant count at the last rebuild
    pub last_count: usize,
}

impl RootCache {
    pub fn candidates(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.images
            .iter()
            .chain(self.surfaces.iter())
            .chain(self.text.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.surfaces.len() + self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&mut self, node: NodeId) {
        self.images.retain(|n| *n != node);
        self.surfaces.retain(|n| *n != node);
        self.text.retain(|n| *n != node);
    }
}

/// What one discovery call did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscoveryReport {
    /// `false` when the call was throttled
    pub ran: bool,
    pub scanned: Vec<NodeId>,
    pub rebuilt: Vec<NodeId>,
    pub dropped: Vec<NodeId>,
    /// Former candidates of rebuilt roots that are no longer candidates
    pub released: Vec<NodeId>,
    /// Candidates that got a fresh original-state record
    pub captured: usize,
}

#[derive(Debug, Default)]
pub struct Discovery {
    roots: IndexMap<NodeId, RootCache>,
    last_run: Option<Duration>,
    /// Rebuild every root on the next run regardless of counts
    rebuild_all: bool,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh candidate lists.
    ///
    /// Skipped (with `ran == false`) unless `force` is set or the configured
    /// interval has passed since the last run. A forced run rebuilds every
    /// root; otherwise only roots whose descendant count changed.
    pub fn discover<H: UiHost + ?Sized>(
        &mut self,
        host: &H,
        force: bool,
        config: &ThemeConfig,
        roles: &mut RoleCache,
        originals: &mut OriginalStore,
    ) -> DiscoveryReport {
        let now = host.elapsed();
        if !force {
            if let Some(last) = self.last_run {
                if now.saturating_sub(last) < config.discovery_interval() {
                    tracing::trace!("discovery throttled");
                    return DiscoveryReport::default();
                }
            }
        }
        self.last_run = Some(now);

        let mut report = DiscoveryReport {
            ran: true,
            ..DiscoveryReport::default()
        };

        let present = host.roots();
        self.roots.retain(|root, cache| {
            let keep = present.contains(root) && host.is_alive(*root);
            if !keep {
                roles.invalidate_many(cache.candidates());
                report.dropped.push(*root);
            }
            keep
        });

        for root in present {
            let Some(count) = host.descendant_count(root) else {
                continue;
            };
            report.scanned.push(root);

            let previous = self.roots.get(&root);
            let fresh = previous.is_some_and(|cache| cache.last_count == count);
            if !force && !self.rebuild_all && fresh {
                continue;
            }
            if let Some(previous) = previous {
                roles.invalidate_many(previous.candidates());
            }

            let (cache, captured) = build_root(host, root, count, config, roles, originals);
            if let Some(previous) = self.roots.get(&root) {
                let kept: Vec<NodeId> = cache.candidates().collect();
                report
                    .released
                    .extend(previous.candidates().filter(|node| !kept.contains(node)));
            }
            tracing::debug!(
                "discovery rebuilt root {:?}: {} candidates from {} descendants",
                root,
                cache.len(),
                count
            );
            report.captured += captured;
            report.rebuilt.push(root);
            self.roots.insert(root, cache);
        }

        self.rebuild_all = false;
        report
    }

    /// Make the next run rebuild every root (classification inputs changed)
    pub fn invalidate_all(&mut self) {
        self.rebuild_all = true;
    }

    pub fn root(&self, root: NodeId) -> Option<&RootCache> {
        self.roots.get(&root)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.keys().copied()
    }

    /// Every candidate of every known root
    pub fn all_candidates(&self) -> Vec<NodeId> {
        self.roots.values().flat_map(RootCache::candidates).collect()
    }

    /// Candidates of the given roots only
    pub fn candidates_of(&self, roots: &[NodeId]) -> Vec<NodeId> {
        roots
            .iter()
            .filter_map(|root| self.roots.get(root))
            .flat_map(RootCache::candidates)
            .collect()
    }

    /// Drop a node that turned out to be stale
    pub fn evict(&mut self, node: NodeId) {
        for cache in self.roots.values_mut() {
            cache.remove(node);
        }
    }

    pub fn last_run(&self) -> Option<Duration> {
        self.last_run
    }

    pub fn clear(&mut self) {
        self.roots.clear();
        self.last_run = None;
        self.rebuild_all = false;
    }
}

/// Smallest glyph size a text node with `role` is tinted at
pub fn glyph_minimum(role: Role, thresholds: &Thresholds) -> f32 {
    match role {
        Role::Popup | Role::Chat => thresholds.min_glyph_size_popup,
        _ => thresholds.min_glyph_size,
    }
}

pub fn reaches_glyph_minimum<H: UiHost + ?Sized>(
    host: &H,
    node: NodeId,
    role: Role,
    thresholds: &Thresholds,
) -> bool {
    host.glyph_size(node).unwrap_or(0.0) >= glyph_minimum(role, thresholds)
}

fn build_root<H: UiHost + ?Sized>(
    host: &H,
    root: NodeId,
    count: usize,
    config: &ThemeConfig,
    roles: &mut RoleCache,
    originals: &mut OriginalStore,
) -> (RootCache, usize) {
    let thresholds = &config.thresholds;
    let mut nodes = Vec::new();
    host.graphics_under(root, &mut nodes);

    let mut cache = RootCache {
        last_count: count,
        ..RootCache::default()
    };

    for node in nodes {
        let Some(kind) = host.kind(node) else {
            continue;
        };
        let Some(role) = roles.resolve(host, node, config) else {
            continue;
        };

        match kind {
            NodeKind::Image | NodeKind::Surface => {
                if !role.is_surface_candidate() {
                    continue;
                }
                let small = host
                    .size(node)
                    .is_some_and(|size| size.fits_within(thresholds.small_icon_max));
                if thresholds.skip_small_images && small {
                    continue;
                }
                if kind == NodeKind::Image {
                    cache.images.push(node);
                } else {
                    cache.surfaces.push(node);
                }
            }
            NodeKind::Text => {
                if !role.is_tintable() {
                    continue;
                }
                if !reaches_glyph_minimum(host, node, role, thresholds) {
                    continue;
                }
                cache.text.push(node);
            }
            NodeKind::Container => {}
        }
    }

    let mut captured = 0;
    for node in cache.candidates() {
        if !originals.contains(node) && originals.get_or_capture(host, node).is_some() {
            captured += 1;
        }
    }

    (cache, captured)
}
