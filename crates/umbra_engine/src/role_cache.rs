//! Bounded memo of classification verdicts
//!
//! Classification walks up to forty ancestors per node, which is too slow to
//! repeat from a per-assignment hook. Verdicts are kept in an LRU keyed by
//! node identity and dropped whenever discovery rebuilds the node's root or
//! the user exclude-token setting changes.

use std::num::NonZeroUsize;

use lru::LruCache;
use umbra_core::{NodeId, UiHost};
use umbra_theme::ThemeConfig;

use crate::classify::{classify, debug_line, ClassifyContext, NodeFacts, Role};

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

pub struct RoleCache {
    entries: LruCache<NodeId, Role>,
    /// Raw `exclude_tokens` string the parsed list was built from
    exclude_key: String,
    exclude_tokens: Vec<String>,
    hits: u64,
    misses: u64,
}

impl RoleCache {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: LruCache::new(capacity(cap)),
            exclude_key: String::new(),
            exclude_tokens: Vec::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Re-parse exclude tokens if the raw setting changed.
    ///
    /// Returns `true` (and empties the cache) when it did.
    pub fn sync_exclude_tokens(&mut self, config: &ThemeConfig) -> bool {
        if self.exclude_key == config.exclude_tokens {
            return false;
        }
        self.exclude_key = config.exclude_tokens.clone();
        self.exclude_tokens = config.exclude_token_list();
        self.entries.clear();
        tracing::debug!("exclude tokens changed: {:?}", self.exclude_tokens);
        true
    }

    pub fn exclude_tokens(&self) -> &[String] {
        &self.exclude_tokens
    }

    pub fn get(&mut self, node: NodeId) -> Option<Role> {
        self.entries.get(&node).copied()
    }

    /// Look without touching recency
    pub fn peek(&self, node: NodeId) -> Option<Role> {
        self.entries.peek(&node).copied()
    }

    pub fn insert(&mut self, node: NodeId, role: Role) {
        self.entries.put(node, role);
    }

    /// Cached role, or classify and remember. `None` if the node is gone.
    pub fn resolve<H: UiHost + ?Sized>(
        &mut self,
        host: &H,
        node: NodeId,
        config: &ThemeConfig,
    ) -> Option<Role> {
        if let Some(role) = self.entries.get(&node) {
            self.hits += 1;
            return Some(*role);
        }
        self.misses += 1;

        let facts = NodeFacts::gather(host, node)?;
        let ctx = ClassifyContext {
            exclude_tokens: &self.exclude_tokens,
            thresholds: &config.thresholds,
        };
        let role = classify(&facts, &ctx);
        if config.debug_log {
            tracing::debug!("{}", debug_line(host, node, facts.kind, role));
        }
        self.entries.put(node, role);
        Some(role)
    }

    pub fn invalidate(&mut self, node: NodeId) {
        self.entries.pop(&node);
    }

    pub fn invalidate_many(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        for node in nodes {
            self.entries.pop(&node);
        }
    }

    pub fn set_capacity(&mut self, cap: usize) {
        self.entries.resize(capacity(cap));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
