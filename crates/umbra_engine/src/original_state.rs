//! Pristine node snapshots
//!
//! A record is captured the first time the engine touches a node, before any
//! write, and is never replaced while the node lives. Every tint is computed
//! from the record, so repeated passes and repeated host repaints cannot stack.

use indexmap::IndexMap;
use umbra_core::{Color, NodeId, UiHost};

/// The fields the engine may change, as they were before it touched them
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginalState {
    pub color: Color,
    pub enabled: bool,
    pub input_blocking: bool,
}

impl OriginalState {
    /// Snapshot the node as it is now; `None` if it is gone or colorless
    pub fn capture<H: UiHost + ?Sized>(host: &H, node: NodeId) -> Option<Self> {
        if !host.is_alive(node) {
            return None;
        }
        Some(Self {
            color: host.color(node)?,
            enabled: host.enabled(node).unwrap_or(true),
            input_blocking: host.input_blocking(node).unwrap_or(false),
        })
    }
}

/// Insertion-ordered store, so restore walks nodes in the order they were touched
#[derive(Debug, Default)]
pub struct OriginalStore {
    records: IndexMap<NodeId, OriginalState>,
}

impl OriginalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&OriginalState> {
        self.records.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.records.contains_key(&node)
    }

    /// Existing record, or a fresh capture from the host
    pub fn get_or_capture<H: UiHost + ?Sized>(
        &mut self,
        host: &H,
        node: NodeId,
    ) -> Option<OriginalState> {
        if let Some(record) = self.records.get(&node) {
            return Some(*record);
        }
        let record = OriginalState::capture(host, node)?;
        self.records.insert(node, record);
        Some(record)
    }

    /// Keep an existing record; otherwise store `record`. Returns the kept one.
    pub fn insert_if_absent(&mut self, node: NodeId, record: OriginalState) -> OriginalState {
        *self.records.entry(node).or_insert(record)
    }

    pub fn remove(&mut self, node: NodeId) -> Option<OriginalState> {
        self.records.shift_remove(&node)
    }

    /// Snapshot of every tracked node and its record
    pub fn entries(&self) -> Vec<(NodeId, OriginalState)> {
        self.records.iter().map(|(id, r)| (*id, *r)).collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
