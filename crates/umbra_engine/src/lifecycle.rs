//! Engine lifecycle state machine
//!
//! A flat transition table with history, in the style of a small statechart
//! runtime:
//!
//! ```text
//! Disabled --Enable--> Enabling --HooksInstalled--> Enabled
//!                         |
//!                         +--HookFailed--> Disabled
//! Enabled --Disable--> Disabling --TornDown--> Disabled
//! ```
//!
//! Events with no transition from the current state are ignored, which is
//! what makes a repeated Enable or Disable a no-op.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Disabled,
    Enabling,
    Enabled,
    Disabling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Enable,
    HooksInstalled,
    HookFailed,
    Disable,
    TornDown,
}

/// A transition in the lifecycle table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: LifecycleState,
    pub event: LifecycleEvent,
    pub to: LifecycleState,
}

impl Transition {
    pub const fn new(from: LifecycleState, event: LifecycleEvent, to: LifecycleState) -> Self {
        Self { from, event, to }
    }
}

const TRANSITIONS: [Transition; 5] = [
    Transition::new(
        LifecycleState::Disabled,
        LifecycleEvent::Enable,
        LifecycleState::Enabling,
    ),
    Transition::new(
        LifecycleState::Enabling,
        LifecycleEvent::HooksInstalled,
        LifecycleState::Enabled,
    ),
    Transition::new(
        LifecycleState::Enabling,
        LifecycleEvent::HookFailed,
        LifecycleState::Disabled,
    ),
    Transition::new(
        LifecycleState::Enabled,
        LifecycleEvent::Disable,
        LifecycleState::Disabling,
    ),
    Transition::new(
        LifecycleState::Disabling,
        LifecycleEvent::TornDown,
        LifecycleState::Disabled,
    ),
];

#[derive(Debug)]
pub struct Lifecycle {
    current: LifecycleState,
    transitions: SmallVec<[Transition; 8]>,
    /// History of state transitions (for debugging)
    history: Vec<(LifecycleState, LifecycleEvent, LifecycleState)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            current: LifecycleState::Disabled,
            transitions: SmallVec::from_slice(&TRANSITIONS),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> LifecycleState {
        self.current
    }

    pub fn is_in(&self, state: LifecycleState) -> bool {
        self.current == state
    }

    pub fn history(&self) -> &[(LifecycleState, LifecycleEvent, LifecycleState)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: LifecycleEvent) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from == self.current && t.event == event)
    }

    /// Send an event, returning the (possibly unchanged) state
    pub fn send(&mut self, event: LifecycleEvent) -> LifecycleState {
        let current = self.current;
        let Some(to) = self
            .transitions
            .iter()
            .find(|t| t.from == current && t.event == event)
            .map(|t| t.to)
        else {
            return current;
        };

        self.current = to;
        self.history.push((current, event, to));
        tracing::debug!("lifecycle {:?} --{:?}--> {:?}", current, event, to);
        to
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
