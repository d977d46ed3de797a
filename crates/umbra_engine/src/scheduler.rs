//! Apply scheduling
//!
//! Full passes are requested through a pending flag and run from the next
//! pre-render hook. Deferred passes (after enabling, after a scene change)
//! are sequence-numbered per kind: queuing a new pass of a kind makes older
//! not-yet-fired ones stale. A stale pass still waits for its due time, then
//! notices it is stale and does nothing.

use std::time::Duration;

use smallvec::SmallVec;

/// Why a deferred pass was queued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Shortly after enabling
    Initial,
    /// Right after a scene change
    SceneEarly,
    /// Once late-built UI of a new scene has settled
    SceneLate,
}

impl PassKind {
    pub const ALL: [PassKind; 3] = [PassKind::Initial, PassKind::SceneEarly, PassKind::SceneLate];

    fn index(self) -> usize {
        match self {
            Self::Initial => 0,
            Self::SceneEarly => 1,
            Self::SceneLate => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::SceneEarly => "scene-early",
            Self::SceneLate => "scene-late",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DeferredPass {
    kind: PassKind,
    seq: u64,
    due: Duration,
}

/// A deferred pass that reached its due time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredPass {
    pub kind: PassKind,
    pub seq: u64,
    /// `false` when a newer pass of the same kind was queued meanwhile
    pub current: bool,
}

/// Permission to run one full pass, from [`Scheduler::begin_full_pass`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassTicket {
    /// Restore and drop every cache before the pass
    pub clear_caches: bool,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: bool,
    clear_requested: bool,
    in_flight: bool,
    latest: [u64; 3],
    queue: Vec<DeferredPass>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a full pass on the next pre-render hook
    pub fn request_apply(&mut self, clear_caches: bool) {
        self.pending = true;
        self.clear_requested |= clear_caches;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Queue a deferred pass, invalidating older ones of the same kind
    pub fn queue_delayed(&mut self, now: Duration, delay: Duration, kind: PassKind) -> u64 {
        let slot = &mut self.latest[kind.index()];
        *slot += 1;
        let seq = *slot;
        self.queue.push(DeferredPass {
            kind,
            seq,
            due: now + delay,
        });
        tracing::trace!("queued {} pass #{} in {:?}", kind.label(), seq, delay);
        seq
    }

    /// Remove and report every deferred pass due at `now`.
    ///
    /// Current ones mark a full pass as pending; stale ones are dropped.
    pub fn fire_due(&mut self, now: Duration) -> SmallVec<[FiredPass; 4]> {
        let mut fired = SmallVec::new();
        let latest = self.latest;
        let mut any_current = false;

        self.queue.retain(|pass| {
            if pass.due > now {
                return true;
            }
            let current = latest[pass.kind.index()] == pass.seq;
            if current {
                any_current = true;
            } else {
                tracing::trace!("skipping stale {} pass #{}", pass.kind.label(), pass.seq);
            }
            fired.push(FiredPass {
                kind: pass.kind,
                seq: pass.seq,
                current,
            });
            false
        });

        if any_current {
            self.pending = true;
        }
        fired
    }

    /// Deferred passes still waiting for their due time
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Start a full pass if one is pending and none is running
    pub fn begin_full_pass(&mut self) -> Option<PassTicket> {
        if !self.pending || self.in_flight {
            return None;
        }
        self.pending = false;
        self.in_flight = true;
        Some(PassTicket {
            clear_caches: std::mem::take(&mut self.clear_requested),
        })
    }

    pub fn finish_full_pass(&mut self) {
        self.in_flight = false;
    }

    /// Drop everything queued and pending; sequence numbers keep counting
    pub fn reset(&mut self) {
        self.pending = false;
        self.clear_requested = false;
        self.in_flight = false;
        self.queue.clear();
    }
}
