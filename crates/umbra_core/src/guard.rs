//! Write suppression shared between the engine and the hook facility
//!
//! When the engine writes a node color, the host's own color setter fires and
//! would route the write straight back into the engine's color-assignment
//! hook. The hook facility checks [`Suppression::is_active`] and lets such
//! writes through untouched.
//!
//! The flag is a depth counter rather than a boolean: host setters nest (a
//! text color assignment may trigger further internal assignments), and an
//! inner scope ending must not re-open the hook while the outer one is still
//! writing. Scopes release on drop, so every exit path, unwinding included,
//! restores the previous depth.

use std::cell::Cell;
use std::rc::Rc;

/// Shared suppression counter (single-threaded by construction)
#[derive(Clone, Debug, Default)]
pub struct Suppression {
    depth: Rc<Cell<u32>>,
}

impl Suppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a suppressed region; the returned scope leaves it on drop
    #[must_use = "suppression ends as soon as the scope is dropped"]
    pub fn enter(&self) -> SuppressScope {
        self.depth.set(self.depth.get().saturating_add(1));
        SuppressScope {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Whether any scope is currently open
    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }

    /// Current nesting depth
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }
}

/// RAII scope returned by [`Suppression::enter`]
#[derive(Debug)]
pub struct SuppressScope {
    depth: Rc<Cell<u32>>,
}

impl Drop for SuppressScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
