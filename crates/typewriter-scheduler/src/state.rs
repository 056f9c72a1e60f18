//! Adapter-level scheduling state.
//!
//! - Idle -> Scheduled (start with phrases left to type)
//! - Scheduled -> Scheduled (timer fired, engine asked to continue)
//! - Scheduled -> Idle (stop, or the loop limit was reached)

use std::fmt;

/// Whether a typewriter currently has a timer pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulerState {
    /// No timer pending. Progress is frozen until the next `start`.
    #[default]
    Idle,
    /// Exactly one timer is pending and will commit the next transition.
    Scheduled,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerState::Idle => write!(f, "Idle"),
            SchedulerState::Scheduled => write!(f, "Scheduled"),
        }
    }
}
