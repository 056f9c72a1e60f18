//! Typewriter scheduler - drives the typing engine from a tokio timer.
//!
//! A [`Typewriter`] owns its progress, a single pending timer task, and a
//! broadcast channel that observers subscribe to for every committed
//! transition. Dropping it cancels the pending timer.

pub mod scheduler;
pub mod state;

pub use scheduler::Typewriter;
pub use state::SchedulerState;
