//! Phrase-advancement state machine.
//!
//! The engine is a set of pure functions over an immutable [`Progress`]
//! snapshot. It owns no timers: [`advance`] only reports how long to wait
//! and which state to commit afterwards.
//!
//! Transitions, applied once the reported delay has elapsed:
//! - WaitingToType -> Typing
//! - Typing -> Typing | WaitingToErase (phrase fully typed)
//! - WaitingToErase -> Erasing (counts a loop on the last phrase)
//! - Erasing -> Erasing | WaitingToType (phrase fully erased, next phrase)
//!
//! Callers must keep `num_units` positive in both speeds and `phrase_idx`
//! within `phrases`. [`TypewriterOptions::validate`] checks the former.

use std::time::Duration;

use crate::types::{Progress, Status, TypewriterOptions};
use crate::units;

/// Outcome of asking the engine for its next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Nothing left to do. Progress stays frozen.
    Halt,
    /// Wait `delay`, then commit `next`.
    Schedule { delay: Duration, next: Progress },
}

impl Advance {
    pub fn should_continue(&self) -> bool {
        matches!(self, Advance::Schedule { .. })
    }

    pub fn delay(&self) -> Option<Duration> {
        match self {
            Advance::Halt => None,
            Advance::Schedule { delay, .. } => Some(*delay),
        }
    }
}

/// Compute the delay and successor for `progress`.
///
/// Returns [`Advance::Halt`] when the loop limit has been reached or when
/// there are no phrases at all.
pub fn advance(phrases: &[String], options: &TypewriterOptions, progress: &Progress) -> Advance {
    if phrases.is_empty() || is_halted(options, progress) {
        return Advance::Halt;
    }

    Advance::Schedule {
        delay: delay_for(options, progress.status),
        next: next_progress(phrases, options, progress),
    }
}

/// Whether `progress` has used up the configured loop limit.
pub fn is_halted(options: &TypewriterOptions, progress: &Progress) -> bool {
    options
        .loop_limit
        .is_some_and(|limit| progress.loops_completed >= limit)
}

/// Delay that precedes the transition out of `status`.
pub fn delay_for(options: &TypewriterOptions, status: Status) -> Duration {
    match status {
        Status::WaitingToType => options.typing_speed.start_delay(),
        Status::Typing => options.typing_speed.tick(),
        Status::WaitingToErase => options.erasing_speed.start_delay(),
        Status::Erasing => options.erasing_speed.tick(),
    }
}

/// Apply one transition to `progress`.
///
/// # Panics
///
/// Panics if `progress.phrase_idx` is out of range for `phrases`. That can
/// only happen when the progress was built by hand for a different phrase
/// list.
pub fn next_progress(
    phrases: &[String],
    options: &TypewriterOptions,
    progress: &Progress,
) -> Progress {
    let full = phrases[progress.phrase_idx].as_str();
    let mut next = progress.clone();

    match progress.status {
        Status::WaitingToType => {
            next.status = Status::Typing;
        }
        Status::Typing => {
            let speed = &options.typing_speed;
            let target = units::count(&progress.phrase, speed.unit) + speed.num_units as usize;
            if target >= units::count(full, speed.unit) {
                next.phrase = full.to_string();
                next.status = Status::WaitingToErase;
            } else {
                next.phrase = units::prefix(full, speed.unit, target).to_string();
            }
        }
        Status::WaitingToErase => {
            if progress.phrase_idx + 1 == phrases.len() {
                next.loops_completed += 1;
            }
            next.status = Status::Erasing;
        }
        Status::Erasing => {
            let speed = &options.erasing_speed;
            let remaining = if options.erase_at_once {
                0
            } else {
                units::count(&progress.phrase, speed.unit).saturating_sub(speed.num_units as usize)
            };
            if remaining == 0 {
                next.phrase.clear();
                next.phrase_idx = (progress.phrase_idx + 1) % phrases.len();
                next.status = Status::WaitingToType;
            } else {
                next.phrase = units::prefix(full, speed.unit, remaining).to_string();
            }
        }
    }

    tracing::trace!(
        from = %progress.status,
        to = %next.status,
        phrase_idx = next.phrase_idx,
        shown_chars = next.phrase.chars().count(),
        loops_completed = next.loops_completed,
        "Typewriter transition"
    );
    next
}
