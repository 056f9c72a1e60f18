//! Typewriter core - phrase-advancement engine, data model, and configuration.
//!
//! The engine types each phrase unit by unit, pauses, erases it, and moves
//! on to the next phrase, optionally stopping after a number of loops. It is
//! a set of pure functions; driving it on a timer is left to
//! `typewriter-scheduler`.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod types;
pub mod units;

pub use config::{GeneralConfig, TypewriterConfig};
pub use engine::{advance, delay_for, is_halted, next_progress, Advance};
pub use error::{Result, TypewriterError};
pub use events::TypewriterEvent;
pub use logging::init_tracing;
pub use types::{Phase, Progress, Speed, Status, TypewriterOptions, Unit};
