//! Data model shared by the engine and the scheduler.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypewriterError};

// =============================================================================
// Units and phases
// =============================================================================

/// Granularity a speed advances by on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// One Unicode scalar value.
    #[default]
    Character,
    /// One whitespace-separated word.
    Word,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Character => write!(f, "character"),
            Unit::Word => write!(f, "word"),
        }
    }
}

/// Which of the two speeds a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Typing,
    Erasing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Typing => write!(f, "typing"),
            Phase::Erasing => write!(f, "erasing"),
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Pace of one phase (typing or erasing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speed {
    /// Units advanced per tick. Must be positive; zero stalls the phase forever.
    pub num_units: u32,
    /// Delay between ticks while the phase is running.
    pub time_ms: u64,
    /// Delay before the first tick of the phase.
    pub start_delay_ms: u64,
    #[serde(default)]
    pub unit: Unit,
}

impl Speed {
    /// Character-granular speed.
    pub fn new(num_units: u32, time_ms: u64, start_delay_ms: u64) -> Self {
        Self {
            num_units,
            time_ms,
            start_delay_ms,
            unit: Unit::Character,
        }
    }

    /// Same speed, counted in `unit`s.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    fn validate(&self, phase: Phase) -> Result<()> {
        if self.num_units == 0 {
            return Err(TypewriterError::InvalidSpeed {
                phase,
                reason: "num_units must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Static configuration for one typewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterOptions {
    /// Number of full passes through the phrase list before halting.
    /// `None` loops forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_limit: Option<u32>,
    /// Erase the whole phrase on the first erasing tick.
    pub erase_at_once: bool,
    pub typing_speed: Speed,
    pub erasing_speed: Speed,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            typing_speed: Speed::new(1, 100, 0),
            erasing_speed: Speed::new(1, 50, 1000),
            loop_limit: None,
            erase_at_once: false,
        }
    }
}

impl TypewriterOptions {
    pub fn new(typing_speed: Speed, erasing_speed: Speed) -> Self {
        Self {
            typing_speed,
            erasing_speed,
            loop_limit: None,
            erase_at_once: false,
        }
    }

    pub fn with_loop_limit(mut self, loop_limit: u32) -> Self {
        self.loop_limit = Some(loop_limit);
        self
    }

    pub fn with_erase_at_once(mut self, erase_at_once: bool) -> Self {
        self.erase_at_once = erase_at_once;
        self
    }

    /// Reject configurations the engine would never finish.
    ///
    /// The engine does not check these itself; this runs at the
    /// configuration boundary.
    pub fn validate(&self) -> Result<()> {
        self.typing_speed.validate(Phase::Typing)?;
        self.erasing_speed.validate(Phase::Erasing)?;
        if self.loop_limit == Some(0) {
            return Err(TypewriterError::Config(
                "loop_limit must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Progress
// =============================================================================

/// Where the typewriter is within the current phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    WaitingToType,
    Typing,
    WaitingToErase,
    Erasing,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::WaitingToType => write!(f, "WaitingToType"),
            Status::Typing => write!(f, "Typing"),
            Status::WaitingToErase => write!(f, "WaitingToErase"),
            Status::Erasing => write!(f, "Erasing"),
        }
    }
}

/// Snapshot of the typewriter's position.
///
/// `phrase` is always a prefix of `phrases[phrase_idx]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Text currently displayed.
    pub phrase: String,
    pub phrase_idx: usize,
    pub status: Status,
    /// Full passes through the phrase list, counted when the last phrase
    /// starts erasing.
    pub loops_completed: u32,
}

impl Progress {
    /// Whether this progress can be resumed against `phrases`.
    pub fn fits(&self, phrases: &[String]) -> bool {
        phrases
            .get(self.phrase_idx)
            .is_some_and(|full| full.starts_with(self.phrase.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_progress_is_initial_state() {
        let p = Progress::default();
        assert_eq!(p.phrase, "");
        assert_eq!(p.phrase_idx, 0);
        assert_eq!(p.status, Status::WaitingToType);
        assert_eq!(p.loops_completed, 0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::WaitingToType.to_string(), "WaitingToType");
        assert_eq!(Status::Typing.to_string(), "Typing");
        assert_eq!(Status::WaitingToErase.to_string(), "WaitingToErase");
        assert_eq!(Status::Erasing.to_string(), "Erasing");
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&Status::WaitingToErase).unwrap();
        assert_eq!(json, "\"waiting_to_erase\"");
        let back: Status = serde_json::from_str("\"typing\"").unwrap();
        assert_eq!(back, Status::Typing);
    }

    #[test]
    fn test_speed_durations() {
        let speed = Speed::new(2, 120, 15);
        assert_eq!(speed.tick(), Duration::from_millis(120));
        assert_eq!(speed.start_delay(), Duration::from_millis(15));
        assert_eq!(speed.unit, Unit::Character);
        assert_eq!(speed.with_unit(Unit::Word).unit, Unit::Word);
    }

    #[test]
    fn test_speed_unit_defaults_when_missing() {
        let speed: Speed =
            serde_json::from_str(r#"{"num_units":1,"time_ms":10,"start_delay_ms":0}"#).unwrap();
        assert_eq!(speed.unit, Unit::Character);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(TypewriterOptions::default().validate().is_ok());
        assert!(TypewriterOptions::default()
            .with_loop_limit(3)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_units() {
        let options = TypewriterOptions::new(Speed::new(0, 10, 0), Speed::new(1, 10, 0));
        match options.validate() {
            Err(TypewriterError::InvalidSpeed { phase, .. }) => assert_eq!(phase, Phase::Typing),
            other => panic!("Expected InvalidSpeed, got {:?}", other),
        }

        let options = TypewriterOptions::new(Speed::new(1, 10, 0), Speed::new(0, 10, 0));
        match options.validate() {
            Err(TypewriterError::InvalidSpeed { phase, .. }) => assert_eq!(phase, Phase::Erasing),
            other => panic!("Expected InvalidSpeed, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_loop_limit() {
        let options = TypewriterOptions::default().with_loop_limit(0);
        assert!(matches!(options.validate(), Err(TypewriterError::Config(_))));
    }

    #[test]
    fn test_progress_fits() {
        let phrases = vec!["test".to_string(), "phrase".to_string()];
        let mut p = Progress {
            phrase: "phr".to_string(),
            phrase_idx: 1,
            ..Progress::default()
        };
        assert!(p.fits(&phrases));

        p.phrase = "tes".to_string();
        assert!(!p.fits(&phrases));

        p.phrase_idx = 2;
        p.phrase = String::new();
        assert!(!p.fits(&phrases));
        assert!(!Progress::default().fits(&[]));
    }
}
