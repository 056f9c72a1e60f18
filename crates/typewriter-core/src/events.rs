use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Progress;

/// Notifications a running typewriter sends to its observers.
///
/// Exactly one `ProgressCommitted` is emitted per committed transition, in
/// commit order. `LoopLimitReached` is emitted once when scheduling stops
/// for good.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypewriterEvent {
    /// A transition was applied; `progress` is the new state.
    ProgressCommitted {
        instance_id: Uuid,
        progress: Progress,
        committed_at: DateTime<Utc>,
    },

    /// The loop limit was reached and no further transitions will run.
    LoopLimitReached {
        instance_id: Uuid,
        loops_completed: u32,
        at: DateTime<Utc>,
    },
}

impl TypewriterEvent {
    pub fn progress_committed(instance_id: Uuid, progress: Progress) -> Self {
        TypewriterEvent::ProgressCommitted {
            instance_id,
            progress,
            committed_at: Utc::now(),
        }
    }

    pub fn loop_limit_reached(instance_id: Uuid, loops_completed: u32) -> Self {
        TypewriterEvent::LoopLimitReached {
            instance_id,
            loops_completed,
            at: Utc::now(),
        }
    }

    /// Id of the typewriter that emitted this event.
    pub fn instance_id(&self) -> Uuid {
        match self {
            TypewriterEvent::ProgressCommitted { instance_id, .. }
            | TypewriterEvent::LoopLimitReached { instance_id, .. } => *instance_id,
        }
    }

    /// The committed progress, if this event carries one.
    pub fn progress(&self) -> Option<&Progress> {
        match self {
            TypewriterEvent::ProgressCommitted { progress, .. } => Some(progress),
            TypewriterEvent::LoopLimitReached { .. } => None,
        }
    }
}
