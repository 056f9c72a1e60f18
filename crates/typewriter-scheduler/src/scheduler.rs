//! Timer-driven adapter around the typing engine.
//!
//! The `Typewriter` asks the engine for `(delay, next)`, sleeps on a tokio
//! timer, commits `next`, notifies subscribers, and repeats until the loop
//! limit halts it or the caller stops it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use typewriter_core::engine::{self, Advance};
use typewriter_core::{
    Progress, Result, TypewriterConfig, TypewriterError, TypewriterEvent, TypewriterOptions,
};

use crate::state::SchedulerState;

/// Events buffered per subscriber before it starts lagging.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// State shared between the owner and its timer task.
#[derive(Debug, Default)]
struct Shared {
    progress: Progress,
    /// Bumped on every cancellation. A timer only commits while its
    /// generation is current, so a stopped timer never applies.
    generation: u64,
    scheduled: bool,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // Progress is replaced in a single assignment, so a poisoned lock still
    // guards a valid value.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One on-screen typewriter.
///
/// Instances share nothing with each other. Progress survives `stop`, so a
/// later `start` resumes where the animation left off.
pub struct Typewriter {
    id: Uuid,
    phrases: Arc<[String]>,
    options: Arc<TypewriterOptions>,
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<TypewriterEvent>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typewriter")
            .field("id", &self.id)
            .field("phrases", &self.phrases.len())
            .field("options", &self.options)
            .field("progress", &self.progress())
            .field("state", &self.state())
            .finish()
    }
}

impl Typewriter {
    /// Create an idle typewriter at the initial progress.
    ///
    /// `options` is trusted as-is; see [`TypewriterOptions::validate`].
    pub fn new(phrases: Vec<String>, options: TypewriterOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            id: Uuid::new_v4(),
            phrases: phrases.into(),
            options: Arc::new(options),
            shared: Arc::new(Mutex::new(Shared::default())),
            events,
            task: None,
        }
    }

    /// Create a typewriter from a loaded configuration, validating it first.
    pub fn from_config(config: TypewriterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.phrases, config.options))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    /// Snapshot of the last committed progress.
    pub fn progress(&self) -> Progress {
        lock(&self.shared).progress.clone()
    }

    /// Text currently displayed.
    pub fn phrase(&self) -> String {
        lock(&self.shared).progress.phrase.clone()
    }

    pub fn state(&self) -> SchedulerState {
        if lock(&self.shared).scheduled {
            SchedulerState::Scheduled
        } else {
            SchedulerState::Idle
        }
    }

    /// Whether the loop limit has been reached. Once true, `start` is a no-op.
    pub fn is_halted(&self) -> bool {
        engine::is_halted(&self.options, &lock(&self.shared).progress)
    }

    /// Receive one event per committed transition, plus a final
    /// [`TypewriterEvent::LoopLimitReached`].
    ///
    /// Subscribers that fall more than a few hundred events behind observe
    /// `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<TypewriterEvent> {
        self.events.subscribe()
    }

    /// Begin (or resume) typing from the current progress.
    ///
    /// Any pending timer is cancelled first, so at most one timer is ever
    /// outstanding. Returns `Idle` without scheduling anything when there
    /// are no phrases or the loop limit was already reached.
    ///
    /// Fails with [`TypewriterError::NoRuntime`] outside a tokio runtime.
    pub fn start(&mut self) -> Result<SchedulerState> {
        if self.phrases.is_empty() {
            tracing::debug!(instance_id = %self.id, "No phrases, typewriter stays idle");
            return Ok(SchedulerState::Idle);
        }
        if self.is_halted() {
            tracing::debug!(instance_id = %self.id, "Loop limit already reached, not scheduling");
            return Ok(SchedulerState::Idle);
        }

        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| TypewriterError::NoRuntime)?;
        self.stop();

        let generation = {
            let mut shared = lock(&self.shared);
            shared.scheduled = true;
            shared.generation
        };
        let timer = Timer {
            id: self.id,
            phrases: Arc::clone(&self.phrases),
            options: Arc::clone(&self.options),
            shared: Arc::clone(&self.shared),
            events: self.events.clone(),
            generation,
        };
        self.task = Some(runtime.spawn(timer.run()));

        tracing::info!(
            instance_id = %self.id,
            phrases = self.phrases.len(),
            loop_limit = ?self.options.loop_limit,
            "Typewriter started"
        );
        Ok(SchedulerState::Scheduled)
    }

    /// Cancel the pending timer, if any. Progress keeps its last committed
    /// value. Calling this with nothing pending does nothing.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        {
            let mut shared = lock(&self.shared);
            shared.generation = shared.generation.wrapping_add(1);
            shared.scheduled = false;
        }
        task.abort();
        tracing::info!(instance_id = %self.id, "Typewriter stopped");
    }

    /// Stop and return to the initial progress.
    pub fn reset(&mut self) {
        self.stop();
        lock(&self.shared).progress = Progress::default();
        tracing::debug!(instance_id = %self.id, "Typewriter reset");
    }

    /// Swap in new phrases and options.
    ///
    /// Progress is kept when it still points at a prefix of one of the new
    /// phrases, and reset otherwise. A typewriter that was scheduled is
    /// restarted with the new configuration.
    pub fn reconfigure(
        &mut self,
        phrases: Vec<String>,
        options: TypewriterOptions,
    ) -> Result<SchedulerState> {
        let was_scheduled = self.state() == SchedulerState::Scheduled;
        self.stop();

        self.phrases = phrases.into();
        self.options = Arc::new(options);
        {
            let mut shared = lock(&self.shared);
            if !shared.progress.fits(&self.phrases) {
                tracing::warn!(
                    instance_id = %self.id,
                    phrase_idx = shared.progress.phrase_idx,
                    "Progress does not fit new phrases, resetting"
                );
                shared.progress = Progress::default();
            }
        }

        if was_scheduled {
            self.start()
        } else {
            Ok(SchedulerState::Idle)
        }
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The single timer task owned by a running [`Typewriter`].
struct Timer {
    id: Uuid,
    phrases: Arc<[String]>,
    options: Arc<TypewriterOptions>,
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<TypewriterEvent>,
    generation: u64,
}

impl Timer {
    async fn run(self) {
        loop {
            let step = {
                let shared = lock(&self.shared);
                if shared.generation != self.generation {
                    return;
                }
                engine::advance(&self.phrases, &self.options, &shared.progress)
            };

            match step {
                Advance::Halt => {
                    let loops_completed = {
                        let mut shared = lock(&self.shared);
                        if shared.generation != self.generation {
                            return;
                        }
                        shared.scheduled = false;
                        shared.progress.loops_completed
                    };
                    tracing::info!(
                        instance_id = %self.id,
                        loops_completed,
                        "Loop limit reached, typewriter halted"
                    );
                    // No subscribers is fine.
                    let _ = self
                        .events
                        .send(TypewriterEvent::loop_limit_reached(self.id, loops_completed));
                    return;
                }
                Advance::Schedule { delay, next } => {
                    tokio::time::sleep(delay).await;

                    {
                        let mut shared = lock(&self.shared);
                        if shared.generation != self.generation {
                            return;
                        }
                        tracing::debug!(
                            instance_id = %self.id,
                            from = %shared.progress.status,
                            to = %next.status,
                            phrase_idx = next.phrase_idx,
                            loops_completed = next.loops_completed,
                            "Typewriter progress committed"
                        );
                        shared.progress = next.clone();
                    }
                    let _ = self
                        .events
                        .send(TypewriterEvent::progress_committed(self.id, next));
                }
            }
        }
    }
}
