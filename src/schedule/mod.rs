//! Scheduled-event subsystem: recurring world processes and one-shot timers
//!
//! Entries fire when their `next_execution_tick` falls due. Execution is
//! isolated per entry; a failing job is logged and still rescheduled (or
//! removed) according to its recurrence flag.

mod jobs;

use serde::{Deserialize, Serialize};

use crate::core::types::{JobId, MissionId, PlayerId, Tick};
use crate::state::store::GameStore;

/// The closed set of work a scheduled entry can carry out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledJob {
    /// Territory income minus salaries, per player
    IncomeGeneration,
    /// Advance (or abort) every in-progress territory capture
    CaptureProgress,
    /// Deal one fresh mission tip per player
    MissionSupply,
    /// Resolve a launched mission at its end tick
    MissionResolution {
        player: PlayerId,
        mission: MissionId,
    },
    /// Withdraw a tip nobody picked up
    TipExpiry { mission: MissionId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub id: JobId,
    pub job: ScheduledJob,
    pub interval: u64,
    pub next_execution_tick: Tick,
    pub recurring: bool,
}

/// Owns all scheduled entries and drives the due ones each tick
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<ScheduledEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, job: ScheduledJob, interval: u64, first_tick: Tick, recurring: bool) -> JobId {
        let id = JobId::new();
        self.entries.push(ScheduledEntry {
            id,
            job,
            interval,
            next_execution_tick: first_tick,
            recurring,
        });
        id
    }

    pub fn remove(&mut self, id: JobId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Next ticks at which a job matching the predicate will fire
    pub fn due_ticks(&self, pred: impl Fn(&ScheduledJob) -> bool) -> Vec<Tick> {
        self.entries
            .iter()
            .filter(|e| pred(&e.job))
            .map(|e| e.next_execution_tick)
            .collect()
    }

    /// Execute every entry due at `current_tick`
    ///
    /// Due entries are pulled out first, so a job that registers new
    /// entries (mission supply arming tip expiries) never sees them fire
    /// in the same pass. Recurring entries come back `interval` ticks
    /// after the tick they actually ran on.
    pub fn run_due(&mut self, store: &mut GameStore, current_tick: Tick) {
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.next_execution_tick > current_tick {
                return true;
            }
            due.push(entry.clone());
            if entry.recurring {
                entry.next_execution_tick = current_tick + entry.interval;
                true
            } else {
                false
            }
        });

        for entry in due {
            if let Err(err) = jobs::execute_job(&entry.job, store, self, current_tick) {
                tracing::error!(job = ?entry.job, %err, "scheduled job failed");
            }
        }
    }
}

/// Register the standing recurring jobs at game start
pub fn setup_initial_jobs(scheduler: &mut Scheduler, store: &GameStore) {
    let config = &store.config;
    scheduler.add(
        ScheduledJob::IncomeGeneration,
        config.income_rate,
        config.income_rate,
        true,
    );
    scheduler.add(
        ScheduledJob::CaptureProgress,
        config.capture_rate,
        config.capture_rate,
        true,
    );
    scheduler.add(
        ScheduledJob::MissionSupply,
        config.tip_rate,
        config.tip_rate,
        true,
    );
    tracing::debug!("initial scheduled jobs registered");
}

pub use jobs::execute_job;
