//! Player actions: commands, validation and the FIFO queue
//!
//! Every state change a player (human or AI) requests travels as a
//! `Command` through the `ActionQueue`. Validation runs twice: once at
//! enqueue, so bad requests fail fast into history, and again at
//! processing time, because earlier actions in the same batch may have
//! invalidated later ones.

mod process;
mod validate;

use serde::{Deserialize, Serialize};

use crate::core::types::{ActionId, MissionId, PlayerId, TerritoryId, Tick, UnitId};
use crate::schedule::Scheduler;
use crate::state::store::GameStore;

pub use process::apply_command;
pub use validate::validate;

/// Outcome of validating a command; the reason string is surfaced to
/// callers for diagnostics
pub type Validation = std::result::Result<(), String>;

/// The closed set of requests a player can make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    HireUnit {
        unit: UnitId,
    },
    PromoteUnit {
        unit: UnitId,
    },
    AssignToCrew {
        unit: UnitId,
        captain: UnitId,
        slot: usize,
    },
    StartCapture {
        unit: UnitId,
        territory: TerritoryId,
    },
    AssignToTerritory {
        unit: UnitId,
        territory: TerritoryId,
    },
    RemoveFromTerritory {
        unit: UnitId,
        territory: TerritoryId,
    },
    LaunchMission {
        mission: MissionId,
        unit_ids: Vec<UnitId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// A queued command with its audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub player: PlayerId,
    pub command: Command,
    pub status: ActionStatus,
    pub issued_at: Tick,
    pub failure_reason: Option<String>,
}

/// FIFO action pipeline; completed and failed actions move to history
#[derive(Debug, Default)]
pub struct ActionQueue {
    pending: Vec<Action>,
    history: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and enqueue a command
    ///
    /// Invalid commands are stamped Failed and go straight to history;
    /// they never enter the queue. No entity is mutated here.
    pub fn queue(&mut self, store: &GameStore, player: PlayerId, command: Command) -> ActionId {
        let id = ActionId::new();
        let mut action = Action {
            id,
            player,
            command,
            status: ActionStatus::Pending,
            issued_at: store.tick_count,
            failure_reason: None,
        };

        match validate(store, player, &action.command) {
            Ok(()) => {
                tracing::debug!(action = %id, player = %player, "action queued");
                self.pending.push(action);
            }
            Err(reason) => {
                tracing::debug!(action = %id, player = %player, %reason, "action rejected");
                action.status = ActionStatus::Failed;
                action.failure_reason = Some(reason);
                self.history.push(action);
            }
        }
        id
    }

    /// Drain and execute the pending queue in enqueue order
    ///
    /// Each action is re-validated against the current state before its
    /// processor runs; a failure moves it to history without touching
    /// the rest of the batch.
    pub fn process(&mut self, store: &mut GameStore, scheduler: &mut Scheduler) {
        let mut batch = std::mem::take(&mut self.pending);
        for action in &mut batch {
            action.status = ActionStatus::Processing;
        }

        for mut action in batch {
            let result = validate(store, action.player, &action.command).and_then(|()| {
                apply_command(store, scheduler, action.player, &action.command)
            });
            match result {
                Ok(()) => {
                    action.status = ActionStatus::Completed;
                }
                Err(reason) => {
                    tracing::warn!(action = %action.id, %reason, "action failed during processing");
                    action.status = ActionStatus::Failed;
                    action.failure_reason = Some(reason);
                }
            }
            self.history.push(action);
        }
    }

    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }
}
