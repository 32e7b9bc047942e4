//! Live mission records

use serde::{Deserialize, Serialize};

use crate::core::types::{MissionId, PlayerId, Tick, UnitId};
use crate::state::unit::Skills;

/// Static description of a job, embedded (randomized) into live missions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionInfo {
    pub name: String,
    /// Gross payout before unit cuts
    pub reward: i64,
    /// Per-attribute skill requirements
    pub difficulty: Skills,
    pub duration_ticks: u64,
    /// Heat added to every participant on resolution
    pub heat: u32,
    /// Whether the tip can be offered again later
    pub repeatable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    /// Tip on the table, can be launched until it expires
    Available,
    /// Units committed, resolution scheduled
    Active,
    Succeeded,
    Failed,
}

/// Payout recorded on a resolved mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub money: i64,
}

/// A mission offered to (and possibly run by) one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub player: PlayerId,
    /// Self-contained randomized copy of the prototype
    pub info: MissionInfo,
    /// Empty until launched; 1-4 units once active
    pub unit_ids: Vec<UnitId>,
    pub start_tick: Option<Tick>,
    pub end_tick: Option<Tick>,
    pub status: MissionStatus,
    /// Tick at which an unlaunched tip is withdrawn
    pub tip_expires: Tick,
    pub results: Option<MissionOutcome>,
}

/// Smallest and largest team a mission accepts
pub const MIN_TEAM_SIZE: usize = 1;
pub const MAX_TEAM_SIZE: usize = 4;
