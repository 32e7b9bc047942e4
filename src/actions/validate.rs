//! Pure validation of commands against current state
//!
//! Validation never mutates anything; it returns the first violated
//! precondition as a human-readable reason. Calling it twice against the
//! same state gives the same answer.

use crate::actions::{Command, Validation};
use crate::core::types::{MissionId, PlayerId, TerritoryId, UnitId};
use crate::map;
use crate::state::mission::{MissionStatus, MAX_TEAM_SIZE, MIN_TEAM_SIZE};
use crate::state::store::GameStore;
use crate::state::unit::{Rank, UnitStatus, MAX_CREW_SIZE};

pub fn validate(store: &GameStore, player: PlayerId, command: &Command) -> Validation {
    match command {
        Command::HireUnit { unit } => validate_hire(store, player, *unit),
        Command::PromoteUnit { unit } => validate_promote(store, player, *unit),
        Command::AssignToCrew {
            unit,
            captain,
            slot,
        } => validate_assign_to_crew(store, player, *unit, *captain, *slot),
        Command::StartCapture { unit, territory } => {
            validate_start_capture(store, player, *unit, *territory)
        }
        Command::AssignToTerritory { unit, territory } => {
            validate_assign_to_territory(store, player, *unit, *territory)
        }
        Command::RemoveFromTerritory { unit, territory } => {
            validate_remove_from_territory(store, player, *unit, *territory)
        }
        Command::LaunchMission { mission, unit_ids } => {
            validate_launch_mission(store, player, *mission, unit_ids)
        }
    }
}

fn validate_hire(store: &GameStore, player: PlayerId, unit_id: UnitId) -> Validation {
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner.is_some() {
        return Err(format!("unit {unit_id} is already owned"));
    }
    if unit.rank != Rank::Associate {
        return Err(format!("unit {unit_id} is not an associate"));
    }
    if store.is_family_full(player) {
        return Err("family is full".to_string());
    }
    Ok(())
}

fn validate_promote(store: &GameStore, player: PlayerId, unit_id: UnitId) -> Validation {
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner != Some(player) {
        return Err(format!("unit {unit_id} is not owned by player {player}"));
    }
    if unit.rank.is_terminal() {
        return Err(format!("unit {unit_id} cannot be promoted further"));
    }
    Ok(())
}

fn validate_assign_to_crew(
    store: &GameStore,
    player: PlayerId,
    unit_id: UnitId,
    captain_id: UnitId,
    slot: usize,
) -> Validation {
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(captain) = store.unit(captain_id) else {
        return Err(format!("captain {captain_id} not found"));
    };
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner != Some(player) {
        return Err(format!("unit {unit_id} does not belong to player {player}"));
    }
    if captain.owner != Some(player) {
        return Err(format!(
            "captain {captain_id} does not belong to player {player}"
        ));
    }
    if unit.rank != Rank::Soldier {
        return Err("crews can hold only soldiers".to_string());
    }
    if captain.rank != Rank::Capo {
        return Err("only a capo can lead a crew".to_string());
    }
    if slot >= MAX_CREW_SIZE {
        return Err(format!("crew slot {slot} out of range"));
    }
    if captain
        .crew
        .map(|crew| crew.contains(&Some(unit_id)))
        .unwrap_or(false)
    {
        return Err("unit already serves in this crew".to_string());
    }
    Ok(())
}

fn validate_start_capture(
    store: &GameStore,
    player: PlayerId,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Validation {
    let Some(territory) = store.territory(territory_id) else {
        return Err(format!("territory {territory_id} not found"));
    };
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner != Some(player) {
        return Err(format!("unit {unit_id} does not belong to player {player}"));
    }
    if unit.rank == Rank::Associate {
        return Err("associates cannot capture territories".to_string());
    }
    if territory.owner == Some(player) {
        return Err("territory is already yours".to_string());
    }
    if !map::is_adjacent_to_player(store, territory_id, player) {
        return Err("territory does not border any of your territories".to_string());
    }
    Ok(())
}

fn validate_assign_to_territory(
    store: &GameStore,
    player: PlayerId,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Validation {
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner != Some(player) {
        return Err(format!("unit {unit_id} does not belong to player {player}"));
    }
    if unit.rank == Rank::Associate {
        return Err(format!("unit {unit_id} is only an associate"));
    }
    let Some(territory) = store.territory(territory_id) else {
        return Err(format!("territory {territory_id} not found"));
    };
    if territory.owner != Some(player) {
        return Err(format!(
            "territory {territory_id} is not owned by player {player}"
        ));
    }
    if territory.manager == Some(unit_id) {
        return Err("unit already manages this territory".to_string());
    }
    Ok(())
}

fn validate_remove_from_territory(
    store: &GameStore,
    player: PlayerId,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Validation {
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    let Some(unit) = store.unit(unit_id) else {
        return Err(format!("unit {unit_id} not found"));
    };
    if unit.owner != Some(player) {
        return Err(format!("unit {unit_id} does not belong to player {player}"));
    }
    let Some(territory) = store.territory(territory_id) else {
        return Err(format!("territory {territory_id} not found"));
    };
    if territory.owner != Some(player) {
        return Err(format!(
            "territory {territory_id} is not owned by player {player}"
        ));
    }
    if territory.manager != Some(unit_id) {
        return Err(format!(
            "unit {unit_id} is not managing territory {territory_id}"
        ));
    }
    Ok(())
}

fn validate_launch_mission(
    store: &GameStore,
    player: PlayerId,
    mission_id: MissionId,
    unit_ids: &[UnitId],
) -> Validation {
    let Some(mission) = store.mission(mission_id) else {
        return Err("mission not found".to_string());
    };
    if mission.player != player {
        return Err("not your mission".to_string());
    }
    if mission.status != MissionStatus::Available {
        return Err("mission already taken".to_string());
    }
    if store.player(player).is_none() {
        return Err(format!("player {player} not found"));
    }
    if unit_ids.len() < MIN_TEAM_SIZE || unit_ids.len() > MAX_TEAM_SIZE {
        return Err(format!(
            "mission requires between {MIN_TEAM_SIZE}-{MAX_TEAM_SIZE} units, got {}",
            unit_ids.len()
        ));
    }
    for uid in unit_ids {
        let Some(unit) = store.unit(*uid) else {
            return Err(format!("unit {uid} not found"));
        };
        // Unaffiliated associates can be brought along on jobs
        if unit.owner != Some(player) && unit.rank != Rank::Associate {
            return Err(format!("unit {uid} does not belong to player {player}"));
        }
        if unit.status != UnitStatus::Idle {
            return Err(format!("unit {uid} is not idle"));
        }
    }
    Ok(())
}
