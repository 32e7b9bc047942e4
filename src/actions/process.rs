//! Command processors: apply a validated command's effects
//!
//! Processors trust that validation just passed, but still look entities
//! up defensively; a vanished entity turns into an error string that the
//! queue records as a processing failure.

use crate::actions::Command;
use crate::core::types::{MissionId, PlayerId, TerritoryId, UnitId};
use crate::schedule::{ScheduledJob, Scheduler};
use crate::state::mission::MissionStatus;
use crate::state::store::GameStore;
use crate::state::unit::{Rank, Unit, UnitStatus};

pub fn apply_command(
    store: &mut GameStore,
    scheduler: &mut Scheduler,
    player: PlayerId,
    command: &Command,
) -> Result<(), String> {
    match command {
        Command::HireUnit { unit } => hire_unit(store, player, *unit),
        Command::PromoteUnit { unit } => promote_unit(store, player, *unit),
        Command::AssignToCrew {
            unit,
            captain,
            slot,
        } => assign_to_crew(store, *unit, *captain, *slot),
        Command::StartCapture { unit, territory } => {
            start_capture(store, player, *unit, *territory)
        }
        Command::AssignToTerritory { unit, territory } => {
            assign_to_territory(store, *unit, *territory)
        }
        Command::RemoveFromTerritory { unit, territory } => {
            remove_from_territory(store, *unit, *territory)
        }
        Command::LaunchMission { mission, unit_ids } => {
            launch_mission(store, scheduler, player, *mission, unit_ids)
        }
    }
}

fn hire_unit(store: &mut GameStore, player: PlayerId, unit_id: UnitId) -> Result<(), String> {
    store.update_unit(unit_id, |u| {
        u.rank = Rank::Soldier;
        u.owner = Some(player);
    });
    store.update_player(player, |p| p.units.push(unit_id));
    tracing::info!(player = %player, unit = %unit_id, "unit hired");
    Ok(())
}

fn promote_unit(store: &mut GameStore, player: PlayerId, unit_id: UnitId) -> Result<(), String> {
    store.update_unit(unit_id, |u| {
        u.rank = u.rank.promoted();
        u.cut = Unit::cut_for(u.rank, u.level);
        if u.rank == Rank::Capo && u.crew.is_none() {
            u.crew = Some(Default::default());
        }
    });
    let rank = store.unit(unit_id).map(|u| u.rank);
    tracing::info!(player = %player, unit = %unit_id, ?rank, "unit promoted");
    Ok(())
}

/// Slot swap: the incoming unit takes the slot, the evicted unit (if any)
/// moves into the slot the incoming unit vacated in its previous crew
fn assign_to_crew(
    store: &mut GameStore,
    unit_id: UnitId,
    captain_id: UnitId,
    slot: usize,
) -> Result<(), String> {
    let previous_captain = store
        .unit(unit_id)
        .ok_or_else(|| format!("unit {unit_id} vanished"))?
        .captain;
    let evicted = store
        .unit(captain_id)
        .and_then(|c| c.crew)
        .ok_or_else(|| format!("captain {captain_id} has no crew"))?[slot];

    if let Some(prev_captain_id) = previous_captain {
        store.update_unit(prev_captain_id, |c| {
            if let Some(crew) = c.crew.as_mut() {
                for entry in crew.iter_mut() {
                    if *entry == Some(unit_id) {
                        *entry = evicted;
                    }
                }
            }
        });
    }
    if let Some(evicted_id) = evicted {
        store.update_unit(evicted_id, |u| u.captain = previous_captain);
    }

    store.update_unit(captain_id, |c| {
        if let Some(crew) = c.crew.as_mut() {
            crew[slot] = Some(unit_id);
        }
    });
    store.update_unit(unit_id, |u| u.captain = Some(captain_id));
    Ok(())
}

fn start_capture(
    store: &mut GameStore,
    player: PlayerId,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Result<(), String> {
    // A new grab on a contested block frees whoever was working it
    let previous = store
        .territory(territory_id)
        .and_then(|t| t.capture.capturing_unit);
    if let Some(previous_id) = previous {
        if store.unit(previous_id).is_some() {
            store.update_unit(previous_id, |u| u.status = UnitStatus::Idle);
        }
    }

    store.update_territory(territory_id, |t| {
        t.capture.in_progress = true;
        t.capture.initiator = Some(player);
        t.capture.capturing_unit = Some(unit_id);
    });
    store.update_unit(unit_id, |u| u.status = UnitStatus::Expand);
    tracing::info!(player = %player, unit = %unit_id, territory = %territory_id, "capture started");
    Ok(())
}

fn assign_to_territory(
    store: &mut GameStore,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Result<(), String> {
    let previous = store.territory(territory_id).and_then(|t| t.manager);
    if let Some(previous_id) = previous {
        if store.unit(previous_id).is_some() {
            store.update_unit(previous_id, |u| u.status = UnitStatus::Idle);
        }
    }

    store.update_unit(unit_id, |u| u.status = UnitStatus::Territory);
    store.update_territory(territory_id, |t| t.manager = Some(unit_id));
    Ok(())
}

fn remove_from_territory(
    store: &mut GameStore,
    unit_id: UnitId,
    territory_id: TerritoryId,
) -> Result<(), String> {
    store.update_unit(unit_id, |u| u.status = UnitStatus::Idle);
    store.update_territory(territory_id, |t| t.manager = None);
    Ok(())
}

fn launch_mission(
    store: &mut GameStore,
    scheduler: &mut Scheduler,
    player: PlayerId,
    mission_id: MissionId,
    unit_ids: &[UnitId],
) -> Result<(), String> {
    let duration = store
        .mission(mission_id)
        .ok_or_else(|| format!("mission {mission_id} vanished"))?
        .info
        .duration_ticks;
    let start = store.tick_count;
    let end = start + duration;

    for uid in unit_ids {
        store.update_unit(*uid, |u| {
            u.status = UnitStatus::Mission;
            u.missions.push(mission_id);
        });
    }

    let team: Vec<UnitId> = unit_ids.to_vec();
    store.update_mission(mission_id, |m| {
        m.unit_ids = team.clone();
        m.start_tick = Some(start);
        m.end_tick = Some(end);
        m.status = MissionStatus::Active;
    });

    scheduler.add(
        ScheduledJob::MissionResolution {
            player,
            mission: mission_id,
        },
        duration,
        end,
        false,
    );
    tracing::info!(player = %player, mission = %mission_id, team = unit_ids.len(), "mission launched");
    Ok(())
}
