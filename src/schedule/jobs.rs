//! Execution of the scheduled job variants

use rand::Rng;

use crate::core::error::Result;
use crate::core::types::{MissionId, Tick};
use crate::map;
use crate::missions::{build_mission_from_prototype, resolve_mission, MISSION_CATALOG};
use crate::schedule::{ScheduledJob, Scheduler};
use crate::state::mission::MissionStatus;
use crate::state::store::GameStore;
use crate::state::territory::REGION_CONTROL_THRESHOLD;
use crate::state::unit::UnitStatus;

/// Experience a manager collects each income cycle
const MANAGER_EXPERIENCE: u32 = 5;

/// Experience for finishing a territory grab
const CAPTURE_EXPERIENCE: u32 = 25;

pub fn execute_job(
    job: &ScheduledJob,
    store: &mut GameStore,
    scheduler: &mut Scheduler,
    current_tick: Tick,
) -> Result<()> {
    match job {
        ScheduledJob::IncomeGeneration => generate_income(store),
        ScheduledJob::CaptureProgress => advance_captures(store),
        ScheduledJob::MissionSupply => supply_missions(store, scheduler, current_tick),
        ScheduledJob::MissionResolution { player, mission } => {
            resolve_mission(store, *player, *mission);
            Ok(())
        }
        ScheduledJob::TipExpiry { mission } => expire_tip(store, *mission),
    }
}

/// Income cycle: territory takings times manager and region multipliers,
/// minus the payroll
fn generate_income(store: &mut GameStore) -> Result<()> {
    for player_id in store.player_ids() {
        let territory_ids = store
            .player(player_id)
            .map(|p| p.territories.clone())
            .unwrap_or_default();

        let mut income = 0.0;
        for tid in territory_ids {
            let Some(territory) = store.territory(tid) else {
                continue;
            };
            let region_id = territory.region;
            let base = territory.income as f64;
            let manager = territory
                .manager
                .and_then(|m| store.unit(m))
                .map(|u| (u.id, u.manager_multiplier()));

            let mut multiplier = 1.0;
            if let Some((manager_id, manager_multiplier)) = manager {
                multiplier = manager_multiplier;
                store.update_unit(manager_id, |u| u.experience += MANAGER_EXPERIENCE);
            }
            if store.region_share(player_id, region_id) > REGION_CONTROL_THRESHOLD {
                if let Some(region) = store.region(region_id) {
                    multiplier *= (100 + region.income_bonus) as f64 / 100.0;
                }
            }
            income += base * multiplier;
        }

        let payroll: i64 = store
            .player_units(player_id)
            .iter()
            .map(|u| u.rank.salary())
            .sum();
        let net = income.round() as i64 - payroll;

        store.update_player(player_id, |p| {
            p.resources.money += net;
            p.resources.last_income = net;
        });
        tracing::debug!(player = %player_id, net, "income cycle applied");
    }
    Ok(())
}

/// Advance every running capture; abort the ones whose unit went missing,
/// switched sides or was pulled off the job
fn advance_captures(store: &mut GameStore) -> Result<()> {
    let contested: Vec<_> = store
        .territories()
        .filter(|t| t.capture.in_progress)
        .map(|t| t.id)
        .collect();

    for tid in contested {
        let Some(territory) = store.territory(tid) else {
            continue;
        };
        let initiator = territory.capture.initiator;
        let unit = territory
            .capture
            .capturing_unit
            .and_then(|u| store.unit(u))
            .map(|u| (u.id, u.owner, u.status, u.skills.muscle));

        let valid = unit
            .map(|(_, owner, status, _)| owner == initiator && status == UnitStatus::Expand)
            .unwrap_or(false);
        if !valid {
            store.update_territory(tid, |t| t.capture.clear());
            tracing::info!(territory = %tid, "capture aborted, capturing unit missing or reassigned");
            continue;
        }

        let (unit_id, owner, _, muscle) = unit.unwrap();
        let Some(player_id) = owner else { continue };
        let owned_neighbors = map::owned_neighbor_count(store, tid, player_id);
        let gained = map::capture_progress_per_cycle(muscle, owned_neighbors);
        let progress = store
            .territory(tid)
            .map(|t| t.capture.progress + gained)
            .unwrap_or(gained);

        if progress >= 100.0 {
            store.update_territory(tid, |t| {
                t.owner = Some(player_id);
                t.capture.clear();
                t.manager = Some(unit_id);
            });
            store.update_player(player_id, |p| p.territories.push(tid));
            store.update_unit(unit_id, |u| {
                u.status = UnitStatus::Territory;
                u.experience += CAPTURE_EXPERIENCE;
            });
            tracing::info!(territory = %tid, player = %player_id, "territory captured");
        } else {
            store.update_territory(tid, |t| t.capture.progress = progress);
        }
    }
    Ok(())
}

/// Deal one randomized tip to every player and arm its expiry
fn supply_missions(store: &mut GameStore, scheduler: &mut Scheduler, current_tick: Tick) -> Result<()> {
    let lifespan = store.config.tip_lifespan;
    for player_id in store.player_ids() {
        let proto = &MISSION_CATALOG[store.rng.gen_range(0..MISSION_CATALOG.len())];
        let mission =
            build_mission_from_prototype(&mut store.rng, player_id, proto, current_tick, lifespan);
        let mission_id = mission.id;
        let expires = mission.tip_expires;
        tracing::debug!(player = %player_id, mission = %mission.info.name, "new tip on the board");
        store.insert_mission(mission);
        scheduler.add(
            ScheduledJob::TipExpiry { mission: mission_id },
            lifespan,
            expires,
            false,
        );
    }
    Ok(())
}

/// Withdraw a tip, but only if it was never launched
fn expire_tip(store: &mut GameStore, mission_id: MissionId) -> Result<()> {
    let Some(mission) = store.mission(mission_id) else {
        return Ok(());
    };
    if mission.status == MissionStatus::Available {
        store.remove_mission(mission_id);
        tracing::debug!(mission = %mission_id, "tip expired and withdrawn");
    }
    Ok(())
}
