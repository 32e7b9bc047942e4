//! Mission resolution: team scoring, the success roll and its fallout

use rand::Rng;

use crate::core::types::{MissionId, PlayerId};
use crate::state::mission::{MissionInfo, MissionOutcome, MissionStatus};
use crate::state::player::{chance_to_be_caught, heat_tier, BASE_CHANCE_CAUGHT};
use crate::state::store::GameStore;
use crate::state::unit::{Attribute, Skills, UnitStatus};

/// Loyalty gained on a successful mission; half of it is lost on failure
pub const LOYALTY_REWARD_MISSION: i32 = 10;

/// Experience granted to each participant on success
pub const MISSION_EXPERIENCE: u32 = 20;

/// Combined skills of a team of units
pub fn team_stats(store: &GameStore, unit_ids: &[crate::core::types::UnitId]) -> Skills {
    unit_ids
        .iter()
        .filter_map(|id| store.unit(*id))
        .fold(Skills::default(), |acc, u| acc + u.skills)
}

/// Success chance (percent) for a team against a mission's requirements
///
/// Each attribute contributes `min(95, team/required * 100)`; the mission's
/// chance is the weakest of the four. A requirement of zero is trivially
/// satisfied and contributes 100.
pub fn success_chance(requirements: &Skills, team: &Skills) -> f64 {
    Attribute::ALL
        .iter()
        .map(|attr| {
            let required = requirements.get(*attr);
            if required == 0 {
                return 100.0;
            }
            (team.get(*attr) as f64 / required as f64 * 100.0).min(95.0)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Single 1-100 roll against the success chance
pub fn roll_mission_success<R: Rng>(rng: &mut R, chance: f64) -> bool {
    let roll = rng.gen_range(1..=100);
    roll as f64 <= chance
}

/// Jailhouse roll: 0-100, caught only strictly below the chance
pub fn roll_caught<R: Rng>(rng: &mut R, chance: f64) -> bool {
    let roll = rng.gen_range(0..=100);
    (roll as f64) < chance
}

/// Resolve an active mission at its end tick
///
/// On success the net reward (gross minus the summed unit cuts) lands in
/// the family treasury. Every participant then faces the jailhouse roll,
/// collects loyalty and heat, and steps back to idle or prison.
pub fn resolve_mission(store: &mut GameStore, player_id: PlayerId, mission_id: MissionId) {
    let Some(mission) = store.mission(mission_id).cloned() else {
        tracing::warn!(mission = %mission_id, "cannot resolve mission: unknown id");
        return;
    };
    if store.player(player_id).is_none() {
        tracing::warn!(player = %player_id, "cannot resolve mission: unknown player");
        return;
    }

    let team = team_stats(store, &mission.unit_ids);
    let chance = success_chance(&mission.info.difficulty, &team);
    let success = roll_mission_success(&mut store.rng, chance);

    let mut net_reward = 0;
    if success {
        net_reward = net_mission_reward(store, &mission.info, &mission.unit_ids);
        store.update_player(player_id, |p| p.resources.money += net_reward);
    }

    let family_heat = store
        .player(player_id)
        .map(|p| p.resources.heat)
        .unwrap_or(0);
    let base_chance = BASE_CHANCE_CAUGHT[heat_tier(family_heat)];
    let loyalty_delta = if success {
        LOYALTY_REWARD_MISSION
    } else {
        -LOYALTY_REWARD_MISSION / 2
    };
    let experience = if success { MISSION_EXPERIENCE } else { 0 };

    for uid in mission.unit_ids.clone() {
        let Some(unit) = store.unit(uid) else { continue };
        let caught_chance = chance_to_be_caught(base_chance, 0.0, unit.heat);
        let mut mask = unit.mask;
        let caught = roll_caught(&mut store.rng, caught_chance);
        mask.reveal_random(&mut store.rng);
        if caught {
            tracing::info!(unit = %uid, "unit caught after mission, sent to prison");
        }
        store.update_unit(uid, move |u| {
            u.status = if caught {
                UnitStatus::Prison
            } else {
                UnitStatus::Idle
            };
            u.loyalty += loyalty_delta;
            u.heat += mission.info.heat;
            u.experience += experience;
            u.mask = mask;
        });
    }

    store.update_mission(mission_id, |m| {
        m.status = if success {
            MissionStatus::Succeeded
        } else {
            MissionStatus::Failed
        };
        m.results = success.then_some(MissionOutcome { money: net_reward });
    });

    tracing::info!(
        mission = %mission.info.name,
        player = %player_id,
        success,
        net_reward,
        "mission resolved"
    );
}

/// Gross reward minus the percentage cuts of every participant
pub fn net_mission_reward(
    store: &GameStore,
    info: &MissionInfo,
    unit_ids: &[crate::core::types::UnitId],
) -> i64 {
    let total_cut_pct: u32 = unit_ids
        .iter()
        .filter_map(|id| store.unit(*id))
        .map(|u| u.cut)
        .sum();
    (info.reward as f64 * (1.0 - total_cut_pct as f64 / 100.0)).round() as i64
}
