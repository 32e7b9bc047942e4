//! Static mission prototypes and tip instantiation

use rand::Rng;

use crate::core::types::{MissionId, PlayerId, Tick};
use crate::state::mission::{Mission, MissionInfo, MissionStatus};
use crate::state::unit::Skills;

/// A static job template; live missions are randomized copies
#[derive(Debug, Clone, Copy)]
pub struct MissionPrototype {
    pub name: &'static str,
    pub reward: i64,
    pub difficulty: Skills,
    pub duration_ticks: u64,
    pub heat: u32,
    pub repeatable: bool,
}

const fn skills(muscle: u32, brains: u32, cunning: u32, influence: u32) -> Skills {
    Skills {
        muscle,
        brains,
        cunning,
        influence,
    }
}

/// The full job board, from corner-store shakedowns to wet work
pub const MISSION_CATALOG: [MissionPrototype; 11] = [
    MissionPrototype {
        name: "Shakedown Local Shop",
        reward: 1_000,
        difficulty: skills(5, 5, 5, 5),
        duration_ticks: 12,
        heat: 5,
        repeatable: true,
    },
    MissionPrototype {
        name: "Rob Convenience Store",
        reward: 2_500,
        difficulty: skills(8, 4, 10, 4),
        duration_ticks: 24,
        heat: 8,
        repeatable: true,
    },
    MissionPrototype {
        name: "Run Protection Racket",
        reward: 5_000,
        difficulty: skills(12, 6, 9, 15),
        duration_ticks: 48,
        heat: 12,
        repeatable: true,
    },
    MissionPrototype {
        name: "Hijack Delivery Truck",
        reward: 8_000,
        difficulty: skills(15, 10, 18, 6),
        duration_ticks: 48,
        heat: 16,
        repeatable: true,
    },
    MissionPrototype {
        name: "Drug Distribution Run",
        reward: 12_000,
        difficulty: skills(10, 8, 15, 12),
        duration_ticks: 56,
        heat: 20,
        repeatable: true,
    },
    MissionPrototype {
        name: "Illegal Gambling Operation",
        reward: 20_000,
        difficulty: skills(15, 22, 18, 25),
        duration_ticks: 80,
        heat: 25,
        repeatable: false,
    },
    MissionPrototype {
        name: "Underground Fight Club",
        reward: 15_000,
        difficulty: skills(25, 5, 12, 18),
        duration_ticks: 100,
        heat: 18,
        repeatable: true,
    },
    MissionPrototype {
        name: "Blackmail Local Official",
        reward: 25_000,
        difficulty: skills(6, 20, 25, 30),
        duration_ticks: 48,
        heat: 30,
        repeatable: false,
    },
    MissionPrototype {
        name: "Smuggle Contraband",
        reward: 18_000,
        difficulty: skills(12, 20, 28, 10),
        duration_ticks: 72,
        heat: 22,
        repeatable: true,
    },
    MissionPrototype {
        name: "Steal Luxury Cars",
        reward: 22_000,
        difficulty: skills(10, 15, 30, 8),
        duration_ticks: 48,
        heat: 24,
        repeatable: true,
    },
    MissionPrototype {
        name: "Eliminate Informant",
        reward: 30_000,
        difficulty: skills(25, 20, 35, 15),
        duration_ticks: 100,
        heat: 40,
        repeatable: false,
    },
];

/// Build a fresh tip for a player from a prototype
///
/// Reward varies by up to 20% either way, each difficulty attribute by up
/// to 10%. The tip stays on the board for `tip_lifespan` ticks.
pub fn build_mission_from_prototype<R: Rng>(
    rng: &mut R,
    player: PlayerId,
    prototype: &MissionPrototype,
    current_tick: Tick,
    tip_lifespan: u64,
) -> Mission {
    let reward_var = (prototype.reward as f64 * 0.2) as i64;
    let reward = prototype.reward + rng.gen_range(-reward_var..=reward_var);

    let mut difficulty = Skills::default();
    for attr in crate::state::unit::Attribute::ALL {
        let base = prototype.difficulty.get(attr);
        let var = (base as f64 * 0.1).floor() as i64;
        let rolled = (base as i64 + rng.gen_range(-var..=var)).max(0) as u32;
        difficulty.add(attr, rolled);
    }

    Mission {
        id: MissionId::new(),
        player,
        info: MissionInfo {
            name: prototype.name.to_string(),
            reward,
            difficulty,
            duration_ticks: prototype.duration_ticks,
            heat: prototype.heat,
            repeatable: prototype.repeatable,
        },
        unit_ids: Vec::new(),
        start_tick: None,
        end_tick: None,
        status: MissionStatus::Available,
        tip_expires: current_tick + tip_lifespan,
        results: None,
    }
}
