//! Mission catalog, tip generation and resolution

pub mod catalog;
pub mod resolve;

pub use catalog::{build_mission_from_prototype, MissionPrototype, MISSION_CATALOG};
pub use resolve::{
    net_mission_reward, resolve_mission, roll_caught, roll_mission_success, success_chance,
    team_stats, LOYALTY_REWARD_MISSION, MISSION_EXPERIENCE,
};
