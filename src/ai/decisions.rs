//! Declarative AI decision table
//!
//! Each decision fires only when every trigger holds; its weight is the
//! base weight scaled by whichever modifiers apply. The table is data,
//! not code: adding a behavior means adding a row, not a branch.

use crate::state::unit::Rank;

/// Numeric comparison used by table conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    pub fn eval(self, actual: i64, expected: i64) -> bool {
        match self {
            Comparison::Gt => actual > expected,
            Comparison::Ge => actual >= expected,
            Comparison::Lt => actual < expected,
            Comparison::Le => actual <= expected,
            Comparison::Eq => actual == expected,
            Comparison::Ne => actual != expected,
        }
    }
}

/// Risk band for a prospective mission given current heat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Risk {
    Low,
    Medium,
    High,
}

/// Everything a trigger or weight modifier can test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    HasMoney { amount: i64 },
    HeatLevel { cmp: Comparison, value: i64 },
    AwarenessLevel { cmp: Comparison, value: i64 },
    TerritoryCount { cmp: Comparison, value: i64 },
    UnitCount { cmp: Comparison, value: i64 },
    UnitRankCount { rank: Rank, cmp: Comparison, value: i64 },
    IdleUnits { cmp: Comparison, value: i64 },
    SuitableMissionAvailable { min_suitability: f64 },
    CapturableTerritoryNearby,
    UnmanagedTerritories { count: usize },
    LowLoyaltyUnits { threshold: i32, count: usize },
    HighSkillUnitAvailable { skill_level: u32 },
    ActiveMissions { cmp: Comparison, value: i64 },
    CanAffordUnit { rank: Rank },
    CanAffordCapture,
    MissionRiskAcceptable { max_risk: Risk },
    /// Reserved for table rows this engine version does not understand;
    /// always evaluates false with a warning
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct WeightModifier {
    pub condition: Condition,
    pub multiplier: f64,
}

/// The abstract moves a decision can order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMove {
    HireUnit { rank: Rank },
    PromoteUnit,
    LaunchBestMission,
    CaptureTerritory,
    AssignTerritoryManagers,
    /// Logged and skipped
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub id: &'static str,
    pub name: &'static str,
    pub triggers: &'static [Condition],
    pub base_weight: f64,
    pub modifiers: &'static [WeightModifier],
    pub moves: &'static [AiMove],
    /// Ticks before the same decision can re-fire for a player; 0 = none
    pub cooldown: u64,
}

pub const AI_DECISIONS: &[Decision] = &[
    Decision {
        id: "launch_suitable_mission",
        name: "Launch Suitable Mission",
        triggers: &[
            Condition::SuitableMissionAvailable { min_suitability: 0.7 },
            Condition::IdleUnits { cmp: Comparison::Ge, value: 1 },
            Condition::ActiveMissions { cmp: Comparison::Lt, value: 3 },
            Condition::MissionRiskAcceptable { max_risk: Risk::Medium },
        ],
        base_weight: 60.0,
        modifiers: &[
            WeightModifier {
                // Less urgent when rich
                condition: Condition::HasMoney { amount: 50_000 },
                multiplier: 0.8,
            },
            WeightModifier {
                condition: Condition::HeatLevel { cmp: Comparison::Lt, value: 30 },
                multiplier: 1.3,
            },
            WeightModifier {
                // Need money for expansion
                condition: Condition::TerritoryCount { cmp: Comparison::Lt, value: 2 },
                multiplier: 1.5,
            },
        ],
        moves: &[AiMove::LaunchBestMission],
        cooldown: 5,
    },
    Decision {
        id: "hire_associate",
        name: "Hire Associate",
        triggers: &[
            Condition::CanAffordUnit { rank: Rank::Associate },
            Condition::UnitCount { cmp: Comparison::Lt, value: 8 },
            Condition::HeatLevel { cmp: Comparison::Lt, value: 50 },
        ],
        base_weight: 30.0,
        modifiers: &[
            WeightModifier {
                condition: Condition::TerritoryCount { cmp: Comparison::Gt, value: 2 },
                multiplier: 1.5,
            },
            WeightModifier {
                // Desperate for hands
                condition: Condition::IdleUnits { cmp: Comparison::Lt, value: 2 },
                multiplier: 2.0,
            },
            WeightModifier {
                condition: Condition::UnitCount { cmp: Comparison::Lt, value: 3 },
                multiplier: 2.5,
            },
        ],
        moves: &[AiMove::HireUnit { rank: Rank::Associate }],
        cooldown: 8,
    },
    Decision {
        id: "hire_soldier",
        name: "Hire Soldier",
        triggers: &[
            Condition::CanAffordUnit { rank: Rank::Soldier },
            Condition::UnitRankCount {
                rank: Rank::Soldier,
                cmp: Comparison::Lt,
                value: 4,
            },
            Condition::UnitCount { cmp: Comparison::Ge, value: 3 },
        ],
        base_weight: 25.0,
        modifiers: &[
            WeightModifier {
                condition: Condition::TerritoryCount { cmp: Comparison::Gt, value: 3 },
                multiplier: 1.8,
            },
            WeightModifier {
                // Need protection when being watched
                condition: Condition::AwarenessLevel { cmp: Comparison::Gt, value: 40 },
                multiplier: 1.6,
            },
        ],
        moves: &[AiMove::HireUnit { rank: Rank::Soldier }],
        cooldown: 12,
    },
    Decision {
        id: "promote_loyal_unit",
        name: "Promote Loyal Unit",
        triggers: &[
            Condition::HasMoney { amount: 10_000 },
            Condition::HighSkillUnitAvailable { skill_level: 15 },
            Condition::UnitRankCount {
                rank: Rank::Associate,
                cmp: Comparison::Ge,
                value: 2,
            },
        ],
        base_weight: 25.0,
        modifiers: &[
            WeightModifier {
                // Loyalty crisis, promote to lift morale
                condition: Condition::LowLoyaltyUnits {
                    threshold: 60,
                    count: 1,
                },
                multiplier: 2.0,
            },
            WeightModifier {
                condition: Condition::UnitRankCount {
                    rank: Rank::Soldier,
                    cmp: Comparison::Lt,
                    value: 2,
                },
                multiplier: 1.8,
            },
        ],
        moves: &[AiMove::PromoteUnit],
        cooldown: 15,
    },
    Decision {
        id: "capture_territory",
        name: "Capture Territory",
        triggers: &[
            Condition::CapturableTerritoryNearby,
            Condition::IdleUnits { cmp: Comparison::Ge, value: 1 },
            Condition::CanAffordCapture,
            Condition::HeatLevel { cmp: Comparison::Lt, value: 40 },
        ],
        base_weight: 45.0,
        modifiers: &[
            WeightModifier {
                // Early expansion is critical
                condition: Condition::TerritoryCount { cmp: Comparison::Lt, value: 3 },
                multiplier: 1.8,
            },
            WeightModifier {
                condition: Condition::TerritoryCount { cmp: Comparison::Lt, value: 5 },
                multiplier: 1.4,
            },
            WeightModifier {
                // Too much attention
                condition: Condition::AwarenessLevel { cmp: Comparison::Gt, value: 60 },
                multiplier: 0.6,
            },
            WeightModifier {
                condition: Condition::UnitRankCount {
                    rank: Rank::Soldier,
                    cmp: Comparison::Ge,
                    value: 2,
                },
                multiplier: 1.3,
            },
        ],
        moves: &[AiMove::CaptureTerritory],
        cooldown: 12,
    },
    Decision {
        id: "assign_managers",
        name: "Assign Territory Managers",
        triggers: &[
            Condition::UnmanagedTerritories { count: 1 },
            Condition::IdleUnits { cmp: Comparison::Ge, value: 1 },
        ],
        base_weight: 35.0,
        modifiers: &[
            WeightModifier {
                condition: Condition::TerritoryCount { cmp: Comparison::Gt, value: 2 },
                multiplier: 1.6,
            },
            WeightModifier {
                condition: Condition::UnmanagedTerritories { count: 3 },
                multiplier: 2.0,
            },
        ],
        moves: &[AiMove::AssignTerritoryManagers],
        cooldown: 3,
    },
    Decision {
        id: "conservative_mission_when_hot",
        name: "Conservative Mission (High Heat)",
        triggers: &[
            Condition::SuitableMissionAvailable { min_suitability: 0.9 },
            Condition::HeatLevel { cmp: Comparison::Gt, value: 50 },
            Condition::IdleUnits { cmp: Comparison::Ge, value: 2 },
            Condition::MissionRiskAcceptable { max_risk: Risk::Low },
        ],
        base_weight: 20.0,
        modifiers: &[WeightModifier {
            // No need to press luck when rich and hot
            condition: Condition::HasMoney { amount: 20_000 },
            multiplier: 0.5,
        }],
        moves: &[AiMove::LaunchBestMission],
        cooldown: 10,
    },
    Decision {
        id: "aggressive_expansion",
        name: "Aggressive Expansion",
        triggers: &[
            Condition::CapturableTerritoryNearby,
            Condition::UnitCount { cmp: Comparison::Ge, value: 6 },
            Condition::HasMoney { amount: 25_000 },
            Condition::HeatLevel { cmp: Comparison::Lt, value: 25 },
            Condition::TerritoryCount { cmp: Comparison::Lt, value: 8 },
        ],
        base_weight: 40.0,
        modifiers: &[WeightModifier {
            condition: Condition::UnitRankCount {
                rank: Rank::Soldier,
                cmp: Comparison::Ge,
                value: 3,
            },
            multiplier: 1.5,
        }],
        moves: &[AiMove::CaptureTerritory],
        cooldown: 8,
    },
    Decision {
        id: "build_reputation",
        name: "Build Reputation through Missions",
        triggers: &[
            Condition::SuitableMissionAvailable { min_suitability: 0.8 },
            Condition::TerritoryCount { cmp: Comparison::Ge, value: 2 },
            Condition::IdleUnits { cmp: Comparison::Ge, value: 2 },
        ],
        base_weight: 30.0,
        modifiers: &[
            WeightModifier {
                // Many low-rank units need seasoning
                condition: Condition::UnitRankCount {
                    rank: Rank::Associate,
                    cmp: Comparison::Gt,
                    value: 4,
                },
                multiplier: 1.4,
            },
            WeightModifier {
                condition: Condition::HasMoney { amount: 30_000 },
                multiplier: 1.2,
            },
        ],
        moves: &[AiMove::LaunchBestMission],
        cooldown: 6,
    },
    Decision {
        id: "emergency_hire",
        name: "Emergency Hiring",
        triggers: &[
            Condition::UnitCount { cmp: Comparison::Lt, value: 3 },
            Condition::CanAffordUnit { rank: Rank::Associate },
            Condition::TerritoryCount { cmp: Comparison::Gt, value: 0 },
        ],
        base_weight: 80.0,
        modifiers: &[WeightModifier {
            // Critical shortage
            condition: Condition::UnitCount { cmp: Comparison::Lt, value: 2 },
            multiplier: 2.0,
        }],
        moves: &[AiMove::HireUnit { rank: Rank::Associate }],
        cooldown: 5,
    },
];
