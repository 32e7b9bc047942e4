//! Player records and family-level derived stats

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, TerritoryId, UnitId};

/// A family's liquid resources and exposure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resources {
    pub money: i64,
    /// Law-enforcement pressure on the whole family
    pub heat: u32,
    /// How visible the family is to rivals and the public
    pub awareness: u32,
    /// Net result of the most recent income cycle
    pub last_income: i64,
}

/// A participating family, human- or AI-controlled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Display color, hex RGB
    pub color: String,
    pub resources: Resources,
    /// Territories this family holds
    pub territories: Vec<TerritoryId>,
    /// Made members (associates in the pool are not listed here)
    pub units: Vec<UnitId>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: impl Into<String>, money: i64) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            resources: Resources {
                money,
                ..Resources::default()
            },
            territories: Vec::new(),
            units: Vec::new(),
        }
    }
}

/// Heat tier thresholds; tier 0 below 25, tier 3 at 75 and above
pub const HEAT_TIERS: [u32; 3] = [25, 50, 75];

/// Base chance (percent) for a unit to be caught after a mission, by heat tier
pub const BASE_CHANCE_CAUGHT: [f64; 4] = [2.0, 5.0, 10.0, 20.0];

/// Heat tier (0-3) for a family heat value
pub fn heat_tier(heat: u32) -> usize {
    HEAT_TIERS.iter().filter(|t| heat >= **t).count()
}

/// Awareness tier (0-3), same thresholds as heat
pub fn awareness_tier(awareness: u32) -> usize {
    heat_tier(awareness)
}

/// Per-unit chance to be caught, scaled up by the unit's own heat
pub fn chance_to_be_caught(base_chance: f64, mission_chance: f64, unit_heat: u32) -> f64 {
    (base_chance + mission_chance) * ((100 + unit_heat) as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_tiers() {
        assert_eq!(heat_tier(0), 0);
        assert_eq!(heat_tier(24), 0);
        assert_eq!(heat_tier(25), 1);
        assert_eq!(heat_tier(50), 2);
        assert_eq!(heat_tier(74), 2);
        assert_eq!(heat_tier(75), 3);
        assert_eq!(heat_tier(200), 3);
    }

    #[test]
    fn test_caught_chance_scales_with_unit_heat() {
        assert!((chance_to_be_caught(10.0, 0.0, 0) - 10.0).abs() < f64::EPSILON);
        assert!((chance_to_be_caught(10.0, 0.0, 100) - 20.0).abs() < f64::EPSILON);
        assert!((chance_to_be_caught(5.0, 5.0, 50) - 15.0).abs() < f64::EPSILON);
    }
}
