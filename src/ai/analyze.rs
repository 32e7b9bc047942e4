//! Mission-fit scoring and risk evaluation for the AI

use crate::ai::decisions::Risk;
use crate::core::types::UnitId;
use crate::state::mission::Mission;
use crate::state::unit::{Attribute, Skills, Unit, UnitStatus};

/// Suitability floor below which the AI refuses to launch a mission
pub const LAUNCH_SUITABILITY_FLOOR: f64 = 0.6;

/// A candidate team for a mission and how well it fits
#[derive(Debug, Clone)]
pub struct MissionFit {
    /// 0.0-2.0; averaged capped per-attribute coverage, penalized when
    /// requirements are not fully met
    pub suitability: f64,
    pub team: Vec<UnitId>,
    pub total_skills: Skills,
}

/// Greedy team building: strongest idle units first, up to four, stopping
/// early once every requirement is covered
pub fn mission_suitability(mission: &Mission, available_units: &[&Unit]) -> MissionFit {
    let mut idle: Vec<&Unit> = available_units
        .iter()
        .copied()
        .filter(|u| u.status == UnitStatus::Idle)
        .collect();
    if idle.is_empty() {
        return MissionFit {
            suitability: 0.0,
            team: Vec::new(),
            total_skills: Skills::default(),
        };
    }
    idle.sort_by(|a, b| b.skills.total().cmp(&a.skills.total()));

    let required = &mission.info.difficulty;
    let mut team = Vec::new();
    let mut totals = Skills::default();
    for unit in idle.iter().take(crate::state::mission::MAX_TEAM_SIZE) {
        team.push(unit.id);
        totals = totals + unit.skills;

        let covered = Attribute::ALL
            .iter()
            .all(|a| totals.get(*a) >= required.get(*a));
        if covered {
            break;
        }
    }

    let mut suitability = Attribute::ALL
        .iter()
        .map(|a| {
            let ratio = totals.get(*a) as f64 / required.get(*a).max(1) as f64;
            ratio.min(2.0)
        })
        .sum::<f64>()
        / Attribute::ALL.len() as f64;

    let covered = Attribute::ALL
        .iter()
        .all(|a| totals.get(*a) >= required.get(*a));
    if !covered {
        suitability *= 0.3;
    }

    MissionFit {
        suitability,
        team,
        total_skills: totals,
    }
}

/// Risk band of taking a mission given the family's current heat
pub fn evaluate_mission_risk(player_heat: u32, mission_heat: u32) -> Risk {
    let total = player_heat + mission_heat;
    if total < 30 {
        Risk::Low
    } else if total < 60 {
        Risk::Medium
    } else {
        Risk::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MissionId, PlayerId};
    use crate::state::mission::{MissionInfo, MissionStatus};
    use crate::state::unit::{generate_unit, Rank};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mission_with_difficulty(difficulty: Skills) -> Mission {
        Mission {
            id: MissionId::new(),
            player: PlayerId(1),
            info: MissionInfo {
                name: "Test Job".into(),
                reward: 5_000,
                difficulty,
                duration_ticks: 12,
                heat: 10,
                repeatable: true,
            },
            unit_ids: Vec::new(),
            start_tick: None,
            end_tick: None,
            status: MissionStatus::Available,
            tip_expires: 48,
            results: None,
        }
    }

    fn unit_with_skills(rng: &mut ChaCha8Rng, skills: Skills) -> Unit {
        let mut unit = generate_unit(rng, Rank::Soldier, 1);
        unit.skills = skills;
        unit
    }

    #[test]
    fn test_perfect_double_coverage_scores_two() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mission = mission_with_difficulty(Skills {
            muscle: 5,
            brains: 5,
            cunning: 5,
            influence: 5,
        });
        let strong = unit_with_skills(
            &mut rng,
            Skills {
                muscle: 10,
                brains: 10,
                cunning: 10,
                influence: 10,
            },
        );
        let fit = mission_suitability(&mission, &[&strong]);
        assert!((fit.suitability - 2.0).abs() < f64::EPSILON);
        assert_eq!(fit.team, vec![strong.id]);
    }

    #[test]
    fn test_shortfall_is_heavily_penalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mission = mission_with_difficulty(Skills {
            muscle: 20,
            brains: 20,
            cunning: 20,
            influence: 20,
        });
        let weak = unit_with_skills(
            &mut rng,
            Skills {
                muscle: 10,
                brains: 10,
                cunning: 10,
                influence: 10,
            },
        );
        let fit = mission_suitability(&mission, &[&weak]);
        // Coverage 0.5 on every attribute, then the 0.3 penalty
        assert!((fit.suitability - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_team_stops_growing_once_covered() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mission = mission_with_difficulty(Skills {
            muscle: 5,
            brains: 5,
            cunning: 5,
            influence: 5,
        });
        let units: Vec<Unit> = (0..4)
            .map(|_| {
                unit_with_skills(
                    &mut rng,
                    Skills {
                        muscle: 10,
                        brains: 10,
                        cunning: 10,
                        influence: 10,
                    },
                )
            })
            .collect();
        let refs: Vec<&Unit> = units.iter().collect();
        let fit = mission_suitability(&mission, &refs);
        assert_eq!(fit.team.len(), 1);
    }

    #[test]
    fn test_busy_units_are_excluded() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mission = mission_with_difficulty(Skills::default());
        let mut unit = unit_with_skills(
            &mut rng,
            Skills {
                muscle: 10,
                brains: 10,
                cunning: 10,
                influence: 10,
            },
        );
        unit.status = UnitStatus::Mission;
        let fit = mission_suitability(&mission, &[&unit]);
        assert_eq!(fit.suitability, 0.0);
        assert!(fit.team.is_empty());
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(evaluate_mission_risk(0, 10), Risk::Low);
        assert_eq!(evaluate_mission_risk(20, 10), Risk::Medium);
        assert_eq!(evaluate_mission_risk(40, 25), Risk::High);
    }
}
