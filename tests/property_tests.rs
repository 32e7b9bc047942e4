//! Property-based checks over the pure scoring and formatting helpers

use mob_sim::game::format_usd;
use mob_sim::map::capture_progress_per_cycle;
use mob_sim::missions::success_chance;
use mob_sim::state::unit::Skills;
use proptest::prelude::*;

fn skills_strategy() -> impl Strategy<Value = Skills> {
    (0..200u32, 0..200u32, 0..200u32, 0..200u32).prop_map(|(muscle, brains, cunning, influence)| {
        Skills {
            muscle,
            brains,
            cunning,
            influence,
        }
    })
}

proptest! {
    #[test]
    fn success_chance_stays_in_percent_range(
        req in skills_strategy(),
        team in skills_strategy(),
    ) {
        let chance = success_chance(&req, &team);
        prop_assert!((0.0..=100.0).contains(&chance));
    }

    #[test]
    fn stronger_team_never_lowers_the_chance(
        req in skills_strategy(),
        team in skills_strategy(),
        boost in 0..50u32,
    ) {
        let better = Skills {
            muscle: team.muscle + boost,
            brains: team.brains + boost,
            cunning: team.cunning + boost,
            influence: team.influence + boost,
        };
        prop_assert!(success_chance(&req, &better) >= success_chance(&req, &team));
    }

    #[test]
    fn capture_progress_never_stalls(muscle in 0..100u32, neighbors in 0..10usize) {
        prop_assert!(capture_progress_per_cycle(muscle, neighbors) >= 1.0);
    }

    #[test]
    fn more_neighbors_never_slow_a_capture(muscle in 0..100u32, neighbors in 1..9usize) {
        prop_assert!(
            capture_progress_per_cycle(muscle, neighbors + 1)
                >= capture_progress_per_cycle(muscle, neighbors)
        );
    }

    #[test]
    fn formatted_money_is_well_formed(value in -10_000_000i64..10_000_000i64) {
        let formatted = format_usd(value);
        prop_assert!(formatted.starts_with('$'));
        // The trailing ".0" is always stripped from scaled amounts
        prop_assert!(!formatted.contains(".0k"));
        prop_assert!(!formatted.contains(".0m"));
    }
}
