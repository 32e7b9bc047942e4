//! Map queries: adjacency, capturability and capture speed

use crate::core::types::{PlayerId, TerritoryId};
use crate::state::store::GameStore;
use crate::state::territory::Territory;

/// True when the territory touches at least one territory the player owns
pub fn is_adjacent_to_player(store: &GameStore, territory: TerritoryId, player: PlayerId) -> bool {
    territory
        .neighbors(store.config.map_width, store.config.map_height)
        .into_iter()
        .any(|n| store.territory(n).map(|t| t.owner) == Some(Some(player)))
}

/// How many neighbors of the territory the player already owns
pub fn owned_neighbor_count(store: &GameStore, territory: TerritoryId, player: PlayerId) -> usize {
    territory
        .neighbors(store.config.map_width, store.config.map_height)
        .into_iter()
        .filter(|n| store.territory(*n).map(|t| t.owner) == Some(Some(player)))
        .count()
}

/// Capture progress gained per capture cycle
///
/// Muscle above the baseline of 5 speeds the grab up; each owned neighbor
/// past the first adds a 25% bonus (surrounding a block squeezes it).
pub fn capture_progress_per_cycle(muscle: u32, owned_neighbors: usize) -> f64 {
    let base = 10.0 + (muscle as f64 - 5.0);
    let surround = 1.0 + 0.25 * (owned_neighbors.saturating_sub(1)) as f64;
    (base * surround).max(1.0)
}

/// Territories a player could start capturing right now
///
/// Unowned by the player, adjacent to their holdings, and not already
/// contested by anyone.
pub fn capturable_territories<'a>(store: &'a GameStore, player: PlayerId) -> Vec<&'a Territory> {
    store
        .territories()
        .filter(|t| t.owner != Some(player))
        .filter(|t| !t.capture.in_progress)
        .filter(|t| is_adjacent_to_player(store, t.id, player))
        .collect()
}

/// Territories with no owner at all
pub fn neutral_territories(store: &GameStore) -> Vec<&Territory> {
    store.territories().filter(|t| t.owner.is_none()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;
    use crate::players::{ControllerType, PlayerConfig};
    use crate::state::worldgen::generate_world;

    fn seeded_store() -> GameStore {
        let mut store = GameStore::new(SimConfig::with_seed(21));
        generate_world(
            &mut store,
            &[PlayerConfig {
                id: PlayerId(1),
                name: "Family".into(),
                controller: ControllerType::Human,
            }],
        );
        store
    }

    #[test]
    fn test_adjacency_from_starting_corner() {
        let store = seeded_store();
        let player = PlayerId(1);
        // Corner at 0-0; its two neighbors qualify, a far cell does not
        assert!(is_adjacent_to_player(&store, TerritoryId { x: 1, y: 0 }, player));
        assert!(is_adjacent_to_player(&store, TerritoryId { x: 0, y: 1 }, player));
        assert!(!is_adjacent_to_player(&store, TerritoryId { x: 5, y: 5 }, player));
    }

    #[test]
    fn test_capturable_excludes_contested_and_own() {
        let mut store = seeded_store();
        let player = PlayerId(1);
        let capturable = capturable_territories(&store, player);
        assert_eq!(capturable.len(), 2);

        store.update_territory(TerritoryId { x: 1, y: 0 }, |t| t.capture.in_progress = true);
        assert_eq!(capturable_territories(&store, player).len(), 1);
    }

    #[test]
    fn test_capture_progress_scaling() {
        // Baseline muscle, single neighbor: the base rate
        assert!((capture_progress_per_cycle(5, 1) - 10.0).abs() < f64::EPSILON);
        // Strong unit
        assert!((capture_progress_per_cycle(10, 1) - 15.0).abs() < f64::EPSILON);
        // Surrounded on three sides
        assert!((capture_progress_per_cycle(5, 3) - 15.0).abs() < f64::EPSILON);
        // Weak unit never stalls completely
        assert!(capture_progress_per_cycle(0, 1) >= 1.0);
    }
}
