//! World generation: map grid, regions, associate pool and family setup
//!
//! Everything here draws from the store's seeded RNG, so two stores built
//! from the same config produce identical worlds.

use rand::Rng;

use crate::core::config::SimConfig;
use crate::core::types::{RegionId, TerritoryId};
use crate::players::PlayerConfig;
use crate::state::player::Player;
use crate::state::store::GameStore;
use crate::state::territory::{Borders, CaptureState, Region, Territory};
use crate::state::unit::{generate_unit, Rank};

/// Display colors for up to four families
pub const PLAYER_COLORS: [&str; 4] = ["#ff0000", "#0000ff", "#00ff00", "#ffff00"];

/// Themed names for the generated regions, assigned in generation order
const REGION_NAMES: [&str; 7] = [
    "Downtown Financial District",
    "Industrial Harbor",
    "Little Italy",
    "Entertainment District",
    "Uptown Heights",
    "Suburban Sprawl",
    "East End Slums",
];

/// Starting roster every family receives: rank and level pairs
pub const STARTING_COMPOSITION: [(Rank, u32); 3] =
    [(Rank::Capo, 3), (Rank::Soldier, 2), (Rank::Soldier, 1)];

/// Map corners handed out as starting territories, in slot order
fn starting_positions(config: &SimConfig) -> [TerritoryId; 4] {
    let w = config.map_width - 1;
    let h = config.map_height - 1;
    [
        TerritoryId { x: 0, y: 0 },
        TerritoryId { x: w, y: 0 },
        TerritoryId { x: 0, y: h },
        TerritoryId { x: w, y: h },
    ]
}

/// Populate an empty store with the full starting world
///
/// Builds the territory grid, grows regions over it, seeds the neutral
/// associate pool and places one family per active player config.
pub fn generate_world(store: &mut GameStore, active_players: &[PlayerConfig]) {
    let config = store.config.clone();

    let region_grid = generate_region_grid(store, &config);
    create_territories(store, &config);
    create_regions(store, &config, &region_grid);
    mark_region_borders(store, &config);

    for _ in 0..config.starting_associates {
        let associate = generate_unit(&mut store.rng, Rank::Associate, 1);
        store.insert_unit(associate);
    }

    let corners = starting_positions(&config);
    for (index, player_config) in active_players.iter().enumerate() {
        if index >= corners.len() {
            tracing::warn!(player = %player_config.id, "no starting corner left, skipping");
            continue;
        }
        place_player(store, &config, player_config, corners[index], index);
    }
    tracing::info!(
        players = active_players.len(),
        territories = (config.map_width as usize) * (config.map_height as usize),
        regions = config.region_count,
        "world generated"
    );
}

fn create_territories(store: &mut GameStore, config: &SimConfig) {
    for x in 0..config.map_width {
        for y in 0..config.map_height {
            let id = TerritoryId { x, y };
            let income = 1_000 + store.rng.gen_range(-5i64..=4) * 100;
            store.insert_territory(Territory {
                id,
                name: format!("Territory {id}"),
                owner: None,
                region: RegionId(0),
                income,
                capture: CaptureState::default(),
                manager: None,
                borders: Borders::default(),
            });
        }
    }
}

/// Grow `region_count` regions over the grid from random seeds
///
/// Returns the region index per cell, indexed `[y][x]`. A frontier cell is
/// picked at random with `border_randomness` percent probability, otherwise
/// the oldest frontier entry is taken, which keeps the shape compact.
fn generate_region_grid(store: &mut GameStore, config: &SimConfig) -> Vec<Vec<usize>> {
    let width = config.map_width as usize;
    let height = config.map_height as usize;
    let regions = config.region_count as usize;
    const UNASSIGNED: usize = usize::MAX;

    let mut grid = vec![vec![UNASSIGNED; width]; height];

    // Seed placement, unique cells
    let mut seeds: Vec<(usize, usize)> = Vec::with_capacity(regions);
    while seeds.len() < regions {
        let x = store.rng.gen_range(0..width);
        let y = store.rng.gen_range(0..height);
        if !seeds.contains(&(x, y)) {
            grid[y][x] = seeds.len();
            seeds.push((x, y));
        }
    }

    let valid_neighbors = |grid: &Vec<Vec<usize>>, x: usize, y: usize| -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        if x > 0 && grid[y][x - 1] == UNASSIGNED {
            out.push((x - 1, y));
        }
        if x + 1 < width && grid[y][x + 1] == UNASSIGNED {
            out.push((x + 1, y));
        }
        if y > 0 && grid[y - 1][x] == UNASSIGNED {
            out.push((x, y - 1));
        }
        if y + 1 < height && grid[y + 1][x] == UNASSIGNED {
            out.push((x, y + 1));
        }
        out
    };

    let mut frontiers: Vec<Vec<(usize, usize)>> = vec![Vec::new(); regions];
    for (region, &(x, y)) in seeds.iter().enumerate() {
        for n in valid_neighbors(&grid, x, y) {
            if !frontiers[region].contains(&n) {
                frontiers[region].push(n);
            }
        }
    }

    let mut unassigned = width * height - regions;
    while unassigned > 0 {
        let region = store.rng.gen_range(0..regions);
        if frontiers[region].is_empty() {
            continue;
        }

        let index = if store.rng.gen_range(0..100) < config.border_randomness {
            store.rng.gen_range(0..frontiers[region].len())
        } else {
            0
        };
        let (x, y) = frontiers[region].remove(index);

        if grid[y][x] == UNASSIGNED {
            grid[y][x] = region;
            unassigned -= 1;
            for n in valid_neighbors(&grid, x, y) {
                if !frontiers[region].contains(&n) {
                    frontiers[region].push(n);
                }
            }
        }
    }

    grid
}

fn create_regions(store: &mut GameStore, config: &SimConfig, grid: &[Vec<usize>]) {
    for region_index in 0..config.region_count as usize {
        let mut territory_ids = Vec::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == region_index {
                    let tid = TerritoryId {
                        x: x as u8,
                        y: y as u8,
                    };
                    territory_ids.push(tid);
                    store.update_territory(tid, |t| t.region = RegionId(region_index as u8));
                }
            }
        }

        let hue = region_index * 360 / config.region_count as usize;
        let name = REGION_NAMES
            .get(region_index)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("Region {}", region_index + 1));
        let income_bonus = store.rng.gen_range(50..=100);
        store.insert_region(Region {
            id: RegionId(region_index as u8),
            name,
            territory_ids,
            color: format!("hsl({hue}, 70%, 60%)"),
            income_bonus,
            kind: region_index as u8,
        });
    }
}

/// Flag territory edges that face a different region (or the map edge)
fn mark_region_borders(store: &mut GameStore, config: &SimConfig) {
    let ids: Vec<TerritoryId> = store.territories().map(|t| t.id).collect();
    for id in ids {
        let region = match store.territory(id) {
            Some(t) => t.region,
            None => continue,
        };
        let same_region = |x: i16, y: i16| -> bool {
            if x < 0 || y < 0 || x >= config.map_width as i16 || y >= config.map_height as i16 {
                return false;
            }
            store
                .territory(TerritoryId {
                    x: x as u8,
                    y: y as u8,
                })
                .map(|t| t.region == region)
                .unwrap_or(false)
        };
        let (x, y) = (id.x as i16, id.y as i16);
        let borders = Borders {
            top: !same_region(x, y - 1),
            right: !same_region(x + 1, y),
            bottom: !same_region(x, y + 1),
            left: !same_region(x - 1, y),
        };
        store.update_territory(id, |t| t.borders = borders);
    }
}

fn place_player(
    store: &mut GameStore,
    config: &SimConfig,
    player_config: &PlayerConfig,
    corner: TerritoryId,
    index: usize,
) {
    let color = PLAYER_COLORS.get(index).copied().unwrap_or("#888888");
    let mut player = Player::new(
        player_config.id,
        player_config.name.clone(),
        color,
        config.starting_money,
    );

    store.update_territory(corner, |t| t.owner = Some(player_config.id));
    player.territories.push(corner);

    for (rank, level) in STARTING_COMPOSITION {
        let mut unit = generate_unit(&mut store.rng, rank, level);
        unit.owner = Some(player_config.id);
        player.units.push(unit.id);
        store.insert_unit(unit);
    }

    store.insert_player(player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;
    use crate::players::ControllerType;
    use crate::state::unit::UnitStatus;

    fn two_player_configs() -> Vec<PlayerConfig> {
        vec![
            PlayerConfig {
                id: PlayerId(1),
                name: "Human".into(),
                controller: ControllerType::Human,
            },
            PlayerConfig {
                id: PlayerId(2),
                name: "Rival".into(),
                controller: ControllerType::Ai,
            },
        ]
    }

    #[test]
    fn test_world_has_full_grid_and_regions() {
        let mut store = GameStore::new(SimConfig::with_seed(11));
        generate_world(&mut store, &two_player_configs());

        assert_eq!(store.territories().count(), 100);
        assert_eq!(store.regions().count(), 7);

        // Every territory belongs to exactly one region's id list
        let listed: usize = store.regions().map(|r| r.territory_ids.len()).sum();
        assert_eq!(listed, 100);
    }

    #[test]
    fn test_players_start_in_opposite_corners() {
        let mut store = GameStore::new(SimConfig::with_seed(11));
        generate_world(&mut store, &two_player_configs());

        let p1 = store.player(PlayerId(1)).unwrap();
        let p2 = store.player(PlayerId(2)).unwrap();
        assert_eq!(p1.territories, vec![TerritoryId { x: 0, y: 0 }]);
        assert_eq!(p2.territories, vec![TerritoryId { x: 9, y: 0 }]);
        assert_eq!(p1.resources.money, 10_500);

        let t = store.territory(TerritoryId { x: 0, y: 0 }).unwrap();
        assert_eq!(t.owner, Some(PlayerId(1)));
    }

    #[test]
    fn test_starting_roster_and_associate_pool() {
        let mut store = GameStore::new(SimConfig::with_seed(5));
        generate_world(&mut store, &two_player_configs());

        let roster = store.player_units(PlayerId(1));
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.iter().filter(|u| u.rank == Rank::Capo).count(), 1);
        assert_eq!(roster.iter().filter(|u| u.rank == Rank::Soldier).count(), 2);
        assert!(roster.iter().all(|u| u.status == UnitStatus::Idle));

        assert_eq!(store.associates().len(), 15);
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = GameStore::new(SimConfig::with_seed(99));
        let mut b = GameStore::new(SimConfig::with_seed(99));
        generate_world(&mut a, &two_player_configs());
        generate_world(&mut b, &two_player_configs());

        for t in a.territories() {
            let other = b.territory(t.id).unwrap();
            assert_eq!(t.income, other.income);
            assert_eq!(t.region, other.region);
        }
    }
}
