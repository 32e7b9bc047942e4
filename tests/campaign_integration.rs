//! Full-campaign integration tests driven through the Game orchestrator

use mob_sim::core::calendar::{CAMPAIGN_END, CAMPAIGN_START};
use mob_sim::core::types::{PlayerId, TerritoryId};
use mob_sim::state::mission::MissionStatus;
use mob_sim::state::unit::{Rank, UnitStatus};
use mob_sim::{ControllerType, Game, PlayerConfig, SimConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn standard_players() -> Vec<PlayerConfig> {
    vec![
        PlayerConfig {
            id: PlayerId(1),
            name: "Corleone".into(),
            controller: ControllerType::Human,
        },
        PlayerConfig {
            id: PlayerId(2),
            name: "Soprano".into(),
            controller: ControllerType::Ai,
        },
        PlayerConfig {
            id: PlayerId(3),
            name: "Moltisanti".into(),
            controller: ControllerType::Ai,
        },
        PlayerConfig {
            id: PlayerId(4),
            name: "Open Seat".into(),
            controller: ControllerType::Empty,
        },
    ]
}

fn new_game(seed: u64) -> Game {
    init_tracing();
    Game::new(SimConfig::with_seed(seed), &standard_players()).unwrap()
}

#[test]
fn test_world_setup_places_families_in_corners() {
    let game = new_game(11);
    let store = game.store();

    assert_eq!(store.territories().count(), 100);
    assert_eq!(store.regions().count(), 7);

    // Active players occupy distinct corners, in slot order
    assert_eq!(
        store.territory(TerritoryId::new(0, 0)).unwrap().owner,
        Some(PlayerId(1))
    );
    assert_eq!(
        store.territory(TerritoryId::new(9, 0)).unwrap().owner,
        Some(PlayerId(2))
    );
    assert_eq!(
        store.territory(TerritoryId::new(0, 9)).unwrap().owner,
        Some(PlayerId(3))
    );

    // The empty seat gets no family
    assert!(store.player(PlayerId(4)).is_none());
    assert_eq!(store.player_ids(), vec![PlayerId(1), PlayerId(2), PlayerId(3)]);

    for id in store.player_ids() {
        let player = store.player(id).unwrap();
        assert_eq!(player.resources.money, 10_500);
        assert_eq!(player.units.len(), 3);
        let roster = store.player_units(id);
        assert_eq!(roster.iter().filter(|u| u.rank == Rank::Capo).count(), 1);
        assert_eq!(roster.iter().filter(|u| u.rank == Rank::Soldier).count(), 2);
    }

    assert_eq!(game.associate_pool().len(), 15);
    assert_eq!(game.viewing_player(), Some(PlayerId(1)));
    assert!(game.is_human(PlayerId(1)));
    assert!(game.is_ai(PlayerId(2)));
    assert!(!game.is_ai(PlayerId(4)));
}

#[test]
fn test_tick_is_a_noop_until_started() {
    let mut game = new_game(3);
    assert!(!game.is_running());
    game.tick();
    assert_eq!(game.tick_count(), 0);
    assert_eq!(game.current_date(), CAMPAIGN_START);

    game.start();
    assert!(game.is_running());
    game.tick();
    assert_eq!(game.tick_count(), 1);
    assert_eq!(game.formatted_date(), "1960-01-01 02:00");

    game.toggle();
    assert!(!game.is_running());
    game.tick();
    assert_eq!(game.tick_count(), 1);
}

#[test]
fn test_first_income_cycle_pays_territory_minus_salaries() {
    let mut game = new_game(21);
    let player = PlayerId(1);
    let territory_income = game
        .store()
        .territory(TerritoryId::new(0, 0))
        .unwrap()
        .income;
    // One capo and two soldiers on the payroll, no manager installed
    let payroll = 2_000 + 500 + 500;

    game.start();
    for _ in 0..12 {
        game.tick();
    }

    let resources = &game.store().player(player).unwrap().resources;
    assert_eq!(resources.last_income, territory_income - payroll);
    assert_eq!(resources.money, 10_500 + territory_income - payroll);
}

#[test]
fn test_smoke_run_preserves_cross_entity_consistency() {
    let mut game = new_game(1234);
    game.start();
    for _ in 0..60 {
        game.tick();
    }
    assert_eq!(game.tick_count(), 60);
    assert!(!game.has_ended());

    let store = game.store();
    for player in store.players() {
        // Roster ids resolve and point back at their owner
        for uid in &player.units {
            let unit = store.unit(*uid).expect("roster id must resolve");
            assert_eq!(unit.owner, Some(player.id));
        }
        // Held territories point back at their owner
        for tid in &player.territories {
            let territory = store.territory(*tid).expect("territory id must resolve");
            assert_eq!(territory.owner, Some(player.id));
        }
    }
    for unit in store.units() {
        if let Some(owner) = unit.owner {
            assert!(store.player(owner).unwrap().units.contains(&unit.id));
        }
    }
    for territory in store.territories() {
        if let Some(owner) = territory.owner {
            assert!(store.player(owner).unwrap().territories.contains(&territory.id));
        }
    }
    // Units committed to an active mission are marked away
    for mission in store.missions() {
        if mission.status == MissionStatus::Active {
            for uid in &mission.unit_ids {
                assert_eq!(store.unit(*uid).unwrap().status, UnitStatus::Mission);
            }
        }
    }
}

#[test]
fn test_campaign_freezes_at_end_date() {
    let mut game = new_game(5);
    game.start();
    let mut guard = 0;
    while game.is_running() {
        game.tick();
        guard += 1;
        assert!(guard < 500, "campaign never ended");
    }

    assert!(game.has_ended());
    // 31 days of January at 12 ticks per day
    assert_eq!(game.tick_count(), 372);
    assert!(game.current_date() >= CAMPAIGN_END);

    // The frozen campaign cannot be restarted or advanced
    game.start();
    assert!(!game.is_running());
    game.tick();
    assert_eq!(game.tick_count(), 372);
}
