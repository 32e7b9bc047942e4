//! End-to-end flows through the action queue and scheduler: territory
//! capture from order to ownership, and mission launch to resolution

use mob_sim::actions::{ActionQueue, ActionStatus, Command};
use mob_sim::core::types::{MissionId, PlayerId, TerritoryId};
use mob_sim::schedule::{setup_initial_jobs, ScheduledJob, Scheduler};
use mob_sim::state::mission::{Mission, MissionInfo, MissionStatus};
use mob_sim::state::store::GameStore;
use mob_sim::state::unit::{Rank, Skills, UnitStatus};
use mob_sim::state::worldgen::generate_world;
use mob_sim::{ControllerType, PlayerConfig, SimConfig};

fn seeded_world(seed: u64) -> GameStore {
    let mut store = GameStore::new(SimConfig::with_seed(seed));
    generate_world(
        &mut store,
        &[
            PlayerConfig {
                id: PlayerId(1),
                name: "Family".into(),
                controller: ControllerType::Human,
            },
            PlayerConfig {
                id: PlayerId(2),
                name: "Rival".into(),
                controller: ControllerType::Ai,
            },
        ],
    );
    store
}

fn soldier_of(store: &GameStore, player: PlayerId) -> mob_sim::core::types::UnitId {
    store
        .player_units(player)
        .iter()
        .find(|u| u.rank == Rank::Soldier)
        .unwrap()
        .id
}

#[test]
fn test_capture_lifecycle_from_order_to_ownership() {
    let mut store = seeded_world(7);
    let mut scheduler = Scheduler::new();
    let mut queue = ActionQueue::new();
    let player = PlayerId(1);
    // Neutral cell next to the starting corner
    let target = TerritoryId::new(1, 0);
    let unit = soldier_of(&store, player);

    queue.queue(&store, player, Command::StartCapture { unit, territory: target });
    queue.process(&mut store, &mut scheduler);
    assert_eq!(queue.history().last().unwrap().status, ActionStatus::Completed);

    let t = store.territory(target).unwrap();
    assert!(t.capture.in_progress);
    assert_eq!(t.capture.initiator, Some(player));
    assert_eq!(t.capture.capturing_unit, Some(unit));
    assert_eq!(store.unit(unit).unwrap().status, UnitStatus::Expand);

    // One owned neighbor and muscle of at least 1 means at least 6
    // progress per cycle; 30 cycles is more than enough
    scheduler.add(ScheduledJob::CaptureProgress, 1, 1, true);
    for tick in 1..=30 {
        scheduler.run_due(&mut store, tick);
    }

    let t = store.territory(target).unwrap();
    assert_eq!(t.owner, Some(player));
    assert_eq!(t.manager, Some(unit));
    assert!(!t.capture.in_progress);
    assert_eq!(t.capture.progress, 0.0);
    let captor = store.unit(unit).unwrap();
    assert_eq!(captor.status, UnitStatus::Territory);
    assert_eq!(captor.experience, 25);
    assert!(store.player(player).unwrap().territories.contains(&target));
}

#[test]
fn test_capture_of_non_adjacent_territory_is_rejected() {
    let store = seeded_world(7);
    let mut queue = ActionQueue::new();
    let player = PlayerId(1);
    let unit = soldier_of(&store, player);

    queue.queue(
        &store,
        player,
        Command::StartCapture {
            unit,
            territory: TerritoryId::new(5, 5),
        },
    );
    assert!(queue.pending().is_empty());
    assert_eq!(queue.history()[0].status, ActionStatus::Failed);
}

#[test]
fn test_mission_launch_to_resolution_pays_net_of_cuts() {
    let mut store = seeded_world(19);
    let mut scheduler = Scheduler::new();
    let mut queue = ActionQueue::new();
    let player = PlayerId(1);

    let roster = store.player_units(player);
    let (a, b) = (
        roster.iter().find(|u| u.rank == Rank::Soldier).unwrap().id,
        roster.iter().find(|u| u.rank == Rank::Capo).unwrap().id,
    );
    // Pin the cuts so the payout is exact: 1000 * (1 - 0.25) = 750
    store.update_unit(a, |u| u.cut = 10);
    store.update_unit(b, |u| u.cut = 15);

    let mission = Mission {
        id: MissionId::new(),
        player,
        info: MissionInfo {
            name: "Jewelry Heist".into(),
            reward: 1_000,
            // No requirements: the success roll cannot miss
            difficulty: Skills::default(),
            duration_ticks: 12,
            heat: 10,
            repeatable: false,
        },
        unit_ids: Vec::new(),
        start_tick: None,
        end_tick: None,
        status: MissionStatus::Available,
        tip_expires: 100,
        results: None,
    };
    let mission_id = mission.id;
    store.insert_mission(mission);

    queue.queue(
        &store,
        player,
        Command::LaunchMission {
            mission: mission_id,
            unit_ids: vec![a, b],
        },
    );
    queue.process(&mut store, &mut scheduler);
    assert_eq!(queue.history().last().unwrap().status, ActionStatus::Completed);

    let launched = store.mission(mission_id).unwrap();
    assert_eq!(launched.status, MissionStatus::Active);
    assert_eq!(launched.start_tick, Some(0));
    assert_eq!(launched.end_tick, Some(12));
    assert_eq!(store.unit(a).unwrap().status, UnitStatus::Mission);
    assert_eq!(store.unit(b).unwrap().status, UnitStatus::Mission);
    assert_eq!(
        scheduler.due_ticks(|j| matches!(j, ScheduledJob::MissionResolution { .. })),
        vec![12]
    );

    let money_before = store.player(player).unwrap().resources.money;
    scheduler.run_due(&mut store, 12);
    assert!(scheduler.is_empty());

    let resolved = store.mission(mission_id).unwrap();
    assert_eq!(resolved.status, MissionStatus::Succeeded);
    assert_eq!(resolved.results.unwrap().money, 750);
    assert_eq!(
        store.player(player).unwrap().resources.money,
        money_before + 750
    );
    for uid in [a, b] {
        let unit = store.unit(uid).unwrap();
        // Back from the job, possibly via a jail cell
        assert!(matches!(unit.status, UnitStatus::Idle | UnitStatus::Prison));
        assert_eq!(unit.loyalty, 60);
        assert_eq!(unit.experience, 20);
        assert_eq!(unit.heat, 60);
    }
}

#[test]
fn test_units_on_a_mission_cannot_be_double_booked() {
    let mut store = seeded_world(19);
    let mut scheduler = Scheduler::new();
    let mut queue = ActionQueue::new();
    let player = PlayerId(1);
    let unit = soldier_of(&store, player);

    for _ in 0..2 {
        let mission = Mission {
            id: MissionId::new(),
            player,
            info: MissionInfo {
                name: "Shakedown".into(),
                reward: 1_000,
                difficulty: Skills::default(),
                duration_ticks: 12,
                heat: 5,
                repeatable: true,
            },
            unit_ids: Vec::new(),
            start_tick: None,
            end_tick: None,
            status: MissionStatus::Available,
            tip_expires: 100,
            results: None,
        };
        let id = mission.id;
        store.insert_mission(mission);
        queue.queue(
            &store,
            player,
            Command::LaunchMission {
                mission: id,
                unit_ids: vec![unit],
            },
        );
    }
    queue.process(&mut store, &mut scheduler);

    // The second launch found the unit already away
    let statuses: Vec<_> = queue.history().iter().map(|a| a.status).collect();
    assert_eq!(statuses, vec![ActionStatus::Completed, ActionStatus::Failed]);
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn test_tip_board_turns_over_as_the_clock_runs() {
    let mut store = seeded_world(3);
    let mut scheduler = Scheduler::new();
    setup_initial_jobs(&mut scheduler, &store);

    // tip_rate 24, tip_lifespan 48: first tips at 24, expiring at 72
    for tick in 1..=24 {
        store.tick_count = tick;
        scheduler.run_due(&mut store, tick);
    }
    let first: Vec<MissionId> = store.missions().map(|m| m.id).collect();
    assert_eq!(first.len(), 2);
    assert!(store
        .missions()
        .all(|m| m.status == MissionStatus::Available && m.tip_expires == 72));

    for tick in 25..=72 {
        store.tick_count = tick;
        scheduler.run_due(&mut store, tick);
    }

    // The first wave was withdrawn; the 48- and 72-tick waves remain
    for id in &first {
        assert!(store.mission(*id).is_none());
    }
    assert_eq!(store.missions().count(), 4);
    assert!(store
        .missions()
        .all(|m| m.status == MissionStatus::Available && m.tip_expires > 72));
}
