//! Game orchestrator: owns the store, queue, scheduler and AI engine and
//! drives them in the fixed per-tick order
//!
//! One tick: advance the clock, check the campaign end date, run the AI
//! pass (queues only), drain the action queue, run due scheduled jobs.
//! Single-threaded by construction; every mutation funnels through the
//! store inside this sequence.

use crate::actions::{ActionQueue, Command};
use crate::ai::AiEngine;
use crate::core::calendar::{GameDate, CAMPAIGN_END};
use crate::core::config::SimConfig;
use crate::core::error::Result;
use crate::core::types::{ActionId, MissionId, PlayerId, RegionId, TerritoryId, Tick, UnitId};
use crate::map;
use crate::missions::success_chance;
use crate::players::{ControllerType, PlayerConfig, SlotRegistry};
use crate::schedule::{setup_initial_jobs, Scheduler};
use crate::state::mission::{Mission, MissionStatus};
use crate::state::store::GameStore;
use crate::state::territory::Territory;
use crate::state::unit::Unit;
use crate::state::worldgen::generate_world;

/// Number of seats at the table
pub const PLAYER_SLOTS: usize = 4;

pub struct Game {
    store: GameStore,
    queue: ActionQueue,
    scheduler: Scheduler,
    ai: AiEngine,
    slots: SlotRegistry,
    running: bool,
    ended: bool,
}

impl Game {
    /// Build a game and place one family per active player config
    pub fn new(config: SimConfig, players: &[PlayerConfig]) -> Result<Self> {
        config.validate()?;
        // Separate stream so AI choices don't perturb world rolls
        let ai_seed = config.seed.wrapping_add(1);
        let mut game = Self {
            store: GameStore::new(config),
            queue: ActionQueue::new(),
            scheduler: Scheduler::new(),
            ai: AiEngine::new(ai_seed),
            slots: SlotRegistry::new(),
            running: false,
            ended: false,
        };
        game.initialize_with_players(players);
        Ok(game)
    }

    fn initialize_with_players(&mut self, players: &[PlayerConfig]) {
        self.slots.initialize(PLAYER_SLOTS);
        for config in players {
            self.slots.assign(config.id, config.controller);
        }
        if let Some(first) = players.first() {
            self.slots.set_viewing_player(first.id);
        }

        let active: Vec<PlayerConfig> = players
            .iter()
            .filter(|p| p.controller != ControllerType::Empty)
            .cloned()
            .collect();
        generate_world(&mut self.store, &active);
        setup_initial_jobs(&mut self.scheduler, &self.store);
        tracing::info!(players = active.len(), "game initialized");
    }

    // === Lifecycle ===

    pub fn start(&mut self) {
        if self.ended {
            tracing::warn!("cannot start, the campaign is over");
            return;
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Advance the world by one tick
    ///
    /// A no-op unless the loop is running. The tick that crosses the
    /// campaign end date still completes in full before the loop stops.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.store.tick_count += 1;
        let tick = self.store.tick_count;

        if GameDate::from_tick(tick) >= CAMPAIGN_END {
            tracing::info!(tick, "campaign end date reached");
            self.ended = true;
            self.running = false;
        }

        self.ai
            .tick(&self.store, &mut self.queue, &self.slots.ai_players(), tick);
        self.queue.process(&mut self.store, &mut self.scheduler);
        self.scheduler.run_due(&mut self.store, tick);
    }

    // === Command surface (builds and enqueues actions) ===

    pub fn hire_unit(&mut self, player: PlayerId, unit: UnitId) -> ActionId {
        self.queue
            .queue(&self.store, player, Command::HireUnit { unit })
    }

    pub fn promote_unit(&mut self, player: PlayerId, unit: UnitId) -> ActionId {
        self.queue
            .queue(&self.store, player, Command::PromoteUnit { unit })
    }

    pub fn assign_to_crew(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        captain: UnitId,
        slot: usize,
    ) -> ActionId {
        self.queue.queue(
            &self.store,
            player,
            Command::AssignToCrew {
                unit,
                captain,
                slot,
            },
        )
    }

    pub fn start_capture(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        territory: TerritoryId,
    ) -> ActionId {
        self.queue
            .queue(&self.store, player, Command::StartCapture { unit, territory })
    }

    pub fn assign_to_territory(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        territory: TerritoryId,
    ) -> ActionId {
        self.queue.queue(
            &self.store,
            player,
            Command::AssignToTerritory { unit, territory },
        )
    }

    pub fn remove_from_territory(
        &mut self,
        player: PlayerId,
        unit: UnitId,
        territory: TerritoryId,
    ) -> ActionId {
        self.queue.queue(
            &self.store,
            player,
            Command::RemoveFromTerritory { unit, territory },
        )
    }

    pub fn launch_mission(
        &mut self,
        player: PlayerId,
        mission: MissionId,
        unit_ids: Vec<UnitId>,
    ) -> ActionId {
        self.queue.queue(
            &self.store,
            player,
            Command::LaunchMission { mission, unit_ids },
        )
    }

    // === Query surface ===

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn tick_count(&self) -> Tick {
        self.store.tick_count
    }

    pub fn current_date(&self) -> GameDate {
        GameDate::from_tick(self.store.tick_count)
    }

    pub fn formatted_date(&self) -> String {
        self.current_date().to_string()
    }

    pub fn viewing_player(&self) -> Option<PlayerId> {
        self.slots.viewing_player()
    }

    pub fn is_ai(&self, player: PlayerId) -> bool {
        self.slots.is_ai(player)
    }

    pub fn is_human(&self, player: PlayerId) -> bool {
        self.slots.is_human(player)
    }

    pub fn territories(&self) -> Vec<&Territory> {
        self.store.territories().collect()
    }

    pub fn owned_territories(&self, player: PlayerId) -> Vec<&Territory> {
        self.store
            .territories()
            .filter(|t| t.owner == Some(player))
            .collect()
    }

    pub fn neutral_territories(&self) -> Vec<&Territory> {
        map::neutral_territories(&self.store)
    }

    pub fn capturable_territories(&self, player: PlayerId) -> Vec<&Territory> {
        map::capturable_territories(&self.store, player)
    }

    pub fn units_of(&self, player: PlayerId) -> Vec<&Unit> {
        self.store.player_units(player)
    }

    pub fn associate_pool(&self) -> Vec<&Unit> {
        self.store.associates()
    }

    pub fn available_missions(&self, player: PlayerId) -> Vec<&Mission> {
        self.store
            .player_missions(player)
            .into_iter()
            .filter(|m| m.status == MissionStatus::Available)
            .collect()
    }

    pub fn active_missions(&self, player: PlayerId) -> Vec<&Mission> {
        self.store
            .player_missions(player)
            .into_iter()
            .filter(|m| m.status == MissionStatus::Active)
            .collect()
    }

    pub fn finished_missions(&self, player: PlayerId) -> Vec<&Mission> {
        self.store
            .player_missions(player)
            .into_iter()
            .filter(|m| {
                matches!(m.status, MissionStatus::Succeeded | MissionStatus::Failed)
            })
            .collect()
    }

    /// Success chance (percent) a team would have on a mission right now
    pub fn mission_chance(&self, mission: MissionId, unit_ids: &[UnitId]) -> Option<f64> {
        let mission = self.store.mission(mission)?;
        let team = crate::missions::team_stats(&self.store, unit_ids);
        Some(success_chance(&mission.info.difficulty, &team))
    }

    pub fn is_family_full(&self, player: PlayerId) -> bool {
        self.store.is_family_full(player)
    }

    pub fn family_heat(&self, player: PlayerId) -> u32 {
        self.store.family_heat(player)
    }

    pub fn region_share(&self, player: PlayerId, region: RegionId) -> f64 {
        self.store.region_share(player, region)
    }
}

/// Compact dollar display: `$768`, `$1.5k`, `$234.7k`, `$1.6m`
pub fn format_usd(value: i64) -> String {
    let abs = value.abs();
    if abs < 1_000 {
        return format!("${abs}");
    }
    let (scaled, suffix) = if abs < 1_000_000 {
        (abs as f64 / 1_000.0, "k")
    } else {
        (abs as f64 / 1_000_000.0, "m")
    };
    let formatted = format!("{scaled:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("${trimmed}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(768), "$768");
        assert_eq!(format_usd(1_500), "$1.5k");
        assert_eq!(format_usd(234_700), "$234.7k");
        assert_eq!(format_usd(10_000), "$10k");
        assert_eq!(format_usd(1_600_000), "$1.6m");
        assert_eq!(format_usd(-768), "$768");
    }
}
