//! GameStore - the authoritative owner of all entity collections
//!
//! Every mutation of players, units, territories or missions funnels
//! through the store's update methods, which is where cross-entity
//! consequences (level-ups, defection) are enforced so no caller can
//! leave the model inconsistent. Updates against unknown ids are logged
//! and ignored rather than returned as errors; batch operations degrade
//! gracefully instead of aborting.

use ahash::AHashMap;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimConfig;
use crate::core::types::{MissionId, PlayerId, RegionId, TerritoryId, Tick, UnitId};
use crate::state::mission::Mission;
use crate::state::player::Player;
use crate::state::territory::{Region, Territory, REGION_CONTROL_THRESHOLD};
use crate::state::unit::{Attribute, Rank, Unit, UnitStatus, MAX_CREW_SIZE, XP_PER_LEVEL};

/// The complete game state plus the RNG that drives its random outcomes
pub struct GameStore {
    pub config: SimConfig,
    players: AHashMap<PlayerId, Player>,
    territories: AHashMap<TerritoryId, Territory>,
    units: AHashMap<UnitId, Unit>,
    missions: AHashMap<MissionId, Mission>,
    regions: AHashMap<RegionId, Region>,
    /// Current simulation tick
    pub tick_count: Tick,
    /// Deterministic RNG for world rolls (seeded from the config)
    pub rng: ChaCha8Rng,
}

impl GameStore {
    pub fn new(config: SimConfig) -> Self {
        use rand::SeedableRng;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            players: AHashMap::new(),
            territories: AHashMap::new(),
            units: AHashMap::new(),
            missions: AHashMap::new(),
            regions: AHashMap::new(),
            tick_count: 0,
            rng,
        }
    }

    // === Insertion (world generation and tip supply) ===

    pub fn insert_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn insert_territory(&mut self, territory: Territory) {
        self.territories.insert(territory.id, territory);
    }

    pub fn insert_unit(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    pub fn insert_mission(&mut self, mission: Mission) {
        self.missions.insert(mission.id, mission);
    }

    pub fn insert_region(&mut self, region: Region) {
        self.regions.insert(region.id, region);
    }

    /// Delete a mission outright (tip expiry only)
    pub fn remove_mission(&mut self, id: MissionId) -> Option<Mission> {
        self.missions.remove(&id)
    }

    // === Merge-style updates ===

    /// Merge changes into a unit, then enforce unit invariants
    ///
    /// After the merge: experience at or over 100 converts into levels
    /// (repeatedly, two random skill points each, cut recomputed from
    /// rank and final level); loyalty at or below zero makes the unit
    /// defect (owner cleared, removed from the former owner's roster).
    /// Unknown ids are logged and ignored.
    pub fn update_unit(&mut self, id: UnitId, apply: impl FnOnce(&mut Unit)) {
        let Some(unit) = self.units.get(&id) else {
            tracing::error!(unit = %id, "cannot update unit: unknown id");
            return;
        };
        let mut unit = unit.clone();
        apply(&mut unit);

        let mut leveled = false;
        while unit.experience >= XP_PER_LEVEL && unit.level < self.config.level_cap {
            unit.experience -= XP_PER_LEVEL;
            unit.level += 1;
            leveled = true;
            for _ in 0..2 {
                let attr = Attribute::ALL[self.rng.gen_range(0..Attribute::ALL.len())];
                unit.skills.add(attr, 1);
            }
            tracing::debug!(unit = %id, level = unit.level, "unit leveled up");
        }
        if leveled {
            unit.cut = Unit::cut_for(unit.rank, unit.level);
        }

        if unit.loyalty <= 0 {
            if let Some(owner) = unit.owner.take() {
                unit.loyalty = 0;
                tracing::info!(unit = %id, player = %owner, "unit defected");
                self.remove_unit_from_player(owner, id);
            }
        }

        self.units.insert(id, unit);
    }

    /// Merge changes into a territory; no-op with a log on unknown ids
    pub fn update_territory(&mut self, id: TerritoryId, apply: impl FnOnce(&mut Territory)) {
        match self.territories.get_mut(&id) {
            Some(territory) => apply(territory),
            None => tracing::warn!(territory = %id, "cannot update territory: unknown id"),
        }
    }

    /// Merge changes into a player; no-op with a log on unknown ids
    pub fn update_player(&mut self, id: PlayerId, apply: impl FnOnce(&mut Player)) {
        match self.players.get_mut(&id) {
            Some(player) => apply(player),
            None => tracing::warn!(player = %id, "cannot update player: unknown id"),
        }
    }

    /// Merge changes into a mission; no-op with a log on unknown ids
    pub fn update_mission(&mut self, id: MissionId, apply: impl FnOnce(&mut Mission)) {
        match self.missions.get_mut(&id) {
            Some(mission) => apply(mission),
            None => tracing::warn!(mission = %id, "cannot update mission: unknown id"),
        }
    }

    /// Drop a unit id from a player's roster
    pub fn remove_unit_from_player(&mut self, player_id: PlayerId, unit_id: UnitId) {
        self.update_player(player_id, |p| p.units.retain(|u| *u != unit_id));
    }

    // === Read accessors ===

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(&id)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.get(&id)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    pub fn missions(&self) -> impl Iterator<Item = &Mission> {
        self.missions.values()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Missions offered to one player
    pub fn player_missions(&self, player_id: PlayerId) -> Vec<&Mission> {
        self.missions
            .values()
            .filter(|m| m.player == player_id)
            .collect()
    }

    /// Resolve a player's roster ids into units, skipping stale ids
    pub fn player_units(&self, player_id: PlayerId) -> Vec<&Unit> {
        let Some(player) = self.players.get(&player_id) else {
            return Vec::new();
        };
        player
            .units
            .iter()
            .filter_map(|id| self.units.get(id))
            .collect()
    }

    /// Unowned associates available for hire
    pub fn associates(&self) -> Vec<&Unit> {
        self.units
            .values()
            .filter(|u| u.owner.is_none() && u.rank == Rank::Associate)
            .collect()
    }

    // === Family-level derived queries ===

    /// Roster capacity: each capo commands up to `MAX_CREW_SIZE` members
    pub fn max_family_size(&self, player_id: PlayerId) -> usize {
        self.player_units(player_id)
            .iter()
            .filter(|u| u.rank == Rank::Capo)
            .count()
            * MAX_CREW_SIZE
    }

    /// True when the roster is at (or beyond) capacity
    pub fn is_family_full(&self, player_id: PlayerId) -> bool {
        let Some(player) = self.players.get(&player_id) else {
            return true;
        };
        player.units.len() >= self.max_family_size(player_id)
    }

    /// Combined heat across a family's made members
    pub fn family_heat(&self, player_id: PlayerId) -> u32 {
        self.player_units(player_id).iter().map(|u| u.heat).sum()
    }

    /// Percentage of a region's territories each owner holds
    pub fn region_ownership(&self, region_id: RegionId) -> AHashMap<PlayerId, f64> {
        let mut shares = AHashMap::new();
        let Some(region) = self.regions.get(&region_id) else {
            return shares;
        };
        let total = region.territory_ids.len();
        if total == 0 {
            return shares;
        }
        for tid in &region.territory_ids {
            if let Some(owner) = self.territories.get(tid).and_then(|t| t.owner) {
                *shares.entry(owner).or_insert(0.0) += 1.0;
            }
        }
        for share in shares.values_mut() {
            *share = *share / total as f64 * 100.0;
        }
        shares
    }

    /// One player's ownership share (percent) of a region
    pub fn region_share(&self, player_id: PlayerId, region_id: RegionId) -> f64 {
        self.region_ownership(region_id)
            .get(&player_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether a player holds enough of a region for its control bonus
    pub fn controls_region(&self, player_id: PlayerId, region_id: RegionId) -> bool {
        self.region_share(player_id, region_id) > REGION_CONTROL_THRESHOLD
    }

    /// Regions in which a player holds at least one territory
    pub fn regions_with_presence(&self, player_id: PlayerId) -> Vec<&Region> {
        self.regions
            .values()
            .filter(|r| {
                r.territory_ids
                    .iter()
                    .any(|tid| self.territories.get(tid).map(|t| t.owner) == Some(Some(player_id)))
            })
            .collect()
    }

    /// Count of a player's idle units
    pub fn idle_unit_count(&self, player_id: PlayerId) -> usize {
        self.player_units(player_id)
            .iter()
            .filter(|u| u.status == UnitStatus::Idle)
            .count()
    }
}
