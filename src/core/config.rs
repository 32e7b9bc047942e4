//! Simulation configuration with documented constants
//!
//! All tunable rates and world-generation parameters are collected here
//! with explanations of their purpose and how they interact.

use crate::core::error::{Result, SimError};

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good gameplay pacing.
/// Changing them will affect the economic and expansion feel.
#[derive(Debug, Clone)]
pub struct SimConfig {
    // === MAP GENERATION ===
    /// Width of the territory grid in cells
    pub map_width: u8,

    /// Height of the territory grid in cells
    pub map_height: u8,

    /// Number of regions carved out of the grid by seeded growth
    ///
    /// Must be at least the number of player slots so every starting
    /// corner can land in a distinct neighborhood, and no larger than
    /// the cell count.
    pub region_count: u8,

    /// Border irregularity, 0-100
    ///
    /// Probability (percent) that a region grows from a random frontier
    /// cell instead of the oldest one. 0 produces compact blobs, 100
    /// produces ragged organic borders.
    pub border_randomness: u8,

    // === ECONOMY ===
    /// Ticks between income collection cycles
    ///
    /// At one tick = 2 in-game hours, 12 ticks is one in-game day.
    pub income_rate: u64,

    /// Ticks between capture-progress advances
    ///
    /// Captures advance every tick so progress bars move smoothly.
    pub capture_rate: u64,

    /// Ticks between mission tip deliveries (one new tip per player)
    pub tip_rate: u64,

    /// Ticks a mission tip stays on the table before expiring
    ///
    /// Twice the tip rate, so a player always has at least one fresh
    /// and one aging tip to choose from.
    pub tip_lifespan: u64,

    /// Starting bankroll for each active player
    pub starting_money: i64,

    // === UNITS ===
    /// Size of the unaffiliated associate pool seeded at world start
    pub starting_associates: usize,

    /// Level at which units stop gaining levels
    ///
    /// Experience keeps accumulating past the cap but no longer converts.
    pub level_cap: u32,

    // === RNG ===
    /// Master seed; world generation, combat rolls and AI jitter all
    /// derive from it, so a fixed seed reproduces a campaign
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_width: 10,
            map_height: 10,
            region_count: 7,
            border_randomness: 100,

            income_rate: 12,
            capture_rate: 1,
            tip_rate: 24,
            tip_lifespan: 48,
            starting_money: 10_500,

            starting_associates: 15,
            level_cap: 10,

            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let cells = self.map_width as usize * self.map_height as usize;
        if self.region_count == 0 || self.region_count as usize > cells {
            return Err(SimError::InvalidConfig(format!(
                "region_count ({}) must be between 1 and the cell count ({})",
                self.region_count, cells
            )));
        }
        if self.border_randomness > 100 {
            return Err(SimError::InvalidConfig(format!(
                "border_randomness ({}) must be 0-100",
                self.border_randomness
            )));
        }
        if self.income_rate == 0 || self.capture_rate == 0 || self.tip_rate == 0 {
            return Err(SimError::InvalidConfig(
                "recurring intervals must be nonzero".into(),
            ));
        }
        if self.tip_lifespan == 0 {
            return Err(SimError::InvalidConfig("tip_lifespan must be nonzero".into()));
        }
        Ok(())
    }
}
