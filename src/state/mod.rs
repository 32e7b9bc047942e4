//! Game state: entity records, the authoritative store and world generation

pub mod mission;
pub mod player;
pub mod store;
pub mod territory;
pub mod unit;
pub mod worldgen;

pub use mission::{Mission, MissionInfo, MissionOutcome, MissionStatus};
pub use player::{Player, Resources};
pub use store::GameStore;
pub use territory::{Borders, CaptureState, Region, Territory};
pub use unit::{Attribute, AttributeMask, Rank, Skills, Unit, UnitStatus};
