//! Mob Sim - tick-driven criminal empire simulation core
//!
//! Deterministic, single-threaded simulation of competing crime families
//! on a gridded city map. All mutation flows through [`state::GameStore`];
//! the [`game::Game`] orchestrator drives the per-tick sequence of AI
//! decisions, queued actions and scheduled jobs.

pub mod actions;
pub mod ai;
pub mod core;
pub mod game;
pub mod map;
pub mod missions;
pub mod players;
pub mod schedule;
pub mod state;

pub use crate::core::config::SimConfig;
pub use crate::core::error::{Result, SimError};
pub use game::Game;
pub use players::{ControllerType, PlayerConfig};
