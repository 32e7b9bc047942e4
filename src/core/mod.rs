//! Shared core: ids, errors, configuration and the game calendar

pub mod calendar;
pub mod config;
pub mod error;
pub mod types;
