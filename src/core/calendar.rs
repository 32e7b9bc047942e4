//! In-game calendar
//!
//! One tick is two in-game hours. The campaign opens on 1960-01-01 00:00
//! and ends when the date reaches the configured end date.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Tick;

/// Hours of game time that pass per tick
pub const HOURS_PER_TICK: u64 = 2;

/// Campaign start date
pub const CAMPAIGN_START: GameDate = GameDate {
    year: 1960,
    month: 1,
    day: 1,
    hour: 0,
};

/// Campaign end date (reaching it freezes the simulation)
pub const CAMPAIGN_END: GameDate = GameDate {
    year: 1960,
    month: 2,
    day: 1,
    hour: 0,
};

/// A calendar date-hour in game time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
}

impl GameDate {
    /// Date reached after `tick` ticks from the campaign start
    pub fn from_tick(tick: Tick) -> Self {
        let hours = CAMPAIGN_START.hour as u64 + tick * HOURS_PER_TICK;
        let days = hours / 24;
        let hour = (hours % 24) as u8;
        let (year, month, day) = civil_from_days(days_from_civil(
            CAMPAIGN_START.year,
            CAMPAIGN_START.month,
            CAMPAIGN_START.day,
        ) + days as i64);
        Self {
            year,
            month,
            day,
            hour,
        }
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:00",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date
///
/// Howard Hinnant's civil-days algorithm, as used for epoch math.
fn days_from_civil(y: i32, m: u8, d: u8) -> i64 {
    let y = y as i64 - if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`]
fn civil_from_days(z: i64) -> (i32, u8, u8) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    (if m <= 2 { y + 1 } else { y } as i32, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_zero_is_campaign_start() {
        let d = GameDate::from_tick(0);
        assert_eq!(d, CAMPAIGN_START);
        assert_eq!(d.to_string(), "1960-01-01 00:00");
    }

    #[test]
    fn test_twelve_ticks_is_one_day() {
        let d = GameDate::from_tick(12);
        assert_eq!(d.to_string(), "1960-01-02 00:00");
    }

    #[test]
    fn test_hour_advances_two_per_tick() {
        assert_eq!(GameDate::from_tick(1).to_string(), "1960-01-01 02:00");
        assert_eq!(GameDate::from_tick(5).to_string(), "1960-01-01 10:00");
    }

    #[test]
    fn test_campaign_end_reached_after_january() {
        // 31 days of January at 12 ticks per day
        assert!(GameDate::from_tick(371) < CAMPAIGN_END);
        assert!(GameDate::from_tick(372) >= CAMPAIGN_END);
    }

    #[test]
    fn test_leap_year_february() {
        // 1960 is a leap year: Jan (31) + Feb (29) = 60 days
        assert_eq!(GameDate::from_tick(59 * 12).to_string(), "1960-02-29 00:00");
        assert_eq!(GameDate::from_tick(60 * 12).to_string(), "1960-03-01 00:00");
    }
}
