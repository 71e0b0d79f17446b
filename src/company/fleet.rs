//! Production-line fleet bucketed by age, and its year-end aging step
//!
//! Lines live for five years. A line bought this year enters at age 0 at
//! year end; a line that starts the year at age 4 works and depreciates
//! through that year and is scrapped at year end.

use serde::{Deserialize, Serialize};

use crate::assumptions::LINE_USEFUL_LIFE_YEARS;

/// Count of identical production lines per age, index = age in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineFleet {
    lines_by_age: [u32; LINE_USEFUL_LIFE_YEARS],
}

/// Result of advancing a fleet by one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetAging {
    pub fleet: LineFleet,
    /// Lines that were at the last age bucket and have been scrapped
    pub scrapped: u32,
}

impl LineFleet {
    pub fn new(lines_by_age: [u32; LINE_USEFUL_LIFE_YEARS]) -> Self {
        Self { lines_by_age }
    }

    pub fn lines_by_age(&self) -> [u32; LINE_USEFUL_LIFE_YEARS] {
        self.lines_by_age
    }

    /// Total lines in service across all ages
    pub fn total(&self) -> u32 {
        self.lines_by_age.iter().fold(0, |acc, n| acc.saturating_add(*n))
    }

    /// Lines that will be scrapped at the end of the current year
    pub fn retiring(&self) -> u32 {
        self.lines_by_age[LINE_USEFUL_LIFE_YEARS - 1]
    }

    /// Advance the fleet by one year.
    ///
    /// Every bucket shifts up one age, the oldest bucket is scrapped and
    /// `purchased` lines enter at age 0.
    pub fn age_one_year(&self, purchased: u32) -> FleetAging {
        let mut next = [0u32; LINE_USEFUL_LIFE_YEARS];
        next[1..].copy_from_slice(&self.lines_by_age[..LINE_USEFUL_LIFE_YEARS - 1]);
        next[0] = purchased;

        FleetAging {
            fleet: LineFleet::new(next),
            scrapped: self.retiring(),
        }
    }
}
