//! Daily picks: a handful of matches reshuffled once per day
//!
//! The shuffle gives approximate day-to-day variety. It is not a ranking
//! signal: the input is the already-ranked top list and the output is a
//! deterministic permutation of it for a given seed.

use serde::{Deserialize, Serialize};

use crate::models::ScoredMatch;
use crate::ranking::{TargetDay, TopMatches};

/// Number of cards shown to the user
pub const PICKS_LIMIT: usize = 3;

/// Seed for a target day: day of month, plus one for the day after
pub fn daily_seed(day_of_month: u32, day: TargetDay) -> u32 {
    match day {
        TargetDay::DayAfter => day_of_month + 1,
        TargetDay::Tomorrow | TargetDay::Other => day_of_month,
    }
}

/// 32-bit linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MULTIPLIER: u32 = 1_664_525;
    const INCREMENT: u32 = 1_013_904_223;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Uniform-ish value in `0..bound`; `bound` must be non-zero
    pub fn below(&mut self, bound: u32) -> u32 {
        // High bits of an LCG are the better-distributed ones
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }
}

/// Fisher-Yates shuffle driven by [`Lcg`]
pub fn shuffle_daily<T>(items: &mut [T], seed: u32) {
    let mut rng = Lcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

/// Picks for one target day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPicks {
    pub date: String,
    pub seed: u32,
    pub picks: Vec<ScoredMatch>,
}

/// Shuffle the ranked list with `seed` and keep the first `limit`
pub fn daily_picks(ranked: TopMatches, seed: u32, limit: usize) -> DailyPicks {
    let TopMatches { date, mut top } = ranked;
    shuffle_daily(&mut top, seed);
    top.truncate(limit);

    DailyPicks {
        date,
        seed,
        picks: top,
    }
}
