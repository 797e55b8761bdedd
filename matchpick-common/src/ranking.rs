//! Ranking: score every match, order by score, keep the top entries
//!
//! Ordering is a stable descending sort, so equal scores keep the order in
//! which the source listed them.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Catalog, ScoredMatch};
use crate::scoring::ScoringProfile;
use crate::source::SourceChain;
use crate::store::FallbackStore;
use crate::{time, Result};

/// Maximum number of matches returned by the ranking
pub const TOP_LIMIT: usize = 10;

/// Requested calendar day, relative to today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetDay {
    #[default]
    Tomorrow,
    DayAfter,
    /// Any unrecognised value; resolves like `Tomorrow`
    Other,
}

impl TargetDay {
    pub fn parse(day: &str) -> Self {
        match day {
            "tomorrow" => TargetDay::Tomorrow,
            "dayafter" => TargetDay::DayAfter,
            _ => TargetDay::Other,
        }
    }

    pub fn offset_days(self) -> u64 {
        match self {
            TargetDay::Tomorrow => 1,
            TargetDay::DayAfter => 2,
            TargetDay::Other => 1,
        }
    }

    /// Calendar date this day refers to, counted from `today`
    pub fn date_from(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.offset_days()))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Ranked response for one target day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMatches {
    pub date: String,
    pub top: Vec<ScoredMatch>,
}

/// Score, stable-sort descending and truncate
pub fn rank(
    profile: &ScoringProfile,
    catalog: Catalog,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ScoredMatch> {
    let mut scored: Vec<ScoredMatch> = catalog
        .matches
        .into_iter()
        .map(|m| {
            let score = profile.score(&m, now);
            ScoredMatch::new(m, score)
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Source selection plus ranking
#[derive(Clone)]
pub struct RankingService {
    sources: SourceChain,
    profile: ScoringProfile,
    limit: usize,
}

impl RankingService {
    pub fn new(sources: SourceChain, profile: ScoringProfile) -> Self {
        Self {
            sources,
            profile,
            limit: TOP_LIMIT,
        }
    }

    /// Placeholder scraper backed by the given store, built-in scoring
    pub fn with_store(store: FallbackStore) -> Self {
        Self::new(SourceChain::with_store(store), ScoringProfile::default())
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Top matches for a target day, given explicit clock values
    pub async fn top_matches_at(
        &self,
        day: TargetDay,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<TopMatches> {
        let target = day.date_from(today);
        let (kind, catalog) = self.sources.resolve(target).await?;
        let total = catalog.len();

        let top = rank(&self.profile, catalog, now, self.limit);

        debug!(
            "Ranked {} of {} matches for {} from {:?} source",
            top.len(),
            total,
            target,
            kind
        );

        Ok(TopMatches {
            date: format_date(target),
            top,
        })
    }

    /// Top matches for a target day against the current clock
    pub async fn top_matches(&self, day: TargetDay) -> Result<TopMatches> {
        self.top_matches_at(day, time::today(), time::now()).await
    }
}
