//! Match scoring heuristic
//!
//! A match earns points for:
//! 1. League priority: `(len - index) * 10` for every known league contained in
//!    the league field (case-insensitive). Several hits all count.
//! 2. Broadcast: +15 when `tv` is non-empty.
//! 3. Popular teams: +12 for every notable name contained in `"home away"`.
//! 4. Time proximity: +8 when kickoff is strictly between now and now + 48h.
//!
//! Scores are never persisted and are recomputed per request.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::models::Match;

/// Known leagues, most important first
pub const DEFAULT_LEAGUE_PRIORITY: [&str; 8] = [
    "NHL",
    "Premier League",
    "LaLiga",
    "Serie A",
    "Bundesliga",
    "TELH",
    "Fortuna liga",
    "Champions League",
];

/// Notable team names matched as lower-case substrings
pub const DEFAULT_POPULAR_TEAMS: [&str; 7] = [
    "sparta",
    "slavia",
    "kometa",
    "real madrid",
    "barcelona",
    "manchester united",
    "boston",
];

pub const LEAGUE_STEP: u32 = 10;
pub const BROADCAST_BONUS: u32 = 15;
pub const POPULAR_TEAM_BONUS: u32 = 12;
pub const PROXIMITY_BONUS: u32 = 8;
pub const PROXIMITY_WINDOW_HOURS: i64 = 48;

static DEFAULT_PROFILE: Lazy<ScoringProfile> = Lazy::new(ScoringProfile::default);

/// Immutable scoring tables
///
/// Names are lower-cased once at construction so matching is a plain
/// substring test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringProfile {
    league_priority: Vec<String>,
    popular_teams: Vec<String>,
    proximity_window: Duration,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::new(DEFAULT_LEAGUE_PRIORITY, DEFAULT_POPULAR_TEAMS)
    }
}

impl ScoringProfile {
    /// Create a profile from a priority-ordered league list and a team list
    pub fn new<L, T>(league_priority: L, popular_teams: T) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            league_priority: league_priority
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
            popular_teams: popular_teams
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            proximity_window: Duration::hours(PROXIMITY_WINDOW_HOURS),
        }
    }

    /// Shared instance of the built-in profile
    pub fn builtin() -> &'static ScoringProfile {
        &DEFAULT_PROFILE
    }

    pub fn league_priority(&self) -> &[String] {
        &self.league_priority
    }

    pub fn popular_teams(&self) -> &[String] {
        &self.popular_teams
    }

    /// Score a match against the given instant
    pub fn score(&self, m: &Match, now: DateTime<Utc>) -> u32 {
        self.league_bonus(&m.league)
            + self.broadcast_bonus(&m.tv)
            + self.popular_team_bonus(&m.home, &m.away)
            + self.proximity_bonus(&m.date, now)
    }

    pub fn league_bonus(&self, league: &str) -> u32 {
        let league = league.to_lowercase();
        let len = self.league_priority.len();

        self.league_priority
            .iter()
            .enumerate()
            .filter(|(_, known)| league.contains(known.as_str()))
            .map(|(i, _)| (len - i) as u32 * LEAGUE_STEP)
            .sum()
    }

    pub fn broadcast_bonus(&self, tv: &str) -> u32 {
        if tv.is_empty() {
            0
        } else {
            BROADCAST_BONUS
        }
    }

    pub fn popular_team_bonus(&self, home: &str, away: &str) -> u32 {
        let teams = format!("{} {}", home, away).to_lowercase();

        self.popular_teams
            .iter()
            .filter(|team| teams.contains(team.as_str()))
            .count() as u32
            * POPULAR_TEAM_BONUS
    }

    /// Bonus for kickoffs inside the open interval (now, now + window)
    pub fn proximity_bonus(&self, date: &str, now: DateTime<Utc>) -> u32 {
        match parse_kickoff(date) {
            Some(kickoff) => {
                let until = kickoff - now;
                if until > Duration::zero() && until < self.proximity_window {
                    PROXIMITY_BONUS
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

/// Score a match with the built-in profile
pub fn score(m: &Match, now: DateTime<Utc>) -> u32 {
    ScoringProfile::builtin().score(m, now)
}

/// Score a match with the built-in profile against the current clock
pub fn score_now(m: &Match) -> u32 {
    score(m, crate::time::now())
}

/// Date-time layouts carrying a UTC offset (`+02:00`, `+0200`, `+02`)
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Date-time layouts without an offset, read as local time
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a kickoff timestamp
///
/// Accepted forms:
/// - RFC 3339 (`2026-10-20T19:00:00+02:00`, `...Z`)
/// - ISO date-time with seconds or minutes only, `T` or space separated,
///   with `Z`, extended (`+02:00`) or basic (`+0200`) offset
/// - the same without an offset, read as local time
/// - bare `YYYY-MM-DD`, read as UTC midnight
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Zulu suffix spelled as an explicit offset so one set of layouts covers it
    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
