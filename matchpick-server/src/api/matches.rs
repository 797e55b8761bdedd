//! Ranking endpoints
//!
//! GET /top-matches?day=tomorrow|dayafter - top 10 by score
//! GET /daily-picks?day=tomorrow|dayafter - 3 of those, reshuffled per day

use axum::{
    extract::{Query, State},
    Json,
};
use matchpick_common::picks::{self, DailyPicks, PICKS_LIMIT};
use matchpick_common::ranking::{TargetDay, TopMatches};
use matchpick_common::time;
use tracing::{debug, error};

use super::ApiError;
use crate::AppState;

/// Target day from the raw query pairs
///
/// No `day` means tomorrow. A single `day` is parsed; a repeated one is not a
/// recognised value and falls through like any other unknown day.
fn target_day(pairs: &[(String, String)]) -> TargetDay {
    let mut days = pairs.iter().filter(|(key, _)| key == "day");
    match (days.next(), days.next()) {
        (None, _) => TargetDay::default(),
        (Some((_, day)), None) => TargetDay::parse(day),
        (Some(_), Some(_)) => TargetDay::Other,
    }
}

/// GET /top-matches
pub async fn top_matches(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TopMatches>, ApiError> {
    let day = target_day(&pairs);

    let result = state.ranking.top_matches(day).await.map_err(|e| {
        error!("Ranking failed for {:?}: {}", day, e);
        ApiError::from(e)
    })?;

    debug!("top-matches {:?}: {} entries for {}", day, result.top.len(), result.date);
    Ok(Json(result))
}

/// GET /daily-picks
pub async fn daily_picks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<DailyPicks>, ApiError> {
    let day = target_day(&pairs);

    let ranked = state.ranking.top_matches(day).await.map_err(|e| {
        error!("Ranking failed for {:?}: {}", day, e);
        ApiError::from(e)
    })?;

    let seed = picks::daily_seed(time::day_of_month(), day);
    Ok(Json(picks::daily_picks(ranked, seed, PICKS_LIMIT)))
}
