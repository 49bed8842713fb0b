pub mod elimination_handler;
pub mod live_match_handler;
pub mod match_event_handler;
pub mod match_handler;
pub mod player_handler;
pub mod standings_handler;
pub mod team_handler;

use crate::models::common::ConfirmQuery;
use crate::services::error::LeagueError;

const DEFAULT_LIST_LIMIT: i64 = 10;
const DEFAULT_TOP_SCORERS: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

/// Deletes only go through with `?confirm=true`.
pub(crate) fn require_confirmation(query: &ConfirmQuery) -> Result<(), LeagueError> {
    if !query.confirm {
        return Err(LeagueError::ConfirmationRequired);
    }
    Ok(())
}

pub(crate) fn list_limit(requested: Option<i64>, default: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}
