use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::league::lifecycle::{LiveState, MatchStatus, Score, Side};

/// A regular league fixture.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    #[sqlx(rename = "match_date")]
    pub date: NaiveDate,
    #[sqlx(rename = "match_time")]
    pub time: NaiveTime,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub live_home_score: i32,
    pub live_away_score: i32,
    pub current_minute: i32,
    pub played: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn final_score(&self) -> Option<Score> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(Score::new(home, away)),
            _ => None,
        }
    }
}

/// Match with both teams' name and logo expanded inline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchWithTeams {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team_name: String,
    pub home_team_logo_url: Option<String>,
    pub away_team_name: String,
    pub away_team_logo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

/// Score fields are a correction of an already finished match; they are
/// rejected for fixtures that have not been finished through the lifecycle.
#[derive(Debug, Deserialize)]
pub struct UpdateMatchRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub home_team_id: Option<Uuid>,
    pub away_team_id: Option<Uuid>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreAdjustmentRequest {
    pub side: Side,
    pub delta: i32,
}

#[derive(Debug, Deserialize)]
pub struct MinuteRequest {
    pub minute: i32,
}

/// The two tables that run through the match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Regular,
    Elimination,
}

impl FixtureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FixtureKind::Regular => "Match",
            FixtureKind::Elimination => "Elimination match",
        }
    }
}

/// State of a fixture after a lifecycle transition.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureSnapshot {
    pub id: Uuid,
    pub kind: FixtureKind,
    #[serde(flatten)]
    pub state: LiveState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<Uuid>,
}
