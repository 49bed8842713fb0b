use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::league::lifecycle::MatchStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Quarter,
    Semi,
    Final,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Quarter => "quarter",
            Stage::Semi => "semi",
            Stage::Final => "final",
        }
    }
}

/// A knockout fixture. Team slots stay empty until the previous round
/// has been decided.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EliminationMatch {
    pub id: Uuid,
    pub stage: Stage,
    pub match_number: i32,
    #[sqlx(rename = "match_date")]
    pub date: Option<NaiveDate>,
    #[sqlx(rename = "match_time")]
    pub time: Option<NaiveTime>,
    pub team1_id: Option<Uuid>,
    pub team2_id: Option<Uuid>,
    pub winner_id: Option<Uuid>,
    pub status: MatchStatus,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub live_team1_score: i32,
    pub live_team2_score: i32,
    pub current_minute: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EliminationMatchWithTeams {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fixture: EliminationMatch,
    pub team1_name: Option<String>,
    pub team1_logo_url: Option<String>,
    pub team2_name: Option<String>,
    pub team2_logo_url: Option<String>,
    pub winner_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEliminationMatchRequest {
    pub stage: Stage,
    pub match_number: i32,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub team1_id: Option<Uuid>,
    pub team2_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEliminationMatchRequest {
    pub match_number: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub team1_id: Option<Uuid>,
    pub team2_id: Option<Uuid>,
}
