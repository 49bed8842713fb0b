use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchEventType {
    Goal,
    RedCard,
    YellowCard,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchEvent {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub event_type: MatchEventType,
    pub minute: i32,
    pub assist_player_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchEventWithPlayers {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: MatchEvent,
    pub player_name: String,
    pub assist_player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchEventRequest {
    pub player_id: Uuid,
    pub event_type: MatchEventType,
    pub minute: i32,
    pub assist_player_id: Option<Uuid>,
}
