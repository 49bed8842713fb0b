use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub goals: i32,
    pub assists: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Player with the owning team expanded inline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlayerWithTeam {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub player: Player,
    pub team_name: String,
    pub team_logo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub team_id: Uuid,
}

/// `goals` / `assists` overwrite the tallies kept by match events.
#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub team_id: Option<Uuid>,
    pub goals: Option<i32>,
    pub assists: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerQueryParams {
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct TopScorersQuery {
    pub limit: Option<i64>,
}
