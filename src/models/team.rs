use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A league team with its cumulative record. Points, goal difference and
/// matches played are derived on read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub group_name: String,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn matches_played(&self) -> i32 {
        self.wins + self.draws + self.losses
    }

    pub fn points(&self) -> i32 {
        self.wins * 3 + self.draws
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// Team as served to clients, with the derived columns filled in.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithStats {
    #[serde(flatten)]
    pub team: Team,
    pub matches_played: i32,
    pub points: i32,
    pub goal_difference: i32,
}

impl From<Team> for TeamWithStats {
    fn from(team: Team) -> Self {
        Self {
            matches_played: team.matches_played(),
            points: team.points(),
            goal_difference: team.goal_difference(),
            team,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub logo_url: Option<String>,
    pub group_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub group_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamQueryParams {
    pub group: Option<String>,
}
