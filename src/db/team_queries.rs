use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::league::team_stats::TeamRecord;
use crate::models::team::{CreateTeamRequest, Team, UpdateTeamRequest};

#[derive(Debug, Clone)]
pub struct TeamQueries {
    pool: PgPool,
}

impl TeamQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_teams(&self, group: Option<&str>) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT * FROM teams
            WHERE ($1::varchar IS NULL OR group_name = $1)
            ORDER BY group_name ASC, name ASC
            "#,
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await
    }

    /// Teams in a stable fetch order for the standings engine.
    pub async fn list_teams_in_fetch_order(&self) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_team(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (id, name, logo_url, group_name, wins, draws, losses, goals_for, goals_against)
            VALUES ($1, $2, $3, $4, 0, 0, 0, 0, 0)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.logo_url)
        .bind(&request.group_name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_team(
        &self,
        team_id: Uuid,
        request: &UpdateTeamRequest,
    ) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                logo_url = COALESCE($3, logo_url),
                group_name = COALESCE($4, group_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(&request.logo_url)
        .bind(&request.group_name)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Read a team and hold its row lock until the surrounding transaction ends.
pub async fn lock_team(conn: &mut PgConnection, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1 FOR UPDATE")
        .bind(team_id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn write_team_record(
    conn: &mut PgConnection,
    team_id: Uuid,
    record: &TeamRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE teams
        SET wins = $2,
            draws = $3,
            losses = $4,
            goals_for = $5,
            goals_against = $6,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(team_id)
    .bind(record.wins)
    .bind(record.draws)
    .bind(record.losses)
    .bind(record.goals_for)
    .bind(record.goals_against)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Lock every fixture row that references the team, matches before the
/// bracket, so a delete takes fixture locks before the team row the same
/// way a finish does.
pub async fn lock_team_fixtures(conn: &mut PgConnection, team_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "SELECT id FROM matches WHERE home_team_id = $1 OR away_team_id = $1 ORDER BY id FOR UPDATE",
    )
    .bind(team_id)
    .fetch_all(&mut *conn)
    .await?;
    sqlx::query(
        r#"
        SELECT id FROM elimination_matches
        WHERE team1_id = $1 OR team2_id = $1 OR winner_id = $1
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(team_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(())
}

/// Players and matches of the team go with it (ON DELETE CASCADE).
pub async fn delete_team(conn: &mut PgConnection, team_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// All team ids, locking every team row for a full rebuild.
pub async fn lock_all_team_ids(conn: &mut PgConnection) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM teams ORDER BY id FOR UPDATE")
        .fetch_all(&mut *conn)
        .await
}
