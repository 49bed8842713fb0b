use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::player::{CreatePlayerRequest, Player, PlayerWithTeam, UpdatePlayerRequest};

const PLAYER_WITH_TEAM_SELECT: &str = r#"
    SELECT p.*, t.name AS team_name, t.logo_url AS team_logo_url
    FROM players p
    JOIN teams t ON t.id = p.team_id
"#;

#[derive(Debug, Clone)]
pub struct PlayerQueries {
    pool: PgPool,
}

impl PlayerQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_players(&self, team_id: Option<Uuid>) -> Result<Vec<PlayerWithTeam>, sqlx::Error> {
        let sql = format!(
            "{} WHERE ($1::uuid IS NULL OR p.team_id = $1) ORDER BY p.goals DESC, p.name ASC",
            PLAYER_WITH_TEAM_SELECT
        );
        sqlx::query_as::<_, PlayerWithTeam>(&sql)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn top_scorers(&self, limit: i64) -> Result<Vec<PlayerWithTeam>, sqlx::Error> {
        let sql = format!(
            "{} ORDER BY p.goals DESC, p.assists DESC, p.name ASC LIMIT $1",
            PLAYER_WITH_TEAM_SELECT
        );
        sqlx::query_as::<_, PlayerWithTeam>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_player(&self, player_id: Uuid) -> Result<Option<PlayerWithTeam>, sqlx::Error> {
        let sql = format!("{} WHERE p.id = $1", PLAYER_WITH_TEAM_SELECT);
        sqlx::query_as::<_, PlayerWithTeam>(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_player(&self, request: &CreatePlayerRequest) -> Result<Player, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (id, name, team_id, goals, assists)
            VALUES ($1, $2, $3, 0, 0)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.team_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_player(
        &self,
        player_id: Uuid,
        request: &UpdatePlayerRequest,
    ) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = COALESCE($2, name),
                team_id = COALESCE($3, team_id),
                goals = COALESCE($4, goals),
                assists = COALESCE($5, assists),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(player_id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.team_id)
        .bind(request.goals)
        .bind(request.assists)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_player(&self, player_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Add `goals` / `assists` to a player's tally; negative steps floor at zero.
pub async fn adjust_player_tally(
    conn: &mut PgConnection,
    player_id: Uuid,
    goals: i32,
    assists: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE players
        SET goals = GREATEST(goals + $2, 0),
            assists = GREATEST(assists + $3, 0),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(player_id)
    .bind(goals)
    .bind(assists)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
