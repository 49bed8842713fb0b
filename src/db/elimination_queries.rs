use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::elimination::{
    CreateEliminationMatchRequest, EliminationMatch, EliminationMatchWithTeams,
    UpdateEliminationMatchRequest,
};

const BRACKET_SELECT: &str = r#"
    SELECT
        em.*,
        t1.name AS team1_name,
        t1.logo_url AS team1_logo_url,
        t2.name AS team2_name,
        t2.logo_url AS team2_logo_url,
        w.name AS winner_name
    FROM elimination_matches em
    LEFT JOIN teams t1 ON t1.id = em.team1_id
    LEFT JOIN teams t2 ON t2.id = em.team2_id
    LEFT JOIN teams w ON w.id = em.winner_id
"#;

#[derive(Debug, Clone)]
pub struct EliminationQueries {
    pool: PgPool,
}

impl EliminationQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The whole bracket, quarter-finals first.
    pub async fn list_bracket(&self) -> Result<Vec<EliminationMatchWithTeams>, sqlx::Error> {
        let sql = format!(
            r#"{}
            ORDER BY
                CASE em.stage WHEN 'quarter' THEN 1 WHEN 'semi' THEN 2 ELSE 3 END,
                em.match_number ASC
            "#,
            BRACKET_SELECT
        );
        sqlx::query_as::<_, EliminationMatchWithTeams>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_elimination_match(
        &self,
        match_id: Uuid,
    ) -> Result<Option<EliminationMatchWithTeams>, sqlx::Error> {
        let sql = format!("{} WHERE em.id = $1", BRACKET_SELECT);
        sqlx::query_as::<_, EliminationMatchWithTeams>(&sql)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_elimination_match(
        &self,
        request: &CreateEliminationMatchRequest,
    ) -> Result<EliminationMatch, sqlx::Error> {
        sqlx::query_as::<_, EliminationMatch>(
            r#"
            INSERT INTO elimination_matches
                (id, stage, match_number, match_date, match_time, team1_id, team2_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.stage.as_str())
        .bind(request.match_number)
        .bind(request.date)
        .bind(request.time)
        .bind(request.team1_id)
        .bind(request.team2_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete_elimination_match(&self, match_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM elimination_matches WHERE id = $1")
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub async fn lock_elimination_match(
    conn: &mut PgConnection,
    match_id: Uuid,
) -> Result<Option<EliminationMatch>, sqlx::Error> {
    sqlx::query_as::<_, EliminationMatch>("SELECT * FROM elimination_matches WHERE id = $1 FOR UPDATE")
        .bind(match_id)
        .fetch_optional(&mut *conn)
        .await
}

/// Callers hold the row lock from `lock_elimination_match`.
pub async fn update_elimination_match(
    conn: &mut PgConnection,
    match_id: Uuid,
    request: &UpdateEliminationMatchRequest,
) -> Result<EliminationMatch, sqlx::Error> {
    sqlx::query_as::<_, EliminationMatch>(
        r#"
        UPDATE elimination_matches
        SET match_number = COALESCE($2, match_number),
            match_date = COALESCE($3, match_date),
            match_time = COALESCE($4, match_time),
            team1_id = COALESCE($5, team1_id),
            team2_id = COALESCE($6, team2_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(request.match_number)
    .bind(request.date)
    .bind(request.time)
    .bind(request.team1_id)
    .bind(request.team2_id)
    .fetch_one(&mut *conn)
    .await
}
