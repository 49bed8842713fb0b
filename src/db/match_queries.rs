use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::league::lifecycle::Score;
use crate::league::team_stats::MatchFinalized;
use crate::models::fixture::{CreateMatchRequest, Match, MatchWithTeams};

const MATCH_WITH_TEAMS_SELECT: &str = r#"
    SELECT
        m.*,
        ht.name AS home_team_name,
        ht.logo_url AS home_team_logo_url,
        awt.name AS away_team_name,
        awt.logo_url AS away_team_logo_url
    FROM matches m
    JOIN teams ht ON ht.id = m.home_team_id
    JOIN teams awt ON awt.id = m.away_team_id
"#;

/// Read side of the `matches` table.
#[derive(Debug, Clone)]
pub struct MatchQueries {
    pool: PgPool,
}

impl MatchQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_with_teams(
        &self,
        clause: &str,
        bind: Option<MatchBind>,
    ) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        let sql = format!("{} {}", MATCH_WITH_TEAMS_SELECT, clause);
        let query = sqlx::query_as::<_, MatchWithTeams>(&sql);
        let query = match bind {
            Some(MatchBind::Limit(limit)) => query.bind(limit),
            Some(MatchBind::Date(date)) => query.bind(date),
            None => query,
        };
        query.fetch_all(&self.pool).await
    }

    pub async fn list_matches(&self) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        self.fetch_with_teams("ORDER BY m.match_date DESC, m.match_time ASC", None)
            .await
    }

    pub async fn recent_results(&self, limit: i64) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        self.fetch_with_teams(
            "WHERE m.played ORDER BY m.match_date DESC, m.match_time DESC LIMIT $1",
            Some(MatchBind::Limit(limit)),
        )
        .await
    }

    pub async fn upcoming_matches(&self, limit: i64) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        self.fetch_with_teams(
            "WHERE NOT m.played ORDER BY m.match_date ASC, m.match_time ASC LIMIT $1",
            Some(MatchBind::Limit(limit)),
        )
        .await
    }

    pub async fn live_matches(&self) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        self.fetch_with_teams(
            "WHERE m.status = 'live' ORDER BY m.match_date ASC, m.match_time ASC",
            None,
        )
        .await
    }

    pub async fn matches_on(&self, date: NaiveDate) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        self.fetch_with_teams(
            "WHERE m.match_date = $1 ORDER BY m.match_time ASC",
            Some(MatchBind::Date(date)),
        )
        .await
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<Option<MatchWithTeams>, sqlx::Error> {
        let sql = format!("{} WHERE m.id = $1", MATCH_WITH_TEAMS_SELECT);
        sqlx::query_as::<_, MatchWithTeams>(&sql)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_match(&self, request: &CreateMatchRequest) -> Result<Match, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, match_date, match_time, home_team_id, away_team_id, status, played)
            VALUES ($1, $2, $3, $4, $5, 'scheduled', FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.date)
        .bind(request.time)
        .bind(request.home_team_id)
        .bind(request.away_team_id)
        .fetch_one(&self.pool)
        .await
    }
}

enum MatchBind {
    Limit(i64),
    Date(NaiveDate),
}

pub async fn lock_match(conn: &mut PgConnection, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
        .bind(match_id)
        .fetch_optional(&mut *conn)
        .await
}

/// Persist an admin edit. Scores are written as given, so callers decide
/// whether a score change is allowed.
pub async fn write_match_fields(conn: &mut PgConnection, fixture: &Match) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET match_date = $2,
            match_time = $3,
            home_team_id = $4,
            away_team_id = $5,
            home_score = $6,
            away_score = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(fixture.id)
    .bind(fixture.date)
    .bind(fixture.time)
    .bind(fixture.home_team_id)
    .bind(fixture.away_team_id)
    .bind(fixture.home_score)
    .bind(fixture.away_score)
    .fetch_one(&mut *conn)
    .await
}

pub async fn delete_match(conn: &mut PgConnection, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("DELETE FROM matches WHERE id = $1 RETURNING *")
        .bind(match_id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn delete_all_matches(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Every finished regular match, oldest first, as the event that finished it.
pub async fn finished_results(conn: &mut PgConnection) -> Result<Vec<MatchFinalized>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, home_team_id, away_team_id, home_score, away_score
        FROM matches
        WHERE status = 'finished'
          AND home_score IS NOT NULL
          AND away_score IS NOT NULL
        ORDER BY match_date ASC, match_time ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter()
        .map(|row| -> Result<MatchFinalized, sqlx::Error> {
            Ok(MatchFinalized {
                match_id: row.try_get("id")?,
                home_team_id: row.try_get("home_team_id")?,
                away_team_id: row.try_get("away_team_id")?,
                final_score: Score::new(row.try_get("home_score")?, row.try_get("away_score")?),
            })
        })
        .collect()
}
