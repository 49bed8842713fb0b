use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::match_event::{MatchEvent, MatchEventType, MatchEventWithPlayers};

#[derive(Debug, Clone)]
pub struct MatchEventQueries {
    pool: PgPool,
}

impl MatchEventQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Timeline of a match in minute order.
    pub async fn list_for_match(&self, match_id: Uuid) -> Result<Vec<MatchEventWithPlayers>, sqlx::Error> {
        sqlx::query_as::<_, MatchEventWithPlayers>(
            r#"
            SELECT
                e.*,
                p.name AS player_name,
                a.name AS assist_player_name
            FROM match_events e
            JOIN players p ON p.id = e.player_id
            LEFT JOIN players a ON a.id = e.assist_player_id
            WHERE e.match_id = $1
            ORDER BY e.minute ASC, e.created_at ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
    }
}

pub struct NewMatchEvent {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub event_type: MatchEventType,
    pub minute: i32,
    pub assist_player_id: Option<Uuid>,
}

pub async fn insert_match_event(
    conn: &mut PgConnection,
    event: &NewMatchEvent,
) -> Result<MatchEvent, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        r#"
        INSERT INTO match_events (id, match_id, player_id, event_type, minute, assist_player_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event.match_id)
    .bind(event.player_id)
    .bind(event.event_type)
    .bind(event.minute)
    .bind(event.assist_player_id)
    .fetch_one(&mut *conn)
    .await
}

pub async fn delete_match_event(
    conn: &mut PgConnection,
    match_id: Uuid,
    event_id: Uuid,
) -> Result<Option<MatchEvent>, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        "DELETE FROM match_events WHERE id = $1 AND match_id = $2 RETURNING *",
    )
    .bind(event_id)
    .bind(match_id)
    .fetch_optional(&mut *conn)
    .await
}
