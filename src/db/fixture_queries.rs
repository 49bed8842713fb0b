use sqlx::{PgConnection, Row};
use uuid::Uuid;

use crate::league::lifecycle::{LiveState, MatchStatus, Score, AUTO_ADVANCE_LIMIT};
use crate::models::fixture::FixtureKind;

/// Column names of the lifecycle fields, which differ between the two
/// fixture tables.
struct FixtureColumns {
    table: &'static str,
    first_team: &'static str,
    second_team: &'static str,
    live_first: &'static str,
    live_second: &'static str,
    final_first: &'static str,
    final_second: &'static str,
}

fn columns(kind: FixtureKind) -> FixtureColumns {
    match kind {
        FixtureKind::Regular => FixtureColumns {
            table: "matches",
            first_team: "home_team_id",
            second_team: "away_team_id",
            live_first: "live_home_score",
            live_second: "live_away_score",
            final_first: "home_score",
            final_second: "away_score",
        },
        FixtureKind::Elimination => FixtureColumns {
            table: "elimination_matches",
            first_team: "team1_id",
            second_team: "team2_id",
            live_first: "live_team1_score",
            live_second: "live_team2_score",
            final_first: "team1_score",
            final_second: "team2_score",
        },
    }
}

/// A fixture row read under `FOR UPDATE`.
#[derive(Debug, Clone)]
pub struct LockedFixture {
    pub id: Uuid,
    pub kind: FixtureKind,
    pub first_team_id: Option<Uuid>,
    pub second_team_id: Option<Uuid>,
    pub state: LiveState,
}

pub async fn lock_fixture(
    conn: &mut PgConnection,
    kind: FixtureKind,
    fixture_id: Uuid,
) -> Result<Option<LockedFixture>, sqlx::Error> {
    let c = columns(kind);
    let sql = format!(
        r#"
        SELECT
            status,
            current_minute,
            {first_team} AS first_team_id,
            {second_team} AS second_team_id,
            {live_first} AS live_first,
            {live_second} AS live_second,
            {final_first} AS final_first,
            {final_second} AS final_second
        FROM {table}
        WHERE id = $1
        FOR UPDATE
        "#,
        first_team = c.first_team,
        second_team = c.second_team,
        live_first = c.live_first,
        live_second = c.live_second,
        final_first = c.final_first,
        final_second = c.final_second,
        table = c.table,
    );

    let row = sqlx::query(&sql)
        .bind(fixture_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|row| -> Result<LockedFixture, sqlx::Error> {
        let final_first: Option<i32> = row.try_get("final_first")?;
        let final_second: Option<i32> = row.try_get("final_second")?;
        Ok(LockedFixture {
            id: fixture_id,
            kind,
            first_team_id: row.try_get("first_team_id")?,
            second_team_id: row.try_get("second_team_id")?,
            state: LiveState {
                status: row.try_get::<MatchStatus, _>("status")?,
                current_minute: row.try_get("current_minute")?,
                live_score: Score::new(row.try_get("live_first")?, row.try_get("live_second")?),
                final_score: final_first
                    .zip(final_second)
                    .map(|(first, second)| Score::new(first, second)),
            },
        })
    })
    .transpose()
}

/// Write the lifecycle fields back. `played` on regular matches follows the
/// status so the two can never disagree.
pub async fn save_live_state(
    conn: &mut PgConnection,
    fixture: &LockedFixture,
) -> Result<(), sqlx::Error> {
    let c = columns(fixture.kind);
    let played = match fixture.kind {
        FixtureKind::Regular => "played = ($2 = 'finished'),",
        FixtureKind::Elimination => "",
    };
    let sql = format!(
        r#"
        UPDATE {table}
        SET status = $2,
            current_minute = $3,
            {live_first} = $4,
            {live_second} = $5,
            {final_first} = $6,
            {final_second} = $7,
            {played}
            updated_at = NOW()
        WHERE id = $1
        "#,
        table = c.table,
        live_first = c.live_first,
        live_second = c.live_second,
        final_first = c.final_first,
        final_second = c.final_second,
        played = played,
    );

    let state = &fixture.state;
    sqlx::query(&sql)
        .bind(fixture.id)
        .bind(state.status.as_str())
        .bind(state.current_minute)
        .bind(state.live_score.home)
        .bind(state.live_score.away)
        .bind(state.final_score.map(|s| s.home))
        .bind(state.final_score.map(|s| s.away))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_winner(
    conn: &mut PgConnection,
    fixture_id: Uuid,
    winner_id: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE elimination_matches SET winner_id = $2, updated_at = NOW() WHERE id = $1")
        .bind(fixture_id)
        .bind(winner_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Live fixtures whose clock still advances on its own.
pub async fn ticking_fixture_ids(
    conn: &mut PgConnection,
    kind: FixtureKind,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let sql = format!(
        "SELECT id FROM {} WHERE status = 'live' AND current_minute < $1",
        columns(kind).table
    );
    sqlx::query_scalar::<_, Uuid>(&sql)
        .bind(AUTO_ADVANCE_LIMIT)
        .fetch_all(&mut *conn)
        .await
}
