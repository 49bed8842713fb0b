use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::fixture_queries::{lock_fixture, save_live_state, set_winner, ticking_fixture_ids, LockedFixture};
use crate::league::lifecycle::{decide_winner, LifecycleError, MinuteUpdate, ScoreDelta, Side};
use crate::league::team_stats::MatchFinalized;
use crate::models::fixture::{FixtureKind, FixtureSnapshot};
use crate::models::league_events::LeagueEvent;
use crate::services::error::LeagueError;
use crate::services::event_publisher::EventPublisher;
use crate::services::team_stats_service::TeamStatsService;

/// Drives fixtures through scheduled -> live -> finished. Each transition
/// locks the fixture row, applies the lifecycle rule and writes the row back
/// in one transaction.
#[derive(Clone, Debug)]
pub struct LiveMatchService {
    pool: PgPool,
    publisher: EventPublisher,
}

impl LiveMatchService {
    pub fn new(pool: PgPool, publisher: EventPublisher) -> Self {
        Self { pool, publisher }
    }

    #[tracing::instrument(name = "Start fixture", skip(self))]
    pub async fn start(&self, kind: FixtureKind, fixture_id: Uuid) -> Result<FixtureSnapshot, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let mut fixture = lock_or_not_found(&mut *tx, kind, fixture_id).await?;

        if kind == FixtureKind::Elimination
            && (fixture.first_team_id.is_none() || fixture.second_team_id.is_none())
        {
            return Err(LifecycleError::BracketSlotEmpty.into());
        }
        fixture.state.start()?;
        save_live_state(&mut *tx, &fixture).await?;
        tx.commit().await?;

        info!("{} {} is live", kind.label(), fixture_id);
        self.publisher.publish(&live_score_event(&fixture)).await;
        Ok(snapshot(&fixture, None))
    }

    #[tracing::instrument(name = "Adjust live score", skip(self))]
    pub async fn adjust_live_score(
        &self,
        kind: FixtureKind,
        fixture_id: Uuid,
        side: Side,
        delta: i32,
    ) -> Result<FixtureSnapshot, LeagueError> {
        let delta = ScoreDelta::try_from(delta)?;

        let mut tx = self.pool.begin().await?;
        let mut fixture = lock_or_not_found(&mut *tx, kind, fixture_id).await?;
        fixture.state.adjust_live_score(side, delta)?;
        save_live_state(&mut *tx, &fixture).await?;
        tx.commit().await?;

        self.publisher.publish(&live_score_event(&fixture)).await;
        Ok(snapshot(&fixture, None))
    }

    /// Manual clock control. Values are clamped to 0..=120.
    #[tracing::instrument(name = "Set match minute", skip(self))]
    pub async fn set_minute(
        &self,
        kind: FixtureKind,
        fixture_id: Uuid,
        minute: i32,
    ) -> Result<FixtureSnapshot, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let mut fixture = lock_or_not_found(&mut *tx, kind, fixture_id).await?;
        fixture.state.apply_minute(MinuteUpdate::Set(minute))?;
        save_live_state(&mut *tx, &fixture).await?;
        tx.commit().await?;

        self.publisher.publish(&minute_event(&fixture)).await;
        Ok(snapshot(&fixture, None))
    }

    /// Freeze the live score. Regular matches feed the result into the team
    /// table; knockout matches record the winner instead.
    #[tracing::instrument(name = "Finish fixture", skip(self))]
    pub async fn finish(&self, kind: FixtureKind, fixture_id: Uuid) -> Result<FixtureSnapshot, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let mut fixture = lock_or_not_found(&mut *tx, kind, fixture_id).await?;
        let final_score = fixture.state.finish()?;
        save_live_state(&mut *tx, &fixture).await?;

        let mut events = Vec::new();
        let winner_id = match kind {
            FixtureKind::Regular => {
                let (Some(home_team_id), Some(away_team_id)) = (fixture.first_team_id, fixture.second_team_id) else {
                    return Err(LeagueError::Conflict("match has no teams assigned".into()));
                };
                let finalized = MatchFinalized {
                    match_id: fixture_id,
                    home_team_id,
                    away_team_id,
                    final_score,
                };
                TeamStatsService::apply_match_finalized(&mut *tx, &finalized).await?;
                events.push(LeagueEvent::StandingsUpdated {
                    team_ids: vec![home_team_id, away_team_id],
                    timestamp: Utc::now(),
                });
                None
            }
            FixtureKind::Elimination => {
                let winner_id = decide_winner(final_score, fixture.first_team_id, fixture.second_team_id);
                set_winner(&mut *tx, fixture_id, winner_id).await?;
                winner_id
            }
        };
        tx.commit().await?;

        info!(
            "{} {} finished {}-{}",
            kind.label(), fixture_id, final_score.home, final_score.away
        );
        events.insert(
            0,
            LeagueEvent::MatchFinalized {
                kind,
                match_id: fixture_id,
                final_score,
                winner_id,
                timestamp: Utc::now(),
            },
        );
        self.publisher.publish_all(&events).await;
        Ok(snapshot(&fixture, winner_id))
    }

    /// One step of the match clock for every live fixture still below
    /// regulation time. Goes through the same minute reducer as
    /// [`LiveMatchService::set_minute`]. Returns how many fixtures advanced.
    pub async fn tick_live_fixtures(&self) -> Result<usize, LeagueError> {
        let mut advanced = 0;
        for kind in [FixtureKind::Regular, FixtureKind::Elimination] {
            let ids = {
                let mut conn = self.pool.acquire().await?;
                ticking_fixture_ids(&mut *conn, kind).await?
            };
            for fixture_id in ids {
                match self.tick_one(kind, fixture_id).await {
                    Ok(true) => advanced += 1,
                    Ok(false) => {}
                    Err(e) => error!("Failed to advance clock of {} {}: {}", kind.label(), fixture_id, e),
                }
            }
        }
        Ok(advanced)
    }

    async fn tick_one(&self, kind: FixtureKind, fixture_id: Uuid) -> Result<bool, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut fixture) = lock_fixture(&mut *tx, kind, fixture_id).await? else {
            return Ok(false);
        };
        // The fixture may have been finished between listing and locking
        let advanced = match fixture.state.apply_minute(MinuteUpdate::Tick) {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                warn!("Skipping clock tick for {}: {}", fixture_id, e);
                false
            }
        };
        if !advanced {
            return Ok(false);
        }
        save_live_state(&mut *tx, &fixture).await?;
        tx.commit().await?;

        self.publisher.publish(&minute_event(&fixture)).await;
        Ok(true)
    }
}

async fn lock_or_not_found(
    conn: &mut PgConnection,
    kind: FixtureKind,
    fixture_id: Uuid,
) -> Result<LockedFixture, LeagueError> {
    lock_fixture(conn, kind, fixture_id)
        .await?
        .ok_or(LeagueError::NotFound(kind.label()))
}

fn snapshot(fixture: &LockedFixture, winner_id: Option<Uuid>) -> FixtureSnapshot {
    FixtureSnapshot {
        id: fixture.id,
        kind: fixture.kind,
        state: fixture.state.clone(),
        winner_id,
    }
}

fn live_score_event(fixture: &LockedFixture) -> LeagueEvent {
    LeagueEvent::LiveScoreUpdate {
        kind: fixture.kind,
        match_id: fixture.id,
        status: fixture.state.status,
        live_score: fixture.state.live_score,
        current_minute: fixture.state.current_minute,
        timestamp: Utc::now(),
    }
}

fn minute_event(fixture: &LockedFixture) -> LeagueEvent {
    LeagueEvent::MinuteAdvanced {
        kind: fixture.kind,
        match_id: fixture.id,
        current_minute: fixture.state.current_minute,
        timestamp: Utc::now(),
    }
}
