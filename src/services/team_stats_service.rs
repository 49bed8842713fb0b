use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::db::match_queries::finished_results;
use crate::db::team_queries::{lock_all_team_ids, lock_team, write_team_record};
use crate::league::team_stats::{records_from_history, MatchFinalized, TeamRecord};
use crate::models::league_events::LeagueEvent;
use crate::services::error::LeagueError;
use crate::services::event_publisher::EventPublisher;

/// Keeps the stored team counters in line with finished regular matches.
#[derive(Clone, Debug)]
pub struct TeamStatsService {
    pool: PgPool,
    publisher: EventPublisher,
}

impl TeamStatsService {
    pub fn new(pool: PgPool, publisher: EventPublisher) -> Self {
        Self { pool, publisher }
    }

    /// Handler for [`MatchFinalized`]. Runs inside the caller's transaction so
    /// the match row and both team rows commit together.
    pub async fn apply_match_finalized(
        conn: &mut PgConnection,
        event: &MatchFinalized,
    ) -> Result<(), LeagueError> {
        // Lock in id order so two finishes sharing a team cannot deadlock
        let (first, second) = if event.home_team_id <= event.away_team_id {
            (event.home_team_id, event.away_team_id)
        } else {
            (event.away_team_id, event.home_team_id)
        };
        let first_team = lock_team(&mut *conn, first).await?.ok_or(LeagueError::NotFound("Team"))?;
        let second_team = lock_team(&mut *conn, second).await?.ok_or(LeagueError::NotFound("Team"))?;

        let (home_team, away_team) = if first_team.id == event.home_team_id {
            (first_team, second_team)
        } else {
            (second_team, first_team)
        };

        let mut home = TeamRecord::from(&home_team);
        let mut away = TeamRecord::from(&away_team);
        event.apply(&mut home, &mut away);

        write_team_record(&mut *conn, event.home_team_id, &home).await?;
        write_team_record(&mut *conn, event.away_team_id, &away).await?;

        info!(
            "Applied result {}-{} of match {} to teams {} and {}",
            event.final_score.home, event.final_score.away, event.match_id, event.home_team_id, event.away_team_id
        );
        Ok(())
    }

    /// Recompute every team's counters from the finished matches, inside the
    /// caller's transaction. Returns the ids of all teams.
    pub async fn rebuild_in_tx(conn: &mut PgConnection) -> Result<Vec<Uuid>, LeagueError> {
        let team_ids = lock_all_team_ids(&mut *conn).await?;
        let results = finished_results(&mut *conn).await?;
        let records = records_from_history(team_ids.iter().copied(), &results);

        for team_id in &team_ids {
            let record = records.get(team_id).copied().unwrap_or_default();
            write_team_record(&mut *conn, *team_id, &record).await?;
        }

        info!("Rebuilt stats of {} teams from {} finished matches", team_ids.len(), results.len());
        Ok(team_ids)
    }

    #[tracing::instrument(name = "Rebuild team stats from history", skip(self))]
    pub async fn rebuild_from_history(&self) -> Result<Vec<Uuid>, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let team_ids = Self::rebuild_in_tx(&mut *tx).await?;
        tx.commit().await?;

        self.publisher
            .publish(&LeagueEvent::StandingsUpdated {
                team_ids: team_ids.clone(),
                timestamp: chrono::Utc::now(),
            })
            .await;
        Ok(team_ids)
    }
}
