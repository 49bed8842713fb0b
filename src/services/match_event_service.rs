use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::match_event_queries::{delete_match_event, insert_match_event, NewMatchEvent};
use crate::db::match_queries::lock_match;
use crate::db::player_queries::{adjust_player_tally, PlayerQueries};
use crate::league::lifecycle::clamp_minute;
use crate::models::league_events::{ChangeKind, LeagueEvent, LeagueTable};
use crate::models::match_event::{CreateMatchEventRequest, MatchEvent, MatchEventType};
use crate::services::error::LeagueError;
use crate::services::event_publisher::EventPublisher;

/// Goals and cards recorded against a match. Goal events carry the scorer's
/// and assister's tallies with them, both ways.
#[derive(Clone, Debug)]
pub struct MatchEventService {
    pool: PgPool,
    publisher: EventPublisher,
}

impl MatchEventService {
    pub fn new(pool: PgPool, publisher: EventPublisher) -> Self {
        Self { pool, publisher }
    }

    #[tracing::instrument(name = "Record match event", skip(self, request), fields(event_type = ?request.event_type))]
    pub async fn create_event(
        &self,
        match_id: Uuid,
        request: &CreateMatchEventRequest,
    ) -> Result<MatchEvent, LeagueError> {
        let players = PlayerQueries::new(self.pool.clone());
        let mut tx = self.pool.begin().await?;
        let fixture = lock_match(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::NotFound("Match"))?;

        let player = players
            .get_player(request.player_id)
            .await?
            .ok_or_else(|| LeagueError::validation(format!("player {} does not exist", request.player_id)))?
            .player;
        if player.team_id != fixture.home_team_id && player.team_id != fixture.away_team_id {
            return Err(LeagueError::validation("player does not belong to either team of the match"));
        }

        let assist_player_id = match (request.event_type, request.assist_player_id) {
            (MatchEventType::Goal, Some(assist_id)) => {
                if assist_id == player.id {
                    return Err(LeagueError::validation("a player cannot assist their own goal"));
                }
                let assister = players
                    .get_player(assist_id)
                    .await?
                    .ok_or_else(|| LeagueError::validation(format!("player {} does not exist", assist_id)))?
                    .player;
                if assister.team_id != player.team_id {
                    return Err(LeagueError::validation("assisting player must be a teammate of the scorer"));
                }
                Some(assist_id)
            }
            // Only goals carry an assist
            _ => None,
        };

        let event = insert_match_event(
            &mut *tx,
            &NewMatchEvent {
                match_id,
                player_id: player.id,
                event_type: request.event_type,
                minute: clamp_minute(request.minute),
                assist_player_id,
            },
        )
        .await?;

        if event.event_type == MatchEventType::Goal {
            adjust_player_tally(&mut *tx, event.player_id, 1, 0).await?;
            if let Some(assist_id) = event.assist_player_id {
                adjust_player_tally(&mut *tx, assist_id, 0, 1).await?;
            }
        }
        tx.commit().await?;

        info!("Recorded {:?} for player {} in match {}", event.event_type, event.player_id, match_id);
        self.publish_changes(&event, ChangeKind::Insert).await;
        Ok(event)
    }

    /// Removes the event and takes back the goal and assist it credited.
    #[tracing::instrument(name = "Delete match event", skip(self))]
    pub async fn delete_event(&self, match_id: Uuid, event_id: Uuid) -> Result<MatchEvent, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let event = delete_match_event(&mut *tx, match_id, event_id)
            .await?
            .ok_or(LeagueError::NotFound("Match event"))?;

        if event.event_type == MatchEventType::Goal {
            adjust_player_tally(&mut *tx, event.player_id, -1, 0).await?;
            if let Some(assist_id) = event.assist_player_id {
                adjust_player_tally(&mut *tx, assist_id, 0, -1).await?;
            }
        }
        tx.commit().await?;

        self.publish_changes(&event, ChangeKind::Delete).await;
        Ok(event)
    }

    async fn publish_changes(&self, event: &MatchEvent, change: ChangeKind) {
        let mut events = vec![LeagueEvent::table_changed(LeagueTable::MatchEvents, change, Some(event.id))];
        if event.event_type == MatchEventType::Goal {
            events.push(LeagueEvent::table_changed(
                LeagueTable::Players,
                ChangeKind::Update,
                Some(event.player_id),
            ));
        }
        self.publisher.publish_all(&events).await;
    }
}
