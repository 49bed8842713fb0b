use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::league::LeagueSettings;
use crate::db::elimination_queries::{self, EliminationQueries};
use crate::db::match_queries::{self, MatchQueries};
use crate::db::player_queries::PlayerQueries;
use crate::db::team_queries::{self, TeamQueries};
use crate::league::lifecycle::MatchStatus;
use crate::models::elimination::{
    CreateEliminationMatchRequest, EliminationMatch, UpdateEliminationMatchRequest,
};
use crate::models::fixture::{CreateMatchRequest, Match, UpdateMatchRequest};
use crate::models::league_events::{ChangeKind, LeagueEvent, LeagueTable};
use crate::models::player::{CreatePlayerRequest, Player, UpdatePlayerRequest};
use crate::models::team::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::services::error::LeagueError;
use crate::services::event_publisher::EventPublisher;
use crate::services::team_stats_service::TeamStatsService;

/// Admin writes on teams, players and fixtures outside the live lifecycle.
#[derive(Clone, Debug)]
pub struct LeagueAdminService {
    pool: PgPool,
    publisher: EventPublisher,
    league: LeagueSettings,
}

impl LeagueAdminService {
    pub fn new(pool: PgPool, publisher: EventPublisher, league: LeagueSettings) -> Self {
        Self { pool, publisher, league }
    }

    fn require_known_group(&self, group: &str) -> Result<(), LeagueError> {
        if !self.league.is_known_group(group) {
            return Err(LeagueError::validation(format!(
                "unknown group '{}', expected one of {}",
                group,
                self.league.groups.join(", ")
            )));
        }
        Ok(())
    }

    async fn require_team(&self, team_id: Uuid) -> Result<Team, LeagueError> {
        TeamQueries::new(self.pool.clone())
            .get_team(team_id)
            .await?
            .ok_or_else(|| LeagueError::validation(format!("team {} does not exist", team_id)))
    }

    async fn changed(&self, table: LeagueTable, change: ChangeKind, row_id: Option<Uuid>) {
        self.publisher
            .publish(&LeagueEvent::table_changed(table, change, row_id))
            .await;
    }

    async fn standings_rebuilt(&self, team_ids: Vec<Uuid>) {
        self.publisher
            .publish(&LeagueEvent::StandingsUpdated {
                team_ids,
                timestamp: Utc::now(),
            })
            .await;
    }

    // Teams

    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, LeagueError> {
        require_name(&request.name)?;
        self.require_known_group(&request.group_name)?;

        let team = TeamQueries::new(self.pool.clone()).create_team(request).await?;
        info!("Created team {} ({}) in group {}", team.name, team.id, team.group_name);
        self.changed(LeagueTable::Teams, ChangeKind::Insert, Some(team.id)).await;
        Ok(team)
    }

    pub async fn update_team(&self, team_id: Uuid, request: &UpdateTeamRequest) -> Result<Team, LeagueError> {
        if let Some(name) = &request.name {
            require_name(name)?;
        }
        if let Some(group) = &request.group_name {
            self.require_known_group(group)?;
        }

        let team = TeamQueries::new(self.pool.clone())
            .update_team(team_id, request)
            .await?
            .ok_or(LeagueError::NotFound("Team"))?;
        self.changed(LeagueTable::Teams, ChangeKind::Update, Some(team_id)).await;
        Ok(team)
    }

    /// Removing a team also removes its fixtures, so every other team's
    /// counters are rebuilt in the same transaction.
    pub async fn delete_team(&self, team_id: Uuid) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;
        team_queries::lock_team_fixtures(&mut *tx, team_id).await?;
        if !team_queries::delete_team(&mut *tx, team_id).await? {
            return Err(LeagueError::NotFound("Team"));
        }
        let team_ids = TeamStatsService::rebuild_in_tx(&mut *tx).await?;
        tx.commit().await?;

        info!("Deleted team {}", team_id);
        self.changed(LeagueTable::Teams, ChangeKind::Delete, Some(team_id)).await;
        self.changed(LeagueTable::Players, ChangeKind::Delete, None).await;
        self.changed(LeagueTable::Matches, ChangeKind::Delete, None).await;
        self.standings_rebuilt(team_ids).await;
        Ok(())
    }

    // Players

    pub async fn create_player(&self, request: &CreatePlayerRequest) -> Result<Player, LeagueError> {
        require_name(&request.name)?;
        self.require_team(request.team_id).await?;

        let player = PlayerQueries::new(self.pool.clone()).create_player(request).await?;
        self.changed(LeagueTable::Players, ChangeKind::Insert, Some(player.id)).await;
        Ok(player)
    }

    pub async fn update_player(&self, player_id: Uuid, request: &UpdatePlayerRequest) -> Result<Player, LeagueError> {
        if let Some(name) = &request.name {
            require_name(name)?;
        }
        if let Some(team_id) = request.team_id {
            self.require_team(team_id).await?;
        }
        for tally in [request.goals, request.assists].into_iter().flatten() {
            if tally < 0 {
                return Err(LeagueError::validation("goals and assists cannot be negative"));
            }
        }

        let player = PlayerQueries::new(self.pool.clone())
            .update_player(player_id, request)
            .await?
            .ok_or(LeagueError::NotFound("Player"))?;
        self.changed(LeagueTable::Players, ChangeKind::Update, Some(player_id)).await;
        Ok(player)
    }

    pub async fn delete_player(&self, player_id: Uuid) -> Result<(), LeagueError> {
        if !PlayerQueries::new(self.pool.clone()).delete_player(player_id).await? {
            return Err(LeagueError::NotFound("Player"));
        }
        self.changed(LeagueTable::Players, ChangeKind::Delete, Some(player_id)).await;
        Ok(())
    }

    // Regular matches

    pub async fn create_match(&self, request: &CreateMatchRequest) -> Result<Match, LeagueError> {
        require_distinct_teams(request.home_team_id, request.away_team_id)?;
        self.require_team(request.home_team_id).await?;
        self.require_team(request.away_team_id).await?;

        let fixture = MatchQueries::new(self.pool.clone()).create_match(request).await?;
        self.changed(LeagueTable::Matches, ChangeKind::Insert, Some(fixture.id)).await;
        Ok(fixture)
    }

    /// Edits date, time and teams. Scores can only be corrected on a finished
    /// match; the status itself only moves through the live lifecycle.
    pub async fn update_match(&self, match_id: Uuid, request: &UpdateMatchRequest) -> Result<Match, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let mut fixture = match_queries::lock_match(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::NotFound("Match"))?;
        let before = fixture.clone();

        if let Some(date) = request.date {
            fixture.date = date;
        }
        if let Some(time) = request.time {
            fixture.time = time;
        }
        if let Some(home_team_id) = request.home_team_id {
            fixture.home_team_id = home_team_id;
        }
        if let Some(away_team_id) = request.away_team_id {
            fixture.away_team_id = away_team_id;
        }
        require_distinct_teams(fixture.home_team_id, fixture.away_team_id)?;
        for team_id in [request.home_team_id, request.away_team_id].into_iter().flatten() {
            self.require_team(team_id).await?;
        }

        if request.home_score.is_some() || request.away_score.is_some() {
            if fixture.status != MatchStatus::Finished {
                return Err(LeagueError::Conflict(format!(
                    "scores of a {} match are set through the live controls",
                    fixture.status
                )));
            }
            for score in [request.home_score, request.away_score].into_iter().flatten() {
                if score < 0 {
                    return Err(LeagueError::validation("scores cannot be negative"));
                }
            }
            fixture.home_score = request.home_score.or(fixture.home_score);
            fixture.away_score = request.away_score.or(fixture.away_score);
        }

        let result_changed = fixture.status == MatchStatus::Finished
            && (fixture.final_score() != before.final_score()
                || fixture.home_team_id != before.home_team_id
                || fixture.away_team_id != before.away_team_id);

        let updated = match_queries::write_match_fields(&mut *tx, &fixture).await?;
        let rebuilt = if result_changed {
            Some(TeamStatsService::rebuild_in_tx(&mut *tx).await?)
        } else {
            None
        };
        tx.commit().await?;

        self.changed(LeagueTable::Matches, ChangeKind::Update, Some(match_id)).await;
        if let Some(team_ids) = rebuilt {
            info!("Result of match {} corrected, team stats rebuilt", match_id);
            self.standings_rebuilt(team_ids).await;
        }
        Ok(updated)
    }

    pub async fn delete_match(&self, match_id: Uuid) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;
        let deleted = match_queries::delete_match(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::NotFound("Match"))?;
        let rebuilt = if deleted.status == MatchStatus::Finished {
            Some(TeamStatsService::rebuild_in_tx(&mut *tx).await?)
        } else {
            None
        };
        tx.commit().await?;

        self.changed(LeagueTable::Matches, ChangeKind::Delete, Some(match_id)).await;
        if let Some(team_ids) = rebuilt {
            self.standings_rebuilt(team_ids).await;
        }
        Ok(())
    }

    pub async fn delete_all_matches(&self) -> Result<u64, LeagueError> {
        let mut tx = self.pool.begin().await?;
        let deleted = match_queries::delete_all_matches(&mut *tx).await?;
        let team_ids = TeamStatsService::rebuild_in_tx(&mut *tx).await?;
        tx.commit().await?;

        info!("Deleted all {} matches", deleted);
        self.changed(LeagueTable::Matches, ChangeKind::Delete, None).await;
        self.standings_rebuilt(team_ids).await;
        Ok(deleted)
    }

    // Elimination bracket

    pub async fn create_elimination_match(
        &self,
        request: &CreateEliminationMatchRequest,
    ) -> Result<EliminationMatch, LeagueError> {
        require_match_number(request.match_number)?;
        self.require_bracket_slots(request.team1_id, request.team2_id).await?;

        let fixture = EliminationQueries::new(self.pool.clone())
            .create_elimination_match(request)
            .await
            .map_err(|e| {
                LeagueError::conflict_on_unique(e, "this stage already has a match with that number")
            })?;
        self.changed(LeagueTable::EliminationMatches, ChangeKind::Insert, Some(fixture.id)).await;
        Ok(fixture)
    }

    /// Slot and schedule edits run under the same row lock as the live
    /// controls, so a slot change cannot race a start.
    pub async fn update_elimination_match(
        &self,
        match_id: Uuid,
        request: &UpdateEliminationMatchRequest,
    ) -> Result<EliminationMatch, LeagueError> {
        if let Some(number) = request.match_number {
            require_match_number(number)?;
        }

        let mut tx = self.pool.begin().await?;
        let current = elimination_queries::lock_elimination_match(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::NotFound("Elimination match"))?;

        let slots_changed = request.team1_id.is_some() || request.team2_id.is_some();
        if slots_changed && current.status != MatchStatus::Scheduled {
            return Err(LeagueError::Conflict(format!(
                "bracket slots of a {} match cannot change",
                current.status
            )));
        }
        self.require_bracket_slots(
            request.team1_id.or(current.team1_id),
            request.team2_id.or(current.team2_id),
        )
        .await?;

        let fixture = elimination_queries::update_elimination_match(&mut *tx, match_id, request)
            .await
            .map_err(|e| {
                LeagueError::conflict_on_unique(e, "this stage already has a match with that number")
            })?;
        tx.commit().await?;

        self.changed(LeagueTable::EliminationMatches, ChangeKind::Update, Some(match_id)).await;
        Ok(fixture)
    }

    pub async fn delete_elimination_match(&self, match_id: Uuid) -> Result<(), LeagueError> {
        if !EliminationQueries::new(self.pool.clone())
            .delete_elimination_match(match_id)
            .await?
        {
            return Err(LeagueError::NotFound("Elimination match"));
        }
        self.changed(LeagueTable::EliminationMatches, ChangeKind::Delete, Some(match_id)).await;
        Ok(())
    }

    async fn require_bracket_slots(&self, team1_id: Option<Uuid>, team2_id: Option<Uuid>) -> Result<(), LeagueError> {
        if let (Some(team1), Some(team2)) = (team1_id, team2_id) {
            require_distinct_teams(team1, team2)?;
        }
        for team_id in [team1_id, team2_id].into_iter().flatten() {
            self.require_team(team_id).await?;
        }
        Ok(())
    }
}

fn require_name(name: &str) -> Result<(), LeagueError> {
    if name.trim().is_empty() {
        return Err(LeagueError::validation("name cannot be empty"));
    }
    Ok(())
}

fn require_distinct_teams(first: Uuid, second: Uuid) -> Result<(), LeagueError> {
    if first == second {
        return Err(LeagueError::validation("a team cannot play against itself"));
    }
    Ok(())
}

fn require_match_number(number: i32) -> Result<(), LeagueError> {
    if number < 1 {
        return Err(LeagueError::validation("match_number must be at least 1"));
    }
    Ok(())
}
