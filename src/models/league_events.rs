use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::league::lifecycle::{MatchStatus, Score};
use crate::models::fixture::FixtureKind;

pub const GLOBAL_CHANNEL: &str = "league:events:global";

/// Tables clients can watch for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueTable {
    Teams,
    Players,
    Matches,
    EliminationMatches,
    MatchEvents,
}

impl LeagueTable {
    pub const ALL: [LeagueTable; 5] = [
        LeagueTable::Teams,
        LeagueTable::Players,
        LeagueTable::Matches,
        LeagueTable::EliminationMatches,
        LeagueTable::MatchEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueTable::Teams => "teams",
            LeagueTable::Players => "players",
            LeagueTable::Matches => "matches",
            LeagueTable::EliminationMatches => "elimination_matches",
            LeagueTable::MatchEvents => "match_events",
        }
    }

    pub fn channel(&self) -> String {
        format!("league:events:{}", self.as_str())
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.as_str() == name.trim())
    }
}

impl From<FixtureKind> for LeagueTable {
    fn from(kind: FixtureKind) -> Self {
        match kind {
            FixtureKind::Regular => LeagueTable::Matches,
            FixtureKind::Elimination => LeagueTable::EliminationMatches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Messages pushed to WebSocket subscribers. Clients treat every one of
/// them as a cue to refetch the affected views.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "event_type")]
pub enum LeagueEvent {
    #[serde(rename = "table_changed")]
    TableChanged {
        table: LeagueTable,
        change: ChangeKind,
        row_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename = "live_score_update")]
    LiveScoreUpdate {
        kind: FixtureKind,
        match_id: Uuid,
        status: MatchStatus,
        live_score: Score,
        current_minute: i32,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename = "minute_advanced")]
    MinuteAdvanced {
        kind: FixtureKind,
        match_id: Uuid,
        current_minute: i32,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename = "match_finalized")]
    MatchFinalized {
        kind: FixtureKind,
        match_id: Uuid,
        final_score: Score,
        winner_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename = "standings_updated")]
    StandingsUpdated {
        team_ids: Vec<Uuid>,
        timestamp: DateTime<Utc>,
    },
}

impl LeagueEvent {
    pub fn table_changed(table: LeagueTable, change: ChangeKind, row_id: Option<Uuid>) -> Self {
        LeagueEvent::TableChanged {
            table,
            change,
            row_id,
            timestamp: Utc::now(),
        }
    }

    /// The table whose watchers should receive this event.
    pub fn table(&self) -> LeagueTable {
        match self {
            LeagueEvent::TableChanged { table, .. } => *table,
            LeagueEvent::LiveScoreUpdate { kind, .. }
            | LeagueEvent::MinuteAdvanced { kind, .. }
            | LeagueEvent::MatchFinalized { kind, .. } => (*kind).into(),
            LeagueEvent::StandingsUpdated { .. } => LeagueTable::Teams,
        }
    }
}
