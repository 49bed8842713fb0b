use serde::Deserialize;

use crate::models::league_events::{LeagueTable, GLOBAL_CHANNEL};

/// Event payload relayed from Redis to the socket.
#[derive(actix::Message)]
#[rtype(result = "()")]
pub struct LeagueEventMessage(pub String);

/// `?tables=matches,teams`. Missing or empty means every table.
#[derive(Debug, Deserialize)]
pub struct SubscriptionQuery {
    pub tables: Option<String>,
}

impl SubscriptionQuery {
    /// Requested tables with unknown names dropped. Empty means everything.
    pub fn watched_tables(&self) -> Vec<LeagueTable> {
        self.tables
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(LeagueTable::parse)
            .collect()
    }

    /// Redis channels to subscribe to. Watching everything is a single
    /// subscription on the global channel.
    pub fn channels(&self) -> Vec<String> {
        let tables = self.watched_tables();
        if tables.is_empty() {
            vec![GLOBAL_CHANNEL.to_string()]
        } else {
            tables.iter().map(LeagueTable::channel).collect()
        }
    }
}
