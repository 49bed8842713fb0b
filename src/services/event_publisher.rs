use std::sync::Arc;

use redis::AsyncCommands;
use tracing::{debug, error};

use crate::models::league_events::{LeagueEvent, GLOBAL_CHANNEL};

/// Pushes change notifications to Redis. Publishing is best effort: a
/// failure is logged and never fails the write that caused it.
#[derive(Clone, Debug, Default)]
pub struct EventPublisher {
    redis_client: Option<Arc<redis::Client>>,
}

impl EventPublisher {
    pub fn new(redis_client: Option<Arc<redis::Client>>) -> Self {
        Self { redis_client }
    }

    pub async fn publish(&self, event: &LeagueEvent) {
        let Some(client) = &self.redis_client else {
            debug!("No Redis client configured, dropping {:?}", event.table());
            return;
        };

        if let Err(e) = Self::send(client, event).await {
            error!("Failed to publish league event on {}: {}", event.table().channel(), e);
        }
    }

    pub async fn publish_all(&self, events: &[LeagueEvent]) {
        for event in events {
            self.publish(event).await;
        }
    }

    async fn send(client: &redis::Client, event: &LeagueEvent) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = serde_json::to_string(event)?;
        let mut conn = client.get_async_connection().await?;

        let table_channel = event.table().channel();
        let receivers: i32 = conn.publish(&table_channel, &message).await?;
        let _: i32 = conn.publish(GLOBAL_CHANNEL, &message).await?;

        debug!("Published league event to {} ({} subscribers)", table_channel, receivers);
        Ok(())
    }
}
