use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, Handler, StreamHandler};
use actix_web::web;
use actix_web_actors::ws;
use futures::StreamExt;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::messages::LeagueEventMessage;

// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(120);

/// One subscriber. Every event on a watched channel is forwarded as a text
/// frame; the client refetches whatever it shows.
pub struct LeagueConnection {
    heartbeat: Instant,
    session_id: Uuid,
    channels: Vec<String>,
    redis: Option<web::Data<Arc<redis::Client>>>,
    subscription: Option<JoinHandle<()>>,
}

impl Actor for LeagueConnection {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("League subscriber {} connected, watching {:?}", self.session_id, self.channels);

        self.heartbeat(ctx);
        self.subscribe(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        cancel_subscription(&mut self.subscription);
        tracing::info!("League subscriber {} disconnected", self.session_id);
    }
}

impl LeagueConnection {
    pub fn new(channels: Vec<String>, redis: Option<web::Data<Arc<redis::Client>>>) -> Self {
        Self {
            heartbeat: Instant::now(),
            session_id: Uuid::new_v4(),
            channels,
            redis,
            subscription: None,
        }
    }

    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.heartbeat) > CLIENT_TIMEOUT {
                tracing::warn!("Subscriber {} missed its heartbeat, disconnecting", act.session_id);
                ctx.stop();
                return;
            }
            ctx.ping(b"ping");
        });
    }

    fn subscribe(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let session_id = self.session_id;
        let channels = self.channels.clone();
        let addr = ctx.address();

        let Some(redis_client) = self.redis.clone() else {
            tracing::warn!("No Redis client, subscriber {} will not receive change events", session_id);
            let notice = serde_json::json!({
                "event_type": "subscriptions_unavailable",
                "message": "Redis not configured - live updates disabled",
                "timestamp": chrono::Utc::now().to_rfc3339()
            });
            ctx.text(notice.to_string());
            return;
        };

        let handle = tokio::spawn(async move {
            let conn = match redis_client.get_async_connection().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::error!("Failed to connect to Redis for subscriber {}: {}", session_id, e);
                    return;
                }
            };
            let mut pubsub = conn.into_pubsub();

            for channel in &channels {
                if let Err(e) = pubsub.subscribe(channel).await {
                    tracing::error!("Failed to subscribe {} to {}: {}", session_id, channel, e);
                    return;
                }
            }

            let ready = serde_json::json!({
                "event_type": "subscriptions_ready",
                "channels": channels,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });
            addr.do_send(LeagueEventMessage(ready.to_string()));

            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                match msg.get_payload::<String>() {
                    Ok(payload) => {
                        if !addr.connected() {
                            break;
                        }
                        addr.do_send(LeagueEventMessage(payload));
                    }
                    Err(e) => tracing::error!("Failed to read Redis payload for {}: {}", session_id, e),
                }
            }
            tracing::debug!("Redis stream ended for subscriber {}", session_id);
        });
        self.subscription = Some(handle);
    }
}

/// Stops the Redis listener task, closing its pubsub connection.
fn cancel_subscription(subscription: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = subscription.take() {
        handle.abort();
    }
}

impl Handler<LeagueEventMessage> for LeagueConnection {
    type Result = ();

    fn handle(&mut self, msg: LeagueEventMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for LeagueConnection {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.heartbeat = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) | Ok(ws::Message::Text(_)) => {
                self.heartbeat = Instant::now();
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("Ignoring binary frame from subscriber {}", self.session_id);
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelling_drops_the_listener_task() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let mut subscription = Some(tokio::spawn(async move {
            let _held = tx;
            std::future::pending::<()>().await;
        }));

        cancel_subscription(&mut subscription);

        assert!(subscription.is_none());
        assert!(rx.await.is_err());
    }

    #[test]
    fn cancelling_without_a_listener_is_a_no_op() {
        let mut subscription: Option<JoinHandle<()>> = None;
        cancel_subscription(&mut subscription);
        assert!(subscription.is_none());
    }
}
