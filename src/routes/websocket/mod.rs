mod connection;
mod messages;

use std::sync::Arc;

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

pub use connection::LeagueConnection;
pub use messages::SubscriptionQuery;

/// Change feed for the public views. Reads are public, so no token is needed.
pub async fn league_ws_route(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<SubscriptionQuery>,
    redis: Option<web::Data<Arc<redis::Client>>>,
) -> Result<HttpResponse, Error> {
    let channels = query.channels();
    tracing::info!("New league WebSocket connection for channels {:?}", channels);

    ws::start(LeagueConnection::new(channels, redis), &req, stream)
}
