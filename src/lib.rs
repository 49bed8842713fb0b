use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod utils;
mod middleware;
pub mod db;
pub mod league;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::config::jwt::JwtSettings;
use crate::config::league::LeagueSettings;
use crate::services::{EventPublisher, LeagueAdminService, LiveMatchService, MatchEventService, TeamStatsService};

/// Build the HTTP server. Without a Redis client the API works the same,
/// only change notifications are dropped.
pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    redis_client: Option<Arc<redis::Client>>,
    league_settings: LeagueSettings,
) -> Result<Server, std::io::Error> {
    let publisher = EventPublisher::new(redis_client.clone());

    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool.clone());
    let jwt_settings = web::Data::new(jwt_settings);
    let redis_client_data = redis_client.map(web::Data::new);
    let league_settings_data = web::Data::new(league_settings.clone());

    let live_matches = web::Data::new(LiveMatchService::new(db_pool.clone(), publisher.clone()));
    let team_stats = web::Data::new(TeamStatsService::new(db_pool.clone(), publisher.clone()));
    let match_events = web::Data::new(MatchEventService::new(db_pool.clone(), publisher.clone()));
    let league_admin = web::Data::new(LeagueAdminService::new(db_pool, publisher, league_settings));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
                http::header::UPGRADE,
                http::header::CONNECTION,
            ])
            .max_age(3600);

        let mut app = App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(league_settings_data.clone())
            .app_data(live_matches.clone())
            .app_data(team_stats.clone())
            .app_data(match_events.clone())
            .app_data(league_admin.clone());
        if let Some(redis_client_data) = &redis_client_data {
            app = app.app_data(redis_client_data.clone());
        }

        app.configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
