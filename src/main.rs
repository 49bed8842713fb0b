use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use matchday_backend::run;
use matchday_backend::config::settings::{get_config, get_jwt_settings, get_redis_url};
use matchday_backend::services::{EventPublisher, LiveMatchService, MatchClockService};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchday-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // JWT
    let jwt_settings = get_jwt_settings(&config);
    // Redis is optional: without it the API works, live pushes do not
    let redis_client = match redis::Client::open(get_redis_url(&config).expose_secret()) {
        Ok(client) => {
            tracing::info!("Redis client created successfully");
            Some(Arc::new(client))
        },
        Err(e) => {
            tracing::error!("Failed to create Redis client: {}. Change notifications are disabled.", e);
            None
        }
    };
    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;

    let match_clock = if config.league.clock_enabled {
        let live_matches = LiveMatchService::new(
            connection_pool.clone(),
            EventPublisher::new(redis_client.clone()),
        );
        let clock = match MatchClockService::new(live_matches).await {
            Ok(clock) => clock,
            Err(e) => {
                tracing::error!("Failed to create match clock: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = clock.start().await {
            tracing::error!("Failed to start match clock: {}", e);
            std::process::exit(1);
        }
        Some(clock)
    } else {
        tracing::info!("Match clock disabled by configuration");
        None
    };

    run(
        listener,
        connection_pool,
        jwt_settings,
        redis_client,
        config.league.clone(),
    )?.await?;

    if let Some(clock) = match_clock {
        if let Err(e) = clock.stop().await {
            tracing::error!("Failed to stop match clock: {}", e);
        }
    }
    Ok(())
}
