use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use matchday_backend::run;
use matchday_backend::config::settings::{get_config, DatabaseSettings, get_jwt_settings, get_redis_url};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // Each test gets its own database, so the DATABASE_URL override must not win
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;

    let jwt_settings = get_jwt_settings(&configuration);
    let redis_client = redis::Client::open(get_redis_url(&configuration).expose_secret())
        .ok()
        .map(Arc::new);

    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        redis_client,
        configuration.league.clone(),
    )
    .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Register a fresh account and return its bearer token.
pub async fn create_admin_and_login(app_address: &str) -> String {
    let client = Client::new();
    let email = format!("admin{}@example.com", Uuid::new_v4().simple());
    let password = "password123";

    let register_response = client
        .post(format!("{}/register_user", app_address))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to register user.");
    assert_eq!(201, register_response.status().as_u16());

    let login_response = client
        .post(format!("{}/login", app_address))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(200, login_response.status().as_u16());

    let body: serde_json::Value = login_response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}
