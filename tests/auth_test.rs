mod common;
use common::utils::{create_admin_and_login, spawn_app};

use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let body = json!({
        "email": format!("user{}@example.com", Uuid::new_v4().simple()),
        "password": "password123"
    });

    let first = client
        .post(format!("{}/register_user", test_app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, first.status().as_u16());

    let second = client
        .post(format!("{}/register_user", test_app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(409, second.status().as_u16());
}

#[tokio::test]
async fn invalid_registration_returns_400() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let test_cases = vec![
        (json!({ "email": "no-at-sign", "password": "password123" }), "missing @"),
        (json!({ "email": "short@example.com", "password": "short" }), "short password"),
    ];

    for (body, description) in test_cases {
        let response = client
            .post(format!("{}/register_user", test_app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload had {}.",
            description
        );
    }
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let email = format!("user{}@example.com", Uuid::new_v4().simple());

    client
        .post(format!("{}/register_user", test_app.address))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Failed to execute request.");

    let response = client
        .post(format!("{}/login", test_app.address))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn session_requires_a_valid_token() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let anonymous = client
        .get(format!("{}/admin/session", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, anonymous.status().as_u16());

    let forged = client
        .get(format!("{}/admin/session", test_app.address))
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, forged.status().as_u16());

    let token = create_admin_and_login(&test_app.address).await;
    let session = client
        .get(format!("{}/admin/session", test_app.address))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, session.status().as_u16());
}
