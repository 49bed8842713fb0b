mod common;
use common::league_helpers::{data_id, LeagueClient};
use common::utils::{create_admin_and_login, spawn_app};

use serde_json::json;

#[tokio::test]
async fn goal_events_update_player_tallies() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let scorer = league.create_player("Striker", &home).await;
    let assister = league.create_player("Winger", &home).await;
    let match_id = league.create_match(&home, &away).await;

    let goal = league
        .admin_post(
            &format!("/matches/{}/events", match_id),
            json!({
                "player_id": scorer,
                "event_type": "goal",
                "minute": 23,
                "assist_player_id": assister
            }),
        )
        .await;
    assert_eq!(201, goal.status().as_u16());
    let event_id = data_id(goal).await;

    let striker = league.get(&format!("/players/{}", scorer)).await;
    assert_eq!(striker["data"]["goals"], 1);
    let winger = league.get(&format!("/players/{}", assister)).await;
    assert_eq!(winger["data"]["assists"], 1);

    let events = league.get(&format!("/matches/{}/events", match_id)).await;
    assert_eq!(events["data"][0]["player_name"], "Striker");
    assert_eq!(events["data"][0]["assist_player_name"], "Winger");

    let removed = league
        .admin_delete(&format!("/matches/{}/events/{}?confirm=true", match_id, event_id))
        .await;
    assert_eq!(200, removed.status().as_u16());

    let striker = league.get(&format!("/players/{}", scorer)).await;
    assert_eq!(striker["data"]["goals"], 0);
    let winger = league.get(&format!("/players/{}", assister)).await;
    assert_eq!(winger["data"]["assists"], 0);
}

#[tokio::test]
async fn events_for_outside_players_are_rejected() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let outsider_team = league.create_team("Outsiders", "B").await;
    let outsider = league.create_player("Stranger", &outsider_team).await;
    let scorer = league.create_player("Striker", &home).await;
    let opponent = league.create_player("Defender", &away).await;
    let match_id = league.create_match(&home, &away).await;

    let test_cases = vec![
        (
            json!({ "player_id": outsider, "event_type": "goal", "minute": 10 }),
            "a player from neither team",
        ),
        (
            json!({ "player_id": scorer, "event_type": "goal", "minute": 10, "assist_player_id": scorer }),
            "a self assist",
        ),
        (
            json!({ "player_id": scorer, "event_type": "goal", "minute": 10, "assist_player_id": opponent }),
            "an assist from the other team",
        ),
    ];

    for (body, description) in test_cases {
        let response = league
            .admin_post(&format!("/matches/{}/events", match_id), body)
            .await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload had {}.",
            description
        );
    }
}
