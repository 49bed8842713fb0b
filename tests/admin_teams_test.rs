mod common;
use common::league_helpers::LeagueClient;
use common::utils::{create_admin_and_login, spawn_app};

use serde_json::json;

#[tokio::test]
async fn mutations_require_a_token() {
    let test_app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/admin/teams", test_app.address))
        .json(&json!({ "name": "Anonymous FC", "group_name": "A" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn team_starts_with_zero_record() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let team_id = league.create_team("Rovers", "A").await;
    let team = league.team(&team_id).await;

    assert_eq!(team["name"], "Rovers");
    assert_eq!(team["group_name"], "A");
    assert_eq!(team["wins"], 0);
    assert_eq!(team["points"], 0);
    assert_eq!(team["matches_played"], 0);
}

#[tokio::test]
async fn invalid_team_payloads_are_rejected() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let test_cases = vec![
        (json!({ "name": "Nowhere FC", "group_name": "Z" }), "an unknown group"),
        (json!({ "name": "   ", "group_name": "A" }), "a blank name"),
    ];

    for (body, description) in test_cases {
        let response = league.admin_post("/teams", body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload had {}.",
            description
        );
    }
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);
    let team_id = league.create_team("Doomed", "B").await;

    let unconfirmed = league.admin_delete(&format!("/teams/{}", team_id)).await;
    assert_eq!(400, unconfirmed.status().as_u16());

    let confirmed = league.admin_delete(&format!("/teams/{}?confirm=true", team_id)).await;
    assert_eq!(200, confirmed.status().as_u16());

    let lookup = reqwest::Client::new()
        .get(format!("{}/league/teams/{}", test_app.address, team_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(404, lookup.status().as_u16());
}

#[tokio::test]
async fn standings_group_teams_by_points() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let winners = league.create_team("Winners", "C").await;
    let losers = league.create_team("Losers", "C").await;
    let match_id = league.create_match(&losers, &winners).await;
    league.play_match(&match_id, 0, 2).await;

    let standings = league.get("/standings/C").await;
    let rows = standings["data"].as_array().expect("Group standings should be a list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Winners");
    assert_eq!(rows[0]["position"], 1);
    assert_eq!(rows[0]["points"], 3);
    assert_eq!(rows[1]["goal_difference"], -2);

    let empty_group = league.get("/standings/D").await;
    assert_eq!(empty_group["data"], json!([]));
}

#[tokio::test]
async fn deleting_a_team_rebuilds_its_opponents() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let leaving = league.create_team("Leaving", "A").await;
    let staying = league.create_team("Staying", "A").await;
    let other = league.create_team("Other", "A").await;

    let lost_to_leaving = league.create_match(&leaving, &staying).await;
    league.play_match(&lost_to_leaving, 2, 0).await;
    let beat_other = league.create_match(&staying, &other).await;
    league.play_match(&beat_other, 1, 0).await;

    let deleted = league.admin_delete(&format!("/teams/{}?confirm=true", leaving)).await;
    assert_eq!(200, deleted.status().as_u16());

    let staying_team = league.team(&staying).await;
    assert_eq!(staying_team["wins"], 1);
    assert_eq!(staying_team["losses"], 0);
    assert_eq!(staying_team["goals_against"], 0);
    assert_eq!(staying_team["matches_played"], 1);

    let other_team = league.team(&other).await;
    assert_eq!(other_team["losses"], 1);

    let matches = league.get("/matches").await;
    assert_eq!(matches["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn deleting_all_matches_zeroes_every_team() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let home = league.create_team("Home", "B").await;
    let away = league.create_team("Away", "B").await;
    let first = league.create_match(&home, &away).await;
    league.play_match(&first, 3, 2).await;
    let second = league.create_match(&away, &home).await;
    league.play_match(&second, 1, 1).await;

    let unconfirmed = league.admin_delete("/matches").await;
    assert_eq!(400, unconfirmed.status().as_u16());

    let confirmed = league.admin_delete("/matches?confirm=true").await;
    assert_eq!(200, confirmed.status().as_u16());

    for team_id in [&home, &away] {
        let team = league.team(team_id).await;
        assert_eq!(team["wins"], 0);
        assert_eq!(team["draws"], 0);
        assert_eq!(team["losses"], 0);
        assert_eq!(team["goals_for"], 0);
        assert_eq!(team["goals_against"], 0);
        assert_eq!(team["points"], 0);
    }
    assert_eq!(league.get("/matches").await["data"], json!([]));
}

#[tokio::test]
async fn player_tallies_can_be_corrected() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let team_id = league.create_team("Rovers", "A").await;
    let player_id = league.create_player("Striker", &team_id).await;

    let corrected = league
        .admin_put(&format!("/players/{}", player_id), json!({ "goals": 5, "assists": 2 }))
        .await;
    assert_eq!(200, corrected.status().as_u16());

    let player = league.get(&format!("/players/{}", player_id)).await;
    assert_eq!(player["data"]["goals"], 5);
    assert_eq!(player["data"]["assists"], 2);
    assert_eq!(player["data"]["name"], "Striker");

    let negative = league
        .admin_put(&format!("/players/{}", player_id), json!({ "goals": -1 }))
        .await;
    assert_eq!(400, negative.status().as_u16());
    let player = league.get(&format!("/players/{}", player_id)).await;
    assert_eq!(player["data"]["goals"], 5);
}
