mod common;
use common::league_helpers::{data_id, LeagueClient};
use common::utils::{create_admin_and_login, spawn_app};

use serde_json::json;
use uuid::Uuid;

use matchday_backend::services::{EventPublisher, LiveMatchService};

async fn league_for_test() -> LeagueClient {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    LeagueClient::new(&test_app.address, token)
}

#[tokio::test]
async fn finishing_a_match_updates_both_teams() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;

    league.play_match(&match_id, 3, 1).await;

    let fixture = league.get(&format!("/matches/{}", match_id)).await;
    assert_eq!(fixture["data"]["status"], "finished");
    assert_eq!(fixture["data"]["home_score"], 3);
    assert_eq!(fixture["data"]["away_score"], 1);
    assert_eq!(fixture["data"]["played"], true);

    let home_team = league.team(&home).await;
    assert_eq!(home_team["wins"], 1);
    assert_eq!(home_team["goals_for"], 3);
    assert_eq!(home_team["goals_against"], 1);
    assert_eq!(home_team["points"], 3);

    let away_team = league.team(&away).await;
    assert_eq!(away_team["losses"], 1);
    assert_eq!(away_team["goals_for"], 1);
    assert_eq!(away_team["points"], 0);
}

#[tokio::test]
async fn second_finish_does_not_count_twice() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;
    league.play_match(&match_id, 1, 1).await;

    let again = league.admin_post(&format!("/matches/{}/finish", match_id), json!({})).await;
    assert_eq!(409, again.status().as_u16());

    let home_team = league.team(&home).await;
    assert_eq!(home_team["draws"], 1);
    assert_eq!(home_team["matches_played"], 1);
}

#[tokio::test]
async fn live_controls_reject_invalid_transitions() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "B").await;
    let away = league.create_team("Away", "B").await;
    let match_id = league.create_match(&home, &away).await;

    let score_before_start = league
        .admin_post(&format!("/matches/{}/score", match_id), json!({ "side": "home", "delta": 1 }))
        .await;
    assert_eq!(409, score_before_start.status().as_u16());

    let start = league.admin_post(&format!("/matches/{}/start", match_id), json!({})).await;
    assert_eq!(200, start.status().as_u16());
    let body: serde_json::Value = start.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["current_minute"], 1);
    assert_eq!(body["data"]["live_score"]["home"], 0);

    let restart = league.admin_post(&format!("/matches/{}/start", match_id), json!({})).await;
    assert_eq!(409, restart.status().as_u16());

    let big_step = league
        .admin_post(&format!("/matches/{}/score", match_id), json!({ "side": "home", "delta": 2 }))
        .await;
    assert_eq!(400, big_step.status().as_u16());

    let below_zero = league
        .admin_post(&format!("/matches/{}/score", match_id), json!({ "side": "away", "delta": -1 }))
        .await;
    let body: serde_json::Value = below_zero.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["live_score"]["away"], 0);

    let minute = league
        .admin_post(&format!("/matches/{}/minute", match_id), json!({ "minute": 130 }))
        .await;
    let body: serde_json::Value = minute.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["current_minute"], 120);
}

#[tokio::test]
async fn score_correction_rebuilds_team_stats() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;
    league.play_match(&match_id, 2, 0).await;

    let correction = league
        .admin_put(&format!("/matches/{}", match_id), json!({ "home_score": 0, "away_score": 1 }))
        .await;
    assert_eq!(200, correction.status().as_u16());

    let home_team = league.team(&home).await;
    assert_eq!(home_team["wins"], 0);
    assert_eq!(home_team["losses"], 1);
    assert_eq!(home_team["goals_for"], 0);

    let away_team = league.team(&away).await;
    assert_eq!(away_team["wins"], 1);
    assert_eq!(away_team["goals_against"], 0);
}

#[tokio::test]
async fn scores_of_unfinished_matches_cannot_be_edited() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;

    let response = league
        .admin_put(&format!("/matches/{}", match_id), json!({ "home_score": 4 }))
        .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn deleting_a_finished_match_reverts_stats() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;
    league.play_match(&match_id, 1, 0).await;

    let deleted = league
        .admin_delete(&format!("/matches/{}?confirm=true", match_id))
        .await;
    assert_eq!(200, deleted.status().as_u16());

    let home_team = league.team(&home).await;
    assert_eq!(home_team["wins"], 0);
    assert_eq!(home_team["matches_played"], 0);
}

#[tokio::test]
async fn elimination_tie_leaves_winner_empty() {
    let league = league_for_test().await;
    let team1 = league.create_team("First", "A").await;
    let team2 = league.create_team("Second", "B").await;

    let created = league
        .admin_post(
            "/elimination-matches",
            json!({ "stage": "final", "match_number": 1, "team1_id": team1, "team2_id": team2 }),
        )
        .await;
    assert_eq!(201, created.status().as_u16());
    let match_id = data_id(created).await;

    let start = league
        .admin_post(&format!("/elimination-matches/{}/start", match_id), json!({}))
        .await;
    assert_eq!(200, start.status().as_u16());
    for side in ["team1", "team2"] {
        let response = league
            .admin_post(
                &format!("/elimination-matches/{}/score", match_id),
                json!({ "side": side, "delta": 1 }),
            )
            .await;
        assert_eq!(200, response.status().as_u16());
    }
    let finish = league
        .admin_post(&format!("/elimination-matches/{}/finish", match_id), json!({}))
        .await;
    assert_eq!(200, finish.status().as_u16());

    let fixture = league.get(&format!("/elimination-matches/{}", match_id)).await;
    assert_eq!(fixture["data"]["status"], "finished");
    assert_eq!(fixture["data"]["team1_score"], 1);
    assert!(fixture["data"]["winner_id"].is_null());

    // Knockout results never touch the group tables
    assert_eq!(league.team(&team1).await["matches_played"], 0);
}

#[tokio::test]
async fn elimination_match_needs_both_slots_to_start() {
    let league = league_for_test().await;
    let team1 = league.create_team("First", "A").await;

    let created = league
        .admin_post(
            "/elimination-matches",
            json!({ "stage": "semi", "match_number": 1, "team1_id": team1 }),
        )
        .await;
    let match_id = data_id(created).await;

    let start = league
        .admin_post(&format!("/elimination-matches/{}/start", match_id), json!({}))
        .await;
    assert_eq!(409, start.status().as_u16());

    let duplicate = league
        .admin_post("/elimination-matches", json!({ "stage": "semi", "match_number": 1 }))
        .await;
    assert_eq!(409, duplicate.status().as_u16());
}

#[tokio::test]
async fn elimination_winner_is_the_higher_score() {
    let league = league_for_test().await;
    let team1 = league.create_team("First", "A").await;
    let team2 = league.create_team("Second", "B").await;

    let created = league
        .admin_post(
            "/elimination-matches",
            json!({ "stage": "quarter", "match_number": 2, "team1_id": team1, "team2_id": team2 }),
        )
        .await;
    let match_id = data_id(created).await;

    let start = league
        .admin_post(&format!("/elimination-matches/{}/start", match_id), json!({}))
        .await;
    assert_eq!(200, start.status().as_u16());
    for _ in 0..2 {
        let response = league
            .admin_post(
                &format!("/elimination-matches/{}/score", match_id),
                json!({ "side": "team2", "delta": 1 }),
            )
            .await;
        assert_eq!(200, response.status().as_u16());
    }
    let finish = league
        .admin_post(&format!("/elimination-matches/{}/finish", match_id), json!({}))
        .await;
    assert_eq!(200, finish.status().as_u16());

    let fixture = league.get(&format!("/elimination-matches/{}", match_id)).await;
    assert_eq!(fixture["data"]["team1_score"], 0);
    assert_eq!(fixture["data"]["team2_score"], 2);
    assert_eq!(fixture["data"]["winner_id"], team2.as_str());
    assert_eq!(fixture["data"]["winner_name"], "Second");
}

#[tokio::test]
async fn bracket_slots_are_fixed_once_live() {
    let league = league_for_test().await;
    let team1 = league.create_team("First", "A").await;
    let team2 = league.create_team("Second", "B").await;
    let replacement = league.create_team("Replacement", "C").await;

    let created = league
        .admin_post(
            "/elimination-matches",
            json!({ "stage": "semi", "match_number": 2, "team1_id": team1, "team2_id": team2 }),
        )
        .await;
    let match_id = data_id(created).await;

    let start = league
        .admin_post(&format!("/elimination-matches/{}/start", match_id), json!({}))
        .await;
    assert_eq!(200, start.status().as_u16());

    let swap = league
        .admin_put(
            &format!("/elimination-matches/{}", match_id),
            json!({ "team2_id": replacement }),
        )
        .await;
    assert_eq!(409, swap.status().as_u16());

    let renumber = league
        .admin_put(&format!("/elimination-matches/{}", match_id), json!({ "match_number": 3 }))
        .await;
    assert_eq!(200, renumber.status().as_u16());

    let fixture = league.get(&format!("/elimination-matches/{}", match_id)).await;
    assert_eq!(fixture["data"]["team2_id"], team2.as_str());
    assert_eq!(fixture["data"]["match_number"], 3);
    assert_eq!(fixture["data"]["status"], "live");
}

#[tokio::test]
async fn match_edits_reject_unknown_teams() {
    let league = league_for_test().await;
    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let match_id = league.create_match(&home, &away).await;

    let response = league
        .admin_put(
            &format!("/matches/{}", match_id),
            json!({ "home_team_id": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(400, response.status().as_u16());

    let fixture = league.get(&format!("/matches/{}", match_id)).await;
    assert_eq!(fixture["data"]["home_team_id"], home.as_str());
}

#[tokio::test]
async fn clock_tick_advances_only_running_matches() {
    let test_app = spawn_app().await;
    let token = create_admin_and_login(&test_app.address).await;
    let league = LeagueClient::new(&test_app.address, token);

    let home = league.create_team("Home", "A").await;
    let away = league.create_team("Away", "A").await;
    let running = league.create_match(&home, &away).await;
    let full_time = league.create_match(&away, &home).await;
    let finished = league.create_match(&home, &away).await;
    let scheduled = league.create_match(&away, &home).await;

    for match_id in [&running, &full_time] {
        let start = league.admin_post(&format!("/matches/{}/start", match_id), json!({})).await;
        assert_eq!(200, start.status().as_u16());
    }
    let set = league
        .admin_post(&format!("/matches/{}/minute", full_time), json!({ "minute": 90 }))
        .await;
    assert_eq!(200, set.status().as_u16());
    league.play_match(&finished, 0, 0).await;

    let live_matches = LiveMatchService::new(test_app.db_pool.clone(), EventPublisher::default());
    let advanced = live_matches
        .tick_live_fixtures()
        .await
        .expect("Clock tick failed");
    assert_eq!(advanced, 1);

    let minute_of = |body: serde_json::Value| body["data"]["current_minute"].clone();
    assert_eq!(minute_of(league.get(&format!("/matches/{}", running)).await), 2);
    assert_eq!(minute_of(league.get(&format!("/matches/{}", full_time)).await), 90);
    assert_eq!(league.get(&format!("/matches/{}", scheduled)).await["data"]["status"], "scheduled");
    assert_eq!(league.get(&format!("/matches/{}", finished)).await["data"]["status"], "finished");
}
