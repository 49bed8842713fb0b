use reqwest::{Client, Response};
use serde_json::{json, Value};

/// Authenticated client for the `/admin` surface plus plain reads.
pub struct LeagueClient {
    pub address: String,
    pub token: String,
    pub client: Client,
}

impl LeagueClient {
    pub fn new(address: &str, token: String) -> Self {
        Self {
            address: address.to_string(),
            token,
            client: Client::new(),
        }
    }

    pub async fn admin_post(&self, path: &str, body: Value) -> Response {
        self.client
            .post(format!("{}/admin{}", self.address, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn admin_put(&self, path: &str, body: Value) -> Response {
        self.client
            .put(format!("{}/admin{}", self.address, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn admin_delete(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}/admin{}", self.address, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> Value {
        let response = self
            .client
            .get(format!("{}/league{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success(), "GET {} returned {}", path, response.status());
        response.json().await.expect("Failed to parse response")
    }

    pub async fn create_team(&self, name: &str, group: &str) -> String {
        let response = self
            .admin_post("/teams", json!({ "name": name, "group_name": group }))
            .await;
        assert_eq!(201, response.status().as_u16());
        data_id(response).await
    }

    pub async fn create_player(&self, name: &str, team_id: &str) -> String {
        let response = self
            .admin_post("/players", json!({ "name": name, "team_id": team_id }))
            .await;
        assert_eq!(201, response.status().as_u16());
        data_id(response).await
    }

    pub async fn create_match(&self, home_team_id: &str, away_team_id: &str) -> String {
        let response = self
            .admin_post(
                "/matches",
                json!({
                    "date": "2025-06-01",
                    "time": "18:00:00",
                    "home_team_id": home_team_id,
                    "away_team_id": away_team_id
                }),
            )
            .await;
        assert_eq!(201, response.status().as_u16());
        data_id(response).await
    }

    /// Start a match, apply the given goals and finish it.
    pub async fn play_match(&self, match_id: &str, home_goals: u32, away_goals: u32) {
        let start = self.admin_post(&format!("/matches/{}/start", match_id), json!({})).await;
        assert_eq!(200, start.status().as_u16());

        for (side, goals) in [("home", home_goals), ("away", away_goals)] {
            for _ in 0..goals {
                let response = self
                    .admin_post(
                        &format!("/matches/{}/score", match_id),
                        json!({ "side": side, "delta": 1 }),
                    )
                    .await;
                assert_eq!(200, response.status().as_u16());
            }
        }

        let finish = self.admin_post(&format!("/matches/{}/finish", match_id), json!({})).await;
        assert_eq!(200, finish.status().as_u16());
    }

    pub async fn team(&self, team_id: &str) -> Value {
        self.get(&format!("/teams/{}", team_id)).await["data"].clone()
    }
}

pub async fn data_id(response: Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_str().expect("No id in response").to_string()
}
