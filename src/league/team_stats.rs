use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::league::lifecycle::{Outcome, Score};
use crate::models::team::Team;

/// Emitted exactly once, when a live regular match is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFinalized {
    pub match_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub final_score: Score,
}

/// The stored counters of a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
}

impl TeamRecord {
    pub fn record(&mut self, scored: i32, conceded: i32) {
        if scored > conceded {
            self.wins += 1;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        self.goals_for += scored;
        self.goals_against += conceded;
    }
}

impl From<&Team> for TeamRecord {
    fn from(team: &Team) -> Self {
        Self {
            wins: team.wins,
            draws: team.draws,
            losses: team.losses,
            goals_for: team.goals_for,
            goals_against: team.goals_against,
        }
    }
}

impl MatchFinalized {
    pub fn outcome(&self) -> Outcome {
        self.final_score.outcome()
    }

    pub fn apply(&self, home: &mut TeamRecord, away: &mut TeamRecord) {
        home.record(self.final_score.home, self.final_score.away);
        away.record(self.final_score.away, self.final_score.home);
    }
}

/// Rebuild every team's counters from a list of finished results.
/// Teams without any finished match get an all-zero record.
pub fn records_from_history(
    team_ids: impl IntoIterator<Item = Uuid>,
    results: &[MatchFinalized],
) -> HashMap<Uuid, TeamRecord> {
    let mut records: HashMap<Uuid, TeamRecord> = team_ids
        .into_iter()
        .map(|id| (id, TeamRecord::default()))
        .collect();

    for result in results {
        let mut home = records.get(&result.home_team_id).copied().unwrap_or_default();
        let mut away = records.get(&result.away_team_id).copied().unwrap_or_default();
        result.apply(&mut home, &mut away);
        records.insert(result.home_team_id, home);
        records.insert(result.away_team_id, away);
    }

    records
}
