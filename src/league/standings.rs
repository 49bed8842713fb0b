use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::team::{Team, TeamWithStats};

/// One row of a group table. `position` is the 1-based rank.
#[derive(Debug, Clone, Serialize)]
pub struct StandingRow {
    pub position: usize,
    #[serde(flatten)]
    pub team: TeamWithStats,
}

pub type GroupStandings = BTreeMap<String, Vec<StandingRow>>;

/// Bucket teams by group and rank each bucket by points, then goal
/// difference. Teams level on both keep the order they were fetched in.
pub fn compute_standings(teams: Vec<Team>) -> GroupStandings {
    let mut groups: BTreeMap<String, Vec<TeamWithStats>> = BTreeMap::new();
    for team in teams {
        groups
            .entry(team.group_name.clone())
            .or_default()
            .push(TeamWithStats::from(team));
    }

    groups
        .into_iter()
        .map(|(group, mut bucket)| {
            // `sort_by` is stable, which is what keeps unresolved ties in fetch order
            bucket.sort_by(|a, b| {
                b.points
                    .cmp(&a.points)
                    .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            });
            let rows = bucket
                .into_iter()
                .enumerate()
                .map(|(index, team)| StandingRow { position: index + 1, team })
                .collect();
            (group, rows)
        })
        .collect()
}
