use chrono::Utc;
use uuid::Uuid;

use matchday_backend::league::standings::compute_standings;
use matchday_backend::models::team::Team;

fn team(name: &str, group: &str, record: (i32, i32, i32), goals: (i32, i32)) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: name.to_string(),
        logo_url: None,
        group_name: group.to_string(),
        wins: record.0,
        draws: record.1,
        losses: record.2,
        goals_for: goals.0,
        goals_against: goals.1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn names(rows: &[matchday_backend::league::standings::StandingRow]) -> Vec<&str> {
    rows.iter().map(|row| row.team.team.name.as_str()).collect()
}

#[test]
fn higher_points_rank_first() {
    let standings = compute_standings(vec![
        team("Y", "A", (2, 2, 1), (8, 5)),
        team("X", "A", (3, 1, 1), (10, 4)),
    ]);

    let group_a = &standings["A"];
    assert_eq!(names(group_a), vec!["X", "Y"]);
    assert_eq!(group_a[0].team.points, 10);
    assert_eq!(group_a[1].team.points, 8);
    assert_eq!(group_a[0].position, 1);
    assert_eq!(group_a[1].position, 2);
}

#[test]
fn derived_fields_follow_counters() {
    let standings = compute_standings(vec![team("X", "B", (4, 3, 2), (11, 13))]);
    let row = &standings["B"][0].team;

    assert_eq!(row.matches_played, 9);
    assert_eq!(row.points, 15);
    assert_eq!(row.goal_difference, -2);
}

#[test]
fn goal_difference_breaks_level_points() {
    let standings = compute_standings(vec![
        team("Low", "C", (1, 1, 0), (2, 2)),
        team("High", "C", (1, 1, 0), (5, 1)),
    ]);
    assert_eq!(names(&standings["C"]), vec!["High", "Low"]);
}

#[test]
fn full_ties_keep_fetch_order() {
    let standings = compute_standings(vec![
        team("First", "D", (1, 0, 1), (3, 3)),
        team("Second", "D", (1, 0, 1), (4, 4)),
        team("Third", "D", (1, 0, 1), (2, 2)),
    ]);
    assert_eq!(names(&standings["D"]), vec!["First", "Second", "Third"]);
}

#[test]
fn adjacent_rows_are_ordered() {
    let teams = vec![
        team("a", "A", (0, 3, 2), (3, 6)),
        team("b", "A", (3, 0, 2), (7, 7)),
        team("c", "A", (3, 0, 2), (9, 4)),
        team("d", "A", (1, 1, 3), (2, 9)),
        team("e", "A", (5, 0, 0), (12, 1)),
    ];
    let standings = compute_standings(teams);

    for pair in standings["A"].windows(2) {
        let (a, b) = (&pair[0].team, &pair[1].team);
        assert!(a.points >= b.points);
        if a.points == b.points {
            assert!(a.goal_difference >= b.goal_difference);
        }
    }
}

#[test]
fn teams_are_split_by_group() {
    let standings = compute_standings(vec![
        team("A1", "A", (1, 0, 0), (1, 0)),
        team("B1", "B", (0, 0, 1), (0, 1)),
        team("A2", "A", (0, 0, 1), (0, 1)),
    ]);

    assert_eq!(standings.len(), 2);
    assert_eq!(names(&standings["A"]), vec!["A1", "A2"]);
    assert_eq!(names(&standings["B"]), vec!["B1"]);
}

#[test]
fn unknown_group_forms_its_own_bucket() {
    let standings = compute_standings(vec![team("Stray", "Z", (0, 0, 0), (0, 0))]);
    assert_eq!(names(&standings["Z"]), vec!["Stray"]);
}

#[test]
fn empty_input_yields_empty_table() {
    assert!(compute_standings(Vec::new()).is_empty());
}
