pub mod elimination_queries;
pub mod fixture_queries;
pub mod match_event_queries;
pub mod match_queries;
pub mod player_queries;
pub mod team_queries;
