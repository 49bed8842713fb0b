pub mod lifecycle;
pub mod standings;
pub mod team_stats;
