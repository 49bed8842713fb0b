pub mod error;
pub mod event_publisher;
pub mod league_admin_service;
pub mod live_match_service;
pub mod match_clock;
pub mod match_event_service;
pub mod team_stats_service;

pub use error::LeagueError;
pub use event_publisher::EventPublisher;
pub use league_admin_service::LeagueAdminService;
pub use live_match_service::LiveMatchService;
pub use match_clock::MatchClockService;
pub use match_event_service::MatchEventService;
pub use team_stats_service::TeamStatsService;
