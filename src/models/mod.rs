pub mod auth;
pub mod common;
pub mod elimination;
pub mod fixture;
pub mod league_events;
pub mod match_event;
pub mod player;
pub mod team;
pub mod user;
