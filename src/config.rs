pub mod jwt;
pub mod league;
pub mod redis;
pub mod settings;
