#![allow(dead_code)]

pub mod league_helpers;
pub mod utils;
