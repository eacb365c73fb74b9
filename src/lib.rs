pub mod api;
pub mod args;
pub mod beatmap;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod utils;
