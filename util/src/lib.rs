pub mod config;
pub mod languages;
