/// Environment-driven settings.
pub mod config;
