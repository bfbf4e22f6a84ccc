//! Configuration, constants, and process-level plumbing.

pub mod config;
pub mod constants;
pub mod logging;

pub use config::RaceConfig;
pub use constants::*;
