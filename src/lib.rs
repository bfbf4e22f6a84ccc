//! Lane Racer - Terminal Car Racing Game Library
//!
//! Steer a car along a fixed-width lane and dodge falling obstacles. This
//! module exposes the game logic for testing and for the binary.

pub mod build_info;
pub mod core;
pub mod input;
pub mod racer;
pub mod ui;

pub use crate::core::RaceConfig;
pub use racer::{RaceController, RaceInput, RaceSession, RaceView, SessionPhase};
