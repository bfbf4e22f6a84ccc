//! Lane racer: dodge falling obstacles, score one point per surviving tick.

pub mod controller;
pub mod logic;
pub mod scheduler;
pub mod types;
pub mod view;

pub use controller::RaceController;
pub use logic::*;
pub use scheduler::{FrameClock, TickScheduler};
pub use types::*;
pub use view::{render, ObstacleView, RaceView};
