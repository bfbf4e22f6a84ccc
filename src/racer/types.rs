//! Lane racer data structures.
//!
//! The player steers a car along the bottom of a fixed-width lane while
//! obstacles fall from the top. Every surviving tick scores one point.

use crate::core::config::RaceConfig;

/// Session lifecycle. Only the Start/Restart action leaves `NotStarted`
/// or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// UI-agnostic input commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceInput {
    SteerLeft,
    SteerRight,
    /// Start a fresh session, or restart after a crash.
    Start,
}

/// The player's car. Only the horizontal position moves; the vertical band
/// is fixed by `RaceConfig::car_top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCar {
    /// Left edge, always within `0..=field_width - car_width`.
    pub x: i32,
}

/// A falling obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Unique within the session's lifetime of the generator.
    pub id: u64,
    /// Left edge, fixed at spawn.
    pub x: f64,
    /// Top edge, grows every tick.
    pub y: f64,
}

/// Something a tick did, for the driver to log or react to.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceEvent {
    Spawned { id: u64, x: f64 },
    /// Obstacle fell past the bottom of the field and was removed.
    Cleared { id: u64 },
    /// Obstacle hit the car; the session is over.
    Crashed { id: u64, score: u64 },
}

/// Monotonic obstacle id source. Never reused, even across restarts.
#[derive(Debug, Clone, Default)]
pub struct ObstacleIdGen {
    next: u64,
}

impl ObstacleIdGen {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete state of one play-through.
#[derive(Debug, Clone)]
pub struct RaceSession {
    pub phase: SessionPhase,
    pub score: u64,
    pub car: PlayerCar,
    /// Active obstacles in creation order.
    pub obstacles: Vec<Obstacle>,
    pub ids: ObstacleIdGen,
    /// Ticks run in the current session.
    pub tick_count: u64,
}

impl RaceSession {
    /// A session waiting for the first Start.
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            score: 0,
            car: PlayerCar { x: config.start_x },
            obstacles: Vec::new(),
            ids: ObstacleIdGen::default(),
            tick_count: 0,
        }
    }

    /// True once any session has been started (stays true after a crash).
    pub fn is_started(&self) -> bool {
        self.phase != SessionPhase::NotStarted
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Add an obstacle at the top of the field and return its id.
    pub fn spawn_obstacle(&mut self, x: f64, config: &RaceConfig) -> u64 {
        let id = self.ids.next_id();
        self.obstacles.push(Obstacle {
            id,
            x,
            y: config.spawn_offset,
        });
        id
    }
}
