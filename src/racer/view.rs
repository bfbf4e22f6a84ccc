//! Read-only snapshot of a session for the presentation layer.

use super::types::RaceSession;
use crate::core::config::RaceConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleView {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

/// Everything a renderer needs, and nothing it could mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceView {
    pub player_x: i32,
    /// In creation order.
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub started: bool,
    pub game_over: bool,

    // Geometry
    pub field_width: i32,
    pub field_height: f64,
    pub car_width: i32,
    pub car_top: f64,
    pub obstacle_width: f64,
    pub obstacle_height: f64,
}

impl RaceView {
    pub fn is_running(&self) -> bool {
        self.started && !self.game_over
    }
}

/// Project a session into a view.
pub fn render(session: &RaceSession, config: &RaceConfig) -> RaceView {
    RaceView {
        player_x: session.car.x,
        obstacles: session
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                x: o.x,
                y: o.y,
            })
            .collect(),
        score: session.score,
        started: session.is_started(),
        game_over: session.is_game_over(),
        field_width: config.field_width,
        field_height: config.field_height,
        car_width: config.car_width,
        car_top: config.car_top,
        obstacle_width: config.obstacle_width,
        obstacle_height: config.obstacle_height,
    }
}
