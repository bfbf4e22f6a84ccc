// Field geometry (field units, origin top-left, y grows downward)
pub const FIELD_WIDTH: i32 = 300;
pub const FIELD_HEIGHT: f64 = 400.0;

// Player car
pub const CAR_WIDTH: i32 = 40;
pub const CAR_TOP: f64 = 350.0;
pub const STEP_SIZE: i32 = 10;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 40.0;
pub const OBSTACLE_HEIGHT: f64 = 20.0;
pub const SPAWN_OFFSET: f64 = -20.0;
pub const OBSTACLE_SPEED: f64 = 2.0;
pub const SPAWN_PROBABILITY: f64 = 0.02;

// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 16;

// Files under the platform config/data directories
pub const APP_DIR_NAME: &str = "lane-racer";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "lane-racer.log";
