//! Race configuration: the static constant block, optionally overridden by a
//! JSON file in the platform config directory.

use super::constants::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunable constants for one race. `Default` reproduces the classic game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub field_width: i32,
    /// Obstacles at or beyond this vertical position leave the field.
    pub field_height: f64,
    pub car_width: i32,
    /// Top edge of the car's fixed vertical band (band ends at `field_height`).
    pub car_top: f64,
    pub obstacle_width: f64,
    pub obstacle_height: f64,
    /// Vertical position assigned to a freshly spawned obstacle.
    pub spawn_offset: f64,
    /// Vertical advance per tick.
    pub speed: f64,
    pub spawn_probability: f64,
    pub tick_period_ms: u64,
    pub step_size: i32,
    /// Car position at the start of every session.
    pub start_x: i32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            car_width: CAR_WIDTH,
            car_top: CAR_TOP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            spawn_offset: SPAWN_OFFSET,
            speed: OBSTACLE_SPEED,
            spawn_probability: SPAWN_PROBABILITY,
            tick_period_ms: TICK_INTERVAL_MS,
            step_size: STEP_SIZE,
            start_x: (FIELD_WIDTH - CAR_WIDTH) / 2,
        }
    }
}

impl RaceConfig {
    /// Rightmost legal car position.
    pub fn max_car_x(&self) -> i32 {
        self.field_width - self.car_width
    }

    /// Rightmost legal obstacle spawn position.
    pub fn max_obstacle_x(&self) -> f64 {
        self.field_width as f64 - self.obstacle_width
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Check that the constants describe a playable field.
    pub fn validate(&self) -> io::Result<()> {
        let fail = |msg: String| Err(io::Error::new(io::ErrorKind::InvalidInput, msg));

        if self.field_width <= 0 || self.field_height <= 0.0 {
            return fail(format!(
                "field must have positive size, got {}x{}",
                self.field_width, self.field_height
            ));
        }
        if self.car_width <= 0 || self.car_width > self.field_width {
            return fail(format!(
                "car_width {} must be within 1..={}",
                self.car_width, self.field_width
            ));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_width > self.field_width as f64 {
            return fail(format!(
                "obstacle_width {} must be within (0, {}]",
                self.obstacle_width, self.field_width
            ));
        }
        if self.obstacle_height <= 0.0 || self.obstacle_height > self.field_height {
            return fail(format!(
                "obstacle_height {} must be within (0, {}]",
                self.obstacle_height, self.field_height
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return fail(format!(
                "spawn_probability {} must be within [0, 1]",
                self.spawn_probability
            ));
        }
        if self.speed <= 0.0 {
            return fail(format!("speed {} must be positive", self.speed));
        }
        if self.tick_period_ms == 0 {
            return fail("tick_period_ms must be positive".to_string());
        }
        if self.step_size <= 0 {
            return fail(format!("step_size {} must be positive", self.step_size));
        }
        if self.start_x < 0 || self.start_x > self.max_car_x() {
            return fail(format!(
                "start_x {} must be within 0..={}",
                self.start_x,
                self.max_car_x()
            ));
        }
        if self.car_top < 0.0 || self.car_top > self.field_height {
            return fail(format!(
                "car_top {} must be within [0, {}]",
                self.car_top, self.field_height
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let config: RaceConfig = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, else from the per-user config file if it
    /// exists, else defaults. Returns the source path alongside the config.
    pub fn load_or_default(path: Option<&Path>) -> io::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = path {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        match default_config_path() {
            Some(path) if path.exists() => Ok((Self::load(&path)?, Some(path))),
            _ => Ok((Self::default(), None)),
        }
    }
}

/// Per-user config file location, e.g. `~/.config/lane-racer/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_DIR_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_config_path() -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "lane_racer_config_test_{}_{}.json",
            std::process::id(),
            id
        ))
    }

    #[test]
    fn test_default_matches_classic_constants() {
        let config = RaceConfig::default();
        assert_eq!(config.field_width, 300);
        assert_eq!(config.car_width, 40);
        assert!((config.obstacle_width - 40.0).abs() < f64::EPSILON);
        assert!((config.speed - 2.0).abs() < f64::EPSILON);
        assert!((config.spawn_probability - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.tick_period_ms, 16);
        assert_eq!(config.step_size, 10);
        assert_eq!(config.start_x, 130);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_bounds() {
        let config = RaceConfig::default();
        assert_eq!(config.max_car_x(), 260);
        assert!((config.max_obstacle_x() - 260.0).abs() < f64::EPSILON);
        assert_eq!(config.tick_period(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RaceConfig::from_json(r#"{ "speed": 3.5, "step_size": 20 }"#)
            .expect("partial config should parse");
        assert!((config.speed - 3.5).abs() < f64::EPSILON);
        assert_eq!(config.step_size, 20);
        assert_eq!(config.field_width, 300);
        assert_eq!(config.tick_period_ms, 16);
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = RaceConfig::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_validation_rejects_bad_probability() {
        let err = RaceConfig::from_json(r#"{ "spawn_probability": 1.5 }"#).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validation_rejects_car_wider_than_field() {
        let config = RaceConfig {
            car_width: 400,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_start_outside_lane() {
        let config = RaceConfig {
            start_x: 261,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RaceConfig {
            start_x: -1,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_obstacle_taller_than_field() {
        let err = RaceConfig::from_json(
            r#"{ "field_height": 1.0, "car_top": 0.5, "obstacle_height": 1e12 }"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validation_rejects_zero_tick_period() {
        let config = RaceConfig {
            tick_period_ms: 0,
            ..RaceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config_path();
        fs::write(&path, r#"{ "spawn_probability": 0.5 }"#).expect("write temp config");

        let (config, source) =
            RaceConfig::load_or_default(Some(&path)).expect("config should load");
        assert!((config.spawn_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(source.as_deref(), Some(path.as_path()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = temp_config_path();
        let err = RaceConfig::load_or_default(Some(&path)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_serialize_roundtrip_preserves_config() {
        let config = RaceConfig {
            speed: 4.0,
            ..RaceConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(RaceConfig::from_json(&json).expect("parse"), config);
    }
}
