//! Session owner: ties the game state to its tick scheduler and random source.

use super::logic::{start_session, steer, step_session};
use super::scheduler::TickScheduler;
use super::types::*;
use super::view::{render, RaceView};
use crate::core::config::RaceConfig;
use rand::Rng;
use std::io;

/// Drives one lane racer session at a time.
///
/// The scheduler runs only while the session is `Running`; it is started
/// by Start/Restart and stopped on a crash or when the controller is
/// dropped. Directional input is only accepted while it runs.
pub struct RaceController<R: Rng> {
    session: RaceSession,
    config: RaceConfig,
    scheduler: TickScheduler,
    rng: R,
}

impl<R: Rng> RaceController<R> {
    /// Build a controller for a validated config.
    pub fn new(config: RaceConfig, rng: R) -> io::Result<Self> {
        config.validate()?;
        let session = RaceSession::new(&config);
        let scheduler = TickScheduler::new(config.tick_period_ms);
        Ok(Self {
            session,
            config,
            scheduler,
            rng,
        })
    }

    pub fn session(&self) -> &RaceSession {
        &self.session
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Start/Restart action. Returns false if a session is already running.
    pub fn start(&mut self) -> bool {
        let restarting = self.session.is_game_over();
        if !start_session(&mut self.session, &self.config) {
            return false;
        }
        self.scheduler.start();
        if restarting {
            log::info!("Session restarted");
        } else {
            log::info!("Session started");
        }
        log::debug!("Tick scheduler started ({:?})", self.scheduler.period());
        true
    }

    /// Route a command. Returns true if visible state changed.
    pub fn handle_input(&mut self, input: RaceInput) -> bool {
        match input {
            RaceInput::Start => self.start(),
            RaceInput::SteerLeft | RaceInput::SteerRight => {
                if !self.scheduler.is_active() {
                    return false;
                }
                steer(&mut self.session, input, &self.config)
            }
        }
    }

    /// Feed elapsed wall time. Runs at most one tick and returns its events.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<RaceEvent> {
        if !self.scheduler.advance(dt_ms) {
            return Vec::new();
        }

        let events = step_session(&mut self.session, &self.config, &mut self.rng);
        for event in &events {
            match event {
                RaceEvent::Spawned { id, x } => {
                    log::trace!("Obstacle {} spawned at x={:.1}", id, x)
                }
                RaceEvent::Cleared { id } => log::trace!("Obstacle {} cleared", id),
                RaceEvent::Crashed { id, score } => {
                    log::info!("Game over: hit obstacle {}, final score {}", id, score)
                }
            }
        }

        if !self.session.is_running() {
            self.scheduler.stop();
            log::debug!("Tick scheduler stopped");
        }
        events
    }

    /// Run one tick immediately, bypassing wall time. No-op unless running.
    pub fn tick(&mut self) -> Vec<RaceEvent> {
        self.advance(self.config.tick_period_ms)
    }

    pub fn view(&self) -> RaceView {
        render(&self.session, &self.config)
    }

    /// Cancel any pending ticks. The session itself is left as is, so a
    /// running session stays frozen until the next Start.
    pub fn shutdown(&mut self) {
        if self.scheduler.is_active() {
            self.scheduler.stop();
            log::debug!("Tick scheduler cancelled on teardown");
        }
    }
}

impl<R: Rng> Drop for RaceController<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn controller(spawn_probability: f64) -> RaceController<ChaCha8Rng> {
        let config = RaceConfig {
            spawn_probability,
            ..RaceConfig::default()
        };
        RaceController::new(config, ChaCha8Rng::seed_from_u64(7)).expect("valid config")
    }

    #[test]
    fn test_no_ticks_before_start() {
        let mut ctl = controller(1.0);
        assert!(!ctl.scheduler().is_active());
        assert!(ctl.advance(1000).is_empty());
        assert_eq!(ctl.session().score, 0);
        assert!(ctl.session().obstacles.is_empty());
    }

    #[test]
    fn test_steering_ignored_before_start() {
        let mut ctl = controller(0.0);
        assert!(!ctl.handle_input(RaceInput::SteerLeft));
        assert_eq!(ctl.view().player_x, ctl.config().start_x);
    }

    #[test]
    fn test_start_activates_scheduler() {
        let mut ctl = controller(0.0);
        assert!(ctl.handle_input(RaceInput::Start));
        assert!(ctl.scheduler().is_active());
        assert!(ctl.view().is_running());

        // Second start while running is ignored
        assert!(!ctl.handle_input(RaceInput::Start));
    }

    #[test]
    fn test_advance_scores_per_period() {
        let mut ctl = controller(0.0);
        ctl.start();

        ctl.advance(8);
        assert_eq!(ctl.session().score, 0);
        ctl.advance(8);
        assert_eq!(ctl.session().score, 1);
        for _ in 0..9 {
            ctl.tick();
        }
        assert_eq!(ctl.session().score, 10);
    }

    #[test]
    fn test_crash_stops_scheduler() {
        let mut ctl = controller(0.0);
        ctl.start();
        let car_x = ctl.session().car.x as f64;
        ctl.session.obstacles.push(Obstacle {
            id: 99,
            x: car_x,
            y: 360.0,
        });

        let events = ctl.tick();
        assert_eq!(events, vec![RaceEvent::Crashed { id: 99, score: 1 }]);
        assert!(!ctl.scheduler().is_active());
        assert!(ctl.view().game_over);

        assert!(ctl.tick().is_empty());
        assert!(!ctl.handle_input(RaceInput::SteerRight));
        assert_eq!(ctl.session().score, 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RaceConfig {
            spawn_probability: 1.5,
            ..RaceConfig::default()
        };
        let err = RaceController::new(config, ChaCha8Rng::seed_from_u64(7))
            .err()
            .expect("out-of-range probability must be rejected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_shutdown_cancels_running_session_ticks() {
        let mut ctl = controller(0.0);
        ctl.start();
        ctl.tick();
        assert!(ctl.scheduler().is_active());

        ctl.shutdown();
        assert!(!ctl.scheduler().is_active());
        assert!(ctl.advance(1000).is_empty());
        assert!(!ctl.handle_input(RaceInput::SteerLeft));
        assert_eq!(ctl.session().score, 1);

        // Idempotent, and dropping afterwards is harmless
        ctl.shutdown();
        drop(ctl);
    }
}
