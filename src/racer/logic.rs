//! Lane racer game logic: steering, spawning, motion, collision, scoring.

use super::types::*;
use crate::core::config::RaceConfig;
use rand::Rng;

/// Reset everything and enter `Running`. Only valid from `NotStarted` or
/// `GameOver`; returns false (and changes nothing) while already running.
pub fn start_session(session: &mut RaceSession, config: &RaceConfig) -> bool {
    if session.is_running() {
        return false;
    }

    session.phase = SessionPhase::Running;
    session.score = 0;
    session.obstacles.clear();
    session.car.x = config.start_x;
    session.tick_count = 0;
    true
}

/// Move the car one step left or right, clamped to the lane. Ignored unless
/// the session is running. Returns true if the car moved.
pub fn steer(session: &mut RaceSession, input: RaceInput, config: &RaceConfig) -> bool {
    if !session.is_running() {
        return false;
    }

    let old_x = session.car.x;
    let new_x = match input {
        RaceInput::SteerLeft => old_x - config.step_size,
        RaceInput::SteerRight => old_x + config.step_size,
        RaceInput::Start => return false,
    };
    session.car.x = new_x.clamp(0, config.max_car_x());
    session.car.x != old_x
}

/// One tick: spawn, advance, prune, collide, score, in that order.
///
/// Does nothing unless the session is running. The tick that crashes still
/// scores.
pub fn step_session<R: Rng>(
    session: &mut RaceSession,
    config: &RaceConfig,
    rng: &mut R,
) -> Vec<RaceEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }

    session.tick_count += 1;

    // 1. Spawn
    if rng.gen_bool(config.spawn_probability) {
        let x = rng.gen::<f64>() * config.max_obstacle_x();
        let id = session.spawn_obstacle(x, config);
        events.push(RaceEvent::Spawned { id, x });
    }

    // 2. Advance
    for obstacle in &mut session.obstacles {
        obstacle.y += config.speed;
    }

    // 3. Prune everything that left the field
    session.obstacles.retain(|o| {
        let keep = o.y < config.field_height;
        if !keep {
            events.push(RaceEvent::Cleared { id: o.id });
        }
        keep
    });

    // 4. Collision
    let crashed = session
        .obstacles
        .iter()
        .find(|o| collides(o, &session.car, config))
        .map(|o| o.id);

    // 5. Score
    session.score += 1;

    if let Some(id) = crashed {
        session.phase = SessionPhase::GameOver;
        events.push(RaceEvent::Crashed {
            id,
            score: session.score,
        });
    }

    events
}

/// Axis-aligned overlap between an obstacle and the car's band
/// `[car_top, field_height]`.
///
/// Vertical edges touching count as a hit; horizontal edges touching do not.
/// Checked against obstacles still in the field, so only the band top needs
/// testing.
pub fn collides(obstacle: &Obstacle, car: &PlayerCar, config: &RaceConfig) -> bool {
    let vertical = obstacle.y + config.obstacle_height >= config.car_top;
    let car_left = car.x as f64;
    let car_right = (car.x + config.car_width) as f64;
    let horizontal = obstacle.x < car_right && obstacle.x + config.obstacle_width > car_left;
    vertical && horizontal
}
