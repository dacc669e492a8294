//! Per-frame simulation tick
//!
//! Core game loop step. Order within a tick:
//! spawn, rockets (with ground hits), missiles/blasts, blast-vs-rocket,
//! particles, win/loss.

use glam::Vec2;

use super::collision::{GroundHit, caught_in_blast, resolve_ground_hit};
use super::particles::{spawn_intercept_burst, update_particles};
use super::spawn::run_schedule;
use super::state::{GameEvent, GameState, GameStatus, Missile, Rocket};
use crate::consts::*;
use crate::{distance, unit_direction};

/// Advance the game by one tick at wall-clock time `now_ms`
///
/// Outside `Playing` this does nothing.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if !state.is_playing() {
        return;
    }
    state.time_ticks += 1;

    run_schedule(state, now_ms);

    advance_rockets(state);
    advance_missiles(state);
    resolve_intercepts(state);
    update_particles(state);
    update_status(state);
}

/// Outcome of moving a rocket one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RocketStep {
    Flying(Vec2),
    Landed,
}

/// Move a rocket one step along its line
pub fn step_rocket(rocket: &Rocket) -> RocketStep {
    let next = rocket.current + unit_direction(rocket.start, rocket.target) * rocket.speed;
    if next.y >= rocket.target.y {
        RocketStep::Landed
    } else {
        RocketStep::Flying(next)
    }
}

/// Move a flying missile one step, snapping onto its target when within one step
pub fn step_missile(missile: &mut Missile) {
    let next = missile.current + unit_direction(missile.start, missile.target) * missile.speed;
    if distance(next, missile.target) < missile.speed {
        missile.current = missile.target;
        missile.is_exploding = true;
    } else {
        missile.current = next;
    }
}

/// Grow a blast one step; marks the missile finished once fully grown
pub fn grow_blast(missile: &mut Missile) {
    missile.explosion_radius =
        (missile.explosion_radius + missile.explosion_speed).min(missile.max_explosion_radius);
    if missile.explosion_radius >= missile.max_explosion_radius {
        missile.is_finished = true;
    }
}

fn advance_rockets(state: &mut GameState) {
    for rocket in &mut state.rockets {
        match step_rocket(rocket) {
            RocketStep::Flying(next) => rocket.current = next,
            RocketStep::Landed => {
                rocket.is_destroyed = true;
                match resolve_ground_hit(rocket.target.x, &mut state.cities, &mut state.batteries) {
                    Some(GroundHit::City(city_id)) => {
                        log::info!("City {} destroyed", city_id);
                        state.events.push(GameEvent::CityDestroyed { city_id });
                    }
                    Some(GroundHit::Battery(battery_id)) => {
                        log::info!("Battery {} destroyed", battery_id);
                        state.events.push(GameEvent::BatteryDestroyed { battery_id });
                    }
                    None => {}
                }
            }
        }
    }
    state.rockets.retain(|r| !r.is_destroyed);
}

fn advance_missiles(state: &mut GameState) {
    // Blasts that finished last tick are gone now
    state.missiles.retain(|m| !m.is_finished);

    for missile in &mut state.missiles {
        if missile.is_exploding {
            grow_blast(missile);
        } else {
            step_missile(missile);
        }
    }
}

fn resolve_intercepts(state: &mut GameState) {
    let mut hits: Vec<(u32, Vec2)> = Vec::new();
    for rocket in &mut state.rockets {
        if caught_in_blast(rocket.current, &state.missiles) {
            rocket.is_destroyed = true;
            hits.push((rocket.id, rocket.current));
        }
    }
    state.rockets.retain(|r| !r.is_destroyed);

    for (rocket_id, pos) in hits {
        state.score += SCORE_PER_ROCKET;
        spawn_intercept_burst(state, pos);
        state.events.push(GameEvent::RocketIntercepted { rocket_id, pos });
    }
}

fn update_status(state: &mut GameState) {
    let next = if state.score >= WIN_SCORE {
        GameStatus::Won
    } else if state.batteries.iter().all(|b| b.is_destroyed) {
        GameStatus::Lost
    } else {
        return;
    };

    log::info!(
        "Game over: {:?} with score {} after {} ticks",
        next,
        state.score,
        state.time_ticks
    );
    state.events.push(GameEvent::StatusChanged {
        from: state.status,
        to: next,
    });
    state.status = next;
}
