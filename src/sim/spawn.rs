//! Rocket spawning
//!
//! Rockets drop from a random point along the top edge toward a random
//! surviving city or battery.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Rocket};
use crate::consts::*;
use crate::spawn_interval_ms;

/// Ground points rockets may currently aim at (cities first, then batteries)
pub fn eligible_targets(state: &GameState) -> Vec<Vec2> {
    let cities = state
        .cities
        .iter()
        .filter(|c| !c.is_destroyed)
        .map(|c| Vec2::new(c.x, ROCKET_TARGET_Y));
    let batteries = state
        .batteries
        .iter()
        .filter(|b| !b.is_destroyed)
        .map(|b| Vec2::new(b.x, ROCKET_TARGET_Y));
    cities.chain(batteries).collect()
}

/// Spawn one rocket. Returns its id, or `None` when nothing is left to hit.
pub fn spawn_rocket(state: &mut GameState) -> Option<u32> {
    let targets = eligible_targets(state);
    if targets.is_empty() {
        return None;
    }

    let start_x = state.rng.random::<f32>() * GAME_WIDTH;
    let target = targets[state.rng.random_range(0..targets.len())];
    let speed = ROCKET_SPEED_MIN + state.rng.random::<f32>() * (ROCKET_SPEED_MAX - ROCKET_SPEED_MIN);

    let id = state.next_entity_id();
    state
        .rockets
        .push(Rocket::new(id, Vec2::new(start_x, 0.0), target, speed));
    state.events.push(GameEvent::RocketSpawned {
        rocket_id: id,
        target_x: target.x,
    });
    log::debug!("Rocket {} -> x={:.0} at {:.2}/tick", id, target.x, speed);
    Some(id)
}

/// Run the spawn schedule for this tick: the post-restart opener, then the score-based cadence
pub fn run_schedule(state: &mut GameState, now_ms: f64) {
    if let Some(at) = state.first_spawn_at_ms {
        if now_ms >= at {
            state.first_spawn_at_ms = None;
            spawn_rocket(state);
        }
    }

    let interval = spawn_interval_ms(state.score);
    if now_ms - state.last_spawn_ms > interval {
        spawn_rocket(state);
        state.last_spawn_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_targets_live_structures_only() {
        let mut state = GameState::new(42);
        state.restart(0.0);
        for c in &mut state.cities {
            c.is_destroyed = true;
        }
        state.batteries[0].is_destroyed = true;
        state.batteries[2].is_destroyed = true;

        for _ in 0..20 {
            spawn_rocket(&mut state);
        }
        assert_eq!(state.rockets.len(), 20);
        for r in &state.rockets {
            assert_eq!(r.target, Vec2::new(400.0, ROCKET_TARGET_Y));
            assert_eq!(r.start.y, 0.0);
            assert!(r.start.x >= 0.0 && r.start.x < GAME_WIDTH);
            assert!(r.speed >= ROCKET_SPEED_MIN && r.speed <= ROCKET_SPEED_MAX);
        }
    }

    #[test]
    fn test_spawn_picks_cities_and_batteries() {
        let mut state = GameState::new(2024);
        state.restart(0.0);
        for _ in 0..200 {
            spawn_rocket(&mut state);
        }

        let city_xs: Vec<f32> = state.cities.iter().map(|c| c.x).collect();
        let battery_xs: Vec<f32> = state.batteries.iter().map(|b| b.x).collect();
        let at_city = state
            .rockets
            .iter()
            .filter(|r| city_xs.contains(&r.target.x))
            .count();
        let at_battery = state
            .rockets
            .iter()
            .filter(|r| battery_xs.contains(&r.target.x))
            .count();

        assert!(at_city > 0, "no rocket aimed at a city");
        assert!(at_battery > 0, "no rocket aimed at a battery");
        assert_eq!(at_city + at_battery, state.rockets.len());
        // Every structure is reachable with nine equally likely targets
        for x in city_xs.iter().chain(&battery_xs) {
            assert!(state.rockets.iter().any(|r| r.target.x == *x), "x={} never targeted", x);
        }
    }

    #[test]
    fn test_spawn_with_no_targets_is_noop() {
        let mut state = GameState::new(42);
        state.restart(0.0);
        state.cities.iter_mut().for_each(|c| c.is_destroyed = true);
        state.batteries.iter_mut().for_each(|b| b.is_destroyed = true);
        assert_eq!(spawn_rocket(&mut state), None);
        assert!(state.rockets.is_empty());
    }

    #[test]
    fn test_first_spawn_shortly_after_restart() {
        let mut state = GameState::new(1);
        state.restart(1000.0);
        state.drain_events();

        run_schedule(&mut state, 1050.0);
        assert!(state.rockets.is_empty());

        run_schedule(&mut state, 1100.0);
        assert_eq!(state.rockets.len(), 1);
        assert_eq!(state.first_spawn_at_ms, None);
        // Cadence clock untouched by the opener
        assert_eq!(state.last_spawn_ms, 1000.0);
    }

    #[test]
    fn test_cadence_follows_score() {
        let mut state = GameState::new(1);
        state.restart(0.0);
        state.first_spawn_at_ms = None;

        run_schedule(&mut state, 2000.0);
        assert!(state.rockets.is_empty(), "interval must be strictly exceeded");
        run_schedule(&mut state, 2001.0);
        assert_eq!(state.rockets.len(), 1);
        assert_eq!(state.last_spawn_ms, 2001.0);

        state.score = 1000;
        run_schedule(&mut state, 3002.0);
        assert_eq!(state.rockets.len(), 2);
    }
}
