//! Nova Defense - A missile-command style arcade defense game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, kinematics, collisions, game state)
//! - `input`: Pointer-to-playfield mapping and fire forwarding
//! - `render`: Snapshot consumers (renderer trait, JSON lines, HUD text)
//! - `game_loop`: Update step + fixed-rate draw step, demo autopilot
//! - `settings`: Runner configuration

pub mod game_loop;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use game_loop::{Autopilot, Game};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Starting ammunition for the outer and middle batteries
    pub const INITIAL_MISSILES_SIDE: u32 = 60;
    pub const INITIAL_MISSILES_MIDDLE: u32 = 100;

    /// Rocket speed range (units per tick)
    pub const ROCKET_SPEED_MIN: f32 = 0.6;
    pub const ROCKET_SPEED_MAX: f32 = 1.8;
    /// Interceptor speed (units per tick)
    pub const MISSILE_SPEED: f32 = 8.0;

    /// Blast radius growth
    pub const EXPLOSION_MAX_RADIUS: f32 = 50.0;
    pub const EXPLOSION_SPEED: f32 = 1.5;
    /// Extra reach added to a blast when testing rockets against it
    pub const EXPLOSION_HIT_MARGIN: f32 = 5.0;

    pub const SCORE_PER_ROCKET: u32 = 20;
    pub const WIN_SCORE: u32 = 1000;

    pub const CITY_WIDTH: f32 = 60.0;
    pub const BATTERY_WIDTH: f32 = 50.0;

    /// Height rockets aim for (ground level targets)
    pub const ROCKET_TARGET_Y: f32 = GAME_HEIGHT - 20.0;
    /// Height interceptors launch from
    pub const MISSILE_LAUNCH_Y: f32 = GAME_HEIGHT - 40.0;
    /// Clicks below this line are ignored
    pub const FIRE_DEAD_ZONE_Y: f32 = GAME_HEIGHT - 50.0;
    /// Horizontal tolerance when matching a landed rocket to a city/battery
    pub const TARGET_MATCH_TOLERANCE: f32 = 5.0;

    /// Volley shape
    pub const MAX_MISSILES_PER_VOLLEY: u32 = 3;
    pub const VOLLEY_SPREAD: f32 = 40.0;

    /// Spawn cadence (milliseconds)
    pub const SPAWN_INTERVAL_START_MS: f64 = 2000.0;
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 500.0;
    pub const FIRST_SPAWN_DELAY_MS: f64 = 100.0;

    /// Draw cadence for the render step
    pub const DRAW_HZ: f64 = 60.0;
}

/// Euclidean distance between two playfield points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` to `to` (zero if the points coincide)
#[inline]
pub fn unit_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Spawn interval for the given score: shrinks 100ms per 100 points, floored at 500ms
#[inline]
pub fn spawn_interval_ms(score: u32) -> f64 {
    use consts::*;
    (SPAWN_INTERVAL_START_MS - (score as f64 / 100.0) * 100.0).max(SPAWN_INTERVAL_MIN_MS)
}
