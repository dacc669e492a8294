//! Game state and core simulation types
//!
//! Everything the renderer draws and the tick mutates lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Idle, waiting for the player to start
    #[default]
    Start,
    /// Simulation running
    Playing,
    /// Score reached the win threshold
    Won,
    /// Every battery was destroyed
    Lost,
}

/// An incoming enemy rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: u32,
    pub start: Vec2,
    pub current: Vec2,
    pub target: Vec2,
    /// Travel per tick
    pub speed: f32,
    pub is_destroyed: bool,
}

impl Rocket {
    pub fn new(id: u32, start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            id,
            start,
            current: start,
            target,
            speed,
            is_destroyed: false,
        }
    }
}

/// A player-fired interceptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub start: Vec2,
    pub current: Vec2,
    pub target: Vec2,
    pub speed: f32,
    pub is_exploding: bool,
    pub explosion_radius: f32,
    pub max_explosion_radius: f32,
    /// Radius growth per tick once exploding
    pub explosion_speed: f32,
    pub is_finished: bool,
}

impl Missile {
    pub fn new(id: u32, start: Vec2, target: Vec2) -> Self {
        Self {
            id,
            start,
            current: start,
            target,
            speed: MISSILE_SPEED,
            is_exploding: false,
            explosion_radius: 0.0,
            max_explosion_radius: EXPLOSION_MAX_RADIUS,
            explosion_speed: EXPLOSION_SPEED,
            is_finished: false,
        }
    }

    /// Collision radius of the blast, if this missile is currently exploding
    pub fn blast_radius(&self) -> Option<f32> {
        self.is_exploding
            .then_some(self.explosion_radius + EXPLOSION_HIT_MARGIN)
    }
}

/// A defended city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub is_destroyed: bool,
}

/// A player missile battery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: u32,
    pub x: f32,
    pub missiles: u32,
    pub max_missiles: u32,
    pub is_destroyed: bool,
}

impl Battery {
    /// Whether this battery can launch anything right now
    pub fn can_fire(&self) -> bool {
        !self.is_destroyed && self.missiles > 0
    }
}

/// Floating "+score" text emitted on an intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyParticle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, removed at <= 0
    pub life: f32,
    pub label: String,
}

/// Firework spark emitted on an intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparkleParticle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
}

/// Things that happened during a tick or a fire command, for logging/audio hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RocketSpawned { rocket_id: u32, target_x: f32 },
    RocketIntercepted { rocket_id: u32, pos: Vec2 },
    CityDestroyed { city_id: u32 },
    BatteryDestroyed { battery_id: u32 },
    VolleyFired { battery_id: u32, count: u32 },
    StatusChanged { from: GameStatus, to: GameStatus },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Seeded RNG, carried across restarts
    pub rng: Pcg32,
    pub score: u32,
    pub status: GameStatus,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub rockets: Vec<Rocket>,
    pub missiles: Vec<Missile>,
    pub cities: Vec<City>,
    pub batteries: Vec<Battery>,
    pub money_particles: Vec<MoneyParticle>,
    pub sparkles: Vec<SparkleParticle>,
    /// Timestamp of the last cadence spawn
    pub last_spawn_ms: f64,
    /// One-off spawn scheduled shortly after a (re)start
    pub first_spawn_at_ms: Option<f64>,
    /// Pending events (drained by the game loop)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game waiting in `Start` with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            status: GameStatus::Start,
            time_ticks: 0,
            rockets: Vec::new(),
            missiles: Vec::new(),
            cities: Vec::new(),
            batteries: Vec::new(),
            money_particles: Vec::new(),
            sparkles: Vec::new(),
            last_spawn_ms: 0.0,
            first_spawn_at_ms: None,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_entities();
        state
    }

    /// Reset to the initial layout and start playing at `now_ms`
    ///
    /// The RNG keeps running so consecutive games differ.
    pub fn restart(&mut self, now_ms: f64) {
        let from = self.status;
        self.score = 0;
        self.time_ticks = 0;
        self.next_id = 1;
        self.reset_entities();
        self.last_spawn_ms = now_ms;
        self.first_spawn_at_ms = Some(now_ms + FIRST_SPAWN_DELAY_MS);
        self.status = GameStatus::Playing;
        self.events.push(GameEvent::StatusChanged {
            from,
            to: GameStatus::Playing,
        });
        log::info!("Game (re)started at {:.0}ms", now_ms);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the simulation is live
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn reset_entities(&mut self) {
        self.rockets.clear();
        self.missiles.clear();
        self.money_particles.clear();
        self.sparkles.clear();

        self.cities = CITY_XS
            .iter()
            .map(|&x| City {
                id: self.next_entity_id(),
                x,
                width: CITY_WIDTH,
                is_destroyed: false,
            })
            .collect();

        self.batteries = BATTERY_LAYOUT
            .iter()
            .map(|&(x, missiles)| Battery {
                id: self.next_entity_id(),
                x,
                missiles,
                max_missiles: missiles,
                is_destroyed: false,
            })
            .collect();
    }
}

/// City positions, left to right
pub const CITY_XS: [f32; 6] = [150.0, 250.0, 350.0, 450.0, 550.0, 650.0];

/// Battery positions and starting ammunition
pub const BATTERY_LAYOUT: [(f32, u32); 3] = [
    (50.0, INITIAL_MISSILES_SIDE),
    (400.0, INITIAL_MISSILES_MIDDLE),
    (750.0, INITIAL_MISSILES_SIDE),
];
