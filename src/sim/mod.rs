//! Simulation module
//!
//! All gameplay logic lives here:
//! - Per-tick speeds (no dt scaling); wall-clock time only drives spawn cadence
//! - Seeded RNG owned by the state
//! - No rendering or platform dependencies

pub mod collision;
pub mod fire;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{GroundHit, caught_in_blast, circle_contains, resolve_ground_hit};
pub use fire::{closest_battery, fire};
pub use particles::{SPARKLE_BURST, SPARKLE_PALETTE, spawn_intercept_burst, update_particles};
pub use spawn::{eligible_targets, spawn_rocket};
pub use state::{
    Battery, City, GameEvent, GameState, GameStatus, Missile, MoneyParticle, Rocket,
    SparkleParticle,
};
pub use tick::tick;
