//! Intercept feedback particles
//!
//! Purely cosmetic: nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{GameState, MoneyParticle, SparkleParticle};
use crate::consts::SCORE_PER_ROCKET;

/// Sparks per intercept
pub const SPARKLE_BURST: usize = 15;

/// Firework colors (0xRRGGBB)
pub const SPARKLE_PALETTE: [u32; 7] = [
    0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff, 0x00ffff, 0xffffff,
];

pub const MONEY_GRAVITY: f32 = 0.1;
pub const MONEY_DECAY: f32 = 0.02;
pub const SPARKLE_GRAVITY: f32 = 0.05;
pub const SPARKLE_DECAY: f32 = 0.03;

/// Emit the "+score" text and a spark burst at `pos`
pub fn spawn_intercept_burst(state: &mut GameState, pos: Vec2) {
    let id = state.next_entity_id();
    let vel = Vec2::new(
        (state.rng.random::<f32>() - 0.5) * 2.0,
        -2.0 - state.rng.random::<f32>() * 2.0,
    );
    state.money_particles.push(MoneyParticle {
        id,
        pos,
        vel,
        life: 1.0,
        label: format!("+{}", SCORE_PER_ROCKET),
    });

    for _ in 0..SPARKLE_BURST {
        let angle = state.rng.random::<f32>() * TAU;
        let speed = 1.0 + state.rng.random::<f32>() * 4.0;
        let color = SPARKLE_PALETTE[state.rng.random_range(0..SPARKLE_PALETTE.len())];
        let size = 1.0 + state.rng.random::<f32>() * 3.0;
        let id = state.next_entity_id();
        state.sparkles.push(SparkleParticle {
            id,
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            color,
            size,
        });
    }
}

/// Integrate every particle one tick and drop the dead ones
pub fn update_particles(state: &mut GameState) {
    for p in &mut state.money_particles {
        p.pos += p.vel;
        p.vel.y += MONEY_GRAVITY;
        p.life -= MONEY_DECAY;
    }
    state.money_particles.retain(|p| p.life > 0.0);

    for s in &mut state.sparkles {
        s.pos += s.vel;
        s.vel.y += SPARKLE_GRAVITY;
        s.life -= SPARKLE_DECAY;
    }
    state.sparkles.retain(|s| s.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_shape() {
        let mut state = GameState::new(3);
        let at = Vec2::new(300.0, 200.0);
        spawn_intercept_burst(&mut state, at);

        assert_eq!(state.money_particles.len(), 1);
        let money = &state.money_particles[0];
        assert_eq!(money.pos, at);
        assert_eq!(money.label, "+20");
        assert!(money.vel.x >= -1.0 && money.vel.x < 1.0);
        assert!(money.vel.y <= -2.0 && money.vel.y > -4.0);

        assert_eq!(state.sparkles.len(), SPARKLE_BURST);
        for s in &state.sparkles {
            assert_eq!(s.pos, at);
            assert!(SPARKLE_PALETTE.contains(&s.color));
            let speed = s.vel.length();
            assert!(speed >= 1.0 - 1e-4 && speed <= 5.0 + 1e-4);
            assert!(s.size >= 1.0 && s.size <= 4.0);
        }
    }

    #[test]
    fn test_particle_integration() {
        let mut state = GameState::new(3);
        state.money_particles.push(MoneyParticle {
            id: 1,
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, -2.0),
            life: 1.0,
            label: "+20".into(),
        });
        update_particles(&mut state);
        let p = &state.money_particles[0];
        assert_eq!(p.pos, Vec2::new(11.0, 8.0));
        assert!((p.vel.y - (-2.0 + MONEY_GRAVITY)).abs() < 1e-6);
        assert!((p.life - (1.0 - MONEY_DECAY)).abs() < 1e-6);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = GameState::new(3);
        spawn_intercept_burst(&mut state, Vec2::new(100.0, 100.0));
        // Sparkles die after ceil(1 / 0.03) ticks, money after ceil(1 / 0.02)
        for _ in 0..34 {
            update_particles(&mut state);
        }
        assert!(state.sparkles.is_empty());
        assert_eq!(state.money_particles.len(), 1);
        for _ in 0..17 {
            update_particles(&mut state);
        }
        assert!(state.money_particles.is_empty());
    }
}
