//! Fire command handling
//!
//! A click picks the closest battery that can still shoot and launches a
//! fan of up to three interceptors from it.

use glam::Vec2;

use super::state::{GameEvent, GameState, Missile};
use crate::consts::*;

/// Index of the live, loaded battery horizontally closest to `target_x`
///
/// Ties keep the earlier battery.
pub fn closest_battery(state: &GameState, target_x: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, battery) in state.batteries.iter().enumerate() {
        if !battery.can_fire() {
            continue;
        }
        let d = (battery.x - target_x).abs();
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Target x for missile `index` of a volley of `count`
#[inline]
pub fn volley_target_x(target_x: f32, index: u32, count: u32) -> f32 {
    if count > 1 {
        target_x + (index as f32 - 1.0) * VOLLEY_SPREAD
    } else {
        target_x
    }
}

/// Fire at `target` (logical playfield coordinates)
///
/// Returns the number of missiles launched; zero when not playing, when the
/// target is not a finite point, when the click lands in the ground dead
/// zone, or when no battery can fire.
pub fn fire(state: &mut GameState, target: Vec2) -> u32 {
    if !state.is_playing() || !target.is_finite() || target.y > FIRE_DEAD_ZONE_Y {
        return 0;
    }
    let Some(index) = closest_battery(state, target.x) else {
        log::debug!("Fire at ({:.0}, {:.0}) ignored: no battery available", target.x, target.y);
        return 0;
    };

    let (battery_id, battery_x, ammo) = {
        let b = &state.batteries[index];
        (b.id, b.x, b.missiles)
    };
    let count = ammo.min(MAX_MISSILES_PER_VOLLEY);
    let launch = Vec2::new(battery_x, MISSILE_LAUNCH_Y);

    for i in 0..count {
        let id = state.next_entity_id();
        let aim = Vec2::new(volley_target_x(target.x, i, count), target.y);
        state.missiles.push(Missile::new(id, launch, aim));
    }
    state.batteries[index].missiles -= count;
    state.events.push(GameEvent::VolleyFired { battery_id, count });

    count
}
