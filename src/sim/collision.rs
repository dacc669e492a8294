//! Collision tests
//!
//! Two kinds of contact matter: a rocket reaching the ground at a city or
//! battery, and a rocket caught inside an interceptor blast.

use glam::Vec2;

use super::state::{Battery, City, Missile};
use crate::consts::TARGET_MATCH_TOLERANCE;
use crate::distance;

/// Structure a landed rocket destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundHit {
    City(u32),
    Battery(u32),
}

/// Whether `point` lies strictly inside a circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    distance(center, point) < radius
}

/// Whether any active blast covers `point`
pub fn caught_in_blast(point: Vec2, missiles: &[Missile]) -> bool {
    missiles.iter().any(|m| {
        m.blast_radius()
            .is_some_and(|radius| circle_contains(m.current, radius, point))
    })
}

/// Destroy whatever still stands at `target_x`
///
/// Matches by horizontal position within a small tolerance. Cities are checked
/// before batteries and the first live match wins; `None` if nothing is left
/// there (e.g. another rocket got it first).
pub fn resolve_ground_hit(
    target_x: f32,
    cities: &mut [City],
    batteries: &mut [Battery],
) -> Option<GroundHit> {
    let near = |x: f32| (x - target_x).abs() < TARGET_MATCH_TOLERANCE;

    if let Some(city) = cities.iter_mut().find(|c| !c.is_destroyed && near(c.x)) {
        city.is_destroyed = true;
        return Some(GroundHit::City(city.id));
    }
    if let Some(battery) = batteries
        .iter_mut()
        .find(|b| !b.is_destroyed && near(b.x))
    {
        battery.is_destroyed = true;
        return Some(GroundHit::Battery(battery.id));
    }
    None
}
