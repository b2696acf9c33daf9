//! Guided projectiles in flight.

use serde::{Deserialize, Serialize};

use super::vessel::Side;
use crate::geometry::{unit_from_angle, Vec2};

/// One active projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub id: String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians in `[0, 2π)`.
    pub heading: f64,
    /// Remaining energy budget; the projectile detonates when it hits zero.
    pub fuel: f64,
    pub owner: Side,
    /// True only for the turn of launch; turning is suppressed.
    #[serde(default)]
    pub just_launched: bool,
    /// Seconds until a commanded detonation, if one was ordered.
    #[serde(default)]
    pub detonation_timer: Option<f64>,
}

impl ProjectileState {
    /// Creates a freshly launched projectile travelling along `heading`.
    pub fn launch(id: String, owner: Side, position: Vec2, heading: f64, fuel: f64, speed: f64) -> Self {
        ProjectileState {
            id,
            position,
            velocity: unit_from_angle(heading) * speed,
            heading,
            fuel,
            owner,
            just_launched: true,
            detonation_timer: None,
        }
    }

    /// Projectile id for a launch by `owner` on `turn`.
    pub fn launch_id(owner: Side, turn: u32) -> String {
        format!("{}_torpedo_{}", owner.as_str(), turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_sets_velocity_along_heading() {
        let p = ProjectileState::launch("t".into(), Side::A, Vec2::ZERO, std::f64::consts::FRAC_PI_2, 40.0, 4.0);
        assert!(p.velocity.x.abs() < 1e-12);
        assert!((p.velocity.y - 4.0).abs() < 1e-12);
        assert!(p.just_launched);
        assert_eq!(p.detonation_timer, None);
    }

    #[test]
    fn launch_id_format() {
        assert_eq!(ProjectileState::launch_id(Side::B, 7), "ship_b_torpedo_7");
    }
}
