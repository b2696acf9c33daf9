//! Area-damage zones left behind by detonations.

use serde::{Deserialize, Serialize};

use super::vessel::Side;
use crate::geometry::Vec2;

/// Lifecycle phase of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZonePhase {
    Expanding,
    Persisting,
    Dissipating,
}

impl ZonePhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            ZonePhase::Expanding => "expanding",
            ZonePhase::Persisting => "persisting",
            ZonePhase::Dissipating => "dissipating",
        }
    }
}

/// A fixed-position region of continuous damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDamageZone {
    pub id: String,
    pub position: Vec2,
    /// Fixed at creation; total damage dealt over the persistence window.
    pub base_damage: f64,
    pub phase: ZonePhase,
    /// Seconds since creation.
    pub age: f64,
    pub current_radius: f64,
    pub owner: Side,
}

impl AreaDamageZone {
    /// A zone at the moment of detonation: expanding from radius zero.
    pub fn detonation(id: String, owner: Side, position: Vec2, base_damage: f64) -> Self {
        AreaDamageZone {
            id,
            position,
            base_damage,
            phase: ZonePhase::Expanding,
            age: 0.0,
            current_radius: 0.0,
            owner,
        }
    }

    /// Zone id for the detonation of `projectile_id`.
    pub fn id_for(projectile_id: &str) -> String {
        format!("{}_blast", projectile_id)
    }

    /// Strictly inside: a point exactly on the edge is not covered.
    #[inline]
    pub fn covers(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.current_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zone_starts_expanding_at_zero() {
        let z = AreaDamageZone::detonation("z".into(), Side::A, Vec2::new(1.0, 2.0), 45.0);
        assert_eq!(z.phase, ZonePhase::Expanding);
        assert_eq!(z.current_radius, 0.0);
        assert_eq!(z.age, 0.0);
        assert!(!z.covers(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn edge_is_not_covered() {
        let mut z = AreaDamageZone::detonation("z".into(), Side::B, Vec2::ZERO, 10.0);
        z.current_radius = 15.0;
        assert!(!z.covers(Vec2::new(15.0, 0.0)));
        assert!(z.covers(Vec2::new(14.999, 0.0)));
    }
}
