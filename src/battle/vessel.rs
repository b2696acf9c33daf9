//! Sides and per-side vessel state.
//!
//! A battle always has exactly two sides. Side A is processed before side B
//! wherever both act in the same step, so results never depend on anything
//! but the inputs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::Vec2;

/// One of the two combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "ship_a")]
    A,
    #[serde(rename = "ship_b")]
    B,
}

/// Both sides in resolution order.
pub const ALL_SIDES: [Side; 2] = [Side::A, Side::B];

impl Side {
    /// Identifier used in events, projectile ids and transcripts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::A => "ship_a",
            Side::B => "ship_b",
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Parses `a`/`b` (as used on the engine command line) or the full
    /// `ship_a`/`ship_b` identifier.
    pub fn parse(s: &str) -> Option<Side> {
        match s {
            "a" | "A" | "ship_a" => Some(Side::A),
            "b" | "B" | "ship_b" => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Beam-weapon configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaponMode {
    /// Wide arc, short range, low damage.
    Wide,
    /// Narrow arc, long range, high damage.
    Focused,
}

impl WeaponMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            WeaponMode::Wide => "WIDE",
            WeaponMode::Focused => "FOCUSED",
        }
    }
}

/// Complete state of one vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians in `[0, 2π)`, 0 = +X (east).
    pub heading: f64,
    /// Remaining health, never negative.
    #[serde(deserialize_with = "non_negative")]
    pub shields: f64,
    /// Available energy in `[0, max_ae]`.
    pub energy: f64,
    pub weapon_mode: WeaponMode,
    /// Set only during the turn a mode switch happens; blocks firing.
    #[serde(default)]
    pub reconfiguring: bool,
    /// Seconds until the beam weapon may fire again, never negative.
    #[serde(default, deserialize_with = "non_negative")]
    pub weapon_cooldown_remaining: f64,
}

/// Clamps an incoming quantity at zero; NaN also becomes zero.
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(|v| v.max(0.0))
}

impl VesselState {
    /// Creates a stationary vessel with a ready weapon.
    pub fn new(position: Vec2, heading: f64, shields: f64, energy: f64, weapon_mode: WeaponMode) -> Self {
        VesselState {
            position,
            velocity: Vec2::ZERO,
            heading: crate::geometry::wrap_heading(heading),
            shields,
            energy,
            weapon_mode,
            reconfiguring: false,
            weapon_cooldown_remaining: 0.0,
        }
    }

    /// Returns the vessel with its weapon cooldown set, clamped at zero.
    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.set_cooldown(seconds);
        self
    }

    /// Sets the remaining cooldown, clamped at zero.
    pub fn set_cooldown(&mut self, seconds: f64) {
        self.weapon_cooldown_remaining = seconds.max(0.0);
    }

    /// Runs the cooldown down by `dt`, never below zero.
    pub fn decay_cooldown(&mut self, dt: f64) {
        if self.weapon_cooldown_remaining > 0.0 {
            self.set_cooldown(self.weapon_cooldown_remaining - dt);
        }
    }

    /// True when the beam weapon may be evaluated this turn.
    pub fn weapon_ready(&self) -> bool {
        !self.reconfiguring && self.weapon_cooldown_remaining <= 0.0
    }

    /// Removes `amount` of shields, stopping at zero.
    pub fn take_damage(&mut self, amount: f64) {
        self.shields = (self.shields - amount).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.shields <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_roundtrip() {
        for side in ALL_SIDES {
            assert_eq!(Side::parse(side.as_str()), Some(side));
            assert_eq!(side.opponent().opponent(), side);
        }
        assert_eq!(Side::parse("a"), Some(Side::A));
        assert_eq!(Side::parse("c"), None);
    }

    #[test]
    fn side_serializes_as_ship_id() {
        assert_eq!(serde_json::to_string(&Side::B).unwrap(), "\"ship_b\"");
    }

    #[test]
    fn cooldown_never_negative() {
        let mut v = VesselState::new(Vec2::ZERO, 0.0, 100.0, 100.0, WeaponMode::Wide).with_cooldown(-3.0);
        assert_eq!(v.weapon_cooldown_remaining, 0.0);
        v.set_cooldown(0.05);
        v.decay_cooldown(0.1);
        assert_eq!(v.weapon_cooldown_remaining, 0.0);
        assert!(v.weapon_ready());
    }

    #[test]
    fn deserialized_quantities_are_clamped() {
        let json = r#"{
            "position": [0.0, 0.0],
            "velocity": [0.0, 0.0],
            "heading": 0.0,
            "shields": -12.0,
            "energy": 50.0,
            "weapon_mode": "FOCUSED",
            "weapon_cooldown_remaining": -5.0
        }"#;
        let v: VesselState = serde_json::from_str(json).unwrap();
        assert_eq!(v.weapon_cooldown_remaining, 0.0);
        assert_eq!(v.shields, 0.0);
        assert!(v.weapon_ready());

        let json = r#"{"position":[0.0,0.0],"velocity":[0.0,0.0],"heading":0.0,"shields":80.0,"energy":50.0,"weapon_mode":"WIDE"}"#;
        let v: VesselState = serde_json::from_str(json).unwrap();
        assert_eq!(v.weapon_cooldown_remaining, 0.0);
        assert_eq!(v.shields, 80.0);
    }

    #[test]
    fn damage_stops_at_zero() {
        let mut v = VesselState::new(Vec2::ZERO, 0.0, 10.0, 100.0, WeaponMode::Wide);
        v.take_damage(4.0);
        assert_eq!(v.shields, 6.0);
        v.take_damage(35.0);
        assert_eq!(v.shields, 0.0);
        assert!(v.is_destroyed());
    }

    #[test]
    fn reconfiguring_blocks_weapon() {
        let mut v = VesselState::new(Vec2::ZERO, 0.0, 100.0, 100.0, WeaponMode::Focused);
        v.reconfiguring = true;
        assert!(!v.weapon_ready());
    }

    #[test]
    fn constructor_wraps_heading() {
        let v = VesselState::new(Vec2::ZERO, -std::f64::consts::FRAC_PI_2, 100.0, 100.0, WeaponMode::Wide);
        assert!((v.heading - 1.5 * std::f64::consts::PI).abs() < 1e-12);
    }
}
