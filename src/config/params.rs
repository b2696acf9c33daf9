//! Tunable parameter bundle.
//!
//! Mirrors the on-disk JSON layout section by section. Every derived
//! quantity the resolver needs (substep count, per-direction costs, rotation
//! rates in radians, per-mode beam stats) is computed here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::battle::{MovementDirection, RotationCommand, WeaponMode};

/// Simulation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Simulated seconds covered by one turn.
    pub decision_interval_seconds: f64,
    /// Fixed integration step.
    pub physics_tick_rate_seconds: f64,
}

/// Vessel baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipParams {
    pub starting_shields: f64,
    pub starting_ae: f64,
    pub max_ae: f64,
    pub ae_regen_per_second: f64,
    pub base_speed_units_per_second: f64,
    pub collision_damage: f64,
}

/// Continuous energy cost of each movement class, per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    pub forward_ae_per_second: f64,
    pub forward_diagonal_ae_per_second: f64,
    pub lateral_ae_per_second: f64,
    pub backward_ae_per_second: f64,
    pub backward_diagonal_ae_per_second: f64,
    pub stop_ae_per_second: f64,
}

/// Rotation rates and their energy costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    pub none_ae_per_second: f64,
    pub soft_turn_ae_per_second: f64,
    pub soft_turn_degrees_per_second: f64,
    pub hard_turn_ae_per_second: f64,
    pub hard_turn_degrees_per_second: f64,
}

/// One beam-weapon mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaserModeParams {
    pub arc_degrees: f64,
    pub range_units: f64,
    pub damage: f64,
    pub cooldown_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaserParams {
    pub wide: PhaserModeParams,
    pub focused: PhaserModeParams,
    pub reconfiguration_time_seconds: f64,
}

/// Guided projectile and the area-damage zone it leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorpedoParams {
    pub launch_cost_ae: f64,
    pub max_ae_capacity: f64,
    pub speed_units_per_second: f64,
    pub turn_rate_degrees_per_second: f64,
    pub max_active_per_ship: usize,
    pub ae_burn_straight_per_second: f64,
    /// Carried in the file but not consumed: fuel burn ignores the turn command.
    pub ae_burn_soft_turn_per_second: f64,
    /// Carried in the file but not consumed: fuel burn ignores the turn command.
    pub ae_burn_hard_turn_per_second: f64,
    pub blast_expansion_seconds: f64,
    pub blast_persistence_seconds: f64,
    pub blast_dissipation_seconds: f64,
    pub blast_radius_units: f64,
    pub blast_damage_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaParams {
    pub width_units: f64,
    pub height_units: f64,
    pub spawn_distance_units: f64,
}

/// The complete, immutable parameter bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub simulation: SimulationParams,
    pub ship: ShipParams,
    pub movement: MovementParams,
    pub rotation: RotationParams,
    pub phaser: PhaserParams,
    pub torpedo: TorpedoParams,
    pub arena: ArenaParams,
}

/// Beam-weapon stats for one mode, with the arc already in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamProfile {
    pub arc: f64,
    pub range: f64,
    pub damage: f64,
    pub cooldown: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            simulation: SimulationParams {
                decision_interval_seconds: 15.0,
                physics_tick_rate_seconds: 0.1,
            },
            ship: ShipParams {
                starting_shields: 100.0,
                starting_ae: 100.0,
                max_ae: 100.0,
                ae_regen_per_second: 0.333,
                base_speed_units_per_second: 3.0,
                collision_damage: 50.0,
            },
            movement: MovementParams {
                forward_ae_per_second: 0.33,
                forward_diagonal_ae_per_second: 0.53,
                lateral_ae_per_second: 0.67,
                backward_ae_per_second: 0.67,
                backward_diagonal_ae_per_second: 0.80,
                stop_ae_per_second: 0.0,
            },
            rotation: RotationParams {
                none_ae_per_second: 0.0,
                soft_turn_ae_per_second: 0.13,
                soft_turn_degrees_per_second: 1.0,
                hard_turn_ae_per_second: 0.33,
                hard_turn_degrees_per_second: 3.0,
            },
            phaser: PhaserParams {
                wide: PhaserModeParams {
                    arc_degrees: 90.0,
                    range_units: 30.0,
                    damage: 15.0,
                    cooldown_seconds: 3.5,
                },
                focused: PhaserModeParams {
                    arc_degrees: 10.0,
                    range_units: 50.0,
                    damage: 35.0,
                    cooldown_seconds: 3.5,
                },
                reconfiguration_time_seconds: 15.0,
            },
            torpedo: TorpedoParams {
                launch_cost_ae: 20.0,
                max_ae_capacity: 40.0,
                speed_units_per_second: 4.0,
                turn_rate_degrees_per_second: 3.0,
                max_active_per_ship: 4,
                ae_burn_straight_per_second: 0.30,
                ae_burn_soft_turn_per_second: 0.50,
                ae_burn_hard_turn_per_second: 0.70,
                blast_expansion_seconds: 5.0,
                blast_persistence_seconds: 60.0,
                blast_dissipation_seconds: 5.0,
                blast_radius_units: 15.0,
                blast_damage_multiplier: 1.5,
            },
            arena: ArenaParams {
                width_units: 1000.0,
                height_units: 500.0,
                spawn_distance_units: 800.0,
            },
        }
    }
}

impl ParameterSet {
    /// Simulated seconds in one turn.
    #[inline]
    pub fn turn_duration(&self) -> f64 {
        self.simulation.decision_interval_seconds
    }

    /// Fixed substep duration.
    #[inline]
    pub fn timestep(&self) -> f64 {
        self.simulation.physics_tick_rate_seconds
    }

    /// Number of fixed substeps per turn.
    ///
    /// Rounded rather than truncated so that e.g. 15.0 / 0.1 yields 150 even
    /// when the float quotient lands just below the integer.
    pub fn substeps(&self) -> usize {
        (self.turn_duration() / self.timestep()).round().max(1.0) as usize
    }

    /// Energy per second drawn by a movement direction.
    pub fn movement_cost(&self, movement: MovementDirection) -> f64 {
        let m = &self.movement;
        match movement {
            MovementDirection::Forward => m.forward_ae_per_second,
            MovementDirection::ForwardLeft | MovementDirection::ForwardRight => {
                m.forward_diagonal_ae_per_second
            }
            MovementDirection::Left | MovementDirection::Right => m.lateral_ae_per_second,
            MovementDirection::Backward => m.backward_ae_per_second,
            MovementDirection::BackwardLeft | MovementDirection::BackwardRight => {
                m.backward_diagonal_ae_per_second
            }
            MovementDirection::Stop => m.stop_ae_per_second,
        }
    }

    /// Energy per second drawn by a rotation command.
    pub fn rotation_cost(&self, rotation: RotationCommand) -> f64 {
        let r = &self.rotation;
        match rotation {
            RotationCommand::None => r.none_ae_per_second,
            RotationCommand::SoftLeft | RotationCommand::SoftRight => r.soft_turn_ae_per_second,
            RotationCommand::HardLeft | RotationCommand::HardRight => r.hard_turn_ae_per_second,
        }
    }

    /// Signed rotation rate in radians per second (left is counterclockwise).
    pub fn rotation_rate(&self, rotation: RotationCommand) -> f64 {
        let r = &self.rotation;
        let degrees = match rotation {
            RotationCommand::None => 0.0,
            RotationCommand::SoftLeft => r.soft_turn_degrees_per_second,
            RotationCommand::SoftRight => -r.soft_turn_degrees_per_second,
            RotationCommand::HardLeft => r.hard_turn_degrees_per_second,
            RotationCommand::HardRight => -r.hard_turn_degrees_per_second,
        };
        degrees.to_radians()
    }

    /// Combined movement + rotation cost over a whole turn.
    pub fn turn_cost(&self, movement: MovementDirection, rotation: RotationCommand) -> f64 {
        (self.movement_cost(movement) + self.rotation_cost(rotation)) * self.turn_duration()
    }

    /// Beam stats for the given weapon mode.
    pub fn beam(&self, mode: WeaponMode) -> BeamProfile {
        let p = match mode {
            WeaponMode::Wide => &self.phaser.wide,
            WeaponMode::Focused => &self.phaser.focused,
        };
        BeamProfile {
            arc: p.arc_degrees.to_radians(),
            range: p.range_units,
            damage: p.damage,
            cooldown: p.cooldown_seconds,
        }
    }

    /// Damage per second inflicted by a zone with the given base damage.
    #[inline]
    pub fn zone_damage_rate(&self, base_damage: f64) -> f64 {
        base_damage / self.torpedo.blast_persistence_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_substeps_is_150() {
        let p = ParameterSet::default();
        assert_eq!(p.substeps(), 150);
    }

    #[test]
    fn costs_cover_every_direction() {
        let p = ParameterSet::default();
        assert_eq!(p.movement_cost(MovementDirection::Forward), 0.33);
        assert_eq!(p.movement_cost(MovementDirection::ForwardLeft), 0.53);
        assert_eq!(p.movement_cost(MovementDirection::Right), 0.67);
        assert_eq!(p.movement_cost(MovementDirection::BackwardRight), 0.80);
        assert_eq!(p.movement_cost(MovementDirection::Stop), 0.0);
        assert_eq!(p.rotation_cost(RotationCommand::SoftRight), 0.13);
        assert_eq!(p.rotation_cost(RotationCommand::HardLeft), 0.33);
    }

    #[test]
    fn rotation_rates_are_signed_radians() {
        let p = ParameterSet::default();
        assert!((p.rotation_rate(RotationCommand::HardLeft) - 3f64.to_radians()).abs() < 1e-12);
        assert!((p.rotation_rate(RotationCommand::SoftRight) + 1f64.to_radians()).abs() < 1e-12);
        assert_eq!(p.rotation_rate(RotationCommand::None), 0.0);
    }

    #[test]
    fn turn_cost_scales_with_duration() {
        let p = ParameterSet::default();
        let cost = p.turn_cost(MovementDirection::BackwardLeft, RotationCommand::HardRight);
        assert!((cost - (0.80 + 0.33) * 15.0).abs() < 1e-9);
    }

    #[test]
    fn beam_profiles_differ_by_mode() {
        let p = ParameterSet::default();
        let wide = p.beam(WeaponMode::Wide);
        let focused = p.beam(WeaponMode::Focused);
        assert!(wide.arc > focused.arc);
        assert!(wide.range < focused.range);
        assert!(wide.damage < focused.damage);
    }

    #[test]
    fn zone_damage_rate_uses_persistence_window() {
        let p = ParameterSet::default();
        assert!((p.zone_damage_rate(60.0) - 1.0).abs() < 1e-12);
    }
}
