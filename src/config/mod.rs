//! Parameter loading and validation.
//!
//! The resolver trusts its `ParameterSet` completely; every range check
//! happens here, before a resolver is ever constructed.

pub mod params;

use std::fs;
use std::path::Path;

use thiserror::Error;

pub use params::{
    ArenaParams, BeamProfile, MovementParams, ParameterSet, PhaserModeParams, PhaserParams,
    RotationParams, ShipParams, SimulationParams, TorpedoParams,
};

/// Errors raised while loading a parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration:\n{}", bullet_list(.0))]
    Invalid(Vec<String>),
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ParameterSet {
    /// Reads, parses and validates a JSON parameter file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ParameterSet, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        ParameterSet::from_json(&data)
    }

    /// Parses and validates a JSON parameter document.
    pub fn from_json(json: &str) -> Result<ParameterSet, ConfigError> {
        let params: ParameterSet = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks every range rule and reports all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let mut positive = |name: &str, value: f64| {
            if !(value > 0.0) {
                errors.push(format!("{} must be > 0 (got: {})", name, value));
            }
        };

        let sim = &self.simulation;
        positive("simulation.decision_interval_seconds", sim.decision_interval_seconds);
        positive("simulation.physics_tick_rate_seconds", sim.physics_tick_rate_seconds);
        positive("ship.starting_shields", self.ship.starting_shields);
        positive("ship.starting_ae", self.ship.starting_ae);
        positive("ship.base_speed_units_per_second", self.ship.base_speed_units_per_second);
        positive("phaser.wide.range_units", self.phaser.wide.range_units);
        positive("phaser.wide.damage", self.phaser.wide.damage);
        positive("phaser.focused.range_units", self.phaser.focused.range_units);
        positive("phaser.focused.damage", self.phaser.focused.damage);
        let t = &self.torpedo;
        positive("torpedo.launch_cost_ae", t.launch_cost_ae);
        positive("torpedo.max_ae_capacity", t.max_ae_capacity);
        positive("torpedo.speed_units_per_second", t.speed_units_per_second);
        positive("torpedo.max_active_per_ship", t.max_active_per_ship as f64);
        positive("torpedo.blast_expansion_seconds", t.blast_expansion_seconds);
        positive("torpedo.blast_persistence_seconds", t.blast_persistence_seconds);
        positive("torpedo.blast_dissipation_seconds", t.blast_dissipation_seconds);
        positive("torpedo.blast_radius_units", t.blast_radius_units);
        positive("torpedo.blast_damage_multiplier", t.blast_damage_multiplier);
        positive("arena.width_units", self.arena.width_units);
        positive("arena.height_units", self.arena.height_units);
        positive("arena.spawn_distance_units", self.arena.spawn_distance_units);

        let mut non_negative = |name: &str, value: f64| {
            if !(value >= 0.0) {
                errors.push(format!("{} must be >= 0 (got: {})", name, value));
            }
        };
        non_negative("ship.ae_regen_per_second", self.ship.ae_regen_per_second);
        non_negative("ship.collision_damage", self.ship.collision_damage);
        let m = &self.movement;
        non_negative("movement.forward_ae_per_second", m.forward_ae_per_second);
        non_negative("movement.forward_diagonal_ae_per_second", m.forward_diagonal_ae_per_second);
        non_negative("movement.lateral_ae_per_second", m.lateral_ae_per_second);
        non_negative("movement.backward_ae_per_second", m.backward_ae_per_second);
        non_negative("movement.backward_diagonal_ae_per_second", m.backward_diagonal_ae_per_second);
        non_negative("movement.stop_ae_per_second", m.stop_ae_per_second);
        let r = &self.rotation;
        non_negative("rotation.none_ae_per_second", r.none_ae_per_second);
        non_negative("rotation.soft_turn_ae_per_second", r.soft_turn_ae_per_second);
        non_negative("rotation.hard_turn_ae_per_second", r.hard_turn_ae_per_second);
        non_negative("rotation.soft_turn_degrees_per_second", r.soft_turn_degrees_per_second);
        non_negative("rotation.hard_turn_degrees_per_second", r.hard_turn_degrees_per_second);
        non_negative("phaser.wide.cooldown_seconds", self.phaser.wide.cooldown_seconds);
        non_negative("phaser.focused.cooldown_seconds", self.phaser.focused.cooldown_seconds);
        non_negative("torpedo.ae_burn_straight_per_second", t.ae_burn_straight_per_second);

        for (name, arc) in [
            ("phaser.wide.arc_degrees", self.phaser.wide.arc_degrees),
            ("phaser.focused.arc_degrees", self.phaser.focused.arc_degrees),
        ] {
            if !(arc > 0.0 && arc <= 360.0) {
                errors.push(format!("{} must be > 0 and <= 360 (got: {})", name, arc));
            }
        }

        if sim.physics_tick_rate_seconds > sim.decision_interval_seconds {
            errors.push(format!(
                "simulation.physics_tick_rate_seconds must be <= decision_interval_seconds (got: {} > {})",
                sim.physics_tick_rate_seconds, sim.decision_interval_seconds
            ));
        }
        if self.ship.max_ae < self.ship.starting_ae {
            errors.push(format!(
                "ship.max_ae must be >= starting_ae (got: {} < {})",
                self.ship.max_ae, self.ship.starting_ae
            ));
        }
        if self.arena.spawn_distance_units > self.arena.width_units {
            errors.push(format!(
                "arena.spawn_distance_units must be <= width_units (got: {} > {})",
                self.arena.spawn_distance_units, self.arena.width_units
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}
