//! Fixed-timestep motion integration for vessels and projectiles.

use super::validate::Maneuver;
use crate::battle::{ProjectileState, ProjectileTurn, VesselState};
use crate::config::ParameterSet;
use crate::geometry::{unit_from_angle, wrap_heading, Vec2};

/// Advances one vessel by one substep.
///
/// Rotation is applied first and never depends on movement; movement picks
/// the velocity direction relative to the rotated heading. Energy and
/// weapon cooldown are updated even when the vessel is stopped.
pub fn step_vessel(params: &ParameterSet, vessel: &mut VesselState, maneuver: Maneuver, dt: f64) {
    vessel.heading = wrap_heading(vessel.heading + params.rotation_rate(maneuver.rotation) * dt);

    match maneuver.movement.offset() {
        Some(offset) => {
            vessel.velocity = unit_from_angle(vessel.heading + offset) * params.ship.base_speed_units_per_second;
            vessel.position += vessel.velocity * dt;
        }
        None => vessel.velocity = Vec2::ZERO,
    }

    let drain = params.movement_cost(maneuver.movement) + params.rotation_cost(maneuver.rotation);
    let energy = vessel.energy - drain * dt + params.ship.ae_regen_per_second * dt;
    vessel.energy = energy.clamp(0.0, params.ship.max_ae);

    vessel.decay_cooldown(dt);
}

/// Advances one projectile by one substep.
///
/// A steering directive spreads its total angle evenly over the turn. Freshly
/// launched projectiles fly straight. Fuel burns at the straight-line rate
/// whatever the directive.
pub fn step_projectile(params: &ParameterSet, projectile: &mut ProjectileState, steer: Option<ProjectileTurn>, dt: f64) {
    if !projectile.just_launched {
        if let Some(turn) = steer {
            let delta = turn.turn_angle() * dt / params.turn_duration();
            projectile.heading = wrap_heading(projectile.heading + delta);
        }
    }

    let torpedo = &params.torpedo;
    projectile.velocity = unit_from_angle(projectile.heading) * torpedo.speed_units_per_second;
    projectile.position += projectile.velocity * dt;
    projectile.fuel -= torpedo.ae_burn_straight_per_second * dt;
}
