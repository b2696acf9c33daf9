//! Discrete weapon actions and beam-weapon hit evaluation.

use tracing::debug;

use super::event::{Event, EventKind};
use crate::battle::{BattleState, ProjectileState, Side, WeaponAction, WeaponMode, ALL_SIDES};
use crate::config::ParameterSet;
use crate::geometry::{direction_to, signed_bearing};

/// Applies one side's weapon action at the start of a turn.
///
/// Launches that cannot be afforded, or that would exceed the per-vessel
/// cap, are dropped silently. Switching to the mode already active is a
/// no-op.
pub fn apply_weapon_action(
    params: &ParameterSet,
    state: &mut BattleState,
    side: Side,
    action: WeaponAction,
    events: &mut Vec<Event>,
) {
    match action {
        WeaponAction::Maintain => {}
        WeaponAction::ReconfigureWide => reconfigure(state, side, WeaponMode::Wide, events),
        WeaponAction::ReconfigureFocused => reconfigure(state, side, WeaponMode::Focused, events),
        WeaponAction::LaunchProjectile => launch(params, state, side, events),
    }
}

fn reconfigure(state: &mut BattleState, side: Side, mode: WeaponMode, events: &mut Vec<Event>) {
    let turn = state.turn_number;
    let vessel = state.vessel_mut(side);
    if vessel.weapon_mode == mode {
        return;
    }
    vessel.weapon_mode = mode;
    vessel.reconfiguring = true;
    events.push(
        Event::new(EventKind::PhaserReconfigured, turn)
            .with("ship", side.as_str())
            .with("config", mode.as_str()),
    );
}

fn launch(params: &ParameterSet, state: &mut BattleState, side: Side, events: &mut Vec<Event>) {
    let torpedo = &params.torpedo;
    let active = state.active_projectiles(side);
    let vessel = state.vessel(side);
    if vessel.energy < torpedo.launch_cost_ae || active >= torpedo.max_active_per_ship {
        debug!(
            ship = side.as_str(),
            energy = vessel.energy,
            active,
            "launch refused"
        );
        return;
    }

    let turn = state.turn_number;
    let id = ProjectileState::launch_id(side, turn);
    let projectile = ProjectileState::launch(
        id.clone(),
        side,
        vessel.position,
        vessel.heading,
        torpedo.max_ae_capacity,
        torpedo.speed_units_per_second,
    );
    state.vessel_mut(side).energy -= torpedo.launch_cost_ae;
    state.projectiles.push(projectile);
    events.push(
        Event::new(EventKind::TorpedoLaunched, turn)
            .with("ship", side.as_str())
            .with("torpedo_id", id),
    );
}

/// Evaluates both beam weapons against the final positions of the turn.
///
/// Side A is evaluated first, but both use the same positions so the order
/// only affects the event log.
pub fn fire_beams(params: &ParameterSet, state: &mut BattleState, events: &mut Vec<Event>) {
    for side in ALL_SIDES {
        if let Some(event) = fire_beam(params, state, side) {
            events.push(event);
        }
    }
}

fn fire_beam(params: &ParameterSet, state: &mut BattleState, side: Side) -> Option<Event> {
    let attacker = state.vessel(side);
    if !attacker.weapon_ready() {
        return None;
    }
    let target = state.vessel(side.opponent());
    let beam = params.beam(attacker.weapon_mode);

    let distance = attacker.position.distance(target.position);
    if distance > beam.range {
        return None;
    }
    let bearing = signed_bearing(attacker.heading, direction_to(attacker.position, target.position));
    if bearing.abs() > beam.arc / 2.0 {
        return None;
    }

    let mode = attacker.weapon_mode;
    state.vessel_mut(side).set_cooldown(beam.cooldown);
    state.vessel_mut(side.opponent()).take_damage(beam.damage);

    Some(
        Event::new(EventKind::PhaserHit, state.turn_number)
            .with("attacker", side.as_str())
            .with("target", side.opponent().as_str())
            .with("damage", beam.damage)
            .with("config", mode.as_str())
            .with("distance", distance),
    )
}
