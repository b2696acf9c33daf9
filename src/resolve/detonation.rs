//! Projectile commands, detonation countdowns and zone creation.

use std::collections::BTreeMap;

use tracing::warn;

use super::event::{DetonationType, Event, EventKind};
use crate::battle::{AreaDamageZone, BattleState, OrdersRequest, ProjectileState, ProjectileTurn, Side};
use crate::config::ParameterSet;
use crate::protocol::{parse_projectile_command, ProjectileOrder};

/// Applies one side's projectile commands at the start of a turn.
///
/// Detonation delays arm the projectile's timer immediately. Steering
/// directives are returned keyed by projectile id so the integrator can
/// apply them each substep. Commands that fail to parse, or that name a
/// projectile the side does not own, are logged and dropped.
pub fn apply_projectile_commands(
    state: &mut BattleState,
    side: Side,
    orders: &OrdersRequest,
    steering: &mut BTreeMap<String, ProjectileTurn>,
) {
    for (id, raw) in &orders.projectile_commands {
        let Some(projectile) = state.owned_projectile_mut(side, id) else {
            warn!(ship = side.as_str(), torpedo_id = %id, "command for unknown torpedo ignored");
            continue;
        };

        match parse_projectile_command(raw) {
            Ok(ProjectileOrder::DetonateAfter(delay)) => {
                projectile.detonation_timer = Some(delay);
            }
            Ok(ProjectileOrder::Turn(turn)) => {
                steering.insert(id.clone(), turn);
            }
            Err(err) => {
                warn!(
                    ship = side.as_str(),
                    torpedo_id = %id,
                    command = %raw,
                    error = %err,
                    "torpedo command discarded"
                );
            }
        }
    }
}

/// Runs detonation countdowns for one substep.
///
/// A projectile whose timer has run out, or whose fuel is spent, is removed
/// and replaced by a fresh zone at its position. Survivors keep their order.
pub fn tick_detonations(params: &ParameterSet, state: &mut BattleState, dt: f64, events: &mut Vec<Event>) {
    if state.projectiles.is_empty() {
        return;
    }
    let turn = state.turn_number;
    let mut survivors = Vec::with_capacity(state.projectiles.len());

    for mut projectile in state.projectiles.drain(..) {
        let mut cause = None;
        if let Some(timer) = projectile.detonation_timer.as_mut() {
            *timer -= dt;
            if *timer <= 0.0 {
                cause = Some(DetonationType::Timed);
            }
        }
        if cause.is_none() && projectile.fuel <= 0.0 {
            cause = Some(DetonationType::Auto);
        }

        match cause {
            Some(kind) => {
                let zone = detonate(params, &projectile);
                events.push(detonation_event(turn, &projectile, &zone, kind));
                state.zones.push(zone);
            }
            None => survivors.push(projectile),
        }
    }

    state.projectiles = survivors;
}

/// Zone left behind by `projectile`. Spent fuel never yields negative damage.
fn detonate(params: &ParameterSet, projectile: &ProjectileState) -> AreaDamageZone {
    let base_damage = projectile.fuel.max(0.0) * params.torpedo.blast_damage_multiplier;
    AreaDamageZone::detonation(
        AreaDamageZone::id_for(&projectile.id),
        projectile.owner,
        projectile.position,
        base_damage,
    )
}

fn detonation_event(turn: u32, projectile: &ProjectileState, zone: &AreaDamageZone, kind: DetonationType) -> Event {
    Event::new(EventKind::TorpedoDetonated, turn)
        .with("torpedo_id", projectile.id.as_str())
        .with("owner", projectile.owner.as_str())
        .with("position", vec![projectile.position.x, projectile.position.y])
        .with("ae_remaining", projectile.fuel)
        .with("blast_zone_id", zone.id.as_str())
        .with("detonation_type", kind.as_str())
}
