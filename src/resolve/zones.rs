//! Area-damage zone lifecycle and continuous zone damage.
//!
//! Phases run EXPANDING → PERSISTING → DISSIPATING. The radius grows
//! linearly over the expansion window, holds at the maximum while
//! persisting, and shrinks linearly to zero while dissipating, at which
//! point the zone is removed. Damage does not depend on phase or owner.

use super::event::{Event, EventKind};
use crate::battle::{AreaDamageZone, BattleState, Side, ZonePhase, ALL_SIDES};
use crate::config::ParameterSet;

/// Ages one zone by `dt`. Returns false once the zone has dissipated.
pub fn advance_zone(params: &ParameterSet, zone: &mut AreaDamageZone, dt: f64) -> bool {
    let t = &params.torpedo;
    let max_radius = t.blast_radius_units;
    let dissipation_start = t.blast_expansion_seconds + t.blast_persistence_seconds;

    zone.age += dt;

    if zone.phase == ZonePhase::Expanding {
        if zone.age >= t.blast_expansion_seconds {
            zone.phase = ZonePhase::Persisting;
            zone.current_radius = max_radius;
        } else {
            zone.current_radius = max_radius * zone.age / t.blast_expansion_seconds;
        }
    }
    if zone.phase == ZonePhase::Persisting {
        if zone.age >= dissipation_start {
            zone.phase = ZonePhase::Dissipating;
        } else {
            zone.current_radius = max_radius;
        }
    }
    if zone.phase == ZonePhase::Dissipating {
        let elapsed = zone.age - dissipation_start;
        let remaining = 1.0 - elapsed / t.blast_dissipation_seconds;
        zone.current_radius = (max_radius * remaining).max(0.0);
    }

    !(zone.phase == ZonePhase::Dissipating && zone.current_radius <= 0.0)
}

/// Advances every zone by one substep, drops dissipated zones, then applies
/// each remaining zone's damage to every vessel inside it.
pub fn tick_zones(params: &ParameterSet, state: &mut BattleState, dt: f64, events: &mut Vec<Event>) {
    if state.zones.is_empty() {
        return;
    }
    state.zones.retain_mut(|zone| advance_zone(params, zone, dt));

    let turn = state.turn_number;
    for zone in &state.zones {
        let damage = params.zone_damage_rate(zone.base_damage) * dt;
        for side in ALL_SIDES {
            let vessel = match side {
                Side::A => &mut state.vessel_a,
                Side::B => &mut state.vessel_b,
            };
            if !zone.covers(vessel.position) {
                continue;
            }
            vessel.take_damage(damage);
            events.push(
                Event::new(EventKind::BlastDamage, turn)
                    .with("ship", side.as_str())
                    .with("blast_zone_id", zone.id.as_str())
                    .with("damage", damage)
                    .with("zone_phase", zone.phase.as_str())
                    .with("zone_radius", zone.current_radius)
                    .with("distance", zone.position.distance(vessel.position)),
            );
        }
    }
}
