//! Turn resolution.
//!
//! Resolves one turn of simultaneous orders into the next battle state and
//! an ordered event log. Everything runs on a fixed timestep, and side A is
//! always processed before side B, so identical inputs give bit-identical
//! outputs.

pub mod detonation;
pub mod event;
pub mod motion;
pub mod validate;
pub mod weapons;
pub mod zones;

use std::collections::BTreeMap;

use tracing::debug;

use crate::battle::{BattleState, OrdersRequest, Side, ALL_SIDES};
use crate::config::ParameterSet;

pub use event::{DetonationType, Event, EventKind};
pub use validate::{validate_orders, Maneuver};

/// Stateless turn resolver bound to one parameter set.
#[derive(Debug, Clone)]
pub struct TurnResolver {
    params: ParameterSet,
}

impl TurnResolver {
    /// Creates a resolver. `params` is trusted to be valid already.
    pub fn new(params: ParameterSet) -> Self {
        TurnResolver { params }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Resolves one turn.
    ///
    /// The input state is never touched; the returned state is an
    /// independent copy advanced by one turn. Order of work:
    /// validate both sides, apply weapon actions, apply projectile commands,
    /// run every substep, evaluate beam weapons, clear per-turn flags.
    ///
    /// Within a substep zones age and deal damage before detonations are
    /// checked, so a zone created in substep `k` first acts in `k + 1`.
    pub fn resolve_turn(
        &self,
        state: &BattleState,
        orders_a: &OrdersRequest,
        orders_b: &OrdersRequest,
    ) -> (BattleState, Vec<Event>) {
        let params = &self.params;
        let mut next = state.snapshot();
        next.turn_number += 1;
        let mut events = Vec::new();

        let orders_for = |side: Side| match side {
            Side::A => orders_a,
            Side::B => orders_b,
        };

        let maneuver_a = validate_orders(params, &next.vessel_a, orders_a);
        let maneuver_b = validate_orders(params, &next.vessel_b, orders_b);

        for side in ALL_SIDES {
            weapons::apply_weapon_action(params, &mut next, side, orders_for(side).weapon_action, &mut events);
        }

        let mut steering = BTreeMap::new();
        for side in ALL_SIDES {
            detonation::apply_projectile_commands(&mut next, side, orders_for(side), &mut steering);
        }

        let dt = params.timestep();
        for _ in 0..params.substeps() {
            motion::step_vessel(params, &mut next.vessel_a, maneuver_a, dt);
            motion::step_vessel(params, &mut next.vessel_b, maneuver_b, dt);
            for projectile in next.projectiles.iter_mut() {
                let steer = steering.get(&projectile.id).copied();
                motion::step_projectile(params, projectile, steer, dt);
            }
            zones::tick_zones(params, &mut next, dt, &mut events);
            detonation::tick_detonations(params, &mut next, dt, &mut events);
        }

        weapons::fire_beams(params, &mut next, &mut events);

        for projectile in next.projectiles.iter_mut() {
            projectile.just_launched = false;
        }
        next.vessel_a.reconfiguring = false;
        next.vessel_b.reconfiguring = false;

        debug!(
            turn = next.turn_number,
            events = events.len(),
            projectiles = next.projectiles.len(),
            zones = next.zones.len(),
            shields_a = next.vessel_a.shields,
            shields_b = next.vessel_b.shields,
            "turn resolved"
        );

        (next, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{
        MovementDirection, ProjectileState, RotationCommand, VesselState, WeaponAction, WeaponMode, ZonePhase,
    };
    use crate::geometry::Vec2;

    fn resolver() -> TurnResolver {
        TurnResolver::new(ParameterSet::default())
    }

    fn far_apart() -> BattleState {
        let a = VesselState::new(Vec2::new(0.0, 0.0), 0.0, 100.0, 100.0, WeaponMode::Wide);
        let b = VesselState::new(Vec2::new(500.0, 300.0), 0.0, 100.0, 100.0, WeaponMode::Wide);
        BattleState::new(a, b)
    }

    #[test]
    fn input_state_is_untouched() {
        let r = resolver();
        let state = far_apart();
        let before = state.clone();
        let go = OrdersRequest::new(MovementDirection::Forward, RotationCommand::HardLeft, WeaponAction::LaunchProjectile);
        let (next, _) = r.resolve_turn(&state, &go, &go);
        assert_eq!(state, before);
        assert_eq!(next.turn_number, 1);
        assert_ne!(next.vessel_a.position, state.vessel_a.position);
    }

    #[test]
    fn straight_advance_covers_full_turn() {
        let r = resolver();
        let (next, events) = r.resolve_turn(
            &far_apart(),
            &OrdersRequest::new(MovementDirection::Forward, RotationCommand::None, WeaponAction::Maintain),
            &OrdersRequest::default(),
        );
        assert!((next.vessel_a.position.x - 45.0).abs() < 1e-6);
        assert!(next.vessel_a.position.y.abs() < 1e-9);
        assert_eq!(next.vessel_a.heading, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn launch_flags_clear_after_turn() {
        let r = resolver();
        let launch = OrdersRequest::new(MovementDirection::Stop, RotationCommand::None, WeaponAction::LaunchProjectile);
        let (next, events) = r.resolve_turn(&far_apart(), &launch, &OrdersRequest::default());
        assert_eq!(events[0].kind, EventKind::TorpedoLaunched);
        let p = &next.projectiles[0];
        assert_eq!(p.id, "ship_a_torpedo_1");
        assert!(!p.just_launched);
        // 4 units/s for 15 s along heading 0
        assert!((p.position.x - 60.0).abs() < 1e-6);
        assert!((p.fuel - (40.0 - 0.3 * 15.0)).abs() < 1e-9);
    }

    #[test]
    fn reconfiguration_lasts_one_turn() {
        let r = resolver();
        let mut state = far_apart();
        state.vessel_b.position = Vec2::new(20.0, 0.0);
        let switch = OrdersRequest::new(MovementDirection::Stop, RotationCommand::None, WeaponAction::ReconfigureFocused);
        let (next, events) = r.resolve_turn(&state, &switch, &OrdersRequest::default());
        assert_eq!(next.vessel_a.weapon_mode, WeaponMode::Focused);
        assert!(!next.vessel_a.reconfiguring);
        assert!(events.iter().all(|e| e.kind != EventKind::PhaserHit));

        let (_, events) = r.resolve_turn(&next, &OrdersRequest::default(), &OrdersRequest::default());
        assert_eq!(events.iter().filter(|e| e.kind == EventKind::PhaserHit).count(), 1);
    }

    #[test]
    fn timed_detonation_leaves_zone() {
        let r = resolver();
        let launch = OrdersRequest::new(MovementDirection::Stop, RotationCommand::None, WeaponAction::LaunchProjectile);
        let (next, _) = r.resolve_turn(&far_apart(), &launch, &OrdersRequest::default());

        let detonate = OrdersRequest::default().with_projectile_command("ship_a_torpedo_1", "detonate_after:2");
        let (next, events) = r.resolve_turn(&next, &detonate, &OrdersRequest::default());
        assert!(next.projectiles.is_empty());
        assert_eq!(next.zones.len(), 1);
        assert_eq!(next.zones[0].id, "ship_a_torpedo_1_blast");
        assert_eq!(next.zones[0].phase, ZonePhase::Persisting);
        let detonation = events
            .iter()
            .find(|e| e.kind == EventKind::TorpedoDetonated)
            .unwrap();
        assert_eq!(detonation.text("detonation_type"), Some("timed"));
    }

    #[test]
    fn new_zone_starts_aging_next_substep() {
        let r = resolver();
        let mut state = far_apart();
        let mut p = ProjectileState::launch("ship_a_torpedo_1".into(), Side::A, Vec2::new(200.0, 100.0), 0.0, 30.0, 4.0);
        p.just_launched = false;
        p.detonation_timer = Some(0.1);
        state.projectiles.push(p);

        let (next, events) = r.resolve_turn(&state, &OrdersRequest::default(), &OrdersRequest::default());
        assert_eq!(next.zones.len(), 1);
        // created at the end of substep 1, aged through the remaining 149
        assert!((next.zones[0].age - 14.9).abs() < 1e-9, "age = {}", next.zones[0].age);
        assert_eq!(count_kind(&events, EventKind::TorpedoDetonated), 1);
    }

    #[test]
    fn zone_does_not_hit_in_its_creation_substep() {
        let r = resolver();
        let mut state = far_apart();
        // detonates in substep 1 right on top of vessel A
        let mut p = ProjectileState::launch("ship_b_torpedo_1".into(), Side::B, Vec2::new(-0.4, 0.0), 0.0, 40.0, 4.0);
        p.just_launched = false;
        p.detonation_timer = Some(0.1);
        state.projectiles.push(p);

        let (_, events) = r.resolve_turn(&state, &OrdersRequest::default(), &OrdersRequest::default());
        let first_hit = events.iter().position(|e| e.kind == EventKind::BlastDamage).unwrap();
        let detonation = events.iter().position(|e| e.kind == EventKind::TorpedoDetonated).unwrap();
        assert!(detonation < first_hit);
        // 149 damage ticks, not 150
        assert_eq!(count_kind(&events, EventKind::BlastDamage), 149);
    }

    fn count_kind(events: &[Event], kind: EventKind) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }
}
