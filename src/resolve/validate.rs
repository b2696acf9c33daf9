//! Order validation.
//!
//! Movement and rotation are paid for continuously, so a side must be able
//! to afford the whole turn up front. There is no partial throttling: if the
//! combined cost exceeds current energy, the vessel holds still for the turn.

use crate::battle::{MovementDirection, OrdersRequest, RotationCommand, VesselState};
use crate::config::ParameterSet;

/// The movement/rotation pair actually flown for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maneuver {
    pub movement: MovementDirection,
    pub rotation: RotationCommand,
}

impl Maneuver {
    pub const HOLD: Maneuver = Maneuver {
        movement: MovementDirection::Stop,
        rotation: RotationCommand::None,
    };
}

/// Downgrades unaffordable orders to STOP/NONE.
pub fn validate_orders(params: &ParameterSet, vessel: &VesselState, orders: &OrdersRequest) -> Maneuver {
    let cost = params.turn_cost(orders.movement, orders.rotation);
    if cost > vessel.energy {
        Maneuver::HOLD
    } else {
        Maneuver {
            movement: orders.movement,
            rotation: orders.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{WeaponAction, WeaponMode};
    use crate::geometry::Vec2;

    fn vessel(energy: f64) -> VesselState {
        VesselState::new(Vec2::ZERO, 0.0, 100.0, energy, WeaponMode::Wide)
    }

    #[test]
    fn affordable_orders_pass_through() {
        let params = ParameterSet::default();
        let orders = OrdersRequest::new(
            MovementDirection::BackwardLeft,
            RotationCommand::HardRight,
            WeaponAction::Maintain,
        );
        let m = validate_orders(&params, &vessel(100.0), &orders);
        assert_eq!(m.movement, MovementDirection::BackwardLeft);
        assert_eq!(m.rotation, RotationCommand::HardRight);
    }

    #[test]
    fn unaffordable_orders_hold() {
        let params = ParameterSet::default();
        // (0.80 + 0.33) * 15 = 16.95
        let orders = OrdersRequest::new(
            MovementDirection::BackwardRight,
            RotationCommand::HardLeft,
            WeaponAction::Maintain,
        );
        assert_eq!(validate_orders(&params, &vessel(3.0), &orders), Maneuver::HOLD);
        assert_eq!(validate_orders(&params, &vessel(16.9), &orders), Maneuver::HOLD);
    }

    #[test]
    fn exact_budget_is_affordable() {
        let mut params = ParameterSet::default();
        params.movement.forward_ae_per_second = 1.0;
        params.rotation.none_ae_per_second = 0.0;
        let orders = OrdersRequest::new(MovementDirection::Forward, RotationCommand::None, WeaponAction::Maintain);
        let m = validate_orders(&params, &vessel(15.0), &orders);
        assert_eq!(m.movement, MovementDirection::Forward);
    }

    #[test]
    fn free_orders_always_pass() {
        let params = ParameterSet::default();
        let m = validate_orders(&params, &vessel(0.0), &OrdersRequest::default());
        assert_eq!(m, Maneuver::HOLD);
    }
}
