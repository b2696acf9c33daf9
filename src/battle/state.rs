//! Battle snapshot.
//!
//! A `BattleState` is a plain value graph: cloning it yields a fully
//! independent copy, which is what `snapshot` promises callers.

use serde::{Deserialize, Serialize};

use super::projectile::ProjectileState;
use super::vessel::{Side, VesselState, WeaponMode};
use super::zone::AreaDamageZone;
use crate::config::ParameterSet;
use crate::geometry::Vec2;

/// Complete battle state at the start (or end) of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub turn_number: u32,
    pub vessel_a: VesselState,
    pub vessel_b: VesselState,
    /// Active projectiles in launch order.
    #[serde(default)]
    pub projectiles: Vec<ProjectileState>,
    /// Active zones in creation order.
    #[serde(default)]
    pub zones: Vec<AreaDamageZone>,
}

impl BattleState {
    /// Creates a state with the two vessels and nothing in flight.
    pub fn new(vessel_a: VesselState, vessel_b: VesselState) -> Self {
        BattleState {
            turn_number: 0,
            vessel_a,
            vessel_b,
            projectiles: Vec::new(),
            zones: Vec::new(),
        }
    }

    /// Opening position: both vessels on the arena's horizontal mid-line,
    /// `spawn_distance` apart and facing each other, A on the west side.
    pub fn opening(params: &ParameterSet) -> Self {
        let arena = &params.arena;
        let mid_y = arena.height_units / 2.0;
        let west_x = (arena.width_units - arena.spawn_distance_units) / 2.0;
        let east_x = west_x + arena.spawn_distance_units;
        let ship = &params.ship;

        let vessel_a = VesselState::new(
            Vec2::new(west_x, mid_y),
            0.0,
            ship.starting_shields,
            ship.starting_ae,
            WeaponMode::Wide,
        );
        let vessel_b = VesselState::new(
            Vec2::new(east_x, mid_y),
            std::f64::consts::PI,
            ship.starting_shields,
            ship.starting_ae,
            WeaponMode::Wide,
        );
        BattleState::new(vessel_a, vessel_b)
    }

    /// Independent deep copy, e.g. for before/after transcript capture.
    pub fn snapshot(&self) -> BattleState {
        self.clone()
    }

    pub fn vessel(&self, side: Side) -> &VesselState {
        match side {
            Side::A => &self.vessel_a,
            Side::B => &self.vessel_b,
        }
    }

    pub fn vessel_mut(&mut self, side: Side) -> &mut VesselState {
        match side {
            Side::A => &mut self.vessel_a,
            Side::B => &mut self.vessel_b,
        }
    }

    /// Number of projectiles currently owned by `side`.
    pub fn active_projectiles(&self, side: Side) -> usize {
        self.projectiles.iter().filter(|p| p.owner == side).count()
    }

    /// The projectile with `id`, provided `side` owns it.
    pub fn owned_projectile_mut(&mut self, side: Side, id: &str) -> Option<&mut ProjectileState> {
        self.projectiles.iter_mut().find(|p| p.id == id && p.owner == side)
    }
}
