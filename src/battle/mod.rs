//! Battle representation.
//!
//! Contains the vessel, projectile and area-damage zone records, the
//! aggregate battle snapshot, and the per-turn order types.

pub mod order;
pub mod projectile;
pub mod state;
pub mod vessel;
pub mod zone;

pub use order::{
    MovementDirection, OrdersRequest, ProjectileTurn, RotationCommand, WeaponAction, ALL_MOVEMENTS,
    ALL_ROTATIONS,
};
pub use projectile::ProjectileState;
pub use state::BattleState;
pub use vessel::{Side, VesselState, WeaponMode, ALL_SIDES};
pub use zone::{AreaDamageZone, ZonePhase};
