//! Planar vector type and heading arithmetic.
//!
//! Headings are radians measured counterclockwise from the +X axis. Stored
//! headings always live in `[0, 2π)`; bearings between two headings are
//! reported in `(-π, π]`.

use std::f64::consts::{PI, TAU};

/// Position/velocity vector used throughout the simulation.
pub type Vec2 = glam::DVec2;

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn wrap_heading(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed difference `to - from`, normalized to `(-π, π]`.
#[inline]
pub fn signed_bearing(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Absolute direction from `from` to `to`, or 0 when the points coincide.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector pointing along `angle`.
#[inline]
pub fn unit_from_angle(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
