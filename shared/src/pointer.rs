//! Mapping a wheel rotation back to the sector under the pointer.
//!
//! The pointer never moves. It sits at angle 0 of the wheel's own frame when
//! the wheel is unrotated, and hosts paint wheel-frame angle 0 at 12 o'clock.
//! Rotating the wheel clockwise by `angle` therefore brings wheel-frame angle
//! `-angle` under the pointer. The spin animator derives its landing angle
//! from the same relation, see [`crate::spin`].

use std::f64::consts::TAU;

use crate::error::{WheelError, WheelResult};
use crate::layout::Sector;

/// Reduces any angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Wheel-frame angle currently under the pointer for a wheel rotated by `angle`.
pub fn pointer_position(angle: f64) -> f64 {
    normalize_angle(-angle)
}

/// Returns the sector under the pointer for rotation `angle`.
pub fn resolve_pointer(sectors: &[Sector], angle: f64) -> WheelResult<&Sector> {
    let position = pointer_position(angle);
    let index = sectors.partition_point(|sector| sector.end_angle <= position);
    match sectors.get(index) {
        Some(sector) if sector.contains(position) => Ok(sector),
        _ => {
            log::error!(
                "pointer at {} (rotation {}) is outside all {} sectors",
                position,
                angle,
                sectors.len()
            );
            Err(WheelError::NoSector { angle, position })
        }
    }
}
