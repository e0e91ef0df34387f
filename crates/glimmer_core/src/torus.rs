//! Periodic-boundary geometry on the integer grid.
//!
//! Both axes wrap independently. Distances between sites use the minimum
//! image convention: a raw coordinate difference is folded into
//! `[-extent/2, extent/2]` (integer half) so the shorter way round wins.

use glimmer_data::Offset;

/// Moves `coord` by `step` on an axis of length `extent`, wrapping around.
///
/// `extent` must be non-zero.
#[inline]
#[must_use]
pub fn wrap(coord: u16, step: i32, extent: u16) -> u16 {
    (i32::from(coord) + step).rem_euclid(i32::from(extent)) as u16
}

/// Folds a raw difference on one axis into its minimum image.
#[inline]
#[must_use]
pub fn min_image(delta: i32, extent: u16) -> i32 {
    let extent = i32::from(extent);
    let half = extent / 2;
    if delta > half {
        delta - extent
    } else if delta < -half {
        delta + extent
    } else {
        delta
    }
}

/// Minimum-image displacement from `from` to `to`.
///
/// Returns `None` when the two sites coincide, which callers treat as
/// "no usable direction".
#[must_use]
pub fn displacement(from: (u16, u16), to: (u16, u16), size: (u16, u16)) -> Option<Offset> {
    let dx = i32::from(to.0) - i32::from(from.0);
    let dy = i32::from(to.1) - i32::from(from.1);
    if dx == 0 && dy == 0 {
        return None;
    }
    Some(Offset::new(min_image(dx, size.0), min_image(dy, size.1)))
}
