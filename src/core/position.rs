//! U-shaped position weighting
//!
//! Models the "lost in the middle" effect: models attend more to the
//! beginning and end of a context window than to its middle.

use crate::{POSITION_WEIGHT_FLOOR, POSITION_WEIGHT_RANGE};

/// Attention weight for a normalized transcript position in [0, 1].
///
/// weight(p) = 0.6 + 0.4 * (2*(p - 0.5))^2
///
/// 1.0 at the edges, 0.6 at the midpoint, symmetric about 0.5.
pub fn position_weight(position: f64) -> f64 {
    let distance_from_middle = (position - 0.5).abs() * 2.0;
    POSITION_WEIGHT_FLOOR + POSITION_WEIGHT_RANGE * distance_from_middle * distance_from_middle
}
