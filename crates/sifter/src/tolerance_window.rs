// Standard Library Imports
use std::ops::RangeInclusive;

// Public API ==========================================================================================================

/// A range of keys covering every value within `tolerance` of `mass`, padded so that rounding never drops a match
///
/// The window may admit values that are a few ulps too far away, so callers re-check the exact distance.
pub trait ToleranceWindow: Sized {
    fn tolerance_window(mass: f64, tolerance: f64) -> RangeInclusive<Self>;
}
