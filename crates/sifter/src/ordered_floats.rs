// Standard Library Imports
use std::ops::RangeInclusive;

// External Crate Imports
use ordered_float::OrderedFloat;

// Local Crate Imports
use crate::tolerance_window::ToleranceWindow;

// Public API ==========================================================================================================

/// A mass (or m/z) value with a total order, so it can key a `BTreeMap` or `BTreeSet`
pub type Mz = OrderedFloat<f64>;

impl ToleranceWindow for Mz {
    fn tolerance_window(mass: f64, tolerance: f64) -> RangeInclusive<Self> {
        let slack = (mass.abs() + tolerance) * WINDOW_SLACK;
        Self(mass - tolerance - slack)..=Self(mass + tolerance + slack)
    }
}

// Constants ===========================================================================================================

/// A few ulps of relative padding, covering the rounding of `mass ± tolerance`
const WINDOW_SLACK: f64 = 4.0 * f64::EPSILON;

// Module Tests ========================================================================================================
