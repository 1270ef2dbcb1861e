//! Headless sanity checks over a loaded transit system.
//!
//! Each check is a pure function from a route (plus, for the cross-route
//! checks, the whole system) to a map of flagged entities. Nothing here
//! mutates or repairs data; findings reference the inspected stops and
//! segments directly.

pub mod aggregate;
pub mod check;
pub mod distance;
pub mod proximity;
pub mod route;

/// Squared-distance bound under which two stops count as "the same place".
///
/// Squared planar degrees, so only meaningful at metro scale. An
/// empirical magic number.
pub const SAME_STOP_SQ_DIST: f64 = 0.0005 * 0.0005;
