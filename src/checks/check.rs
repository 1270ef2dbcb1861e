//! The check registry: a fixed, enumerable set of sanity checks with
//! stable names and a uniform dispatch surface.

use crate::checks::{proximity, route};
use crate::model::{Route, Stop, TransitSystem};
use serde::Serialize;
use std::collections::HashMap;

/// Every sanity check the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    NearbyDifferentStops,
    UnnamedStops,
    NoTerminus,
    UnconnectedSegments,
    SimilarNames,
}

impl CheckKind {
    /// All checks, in the order reports list them.
    pub const ALL: [CheckKind; 5] = [
        CheckKind::NearbyDifferentStops,
        CheckKind::UnnamedStops,
        CheckKind::NoTerminus,
        CheckKind::UnconnectedSegments,
        CheckKind::SimilarNames,
    ];

    /// Stable name used in reports and for CLI selection.
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::NearbyDifferentStops => "nearby different stops",
            CheckKind::UnnamedStops => "unnamed stops",
            CheckKind::NoTerminus => "no terminus",
            CheckKind::UnconnectedSegments => "unconnected segments",
            CheckKind::SimilarNames => "similar names",
        }
    }

    /// Looks a check up by its stable name.
    pub fn from_name(name: &str) -> Option<CheckKind> {
        CheckKind::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Whether the check needs cross-route context, or just the route.
    pub fn needs_system(self) -> bool {
        matches!(
            self,
            CheckKind::NearbyDifferentStops | CheckKind::SimilarNames
        )
    }

    /// Runs the check against one route. `system` supplies cross-route
    /// context for the checks that need it and is ignored by the rest.
    pub fn run<'a>(self, route: &'a Route, system: &'a TransitSystem) -> CheckOutcome<'a> {
        match self {
            CheckKind::NearbyDifferentStops => {
                CheckOutcome::StopConflicts(proximity::nearby_different_stops(route, system))
            }
            CheckKind::UnnamedStops => CheckOutcome::StopFlags(route::unnamed_stops(route)),
            CheckKind::NoTerminus => CheckOutcome::RouteFlag(route::no_terminus(route)),
            CheckKind::UnconnectedSegments => {
                CheckOutcome::SegmentFlags(route::unconnected_segments(route))
            }
            CheckKind::SimilarNames => {
                CheckOutcome::StopConflicts(proximity::similar_names(route, system))
            }
        }
    }
}

/// What a single check found on a single route. Borrows from the inspected
/// system: conflicting stops are references, never copies.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckOutcome<'a> {
    /// A single route-level flag ("no terminus").
    RouteFlag(bool),
    /// stop-id -> true ("unnamed stops").
    StopFlags(HashMap<&'a str, bool>),
    /// stop-id -> conflicting stop ("nearby different stops",
    /// "similar names").
    StopConflicts(HashMap<&'a str, &'a Stop>),
    /// segment-id -> true ("unconnected segments").
    SegmentFlags(HashMap<&'a str, bool>),
}

impl CheckOutcome<'_> {
    /// Number of flagged entities (1 or 0 for a route-level flag).
    pub fn finding_count(&self) -> usize {
        match self {
            CheckOutcome::RouteFlag(flagged) => usize::from(*flagged),
            CheckOutcome::StopFlags(m) | CheckOutcome::SegmentFlags(m) => m.len(),
            CheckOutcome::StopConflicts(m) => m.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }
}
