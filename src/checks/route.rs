//! Checks that need only a single route: membership scans and
//! pass-throughs of upstream-computed flags.

use crate::model::Route;
use std::collections::HashMap;

/// Stops with a missing or empty name, as stop-id -> true.
pub fn unnamed_stops(route: &Route) -> HashMap<&str, bool> {
    let mut unnamed = HashMap::new();

    for stop in &route.stops {
        if stop.nonempty_name().is_none() {
            unnamed.insert(stop.id.as_str(), true);
        }
    }

    unnamed
}

/// True when upstream terminus detection found no terminus. Pure
/// pass-through of the precomputed flag.
pub fn no_terminus(route: &Route) -> bool {
    route.no_terminus
}

/// Segments that failed the upstream connectivity check, as
/// segment-id -> true. Empty for a fully connected route.
pub fn unconnected_segments(route: &Route) -> HashMap<&str, bool> {
    let mut unconnected = HashMap::new();

    for seg in route.unconnected_segments() {
        unconnected.insert(seg.id.as_str(), true);
    }

    unconnected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Segment, Stop};

    fn route_with_stops(stops: Vec<Stop>) -> Route {
        Route {
            id: "r1".to_string(),
            stops,
            no_terminus: false,
            segments: vec![],
        }
    }

    fn stop(id: &str, name: Option<&str>) -> Stop {
        Stop {
            id: id.to_string(),
            name: name.map(str::to_string),
            lat: 0.0,
            lng: 0.0,
        }
    }

    #[test]
    fn test_unnamed_stops_flags_missing_and_empty() {
        let route = route_with_stops(vec![
            stop("s1", None),
            stop("s2", Some("")),
            stop("s3", Some("Main St")),
        ]);

        let flagged = unnamed_stops(&route);
        assert_eq!(flagged.get("s1"), Some(&true));
        assert_eq!(flagged.get("s2"), Some(&true));
        assert!(!flagged.contains_key("s3"));
    }

    #[test]
    fn test_no_terminus_is_a_pass_through() {
        let mut route = route_with_stops(vec![]);
        assert!(!no_terminus(&route));

        route.no_terminus = true;
        assert!(no_terminus(&route));
    }

    #[test]
    fn test_unconnected_segments_pass_through() {
        let mut route = route_with_stops(vec![]);
        route.segments = vec![
            Segment {
                id: "seg1".to_string(),
                connected: false,
            },
            Segment {
                id: "seg2".to_string(),
                connected: true,
            },
        ];

        let flagged = unconnected_segments(&route);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged.get("seg1"), Some(&true));
    }

    #[test]
    fn test_unconnected_segments_empty_route() {
        let route = route_with_stops(vec![]);
        assert!(unconnected_segments(&route).is_empty());
    }

    #[test]
    fn test_unnamed_stops_idempotent() {
        let route = route_with_stops(vec![stop("s1", None), stop("s2", Some("X"))]);
        assert_eq!(unnamed_stops(&route), unnamed_stops(&route));
    }
}
