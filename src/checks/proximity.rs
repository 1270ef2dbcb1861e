//! The two system-context checks: physically close stops with different
//! names, and similarly named stops that are physically far apart.

use crate::checks::distance::{levenshtein, normalize_name};
use crate::checks::SAME_STOP_SQ_DIST;
use crate::model::{Route, Stop, TransitSystem, sq_dist};
use std::collections::HashMap;

/// Edit-distance bar under which two names count as "similar". Chosen
/// empirically against the Kathmandu dataset.
const SIMILAR_NAME_MAX_EDITS: usize = 3;

/// Flags stops that sit within the same-stop distance of a stop with a
/// different non-empty name, as stop-id -> nearest such neighbor.
///
/// Only the single nearest qualifying neighbor is recorded per stop; the
/// order among equidistant neighbors is the spatial query's contract.
pub fn nearby_different_stops<'a>(
    route: &'a Route,
    system: &'a TransitSystem,
) -> HashMap<&'a str, &'a Stop> {
    let mut closest = HashMap::new();

    for stop in &route.stops {
        let neighbor = system
            .nearest_stops(stop.point(), 2, SAME_STOP_SQ_DIST)
            .into_iter()
            .find(|s| s.id != stop.id);

        let Some(neighbor) = neighbor else { continue };

        if let (Some(name), Some(other)) = (stop.nonempty_name(), neighbor.nonempty_name()) {
            if name != other {
                closest.insert(stop.id.as_str(), neighbor);
            }
        }
    }

    closest
}

/// Flags stops whose names are near-duplicates of a stop elsewhere in the
/// system, as stop-id -> conflicting stop.
///
/// Names are normalized (see [`normalize_name`]) and compared by edit
/// distance; a match only counts when the two stops are farther apart than
/// the same-stop distance. Similar names at the same spot are taken as an
/// intentional alias and left alone. When a stop matches several others,
/// the last match encountered wins: the result is a map, not a list.
///
/// This is the expensive check: every stop of the route against every stop
/// of every route in the system.
pub fn similar_names<'a>(
    route: &'a Route,
    system: &'a TransitSystem,
) -> HashMap<&'a str, &'a Stop> {
    let mut similar = HashMap::new();

    for stop in &route.stops {
        let Some(name) = stop.nonempty_name() else {
            continue;
        };
        let norm = normalize_name(name);

        for route2 in &system.routes {
            for stop2 in &route2.stops {
                let Some(name2) = stop2.nonempty_name() else {
                    continue;
                };
                let Some(edits) = levenshtein(&norm, &normalize_name(name2)) else {
                    continue;
                };
                if edits >= SIMILAR_NAME_MAX_EDITS {
                    continue;
                }

                if sq_dist(stop.point(), stop2.point()) > SAME_STOP_SQ_DIST {
                    similar.insert(stop.id.as_str(), stop2);
                }
                // At or below the distance: the stop itself, or an
                // intentional alias pair. Not flagged.
            }
        }
    }

    similar
}
