//! In-memory transit data model: stops, segments, routes, and the system
//! that owns them.
//!
//! Coordinates are raw lat/lng degrees treated as a flat plane; all
//! proximity math is squared Euclidean distance, which only holds up at
//! metro scale (a single city's worth of data).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;
use thiserror::Error;

/// A named geographic point served by one or more routes.
///
/// `name` is optional on purpose: unnamed stops are a data condition the
/// checks flag, not a load error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Stop {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    /// The stop's name, if present and non-empty.
    pub fn nonempty_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn point(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// A connecting edge between stops within a route. The `connected` flag is
/// computed upstream (by the route-geometry pipeline) and only read here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    pub id: String,
    #[serde(default)]
    pub connected: bool,
}

/// An ordered sequence of stops plus precomputed connectivity metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Route {
    pub id: String,
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// True when upstream terminus detection found no terminus for this
    /// route. Surfaced verbatim by the "no terminus" check.
    #[serde(default)]
    pub no_terminus: bool,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Route {
    /// Segments whose upstream connectivity check failed.
    pub fn unconnected_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.connected)
    }
}

/// The full collection of routes, with cross-route spatial queries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransitSystem {
    pub routes: Vec<Route>,
}

impl TransitSystem {
    /// Up to `k` stops within `max_sq_dist` of `point`, nearest first.
    ///
    /// Stops shared between routes are considered once (by id). This is a
    /// linear scan; ties at equal distance keep scan order. A real spatial
    /// index could replace it behind the same signature.
    pub fn nearest_stops(&self, point: [f64; 2], k: usize, max_sq_dist: f64) -> Vec<&Stop> {
        let mut seen = HashSet::new();
        let mut hits: Vec<(&Stop, f64)> = Vec::new();

        for stop in self.routes.iter().flat_map(|r| r.stops.iter()) {
            if !seen.insert(stop.id.as_str()) {
                continue;
            }
            let d = sq_dist(stop.point(), point);
            if d <= max_sq_dist {
                hits.push((stop, d));
            }
        }

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.truncate(k);
        hits.into_iter().map(|(s, _)| s).collect()
    }

    /// Structural validation run once after loading.
    ///
    /// Routes may share stops, but an id must always mean the same stop:
    /// re-occurrences with a different name or coordinates are conflicts.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut by_id: HashMap<&str, &Stop> = HashMap::new();

        for route in &self.routes {
            for stop in &route.stops {
                if !stop.lat.is_finite() || !stop.lng.is_finite() {
                    return Err(ModelError::BadCoordinate {
                        stop_id: stop.id.clone(),
                        lat: stop.lat,
                        lng: stop.lng,
                    });
                }
                match by_id.get(stop.id.as_str()) {
                    Some(first) if *first != stop => {
                        return Err(ModelError::ConflictingStop {
                            stop_id: stop.id.clone(),
                            route_id: route.id.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_id.insert(stop.id.as_str(), stop);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Squared Euclidean distance between two lat/lng points on the flat-plane
/// approximation.
pub fn sq_dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// Structural problems that make a dataset unusable, as opposed to the
/// data-quality conditions the checks report.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("stop {stop_id} has a non-finite coordinate ({lat}, {lng})")]
    BadCoordinate { stop_id: String, lat: f64, lng: f64 },

    #[error("stop id {stop_id} reused with different name or coordinates (route {route_id})")]
    ConflictingStop { stop_id: String, route_id: String },
}
