//! Runs every check over every route and folds the results into a single
//! serializable report.

use crate::checks::check::{CheckKind, CheckOutcome};
use crate::model::{Route, TransitSystem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Findings for a single route, keyed by check name.
#[derive(Debug, Serialize)]
pub struct RouteReport<'a> {
    pub route_id: &'a str,
    pub stop_count: usize,
    pub findings: HashMap<&'static str, CheckOutcome<'a>>,
}

impl RouteReport<'_> {
    /// Total flagged entities across all checks on this route.
    pub fn finding_count(&self) -> usize {
        self.findings.values().map(CheckOutcome::finding_count).sum()
    }
}

/// Complete report over a system: one [`RouteReport`] per route.
#[derive(Debug, Serialize)]
pub struct SystemReport<'a> {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub route_count: usize,
    pub total_findings: usize,
    pub routes: Vec<RouteReport<'a>>,
}

/// Runs every registered check against one route.
pub fn run_route<'a>(route: &'a Route, system: &'a TransitSystem) -> RouteReport<'a> {
    let mut findings = HashMap::new();

    for check in CheckKind::ALL {
        let outcome = check.run(route, system);
        debug!(
            route_id = %route.id,
            check = check.name(),
            findings = outcome.finding_count(),
            "Check complete"
        );
        findings.insert(check.name(), outcome);
    }

    RouteReport {
        route_id: route.id.as_str(),
        stop_count: route.stops.len(),
        findings,
    }
}

/// Runs every check against every route of the system.
pub fn run_system(system: &TransitSystem) -> SystemReport<'_> {
    let routes: Vec<RouteReport> = system
        .routes
        .iter()
        .map(|route| run_route(route, system))
        .collect();

    let total_findings = routes.iter().map(RouteReport::finding_count).sum();

    SystemReport {
        schema_version: 1,
        generated_at: Utc::now(),
        route_count: routes.len(),
        total_findings,
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Segment, Stop};

    fn sample_system() -> TransitSystem {
        TransitSystem {
            routes: vec![
                Route {
                    id: "ring".to_string(),
                    stops: vec![
                        Stop {
                            id: "s1".to_string(),
                            name: Some("Ratna Park".to_string()),
                            lat: 27.70,
                            lng: 85.31,
                        },
                        Stop {
                            id: "s2".to_string(),
                            name: None,
                            lat: 27.71,
                            lng: 85.32,
                        },
                    ],
                    no_terminus: true,
                    segments: vec![Segment {
                        id: "seg1".to_string(),
                        connected: false,
                    }],
                },
                Route {
                    id: "express".to_string(),
                    stops: vec![Stop {
                        id: "s3".to_string(),
                        name: Some("Ratna Prak".to_string()),
                        lat: 27.75,
                        lng: 85.36,
                    }],
                    no_terminus: false,
                    segments: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_run_route_covers_every_check() {
        let system = sample_system();
        let report = run_route(&system.routes[0], &system);

        assert_eq!(report.findings.len(), CheckKind::ALL.len());
        for check in CheckKind::ALL {
            assert!(report.findings.contains_key(check.name()));
        }
    }

    #[test]
    fn test_run_route_findings() {
        let system = sample_system();
        let report = run_route(&system.routes[0], &system);

        assert_eq!(
            report.findings["no terminus"],
            CheckOutcome::RouteFlag(true)
        );
        assert_eq!(report.findings["unnamed stops"].finding_count(), 1);
        assert_eq!(report.findings["unconnected segments"].finding_count(), 1);
        // "Ratna Park" vs "Ratna Prak" across routes, well apart.
        assert_eq!(report.findings["similar names"].finding_count(), 1);
    }

    #[test]
    fn test_run_system_totals() {
        let system = sample_system();
        let report = run_system(&system);

        assert_eq!(report.schema_version, 1);
        assert_eq!(report.route_count, 2);
        assert_eq!(
            report.total_findings,
            report.routes.iter().map(RouteReport::finding_count).sum::<usize>()
        );
        assert!(report.total_findings > 0);
    }

    #[test]
    fn test_run_system_idempotent() {
        let system = sample_system();
        let a = run_system(&system);
        let b = run_system(&system);

        for (ra, rb) in a.routes.iter().zip(&b.routes) {
            assert_eq!(ra.route_id, rb.route_id);
            assert_eq!(ra.findings, rb.findings);
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let system = sample_system();
        let report = run_system(&system);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"schema_version\":1"));
        assert!(json.contains("ring"));
    }
}
