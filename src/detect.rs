use serde::{Deserialize, Serialize};

use crate::parser::GpxTree;

/// Which point-element vocabulary a document is read through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    TrackPoint,
    Waypoint,
    RoutePoint,
}

impl PointKind {
    pub fn tag(self) -> &'static str {
        match self {
            PointKind::TrackPoint => "trkpt",
            PointKind::Waypoint => "wpt",
            PointKind::RoutePoint => "rtept",
        }
    }
}

/// Pick the vocabulary for a parsed document, in priority order: track
/// points win over waypoints, waypoints over route points. Route points are
/// the fallback even when nothing matched at all, so extraction on an empty
/// document yields zero points rather than an error.
pub fn detect(tree: &GpxTree) -> PointKind {
    if !tree.track_points.is_empty() {
        PointKind::TrackPoint
    } else if !tree.waypoints.is_empty() {
        PointKind::Waypoint
    } else {
        PointKind::RoutePoint
    }
}
