use geo::{BoundingRect, Coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::model::GeoPoint;

/// Axis-aligned bounding box over a point set. The planar bounds are always
/// present; the z and m ranges exist only when every point in the set
/// carries that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub z_range: Option<(f64, f64)>,
    pub m_range: Option<(String, String)>,
}

impl Envelope {
    /// Compute the envelope of a point sequence by closing it into a ring,
    /// building a polygon, and taking the polygon's bounding rect.
    /// Returns `None` for an empty sequence; there is no envelope of nothing.
    pub fn of_points(points: &[GeoPoint]) -> Option<Envelope> {
        let rect = ring_polygon(points).bounding_rect()?;
        Some(Envelope {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
            z_range: z_range(points),
            m_range: m_range(points),
        })
    }

    /// The planar bounds as a geometry value.
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
    }
}

/// The sequence's coordinates closed into a ring: if the first and last
/// points differ, a copy of the first coordinate is appended. The input is
/// never mutated.
pub fn close_ring(points: &[GeoPoint]) -> Vec<Coord<f64>> {
    let mut ring: Vec<Coord<f64>> = points.iter().map(GeoPoint::coord).collect();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if !first.coord_eq(last) {
            ring.push(first.coord());
        }
    }
    ring
}

/// The sequence closed into a ring and wrapped as a polygon with no holes.
pub fn ring_polygon(points: &[GeoPoint]) -> Polygon<f64> {
    Polygon::new(LineString::new(close_ring(points)), Vec::new())
}

fn z_range(points: &[GeoPoint]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for p in points {
        let z = p.z?;
        range = Some(match range {
            None => (z, z),
            Some((lo, hi)) => (lo.min(z), hi.max(z)),
        });
    }
    range
}

fn m_range(points: &[GeoPoint]) -> Option<(String, String)> {
    // Lexicographic order; ISO-8601 timestamps sort chronologically that way.
    let mut range: Option<(&str, &str)> = None;
    for p in points {
        let m = p.m.as_deref()?;
        range = Some(match range {
            None => (m, m),
            Some((lo, hi)) => (lo.min(m), hi.max(m)),
        });
    }
    range.map(|(lo, hi)| (lo.to_string(), hi.to_string()))
}
