use geo::{coord, Coord, Point};
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

/// A point in geographic space, always referenced to WGS84 (EPSG:4326).
///
/// Longitude (`x`) and latitude (`y`) are always present; elevation (`z`)
/// and timestamp (`m`, kept as opaque text) are optional dimensions whose
/// presence is the `Option` itself, never a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<String>,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        GeoPoint {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn crs(&self) -> &'static str {
        "EPSG:4326"
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    pub fn has_m(&self) -> bool {
        self.m.is_some()
    }

    /// The 2D coordinate, dropping the optional dimensions.
    pub fn coord(&self) -> Coord<f64> {
        coord! { x: self.x, y: self.y }
    }

    /// True when both planar coordinates match exactly. Used for ring
    /// closing, where z/m differences do not matter.
    pub fn coord_eq(&self, other: &GeoPoint) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<&GeoPoint> for Point<f64> {
    fn from(p: &GeoPoint) -> Self {
        Point::from(p.coord())
    }
}

/// A point with an optional name/description, as written to a `<wpt>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub point: GeoPoint,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NamedPoint {
    pub fn new(point: GeoPoint) -> Self {
        NamedPoint {
            point,
            name: None,
            description: None,
        }
    }
}

/// An ordered point sequence plus optional name and description, written
/// as one `<trk>` with a single `<trkseg>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedLineString {
    pub points: Vec<GeoPoint>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Document-level fields for the `<metadata>` block. Every field is
/// optional; absent fields are omitted from the output entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<Author>,
    pub link: Option<String>,
    pub keywords: Option<String>,
    pub bounds: Option<Envelope>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub link: Option<String>,
}

/// Everything the writer can emit into one GPX document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpxOutput {
    pub metadata: Option<Metadata>,
    pub waypoints: Vec<NamedPoint>,
    pub tracks: Vec<NamedLineString>,
}
