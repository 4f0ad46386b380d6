use geo::LineString;

use crate::model::GeoPoint;
use crate::options::ReadOptions;
use crate::parser::RawPoint;

/// Turn raw point elements into geometry points, applying the optional
/// dimension flags. A dimension is attached only when the flag is set AND
/// the source element carried it; an absent element stays absent regardless
/// of flags.
pub fn to_geo_points(raw: &[RawPoint], opts: &ReadOptions) -> Vec<GeoPoint> {
    raw.iter()
        .map(|rp| {
            let mut point = GeoPoint::new(rp.lon, rp.lat);
            if opts.with_elevation {
                point.z = rp.ele;
            }
            if opts.with_timestamp {
                point.m = rp.time.clone();
            }
            point
        })
        .collect()
}

/// The sequence as a line string, in document order, not closed.
pub fn line_string(points: &[GeoPoint]) -> LineString<f64> {
    LineString::new(points.iter().map(GeoPoint::coord).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{detect, PointKind};
    use crate::parser::parse_document;

    fn raw_track(xml: &str) -> Vec<RawPoint> {
        let tree = parse_document(xml).unwrap();
        assert_eq!(detect(&tree), PointKind::TrackPoint);
        tree.track_points
    }

    const TRACK: &str = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg>
    <trkpt lat="2.0" lon="1.0"><ele>10</ele><time>2025-01-01T00:00:00Z</time></trkpt>
    <trkpt lat="4.0" lon="3.0"><ele>20</ele><time>2025-01-01T00:01:00Z</time></trkpt>
  </trkseg></trk>
</gpx>"#;

    #[test]
    fn test_both_dimensions_by_default() {
        let points = to_geo_points(&raw_track(TRACK), &ReadOptions::default());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, 1.0);
        assert_eq!(points[0].y, 2.0);
        assert_eq!(points[0].z, Some(10.0));
        assert_eq!(points[0].m.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(points[0].crs(), "EPSG:4326");
    }

    #[test]
    fn test_elevation_flag_off_drops_z() {
        let opts = ReadOptions {
            with_elevation: false,
            ..Default::default()
        };
        let points = to_geo_points(&raw_track(TRACK), &opts);
        assert!(points.iter().all(|p| !p.has_z()));
        assert!(points.iter().all(|p| p.has_m()));
    }

    #[test]
    fn test_timestamp_flag_off_drops_m() {
        let opts = ReadOptions {
            with_timestamp: false,
            ..Default::default()
        };
        let points = to_geo_points(&raw_track(TRACK), &opts);
        assert!(points.iter().all(|p| !p.has_m()));
        assert!(points.iter().all(|p| p.has_z()));
    }

    #[test]
    fn test_absent_elements_stay_absent_despite_flags() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg><trkpt lat="2.0" lon="1.0"/></trkseg></trk>
</gpx>"#;
        let points = to_geo_points(&raw_track(xml), &ReadOptions::default());
        assert!(!points[0].has_z());
        assert!(!points[0].has_m());
    }

    #[test]
    fn test_line_string_preserves_order_and_stays_open() {
        let points = to_geo_points(&raw_track(TRACK), &ReadOptions::default());
        let ls = line_string(&points);
        assert_eq!(ls.0.len(), 2);
        assert_eq!(ls.0[0].x, 1.0);
        assert_eq!(ls.0[1].y, 4.0);
    }
}
