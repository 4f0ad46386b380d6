use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::detect::PointKind;

type Result<T> = std::result::Result<T, quick_xml::Error>;

/// A GPX document parsed down to its point elements, one ordered bucket per
/// vocabulary. Track points are flattened across every `<trk>`/`<trkseg>`
/// into a single document-order sequence.
#[derive(Debug, Default)]
pub struct GpxTree {
    pub waypoints: Vec<RawPoint>,
    pub route_points: Vec<RawPoint>,
    pub track_points: Vec<RawPoint>,
}

impl GpxTree {
    pub fn points_of(&self, kind: PointKind) -> &[RawPoint] {
        match kind {
            PointKind::TrackPoint => &self.track_points,
            PointKind::Waypoint => &self.waypoints,
            PointKind::RoutePoint => &self.route_points,
        }
    }
}

/// A point element as it appears in the document, before read options
/// decide which dimensions to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub lon: f64,
    pub lat: f64,
    pub ele: Option<f64>,
    pub time: Option<String>,
}

/// Permissive numeric coercion: parse as `f64`, returning `0.0` for empty,
/// missing, or non-numeric text. Never fails. This is the documented policy
/// for `lon`/`lat` attributes and `<ele>` content, not an accident.
pub fn lenient_f64(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse a GPX XML string into its point-element tree.
///
/// Point elements are recognized by local name (`wpt`, `rtept`, `trkpt`)
/// wherever they appear, so container nesting and unknown siblings are
/// irrelevant. Markers inside comments or attribute values never match.
pub fn parse_document(xml: &str) -> Result<GpxTree> {
    let mut reader = Reader::from_str(xml);
    let mut tree = GpxTree::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"wpt" => tree.waypoints.push(parse_point(&e, &mut reader)?),
                b"rtept" => tree.route_points.push(parse_point(&e, &mut reader)?),
                b"trkpt" => tree.track_points.push(parse_point(&e, &mut reader)?),
                // Containers (gpx, trk, trkseg, rte, metadata) are descended
                // into rather than skipped.
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"wpt" => tree.waypoints.push(bare_point(&e)?),
                b"rtept" => tree.route_points.push(bare_point(&e)?),
                b"trkpt" => tree.track_points.push(bare_point(&e)?),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(tree)
}

/// Read `lon`/`lat` attributes off a point element's start tag.
/// Missing or malformed values coerce to 0.0; only structurally broken
/// attribute syntax is an error.
fn parse_coords(e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lon = 0.0;
    let mut lat = 0.0;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(quick_xml::Error::from)?;
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match attr.key.local_name().as_ref() {
            b"lon" => lon = lenient_f64(val),
            b"lat" => lat = lenient_f64(val),
            _ => {}
        }
    }

    Ok((lon, lat))
}

fn bare_point(e: &BytesStart<'_>) -> Result<RawPoint> {
    let (lon, lat) = parse_coords(e)?;
    Ok(RawPoint {
        lon,
        lat,
        ele: None,
        time: None,
    })
}

/// Parse a point element (wpt, rtept, trkpt) and its children.
/// Called after receiving Event::Start for the point element.
fn parse_point<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<RawPoint> {
    let (lon, lat) = parse_coords(start)?;
    let mut point = RawPoint {
        lon,
        lat,
        ele: None,
        time: None,
    };
    let end_name = start.name().0.to_vec(); // own the end tag name for comparison

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader.read_text(e.name())?;
                    point.ele = Some(lenient_f64(&text));
                }
                b"time" => {
                    point.time = Some(read_text_owned(reader, &e)?);
                }
                _ => {
                    // Skip unknown/extensions elements
                    reader.read_to_end(e.name())?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(point)
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references.
fn read_text_owned<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(raw);
            }
            Ok(Event::CData(e)) => {
                let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(s);
            }
            Ok(Event::GeneralRef(e)) => {
                // Character references (&#60; &#x3C;) and predefined entities
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    match name {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {} // Unknown entity, skip
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(text)
}
