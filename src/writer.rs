use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::model::{GeoPoint, GpxOutput, Metadata, NamedLineString};
use crate::options::WriterConfig;

/// Serialize metadata, waypoints, and tracks into one GPX XML document.
///
/// A pure serializer: fields are emitted only when present, never empty, and
/// the only errors are the ones the underlying XML writer raises. Routes and
/// polygons have no write path.
pub fn write_gpx(doc: &GpxOutput, config: &WriterConfig) -> io::Result<String> {
    let mut w = match config.indent {
        Some(n) => Writer::new_with_indent(Vec::new(), b' ', n),
        None => Writer::new(Vec::new()),
    };

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut gpx = BytesStart::new("gpx");
    for (key, value) in &config.root_attributes {
        gpx.push_attribute((key.as_str(), value.as_str()));
    }
    w.write_event(Event::Start(gpx))?;

    if let Some(meta) = &doc.metadata {
        write_metadata(&mut w, meta)?;
    }
    for wpt in &doc.waypoints {
        write_point(
            &mut w,
            "wpt",
            &wpt.point,
            wpt.name.as_deref(),
            wpt.description.as_deref(),
        )?;
    }
    for trk in &doc.tracks {
        write_track(&mut w, trk)?;
    }

    w.write_event(Event::End(BytesEnd::new("gpx")))?;

    String::from_utf8(w.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_metadata<W: Write>(w: &mut Writer<W>, meta: &Metadata) -> io::Result<()> {
    w.write_event(Event::Start(BytesStart::new("metadata")))?;
    if let Some(name) = &meta.name {
        write_text_element(w, "name", name)?;
    }
    if let Some(desc) = &meta.description {
        write_text_element(w, "desc", desc)?;
    }
    if let Some(author) = &meta.author {
        w.write_event(Event::Start(BytesStart::new("author")))?;
        if let Some(name) = &author.name {
            write_text_element(w, "name", name)?;
        }
        if let Some(link) = &author.link {
            write_link(w, link)?;
        }
        w.write_event(Event::End(BytesEnd::new("author")))?;
    }
    if let Some(link) = &meta.link {
        write_link(w, link)?;
    }
    if let Some(keywords) = &meta.keywords {
        write_text_element(w, "keywords", keywords)?;
    }
    if let Some(bounds) = &meta.bounds {
        let mut b = BytesStart::new("bounds");
        b.push_attribute(("minlat", bounds.min_y.to_string().as_str()));
        b.push_attribute(("minlon", bounds.min_x.to_string().as_str()));
        b.push_attribute(("maxlat", bounds.max_y.to_string().as_str()));
        b.push_attribute(("maxlon", bounds.max_x.to_string().as_str()));
        w.write_event(Event::Empty(b))?;
    }
    w.write_event(Event::End(BytesEnd::new("metadata")))
}

fn write_track<W: Write>(w: &mut Writer<W>, trk: &NamedLineString) -> io::Result<()> {
    w.write_event(Event::Start(BytesStart::new("trk")))?;
    if let Some(name) = &trk.name {
        write_text_element(w, "name", name)?;
    }
    if let Some(desc) = &trk.description {
        write_text_element(w, "desc", desc)?;
    }
    w.write_event(Event::Start(BytesStart::new("trkseg")))?;
    for point in &trk.points {
        write_point(w, "trkpt", point, None, None)?;
    }
    w.write_event(Event::End(BytesEnd::new("trkseg")))?;
    w.write_event(Event::End(BytesEnd::new("trk")))
}

fn write_point<W: Write>(
    w: &mut Writer<W>,
    tag: &str,
    point: &GeoPoint,
    name: Option<&str>,
    desc: Option<&str>,
) -> io::Result<()> {
    let mut start = BytesStart::new(tag);
    // Output order is lat before lon, the reverse of the read order.
    start.push_attribute(("lat", point.y.to_string().as_str()));
    start.push_attribute(("lon", point.x.to_string().as_str()));

    if point.z.is_none() && point.m.is_none() && name.is_none() && desc.is_none() {
        return w.write_event(Event::Empty(start));
    }

    w.write_event(Event::Start(start))?;
    if let Some(z) = point.z {
        write_text_element(w, "ele", &z.to_string())?;
    }
    if let Some(m) = &point.m {
        write_text_element(w, "time", m)?;
    }
    if let Some(name) = name {
        write_text_element(w, "name", name)?;
    }
    if let Some(desc) = desc {
        write_text_element(w, "desc", desc)?;
    }
    w.write_event(Event::End(BytesEnd::new(tag)))
}

fn write_link<W: Write>(w: &mut Writer<W>, href: &str) -> io::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("href", href));
    w.write_event(Event::Empty(link))
}

fn write_text_element<W: Write>(w: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    w.write_event(Event::Start(BytesStart::new(tag)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))
}
