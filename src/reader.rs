use std::fs;
use std::path::{Path, PathBuf};

use geo::{LineString, Polygon};
use tracing::debug;

use crate::converter;
use crate::detect::{detect, PointKind};
use crate::envelope::{ring_polygon, Envelope};
use crate::error::{GpxError, Result};
use crate::model::GeoPoint;
use crate::options::ReadOptions;
use crate::parser;

/// Explicit two-state cache, reset only by a full reload.
#[derive(Debug, Clone)]
enum Cached<T> {
    Pending,
    Ready(T),
}

/// One parse session over a GPX document: the extracted point sequence, the
/// detected vocabulary, and the cached envelope. Reopening or reloading
/// re-parses from scratch and discards all prior state.
#[derive(Debug)]
pub struct GpxReader {
    source: PathBuf,
    kind: PointKind,
    points: Vec<GeoPoint>,
    envelope: Cached<Option<Envelope>>,
}

impl GpxReader {
    /// Open and fully parse a GPX document.
    ///
    /// `source` may be given with or without the `.gpx` extension; both
    /// resolve to the same file. Fails with [`GpxError::MissingDocument`]
    /// when no file exists there, and with [`GpxError::MalformedDocument`]
    /// when anything goes wrong between reading and extraction. The file
    /// handle is released as soon as the document text is in memory, on
    /// every path.
    pub fn open<P: AsRef<Path>>(source: P, options: ReadOptions) -> Result<Self> {
        let path = resolve_source(source.as_ref());
        if !path.is_file() {
            return Err(GpxError::MissingDocument { path });
        }

        let text = fs::read_to_string(&path).map_err(|e| GpxError::MalformedDocument {
            cause: e.to_string(),
        })?;

        let tree = parser::parse_document(&text)?;
        let kind = detect(&tree);
        let points = converter::to_geo_points(tree.points_of(kind), &options);
        debug!(
            path = %path.display(),
            kind = ?kind,
            records = points.len(),
            "parsed gpx document"
        );

        let mut reader = GpxReader {
            source: path,
            kind,
            points,
            envelope: Cached::Pending,
        };
        reader.envelope();
        Ok(reader)
    }

    /// Discard all in-memory state and re-parse the same source with
    /// default options. A full re-parse, not an incremental refresh.
    pub fn reload(&mut self) -> Result<()> {
        debug!(path = %self.source.display(), "reloading gpx document");
        let source = self.source.clone();
        *self = Self::open(source, ReadOptions::default())?;
        Ok(())
    }

    /// The resolved path this reader was opened from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The vocabulary the document was read through.
    pub fn kind(&self) -> PointKind {
        self.kind
    }

    pub fn record_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The record at `index`, or [`GpxError::IndexOutOfRange`] outside
    /// `[0, record_count)`.
    pub fn record(&self, index: usize) -> Result<&GeoPoint> {
        self.points.get(index).ok_or(GpxError::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    /// Read-only view of the full point sequence, in document order.
    pub fn records(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Yields each record once, in order. Finite and restartable; calling
    /// again produces a fresh iterator over the same state.
    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// The point sequence as a line string, in document order, not closed.
    pub fn as_line_string(&self) -> LineString<f64> {
        converter::line_string(&self.points)
    }

    /// The point sequence closed into a ring and wrapped as a polygon.
    pub fn as_polygon(&self) -> Polygon<f64> {
        ring_polygon(&self.points)
    }

    /// The cached envelope, computed on first access. `None` when the
    /// document matched zero points.
    pub fn envelope(&mut self) -> Option<&Envelope> {
        if let Cached::Pending = self.envelope {
            self.envelope = Cached::Ready(Envelope::of_points(&self.points));
        }
        match &self.envelope {
            Cached::Ready(env) => env.as_ref(),
            Cached::Pending => None,
        }
    }
}

impl<'a> IntoIterator for &'a GpxReader {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Append the `.gpx` extension unless the source already ends with it.
fn resolve_source(source: &Path) -> PathBuf {
    match source.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("gpx") => source.to_path_buf(),
        _ => {
            let mut os = source.as_os_str().to_owned();
            os.push(".gpx");
            PathBuf::from(os)
        }
    }
}
