use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, GpxError>;

#[derive(Debug)]
pub enum GpxError {
    /// The resolved source path does not exist. Raised at open time,
    /// before any parsing is attempted.
    MissingDocument { path: PathBuf },
    /// Any failure during parsing, detection, or extraction, wrapping the
    /// underlying cause message. Raised by the reader, never by the lower
    /// layers themselves.
    MalformedDocument { cause: String },
    /// A record was requested by position outside `[0, record_count)`.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for GpxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDocument { path } => {
                write!(f, "No GPX document at '{}'", path.display())
            }
            Self::MalformedDocument { cause } => {
                write!(f, "Malformed GPX document: {cause}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Record index {index} out of range (document has {len} records)"
                )
            }
        }
    }
}

impl std::error::Error for GpxError {}

impl From<quick_xml::Error> for GpxError {
    fn from(e: quick_xml::Error) -> Self {
        Self::MalformedDocument {
            cause: e.to_string(),
        }
    }
}
