pub mod converter;
pub mod detect;
pub mod envelope;
pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod reader;
pub mod writer;

pub use detect::PointKind;
pub use envelope::Envelope;
pub use error::{GpxError, Result};
pub use model::{Author, GeoPoint, GpxOutput, Metadata, NamedLineString, NamedPoint};
pub use options::{ReadOptions, WriterConfig};
pub use parser::lenient_f64;
pub use reader::GpxReader;
pub use writer::write_gpx;
