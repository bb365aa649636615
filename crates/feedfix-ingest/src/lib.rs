pub mod error;
pub mod xml_ingest;

pub use error::{IngestError, Result};
pub use xml_ingest::{MAX_DEPTH, parse_document, read_feed_file};
