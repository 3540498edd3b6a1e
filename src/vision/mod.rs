//! Creature identification: upload a capture, get a record back, never fail.

pub mod client;
pub mod fallback;
pub mod ids;
pub mod transport;

pub use client::IdentificationClient;
pub use fallback::FallbackGenerator;
pub use ids::{next_record_id, IdGenerator};
pub use transport::{AnalysisResponse, HttpTransport, VisionTransport};

use crate::errors::IdentifyError;
use schema::CreatureRecord;
use std::fmt;
use std::path::PathBuf;

/// Glyph stamped on records identified by the service.
pub const IDENTIFIED_EMOJI: &str = "🧬";
/// Glyph stamped on records synthesized offline.
pub const OFFLINE_EMOJI: &str = "⚠️";

/// Opaque reference to a captured image: a file path or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Filesystem location of the image bytes.
    pub fn to_path(&self) -> Result<PathBuf, IdentifyError> {
        if self.is_empty() {
            return Err(IdentifyError::InvalidImage(
                "image reference is empty".to_string(),
            ));
        }
        let raw = self.0.strip_prefix("file://").unwrap_or(&self.0);
        Ok(PathBuf::from(raw))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Outcome of one identification. Both variants carry a usable record.
#[derive(Debug)]
pub enum IdentificationResult {
    Success(CreatureRecord),
    Fallback {
        record: CreatureRecord,
        cause: IdentifyError,
    },
}

impl IdentificationResult {
    pub fn record(&self) -> &CreatureRecord {
        match self {
            IdentificationResult::Success(record) => record,
            IdentificationResult::Fallback { record, .. } => record,
        }
    }

    pub fn into_record(self) -> CreatureRecord {
        match self {
            IdentificationResult::Success(record) => record,
            IdentificationResult::Fallback { record, .. } => record,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IdentificationResult::Fallback { .. })
    }

    pub fn cause(&self) -> Option<&IdentifyError> {
        match self {
            IdentificationResult::Success(_) => None,
            IdentificationResult::Fallback { cause, .. } => Some(cause),
        }
    }
}
