use std::path::PathBuf;

/// Coarse classification of an identification failure, used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The image reference was empty or could not be read
    InvalidInput,
    /// Endpoint unreachable, connection dropped or request timed out
    NetworkFailure,
    /// The service answered with a non-2xx status
    ProtocolFailure,
    /// The body was not JSON or lacked a required field
    DecodeFailure,
}

/// Everything that can go wrong while asking the service to identify a capture.
///
/// None of these ever reach the caller of `IdentificationClient::identify`;
/// they are collapsed into the fallback path and kept for telemetry.
#[derive(thiserror::Error, Debug)]
pub enum IdentifyError {
    #[error("invalid image reference: {0}")]
    InvalidImage(String),
    #[error("could not read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Network(String),
    #[error("server error: {status} - {body}")]
    Protocol { status: u16, body: String },
    #[error("response parse error: {0}")]
    Decode(String),
}

impl IdentifyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            IdentifyError::InvalidImage(_) | IdentifyError::ImageRead { .. } => {
                FailureKind::InvalidInput
            }
            IdentifyError::Network(_) => FailureKind::NetworkFailure,
            IdentifyError::Protocol { .. } => FailureKind::ProtocolFailure,
            IdentifyError::Decode(_) => FailureKind::DecodeFailure,
        }
    }
}

/// Errors from loading the TOML configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the key/value store backing the collection
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored collection is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Malformed(#[from] ron::error::SpannedError),
}

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            IdentifyError::InvalidImage(String::new()).kind(),
            FailureKind::InvalidInput
        );
        assert_eq!(
            IdentifyError::Network("refused".into()).kind(),
            FailureKind::NetworkFailure
        );
        assert_eq!(
            IdentifyError::Protocol { status: 503, body: String::new() }.kind(),
            FailureKind::ProtocolFailure
        );
        assert_eq!(
            IdentifyError::Decode("eof".into()).kind(),
            FailureKind::DecodeFailure
        );
    }

    #[test]
    fn test_protocol_error_display() {
        let err = IdentifyError::Protocol { status: 500, body: "boom".into() };
        assert_eq!(err.to_string(), "server error: 500 - boom");
    }
}
