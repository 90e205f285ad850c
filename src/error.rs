// ⚠️ Error Taxonomy
// Value normalizer failures and document builder failures

use thiserror::Error;

/// Failure of one of the pure value normalizers (timestamp, amount)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    #[error("zone offset out of range: {0} seconds")]
    InvalidZoneOffset(i32),
}

/// Failure of a whole document build
///
/// A build either returns a complete `Document` or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OfxError {
    #[error("{path}: {source}")]
    Value {
        path: String,
        #[source]
        source: ValueError,
    },

    #[error("missing required node: {0}")]
    MissingRequiredNode(String),

    #[error("document carries neither a bank nor a credit-card statement")]
    UnsupportedDocumentShape,

    #[error("expected exactly one account, found {0}")]
    AmbiguousAccount(usize),

    #[error("nesting deeper than {limit} levels at {path}")]
    NestingTooDeep { path: String, limit: usize },

    #[error("invalid build options: {0}")]
    InvalidOptions(#[source] ValueError),
}

impl OfxError {
    /// Attach a node path to a normalizer failure
    pub fn at(path: impl Into<String>, source: ValueError) -> Self {
        OfxError::Value {
            path: path.into(),
            source,
        }
    }
}

pub type OfxResult<T> = Result<T, OfxError>;
