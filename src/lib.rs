// OFX Statement - Core Library
// Lowered OFX tree → typed accounts, statements and transactions

pub mod amount;
pub mod builder;
pub mod config;
pub mod entities;
pub mod error;
pub mod timestamp;
pub mod tree;

// Re-export commonly used types
pub use amount::parse_amount;
pub use builder::{build_document, DocumentBuilder};
pub use config::{BuildOptions, DEFAULT_MAX_DEPTH};
pub use entities::{
    Account, AccountInfo, CounterpartyAccount, Document, Institute, Payee, SignOn, Statement,
    StatementKind, Status, Transaction, TransactionType,
};
pub use error::{OfxError, OfxResult, ValueError};
pub use timestamp::{parse_timestamp, DefaultZone, Timestamp};
pub use tree::{Element, OfxNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
