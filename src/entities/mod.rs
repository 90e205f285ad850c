// Entity Models - the typed OFX document graph
//
// Every entity is a plain owned value:
// - built once by `DocumentBuilder`, never mutated afterwards
// - no shared references: a counterparty account is its own value,
//   not an alias of the statement's account
// - "absent" is `None`, never a zero-valued placeholder

pub mod account;
pub mod document;
pub mod payee;
pub mod signon;
pub mod transaction;

pub use account::{Account, CounterpartyAccount, Statement, StatementKind};
pub use document::Document;
pub use payee::Payee;
pub use signon::{AccountInfo, Institute, SignOn, Status};
pub use transaction::{Transaction, TransactionType};
