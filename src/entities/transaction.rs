// 💸 Transaction Entity - One posted movement (`<STMTTRN>`)

use super::account::CounterpartyAccount;
use super::payee::Payee;
use crate::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// `<TRNTYPE>` code
///
/// Closed set from the OFX spec, plus `Unknown` so institution extensions
/// never reject a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Credit,
    Debit,
    Interest,
    Dividend,
    Fee,
    ServiceCharge,
    Deposit,
    Atm,
    PointOfSale,
    Transfer,
    Check,
    Payment,
    Cash,
    DirectDeposit,
    DirectDebit,
    RepeatPayment,
    Other,

    /// Any code outside the OFX set, kept as written
    Unknown(String),
}

impl TransactionType {
    /// Map a raw `<TRNTYPE>` code (surrounding whitespace ignored)
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "CREDIT" => TransactionType::Credit,
            "DEBIT" => TransactionType::Debit,
            "INT" => TransactionType::Interest,
            "DIV" => TransactionType::Dividend,
            "FEE" => TransactionType::Fee,
            "SRVCHG" => TransactionType::ServiceCharge,
            "DEP" => TransactionType::Deposit,
            "ATM" => TransactionType::Atm,
            "POS" => TransactionType::PointOfSale,
            "XFER" => TransactionType::Transfer,
            "CHECK" => TransactionType::Check,
            "PAYMENT" => TransactionType::Payment,
            "CASH" => TransactionType::Cash,
            "DIRECTDEP" => TransactionType::DirectDeposit,
            "DIRECTDEBIT" => TransactionType::DirectDebit,
            "REPEATPMT" => TransactionType::RepeatPayment,
            "OTHER" => TransactionType::Other,
            other => TransactionType::Unknown(other.to_string()),
        }
    }

    /// The code as it appears in OFX
    pub fn code(&self) -> &str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Interest => "INT",
            TransactionType::Dividend => "DIV",
            TransactionType::Fee => "FEE",
            TransactionType::ServiceCharge => "SRVCHG",
            TransactionType::Deposit => "DEP",
            TransactionType::Atm => "ATM",
            TransactionType::PointOfSale => "POS",
            TransactionType::Transfer => "XFER",
            TransactionType::Check => "CHECK",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Cash => "CASH",
            TransactionType::DirectDeposit => "DIRECTDEP",
            TransactionType::DirectDebit => "DIRECTDEBIT",
            TransactionType::RepeatPayment => "REPEATPMT",
            TransactionType::Other => "OTHER",
            TransactionType::Unknown(code) => code,
        }
    }

    /// Human-readable description, empty for unknown codes
    pub fn description(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Generic credit",
            TransactionType::Debit => "Generic debit",
            TransactionType::Interest => "Interest earned or paid",
            TransactionType::Dividend => "Dividend",
            TransactionType::Fee => "FI fee",
            TransactionType::ServiceCharge => "Service charge",
            TransactionType::Deposit => "Deposit",
            TransactionType::Atm => "ATM debit or credit",
            TransactionType::PointOfSale => "Point of sale debit or credit",
            TransactionType::Transfer => "Transfer",
            TransactionType::Check => "Cheque",
            TransactionType::Payment => "Electronic payment",
            TransactionType::Cash => "Cash withdrawal",
            TransactionType::DirectDeposit => "Direct deposit",
            TransactionType::DirectDebit => "Merchant initiated debit",
            TransactionType::RepeatPayment => "Repeating payment/standing order",
            TransactionType::Other => "Other",
            TransactionType::Unknown(_) => "",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TransactionType::Unknown(_))
    }
}

impl From<String> for TransactionType {
    fn from(code: String) -> Self {
        TransactionType::from_code(&code)
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.code().to_string()
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// `<TRNTYPE>`
    pub kind: TransactionType,

    /// `<DTPOSTED>`
    pub date: Timestamp,

    /// `<DTUSER>`, only when the document gives one
    pub user_initiated_date: Option<Timestamp>,

    /// `<TRNAMT>`, negative = debit
    pub amount: Decimal,

    /// `<FITID>`: natural key for de-duplication by consumers
    pub unique_id: String,

    /// `<NAME>`
    pub name: String,

    /// `<MEMO>`
    pub memo: String,

    /// `<SIC>` standard industry code
    pub sic: Option<String>,

    /// `<CHECKNUM>`
    pub check_number: Option<String>,

    /// `<REFNUM>`
    pub ref_number: Option<String>,

    /// `<EXTDNAME>`
    pub name_extended: Option<String>,

    /// `<PAYEEID>`
    pub payee_id: Option<String>,

    /// `<PAYEE>`
    pub payee: Option<Payee>,

    /// `<BANKACCTTO>`, always the `Bank` variant
    pub bank_account_to: Option<CounterpartyAccount>,

    /// `<CCACCTTO>`, always the `Card` variant
    pub card_account_to: Option<CounterpartyAccount>,
}

impl Transaction {
    /// Description of the transaction type ("" for unknown codes)
    pub fn type_description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

// ============================================================================
// TESTS
// ============================================================================
