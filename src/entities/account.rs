// 💳 Account Entities - Statement accounts and counterparty references
//
// An `Account` is one `<STMTRS>` / `<CCSTMTRS>`: identity fields, ledger
// balance and the statement period. Counterparty references on transactions
// reuse none of it; they are their own, smaller values.

use super::transaction::Transaction;
use crate::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// STATEMENT KIND
// ============================================================================

/// Which message set an account came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `<BANKMSGSRSV1>`
    Bank,

    /// `<CREDITCARDMSGSRSV1>`
    CreditCard,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Bank => "Bank",
            StatementKind::CreditCard => "Credit Card",
        }
    }
}

// ============================================================================
// STATEMENT
// ============================================================================

/// One reporting period (`<BANKTRANLIST>` plus `<CURDEF>`)
///
/// A balance-only response has no transaction list, so no period either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// `<CURDEF>`, ISO 4217
    pub currency: String,

    /// `<DTSTART>`
    pub start_date: Option<Timestamp>,

    /// `<DTEND>`
    pub end_date: Option<Timestamp>,

    /// `<STMTTRN>` entries in document order
    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// Sum of all transaction amounts (exact)
    pub fn net_amount(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub kind: StatementKind,

    /// `<TRNUID>` of the enclosing transaction response
    pub transaction_uid: String,

    /// `<BANKID>`; `None` for card accounts
    pub routing_number: Option<String>,

    /// `<BRANCHID>`
    pub branch_id: Option<String>,

    /// `<ACCTID>`
    pub account_number: String,

    /// `<ACCTTYPE>` (CHECKING, SAVINGS, ...); `None` for card accounts
    pub account_type: Option<String>,

    /// `<LEDGERBAL><BALAMT>`
    pub balance: Option<Decimal>,

    /// `<LEDGERBAL><DTASOF>`
    pub balance_date: Option<Timestamp>,

    pub statement: Statement,
}

impl Account {
    pub fn transactions(&self) -> &[Transaction] {
        &self.statement.transactions
    }
}

// ============================================================================
// COUNTERPARTY ACCOUNT
// ============================================================================

/// The account on the other side of a transfer
///
/// The variant is the shape: a card reference has no routing data at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterpartyAccount {
    /// `<BANKACCTTO>`
    Bank {
        routing_number: String,
        branch_id: Option<String>,
        account_number: String,
        account_type: String,
    },

    /// `<CCACCTTO>`
    Card { account_number: String },
}

impl CounterpartyAccount {
    pub fn account_number(&self) -> &str {
        match self {
            CounterpartyAccount::Bank { account_number, .. } => account_number,
            CounterpartyAccount::Card { account_number } => account_number,
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self, CounterpartyAccount::Card { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
