// 📄 Document Entity - The whole parsed statement file

use super::account::Account;
use super::signon::{AccountInfo, SignOn};
use super::transaction::Transaction;
use crate::error::{OfxError, OfxResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sign_on: SignOn,

    /// `<SIGNUPMSGSRSV1><ACCTINFOTRNRS><ACCTINFO>`, empty if not sent
    pub account_info: Vec<AccountInfo>,

    /// One entry per statement response; empty for sign-on-only files
    pub accounts: Vec<Account>,
}

impl Document {
    /// Transactions of the only account in the document
    ///
    /// Single-account shortcut: multi-account callers should pick from
    /// `accounts` instead.
    pub fn sole_transactions(&self) -> OfxResult<&[Transaction]> {
        match self.accounts.as_slice() {
            [account] => Ok(account.transactions()),
            [] => Err(OfxError::UnsupportedDocumentShape),
            many => Err(OfxError::AmbiguousAccount(many.len())),
        }
    }

    /// Transactions across every account
    pub fn transaction_count(&self) -> usize {
        self.accounts
            .iter()
            .map(|a| a.statement.transactions.len())
            .sum()
    }

    /// Account with the given `<ACCTID>`
    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }
}
