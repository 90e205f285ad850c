// 🏗️ Document Model Builder
// One top-down pass: lowered OFX tree → typed `Document`
//
// Required nodes that are missing fail the whole build with their path.
// Optional nodes that are missing become `None` / empty lists.

use crate::amount::parse_amount;
use crate::config::BuildOptions;
use crate::entities::{
    Account, AccountInfo, CounterpartyAccount, Document, Institute, Payee, SignOn, Statement,
    StatementKind, Status, Transaction, TransactionType,
};
use crate::error::{OfxError, OfxResult};
use crate::timestamp::{parse_timestamp, DefaultZone, Timestamp};
use crate::tree::OfxNode;
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

/// Name of the root element the builder is handed
const ROOT: &str = "OFX";

// ============================================================================
// CURSOR
// ============================================================================

/// A node plus where it sits in the document
///
/// Every descent goes through here so paths in errors are exact and the
/// depth guard cannot be bypassed.
struct Cursor<'a, N> {
    node: &'a N,
    path: String,
    depth: usize,
    max_depth: usize,
}

impl<'a, N: OfxNode> Cursor<'a, N> {
    fn root(node: &'a N, max_depth: usize) -> Self {
        Cursor {
            node,
            path: ROOT.to_string(),
            depth: 0,
            max_depth,
        }
    }

    fn path_of(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }

    fn descend(&self, node: &'a N, path: String) -> OfxResult<Self> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(OfxError::NestingTooDeep {
                path,
                limit: self.max_depth,
            });
        }
        Ok(Cursor {
            node,
            path,
            depth,
            max_depth: self.max_depth,
        })
    }

    fn child(&self, name: &str) -> OfxResult<Option<Self>> {
        match self.node.child(name) {
            Some(node) => self.descend(node, self.path_of(name)).map(Some),
            None => Ok(None),
        }
    }

    fn require(&self, name: &str) -> OfxResult<Self> {
        self.child(name)?
            .ok_or_else(|| OfxError::MissingRequiredNode(self.path_of(name)))
    }

    /// Repeated children, each path indexed: `.../STMTTRN[3]`
    fn children(&self, name: &str) -> OfxResult<Vec<Self>> {
        self.node
            .children(name)
            .into_iter()
            .enumerate()
            .map(|(i, node)| self.descend(node, format!("{}/{}[{}]", self.path, name, i)))
            .collect()
    }

    /// Verbatim text, empty if absent
    fn text(&self, name: &str) -> String {
        self.node.child_text(name)
    }

    /// Text with surrounding whitespace removed, `None` if that leaves nothing
    fn optional_text(&self, name: &str) -> Option<String> {
        let text = self.node.child_text(name);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn required_text(&self, name: &str) -> OfxResult<String> {
        self.optional_text(name)
            .ok_or_else(|| OfxError::MissingRequiredNode(self.path_of(name)))
    }

    fn timestamp(&self, name: &str, zone: DefaultZone) -> OfxResult<Timestamp> {
        let token = self.required_text(name)?;
        parse_timestamp(&token, zone).map_err(|e| OfxError::at(self.path_of(name), e))
    }

    fn optional_timestamp(&self, name: &str, zone: DefaultZone) -> OfxResult<Option<Timestamp>> {
        self.optional_text(name)
            .map(|token| {
                parse_timestamp(&token, zone).map_err(|e| OfxError::at(self.path_of(name), e))
            })
            .transpose()
    }

    fn amount(&self, name: &str) -> OfxResult<Decimal> {
        let token = self.required_text(name)?;
        parse_amount(&token).map_err(|e| OfxError::at(self.path_of(name), e))
    }

    fn optional_amount(&self, name: &str) -> OfxResult<Option<Decimal>> {
        self.optional_text(name)
            .map(|token| parse_amount(&token).map_err(|e| OfxError::at(self.path_of(name), e)))
            .transpose()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a `Document` from the root (`<OFX>`) of a lowered tree
///
/// # Example:
/// ```
/// use ofx_statement::{BuildOptions, DefaultZone, DocumentBuilder};
/// use serde_json::json;
///
/// let root = json!({
///     "SIGNONMSGSRSV1": {"SONRS": {
///         "STATUS": {"CODE": "0", "SEVERITY": "INFO"},
///         "DTSERVER": "20230120083000[-5:EST]",
///         "LANGUAGE": "ENG"
///     }}
/// });
///
/// let builder = DocumentBuilder::new(BuildOptions::default().with_server_zone(DefaultZone::Utc));
/// let document = builder.build(&root).unwrap();
/// assert!(document.accounts.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    options: BuildOptions,
}

impl DocumentBuilder {
    pub fn new(options: BuildOptions) -> Self {
        DocumentBuilder { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the whole document, or fail with a single error
    pub fn build<N: OfxNode>(&self, root: &N) -> OfxResult<Document> {
        self.options.validate().map_err(OfxError::InvalidOptions)?;
        let root = Cursor::root(root, self.options.max_depth);

        let sonrs = root.require("SIGNONMSGSRSV1")?.require("SONRS")?;
        let sign_on = self.build_sign_on(&sonrs)?;

        let account_info = match root.child("SIGNUPMSGSRSV1")? {
            Some(signup) => self.build_account_info(&signup)?,
            None => Vec::new(),
        };

        let accounts = if let Some(msgs) = root.child("BANKMSGSRSV1")? {
            debug!("bank statement message set");
            self.build_bank_accounts(&msgs)?
        } else if let Some(msgs) = root.child("CREDITCARDMSGSRSV1")? {
            debug!("credit card statement message set");
            self.build_credit_accounts(&msgs)?
        } else if self.options.require_statement {
            return Err(OfxError::UnsupportedDocumentShape);
        } else {
            debug!("no statement message set, sign-on only");
            Vec::new()
        };

        let document = Document {
            sign_on,
            account_info,
            accounts,
        };

        debug!(
            accounts = document.accounts.len(),
            transactions = document.transaction_count(),
            "built OFX document"
        );

        Ok(document)
    }

    // ------------------------------------------------------------------------
    // Sign-on
    // ------------------------------------------------------------------------

    fn build_sign_on<N: OfxNode>(&self, sonrs: &Cursor<N>) -> OfxResult<SignOn> {
        let status = build_status(&sonrs.require("STATUS")?);
        let date = sonrs.timestamp("DTSERVER", self.options.server_zone)?;

        let institute = match sonrs.child("FI")? {
            Some(fi) => Institute {
                name: fi.text("ORG"),
                id: fi.text("FID"),
            },
            None => Institute::default(),
        };

        Ok(SignOn {
            status,
            date,
            language: sonrs.text("LANGUAGE"),
            institute,
        })
    }

    fn build_account_info<N: OfxNode>(&self, signup: &Cursor<N>) -> OfxResult<Vec<AccountInfo>> {
        let mut accounts = Vec::new();
        for trnrs in signup.children("ACCTINFOTRNRS")? {
            for info in trnrs.children("ACCTINFO")? {
                accounts.push(AccountInfo {
                    description: info.text("DESC"),
                    number: info.text("ACCTID"),
                });
            }
        }
        Ok(accounts)
    }

    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    fn build_bank_accounts<N: OfxNode>(&self, msgs: &Cursor<N>) -> OfxResult<Vec<Account>> {
        let mut accounts = Vec::new();
        for trnrs in msgs.children("STMTTRNRS")? {
            let transaction_uid = trnrs.text("TRNUID");
            for stmtrs in trnrs.children("STMTRS")? {
                let identity = stmtrs.require("BANKACCTFROM")?;
                accounts.push(self.build_account(
                    StatementKind::Bank,
                    transaction_uid.clone(),
                    &stmtrs,
                    &identity,
                )?);
            }
        }
        Ok(accounts)
    }

    fn build_credit_accounts<N: OfxNode>(&self, msgs: &Cursor<N>) -> OfxResult<Vec<Account>> {
        let mut accounts = Vec::new();
        for trnrs in msgs.children("CCSTMTTRNRS")? {
            let transaction_uid = trnrs.text("TRNUID");
            for stmtrs in trnrs.children("CCSTMTRS")? {
                // Some institutions send card statements with bank identity fields
                let identity = match stmtrs.child("CCACCTFROM")? {
                    Some(identity) => identity,
                    None => match stmtrs.child("BANKACCTFROM")? {
                        Some(identity) => {
                            warn!(path = %stmtrs.path, "no CCACCTFROM, using BANKACCTFROM");
                            identity
                        }
                        None => {
                            return Err(OfxError::MissingRequiredNode(
                                stmtrs.path_of("CCACCTFROM"),
                            ))
                        }
                    },
                };

                accounts.push(self.build_account(
                    StatementKind::CreditCard,
                    transaction_uid.clone(),
                    &stmtrs,
                    &identity,
                )?);
            }
        }
        Ok(accounts)
    }

    fn build_account<N: OfxNode>(
        &self,
        kind: StatementKind,
        transaction_uid: String,
        stmtrs: &Cursor<N>,
        identity: &Cursor<N>,
    ) -> OfxResult<Account> {
        let (balance, balance_date) = match stmtrs.child("LEDGERBAL")? {
            Some(ledger) => (
                ledger.optional_amount("BALAMT")?,
                ledger.optional_timestamp("DTASOF", self.options.server_zone)?,
            ),
            None => (None, None),
        };

        Ok(Account {
            kind,
            transaction_uid,
            routing_number: identity.optional_text("BANKID"),
            branch_id: identity.optional_text("BRANCHID"),
            account_number: identity.text("ACCTID"),
            account_type: identity.optional_text("ACCTTYPE"),
            balance,
            balance_date,
            statement: self.build_statement(stmtrs)?,
        })
    }

    fn build_statement<N: OfxNode>(&self, stmtrs: &Cursor<N>) -> OfxResult<Statement> {
        let currency = stmtrs.text("CURDEF");

        // Balance-only responses carry no transaction list
        let list = match stmtrs.child("BANKTRANLIST")? {
            Some(list) => list,
            None => {
                debug!(path = %stmtrs.path, "no BANKTRANLIST, empty statement");
                return Ok(Statement {
                    currency,
                    start_date: None,
                    end_date: None,
                    transactions: Vec::new(),
                });
            }
        };

        let transactions = list
            .children("STMTTRN")?
            .iter()
            .map(|trn| self.build_transaction(trn))
            .collect::<OfxResult<Vec<_>>>()?;

        Ok(Statement {
            currency,
            start_date: Some(list.timestamp("DTSTART", DefaultZone::Utc)?),
            end_date: Some(list.timestamp("DTEND", DefaultZone::Utc)?),
            transactions,
        })
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    fn build_transaction<N: OfxNode>(&self, trn: &Cursor<N>) -> OfxResult<Transaction> {
        let kind = TransactionType::from_code(&trn.text("TRNTYPE"));
        if !kind.is_known() {
            warn!(path = %trn.path, code = kind.code(), "unknown TRNTYPE");
        }

        let payee = match trn.child("PAYEE")? {
            Some(payee) => Some(build_payee(&payee)),
            None => None,
        };
        let bank_account_to = match trn.child("BANKACCTTO")? {
            Some(to) => Some(build_bank_account_to(&to)),
            None => None,
        };
        let card_account_to = match trn.child("CCACCTTO")? {
            Some(to) => Some(build_card_account_to(&to)),
            None => None,
        };

        let transaction = Transaction {
            kind,
            date: trn.timestamp("DTPOSTED", DefaultZone::Utc)?,
            user_initiated_date: trn.optional_timestamp("DTUSER", DefaultZone::Utc)?,
            amount: trn.amount("TRNAMT")?,
            unique_id: trn.text("FITID"),
            name: trn.text("NAME"),
            memo: trn.text("MEMO"),
            sic: trn.optional_text("SIC"),
            check_number: trn.optional_text("CHECKNUM"),
            ref_number: trn.optional_text("REFNUM"),
            name_extended: trn.optional_text("EXTDNAME"),
            payee_id: trn.optional_text("PAYEEID"),
            payee,
            bank_account_to,
            card_account_to,
        };

        trace!(fitid = %transaction.unique_id, amount = %transaction.amount, "transaction");
        Ok(transaction)
    }
}

// ============================================================================
// LEAF BUILDERS (no required fields, cannot fail)
// ============================================================================

fn build_status<N: OfxNode>(status: &Cursor<N>) -> Status {
    Status {
        code: status.text("CODE"),
        severity: status.text("SEVERITY"),
        message: status.text("MESSAGE"),
    }
}

fn build_payee<N: OfxNode>(payee: &Cursor<N>) -> Payee {
    let address: Vec<String> = ["ADDR1", "ADDR2", "ADDR3"]
        .iter()
        .filter_map(|line| payee.optional_text(line))
        .collect();

    Payee {
        name: payee.text("NAME"),
        address: (!address.is_empty()).then_some(address),
        city: payee.text("CITY"),
        state: payee.text("STATE"),
        postal_code: payee.text("POSTALCODE"),
        country: payee.text("COUNTRY"),
        phone: payee.text("PHONE"),
    }
}

fn build_bank_account_to<N: OfxNode>(to: &Cursor<N>) -> CounterpartyAccount {
    CounterpartyAccount::Bank {
        routing_number: to.text("BANKID"),
        branch_id: to.optional_text("BRANCHID"),
        account_number: to.text("ACCTID"),
        account_type: to.text("ACCTTYPE"),
    }
}

fn build_card_account_to<N: OfxNode>(to: &Cursor<N>) -> CounterpartyAccount {
    CounterpartyAccount::Card {
        account_number: to.text("ACCTID"),
    }
}

/// Build with default options
pub fn build_document<N: OfxNode>(root: &N) -> OfxResult<Document> {
    DocumentBuilder::default().build(root)
}

// ============================================================================
// TESTS
// ============================================================================
