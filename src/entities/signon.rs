// 🔐 Sign-on Entities - Server handshake and enrollment summary

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Generic response status (`<STATUS>`)
///
/// Copied verbatim: the builder does not interpret codes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    /// `<CODE>`, "0" on success
    pub code: String,

    /// `<SEVERITY>`: INFO, WARN or ERROR
    pub severity: String,

    /// `<MESSAGE>`
    pub message: String,
}

impl Status {
    pub fn is_success(&self) -> bool {
        self.code.trim() == "0"
    }
}

/// Financial institution identity (`<FI>`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Institute {
    /// `<ORG>`
    pub name: String,

    /// `<FID>`
    pub id: String,
}

/// Sign-on response (`<SONRS>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOn {
    pub status: Status,

    /// `<DTSERVER>`
    pub date: Timestamp,

    /// `<LANGUAGE>`, e.g. "ENG"
    pub language: String,

    pub institute: Institute,
}

/// Enrollment-level account summary (`<ACCTINFO>`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    /// `<DESC>`
    pub description: String,

    /// `<ACCTID>`
    pub number: String,
}
