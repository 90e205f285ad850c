// 👤 Payee Entity - Transaction counterparty identity (`<PAYEE>`)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Payee {
    /// `<NAME>`
    pub name: String,

    /// Non-empty `<ADDR1>`..`<ADDR3>` lines in order
    ///
    /// `None` when the payee has no address line at all.
    pub address: Option<Vec<String>>,

    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl Payee {
    /// Address lines joined with ", " (empty if none)
    pub fn address_line(&self) -> String {
        self.address
            .as_ref()
            .map(|lines| lines.join(", "))
            .unwrap_or_default()
    }
}
