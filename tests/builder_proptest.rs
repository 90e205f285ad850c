//! Property-based tests for the document builder
//!
//! Random bank statements are rendered as JSON trees and built twice.

use chrono::Datelike;
use ofx_statement::{BuildOptions, DefaultZone, DocumentBuilder};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
struct GeneratedTransaction {
    fitid: String,
    cents: i64,
    day: u32,
    payee: Option<String>,
}

fn transaction_strategy() -> impl Strategy<Value = GeneratedTransaction> {
    (
        "[A-Z0-9]{1,12}",
        -1_000_000i64..1_000_000,
        1u32..=28,
        proptest::option::of("[A-Za-z ]{1,20}"),
    )
        .prop_map(|(fitid, cents, day, payee)| GeneratedTransaction {
            fitid,
            cents,
            day,
            payee,
        })
}

fn render(transactions: &[GeneratedTransaction]) -> Value {
    let trns: Vec<Value> = transactions
        .iter()
        .map(|t| {
            let kind = if t.cents < 0 { "DEBIT" } else { "CREDIT" };
            let mut trn = json!({
                "TRNTYPE": kind,
                "DTPOSTED": format!("202303{:02}", t.day),
                "TRNAMT": Decimal::new(t.cents, 2).to_string(),
                "FITID": t.fitid,
            });
            if let Some(name) = &t.payee {
                trn["PAYEE"] = json!({"NAME": name});
            }
            trn
        })
        .collect();

    json!({
        "SIGNONMSGSRSV1": {"SONRS": {
            "STATUS": {"CODE": "0", "SEVERITY": "INFO"},
            "DTSERVER": "20230401",
            "LANGUAGE": "ENG"
        }},
        "BANKMSGSRSV1": {"STMTTRNRS": {
            "TRNUID": "1",
            "STMTRS": {
                "CURDEF": "USD",
                "BANKACCTFROM": {"BANKID": "1", "ACCTID": "2", "ACCTTYPE": "CHECKING"},
                "BANKTRANLIST": {"DTSTART": "20230301", "DTEND": "20230331", "STMTTRN": trns}
            }
        }}
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(BuildOptions::default().with_server_zone(DefaultZone::Utc))
    }

    proptest! {
        #[test]
        fn test_building_twice_is_field_for_field_equal(
            transactions in prop::collection::vec(transaction_strategy(), 0..20)
        ) {
            let root = render(&transactions);
            let first = builder().build(&root).unwrap();
            let second = builder().build(&root).unwrap();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_transactions_match_source_in_order(
            transactions in prop::collection::vec(transaction_strategy(), 0..20)
        ) {
            let doc = builder().build(&render(&transactions)).unwrap();
            let built = doc.sole_transactions().unwrap();

            prop_assert_eq!(built.len(), transactions.len());
            for (built, source) in built.iter().zip(&transactions) {
                prop_assert_eq!(&built.unique_id, &source.fitid);
                prop_assert_eq!(built.amount, Decimal::new(source.cents, 2));
                prop_assert_eq!(built.date.calendar().day(), source.day);
            }
        }

        #[test]
        fn test_payee_present_only_when_sent(
            transactions in prop::collection::vec(transaction_strategy(), 1..20)
        ) {
            let doc = builder().build(&render(&transactions)).unwrap();

            for (built, source) in doc.accounts[0].transactions().iter().zip(&transactions) {
                match &source.payee {
                    Some(name) => {
                        let payee = built.payee.as_ref();
                        prop_assert_eq!(payee.map(|p| p.name.as_str()), Some(name.as_str()));
                    }
                    None => prop_assert!(built.payee.is_none()),
                }
            }
        }
    }
}
