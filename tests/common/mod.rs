#![allow(dead_code)]

use std::io::Write;
use sumup_reader::domain::transaction::StatusQuery;
use sumup_reader::infrastructure::sumup::SumUpClient;
use tempfile::NamedTempFile;

pub const MERCHANT: &str = "MC123";
pub const READER: &str = "rdr_1";
pub const TOKEN: &str = "sup_sk_test";

pub fn transactions_path() -> String {
    format!("/v2.1/merchants/{MERCHANT}/transactions")
}

pub fn checkout_path() -> String {
    format!("/v0.1/merchants/{MERCHANT}/readers/{READER}/checkout")
}

pub fn client(base_url: &str) -> SumUpClient {
    SumUpClient::new(base_url, TOKEN).unwrap()
}

pub fn query(transaction_id: &str) -> StatusQuery {
    StatusQuery::new(MERCHANT, transaction_id).unwrap()
}

/// Writes a complete config file pointing at `base_url`.
pub fn write_config(base_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "merchantCode": "{MERCHANT}",
            "readerID": "{READER}",
            "bearerToken": "{TOKEN}",
            "apiBaseUrl": "{base_url}",
            "payment": {{"currency": "EUR", "minorUnit": 2, "value": 1050}}
        }}"#
    )
    .unwrap();
    file
}
