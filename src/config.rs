use crate::domain::checkout::{CheckoutRequest, ReaderTarget};
use crate::error::{ReaderError, Result};
use crate::infrastructure::sumup::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Contents of `config.json`.
///
/// Only `merchantCode` and `bearerToken` are needed to poll a transaction;
/// `readerID` and `payment` are checked when a checkout is created.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub merchant_code: String,
    #[serde(rename = "readerID")]
    pub reader_id: Option<String>,
    #[serde(default)]
    pub bearer_token: String,
    pub payment: Option<PaymentConfig>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    pub currency: String,
    pub minor_unit: u32,
    pub value: i64,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ReaderError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ReaderError::Config(format!("invalid config file: {e}")))?;
        if config.bearer_token.trim().is_empty() {
            return Err(ReaderError::Config(
                "bearer token is empty in config file".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn reader_target(&self) -> Result<ReaderTarget> {
        let reader_id = self
            .reader_id
            .as_deref()
            .ok_or_else(|| ReaderError::Config("readerID is missing in config file".to_string()))?;
        ReaderTarget::new(&self.merchant_code, reader_id)
    }

    pub fn checkout_request(&self) -> Result<CheckoutRequest> {
        let payment = self
            .payment
            .as_ref()
            .ok_or_else(|| ReaderError::Config("payment is missing in config file".to_string()))?;
        CheckoutRequest::new(payment.currency.as_str(), payment.minor_unit, payment.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"{
        "merchantCode": "MC123",
        "readerID": "rdr_1",
        "bearerToken": "sup_sk_test",
        "payment": {"currency": "EUR", "minorUnit": 2, "value": 1050}
    }"#;

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_json(FULL).unwrap();
        assert_eq!(config.merchant_code, "MC123");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        let target = config.reader_target().unwrap();
        assert_eq!(target.reader_id(), "rdr_1");

        let request = config.checkout_request().unwrap();
        assert_eq!(request.currency(), "EUR");
        assert_eq!(request.minor_unit(), 2);
        assert_eq!(request.value(), 1050);
    }

    #[test]
    fn test_polling_config_needs_no_reader_or_payment() {
        let config = AppConfig::from_json(
            r#"{"merchantCode": "MC123", "bearerToken": "t", "apiBaseUrl": "http://localhost:9"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:9");
        assert!(matches!(config.reader_target(), Err(ReaderError::Config(_))));
        assert!(matches!(
            config.checkout_request(),
            Err(ReaderError::Config(_))
        ));
    }

    #[test]
    fn test_missing_or_blank_bearer_token_is_fatal() {
        let missing = AppConfig::from_json(r#"{"merchantCode": "MC123"}"#);
        assert!(matches!(missing, Err(ReaderError::Config(ref m)) if m.contains("bearer token")));

        let blank = AppConfig::from_json(r#"{"merchantCode": "MC123", "bearerToken": " "}"#);
        assert!(matches!(blank, Err(ReaderError::Config(_))));
    }

    #[test]
    fn test_unparseable_config() {
        assert!(matches!(
            AppConfig::from_json("{not json"),
            Err(ReaderError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{FULL}").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.bearer_token, "sup_sk_test");

        let missing = AppConfig::load("does/not/exist.json");
        assert!(matches!(missing, Err(ReaderError::Config(_))));
    }
}
