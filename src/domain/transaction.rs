use crate::error::{ReaderError, Result};
use std::fmt;

/// Status of a reader transaction as seen by the poller.
///
/// `Successful` and `Failed` are terminal. `Timeout` never comes from the
/// server; the poller produces it when its attempt budget runs out.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransactionStatus {
    Pending,
    Successful,
    Failed,
    Timeout,
    Unknown,
}

impl TransactionStatus {
    /// Maps a status string from the API. Anything unrecognised is `Unknown`.
    pub fn from_server(raw: &str) -> Self {
        match raw {
            "PENDING" => Self::Pending,
            "SUCCESSFUL" => Self::Successful,
            "FAILED" => Self::Failed,
            "TIMEOUT" => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Successful | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated lookup key for the transactions endpoint.
///
/// Both fields are trimmed and guaranteed non-blank, so a query that exists
/// can always be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusQuery {
    merchant_code: String,
    transaction_id: String,
}

impl StatusQuery {
    pub fn new(merchant_code: &str, transaction_id: &str) -> Result<Self> {
        let merchant_code = merchant_code.trim();
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(ReaderError::InvalidQuery(
                "client transaction ID cannot be empty".to_string(),
            ));
        }
        if merchant_code.is_empty() {
            return Err(ReaderError::InvalidQuery(
                "merchant code cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            merchant_code: merchant_code.to_string(),
            transaction_id: transaction_id.to_string(),
        })
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }
}
