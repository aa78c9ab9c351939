use crate::domain::checkout::{CheckoutRequest, CheckoutResult, ReaderTarget};
use crate::domain::ports::{CheckoutGateway, StatusSource};
use crate::domain::transaction::{StatusQuery, TransactionStatus};
use crate::error::{ReaderError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.sumup.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for the checkout endpoint.
#[derive(Debug, Serialize)]
struct CreateCheckoutBody<'a> {
    total_amount: &'a CheckoutRequest,
}

/// The accepted shapes of a status response.
#[derive(Debug, PartialEq, Eq)]
enum StatusShape {
    /// A transaction record for the queried ID.
    Record(String),
    /// A listing; the first item wins. Its status may be missing.
    Listing(Option<String>),
    Unmatched,
}

/// String value of `field`, ignoring values of any other JSON type.
fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

/// Sorts a 200 body from the transactions endpoint into one of its shapes.
///
/// Fields are read by name and type-checked individually, so an unexpected
/// type in one field never hides a usable record or listing. Bodies that are
/// not objects are `Unmatched`.
fn classify(body: &Value, transaction_id: &str) -> StatusShape {
    if let Some(status) = str_field(body, "status").filter(|status| !status.is_empty())
        && str_field(body, "client_transaction_id") == Some(transaction_id)
    {
        return StatusShape::Record(status.to_string());
    }

    match body.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => {
            StatusShape::Listing(str_field(&items[0], "status").map(str::to_string))
        }
        _ => StatusShape::Unmatched,
    }
}

/// Resolves a 200 body to a status, or reports that nothing matched.
fn resolve_status(body: &str, transaction_id: &str) -> Result<TransactionStatus> {
    let body: Value = serde_json::from_str(body)?;
    match classify(&body, transaction_id) {
        StatusShape::Record(status) => Ok(TransactionStatus::from_server(&status)),
        StatusShape::Listing(Some(status)) => Ok(TransactionStatus::from_server(&status)),
        StatusShape::Listing(None) => Ok(TransactionStatus::Unknown),
        StatusShape::Unmatched => Err(ReaderError::NotFound(format!(
            "no transaction found with client_transaction_id: {transaction_id}"
        ))),
    }
}

/// Extracts `data.client_transaction_id` from a successful checkout body.
fn checkout_transaction_id(body: &str) -> Result<String> {
    let body: Value = serde_json::from_str(body)?;
    body.pointer("/data/client_transaction_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ReaderError::ResponseShape("no client transaction ID in response".to_string())
        })
}

/// Pulls the human-readable message out of an error body, if there is one.
fn api_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    [str_field(&parsed, "message"), str_field(&parsed, "detail")]
        .into_iter()
        .flatten()
        .find(|message| !message.trim().is_empty())
        .map(str::to_string)
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

/// HTTP client for the SumUp merchant API.
///
/// One `reqwest::Client` is shared by every call so the connection pool is
/// reused between polling attempts. Each request is bounded by a 10 second
/// timeout.
#[derive(Clone)]
pub struct SumUpClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl SumUpClient {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(http, base_url, bearer_token))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            bearer_token: bearer_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CheckoutGateway for SumUpClient {
    async fn create_checkout(
        &self,
        target: &ReaderTarget,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResult> {
        let url = format!(
            "{}/v0.1/merchants/{}/readers/{}/checkout",
            self.base_url,
            target.merchant_code(),
            target.reader_id()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&CreateCheckoutBody {
                total_amount: request,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, "checkout response received");

        if !status.is_success() {
            return Err(ReaderError::Api {
                status: status.as_u16(),
                message: api_message(&body).unwrap_or_else(|| reason_phrase(status)),
            });
        }

        let transaction_id = checkout_transaction_id(&body)?;
        Ok(CheckoutResult { transaction_id })
    }
}

#[async_trait]
impl StatusSource for SumUpClient {
    async fn fetch_status(&self, query: &StatusQuery) -> Result<TransactionStatus> {
        let url = format!(
            "{}/v2.1/merchants/{}/transactions",
            self.base_url,
            query.merchant_code()
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&[("client_transaction_id", query.transaction_id())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            return resolve_status(&body, query.transaction_id());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ReaderError::NotFound(match api_message(&body) {
                Some(message) => format!("transaction not found: {message}"),
                None => format!("transaction not found (ID: {})", query.transaction_id()),
            }));
        }
        Err(ReaderError::Api {
            status: status.as_u16(),
            message: api_message(&body).unwrap_or_else(|| reason_phrase(status)),
        })
    }
}
