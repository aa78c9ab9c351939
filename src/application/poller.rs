use crate::domain::ports::StatusSourceBox;
use crate::domain::transaction::{StatusQuery, TransactionStatus};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(DEFAULT_INTERVAL_MS);

/// Attempt budget and spacing for one polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PollError {
    #[error("polling cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

/// Bookkeeping for a single call to [`StatusPoller::poll`].
#[derive(Debug)]
struct PollState {
    attempts_made: u32,
    max_attempts: u32,
    errors_seen: u32,
    last_observed: Option<TransactionStatus>,
}

impl PollState {
    fn new(max_attempts: u32) -> Self {
        Self {
            attempts_made: 0,
            max_attempts,
            errors_seen: 0,
            last_observed: None,
        }
    }

    fn exhausted(&self) -> bool {
        self.attempts_made >= self.max_attempts
    }
}

/// Drives a [`StatusSource`](crate::domain::ports::StatusSource) until the
/// transaction settles or the attempt budget runs out.
///
/// Fetches are strictly sequential. Pending, unknown and failed fetches are
/// all treated the same way: wait `interval` and try again. Only
/// `SUCCESSFUL` or `FAILED` end the loop early; otherwise the result is
/// `TIMEOUT`.
pub struct StatusPoller {
    source: StatusSourceBox,
    options: PollOptions,
}

impl StatusPoller {
    pub fn new(source: StatusSourceBox, options: PollOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    /// Polls until a terminal status or `TIMEOUT`. Never fails.
    pub async fn poll(&self, query: &StatusQuery) -> TransactionStatus {
        let mut state = PollState::new(self.options.max_attempts);
        self.run(query, &mut state).await
    }

    /// Like [`poll`](Self::poll), but gives up as soon as `cancel` resolves.
    pub async fn poll_until<F>(
        &self,
        query: &StatusQuery,
        cancel: F,
    ) -> Result<TransactionStatus, PollError>
    where
        F: Future<Output = ()>,
    {
        let mut state = PollState::new(self.options.max_attempts);
        let outcome = tokio::select! {
            status = self.run(query, &mut state) => Some(status),
            _ = cancel => None,
        };

        match outcome {
            Some(status) => Ok(status),
            None => {
                tracing::warn!(
                    transaction_id = query.transaction_id(),
                    attempts = state.attempts_made,
                    "status polling cancelled"
                );
                Err(PollError::Cancelled {
                    attempts: state.attempts_made,
                })
            }
        }
    }

    async fn run(&self, query: &StatusQuery, state: &mut PollState) -> TransactionStatus {
        while !state.exhausted() {
            state.attempts_made += 1;

            match self.source.fetch_status(query).await {
                Ok(status) if status.is_terminal() => {
                    tracing::info!(
                        transaction_id = query.transaction_id(),
                        attempt = state.attempts_made,
                        %status,
                        "transaction settled"
                    );
                    return status;
                }
                Ok(status) => {
                    tracing::debug!(attempt = state.attempts_made, %status, "transaction not settled yet");
                    state.last_observed = Some(status);
                }
                Err(e) => {
                    state.errors_seen += 1;
                    tracing::warn!(attempt = state.attempts_made, error = %e, "error polling status");
                }
            }

            // No point waiting once the budget is spent
            if !state.exhausted() {
                tokio::time::sleep(self.options.interval).await;
            }
        }

        tracing::warn!(
            transaction_id = query.transaction_id(),
            attempts = state.attempts_made,
            errors = state.errors_seen,
            last_status = ?state.last_observed,
            "no terminal status before attempts ran out"
        );
        TransactionStatus::Timeout
    }
}
