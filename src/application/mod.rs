//! Application layer orchestrating the reader payment flow.
//!
//! `CheckoutInitiator` creates a checkout exactly once and surfaces every
//! failure. `StatusPoller` runs the bounded retry loop that turns individual
//! status lookups into a single final `TransactionStatus`.

pub mod checkout;
pub mod poller;
