pub mod checkout;
pub mod ports;
pub mod transaction;
