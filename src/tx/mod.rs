//! Chain client and transaction sending

pub mod client;
pub mod sender;
