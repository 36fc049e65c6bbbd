//! Scripts for compiling, exporting and deploying the XDC stablecoin contracts.

pub mod abi_export;
pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod networks;
pub mod plan;
pub mod utils;

/// Our build utils
pub mod build;

/// Our deploy utils
pub mod deploy;

pub mod tx;
