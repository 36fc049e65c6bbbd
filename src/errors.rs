//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error when creating the client (bad RPC url, missing or invalid credential)
    ClientInitialization(String),
    /// Error when a compiled artifact can't be found or parsed
    ArtifactResolution(String),
    /// Error when encoding constructor or call arguments against the ABI
    AbiEncoding(String),
    /// Error when fetching the nonce to predict a deployment address
    NonceFetching(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// A transaction was mined but reverted
    TransactionReverted(String),
    /// Error compiling the contracts
    ContractCompilation(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error writing the exported ABI files
    AbiExport(String),
    /// Error with a user provided argument
    InvalidArgument(String),
    /// Error writing the deployment report
    ConsoleOutput(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::ArtifactResolution(s) => write!(f, "error resolving artifact: {}", s),
            ScriptError::AbiEncoding(s) => write!(f, "error encoding arguments: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::AbiExport(s) => write!(f, "error exporting abi: {}", s),
            ScriptError::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
            ScriptError::ConsoleOutput(s) => write!(f, "error writing output: {}", s),
        }
    }
}

impl Error for ScriptError {}
