//! Utilities for the deploy scripts.

use std::process::Command;

use tracing::info;

use crate::errors::ScriptError;

/// Executes a command, returning an error if the command fails
pub fn command_success_or(mut cmd: Command, err_msg: &str) -> Result<(), ScriptError> {
    info!("Running command: {:?}", cmd);
    if !cmd
        .status()
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?
        .success()
    {
        Err(ScriptError::ContractCompilation(String::from(err_msg)))
    } else {
        Ok(())
    }
}
