use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{Provider, WalletProvider},
    rpc::types::eth::{TransactionReceipt, TransactionRequest},
};
use tracing::info;

use crate::{errors::ScriptError, tx::client::RpcProvider};

/// Send a contract creation transaction, waiting for `confirmations` blocks
pub async fn send_deployment(
    code: Bytes,
    confirmations: u64,
    client: &RpcProvider,
) -> Result<TransactionReceipt, ScriptError> {
    // Build the tx
    let tx_request = TransactionRequest::default()
        .with_deploy_code(code)
        .with_value(U256::from(0));

    // Send it
    let pending_tx = client
        .send_transaction(tx_request)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    info!("Pending deploy transaction... {}", pending_tx.tx_hash());

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .with_required_confirmations(confirmations)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    ensure_success(&receipt)?;
    info!(
        "Deploy tx done on block: {}",
        receipt.block_number.unwrap_or_default()
    );

    Ok(receipt)
}

/// Send a call to an already deployed contract
pub async fn send_call(
    contract: Address,
    calldata: Bytes,
    confirmations: u64,
    client: &RpcProvider,
) -> Result<TxHash, ScriptError> {
    // Build the tx
    let tx_request = TransactionRequest::default()
        .to(contract)
        .with_input(calldata)
        .with_value(U256::from(0));

    // Send it
    let pending_tx = client
        .send_transaction(tx_request)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("Pending call transaction... {}", pending_tx.tx_hash());

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .with_required_confirmations(confirmations)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    ensure_success(&receipt)?;
    info!(
        "Call tx done on block: {}",
        receipt.block_number.unwrap_or_default()
    );

    Ok(receipt.transaction_hash)
}

/// Predict the address of the next contract created by the deployer (CREATE, sender + nonce)
pub async fn predict_contract_address(client: &RpcProvider) -> Result<Address, ScriptError> {
    // Get signer
    let signer = client.default_signer_address();

    // Get the signer nonce
    let signer_nonce = client
        .get_transaction_count(signer)
        .await
        .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

    Ok(signer.create(signer_nonce))
}

/// A mined transaction with a failed status is a revert
fn ensure_success(receipt: &TransactionReceipt) -> Result<(), ScriptError> {
    if receipt.status() {
        Ok(())
    } else {
        Err(ScriptError::TransactionReverted(format!(
            "{} reverted on block {}",
            receipt.transaction_hash,
            receipt.block_number.unwrap_or_default()
        )))
    }
}
