//! Contract deployment: the deployer seam and the sequential plan runner

mod runner;

pub use runner::{deploy_request, deploy_with_factory, run_plan, DeploymentResult};

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    errors::ScriptError,
    tx::{
        client::RpcProvider,
        sender::{predict_contract_address, send_call, send_deployment},
    },
};

/// A confirmed contract creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployed {
    /// Address of the new contract
    pub address: Address,
    /// Hash of the creation transaction
    pub tx_hash: TxHash,
}

/// Something able to put contracts on chain and call them.
///
/// Every method only returns once the network confirmed the transaction.
#[async_trait]
pub trait Deployer {
    /// Submit the creation code of `contract` and wait for its confirmation
    async fn deploy(&self, contract: &str, code: Bytes) -> Result<Deployed, ScriptError>;

    /// Send `calldata` to a deployed contract and wait for its confirmation
    async fn call(&self, contract: Address, calldata: Bytes) -> Result<TxHash, ScriptError>;
}

/// Deploys through the signing RPC client
pub struct RpcDeployer {
    /// The signing client
    client: RpcProvider,
    /// Blocks to wait for on each transaction
    confirmations: u64,
}

impl RpcDeployer {
    /// Deploy through `client`, waiting for `confirmations` blocks on each transaction
    pub fn new(client: RpcProvider, confirmations: u64) -> Self {
        Self {
            client,
            confirmations: confirmations.max(1),
        }
    }
}

#[async_trait]
impl Deployer for RpcDeployer {
    async fn deploy(&self, contract: &str, code: Bytes) -> Result<Deployed, ScriptError> {
        // Predict the contract address
        let expected = predict_contract_address(&self.client).await?;
        debug!("Expecting {} at {}", contract, expected);

        let receipt = send_deployment(code, self.confirmations, &self.client).await?;
        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in the receipt of {}",
                receipt.transaction_hash
            ))
        })?;

        if address != expected {
            warn!(
                "{} deployed to {} instead of the predicted {}",
                contract, address, expected
            );
        }

        Ok(Deployed {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn call(&self, contract: Address, calldata: Bytes) -> Result<TxHash, ScriptError> {
        send_call(contract, calldata, self.confirmations, &self.client).await
    }
}
