use std::io::Write;

use alloy::primitives::{Address, TxHash};
use tracing::info;

use crate::{
    artifacts::{ArtifactRegistry, ContractFactory},
    deploy::Deployer,
    errors::ScriptError,
    plan::DeploymentRequest,
};

/// Outcome of one deployment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Name printed in the report
    pub label: String,
    /// Address of the deployed contract
    pub address: Address,
    /// Creation transaction
    pub tx_hash: TxHash,
    /// Post deployment call transactions, in order
    pub calls: Vec<TxHash>,
}

/// Deploy every request in order, writing one report line per deployed contract.
///
/// Stops at the first failure, the following requests are never attempted.
pub async fn run_plan<D: Deployer, W: Write>(
    registry: &ArtifactRegistry,
    deployer: &D,
    requests: Vec<DeploymentRequest>,
    out: &mut W,
) -> Result<Vec<DeploymentResult>, ScriptError> {
    let total = requests.len();
    let mut results = Vec::with_capacity(total);

    for (i, request) in requests.into_iter().enumerate() {
        info!("[{}/{}] Deploying {}...", i + 1, total, request.contract);
        results.push(deploy_request(registry, deployer, &request, out).await?);
    }

    Ok(results)
}

/// Resolve the factory for one request, then deploy it
pub async fn deploy_request<D: Deployer, W: Write>(
    registry: &ArtifactRegistry,
    deployer: &D,
    request: &DeploymentRequest,
    out: &mut W,
) -> Result<DeploymentResult, ScriptError> {
    let factory = registry.factory(&request.contract)?;
    deploy_with_factory(&factory, deployer, request, out).await
}

/// Deploy one request with an already resolved factory, then run its post deploy calls
pub async fn deploy_with_factory<D: Deployer, W: Write>(
    factory: &ContractFactory,
    deployer: &D,
    request: &DeploymentRequest,
    out: &mut W,
) -> Result<DeploymentResult, ScriptError> {
    // Encode everything up front, a bad call argument must not leave a half initialised contract
    let code = factory.deploy_code(&factory.constructor_args(&request.args)?)?;
    let calls = request
        .calls
        .iter()
        .map(|call| {
            factory
                .encode_call(&call.function, &call.args)
                .map(|calldata| (call.function.as_str(), calldata))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let deployed = deployer.deploy(factory.name(), code).await?;
    info!("{} confirmed at {}", factory.name(), deployed.address);

    let mut call_hashes = Vec::with_capacity(calls.len());
    for (function, calldata) in calls {
        info!("Calling {}.{}...", request.label, function);
        call_hashes.push(deployer.call(deployed.address, calldata).await?);
    }

    writeln!(out, "{} deployed to {}", request.label, deployed.address)
        .map_err(|e| ScriptError::ConsoleOutput(e.to_string()))?;

    Ok(DeploymentResult {
        label: request.label.clone(),
        address: deployed.address,
        tx_hash: deployed.tx_hash,
        calls: call_hashes,
    })
}
