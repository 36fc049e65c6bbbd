use std::{io::Write, path::PathBuf};

use tracing::info;

use crate::{
    abi_export::{default_targets, export_abis},
    artifacts::ArtifactRegistry,
    build::SolidityBuilder,
    cli::{CompileArgs, DeployArgs, DeployContractArgs},
    constants::SOLIDITY_VERSION,
    deploy::{deploy_with_factory, run_plan, RpcDeployer},
    errors::ScriptError,
    networks::Network,
    plan::{DeploymentRequest, Plan},
    tx::client::create_rpc_provider,
};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct ScriptContext {
    /// Deployer credential
    pub mnemonic: Option<String>,
    /// Selected network
    pub network: Network,
    /// Endpoint override
    pub rpc_url: Option<String>,
    /// Compiled artifacts directory
    pub artifacts: PathBuf,
}

impl ScriptContext {
    /// The endpoint to talk to, the override winning over the network one
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.rpc_url())
    }

    /// The artifact registry
    pub fn registry(&self) -> ArtifactRegistry {
        ArtifactRegistry::new(&self.artifacts)
    }

    /// Build the signing deployer
    async fn deployer(&self, confirmations: u64) -> Result<RpcDeployer, ScriptError> {
        // Only check the chain id when talking to a known network endpoint
        let expected_chain_id = self.rpc_url.is_none().then(|| self.network.chain_id());
        let client =
            create_rpc_provider(self.rpc_url(), self.mnemonic.as_deref(), expected_chain_id)
                .await?;
        Ok(RpcDeployer::new(client, confirmations))
    }
}

/// Deploy every contract of the selected plan
pub async fn deploy_plan(args: DeployArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    let requests = args.plan.requests()?;
    let registry = ctx.registry();

    // Resolve every factory before sending anything
    for request in &requests {
        registry.factory(&request.contract)?;
    }

    let deployer = ctx.deployer(args.confirmations).await?;
    let results = run_plan(&registry, &deployer, requests, &mut std::io::stdout()).await?;
    info!("Deployed {} contracts on {}", results.len(), ctx.network);

    Ok(())
}

/// Deploy a single contract from command line arguments
pub async fn deploy_contract(
    args: DeployContractArgs,
    ctx: &ScriptContext,
) -> Result<(), ScriptError> {
    let factory = ctx.registry().factory(&args.contract)?;
    let request = DeploymentRequest::new(factory.name(), args.args);

    let deployer = ctx.deployer(args.confirmations).await?;
    deploy_with_factory(&factory, &deployer, &request, &mut std::io::stdout()).await?;

    Ok(())
}

/// Export the abis to the project directories
pub fn export_abi(ctx: &ScriptContext) -> Result<(), ScriptError> {
    let exported = export_abis(&ctx.registry(), &default_targets())?;
    info!("Exported {} contracts", exported);
    Ok(())
}

/// Compile the contracts into the artifacts directory
pub fn compile_contracts(args: CompileArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    let builder = SolidityBuilder::new(args.root, &ctx.artifacts, SOLIDITY_VERSION);
    let artifacts = builder.build()?;
    info!("Artifacts written to {}", artifacts.display());
    Ok(())
}

/// Print the plans and the contracts they deploy
pub fn list_plans<W: Write>(out: &mut W) -> Result<(), ScriptError> {
    for plan in Plan::all() {
        let contracts: Vec<String> = plan
            .requests()?
            .into_iter()
            .map(|request| request.contract)
            .collect();
        let default = if *plan == Plan::default() { " (default)" } else { "" };

        writeln!(out, "{}{}: {}", plan, default, contracts.join(", "))
            .map_err(|e| ScriptError::ConsoleOutput(e.to_string()))?;
    }

    Ok(())
}
