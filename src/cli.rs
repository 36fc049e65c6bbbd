//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{compile_contracts, deploy_contract, deploy_plan, export_abi, list_plans, ScriptContext},
    constants::{CREDENTIAL_ENV, DEFAULT_ARTIFACTS_DIR, LEGACY_CREDENTIAL_ENV, RPC_URL_ENV},
    errors::ScriptError,
    networks::Network,
    plan::Plan,
};

/// Scripts for compiling, exporting & deploying the XDC stablecoin contracts
#[derive(Parser)]
#[command(name = "xdc-deploy", version)]
pub struct Cli {
    /// Deployer credential, a hex private key or a BIP-39 phrase
    #[arg(long, env = CREDENTIAL_ENV, hide_env_values = true, global = true)]
    pub mnemonic: Option<String>,

    /// Network to deploy to
    #[arg(short, long, value_enum, default_value_t = Network::Testnet, global = true)]
    pub network: Network,

    /// Network RPC URL, overrides the endpoint of the selected network
    #[arg(short, long, env = RPC_URL_ENV, global = true)]
    pub rpc_url: Option<String>,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR, global = true)]
    pub artifacts: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Split the parsed arguments into the shared context and the command
    pub fn into_parts(self) -> (ScriptContext, Command) {
        let Cli {
            mnemonic,
            network,
            rpc_url,
            artifacts,
            command,
        } = self;

        (
            ScriptContext {
                mnemonic: pick_credential(mnemonic, std::env::var(LEGACY_CREDENTIAL_ENV).ok()),
                network,
                rpc_url,
                artifacts,
            },
            command,
        )
    }
}

/// The `--mnemonic`/`MNEMONIC` credential, falling back to the legacy env var
pub fn pick_credential(primary: Option<String>, legacy: Option<String>) -> Option<String> {
    primary.or(legacy).filter(|credential| !credential.trim().is_empty())
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the contracts of a plan, in order
    Deploy(DeployArgs),
    /// Deploy a single contract with the given constructor arguments
    DeployContract(DeployContractArgs),
    /// Export the abi of every compiled contract
    ExportAbi,
    /// Compile the Solidity contracts
    Compile(CompileArgs),
    /// List the deployment plans
    Plans,
}

impl Command {
    /// Run the command
    pub async fn run(self, ctx: &ScriptContext) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                info!("Deploying plan {} on {}...", args.plan, ctx.network);
                deploy_plan(args, ctx).await
            }
            Command::DeployContract(args) => {
                info!("Deploying {} on {}...", args.contract, ctx.network);
                deploy_contract(args, ctx).await
            }
            Command::ExportAbi => {
                info!("Exporting abis...");
                export_abi(ctx)
            }
            Command::Compile(args) => {
                info!("Compiling contracts...");
                compile_contracts(args, ctx)
            }
            Command::Plans => list_plans(&mut std::io::stdout()),
        }
    }
}

/// Deploy a plan
#[derive(Args)]
pub struct DeployArgs {
    /// The plan to deploy
    #[arg(short, long, value_enum, default_value_t = Plan::Fxd)]
    pub plan: Plan,

    /// Blocks to wait for on each transaction
    #[arg(short, long, default_value_t = 1)]
    pub confirmations: u64,
}

/// Deploy one contract
#[derive(Args)]
pub struct DeployContractArgs {
    /// Contract name, or fully qualified `File.sol:Name`
    pub contract: String,

    /// Constructor arguments, coerced to the declared types
    pub args: Vec<String>,

    /// Blocks to wait for on each transaction
    #[arg(short, long, default_value_t = 1)]
    pub confirmations: u64,
}

/// Compile the contracts
#[derive(Args)]
pub struct CompileArgs {
    /// Root of the Solidity project
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
