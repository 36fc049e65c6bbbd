//! Constants used in the deploy scripts

/// Solidity compiler version the contracts are built with
pub const SOLIDITY_VERSION: &str = "0.8.17";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";

/// Env var holding the deployer credential (hex private key or BIP-39 phrase)
pub const CREDENTIAL_ENV: &str = "MNEMONIC";

/// Misspelled credential env var read by older setups, used when `MNEMONIC` is unset
pub const LEGACY_CREDENTIAL_ENV: &str = "MNENOMIC";

/// Env var overriding the selected network endpoint
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Apothem testnet RPC endpoint
pub const TESTNET_RPC: &str = "https://erpc.apothem.network";

/// Apothem testnet chain id
pub const TESTNET_CHAIN_ID: u64 = 51;

/// XDC mainnet RPC endpoint
pub const XDC_RPC: &str = "https://erpc.xinfin.network";

/// XDC mainnet chain id
pub const XDC_CHAIN_ID: u64 = 50;

/// Full human readable signatures, parameter names included
pub const ABI_PRETTY_PATH: &str = "./abi/pretty";

/// Minified JSON abi output
pub const ABI_UGLY_PATH: &str = "./abi/ugly";

/// Human readable signatures reduced to the parameter types
pub const ABI_MINIMAL_PATH: &str = "./abi/minimal";

/// Artifact sub directories that never hold contract artifacts
pub const IGNORED_ARTIFACT_DIRS: [&str; 2] = ["build-info", "cache"];
