use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider,
    },
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::errors::ScriptError;

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a local signer to sign transactions
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// Build the deployer signer from its credential.
///
/// A single word is read as a hex private key (with or without `0x`), anything
/// else as a BIP-39 phrase, deriving the first account.
pub fn load_signer(credential: &str) -> Result<PrivateKeySigner, ScriptError> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(ScriptError::ClientInitialization(String::from(
            "empty deployer credential",
        )));
    }

    if credential.split_whitespace().count() == 1 {
        return credential
            .parse::<PrivateKeySigner>()
            .map_err(|e| ScriptError::ClientInitialization(format!("invalid private key: {}", e)));
    }

    MnemonicBuilder::<English>::default()
        .phrase(credential)
        .index(0)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .build()
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid mnemonic: {}", e)))
}

/// Sets up the signing client on the given endpoint, checking which chain it serves
pub async fn create_rpc_provider(
    rpc_url: &str,
    credential: Option<&str>,
    expected_chain_id: Option<u64>,
) -> Result<RpcProvider, ScriptError> {
    // No credential means nothing can be signed, fail before touching the network
    let credential = credential.ok_or_else(|| {
        ScriptError::ClientInitialization(String::from(
            "no deployer credential, set the MNEMONIC env var",
        ))
    })?;
    let signer = load_signer(credential)?;
    info!("Deployer address: {}", signer.address());

    let wallet = EthereumWallet::from(signer);

    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(format!("{}: {}", rpc_url, e)))?;

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    // Fetch chain id
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);
    if let Some(expected) = expected_chain_id.filter(|expected| *expected != chain_id) {
        warn!(
            "Endpoint reports chain {} but chain {} was expected",
            chain_id, expected
        );
    }

    Ok(provider)
}
