//! The networks the contracts can be deployed to

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

use crate::constants::{TESTNET_CHAIN_ID, TESTNET_RPC, XDC_CHAIN_ID, XDC_RPC};

/// A named deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Network {
    /// The Apothem test network
    #[default]
    Testnet,
    /// The XDC production network
    Xdc,
}

impl Network {
    /// The JSON-RPC endpoint of this network
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_RPC,
            Network::Xdc => XDC_RPC,
        }
    }

    /// The chain id the endpoint is expected to report
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Testnet => TESTNET_CHAIN_ID,
            Network::Xdc => XDC_CHAIN_ID,
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Network::Testnet => write!(f, "testnet"),
            Network::Xdc => write!(f, "xdc"),
        }
    }
}
