//! The hard-coded deployment plans.
//!
//! Only the plan selected on the command line runs; the others stay inert.

use std::fmt::{self, Display, Formatter};

use alloy::primitives::{address, utils::parse_units, Address, U256};
use clap::ValueEnum;

use crate::errors::ScriptError;

/// Oracle address the FXD stablecoin is wired to
pub const FXD_ORACLE: Address = address!("aaa17A76C38A071a4EFC0788a892FB0146BA36eA");

/// XDC/USD price reported by the chainlink style mock aggregator
pub const CHAINLINK_PRICE: &str = "0.023297";
/// Decimals of the chainlink style feed
pub const CHAINLINK_DECIMALS: u8 = 8;

/// XDC/USD price reported by the compound style anchored view
pub const COMPOUND_PRICE: &str = "0.023999";
/// Decimals of the compound style feed
pub const COMPOUND_DECIMALS: u8 = 6;

/// Cumulative prices of the USDC/XDC mock pair, tokens in reverse order
pub const USDC_XDC_CUMULATIVE_PRICE_0: &str = "2784275278277546624451305316303382174855535226";
/// See [`USDC_XDC_CUMULATIVE_PRICE_0`]
pub const USDC_XDC_CUMULATIVE_PRICE_1: &str = "2639132666967530700283664103";

/// Initial SXD supply argument
pub const SXD_INITIAL: u64 = 20_000;

/// A call sent to a contract right after its deployment is confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct PostDeployCall {
    /// Function name, resolved against the deployed contract's abi
    pub function: String,
    /// Call arguments, as literals parsed against the function's declared types
    pub args: Vec<String>,
}

/// One contract to deploy: its name and its constructor arguments, in order
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRequest {
    /// Contract name as known by the artifact registry
    pub contract: String,
    /// Label used in the console output
    pub label: String,
    /// Constructor arguments, as literals parsed against the constructor's declared types
    pub args: Vec<String>,
    /// Calls to perform once deployed
    pub calls: Vec<PostDeployCall>,
}

impl DeploymentRequest {
    /// Deploy `contract` with the given constructor arguments
    pub fn new(contract: &str, args: Vec<String>) -> Self {
        Self {
            contract: contract.to_string(),
            label: contract.to_string(),
            args,
            calls: Vec::new(),
        }
    }

    /// Use a different name in the console output
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Call `function` once the contract is deployed
    pub fn then_call(mut self, function: &str, args: Vec<String>) -> Self {
        self.calls.push(PostDeployCall {
            function: function.to_string(),
            args,
        });
        self
    }
}

/// The named deployment plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Plan {
    /// The FXD stablecoin, wired to its oracle
    #[default]
    Fxd,
    /// The SXD token
    Sxd,
    /// The price oracle mocks (aggregator, anchored view, USDC/XDC pair)
    OracleMocks,
}

impl Plan {
    /// Every known plan
    pub fn all() -> &'static [Plan] {
        &[Plan::Fxd, Plan::Sxd, Plan::OracleMocks]
    }

    /// The ordered deployment requests of this plan
    pub fn requests(&self) -> Result<Vec<DeploymentRequest>, ScriptError> {
        let requests = match self {
            Plan::Fxd => vec![
                DeploymentRequest::new("FXD", vec![FXD_ORACLE.to_string()]).with_label("fxd"),
            ],
            Plan::Sxd => vec![
                DeploymentRequest::new("SXD", vec![SXD_INITIAL.to_string()]).with_label("sxd"),
            ],
            Plan::OracleMocks => vec![
                DeploymentRequest::new("MockAggregatorV3", vec![])
                    .with_label("aggregator")
                    .then_call(
                        "set",
                        vec![scaled(CHAINLINK_PRICE, CHAINLINK_DECIMALS)?.to_string()],
                    ),
                DeploymentRequest::new("MockAnchoredView", vec![])
                    .with_label("anchoredView")
                    .then_call(
                        "set",
                        vec![scaled(COMPOUND_PRICE, COMPOUND_DECIMALS)?.to_string()],
                    ),
                DeploymentRequest::new("MockPair", vec![])
                    .with_label("usdcXdcPair")
                    .then_call(
                        "setCumulativePrices",
                        vec![
                            USDC_XDC_CUMULATIVE_PRICE_0.to_string(),
                            USDC_XDC_CUMULATIVE_PRICE_1.to_string(),
                        ],
                    ),
            ],
        };

        Ok(requests)
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Fxd => write!(f, "fxd"),
            Plan::Sxd => write!(f, "sxd"),
            Plan::OracleMocks => write!(f, "oracle-mocks"),
        }
    }
}

/// A decimal amount scaled by `10^decimals`
pub fn scaled(amount: &str, decimals: u8) -> Result<U256, ScriptError> {
    parse_units(amount, decimals)
        .map(|units| units.get_absolute())
        .map_err(|e| ScriptError::InvalidArgument(format!("{}: {}", amount, e)))
}
