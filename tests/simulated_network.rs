//! Runs the deployment plans against a simulated deployer

use std::{fs, path::Path, sync::Mutex};

use alloy::primitives::{address, b256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use tempfile::TempDir;
use xdc_deploy::{
    artifacts::ArtifactRegistry,
    deploy::{run_plan, Deployed, Deployer},
    errors::ScriptError,
    plan::{Plan, FXD_ORACLE},
};

const ADDRESSES: [Address; 3] = [
    address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
    address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
    address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"),
];

/// Hands out the fixed addresses in order, optionally failing one deployment
struct SimulatedDeployer {
    fail_at: Option<usize>,
    deployed: Mutex<Vec<(String, Bytes)>>,
    calls: Mutex<Vec<(Address, Bytes)>>,
}

impl SimulatedDeployer {
    fn new() -> Self {
        Self {
            fail_at: None,
            deployed: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::new()
        }
    }

    fn deployed_names(&self) -> Vec<String> {
        self.deployed
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl Deployer for SimulatedDeployer {
    async fn deploy(&self, contract: &str, code: Bytes) -> Result<Deployed, ScriptError> {
        let mut deployed = self.deployed.lock().unwrap();
        let index = deployed.len();
        deployed.push((contract.to_string(), code));

        if self.fail_at == Some(index) {
            return Err(ScriptError::TransactionReverted(format!("{} reverted", contract)));
        }

        Ok(Deployed {
            address: ADDRESSES[index],
            tx_hash: TxHash::with_last_byte(index as u8 + 1),
        })
    }

    async fn call(&self, contract: Address, calldata: Bytes) -> Result<TxHash, ScriptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((contract, calldata));
        Ok(b256!("00000000000000000000000000000000000000000000000000000000000000ff"))
    }
}

fn write_artifact(root: &Path, name: &str, abi: &str) {
    let dir = root.join("contracts").join(format!("{}.sol", name));
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{}.json", name)),
        format!(
            r#"{{"contractName": "{}", "abi": {}, "bytecode": "0x6080604052"}}"#,
            name, abi
        ),
    )
    .unwrap();
}

fn artifacts() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let set_answer = r#"{"type": "function", "name": "set", "inputs": [{"name": "answer", "type": "int256"}], "outputs": [], "stateMutability": "nonpayable"}"#;
    let set_price = r#"{"type": "function", "name": "set", "inputs": [{"name": "price", "type": "uint256"}], "outputs": [], "stateMutability": "nonpayable"}"#;

    write_artifact(
        dir.path(),
        "FXD",
        r#"[{"type": "constructor", "inputs": [{"name": "oracle", "type": "address"}], "stateMutability": "nonpayable"}]"#,
    );
    write_artifact(
        dir.path(),
        "SXD",
        r#"[{"type": "constructor", "inputs": [{"name": "initial", "type": "uint32"}], "stateMutability": "nonpayable"}]"#,
    );
    write_artifact(dir.path(), "MockAggregatorV3", &format!("[{}]", set_answer));
    write_artifact(dir.path(), "MockAnchoredView", &format!("[{}]", set_price));
    write_artifact(
        dir.path(),
        "MockPair",
        r#"[{"type": "function", "name": "setCumulativePrices", "inputs": [{"name": "price0", "type": "uint256"}, {"name": "price1", "type": "uint256"}], "outputs": [], "stateMutability": "nonpayable"}]"#,
    );

    dir
}

#[tokio::test]
async fn default_plan_reports_the_deployed_address() {
    let dir = artifacts();
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();
    let mut out = Vec::new();

    let results = run_plan(
        &registry,
        &deployer,
        Plan::default().requests().unwrap(),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].address, ADDRESSES[0]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("fxd deployed to {}\n", ADDRESSES[0])
    );

    // Creation code carries the oracle address as constructor argument
    let deployed = deployer.deployed.lock().unwrap();
    assert_eq!(deployed[0].0, "FXD");
    assert!(deployed[0].1.ends_with(FXD_ORACLE.as_slice()));
}

#[tokio::test]
async fn alternative_plans_stay_inert() {
    let dir = artifacts();
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();

    run_plan(
        &registry,
        &deployer,
        Plan::Fxd.requests().unwrap(),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    assert_eq!(deployer.deployed_names(), vec!["FXD"]);
    assert!(deployer.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn mocks_are_set_once_deployed() {
    let dir = artifacts();
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();
    let mut out = Vec::new();

    let results = run_plan(
        &registry,
        &deployer,
        Plan::OracleMocks.requests().unwrap(),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(
        deployer.deployed_names(),
        vec!["MockAggregatorV3", "MockAnchoredView", "MockPair"]
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "aggregator deployed to {}\nanchoredView deployed to {}\nusdcXdcPair deployed to {}\n",
            ADDRESSES[0], ADDRESSES[1], ADDRESSES[2]
        )
    );

    // Each call lands on the contract deployed just before it
    let calls = deployer.calls.lock().unwrap();
    let targets: Vec<Address> = calls.iter().map(|(to, _)| *to).collect();
    assert_eq!(targets, ADDRESSES.to_vec());
    assert_eq!(
        U256::from_be_slice(&calls[0].1[4..]),
        U256::from(2_329_700u64)
    );
    assert_eq!(
        U256::from_be_slice(&calls[1].1[4..]),
        U256::from(23_999u64)
    );
    assert_eq!(calls[2].1.len(), 4 + 64);
    assert!(results.iter().all(|r| r.calls.len() == 1));
}

#[tokio::test]
async fn sxd_supply_fits_the_declared_width() {
    let dir = artifacts();
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();
    let mut out = Vec::new();

    run_plan(
        &registry,
        &deployer,
        Plan::Sxd.requests().unwrap(),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("sxd deployed to {}\n", ADDRESSES[0])
    );
    let deployed = deployer.deployed.lock().unwrap();
    assert_eq!(deployed[0].0, "SXD");
    // uint32 is still padded to a full word
    assert_eq!(deployed[0].1.len(), 5 + 32);
    assert_eq!(U256::from_be_slice(&deployed[0].1[5..]), U256::from(20_000u64));
}

#[tokio::test]
async fn call_literal_of_the_wrong_type_never_reaches_the_network() {
    let dir = artifacts();
    // The setter takes a feed address, not the scaled price
    write_artifact(
        dir.path(),
        "MockAggregatorV3",
        r#"[{"type": "function", "name": "set", "inputs": [{"name": "feed", "type": "address"}], "outputs": [], "stateMutability": "nonpayable"}]"#,
    );
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();

    let res = run_plan(
        &registry,
        &deployer,
        Plan::OracleMocks.requests().unwrap(),
        &mut Vec::new(),
    )
    .await;

    assert!(matches!(res, Err(ScriptError::AbiEncoding(_))));
    assert!(deployer.deployed_names().is_empty());
}

#[tokio::test]
async fn failure_stops_the_run() {
    let dir = artifacts();
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::failing_at(1);
    let mut out = Vec::new();

    let res = run_plan(
        &registry,
        &deployer,
        Plan::OracleMocks.requests().unwrap(),
        &mut out,
    )
    .await;

    assert_eq!(
        res,
        Err(ScriptError::TransactionReverted(String::from(
            "MockAnchoredView reverted"
        )))
    );
    // The pair is never attempted, only the first contract got reported
    assert_eq!(
        deployer.deployed_names(),
        vec!["MockAggregatorV3", "MockAnchoredView"]
    );
    assert_eq!(deployer.calls.lock().unwrap().len(), 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("aggregator deployed to {}\n", ADDRESSES[0])
    );
}

#[tokio::test]
async fn constructor_mismatch_never_reaches_the_network() {
    let dir = artifacts();
    // FXD now expects a flag, the plan passes an address
    write_artifact(
        dir.path(),
        "FXD",
        r#"[{"type": "constructor", "inputs": [{"name": "paused", "type": "bool"}], "stateMutability": "nonpayable"}]"#,
    );
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();

    let res = run_plan(
        &registry,
        &deployer,
        Plan::Fxd.requests().unwrap(),
        &mut Vec::new(),
    )
    .await;

    assert!(matches!(res, Err(ScriptError::AbiEncoding(_))));
    assert!(deployer.deployed_names().is_empty());
}

#[tokio::test]
async fn missing_artifact_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "SXD", "[]");
    let registry = ArtifactRegistry::new(dir.path());
    let deployer = SimulatedDeployer::new();

    let res = run_plan(
        &registry,
        &deployer,
        Plan::Fxd.requests().unwrap(),
        &mut Vec::new(),
    )
    .await;

    assert!(matches!(res, Err(ScriptError::ArtifactResolution(_))));
    assert!(deployer.deployed_names().is_empty());
}

#[test]
fn fully_qualified_names_disambiguate() {
    let dir = artifacts();
    // A second FXD, shipped by a dependency
    let dep = dir.path().join("@stable").join("FXD.sol");
    fs::create_dir_all(&dep).unwrap();
    fs::write(dep.join("FXD.json"), r#"{"abi": [], "bytecode": "0x60"}"#).unwrap();
    let registry = ArtifactRegistry::new(dir.path());

    assert!(matches!(
        registry.resolve("FXD"),
        Err(ScriptError::ArtifactResolution(_))
    ));

    let local = registry.resolve("contracts/FXD.sol:FXD").unwrap();
    assert!(local.abi.constructor.is_some());
    assert_eq!(local.source.as_deref(), Some("FXD.sol"));

    let dependency = registry.resolve("@stable/FXD.sol:FXD").unwrap();
    assert!(dependency.abi.constructor.is_none());
}
