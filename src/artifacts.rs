//! Compiled contract artifacts, and the factories built from them.
//!
//! Artifacts are read from either a Hardhat tree (`artifacts/contracts/<File>.sol/<Name>.json`,
//! with `bytecode` as a hex string) or a Foundry tree (`out/<File>.sol/<Name>.json`, with
//! `bytecode.object`). Both carry the JSON abi under `abi`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    hex,
    json_abi::{JsonAbi, Param},
    primitives::Bytes,
};
use serde::Deserialize;
use tracing::debug;

use crate::{constants::IGNORED_ARTIFACT_DIRS, errors::ScriptError};

/// Artifact as written on disk by the compiler toolchain
#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<RawBytecode>,
}

/// Hardhat writes the creation code as a plain string, Foundry nests it
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A compiled contract: its name, abi and creation code
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name, the artifact file stem
    pub name: String,
    /// Source file the contract was compiled from, when known (ex: `FXD.sol`)
    pub source: Option<String>,
    /// The contract abi
    pub abi: JsonAbi,
    /// Creation bytecode, empty for interfaces and abstract contracts
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ScriptError::ArtifactResolution(format!("invalid artifact file name {:?}", path))
            })?
            .to_string();
        let source = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .filter(|s| s.ends_with(".sol"))
            .map(String::from);

        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ArtifactResolution(format!("{}: {}", path.display(), e)))?;

        Self::from_json(name, source, &contents)
    }

    /// Parse an artifact from its JSON content
    pub fn from_json(
        name: String,
        source: Option<String>,
        contents: &str,
    ) -> Result<Self, ScriptError> {
        let raw: RawArtifact = serde_json::from_str(contents)
            .map_err(|e| ScriptError::ArtifactResolution(format!("{}: {}", name, e)))?;

        let bytecode = match raw.bytecode {
            Some(code) => hex::decode(code.as_hex()).map_err(|e| {
                ScriptError::ArtifactResolution(format!(
                    "{}: bytecode is not valid hex (unlinked library?): {}",
                    name, e
                ))
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            name,
            source,
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }

    /// Whether this artifact carries creation code
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

/// Lookup of compiled artifacts by contract name
#[derive(Debug, Clone)]
pub struct ArtifactRegistry {
    /// Root of the artifacts tree
    root: PathBuf,
}

impl ArtifactRegistry {
    /// Build a registry over the given artifacts directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The artifacts directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every artifact file under the root, sorted by path
    pub fn artifact_paths(&self) -> Result<Vec<PathBuf>, ScriptError> {
        if !self.root.is_dir() {
            return Err(ScriptError::ArtifactResolution(format!(
                "artifacts directory {} not found, did you compile the contracts?",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        collect_artifact_paths(&self.root, &mut paths)?;
        paths.sort();
        Ok(paths)
    }

    /// Find the artifact for a contract name, or a fully qualified `File.sol:Name`
    pub fn resolve(&self, name: &str) -> Result<ContractArtifact, ScriptError> {
        let (source, contract) = match name.split_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };

        let matches: Vec<PathBuf> = self
            .artifact_paths()?
            .into_iter()
            .filter(|path| path.file_stem().is_some_and(|stem| stem == contract))
            .filter(|path| match source {
                Some(source) => path
                    .parent()
                    .is_some_and(|parent| parent.ends_with(source)),
                None => true,
            })
            .collect();

        match matches.as_slice() {
            [] => Err(ScriptError::ArtifactResolution(format!(
                "no artifact found for contract {}",
                name
            ))),
            [path] => {
                debug!("Resolved {} to {}", name, path.display());
                ContractArtifact::from_file(path)
            }
            _ => Err(ScriptError::ArtifactResolution(format!(
                "multiple artifacts found for contract {}, use a fully qualified name",
                name
            ))),
        }
    }

    /// Get the deployment factory for a contract
    pub fn factory(&self, name: &str) -> Result<ContractFactory, ScriptError> {
        ContractFactory::new(self.resolve(name)?)
    }
}

/// Recursively gather the `.json` artifacts, skipping debug files and build info
fn collect_artifact_paths(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ArtifactResolution(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?
            .path();

        if path.is_dir() {
            let ignored = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| IGNORED_ARTIFACT_DIRS.contains(&n));
            if !ignored {
                collect_artifact_paths(&path, out)?;
            }
            continue;
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name.ends_with(".json") && !file_name.ends_with(".dbg.json") {
            out.push(path);
        }
    }

    Ok(())
}

/// Builds deployment and call payloads for one compiled contract
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: ContractArtifact,
}

impl ContractFactory {
    /// Wrap a deployable artifact
    pub fn new(artifact: ContractArtifact) -> Result<Self, ScriptError> {
        if !artifact.is_deployable() {
            return Err(ScriptError::ArtifactResolution(format!(
                "{} has no creation bytecode (interface or abstract contract?)",
                artifact.name
            )));
        }
        Ok(Self { artifact })
    }

    /// The contract name
    pub fn name(&self) -> &str {
        &self.artifact.name
    }

    /// Creation code followed by the abi encoded constructor arguments
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let mut code = self.artifact.bytecode.to_vec();

        match &self.artifact.abi.constructor {
            Some(constructor) => {
                let encoded = constructor.abi_encode_input(args).map_err(|e| {
                    ScriptError::AbiEncoding(format!("{} constructor: {}", self.name(), e))
                })?;
                code.extend_from_slice(&encoded);
            }
            None if !args.is_empty() => {
                return Err(ScriptError::AbiEncoding(format!(
                    "{} has no constructor but {} arguments were given",
                    self.name(),
                    args.len()
                )));
            }
            None => {}
        }

        Ok(code.into())
    }

    /// Coerce literal values into the constructor's declared types
    pub fn constructor_args(&self, raw: &[String]) -> Result<Vec<DynSolValue>, ScriptError> {
        let inputs = self
            .artifact
            .abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.as_slice())
            .unwrap_or_default();

        if inputs.len() != raw.len() {
            return Err(ScriptError::AbiEncoding(format!(
                "{} constructor takes {} arguments, got {}",
                self.name(),
                inputs.len(),
                raw.len()
            )));
        }

        coerce_params(inputs, raw)
            .map_err(|e| ScriptError::AbiEncoding(format!("{} constructor: {}", self.name(), e)))
    }

    /// Selector followed by the abi encoded arguments, for the overload of `function`
    /// taking `raw.len()` parameters. Literal values are coerced into the declared types.
    pub fn encode_call(&self, function: &str, raw: &[String]) -> Result<Bytes, ScriptError> {
        let overloads = self.artifact.abi.function(function).ok_or_else(|| {
            ScriptError::AbiEncoding(format!("{} has no function {}", self.name(), function))
        })?;

        let func = overloads
            .iter()
            .find(|f| f.inputs.len() == raw.len())
            .ok_or_else(|| {
                ScriptError::AbiEncoding(format!(
                    "{}.{} has no overload taking {} arguments",
                    self.name(),
                    function,
                    raw.len()
                ))
            })?;

        coerce_params(&func.inputs, raw)
            .and_then(|args| func.abi_encode_input(&args).map_err(|e| e.to_string()))
            .map(Bytes::from)
            .map_err(|e| ScriptError::AbiEncoding(format!("{}.{}: {}", self.name(), function, e)))
    }
}

/// Parse each literal as the Solidity type of its parameter
fn coerce_params(params: &[Param], raw: &[String]) -> Result<Vec<DynSolValue>, String> {
    params
        .iter()
        .zip(raw)
        .map(|(param, value)| {
            let ty = param.resolve().map_err(|e| e.to_string())?;
            ty.coerce_str(value)
                .map_err(|e| format!("{} ({}) from {:?}: {}", param.name, param.ty, value, e))
        })
        .collect()
}
