//! Export of the compiled contract abis.
//!
//! Each target directory mirrors the artifacts tree (`<dir>/contracts/FXD.sol/FXD.json`), in
//! one of three renderings:
//! - [`AbiFormat::FullName`]: human readable signatures, with parameter names
//! - [`AbiFormat::Json`]: the raw JSON abi, minified
//! - [`AbiFormat::Minimal`]: human readable signatures, types only

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::{AbiItem, EventParam, JsonAbi, Param, StateMutability};
use tracing::{debug, info};

use crate::{
    artifacts::{ArtifactRegistry, ContractArtifact},
    constants::{ABI_MINIMAL_PATH, ABI_PRETTY_PATH, ABI_UGLY_PATH},
    errors::ScriptError,
};

/// How an abi gets rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiFormat {
    /// `function set(uint256 price)`
    FullName,
    /// The JSON abi itself
    Json,
    /// `function set(uint256)`
    Minimal,
}

/// A directory to export every abi to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiExportTarget {
    /// Root of the exported tree, mirroring the artifacts layout
    pub path: PathBuf,
    /// How each abi gets rendered
    pub format: AbiFormat,
}

/// The project export targets
pub fn default_targets() -> Vec<AbiExportTarget> {
    vec![
        AbiExportTarget {
            path: PathBuf::from(ABI_PRETTY_PATH),
            format: AbiFormat::FullName,
        },
        AbiExportTarget {
            path: PathBuf::from(ABI_UGLY_PATH),
            format: AbiFormat::Json,
        },
        AbiExportTarget {
            path: PathBuf::from(ABI_MINIMAL_PATH),
            format: AbiFormat::Minimal,
        },
    ]
}

/// Write the abi of every artifact with a non empty abi to every target, returns the number of
/// contracts exported
pub fn export_abis(
    registry: &ArtifactRegistry,
    targets: &[AbiExportTarget],
) -> Result<usize, ScriptError> {
    let mut exported = 0;

    for path in registry.artifact_paths()? {
        let artifact = ContractArtifact::from_file(&path)?;
        if artifact.abi.is_empty() {
            debug!("Skipping {}, empty abi", artifact.name);
            continue;
        }

        let relative = path
            .strip_prefix(registry.root())
            .map_err(|e| ScriptError::AbiExport(e.to_string()))?;

        for target in targets {
            let rendered = render(&artifact.abi, target.format)?;
            write_export(&target.path.join(relative), &rendered)?;
        }
        exported += 1;
    }

    info!(
        "Exported {} abis to {} directories",
        exported,
        targets.len()
    );
    Ok(exported)
}

/// Render an abi in the given format
pub fn render(abi: &JsonAbi, format: AbiFormat) -> Result<String, ScriptError> {
    let rendered = match format {
        AbiFormat::Json => serde_json::to_string(abi),
        AbiFormat::FullName => serde_json::to_string_pretty(&human_readable(abi, true)),
        AbiFormat::Minimal => serde_json::to_string_pretty(&human_readable(abi, false)),
    };

    rendered.map_err(|e| ScriptError::AbiExport(e.to_string()))
}

/// Human readable signatures of every constructor, function, event and error of the abi
pub fn human_readable(abi: &JsonAbi, full: bool) -> Vec<String> {
    abi.items()
        .filter_map(|item| match item {
            AbiItem::Constructor(c) => {
                let mut out = format!("constructor({})", format_params(&c.inputs, full));
                if c.state_mutability == StateMutability::Payable {
                    out.push_str(" payable");
                }
                Some(out)
            }
            AbiItem::Function(f) => {
                let mut out = format!("function {}({})", f.name, format_params(&f.inputs, full));
                if let Some(mutability) = mutability_keyword(f.state_mutability) {
                    out.push(' ');
                    out.push_str(mutability);
                }
                if !f.outputs.is_empty() {
                    let outputs: Vec<String> =
                        f.outputs.iter().map(|p| format_param(p, full)).collect();
                    out.push_str(&format!(" returns ({})", outputs.join(", ")));
                }
                Some(out)
            }
            AbiItem::Event(e) => {
                let inputs: Vec<String> =
                    e.inputs.iter().map(|p| format_event_param(p, full)).collect();
                let mut out = format!("event {}({})", e.name, inputs.join(separator(full)));
                if e.anonymous {
                    out.push_str(" anonymous");
                }
                Some(out)
            }
            AbiItem::Error(e) => Some(format!(
                "error {}({})",
                e.name,
                format_params(&e.inputs, full)
            )),
            // Fallback and receive have no human readable form
            _ => None,
        })
        .collect()
}

fn separator(full: bool) -> &'static str {
    if full {
        ", "
    } else {
        ","
    }
}

fn mutability_keyword(mutability: StateMutability) -> Option<&'static str> {
    match mutability {
        StateMutability::Pure => Some("pure"),
        StateMutability::View => Some("view"),
        StateMutability::Payable => Some("payable"),
        StateMutability::NonPayable => None,
    }
}

fn format_params(params: &[Param], full: bool) -> String {
    params
        .iter()
        .map(|p| format_param(p, full))
        .collect::<Vec<_>>()
        .join(separator(full))
}

fn format_param(param: &Param, full: bool) -> String {
    let ty = format_type(&param.ty, &param.components, full);
    if full && !param.name.is_empty() {
        format!("{} {}", ty, param.name)
    } else {
        ty
    }
}

fn format_event_param(param: &EventParam, full: bool) -> String {
    let mut out = format_type(&param.ty, &param.components, full);
    if param.indexed {
        out.push_str(" indexed");
    }
    if full && !param.name.is_empty() {
        out.push(' ');
        out.push_str(&param.name);
    }
    out
}

/// Tuples are expanded from their components, keeping any array suffix
fn format_type(ty: &str, components: &[Param], full: bool) -> String {
    match ty.strip_prefix("tuple") {
        Some(suffix) => format!("tuple({}){}", format_params(components, full), suffix),
        None => ty.to_string(),
    }
}

fn write_export(path: &Path, contents: &str) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScriptError::AbiExport(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| ScriptError::AbiExport(format!("{}: {}", path.display(), e)))
}
