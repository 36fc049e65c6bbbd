use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::info;

use crate::{errors::ScriptError, utils::command_success_or};

/// Compiles the Solidity sources with forge, using the Hardhat project layout
/// (`contracts/` sources, `node_modules` libraries)
pub struct SolidityBuilder {
    /// Root of the Solidity project
    project_root: PathBuf,
    /// Where the artifacts get written
    artifacts_dir: PathBuf,
    /// Pinned solc version
    solc_version: String,
}

impl SolidityBuilder {
    pub fn new(
        project_root: impl Into<PathBuf>,
        artifacts_dir: impl Into<PathBuf>,
        solc_version: &str,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            artifacts_dir: artifacts_dir.into(),
            solc_version: solc_version.to_string(),
        }
    }

    /// Full build of the project, returning the artifacts directory
    pub fn build(&self) -> Result<&Path, ScriptError> {
        info!(
            "Compiling {} with solc {}",
            self.project_root.display(),
            self.solc_version
        );
        command_success_or(self.build_command(), "Failed to compile the Solidity contracts")?;

        if !self.artifacts_dir.is_dir() {
            return Err(ScriptError::ContractCompilation(format!(
                "no artifacts written to {}",
                self.artifacts_dir.display()
            )));
        }

        Ok(&self.artifacts_dir)
    }

    /// The forge invocation
    pub fn build_command(&self) -> Command {
        let mut build_cmd = Command::new("forge");
        build_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        build_cmd.arg("build");
        // contracts/ + node_modules layout
        build_cmd.arg("--hardhat");
        build_cmd.arg("--root");
        build_cmd.arg(&self.project_root);
        build_cmd.arg("--use");
        build_cmd.arg(&self.solc_version);
        build_cmd.arg("--out");
        build_cmd.arg(&self.artifacts_dir);
        build_cmd
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn pins_the_compiler_version() {
        let builder = SolidityBuilder::new(".", "./artifacts", "0.8.17");
        let cmd = builder.build_command();

        assert_eq!(cmd.get_program(), OsStr::new("forge"));
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                "build",
                "--hardhat",
                "--root",
                ".",
                "--use",
                "0.8.17",
                "--out",
                "./artifacts"
            ]
            .map(OsStr::new)
        );
    }
}
