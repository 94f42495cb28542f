//! Build executor boundary
//!
//! The executor is the collaborator that performs the actual compilation.
//! Resolution never touches it; the pipeline hands it a fully-specified
//! build request and reports the outcome.

use buildman_core::{
    BuildmanError, BuildmanResult, BuildOptions, BuildRequest, PlatformTarget,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// Outcome of a successful executor run
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub target: PlatformTarget,
    pub artifact_path: PathBuf,
    pub duration: Duration,
}

/// External build pipeline the resolved request is handed to
pub trait BuildExecutor {
    /// Build a player from the given request
    fn build_player(
        &self,
        request: &BuildRequest,
        options: &BuildOptions,
    ) -> BuildmanResult<BuildReport>;

    /// Build asset bundles into the given output directory
    fn build_asset_bundles(
        &self,
        output_dir: &Path,
        target: PlatformTarget,
    ) -> BuildmanResult<BuildReport>;
}

/// Executor that invokes an external engine command.
///
/// The command and its base arguments come from the `[engine]` section of
/// the settings file; the request is passed as additional flags.
pub struct EngineExecutor {
    command: String,
    args: Vec<String>,
}

impl EngineExecutor {
    pub fn new<S: Into<String>>(command: S, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        cmd
    }

    fn run(&self, mut cmd: Command, target: PlatformTarget) -> BuildmanResult<()> {
        log::debug!("Invoking engine: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            BuildmanError::execution_for_target(
                format!("Failed to run engine command '{}': {}", self.command, e),
                target.name(),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildmanError::execution_for_target(
                format!(
                    "Engine command '{}' exited with {}: {}",
                    self.command,
                    output.status,
                    stderr.trim()
                ),
                target.name(),
            ));
        }

        Ok(())
    }
}

impl BuildExecutor for EngineExecutor {
    fn build_player(
        &self,
        request: &BuildRequest,
        options: &BuildOptions,
    ) -> BuildmanResult<BuildReport> {
        let start = Instant::now();

        let mut cmd = self.base_command();
        cmd.arg("build-player")
            .arg("--build-target")
            .arg(request.target.name())
            .arg("--output")
            .arg(&request.output_path)
            .arg("--application-id")
            .arg(&request.application_id);
        for scene in &request.scenes {
            cmd.arg("--scene").arg(scene);
        }
        if options.reveal_built_player {
            cmd.arg("--reveal");
        }

        self.run(cmd, request.target)?;

        Ok(BuildReport {
            target: request.target,
            artifact_path: request.output_path.clone(),
            duration: start.elapsed(),
        })
    }

    fn build_asset_bundles(
        &self,
        output_dir: &Path,
        target: PlatformTarget,
    ) -> BuildmanResult<BuildReport> {
        let start = Instant::now();

        let mut cmd = self.base_command();
        cmd.arg("build-bundles")
            .arg("--build-target")
            .arg(target.name())
            .arg("--output")
            .arg(output_dir);

        self.run(cmd, target)?;

        Ok(BuildReport {
            target,
            artifact_path: output_dir.to_path_buf(),
            duration: start.elapsed(),
        })
    }
}
