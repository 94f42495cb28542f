//! Project settings file handling
//!
//! `BuildSettings.toml` at the project root is the tool's stand-in for the
//! host engine's project settings: company and product identity, the active
//! build target, the registered scene list, and the engine command that
//! performs the actual build. The file is loaded into an explicit struct
//! and passed down, so the resolver never reads global state.

use buildman_core::{
    BuildmanError, BuildmanResult, HostCapabilities, PlatformTarget, ProjectIdentity, SceneEntry,
    PLACEHOLDER_APPLICATION_ID,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the settings file at the project root
pub const SETTINGS_FILE: &str = "BuildSettings.toml";

/// Project settings loaded from `BuildSettings.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub project: ProjectSection,
    pub build: BuildSection,
    /// External engine command performing the actual build. Optional here;
    /// required only once a build is executed.
    #[serde(default)]
    pub engine: Option<EngineSection>,
    /// Features the host build environment supports
    #[serde(default)]
    pub capabilities: HostCapabilities,
}

/// `[project]` section: identity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub company_name: String,
    pub product_name: String,
    #[serde(default = "default_application_id")]
    pub application_id: String,
}

fn default_application_id() -> String {
    PLACEHOLDER_APPLICATION_ID.to_string()
}

/// `[build]` section: active target and scene registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    pub active_target: PlatformTarget,
    #[serde(default)]
    pub reveal_built_player: bool,
    #[serde(default)]
    pub scenes: Vec<SceneEntry>,
}

/// `[engine]` section: how to invoke the engine's build pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ProjectSettings {
    /// Load settings from `BuildSettings.toml` under the given project root
    pub fn load(project_root: &Path) -> BuildmanResult<Self> {
        let path = project_root.join(SETTINGS_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            BuildmanError::configuration(format!(
                "Failed to read settings file {:?}: {}",
                path, e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            BuildmanError::configuration(format!(
                "Failed to parse settings file {:?}: {}",
                path, e
            ))
        })
    }

    /// Write settings back to `BuildSettings.toml` under the project root
    pub fn save(&self, project_root: &Path) -> BuildmanResult<()> {
        let path = project_root.join(SETTINGS_FILE);
        let content = toml::to_string_pretty(self).map_err(|e| {
            BuildmanError::configuration(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            BuildmanError::configuration(format!(
                "Failed to write settings file {:?}: {}",
                path, e
            ))
        })
    }

    /// Snapshot of the identity settings for resolution
    pub fn identity(&self) -> ProjectIdentity {
        ProjectIdentity::new(
            self.project.company_name.clone(),
            self.project.product_name.clone(),
            self.project.application_id.clone(),
        )
    }

    /// Starter settings for a freshly initialized project
    pub fn starter<C: Into<String>, P: Into<String>>(company_name: C, product_name: P) -> Self {
        Self {
            project: ProjectSection {
                company_name: company_name.into(),
                product_name: product_name.into(),
                application_id: default_application_id(),
            },
            build: BuildSection {
                active_target: PlatformTarget::WindowsX64,
                reveal_built_player: false,
                scenes: vec![SceneEntry::new("Scenes/Main.unity")],
            },
            engine: None,
            capabilities: HostCapabilities::default(),
        }
    }
}
