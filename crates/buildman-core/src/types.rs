//! Build target, project identity, and build request types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Application identifier Unity-style projects ship with until one is set.
///
/// A build resolved while the project still carries this value gets a fresh
/// identifier derived from the company and product names.
pub const PLACEHOLDER_APPLICATION_ID: &str = "com.Company.ProductName";

/// Platforms a player build can be produced for
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformTarget {
    Android,
    LinuxX86,
    LinuxX64,
    LinuxUniversal,
    MacOS,
    WindowsX86,
    WindowsX64,
    Ios,
    WebGl,
}

impl PlatformTarget {
    /// Canonical target name, used as the per-target directory segment in
    /// output paths
    pub fn name(&self) -> &'static str {
        match self {
            PlatformTarget::Android => "Android",
            PlatformTarget::LinuxX86 => "LinuxX86",
            PlatformTarget::LinuxX64 => "LinuxX64",
            PlatformTarget::LinuxUniversal => "LinuxUniversal",
            PlatformTarget::MacOS => "MacOS",
            PlatformTarget::WindowsX86 => "WindowsX86",
            PlatformTarget::WindowsX64 => "WindowsX64",
            PlatformTarget::Ios => "iOS",
            PlatformTarget::WebGl => "WebGL",
        }
    }

    /// All supported targets, in a stable listing order
    pub fn all() -> &'static [PlatformTarget] {
        &[
            PlatformTarget::Android,
            PlatformTarget::LinuxX86,
            PlatformTarget::LinuxX64,
            PlatformTarget::LinuxUniversal,
            PlatformTarget::MacOS,
            PlatformTarget::WindowsX86,
            PlatformTarget::WindowsX64,
            PlatformTarget::Ios,
            PlatformTarget::WebGl,
        ]
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only snapshot of project identity settings at resolution time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    /// Company name as entered in the project settings
    pub company_name: String,
    /// Product name as entered in the project settings
    pub product_name: String,
    /// Application identifier currently configured for the project
    pub application_id: String,
}

impl ProjectIdentity {
    pub fn new<C, P, A>(company_name: C, product_name: P, application_id: A) -> Self
    where
        C: Into<String>,
        P: Into<String>,
        A: Into<String>,
    {
        Self {
            company_name: company_name.into(),
            product_name: product_name.into(),
            application_id: application_id.into(),
        }
    }

    /// Whether the project still carries the placeholder identifier
    pub fn has_placeholder_id(&self) -> bool {
        self.application_id == PLACEHOLDER_APPLICATION_ID
    }
}

/// A scene registered for inclusion in a build.
///
/// Registration order determines build and load order. Duplicate entries
/// are legal and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SceneEntry {
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    pub fn disabled<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            enabled: false,
        }
    }
}

/// Fully-specified build request handed to the build executor.
///
/// Produced fresh on every resolution call; carries no identity beyond the
/// single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Where the built player is written
    pub output_path: PathBuf,
    /// Application identifier the build is stamped with
    pub application_id: String,
    /// Scene paths in build order
    pub scenes: Vec<String>,
    /// Platform the build is produced for
    pub target: PlatformTarget,
}

/// Optional features the host build environment supports.
///
/// Hosts declare availability as data; callers branch on these flags
/// instead of compile-time version checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Whether the host exposes a scene registry for player builds
    #[serde(default = "default_enabled")]
    pub scene_list: bool,
    /// Whether the host can show an interactive build window
    #[serde(default = "default_enabled")]
    pub build_player_window: bool,
    /// Whether the host reports active-target switches
    #[serde(default = "default_enabled")]
    pub target_change_events: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            scene_list: true,
            build_player_window: true,
            target_change_events: true,
        }
    }
}

/// Per-invocation build options forwarded to the executor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Reveal the built player in the host's file browser after a
    /// successful build
    #[serde(default)]
    pub reveal_built_player: bool,
}
