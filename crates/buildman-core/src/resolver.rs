//! Build-target configuration resolver
//!
//! Pure functions computing a build's output location, application
//! identifier, and scene list for a target platform. Nothing here performs
//! I/O; directory creation and the actual compilation belong to the
//! pipeline crate.

use crate::error::{BuildmanError, BuildmanResult};
use crate::types::{BuildRequest, PlatformTarget, ProjectIdentity, SceneEntry};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Sanitizes a string for use as an application identifier segment.
///
/// A leading ASCII digit is replaced with `x`, then every character that is
/// not an ASCII letter, digit, or apostrophe is removed. Relative order of
/// the remaining characters is preserved. Empty input is an error.
pub fn sanitize(input: &str) -> BuildmanResult<String> {
    if input.is_empty() {
        return Err(BuildmanError::invalid_argument(
            "cannot sanitize an empty string",
        ));
    }

    let mut chars: Vec<char> = input.chars().collect();
    if chars[0].is_ascii_digit() {
        chars[0] = 'x';
    }
    let input: String = chars.into_iter().collect();

    let reg = Regex::new("[^A-Za-z0-9']+").unwrap();
    Ok(reg.replace_all(&input, "").into_owned())
}

/// Resolves the application identifier for a build.
///
/// The identifier is only recomputed while the project still carries the
/// placeholder value; an identifier the user has set is returned untouched.
pub fn resolve_application_id(identity: &ProjectIdentity) -> BuildmanResult<String> {
    if !identity.has_placeholder_id() {
        return Ok(identity.application_id.clone());
    }

    Ok(format!(
        "com.{}.{}",
        sanitize(&identity.company_name)?,
        sanitize(&identity.product_name)?
    ))
}

/// Returns the file extension for a player built for the given target.
///
/// Targets without an extension rule yield an empty string rather than an
/// error, so an unrecognized platform never fails the whole resolution.
pub fn extension_for(target: PlatformTarget) -> &'static str {
    match target {
        PlatformTarget::Android => ".apk",
        PlatformTarget::LinuxX86 => ".x86",
        PlatformTarget::LinuxX64 => ".x64",
        PlatformTarget::LinuxUniversal => ".x86_64",
        PlatformTarget::MacOS => ".app",
        PlatformTarget::WindowsX86 | PlatformTarget::WindowsX64 => ".exe",
        _ => "",
    }
}

/// Resolves the output path for a player build:
/// `<root>/Builds/<target>/<product><extension>`.
pub fn resolve_output_path(root: &Path, target: PlatformTarget, product_name: &str) -> PathBuf {
    root.join("Builds")
        .join(target.name())
        .join(format!("{}{}", product_name, extension_for(target)))
}

/// Resolves the ordered scene list for a build.
///
/// Keeps enabled entries only, preserving registration order. An empty
/// registry yields an empty list; whether that is fatal is the executor's
/// decision.
pub fn resolve_scenes(entries: &[SceneEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.enabled)
        .map(|entry| entry.path.clone())
        .collect()
}

/// Resolves the output directory for asset bundles:
/// `<root>/AssetBundles/<target>`.
///
/// The caller is responsible for creating the directory before building
/// bundles into it (create if absent, no error if already present).
pub fn resolve_asset_bundle_output_dir(root: &Path, target: PlatformTarget) -> PathBuf {
    root.join("AssetBundles").join(target.name())
}

/// Resolves a complete build request from project identity, the scene
/// registry, and a target platform.
pub fn resolve_build_request(
    root: &Path,
    target: PlatformTarget,
    identity: &ProjectIdentity,
    scenes: &[SceneEntry],
) -> BuildmanResult<BuildRequest> {
    Ok(BuildRequest {
        output_path: resolve_output_path(root, target, &identity.product_name),
        application_id: resolve_application_id(identity)?,
        scenes: resolve_scenes(scenes),
        target,
    })
}
