//! Core types and build-target configuration resolver for buildman
//!
//! This crate is pure computation: given a project's identity, scene
//! registry, and a target platform it resolves the output path, application
//! identifier, and ordered scene list for a build. The pipeline crate
//! supplies the executor, hooks, and settings file around it.

pub mod error;
pub mod resolver;
pub mod types;

pub use error::{BuildmanError, BuildmanResult};
pub use types::{
    BuildOptions, BuildRequest, HostCapabilities, PlatformTarget, ProjectIdentity, SceneEntry,
    PLACEHOLDER_APPLICATION_ID,
};
