//! Build orchestration
//!
//! `BuildPipeline` glues the resolver to its collaborators: it resolves the
//! build request from the project settings, fires pre-build hooks, hands
//! the request to the executor, and fires post-build hooks on success.

use crate::executor::{BuildExecutor, BuildReport};
use crate::hooks::{BuildEvent, HookRegistry};
use crate::settings::ProjectSettings;
use buildman_core::{resolver, BuildmanResult, BuildOptions, HostCapabilities, PlatformTarget};
use std::fs;
use std::path::PathBuf;

/// Orchestrates player and asset-bundle builds for one project
pub struct BuildPipeline<E: BuildExecutor> {
    project_root: PathBuf,
    capabilities: HostCapabilities,
    hooks: HookRegistry,
    executor: E,
}

impl<E: BuildExecutor> BuildPipeline<E> {
    /// Create a pipeline with default capabilities and the built-in log hook
    pub fn new<P: Into<PathBuf>>(project_root: P, executor: E) -> Self {
        Self {
            project_root: project_root.into(),
            capabilities: HostCapabilities::default(),
            hooks: HookRegistry::with_log_hook(),
            executor,
        }
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn register_hook(&mut self, hook: Box<dyn crate::hooks::BuildHook>) {
        self.hooks.register(hook);
    }

    pub fn project_root(&self) -> &std::path::Path {
        &self.project_root
    }

    /// Build a player for the given target.
    ///
    /// A placeholder application identifier is resolved from the company
    /// and product names and written back into the settings; the caller
    /// persists the settings file.
    pub fn build_player(
        &self,
        settings: &mut ProjectSettings,
        target: PlatformTarget,
        options: &BuildOptions,
    ) -> BuildmanResult<BuildReport> {
        let identity = settings.identity();
        let application_id = resolver::resolve_application_id(&identity)?;
        if application_id != identity.application_id {
            log::info!("Application identifier set to {}", application_id);
            settings.project.application_id = application_id.clone();
        }

        let output_path =
            resolver::resolve_output_path(&self.project_root, target, &settings.project.product_name);

        let scenes = if self.capabilities.scene_list {
            resolver::resolve_scenes(&settings.build.scenes)
        } else {
            log::warn!("Host does not expose a scene registry; building without a scene list");
            Vec::new()
        };

        let mut options = *options;
        if options.reveal_built_player && !self.capabilities.build_player_window {
            log::warn!("Host cannot show the built player; ignoring the reveal request");
            options.reveal_built_player = false;
        }

        let request = buildman_core::BuildRequest {
            output_path,
            application_id,
            scenes,
            target,
        };

        self.hooks
            .fire_pre_build(&BuildEvent::now(target, request.output_path.clone()));

        let report = self.executor.build_player(&request, &options)?;

        self.hooks
            .fire_post_build(&BuildEvent::now(target, report.artifact_path.clone()));

        Ok(report)
    }

    /// Build asset bundles for the given target.
    ///
    /// The output directory is created if absent; an existing directory is
    /// not an error, so the step is safe to retry.
    pub fn build_asset_bundles(&self, target: PlatformTarget) -> BuildmanResult<BuildReport> {
        let output_dir = resolver::resolve_asset_bundle_output_dir(&self.project_root, target);
        if !output_dir.exists() {
            fs::create_dir_all(&output_dir)?;
        }

        self.executor.build_asset_bundles(&output_dir, target)
    }
}
