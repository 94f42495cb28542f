//! Pre/post build hooks
//!
//! Hooks are plain trait objects fired by the pipeline immediately before
//! and after the executor runs. Each hook has a callback order; the
//! registry fires hooks in ascending order, stable for ties.

use buildman_core::PlatformTarget;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Event payload handed to build hooks
#[derive(Debug, Clone)]
pub struct BuildEvent {
    pub target: PlatformTarget,
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
}

impl BuildEvent {
    pub fn now(target: PlatformTarget, path: PathBuf) -> Self {
        Self {
            target,
            path,
            timestamp: Local::now(),
        }
    }
}

/// A named build hook with one method per event
pub trait BuildHook {
    fn name(&self) -> &str;

    /// Hooks fire in ascending callback order
    fn callback_order(&self) -> i32 {
        0
    }

    fn on_pre_build(&self, _event: &BuildEvent) {}

    fn on_post_build(&self, _event: &BuildEvent) {}
}

/// Ordered collection of build hooks
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn BuildHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in logging hook installed
    pub fn with_log_hook() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LogHook));
        registry
    }

    /// Register a hook, keeping the registry sorted by callback order
    pub fn register(&mut self, hook: Box<dyn BuildHook>) {
        self.hooks.push(hook);
        self.hooks.sort_by_key(|h| h.callback_order());
    }

    pub fn fire_pre_build(&self, event: &BuildEvent) {
        for hook in &self.hooks {
            hook.on_pre_build(event);
        }
    }

    pub fn fire_post_build(&self, event: &BuildEvent) {
        for hook in &self.hooks {
            hook.on_post_build(event);
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// Built-in hook logging build start and completion
pub struct LogHook;

impl BuildHook for LogHook {
    fn name(&self) -> &str {
        "log"
    }

    fn on_pre_build(&self, event: &BuildEvent) {
        log::info!(
            "Build started for {} at {}. Build location: {:?}",
            event.target,
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.path
        );
    }

    fn on_post_build(&self, event: &BuildEvent) {
        log::info!(
            "Build completed for {} at {}. Build location: {:?}",
            event.target,
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.path
        );
    }
}

/// Announce a switch of the active build target
pub fn log_target_switch(prev: PlatformTarget, new: PlatformTarget) {
    log::info!("Build target switched from {} to {}.", prev, new);
}
