//! Integration tests for the build pipeline

use buildman_core::{
    BuildmanError, BuildmanResult, BuildOptions, BuildRequest, HostCapabilities, PlatformTarget,
    SceneEntry, PLACEHOLDER_APPLICATION_ID,
};
use buildman_pipeline::{
    BuildEvent, BuildExecutor, BuildHook, BuildPipeline, BuildReport, HookRegistry,
    ProjectSettings, SETTINGS_FILE,
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct StubExecutor {
    player_requests: Arc<Mutex<Vec<BuildRequest>>>,
    player_options: Arc<Mutex<Vec<BuildOptions>>>,
    bundle_dirs: Arc<Mutex<Vec<std::path::PathBuf>>>,
    fail: bool,
}

impl BuildExecutor for StubExecutor {
    fn build_player(
        &self,
        request: &BuildRequest,
        options: &BuildOptions,
    ) -> BuildmanResult<BuildReport> {
        self.player_requests.lock().unwrap().push(request.clone());
        self.player_options.lock().unwrap().push(*options);
        if self.fail {
            return Err(BuildmanError::execution("stub executor failure"));
        }
        Ok(BuildReport {
            target: request.target,
            artifact_path: request.output_path.clone(),
            duration: Duration::from_millis(1),
        })
    }

    fn build_asset_bundles(
        &self,
        output_dir: &Path,
        target: PlatformTarget,
    ) -> BuildmanResult<BuildReport> {
        self.bundle_dirs.lock().unwrap().push(output_dir.to_path_buf());
        if self.fail {
            return Err(BuildmanError::execution("stub executor failure"));
        }
        Ok(BuildReport {
            target,
            artifact_path: output_dir.to_path_buf(),
            duration: Duration::from_millis(1),
        })
    }
}

struct RecordingHook {
    events: Arc<Mutex<Vec<String>>>,
}

impl BuildHook for RecordingHook {
    fn name(&self) -> &str {
        "recording"
    }

    fn on_pre_build(&self, event: &BuildEvent) {
        self.events
            .lock()
            .unwrap()
            .push(format!("pre:{}", event.target));
    }

    fn on_post_build(&self, event: &BuildEvent) {
        self.events
            .lock()
            .unwrap()
            .push(format!("post:{}", event.target));
    }
}

fn test_settings() -> ProjectSettings {
    let mut settings = ProjectSettings::starter("Ac3m3", "Game1");
    settings.build.scenes = vec![
        SceneEntry::new("Scenes/Boot.unity"),
        SceneEntry::disabled("Scenes/Debug.unity"),
        SceneEntry::new("Scenes/Main.unity"),
    ];
    settings
}

fn recording_pipeline(
    root: &Path,
    executor: StubExecutor,
) -> (BuildPipeline<StubExecutor>, Arc<Mutex<Vec<String>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut hooks = HookRegistry::new();
    hooks.register(Box::new(RecordingHook {
        events: events.clone(),
    }));
    let pipeline = BuildPipeline::new(root, executor).with_hooks(hooks);
    (pipeline, events)
}

#[test]
fn test_build_player_resolves_placeholder_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor::default();
    let requests = executor.player_requests.clone();
    let pipeline = BuildPipeline::new(dir.path(), executor);

    let mut settings = test_settings();
    assert_eq!(settings.project.application_id, PLACEHOLDER_APPLICATION_ID);

    let report = pipeline
        .build_player(&mut settings, PlatformTarget::Android, &BuildOptions::default())
        .unwrap();

    // Identifier written back into the settings for persistence.
    assert_eq!(settings.project.application_id, "com.Ac3m3.Game1");
    assert_eq!(
        report.artifact_path,
        dir.path().join("Builds/Android/Game1.apk")
    );

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].application_id, "com.Ac3m3.Game1");
    assert_eq!(
        requests[0].scenes,
        vec!["Scenes/Boot.unity".to_string(), "Scenes/Main.unity".to_string()]
    );
}

#[test]
fn test_build_player_preserves_user_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = BuildPipeline::new(dir.path(), StubExecutor::default());

    let mut settings = test_settings();
    settings.project.application_id = "org.example.shipped".to_string();

    pipeline
        .build_player(&mut settings, PlatformTarget::WindowsX64, &BuildOptions::default())
        .unwrap();

    assert_eq!(settings.project.application_id, "org.example.shipped");
}

#[test]
fn test_hooks_fire_around_successful_build() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, events) = recording_pipeline(dir.path(), StubExecutor::default());

    let mut settings = test_settings();
    pipeline
        .build_player(&mut settings, PlatformTarget::Android, &BuildOptions::default())
        .unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec!["pre:Android".to_string(), "post:Android".to_string()]
    );
}

#[test]
fn test_post_hooks_do_not_fire_on_executor_failure() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor {
        fail: true,
        ..StubExecutor::default()
    };
    let (pipeline, events) = recording_pipeline(dir.path(), executor);

    let mut settings = test_settings();
    let err = pipeline
        .build_player(&mut settings, PlatformTarget::Android, &BuildOptions::default())
        .unwrap_err();
    assert!(matches!(err, BuildmanError::Execution { .. }));

    assert_eq!(*events.lock().unwrap(), vec!["pre:Android".to_string()]);
}

#[test]
fn test_scene_list_capability_gates_scene_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor::default();
    let requests = executor.player_requests.clone();
    let pipeline = BuildPipeline::new(dir.path(), executor).with_capabilities(HostCapabilities {
        scene_list: false,
        ..HostCapabilities::default()
    });

    let mut settings = test_settings();
    pipeline
        .build_player(&mut settings, PlatformTarget::Android, &BuildOptions::default())
        .unwrap();

    assert!(requests.lock().unwrap()[0].scenes.is_empty());
}

#[test]
fn test_reveal_request_is_dropped_without_a_build_player_window() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor::default();
    let options_seen = executor.player_options.clone();
    let pipeline = BuildPipeline::new(dir.path(), executor).with_capabilities(HostCapabilities {
        build_player_window: false,
        ..HostCapabilities::default()
    });

    let mut settings = test_settings();
    let options = BuildOptions {
        reveal_built_player: true,
    };
    pipeline
        .build_player(&mut settings, PlatformTarget::MacOS, &options)
        .unwrap();

    assert!(!options_seen.lock().unwrap()[0].reveal_built_player);
}

#[test]
fn test_reveal_request_reaches_the_executor_when_supported() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor::default();
    let options_seen = executor.player_options.clone();
    let pipeline = BuildPipeline::new(dir.path(), executor);

    let mut settings = test_settings();
    let options = BuildOptions {
        reveal_built_player: true,
    };
    pipeline
        .build_player(&mut settings, PlatformTarget::MacOS, &options)
        .unwrap();

    assert!(options_seen.lock().unwrap()[0].reveal_built_player);
}

#[test]
fn test_build_asset_bundles_creates_output_dir_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let executor = StubExecutor::default();
    let bundle_dirs = executor.bundle_dirs.clone();
    let pipeline = BuildPipeline::new(dir.path(), executor);

    let expected = dir.path().join("AssetBundles/WindowsX64");
    assert!(!expected.exists());

    pipeline.build_asset_bundles(PlatformTarget::WindowsX64).unwrap();
    assert!(expected.is_dir());

    // Second run against the existing directory succeeds.
    pipeline.build_asset_bundles(PlatformTarget::WindowsX64).unwrap();
    assert_eq!(*bundle_dirs.lock().unwrap(), vec![expected.clone(), expected]);
}

#[test]
fn test_settings_persist_across_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = test_settings();
    settings.build.active_target = PlatformTarget::LinuxX64;
    settings.save(dir.path()).unwrap();
    assert!(dir.path().join(SETTINGS_FILE).exists());

    let loaded = ProjectSettings::load(dir.path()).unwrap();
    assert_eq!(loaded.build.active_target, PlatformTarget::LinuxX64);
    assert_eq!(loaded.build.scenes, settings.build.scenes);
    assert_eq!(loaded.project.company_name, "Ac3m3");
}

#[test]
fn test_load_reports_missing_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProjectSettings::load(dir.path()).unwrap_err();
    assert!(matches!(err, BuildmanError::Configuration { .. }));
}
