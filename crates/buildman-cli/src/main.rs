//! Command-line interface for the buildman build automation tool

use buildman_core::{
    resolver, BuildmanError, BuildmanResult, BuildOptions, PlatformTarget,
    PLACEHOLDER_APPLICATION_ID,
};
use buildman_pipeline::{hooks, BuildPipeline, EngineExecutor, ProjectSettings, SETTINGS_FILE};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "buildman")]
#[command(about = "Automated player and asset-bundle builds")]
#[command(version)]
#[command(
    long_about = "Automates building a game player and asset bundles for a selected platform, \
deriving the output path and application identifier from the project settings"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Set log level
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Project root directory (defaults to the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a player for the active or given target
    Build {
        /// Build target (defaults to the active target from the settings)
        #[arg(long, value_enum)]
        target: Option<PlatformTarget>,
        /// Reveal the built player after a successful build
        #[arg(long)]
        reveal: bool,
    },
    /// Build asset bundles for the active or given target
    Bundles {
        /// Build target (defaults to the active target from the settings)
        #[arg(long, value_enum)]
        target: Option<PlatformTarget>,
    },
    /// Show or switch the active build target
    Target {
        /// New active target; omit to show the current one
        #[arg(value_enum)]
        new_target: Option<PlatformTarget>,
    },
    /// Show the resolved build configuration
    Info {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    /// Initialize a project with a starter settings file
    Init {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,
        /// Company name recorded in the settings
        #[arg(long)]
        company: Option<String>,
        /// Product name recorded in the settings
        #[arg(long)]
        product: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> BuildmanResult<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let project_root = cli.project.clone().unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Build { target, reveal } => handle_build_command(&project_root, target, reveal),
        Commands::Bundles { target } => handle_bundles_command(&project_root, target),
        Commands::Target { new_target } => handle_target_command(&project_root, new_target),
        Commands::Info { format } => handle_info_command(&project_root, format),
        Commands::Init {
            path,
            company,
            product,
        } => handle_init_command(path.unwrap_or(project_root), company, product),
    }
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        match &cli.log_level {
            Some(LogLevel::Error) => log::LevelFilter::Error,
            Some(LogLevel::Warn) => log::LevelFilter::Warn,
            Some(LogLevel::Info) => log::LevelFilter::Info,
            Some(LogLevel::Debug) => log::LevelFilter::Debug,
            Some(LogLevel::Trace) => log::LevelFilter::Trace,
            None => log::LevelFilter::Info,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();
}

fn engine_executor(settings: &ProjectSettings) -> BuildmanResult<EngineExecutor> {
    let engine = settings.engine.as_ref().ok_or_else(|| {
        BuildmanError::configuration_with_field(
            format!(
                "No engine command configured; add an [engine] section to {}",
                SETTINGS_FILE
            ),
            "engine.command",
        )
    })?;

    Ok(EngineExecutor::new(
        engine.command.clone(),
        engine.args.clone(),
    ))
}

fn handle_build_command(
    project_root: &Path,
    target: Option<PlatformTarget>,
    reveal: bool,
) -> BuildmanResult<()> {
    let mut settings = ProjectSettings::load(project_root)?;
    let target = target.unwrap_or(settings.build.active_target);

    info!("Building player for {}", target);

    // A placeholder application identifier is resolved and persisted before
    // the build runs, so it sticks even if the build itself fails.
    let resolved_id = resolver::resolve_application_id(&settings.identity())?;
    if resolved_id != settings.project.application_id {
        settings.project.application_id = resolved_id;
        settings.save(project_root)?;
    }

    let executor = engine_executor(&settings)?;
    let pipeline =
        BuildPipeline::new(project_root, executor).with_capabilities(settings.capabilities);

    let options = BuildOptions {
        reveal_built_player: reveal || settings.build.reveal_built_player,
    };

    let report = pipeline.build_player(&mut settings, target, &options)?;

    println!("✅ Build completed for {}", report.target);
    println!("📄 Artifact: {}", report.artifact_path.display());
    println!("⏱️  Took {:.1}s", report.duration.as_secs_f64());

    Ok(())
}

fn handle_bundles_command(
    project_root: &Path,
    target: Option<PlatformTarget>,
) -> BuildmanResult<()> {
    let settings = ProjectSettings::load(project_root)?;
    let target = target.unwrap_or(settings.build.active_target);

    info!("Building asset bundles for {}", target);

    let executor = engine_executor(&settings)?;
    let pipeline =
        BuildPipeline::new(project_root, executor).with_capabilities(settings.capabilities);

    let report = pipeline.build_asset_bundles(target)?;

    println!("✅ Asset bundles built for {}", report.target);
    println!("📁 Output directory: {}", report.artifact_path.display());

    Ok(())
}

fn handle_target_command(
    project_root: &Path,
    new_target: Option<PlatformTarget>,
) -> BuildmanResult<()> {
    let mut settings = ProjectSettings::load(project_root)?;

    let Some(new_target) = new_target else {
        println!("Active build target: {}", settings.build.active_target);
        println!("Available targets:");
        for target in PlatformTarget::all() {
            println!("   {}", target);
        }
        return Ok(());
    };

    let prev = settings.build.active_target;
    if prev == new_target {
        println!("Active build target is already {}", prev);
        return Ok(());
    }

    settings.build.active_target = new_target;
    if settings.capabilities.target_change_events {
        hooks::log_target_switch(prev, new_target);
    }
    settings.save(project_root)?;

    println!("✅ Active build target is now {}", new_target);

    Ok(())
}

fn handle_info_command(project_root: &Path, format: OutputFormat) -> BuildmanResult<()> {
    let settings = ProjectSettings::load(project_root)?;
    let target = settings.build.active_target;

    let identity = settings.identity();
    let application_id = resolver::resolve_application_id(&identity)?;
    let output_path =
        resolver::resolve_output_path(project_root, target, &settings.project.product_name);
    let bundle_dir = resolver::resolve_asset_bundle_output_dir(project_root, target);
    let scenes = resolver::resolve_scenes(&settings.build.scenes);

    match format {
        OutputFormat::Human => {
            println!("📦 Build configuration");
            println!("   Company: {}", settings.project.company_name);
            println!("   Product: {}", settings.project.product_name);
            if identity.has_placeholder_id() {
                println!("   Application ID: {} (resolved from placeholder)", application_id);
            } else {
                println!("   Application ID: {}", application_id);
            }
            println!("   Active target: {}", target);
            println!("   Player output: {}", output_path.display());
            println!("   Bundle output: {}", bundle_dir.display());

            if scenes.is_empty() {
                println!("   Scenes: (none enabled)");
            } else {
                println!("   Scenes:");
                for scene in &scenes {
                    println!("     {}", scene);
                }
            }

            let caps = settings.capabilities;
            println!(
                "   Capabilities: scene_list={} build_player_window={} target_change_events={}",
                caps.scene_list, caps.build_player_window, caps.target_change_events
            );
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "company_name": settings.project.company_name,
                "product_name": settings.project.product_name,
                "application_id": application_id,
                "active_target": target.name(),
                "player_output": output_path,
                "bundle_output": bundle_dir,
                "scenes": scenes,
                "capabilities": settings.capabilities,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn handle_init_command(
    project_dir: PathBuf,
    company: Option<String>,
    product: Option<String>,
) -> BuildmanResult<()> {
    if !project_dir.exists() {
        std::fs::create_dir_all(&project_dir).map_err(|e| {
            BuildmanError::configuration(format!("Failed to create project directory: {}", e))
        })?;
    }

    let settings_path = project_dir.join(SETTINGS_FILE);
    if settings_path.exists() {
        return Err(BuildmanError::configuration(format!(
            "{} already exists in {}",
            SETTINGS_FILE,
            project_dir.display()
        )));
    }

    let product = product.unwrap_or_else(|| {
        project_dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "ProductName".to_string())
    });
    let company = company.unwrap_or_else(|| "Company".to_string());

    let settings = ProjectSettings::starter(company, product);
    settings.save(&project_dir)?;

    info!("Initialized project settings at {}", settings_path.display());

    println!("✅ Created {}", settings_path.display());
    println!("   Application ID starts as {}", PLACEHOLDER_APPLICATION_ID);
    println!("🚀 To get started:");
    println!("   buildman target");
    println!("   buildman build");

    Ok(())
}
