//! audio-gen CLI

use anyhow::{Context, Result};
use audio_gen::config::{self, DEFAULT_CONFIG_FILE};
use audio_gen::diff_gate::SyncState;
use audio_gen::{ArtifactStatus, Generator, Outcome, SourceKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audio-gen")]
#[command(about = "Generate C# audio parameter enums and event tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate all artifacts (unchanged files are left alone)
    Generate {
        /// Path to audio-gen.toml
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Check that generated artifacts are in sync with the metadata
    Check {
        /// Path to audio-gen.toml
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Write a default audio-gen.toml
    Init {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Use hand-authored lists instead of a bank listing
        #[arg(long)]
        authored: bool,

        /// Overwrite an existing audio-gen.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Generate { config } => generate(config),
        Commands::Check { config } => check(config),
        Commands::Init {
            path,
            authored,
            force,
        } => init(path, authored, force),
    }
}

fn generate(config_path: PathBuf) -> Result<()> {
    let config = config::load_config(&config_path)?;
    let generator = Generator::from_config(config)?;
    let report = generator.generate().context("Generation aborted")?;

    for artifact in &report.artifacts {
        match &artifact.status {
            ArtifactStatus::Written => println!("✓ Wrote {}", artifact.path.display()),
            ArtifactStatus::Unchanged => println!("  Unchanged {}", artifact.path.display()),
            ArtifactStatus::Skipped(reason) => println!("! Skipped {}: {}", artifact.kind, reason),
            ArtifactStatus::Failed(e) => println!("✗ Failed {}: {}", artifact.kind, e),
        }
    }

    match report.outcome() {
        Outcome::Success => println!("✓ Done! ({} written)", report.writes()),
        Outcome::Warnings => println!("Done with warnings ({} written)", report.writes()),
    }
    Ok(())
}

fn check(config_path: PathBuf) -> Result<()> {
    let config = config::load_config(&config_path)?;
    let generator = Generator::from_config(config)?;
    let report = generator.check();

    for (kind, path, state) in &report.artifacts {
        match state {
            Ok(SyncState::InSync) => println!("✓ {} in sync: {}", kind, path.display()),
            Ok(SyncState::OutOfSync) => println!("✗ {} out of sync: {}", kind, path.display()),
            Ok(SyncState::Missing) => println!("✗ {} missing: {}", kind, path.display()),
            Err(e) => println!("✗ {} could not be rendered: {}", kind, e),
        }
    }

    if !report.in_sync() {
        anyhow::bail!("Artifacts are out of sync. Run 'audio-gen generate' to regenerate.");
    }
    println!("\n✓ All artifacts are in sync!");
    Ok(())
}

fn init(path: Option<PathBuf>, authored: bool, force: bool) -> Result<()> {
    let project_dir = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    let config_path = project_dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists at {}\nUse --force to overwrite",
            DEFAULT_CONFIG_FILE,
            config_path.display()
        );
    }

    let kind = if authored {
        SourceKind::Authored
    } else {
        SourceKind::Banks
    };
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;
    std::fs::write(&config_path, config::default_config_text(kind))
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    println!("Created {}", config_path.display());

    // Existing metadata is never touched, even with --force.
    let source_path = project_dir.join(config::default_source_file(kind));
    if source_path.exists() {
        tracing::debug!("{} already exists", source_path.display());
    } else {
        std::fs::write(&source_path, config::starter_source_text(kind))
            .with_context(|| format!("Failed to write {}", source_path.display()))?;
        println!("Created {}", source_path.display());
    }

    Ok(())
}
