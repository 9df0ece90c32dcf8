//! Debforge - Debian package builder.
//!
//! Assembles a staging tree from an application's files, generates init
//! scripts, launchers and control metadata, then hands the tree to
//! `dpkg-deb` and `lintian`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use debforge::config::Config;

#[derive(Parser)]
#[command(name = "debforge")]
#[command(about = "Debian package builder")]
#[command(
    after_help = "QUICK START:\n  debforge preflight     Check host tools and inputs\n  debforge show layout   Preview the package contents\n  debforge build         Build the package\n  debforge clean         Remove the staging tree"
)]
struct Cli {
    /// Package manifest
    #[arg(short, long, global = true, default_value = "debforge.toml")]
    manifest: PathBuf,

    /// Log debug output (same as DEBFORGE_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the package (staging tree is recreated from scratch)
    Build {
        /// Staging directory (overrides DEBFORGE_STAGING_DIR)
        #[arg(long)]
        staging: Option<PathBuf>,

        /// Lint the package only if this is "true" (the default when unset)
        #[arg(long)]
        check_package: Option<String>,
    },

    /// Remove the staging directory
    Clean,

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Run preflight checks (verify host tools and inputs before build)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show the resolved manifest
    Manifest,
    /// Show the files a build would stage
    Layout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DEBFORGE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let work_dir = std::env::current_dir()?;
    let mut config = Config::load(&work_dir);

    match cli.command {
        Commands::Build {
            staging,
            check_package,
        } => {
            if let Some(staging) = staging {
                config.staging_dir = work_dir.join(staging);
            }
            if check_package.is_some() {
                config.check_package = check_package;
            }
            commands::cmd_build(&cli.manifest, &config)?;
        }

        Commands::Clean => {
            commands::cmd_clean(&config)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Manifest => commands::show::ShowTarget::Manifest,
                ShowTarget::Layout => commands::show::ShowTarget::Layout,
            };
            commands::cmd_show(&cli.manifest, show_target, &config)?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(&cli.manifest, &config, strict)?;
        }
    }

    Ok(())
}
