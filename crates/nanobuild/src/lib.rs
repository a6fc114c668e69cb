//! # nanobuild
//!
//! Command-line driver for building a gn/ninja tree across hosts and targets.
//!
//! ## Overview
//!
//! `nanobuild` prints the platforms available on this host, reads the index
//! of the one to build and then:
//!
//! - **Static platforms** - writes `args.gn`, runs `gn gen`, then `ninja`
//!   (or the packaging targets with `--package`)
//! - **Plugin platforms** - runs `platform/<name>/build.sh`
//!
//! ## Quick Start
//!
//! ```bash
//! # Release build of the default target, platform picked interactively
//! nanobuild
//!
//! # Debug build of two targets for the first platform, no prompt
//! nanobuild --debug --compile "base net" --select 0
//!
//! # Installer / distribution packages
//! nanobuild --package
//!
//! # Show what would run (args.gn is still written)
//! nanobuild --dry-run --select 4
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | *(none)* | Select a platform and build it |
//! | `list` | Print the platform catalog |
//! | `init` | Write a starter `nanobuild.toml` |
//!
//! ## Modules
//!
//! - [`config`] - Configuration file support for `nanobuild.toml`
//! - [`logging`] - `tracing` subscriber setup

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use nanobuild_sdk::orchestrator::{self, BANNER_PREFIX};
use nanobuild_sdk::{
    BuildOptions, BuildOutcome, BuildProfile, CommandRunner, DryRunRunner, HostProfile,
    Orchestrator, PlatformKind, Status, SystemRunner,
};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod config;
pub mod logging;

/// Uniform gn/ninja build driver.
#[derive(Parser, Debug)]
#[command(name = "nanobuild", author, version, about = "Uniform gn/ninja build driver", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Project root (defaults to the directory holding nanobuild.toml, else the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Print the commands that would run instead of running them.
    /// The output directory and its args.gn are still written
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags of the default build command.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Compile target (chrome, base, net...); several may be space separated
    #[arg(short, long)]
    pub compile: Option<String>,

    /// Debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Package instead of a regular build
    #[arg(short, long)]
    pub package: bool,

    /// Platform index to build, skipping the prompt
    #[arg(long, value_name = "INDEX")]
    pub select: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the platform catalog
    List {
        /// Emit JSON instead of the prompt-style listing
        #[arg(long)]
        json: bool,
    },
    /// Write a starter nanobuild.toml
    Init {
        #[arg(long, default_value = "nanobuild.toml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    index: usize,
    name: &'a str,
    kind: PlatformKind,
}

/// Parses the command line, runs it and returns the terminal status.
pub fn run() -> Result<Status> {
    run_with(Cli::parse())
}

/// Runs an already parsed command line.
pub fn run_with(cli: Cli) -> Result<Status> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (root, resolver) = resolve_project(&cwd, cli.root.as_deref())?;

    load_dotenv(&root);
    logging::init_logging(logging::LoggingConfig::from_flags(
        cli.log_level.as_deref(),
        cli.verbose,
        cli.quiet,
    ));
    if let Some(config_path) = &resolver.config_path {
        info!("Using config file: {:?}", config_path);
    }
    debug!(root = %root.display(), "resolved project root");

    match cli.command {
        Some(Command::Init { output, force }) => {
            cmd_init(&cwd.join(output), force)?;
            Ok(Status::Done)
        }
        Some(Command::List { json }) => {
            let host = HostProfile::detect()?;
            let paths = resolver.project_paths(&root);
            cmd_list(&Orchestrator::new(&paths, &host), json)?;
            Ok(Status::Done)
        }
        None => {
            let host = HostProfile::detect()?;
            let paths = resolver.project_paths(&root);
            let options = build_options(&cli.build, &resolver);
            debug!(?options, host = %host.family, "resolved build options");

            let runner: &dyn CommandRunner = if cli.dry_run {
                &DryRunRunner
            } else {
                &SystemRunner
            };
            let orchestrator = Orchestrator::new(&paths, &host).runner(runner);
            Ok(cmd_build(&orchestrator, &options, cli.build.select.as_deref()))
        }
    }
}

/// Merges CLI flags with config defaults into the run's option set.
pub fn build_options(args: &BuildArgs, resolver: &config::ConfigResolver) -> BuildOptions {
    BuildOptions {
        compile_target: args
            .compile
            .clone()
            .or_else(|| resolver.default_compile().map(str::to_string)),
        profile: BuildProfile::from_debug(args.debug || resolver.default_debug()),
        package: args.package || resolver.default_package(),
    }
}

/// Finds the project root and its configuration.
fn resolve_project(cwd: &Path, root: Option<&Path>) -> Result<(PathBuf, config::ConfigResolver)> {
    if let Some(root) = root {
        let root = cwd.join(root);
        if !root.is_dir() {
            bail!("project root {:?} is not a directory", root);
        }
        let resolver = config::ConfigResolver::load_at(&root)?;
        return Ok((root, resolver));
    }

    let resolver = config::ConfigResolver::discover_from(cwd)?;
    let root = resolver
        .config_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    Ok((root, resolver))
}

fn load_dotenv(root: &Path) {
    let _ = dotenvy::from_path(root.join(".env.local"));
}

fn cmd_build(orchestrator: &Orchestrator<'_>, options: &BuildOptions, select: Option<&str>) -> Status {
    let result = match select {
        Some(selection) => orchestrator.run_selection(options, selection),
        None => orchestrator.run_interactive(options, io::stdin().lock(), &mut io::stdout()),
    };

    match &result {
        Ok(BuildOutcome::Pipeline { out_dir, packaged }) => {
            info!(out_dir = %out_dir.display(), packaged, "pipeline finished");
        }
        Ok(BuildOutcome::Extended { script }) => {
            info!(script = %script.display(), "plugin build finished");
        }
        Err(_) => {}
    }

    orchestrator::finish(&result, &mut io::stdout())
}

fn cmd_list(orchestrator: &Orchestrator<'_>, json: bool) -> Result<()> {
    let entries: Vec<CatalogEntry<'_>> = orchestrator
        .catalog()
        .entries()
        .iter()
        .enumerate()
        .map(|(index, platform)| CatalogEntry {
            index,
            name: &platform.name,
            kind: platform.kind,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        let suffix = match entry.kind {
            PlatformKind::Static => "",
            PlatformKind::Extended => " (extended)",
        };
        println!("{} {}: {}{}", BANNER_PREFIX, entry.index, entry.name, suffix);
    }
    Ok(())
}

fn cmd_init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("refusing to overwrite existing file: {:?} (pass --force)", output);
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {:?}", parent))?;
        }
    }
    fs::write(output, config::NanobuildConfig::generate_starter_toml())
        .with_context(|| format!("writing file {:?}", output))?;
    println!("Wrote starter config to {:?}", output);
    Ok(())
}
