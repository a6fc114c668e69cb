//! # nanobuild-sdk
//!
//! Core of the nanobuild driver: one command surface for building a
//! gn/ninja tree on several hosts and targets.
//!
//! ## Overview
//!
//! A run picks one platform from a catalog and then either:
//!
//! - **Pipeline** - creates the output directory, writes `args.gn`, runs
//!   `gn gen`, then `ninja` for the requested targets (or the host's
//!   packaging targets)
//! - **Plugin dispatch** - runs `platform/<name>/build.sh` with
//!   `BUILD_TARGET=<name>` for platforms discovered on disk
//!
//! ## Hosts
//!
//! | Host | Static platforms | Output directory |
//! |------|------------------|------------------|
//! | Linux | x64, arm64, mips64el, loong64, android | `out/<p>` / `out/<p>_debug` |
//! | Windows | x86, x64 | `<p>_release` / `<p>_debug` |
//!
//! All host differences live in [`HostProfile`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use nanobuild_sdk::{BuildOptions, BuildProfile, HostProfile, Orchestrator, ProjectPaths};
//!
//! let paths = ProjectPaths::new("/work/nano");
//! let host = HostProfile::detect()?;
//! let orchestrator = Orchestrator::new(&paths, &host);
//!
//! let options = BuildOptions::new(BuildProfile::Release);
//! orchestrator.run_selection(&options, "0")?;
//! # Ok::<(), nanobuild_sdk::BuildError>(())
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Static and plugin platform enumeration
//! - [`layout`] - Tool paths and output directory policy
//! - [`gn_args`] - `args.gn` synthesis
//! - [`builders`] - gn, ninja and plugin script invocations
//! - [`runner`] - Process execution seam
//! - [`orchestrator`] - Prompt, selection and terminal status

pub mod builders;
pub mod catalog;
pub mod gn_args;
pub mod host;
pub mod layout;
pub mod orchestrator;
pub mod project;
pub mod runner;
pub mod types;

pub use builders::{BuildOutcome, PlatformBuilder};
pub use catalog::{Platform, PlatformCatalog, PlatformKind};
pub use host::{HostFamily, HostProfile, OutputConvention};
pub use layout::BuildLayout;
pub use orchestrator::{Orchestrator, Status};
pub use project::ProjectPaths;
pub use runner::{CommandRunner, DryRunRunner, Invocation, SystemRunner};
pub use types::{BuildError, BuildOptions, BuildProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
