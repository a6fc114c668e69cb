//! Build automation for catalog platforms.
//!
//! ## Overview
//!
//! Static platforms go through the gn/ninja pipeline:
//!
//! 1. **Layout** - Resolve tool paths and create the output directory
//! 2. **Arguments** - Write `args.gn` into the output directory
//! 3. **Generate** - Run `gn gen` against the source root
//! 4. **Build or package** - Run `ninja` for the requested or default targets,
//!    or for the host's packaging targets
//!
//! Plugin platforms bypass all of that and run their own build script.
//!
//! Each step only runs if the previous one succeeded; the first error is
//! returned unchanged.
//!
//! | Module | Step |
//! |--------|------|
//! | [`gn`] | `gn gen` invocation |
//! | [`ninja`] | build and packaging invocations |
//! | [`extended`] | plugin build script dispatch |

pub mod extended;
pub mod gn;
pub mod ninja;

use crate::catalog::Platform;
use crate::gn_args;
use crate::host::HostProfile;
use crate::layout::BuildLayout;
use crate::project::ProjectPaths;
use crate::runner::{CommandRunner, SystemRunner};
use crate::types::{BuildError, BuildOptions};
use std::path::PathBuf;
use tracing::info;

/// What a finished pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// gn/ninja ran in `out_dir`.
    Pipeline { out_dir: PathBuf, packaged: bool },
    /// A plugin build script ran.
    Extended { script: PathBuf },
}

/// Runs the build for one selected platform.
pub struct PlatformBuilder<'a> {
    paths: &'a ProjectPaths,
    host: &'a HostProfile,
    runner: &'a dyn CommandRunner,
}

impl<'a> PlatformBuilder<'a> {
    /// Creates a builder that spawns real processes.
    pub fn new(paths: &'a ProjectPaths, host: &'a HostProfile) -> Self {
        Self {
            paths,
            host,
            runner: &SystemRunner,
        }
    }

    /// Replaces the process runner (dry runs, tests).
    pub fn runner(mut self, runner: &'a dyn CommandRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Builds `platform`, routing plugin platforms to their script.
    pub fn build(&self, platform: &Platform, options: &BuildOptions) -> Result<BuildOutcome, BuildError> {
        if platform.is_extended() {
            extended::dispatch(self.runner, self.host, self.paths, &platform.name)?;
            return Ok(BuildOutcome::Extended {
                script: self.paths.extended_script(&platform.name),
            });
        }
        self.run_pipeline(&platform.name, options)
    }

    /// Runs layout, argument writing, generation and then packaging or building.
    pub fn run_pipeline(&self, platform: &str, options: &BuildOptions) -> Result<BuildOutcome, BuildError> {
        info!(platform, profile = options.profile.as_str(), "preparing output directory");
        let layout = BuildLayout::prepare(self.paths, self.host, platform, options)?;

        info!(out_dir = %layout.out_dir.display(), "writing generator arguments");
        gn_args::write(self.paths, self.host, options, platform, &layout.out_dir)?;

        info!("generating build files");
        gn::generate(self.runner, &layout, self.paths, self.host)?;

        if options.package {
            info!("packaging");
            ninja::package(self.runner, self.host, &layout, options)?;
        } else {
            info!("building");
            ninja::build(self.runner, platform, &layout, options)?;
        }

        Ok(BuildOutcome::Pipeline {
            out_dir: layout.out_dir,
            packaged: options.package,
        })
    }
}
