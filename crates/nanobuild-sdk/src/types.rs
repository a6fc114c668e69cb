//! Core types for nanobuild-sdk.
//!
//! This module defines the fundamental types used throughout the SDK:
//!
//! - [`BuildError`] - Error types for every fatal condition of a build run
//! - [`BuildProfile`] - Debug vs release selection
//! - [`BuildOptions`] - The immutable option set parsed once at startup

use std::path::PathBuf;

/// Error types for nanobuild-sdk operations.
///
/// Every variant is fatal to the whole run: the orchestrator never retries or
/// continues past one of these.
///
/// # Example
///
/// ```
/// use nanobuild_sdk::{BuildError, BuildOptions, BuildProfile};
///
/// let options = BuildOptions::new(BuildProfile::Debug).package(true);
/// let err = BuildError::PackageInDebug;
/// assert!(options.is_debug());
/// assert_eq!(err.to_string(), "can not package in debug mode");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The platform selection was not an index into the catalog.
    #[error("invalid platform selection '{input}': expected an index in 0..{count}")]
    InvalidSelection { input: String, count: usize },

    /// The platform prompt could not be written or the answer not read.
    #[error("platform prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// The output directory (or one of its parents) could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An override file exists but could not be read.
    #[error("failed to read override arguments {}: {source}", path.display())]
    ReadOverride {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generator configuration document could not be written.
    #[error("failed to write generator arguments {}: {source}", path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external tool could not be started at all.
    #[error("failed to start {description}: {source}. Ensure the tool exists and is executable")]
    Spawn {
        description: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran and exited unsuccessfully.
    #[error("{description} failed ({status})")]
    ToolFailed { description: String, status: String },

    /// Packaging was requested for a debug build.
    #[error("can not package in debug mode")]
    PackageInDebug,

    /// The operation has no implementation on this host family.
    #[error("{operation} is not supported on {host} hosts")]
    UnsupportedOnHost {
        operation: &'static str,
        host: String,
    },

    /// The host operating system has no profile at all.
    #[error("unsupported host operating system: {0}. Supported hosts: linux, windows")]
    UnsupportedHost(String),
}

/// Build profile: debug or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
    Debug,
    #[default]
    Release,
}

impl BuildProfile {
    /// Picks the profile from a `--debug` style flag.
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            BuildProfile::Debug
        } else {
            BuildProfile::Release
        }
    }

    /// Returns `"debug"` or `"release"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }
}

/// The option set for one run.
///
/// Constructed once from the command line (and config file) and only ever
/// passed by reference afterwards.
///
/// # Example
///
/// ```
/// use nanobuild_sdk::{BuildOptions, BuildProfile};
///
/// let options = BuildOptions::new(BuildProfile::Release).compile_target("base net");
/// assert_eq!(options.compile_targets(), Some(vec!["base", "net"]));
///
/// let defaults = BuildOptions::new(BuildProfile::Release).compile_target("   ");
/// assert_eq!(defaults.compile_targets(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Explicit target string for the build tool; may hold several
    /// space-separated targets.
    pub compile_target: Option<String>,
    /// Debug or release.
    pub profile: BuildProfile,
    /// Run the packaging targets instead of the regular build.
    pub package: bool,
}

impl BuildOptions {
    pub fn new(profile: BuildProfile) -> Self {
        Self {
            compile_target: None,
            profile,
            package: false,
        }
    }

    pub fn compile_target(mut self, target: impl Into<String>) -> Self {
        self.compile_target = Some(target.into());
        self
    }

    pub fn package(mut self, package: bool) -> Self {
        self.package = package;
        self
    }

    pub fn is_debug(&self) -> bool {
        matches!(self.profile, BuildProfile::Debug)
    }

    /// Splits the explicit compile target into build-tool arguments.
    ///
    /// Returns `None` when no target was given or it is blank, meaning the
    /// platform default targets apply.
    pub fn compile_targets(&self) -> Option<Vec<&str>> {
        let targets: Vec<&str> = self
            .compile_target
            .as_deref()?
            .split_whitespace()
            .collect();
        if targets.is_empty() {
            None
        } else {
            Some(targets)
        }
    }
}
