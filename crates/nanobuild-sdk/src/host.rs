//! Host profile resolution.
//!
//! Everything that differs between host operating systems lives here as data.
//! The profile is resolved once at startup and handed to every component by
//! reference, so layout, argument synthesis, invocation and packaging can never
//! disagree about which host they run on.

use crate::types::BuildError;
use std::env;
use std::fmt;

/// Host operating system family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFamily {
    Linux,
    Windows,
    /// Any other host, carrying its `std::env::consts::OS` name.
    Other(String),
}

impl HostFamily {
    /// Detects the family of the running host.
    pub fn detect() -> Self {
        Self::from_os(env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => HostFamily::Linux,
            "windows" => HostFamily::Windows,
            other => HostFamily::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HostFamily::Linux => "linux",
            HostFamily::Windows => "windows",
            HostFamily::Other(os) => os,
        }
    }
}

impl fmt::Display for HostFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How output directories are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputConvention {
    /// `<out>/<platform>` for release, `<out>/<platform>_debug` for debug.
    OutRootSuffixedDebug,
    /// `<root>/<platform>_<debug|release>` directly under the project root.
    RootBuildType,
}

/// Host-dependent constants consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    pub family: HostFamily,
    /// Suffix appended to tool executables (`""` or `".exe"`).
    pub exe_suffix: &'static str,
    /// Platforms every checkout can build on this host, in prompt order.
    pub static_platforms: &'static [&'static str],
    pub output_convention: OutputConvention,
    /// Whether `symbol_level` is written into the generator arguments.
    pub emit_symbol_level: bool,
    /// Flags appended to `gn gen` after `--root`.
    pub generator_extra_flags: &'static [&'static str],
    /// Build-tool targets run, in order, when packaging. `None` when
    /// packaging has no implementation on this host.
    pub package_targets: Option<&'static [&'static str]>,
    /// Whether plugin platforms can run their build script here.
    pub supports_extended_dispatch: bool,
}

const LINUX_PLATFORMS: &[&str] = &["x64", "arm64", "mips64el", "loong64", "android"];
const WINDOWS_PLATFORMS: &[&str] = &["x86", "x64"];

impl HostProfile {
    /// Resolves the profile of the running host.
    pub fn detect() -> Result<Self, BuildError> {
        Self::for_family(HostFamily::detect())
    }

    /// Returns the profile for `family`.
    ///
    /// Hosts other than Linux and Windows have no static catalog and no
    /// output convention, so they are rejected up front.
    pub fn for_family(family: HostFamily) -> Result<Self, BuildError> {
        match family {
            HostFamily::Linux => Ok(Self {
                family,
                exe_suffix: "",
                static_platforms: LINUX_PLATFORMS,
                output_convention: OutputConvention::OutRootSuffixedDebug,
                emit_symbol_level: true,
                generator_extra_flags: &[],
                package_targets: Some(&["stable_deb", "stable_rpm"]),
                supports_extended_dispatch: true,
            }),
            HostFamily::Windows => Ok(Self {
                family,
                exe_suffix: ".exe",
                static_platforms: WINDOWS_PLATFORMS,
                output_convention: OutputConvention::RootBuildType,
                emit_symbol_level: false,
                generator_extra_flags: &["--ide=vs", "--filters=//chrome", "--no-deps"],
                package_targets: Some(&["mini_installer"]),
                supports_extended_dispatch: false,
            }),
            HostFamily::Other(os) => Err(BuildError::UnsupportedHost(os)),
        }
    }

    /// File name of a tool executable on this host.
    pub fn executable(&self, tool: &str) -> String {
        format!("{}{}", tool, self.exe_suffix)
    }
}
