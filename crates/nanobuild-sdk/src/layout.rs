//! Output directory and tool path policy.

use crate::host::{HostProfile, OutputConvention};
use crate::project::ProjectPaths;
use crate::types::{BuildError, BuildOptions, BuildProfile};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Resolved locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// The `gn` executable.
    pub generator: PathBuf,
    /// The `ninja` executable.
    pub build_tool: PathBuf,
    /// Output directory for this platform and profile.
    pub out_dir: PathBuf,
}

impl BuildLayout {
    /// Computes the layout without touching the filesystem.
    pub fn resolve(
        paths: &ProjectPaths,
        host: &HostProfile,
        platform: &str,
        profile: BuildProfile,
    ) -> Self {
        Self {
            generator: paths.tools_dir.join(host.executable("gn")),
            build_tool: paths.tools_dir.join(host.executable("ninja")),
            out_dir: output_dir(paths, host, platform, profile),
        }
    }

    /// Computes the layout and creates the output directory (with parents).
    ///
    /// Directories created before a failure are left in place.
    pub fn prepare(
        paths: &ProjectPaths,
        host: &HostProfile,
        platform: &str,
        options: &BuildOptions,
    ) -> Result<Self, BuildError> {
        let layout = Self::resolve(paths, host, platform, options.profile);
        fs::create_dir_all(&layout.out_dir).map_err(|source| BuildError::CreateOutputDir {
            path: layout.out_dir.clone(),
            source,
        })?;
        debug!(
            generator = %layout.generator.display(),
            build_tool = %layout.build_tool.display(),
            out_dir = %layout.out_dir.display(),
            "prepared build layout"
        );
        Ok(layout)
    }
}

/// Output directory for `platform` built with `profile` on `host`.
pub fn output_dir(
    paths: &ProjectPaths,
    host: &HostProfile,
    platform: &str,
    profile: BuildProfile,
) -> PathBuf {
    let platform = platform.to_lowercase();
    match host.output_convention {
        OutputConvention::OutRootSuffixedDebug => {
            let folder = match profile {
                BuildProfile::Debug => format!("{}_{}", platform, profile.as_str()),
                BuildProfile::Release => platform,
            };
            paths.out_dir.join(folder)
        }
        OutputConvention::RootBuildType => paths
            .root
            .join(format!("{}_{}", platform, profile.as_str())),
    }
}
