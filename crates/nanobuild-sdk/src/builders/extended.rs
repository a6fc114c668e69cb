//! Plugin platform dispatch.
//!
//! Plugin platforms skip gn and ninja entirely: their own `build.sh` is run
//! with `BUILD_TARGET` naming the platform.

use crate::host::HostProfile;
use crate::project::{EXTENDED_PLATFORM_ENV, ProjectPaths};
use crate::runner::{CommandRunner, Invocation};
use crate::types::BuildError;
use tracing::info;

/// Describes the plugin build script call for `platform`.
pub fn dispatch_invocation(paths: &ProjectPaths, platform: &str) -> Invocation {
    Invocation::new(
        format!("{} build script", platform),
        paths.extended_script(platform),
    )
    .env(EXTENDED_PLATFORM_ENV, platform)
}

/// Runs the plugin build script for `platform`.
pub fn dispatch(
    runner: &dyn CommandRunner,
    host: &HostProfile,
    paths: &ProjectPaths,
    platform: &str,
) -> Result<(), BuildError> {
    if !host.supports_extended_dispatch {
        return Err(BuildError::UnsupportedOnHost {
            operation: "plugin platform builds",
            host: host.family.to_string(),
        });
    }
    let invocation = dispatch_invocation(paths, platform);
    info!(platform, script = %invocation.program().display(), "dispatching plugin platform");
    runner.run(&invocation)
}
