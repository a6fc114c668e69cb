//! Build-tool invocations: regular builds and packaging.

use crate::host::HostProfile;
use crate::layout::BuildLayout;
use crate::project::is_android_family;
use crate::runner::{CommandRunner, Invocation};
use crate::types::{BuildError, BuildOptions};
use tracing::info;

/// Targets built for Android-family platforms when no target is given.
pub const ANDROID_DEFAULT_TARGETS: &[&str] = &["system_webview_apk", "chrome_public_apk"];
/// Target built for every other platform when no target is given.
pub const DEFAULT_TARGET: &str = "chrome";

/// Describes `ninja -C <out_dir> <targets...>`.
pub fn ninja_invocation<S: AsRef<str>>(layout: &BuildLayout, targets: &[S]) -> Invocation {
    let names: Vec<&str> = targets.iter().map(|t| t.as_ref()).collect();
    Invocation::new(format!("ninja {}", names.join(" ")), &layout.build_tool)
        .arg("-C")
        .arg(&layout.out_dir)
        .args(names)
}

/// The build-tool calls a regular build makes, in order.
///
/// An explicit compile target becomes a single call; otherwise the platform
/// defaults apply, one call per default target.
pub fn build_plan(platform: &str, layout: &BuildLayout, options: &BuildOptions) -> Vec<Invocation> {
    if let Some(targets) = options.compile_targets() {
        return vec![ninja_invocation(layout, &targets)];
    }
    if is_android_family(platform) {
        ANDROID_DEFAULT_TARGETS
            .iter()
            .map(|target| ninja_invocation(layout, &[target]))
            .collect()
    } else {
        vec![ninja_invocation(layout, &[DEFAULT_TARGET])]
    }
}

/// The build-tool calls packaging makes, in order.
///
/// Refuses debug builds and hosts without packaging targets before any
/// process is described.
pub fn package_plan(
    host: &HostProfile,
    layout: &BuildLayout,
    options: &BuildOptions,
) -> Result<Vec<Invocation>, BuildError> {
    if options.is_debug() {
        return Err(BuildError::PackageInDebug);
    }
    let targets = host.package_targets.ok_or_else(|| BuildError::UnsupportedOnHost {
        operation: "packaging",
        host: host.family.to_string(),
    })?;
    Ok(targets
        .iter()
        .map(|target| ninja_invocation(layout, &[target]))
        .collect())
}

/// Runs a regular build, stopping at the first failing call.
pub fn build(
    runner: &dyn CommandRunner,
    platform: &str,
    layout: &BuildLayout,
    options: &BuildOptions,
) -> Result<(), BuildError> {
    run_all(runner, &build_plan(platform, layout, options))
}

/// Runs the packaging targets, stopping at the first failing call.
pub fn package(
    runner: &dyn CommandRunner,
    host: &HostProfile,
    layout: &BuildLayout,
    options: &BuildOptions,
) -> Result<(), BuildError> {
    run_all(runner, &package_plan(host, layout, options)?)
}

fn run_all(runner: &dyn CommandRunner, plan: &[Invocation]) -> Result<(), BuildError> {
    for invocation in plan {
        info!("{}", invocation.description);
        runner.run(invocation)?;
    }
    Ok(())
}
