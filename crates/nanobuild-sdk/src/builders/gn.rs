//! Generator invocation (`gn gen`).

use crate::host::HostProfile;
use crate::layout::BuildLayout;
use crate::project::ProjectPaths;
use crate::runner::{CommandRunner, Invocation};
use crate::types::BuildError;
use std::ffi::OsString;

/// Describes `gn gen <out_dir> --root=<source_dir>` plus any host flags.
pub fn gen_invocation(layout: &BuildLayout, paths: &ProjectPaths, host: &HostProfile) -> Invocation {
    let mut root_flag = OsString::from("--root=");
    root_flag.push(&paths.source_dir);
    Invocation::new("gn gen", &layout.generator)
        .arg("gen")
        .arg(&layout.out_dir)
        .arg(root_flag)
        .args(host.generator_extra_flags)
}

/// Runs the generator against the output directory.
pub fn generate(
    runner: &dyn CommandRunner,
    layout: &BuildLayout,
    paths: &ProjectPaths,
    host: &HostProfile,
) -> Result<(), BuildError> {
    runner.run(&gen_invocation(layout, paths, host))
}
