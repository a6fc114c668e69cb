//! Generator argument document (`args.gn`) synthesis.
//!
//! The document is a deterministic function of the options, the platform and
//! the host, followed verbatim by an optional override file from the project
//! root.

use crate::host::HostProfile;
use crate::project::{GENERATED_ARGS_FILE, ProjectPaths, is_android_os};
use crate::types::{BuildError, BuildOptions};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Renders the base argument lines (without the override section).
///
/// # Example
///
/// ```
/// use nanobuild_sdk::{BuildOptions, BuildProfile, HostFamily, HostProfile, gn_args};
///
/// let host = HostProfile::for_family(HostFamily::Windows).unwrap();
/// let base = gn_args::render_base(&BuildOptions::new(BuildProfile::Release), "X86", &host);
/// assert_eq!(
///     base,
///     "is_component_build = false\nis_debug = false\nis_official_build = true\ntarget_cpu = \"x86\"\n"
/// );
/// ```
pub fn render_base(options: &BuildOptions, platform: &str, host: &HostProfile) -> String {
    let debug = options.is_debug();
    let mut args = String::new();
    args.push_str(&format!("is_component_build = {}\n", debug));
    args.push_str(&format!("is_debug = {}\n", debug));
    args.push_str(&format!("is_official_build = {}\n", !debug));
    if is_android_os(platform) {
        args.push_str("target_os = \"android\"\n");
    } else {
        args.push_str(&format!("target_cpu = \"{}\"\n", platform.to_lowercase()));
        if host.emit_symbol_level {
            args.push_str(&format!("symbol_level = {}\n", if debug { 2 } else { 0 }));
        }
    }
    args
}

/// Renders the full document: base lines, a blank line, the override text
/// and a trailing newline.
pub fn render(options: &BuildOptions, platform: &str, host: &HostProfile, overrides: &str) -> String {
    format!("{}\n{}\n", render_base(options, platform, host), overrides)
}

/// Reads the override file for `platform`; a missing file reads as empty.
pub fn read_overrides(paths: &ProjectPaths, platform: &str) -> Result<String, BuildError> {
    let path = paths.override_file(platform);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!(path = %path.display(), "appending override arguments");
            Ok(contents)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(BuildError::ReadOverride { path, source }),
    }
}

/// Writes `<out_dir>/args.gn`, replacing any previous content.
///
/// Returns the path of the written document.
pub fn write(
    paths: &ProjectPaths,
    host: &HostProfile,
    options: &BuildOptions,
    platform: &str,
    out_dir: &Path,
) -> Result<PathBuf, BuildError> {
    let overrides = read_overrides(paths, platform)?;
    let document = render(options, platform, host, &overrides);
    let path = out_dir.join(GENERATED_ARGS_FILE);
    fs::write(&path, document).map_err(|source| BuildError::WriteConfig {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote generator arguments");
    Ok(path)
}
