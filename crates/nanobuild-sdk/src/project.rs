//! Filesystem locations of a checkout.

use std::path::{Path, PathBuf};

/// Generic override file appended to every non-Android argument document.
pub const ARGS_OVERRIDE_FILE: &str = "args.gn";
/// Override file used for platforms whose id starts with `android`.
pub const ANDROID_ARGS_OVERRIDE_FILE: &str = "args_android.gn";
/// Name of the argument document written into every output directory.
pub const GENERATED_ARGS_FILE: &str = "args.gn";
/// Entry script every plugin platform directory provides.
pub const EXTENDED_BUILD_SCRIPT: &str = "build.sh";
/// Environment variable naming the plugin platform for its build script.
pub const EXTENDED_PLATFORM_ENV: &str = "BUILD_TARGET";

/// Directories the driver reads from and writes to.
///
/// All paths default to fixed names under the project root; the CLI config
/// layer may point them elsewhere.
///
/// # Example
///
/// ```
/// use nanobuild_sdk::ProjectPaths;
/// use std::path::Path;
///
/// let paths = ProjectPaths::new("/work/nano");
/// assert_eq!(paths.tools_dir, Path::new("/work/nano/tools"));
/// assert_eq!(paths.override_file("android_x86"), Path::new("/work/nano/args_android.gn"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project root; also the parent of output directories on some hosts.
    pub root: PathBuf,
    /// Holds the `gn` and `ninja` executables.
    pub tools_dir: PathBuf,
    /// Source root handed to the generator as `--root`.
    pub source_dir: PathBuf,
    /// Plugin directory whose subdirectories are extended platforms.
    pub platform_dir: PathBuf,
    /// Parent of output directories on hosts that use an `out` root.
    pub out_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            tools_dir: root.join("tools"),
            source_dir: root.join("src"),
            platform_dir: root.join("platform"),
            out_dir: root.join("out"),
            root,
        }
    }

    pub fn tools_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.tools_dir = self.root.join(dir);
        self
    }

    pub fn source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source_dir = self.root.join(dir);
        self
    }

    pub fn platform_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.platform_dir = self.root.join(dir);
        self
    }

    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = self.root.join(dir);
        self
    }

    /// Override file consulted for `platform`.
    pub fn override_file(&self, platform: &str) -> PathBuf {
        if is_android_family(platform) {
            self.root.join(ANDROID_ARGS_OVERRIDE_FILE)
        } else {
            self.root.join(ARGS_OVERRIDE_FILE)
        }
    }

    /// Build script of an extended platform.
    pub fn extended_script(&self, platform: &str) -> PathBuf {
        self.platform_dir.join(platform).join(EXTENDED_BUILD_SCRIPT)
    }
}

/// Platforms whose id starts with `android` share the Android override file
/// and default targets.
pub fn is_android_family(platform: &str) -> bool {
    platform.starts_with("android")
}

/// Only the exact `android` id (case-insensitive) targets the OS rather than a CPU.
pub fn is_android_os(platform: &str) -> bool {
    platform.eq_ignore_ascii_case("android")
}
