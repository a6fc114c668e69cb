//! Configuration file support for nanobuild.
//!
//! A `nanobuild.toml` file lets a checkout relocate the directories the driver
//! uses and set default build flags, so they need not be passed every time.
//!
//! ## Configuration File Location
//!
//! The configuration file is searched for in the following order:
//! 1. Current working directory (`./nanobuild.toml`)
//! 2. Parent directories (up to the repository root or filesystem root)
//!
//! The directory holding the file becomes the project root.
//!
//! ## Example Configuration
//!
//! ```toml
//! [paths]
//! tools_dir = "buildtools"
//! source_dir = "src"
//! platform_dir = "platform"
//! out_dir = "out"
//!
//! [defaults]
//! compile = "chrome"
//! debug = false
//! package = false
//! ```

use anyhow::{Context, Result};
use nanobuild_sdk::ProjectPaths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = "nanobuild.toml";

/// Root configuration structure for `nanobuild.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NanobuildConfig {
    /// Directory locations, relative to the project root.
    pub paths: PathsConfig,

    /// Default build flags.
    pub defaults: DefaultsConfig,
}

/// Directory locations, relative to the project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `gn` and `ninja`. Defaults to `tools`.
    pub tools_dir: PathBuf,

    /// Source root passed to `gn gen --root`. Defaults to `src`.
    pub source_dir: PathBuf,

    /// Plugin platform directory. Defaults to `platform`.
    pub platform_dir: PathBuf,

    /// Parent of output directories on Linux hosts. Defaults to `out`.
    pub out_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tools_dir: PathBuf::from("tools"),
            source_dir: PathBuf::from("src"),
            platform_dir: PathBuf::from("platform"),
            out_dir: PathBuf::from("out"),
        }
    }
}

/// Default build flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Build-tool target string used when `--compile` is not given.
    pub compile: Option<String>,

    /// Build in debug mode.
    pub debug: bool,

    /// Run packaging targets instead of a regular build.
    pub package: bool,
}

impl NanobuildConfig {
    /// Loads configuration from the specified file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: NanobuildConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Attempts to find and load configuration starting from the specified directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Some((config, path)))` - Found and loaded configuration with its path
    /// * `Ok(None)` - No configuration file found
    /// * `Err` - If a config file was found but couldn't be parsed
    pub fn discover_from(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.is_file() {
                let config = Self::load_from_file(&config_path)?;
                return Ok(Some((config, config_path)));
            }

            // Stop at repository root or filesystem root
            if current.join(".git").exists() || !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Applies the configured directories to a project rooted at `root`.
    pub fn project_paths(&self, root: &Path) -> ProjectPaths {
        ProjectPaths::new(root)
            .tools_dir(&self.paths.tools_dir)
            .source_dir(&self.paths.source_dir)
            .platform_dir(&self.paths.platform_dir)
            .out_dir(&self.paths.out_dir)
    }

    /// Generates a starter configuration file as a commented TOML string.
    pub fn generate_starter_toml() -> String {
        r#"# nanobuild configuration file
# CLI flags override these settings when provided.

[paths]
# Directory holding the gn and ninja executables
tools_dir = "tools"

# Source root passed to `gn gen --root`
source_dir = "src"

# Each subdirectory is a plugin platform with its own build.sh
platform_dir = "platform"

# Parent of output directories on Linux hosts (Windows builds go to the project root)
out_dir = "out"

[defaults]
# Build-tool targets used when --compile is not given (space separated)
# compile = "chrome"

# Build in debug mode (same as --debug)
debug = false

# Run packaging targets instead of a regular build (same as --package)
package = false
"#
        .to_string()
    }
}

/// Loaded configuration plus where it came from.
///
/// CLI arguments always take precedence over the values exposed here.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    /// Loaded configuration, if any.
    pub config: Option<NanobuildConfig>,

    /// Path to the loaded config file, if any.
    pub config_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Discovers configuration starting at `start_dir`.
    pub fn discover_from(start_dir: &Path) -> Result<Self> {
        match NanobuildConfig::discover_from(start_dir)? {
            Some((config, path)) => Ok(Self {
                config: Some(config),
                config_path: Some(path),
            }),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from an explicit project root, without walking up.
    pub fn load_at(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Ok(Self {
            config: Some(NanobuildConfig::load_from_file(&path)?),
            config_path: Some(path),
        })
    }

    /// Directory holding the loaded config file.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    /// Project paths rooted at `root`, with configured directories applied.
    pub fn project_paths(&self, root: &Path) -> ProjectPaths {
        match &self.config {
            Some(config) => config.project_paths(root),
            None => ProjectPaths::new(root),
        }
    }

    /// Returns the default compile target from config.
    pub fn default_compile(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|c| c.defaults.compile.as_deref())
    }

    /// Returns whether config asks for debug builds.
    pub fn default_debug(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.defaults.debug)
    }

    /// Returns whether config asks for packaging.
    pub fn default_package(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.defaults.package)
    }
}
