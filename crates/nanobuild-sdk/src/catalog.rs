//! Platform catalog: static platforms of the host plus plugin platforms found on disk.

use crate::host::HostProfile;
use crate::types::BuildError;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Where a platform comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Hard-coded for the host; built through gn and ninja.
    Static,
    /// A plugin directory; built by its own script.
    Extended,
}

/// One selectable platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub name: String,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn is_extended(&self) -> bool {
        self.kind == PlatformKind::Extended
    }
}

/// The combined catalog shown to the operator: static entries first, then
/// extended entries in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformCatalog {
    entries: Vec<Platform>,
}

impl PlatformCatalog {
    /// Builds the catalog for `profile`, scanning `platform_dir` for plugins.
    ///
    /// A missing plugin directory yields no extended platforms. Plugin
    /// directories named like a static platform are skipped.
    pub fn enumerate(profile: &HostProfile, platform_dir: &Path) -> Self {
        let statics = profile.static_platforms.iter().map(|name| Platform {
            name: (*name).to_string(),
            kind: PlatformKind::Static,
        });
        let extended = discover_extended(platform_dir)
            .into_iter()
            .filter(|name| {
                let clashes = profile.static_platforms.contains(&name.as_str());
                if clashes {
                    warn!(platform = %name, "plugin directory shadows a static platform; ignoring it");
                }
                !clashes
            })
            .map(|name| Platform {
                name,
                kind: PlatformKind::Extended,
            });

        Self {
            entries: statics.chain(extended).collect(),
        }
    }

    pub fn entries(&self) -> &[Platform] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn static_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.entries.iter().filter(|p| !p.is_extended())
    }

    pub fn extended_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.entries.iter().filter(|p| p.is_extended())
    }

    /// Resolves a typed index.
    ///
    /// Only a plain run of ASCII digits (surrounding whitespace aside) within
    /// `0..len` is accepted.
    pub fn select(&self, input: &str) -> Result<&Platform, BuildError> {
        let trimmed = input.trim();
        let invalid = || BuildError::InvalidSelection {
            input: trimmed.to_string(),
            count: self.entries.len(),
        };
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = trimmed.parse().map_err(|_| invalid())?;
        self.entries.get(index).ok_or_else(invalid)
    }
}

/// Lists subdirectory names of `platform_dir`, sorted.
fn discover_extended(platform_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(platform_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(dir = %platform_dir.display(), "no plugin directory");
            return Vec::new();
        }
        Err(err) => {
            warn!(dir = %platform_dir.display(), error = %err, "cannot read plugin directory; no plugin platforms");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| match entry.file_name().into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                warn!(name = ?raw, "plugin directory name is not valid UTF-8; ignoring it");
                None
            }
        })
        .collect();
    names.sort();
    debug!(dir = %platform_dir.display(), count = names.len(), "discovered plugin platforms");
    names
}
