//! Run orchestration.
//!
//! A run moves through `SelectingPlatform`, then either the gn/ninja pipeline
//! or plugin dispatch, and ends in `Done` or `Failed`. Any error on the way is
//! terminal; nothing is retried and later steps never run.

use crate::builders::{BuildOutcome, PlatformBuilder};
use crate::catalog::{Platform, PlatformCatalog};
use crate::host::HostProfile;
use crate::project::ProjectPaths;
use crate::runner::{CommandRunner, SystemRunner};
use crate::types::{BuildError, BuildOptions};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Prefix of every line the driver prints to standard output.
pub const BANNER_PREFIX: &str = "[nano]";

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Failed,
}

impl Status {
    pub fn banner(&self) -> String {
        match self {
            Status::Done => format!("{} build successful", BANNER_PREFIX),
            Status::Failed => format!("{} error occurred", BANNER_PREFIX),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Done => 0,
            Status::Failed => 1,
        }
    }
}

impl<T> From<&Result<T, BuildError>> for Status {
    fn from(result: &Result<T, BuildError>) -> Self {
        if result.is_ok() {
            Status::Done
        } else {
            Status::Failed
        }
    }
}

/// Ties the catalog, the prompt and the builders together.
pub struct Orchestrator<'a> {
    paths: &'a ProjectPaths,
    host: &'a HostProfile,
    catalog: PlatformCatalog,
    runner: &'a dyn CommandRunner,
}

impl<'a> Orchestrator<'a> {
    /// Enumerates the catalog for `host` and `paths`.
    pub fn new(paths: &'a ProjectPaths, host: &'a HostProfile) -> Self {
        Self {
            paths,
            host,
            catalog: PlatformCatalog::enumerate(host, &paths.platform_dir),
            runner: &SystemRunner,
        }
    }

    /// Replaces the process runner (dry runs, tests).
    pub fn runner(mut self, runner: &'a dyn CommandRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn catalog(&self) -> &PlatformCatalog {
        &self.catalog
    }

    /// Prints the numbered catalog.
    pub fn present<W: Write>(&self, output: &mut W) -> Result<(), BuildError> {
        writeln!(
            output,
            "{} please enter the index of the platform you want to compile",
            BANNER_PREFIX
        )
        .map_err(BuildError::Prompt)?;
        for (index, platform) in self.catalog.entries().iter().enumerate() {
            writeln!(output, "{} {}: {}", BANNER_PREFIX, index, platform.name)
                .map_err(BuildError::Prompt)?;
        }
        output.flush().map_err(BuildError::Prompt)
    }

    /// Reads one line and resolves it against the catalog.
    pub fn read_selection<R: BufRead>(&self, mut input: R) -> Result<&Platform, BuildError> {
        let mut line = String::new();
        input.read_line(&mut line).map_err(BuildError::Prompt)?;
        self.catalog.select(&line)
    }

    /// Builds the platform named by `selection` (an index string).
    pub fn run_selection(&self, options: &BuildOptions, selection: &str) -> Result<BuildOutcome, BuildError> {
        let platform = self.catalog.select(selection)?;
        self.build(platform, options)
    }

    /// Presents the catalog, reads the selection and builds it.
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        options: &BuildOptions,
        input: R,
        output: &mut W,
    ) -> Result<BuildOutcome, BuildError> {
        self.present(output)?;
        let platform = self.read_selection(input)?;
        self.build(platform, options)
    }

    fn build(&self, platform: &Platform, options: &BuildOptions) -> Result<BuildOutcome, BuildError> {
        info!(
            platform = %platform.name,
            extended = platform.is_extended(),
            "selected platform"
        );
        PlatformBuilder::new(self.paths, self.host)
            .runner(self.runner)
            .build(platform, options)
    }
}

/// Prints the error (if any) and the terminal banner, and returns the status.
pub fn finish<T, W: Write>(result: &Result<T, BuildError>, output: &mut W) -> Status {
    let status = Status::from(result);
    if let Err(err) = result {
        debug!(error = ?err, "run failed");
        let _ = writeln!(output, "{} {}", BANNER_PREFIX, err);
    }
    let _ = writeln!(output, "\n{}", status.banner());
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostFamily;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_status_banners() {
        assert_eq!(Status::Done.banner(), "[nano] build successful");
        assert_eq!(Status::Failed.banner(), "[nano] error occurred");
        assert_eq!(Status::Done.exit_code(), 0);
        assert_ne!(Status::Failed.exit_code(), 0);
    }

    #[test]
    fn test_present_lists_indices() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp_dir.path());
        let host = HostProfile::for_family(HostFamily::Windows).unwrap();
        let orchestrator = Orchestrator::new(&paths, &host);

        let mut out = Vec::new();
        orchestrator.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "[nano] please enter the index of the platform you want to compile\n\
             [nano] 0: x86\n\
             [nano] 1: x64\n"
        );
    }

    #[test]
    fn test_read_selection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp_dir.path());
        let host = HostProfile::for_family(HostFamily::Linux).unwrap();
        let orchestrator = Orchestrator::new(&paths, &host);

        let platform = orchestrator.read_selection(Cursor::new("1\n")).unwrap();
        assert_eq!(platform.name, "arm64");
        assert!(orchestrator.read_selection(Cursor::new("")).is_err());
    }

    #[test]
    fn test_finish_reports_failure() {
        let mut out = Vec::new();
        let result: Result<(), BuildError> = Err(BuildError::PackageInDebug);
        let status = finish(&result, &mut out);
        assert_eq!(status, Status::Failed);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("can not package in debug mode").count(), 1);
        assert!(text.starts_with("[nano] can not package in debug mode\n"));
        assert!(text.ends_with("\n[nano] error occurred\n"));
    }

    #[test]
    fn test_finish_reports_success() {
        let mut out = Vec::new();
        let status = finish(&Ok::<(), BuildError>(()), &mut out);
        assert_eq!(status, Status::Done);
        assert_eq!(String::from_utf8(out).unwrap(), "\n[nano] build successful\n");
    }
}
