//! External process execution.
//!
//! Every tool the pipeline starts is described as an [`Invocation`] (argument
//! vector, never a shell string) and handed to a [`CommandRunner`]. The real
//! runner inherits the terminal so tool output streams straight through; the
//! dry-run runner only prints what would run.

use crate::types::BuildError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A fully specified external process call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Human-readable label used in logs and errors (e.g. `"ninja chrome"`).
    pub description: String,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Variables added to the inherited environment.
    pub envs: Vec<(OsString, OsString)>,
}

impl Invocation {
    pub fn new(description: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            description: description.into(),
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments as lossy UTF-8, mostly for assertions and display.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Builds the `std::process::Command` with inherited stdio.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key.to_string_lossy(), value.to_string_lossy())?;
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Executes invocations and reports failure as [`BuildError`].
pub trait CommandRunner {
    /// Runs `invocation` to completion. Any non-success exit is an error.
    fn run(&self, invocation: &Invocation) -> Result<(), BuildError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<(), BuildError> {
        (**self).run(invocation)
    }
}

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), BuildError> {
        debug!(command = %invocation, "running {}", invocation.description);
        let status = invocation
            .to_command()
            .status()
            .map_err(|source| BuildError::Spawn {
                description: invocation.description.clone(),
                source,
            })?;
        if !status.success() {
            return Err(BuildError::ToolFailed {
                description: invocation.description.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Prints each invocation instead of running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), BuildError> {
        println!("[dry-run] {}", invocation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new("ninja chrome", "/repo/tools/ninja")
            .arg("-C")
            .arg("/repo/out/x64")
            .args(["chrome"]);
        assert_eq!(inv.program(), Path::new("/repo/tools/ninja"));
        assert_eq!(inv.args_lossy(), ["-C", "/repo/out/x64", "chrome"]);
        assert!(inv.envs.is_empty());
    }

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("build script", "/repo/platform/custom1/build.sh")
            .env("BUILD_TARGET", "custom1");
        assert_eq!(
            inv.to_string(),
            "BUILD_TARGET=custom1 /repo/platform/custom1/build.sh"
        );
    }

    #[test]
    fn test_dry_run_always_succeeds() {
        let inv = Invocation::new("gn gen", "/definitely/not/here/gn").arg("gen");
        assert!(DryRunRunner.run(&inv).is_ok());
    }

    #[test]
    fn test_system_runner_spawn_failure() {
        let inv = Invocation::new("missing tool", "/definitely/not/here/nanobuild-tool");
        let err = SystemRunner.run(&inv).unwrap_err();
        assert!(matches!(err, BuildError::Spawn { ref description, .. } if description == "missing tool"));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_exit_status() {
        assert!(SystemRunner.run(&Invocation::new("true", "true")).is_ok());

        let err = SystemRunner
            .run(&Invocation::new("false", "false"))
            .unwrap_err();
        assert!(matches!(err, BuildError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_passes_env() {
        let inv = Invocation::new("env check", "sh")
            .args(["-c", "test \"$NANOBUILD_PROBE\" = custom1"])
            .env("NANOBUILD_PROBE", "custom1");
        assert!(SystemRunner.run(&inv).is_ok());
    }
}
