//! End-to-end runs of the orchestrator against a temporary checkout with a
//! recording process runner.

use nanobuild_sdk::orchestrator::finish;
use nanobuild_sdk::{
    BuildError, BuildOptions, BuildOutcome, BuildProfile, CommandRunner, HostFamily, HostProfile,
    Invocation, Orchestrator, ProjectPaths, Status,
};
use std::cell::RefCell;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    fail_on: Option<&'static str>,
}

impl RecordingRunner {
    fn programs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }

    fn args(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(Invocation::args_lossy).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), BuildError> {
        self.calls.borrow_mut().push(invocation.clone());
        if self.fail_on == Some(invocation.description.as_str()) {
            return Err(BuildError::ToolFailed {
                description: invocation.description.clone(),
                status: "exit status: 1".into(),
            });
        }
        Ok(())
    }
}

fn linux() -> HostProfile {
    HostProfile::for_family(HostFamily::Linux).unwrap()
}

fn checkout() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("platform/custom1")).unwrap();
    temp_dir
}

fn tree_entries(root: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn release_x64_builds_default_target() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    let mut out = Vec::new();
    let outcome = orchestrator
        .run_interactive(&BuildOptions::default(), Cursor::new("0\n"), &mut out)
        .unwrap();

    let out_dir = temp_dir.path().join("out").join("x64");
    assert_eq!(
        outcome,
        BuildOutcome::Pipeline {
            out_dir: out_dir.clone(),
            packaged: false
        }
    );

    let args = fs::read_to_string(out_dir.join("args.gn")).unwrap();
    assert!(args.contains("is_debug = false\n"));
    assert!(args.contains("is_official_build = true\n"));
    assert!(args.contains("target_cpu = \"x64\"\n"));
    assert!(args.contains("symbol_level = 0\n"));

    assert_eq!(
        runner.programs(),
        [
            temp_dir.path().join("tools/gn"),
            temp_dir.path().join("tools/ninja"),
        ]
    );
    let src_flag = format!("--root={}", temp_dir.path().join("src").display());
    let out_str = out_dir.display().to_string();
    assert_eq!(
        runner.args(),
        [
            vec!["gen".to_string(), out_str.clone(), src_flag],
            vec!["-C".to_string(), out_str, "chrome".to_string()],
        ]
    );

    let prompt = String::from_utf8(out).unwrap();
    assert!(prompt.contains("[nano] 0: x64\n"));
    assert!(prompt.contains("[nano] 5: custom1\n"));
}

#[test]
fn android_debug_builds_webview_then_app() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    orchestrator
        .run_selection(&BuildOptions::new(BuildProfile::Debug), "4")
        .unwrap();

    let out_dir = temp_dir.path().join("out/android_debug");
    let args = fs::read_to_string(out_dir.join("args.gn")).unwrap();
    assert!(args.contains("target_os = \"android\"\n"));
    assert!(args.contains("is_component_build = true\n"));
    assert!(!args.contains("target_cpu"));
    assert!(!args.contains("symbol_level"));

    let targets: Vec<String> = runner
        .args()
        .into_iter()
        .skip(1)
        .map(|a| a.last().cloned().unwrap())
        .collect();
    assert_eq!(targets, ["system_webview_apk", "chrome_public_apk"]);
}

#[test]
fn extended_platform_only_runs_its_script() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    let outcome = orchestrator
        .run_selection(&BuildOptions::new(BuildProfile::Debug).package(true), "5")
        .unwrap();

    let script = temp_dir.path().join("platform/custom1/build.sh");
    assert_eq!(outcome, BuildOutcome::Extended { script: script.clone() });
    assert_eq!(runner.programs(), [script]);
    let calls = runner.calls.borrow();
    assert!(calls[0].args.is_empty());
    assert_eq!(calls[0].envs.len(), 1);
    assert_eq!(calls[0].envs[0].0, "BUILD_TARGET");
    assert_eq!(calls[0].envs[0].1, "custom1");
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn failing_plugin_script_fails_the_run() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner {
        fail_on: Some("custom1 build script"),
        ..Default::default()
    };
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    let result = orchestrator.run_selection(&BuildOptions::default(), "5");

    assert!(matches!(result, Err(BuildError::ToolFailed { .. })));
    assert_eq!(runner.programs(), [temp_dir.path().join("platform/custom1/build.sh")]);
    let mut out = Vec::new();
    assert_eq!(finish(&result, &mut out), Status::Failed);
    assert!(String::from_utf8(out).unwrap().ends_with("[nano] error occurred\n"));
}

#[test]
fn invalid_selection_touches_nothing() {
    for input in ["6\n", "abc\n", "-1\n", "\n", ""] {
        let temp_dir = checkout();
        let before = tree_entries(temp_dir.path());
        let paths = ProjectPaths::new(temp_dir.path());
        let host = linux();
        let runner = RecordingRunner::default();
        let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

        let mut out = Vec::new();
        let result = orchestrator.run_interactive(&BuildOptions::default(), Cursor::new(input), &mut out);

        assert!(
            matches!(result, Err(BuildError::InvalidSelection { count: 6, .. })),
            "input {input:?}"
        );
        assert!(runner.calls.borrow().is_empty());
        assert_eq!(tree_entries(temp_dir.path()), before);
        assert_eq!(finish(&result, &mut Vec::new()), Status::Failed);
    }
}

#[test]
fn package_release_runs_distribution_targets() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    let outcome = orchestrator
        .run_selection(&BuildOptions::default().package(true).compile_target("base"), "1")
        .unwrap();

    assert!(matches!(outcome, BuildOutcome::Pipeline { packaged: true, .. }));
    let targets: Vec<String> = runner
        .args()
        .into_iter()
        .skip(1)
        .map(|a| a.last().cloned().unwrap())
        .collect();
    assert_eq!(targets, ["stable_deb", "stable_rpm"]);
}

#[test]
fn package_debug_fails_without_build_tool() {
    let temp_dir = checkout();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    let result = orchestrator.run_selection(&BuildOptions::new(BuildProfile::Debug).package(true), "0");

    assert!(matches!(result, Err(BuildError::PackageInDebug)));
    let ninja = temp_dir.path().join("tools/ninja");
    assert!(runner.programs().iter().all(|p| *p != ninja));
    assert_eq!(finish(&result, &mut Vec::new()), Status::Failed);
}

#[test]
fn override_file_is_appended() {
    let temp_dir = checkout();
    fs::write(temp_dir.path().join("args.gn"), "enable_nacl = false").unwrap();
    let paths = ProjectPaths::new(temp_dir.path());
    let host = linux();
    let runner = RecordingRunner::default();
    let orchestrator = Orchestrator::new(&paths, &host).runner(&runner);

    orchestrator
        .run_selection(&BuildOptions::default(), "2")
        .unwrap();

    let args = fs::read_to_string(temp_dir.path().join("out/mips64el/args.gn")).unwrap();
    assert!(args.ends_with("symbol_level = 0\n\nenable_nacl = false\n"));
}
