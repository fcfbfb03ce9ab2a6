//! Scenario tests: complete project layouts run through the engine with a
//! real subprocess standing in for pipenv.
#![cfg(unix)]

use pipenv_core::{
    EngineConfig, EnvSettings, Error, HookOutcome, InstallOrchestrator, RecordingReporter,
    SkipReason, SystemRunner,
};
use pipenv_fs::NormalizedPath;
use pipenv_test_utils::launcher::{EXIT_VAR, FRESH_LOCK};
use pipenv_test_utils::{Invocation, TestProject};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

struct Scenario {
    project: TestProject,
    config: EngineConfig,
    reporter: RecordingReporter,
}

impl Scenario {
    fn new(setup: impl FnOnce(&TestProject)) -> Self {
        Self::with_vars(setup, BTreeMap::new())
    }

    fn with_vars(setup: impl FnOnce(&TestProject), vars: BTreeMap<String, String>) -> Self {
        let project = TestProject::new();
        setup(&project);
        let launcher = project.fake_launcher();
        let cwd = NormalizedPath::new(project.root());
        let config = EngineConfig::from_vars(project.root(), vars, &cwd)
            .with_launcher(launcher.display().to_string());
        Self {
            project,
            config,
            reporter: RecordingReporter::new(),
        }
    }

    fn install(&self, settings: &EnvSettings) -> pipenv_core::Result<HookOutcome> {
        InstallOrchestrator::new(&self.config, &SystemRunner, &self.reporter)
            .install_deps(settings, settings)
    }

    fn calls(&self) -> Vec<Invocation> {
        self.project.invocations()
    }
}

fn same_dir(left: &str, right: &Path) -> bool {
    fs::canonicalize(left).unwrap() == fs::canonicalize(right).unwrap()
}

#[test]
fn scenario_manifest_only_fresh_environment() {
    let scenario = Scenario::new(|p| {
        p.write_pipfile("Pipfile");
    });
    assert!(!scenario.project.env_dir("py").exists());

    let outcome = scenario.install(&EnvSettings::new("py")).unwrap();

    let HookOutcome::Installed { runs, .. } = outcome else {
        panic!("expected install");
    };
    assert_eq!(runs.len(), 1);
    assert!(runs[0].plan.options.is_empty());
    assert!(runs[0].plan.packages.is_empty());

    let calls = scenario.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].subcommand(), Some("install"));
    assert!(same_dir(&calls[0].cwd, &scenario.project.path(".tox")));
    assert!(same_dir(&calls[0].virtual_env, &scenario.project.env_dir("py")));
}

#[test]
fn scenario_env_lock_syncs() {
    let scenario = Scenario::new(|p| {
        p.write_pipfile("Pipfile");
        p.write_lock("Pipfile.lock.py");
    });

    scenario.install(&EnvSettings::new("py")).unwrap();

    let calls = scenario.calls();
    assert_eq!(calls[0].args, vec!["-m", "pipenv", "sync"]);
    let (_, detail) = &scenario.reporter.activities()[0];
    assert!(detail.ends_with("/.tox/py/Pipfile.lock>"), "{detail}");
}

#[test]
fn scenario_skip_pipenv_is_read_only() {
    let scenario = Scenario::new(|p| {
        p.write_pipfile("Pipfile");
    });
    let mut settings = EnvSettings::new("py");
    settings.skip_pipenv = true;

    let outcome = scenario.install(&settings).unwrap();

    assert!(matches!(
        outcome,
        HookOutcome::NotRun(SkipReason::Disabled { .. })
    ));
    assert!(scenario.calls().is_empty());
    scenario.project.assert_file_not_exists(".tox");
}

#[test]
fn scenario_no_artifacts_never_invokes() {
    let scenario = Scenario::new(|_| {});

    let outcome = scenario.install(&EnvSettings::new("py")).unwrap();

    assert!(!outcome.is_installed());
    assert!(scenario.calls().is_empty());
}

#[test]
fn scenario_update_without_manifest_fails() {
    let mut scenario = Scenario::new(|p| {
        p.write_lock("Pipfile.lock.py");
    });
    scenario.config = scenario.config.clone().with_update(true);

    let err = scenario.install(&EnvSettings::new("py")).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(scenario.calls().is_empty());
}

#[test]
fn scenario_update_round_trips_lock() {
    let mut scenario = Scenario::new(|p| {
        p.write_pipfile("Pipfile");
        p.write_lock("Pipfile.lock.py");
    });
    scenario.config = scenario.config.clone().with_update(true);

    scenario.install(&EnvSettings::new("py")).unwrap();

    assert_eq!(scenario.calls()[0].subcommand(), Some("update"));
    scenario
        .project
        .assert_same_bytes(".tox/py/Pipfile.lock", "Pipfile.lock.py");
    scenario
        .project
        .assert_file_contains("Pipfile.lock.py", FRESH_LOCK);
}

#[test]
fn scenario_install_command_from_environment_variable() {
    let vars = [
        (
            "TOX_PIPENV_INSTALL_CMD".to_string(),
            "python -m pipenv install --deploy {opts}".to_string(),
        ),
        ("TOX_PIPENV_INSTALL_OPTS".to_string(), "--dev".to_string()),
    ]
    .into_iter()
    .collect();
    let scenario = Scenario::with_vars(
        |p| {
            p.write_pipfile("Pipfile");
        },
        vars,
    );

    scenario.install(&EnvSettings::new("py")).unwrap();

    assert_eq!(
        scenario.calls()[0].args,
        vec!["-m", "pipenv", "install", "--deploy", "--dev"]
    );
}

#[test]
fn scenario_process_failure_is_reported() {
    let vars = [(EXIT_VAR.to_string(), "4".to_string())]
        .into_iter()
        .collect();
    let scenario = Scenario::with_vars(
        |p| {
            p.write_pipfile("Pipfile");
        },
        vars,
    );

    let err = scenario.install(&EnvSettings::new("py")).unwrap_err();

    match err {
        Error::ProcessFailure { code, stderr, .. } => {
            assert_eq!(code, Some(4));
            assert!(stderr.contains("fake pipenv failed"));
        }
        other => panic!("expected process failure, got {other:?}"),
    }
}
