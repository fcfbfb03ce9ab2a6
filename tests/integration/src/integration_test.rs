//! End-to-end integration test for the full engine
//!
//! Exercises the complete flow: settings file -> engine configuration ->
//! orchestrator hooks -> a real subprocess.

use pipenv_core::{
    EngineConfig, HostSettings, InstallOrchestrator, RecordingReporter, SystemRunner,
};
use pipenv_fs::{NormalizedPath, SettingsStore};
use pipenv_test_utils::TestProject;
use pretty_assertions::assert_eq;

const SETTINGS: &str = r#"
[env.py]
pip_pre = true
pipenv_install_opts = "--dev"

[env.lint]
skip_pipenv = true
deps = ["ruff"]

[env.docs]
envdir = "build/docs-env"
install_command = "python -m pipenv install --deploy {opts} {packages}"
deps = ["sphinx"]
"#;

fn load_settings(project: &TestProject) -> HostSettings {
    let path = NormalizedPath::new(project.write_settings(SETTINGS));
    SettingsStore::new().load(&path).unwrap()
}

#[test]
fn test_load_host_settings() {
    let project = TestProject::new();
    let host = load_settings(&project);
    let root = NormalizedPath::new(project.root());

    assert_eq!(host.names(), vec!["docs", "lint", "py"]);

    let py = host.environment("py");
    assert!(py.pip_pre);
    assert!(py.pipenv_venv);
    assert_eq!(py.pipenv_install_opts.as_deref(), Some("--dev"));
    assert_eq!(py.env_dir(&root), root.join(".tox/py"));

    let docs = host.environment("docs");
    assert_eq!(docs.env_dir(&root), root.join("build/docs-env"));
    assert!(docs.custom_install_command().is_some());

    // environments without a table still resolve
    let missing = host.environment("py311");
    assert_eq!(missing.name, "py311");
    assert!(!missing.skip_pipenv);
}

#[test]
fn test_yaml_settings_are_equivalent() {
    let project = TestProject::new();
    let path = NormalizedPath::new(project.write_file(
        "tox-pipenv.yaml",
        "env:\n  py:\n    pip_pre: true\n    pipenv_install_opts: --dev\n",
    ));

    let host: HostSettings = SettingsStore::new().load(&path).unwrap();
    let py = host.environment("py");
    assert!(py.pip_pre);
    assert_eq!(py.pipenv_install_opts.as_deref(), Some("--dev"));
}

#[cfg(unix)]
#[test]
fn test_settings_drive_the_subprocess() {
    let project = TestProject::new();
    project.write_pipfile("Pipfile");
    let host = load_settings(&project);
    let launcher = project.fake_launcher();
    let config = EngineConfig::new(project.root()).with_launcher(launcher.display().to_string());
    let reporter = RecordingReporter::new();
    let orchestrator = InstallOrchestrator::new(&config, &SystemRunner, &reporter);

    let py = host.environment("py");
    assert!(orchestrator.install_deps(&py, &py).unwrap().is_installed());

    let lint = host.environment("lint");
    assert!(!orchestrator.install_deps(&lint, &lint).unwrap().is_installed());

    let docs = host.environment("docs");
    assert!(orchestrator.install_deps(&docs, &docs).unwrap().is_installed());

    let calls = project.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].args, vec!["-m", "pipenv", "install", "--dev", "--pre"]);
    assert_eq!(
        calls[1].args,
        vec!["-m", "pipenv", "install", "--deploy", "sphinx"]
    );
    assert_eq!(calls[1].venv_name, "docs-env");
    project.assert_file_exists("build/docs-env/Pipfile");

    let labels: Vec<String> = reporter.activities().into_iter().map(|(l, _)| l).collect();
    assert_eq!(labels, vec!["pipenv", "pipenv", "pipenv"]);
}

#[cfg(unix)]
#[test]
fn test_create_install_report_lifecycle() {
    let project = TestProject::new();
    project.write_pipfile("Pipfile");
    project.write_lock("Pipfile.lock.py");
    let launcher = project.fake_launcher();
    let config = EngineConfig::new(project.root()).with_launcher(launcher.display().to_string());
    let reporter = RecordingReporter::new();
    let orchestrator = InstallOrchestrator::new(&config, &SystemRunner, &reporter);
    let settings = HostSettings::default().environment("py");

    orchestrator.create_env(&settings).unwrap();
    orchestrator.install_deps(&settings, &settings).unwrap();
    let graph = orchestrator.report(&settings, &settings).unwrap().unwrap();

    let subcommands: Vec<String> = project
        .invocations()
        .iter()
        .filter_map(|call| call.subcommand().map(String::from))
        .collect();
    assert_eq!(subcommands, vec!["--python", "sync", "graph"]);
    assert_eq!(
        graph,
        vec!["requests==2.31.0", "  - idna [required: >=2.5]"]
    );
}
