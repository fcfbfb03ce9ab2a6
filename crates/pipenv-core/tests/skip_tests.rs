//! Tests for the skip policy

use pipenv_core::resolver::resolve_project_artifacts;
use pipenv_core::skip::{evaluate, skip_reason};
use pipenv_core::{EngineConfig, EnvSettings, Error, SkipDecision, SkipReason};
use pipenv_test_utils::TestProject;
use rstest::rstest;

fn settings(configure: impl FnOnce(&mut EnvSettings)) -> EnvSettings {
    let mut settings = EnvSettings::new("py");
    configure(&mut settings);
    settings
}

#[rstest]
#[case::proceeds_with_manifest(true, settings(|_| {}), &[], None)]
#[case::disabled(true, settings(|s| s.skip_pipenv = true), &[], Some("skip_pipenv = true"))]
#[case::custom_without_tool(
    true,
    settings(|s| s.install_command = Some("pip install {packages}".into())),
    &[],
    Some("doesn't contain `pipenv`")
)]
#[case::custom_with_tool_ignores_missing_artifacts(
    false,
    settings(|s| s.install_command = Some("pipenv install {opts} {packages}".into())),
    &["pytest"],
    None
)]
#[case::default_command_is_not_custom(
    true,
    settings(|s| s.install_command = Some("python -m pip install {opts} {packages}".into())),
    &["pytest"],
    Some("has `deps = [\"pytest\"]`, and does not define an install_command")
)]
#[case::no_artifacts(false, settings(|_| {}), &[], Some("none of"))]
fn test_install_policy(
    #[case] with_manifest: bool,
    #[case] settings: EnvSettings,
    #[case] deps: &[&str],
    #[case] expected: Option<&str>,
) {
    let project = TestProject::new();
    if with_manifest {
        project.write_pipfile("Pipfile");
    }
    let config = EngineConfig::new(project.root());
    let deps: Vec<String> = deps.iter().map(|d| d.to_string()).collect();
    let resolution = resolve_project_artifacts(&config, "py");

    let reason = skip_reason(&config, &settings, &deps, &resolution).unwrap();

    match (reason, expected) {
        (None, None) => {}
        (Some(reason), Some(fragment)) => assert!(
            reason.to_string().contains(fragment),
            "{reason} does not contain {fragment}"
        ),
        (reason, expected) => panic!("expected {expected:?}, got {reason:?}"),
    }
}

#[test]
fn test_env_var_command_beats_environment_setting() {
    let project = TestProject::new();
    project.write_pipfile("Pipfile");
    let mut config = EngineConfig::new(project.root());
    config.install_command_override = Some("echo {packages}".to_string());
    let settings = settings(|s| s.install_command = Some("pipenv install".into()));
    let resolution = resolve_project_artifacts(&config, "py");

    let decision = evaluate(&config, &settings, &[], &resolution);

    assert!(matches!(
        decision,
        SkipDecision::Skip(SkipReason::CustomCommandWithoutTool { .. })
    ));
}

#[test]
fn test_update_with_foreign_custom_command_is_configuration_error() {
    let project = TestProject::new();
    project.write_pipfile("Pipfile");
    let config = EngineConfig::new(project.root()).with_update(true);
    let settings = settings(|s| s.install_command = Some("pip install {packages}".into()));
    let resolution = resolve_project_artifacts(&config, "py");

    match evaluate(&config, &settings, &[], &resolution) {
        SkipDecision::Fail(Error::Configuration { env, message }) => {
            assert_eq!(env, "py");
            assert!(message.starts_with("--pipenv-update is specified, but custom"));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}
