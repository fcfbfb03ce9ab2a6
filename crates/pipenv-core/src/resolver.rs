//! Authoritative manifest/lock resolution for an environment

use crate::artifact::{ArtifactScope, LockTier, ResolutionResult};
use crate::config::{EngineConfig, LockCandidate};
use crate::locator::locate;
use pipenv_fs::NormalizedPath;

/// Locate the project's manifest and lock for `env_name`.
///
/// The lookup root is the override manifest's directory when
/// `PIPENV_PIPFILE` is set, otherwise the project root. `Pipfile_{env}`
/// shadows `Pipfile`; `Pipfile.lock.{env}` shadows the shared lock, which
/// is only considered in single-manifest mode.
pub fn resolve_project_artifacts(config: &EngineConfig, env_name: &str) -> ResolutionResult {
    let naming = &config.naming;
    locate(
        config.artifact_root(),
        ArtifactScope::Project,
        &naming.manifest_candidates(env_name),
        &naming.lock_candidates(env_name),
    )
}

/// Locate the cloned manifest and lock inside an environment directory.
///
/// The directory is already environment-scoped, so only the canonical
/// names are tried.
pub fn resolve_environment_artifacts(
    config: &EngineConfig,
    env_dir: &NormalizedPath,
) -> ResolutionResult {
    let naming = &config.naming;
    locate(
        env_dir,
        ArtifactScope::Environment,
        &[naming.canonical_manifest().to_string()],
        &[LockCandidate {
            name: naming.canonical_lock(),
            tier: LockTier::EnvironmentSpecific,
        }],
    )
}

/// Every project artifact name the lookup tries, for skip reasons.
pub fn tried_names(config: &EngineConfig, env_name: &str) -> Vec<String> {
    let naming = &config.naming;
    naming
        .manifest_candidates(env_name)
        .into_iter()
        .chain(naming.lock_candidates(env_name).into_iter().map(|c| c.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingScheme;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_project_lookup_uses_override_parent() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        fs::write(project.path().join("Pipfile"), "").unwrap();
        fs::write(elsewhere.path().join("Pabstfile"), "").unwrap();

        let override_path = elsewhere.path().join("Pabstfile");
        let naming = NamingScheme::from_override(
            override_path.to_str(),
            &NormalizedPath::new(project.path()),
        );
        let config = EngineConfig::new(project.path()).with_naming(naming);

        let result = resolve_project_artifacts(&config, "py");
        assert_eq!(
            result.manifest_path(),
            Some(&NormalizedPath::new(elsewhere.path().join("Pabstfile")))
        );
    }

    #[test]
    fn test_environment_lookup_uses_canonical_names() {
        let env_dir = TempDir::new().unwrap();
        fs::write(env_dir.path().join("Pipfile"), "").unwrap();
        fs::write(env_dir.path().join("Pipfile.lock"), "").unwrap();
        fs::write(env_dir.path().join("Pipfile_py"), "").unwrap();

        let config = EngineConfig::new("/unused");
        let root = NormalizedPath::new(env_dir.path());
        let result = resolve_environment_artifacts(&config, &root);

        assert_eq!(result.manifest_path(), Some(&root.join("Pipfile")));
        assert_eq!(result.lock_path(), Some(&root.join("Pipfile.lock")));
        assert_eq!(result.manifest.unwrap().scope, ArtifactScope::Environment);
    }

    #[test]
    fn test_tried_names() {
        let config = EngineConfig::new("/p");
        assert_eq!(
            tried_names(&config, "py"),
            vec!["Pipfile_py", "Pipfile", "Pipfile.lock.py"]
        );
    }
}
