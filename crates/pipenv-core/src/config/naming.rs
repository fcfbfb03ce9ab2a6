//! Manifest and lock naming conventions

use crate::artifact::LockTier;
use pipenv_fs::NormalizedPath;

/// Manifest file name used when no override is configured
pub const DEFAULT_MANIFEST: &str = "Pipfile";

/// A lock file name to try, with the tier it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockCandidate {
    pub name: String,
    pub tier: LockTier,
}

/// Naming convention for manifest and lock artifacts.
///
/// Without an override, project artifacts are named `Pipfile_{env}` or
/// `Pipfile`, and `Pipfile.lock.{env}`. An override path (`PIPENV_PIPFILE`)
/// switches to single-manifest mode: the override's file name becomes the
/// base name, its directory becomes the lookup root, and the shared
/// `{base}.lock` is accepted when no environment-specific lock exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    base: String,
    override_parent: Option<NormalizedPath>,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            base: DEFAULT_MANIFEST.to_string(),
            override_parent: None,
        }
    }
}

impl NamingScheme {
    /// Build the scheme from an override manifest path.
    ///
    /// An empty or missing override gives the default scheme. A relative
    /// override is resolved against `cwd`.
    pub fn from_override(override_path: Option<&str>, cwd: &NormalizedPath) -> Self {
        let Some(raw) = override_path.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        let path = if std::path::Path::new(raw).is_absolute() || raw.starts_with('/') {
            NormalizedPath::new(raw)
        } else {
            cwd.join(raw)
        };

        match (path.file_name(), path.parent()) {
            (Some(name), Some(parent)) => Self {
                base: name.to_string(),
                override_parent: Some(parent),
            },
            _ => {
                tracing::warn!(path = raw, "ignoring manifest override without a file name");
                Self::default()
            }
        }
    }

    /// The manifest base name (`Pipfile` or the override's file name)
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Directory of the override manifest, when one is configured
    pub fn override_parent(&self) -> Option<&NormalizedPath> {
        self.override_parent.as_ref()
    }

    /// True when a global override manifest path is configured
    pub fn is_single_manifest(&self) -> bool {
        self.override_parent.is_some()
    }

    /// Project manifest names to try, environment-specific first.
    pub fn manifest_candidates(&self, env_name: &str) -> Vec<String> {
        vec![format!("{}_{}", self.base, env_name), self.base.clone()]
    }

    /// Environment-specific lock name: `{base}.lock.{env}`
    pub fn env_lock_name(&self, env_name: &str) -> String {
        format!("{}.lock.{}", self.base, env_name)
    }

    /// Shared lock name: `{base}.lock`
    pub fn shared_lock_name(&self) -> String {
        format!("{}.lock", self.base)
    }

    /// Project lock names to try.
    ///
    /// The shared lock is only a candidate in single-manifest mode.
    pub fn lock_candidates(&self, env_name: &str) -> Vec<LockCandidate> {
        let mut candidates = vec![LockCandidate {
            name: self.env_lock_name(env_name),
            tier: LockTier::EnvironmentSpecific,
        }];
        if self.is_single_manifest() {
            candidates.push(LockCandidate {
                name: self.shared_lock_name(),
                tier: LockTier::Shared,
            });
        }
        candidates
    }

    /// Manifest name inside an environment directory
    pub fn canonical_manifest(&self) -> &str {
        &self.base
    }

    /// Lock name inside an environment directory
    pub fn canonical_lock(&self) -> String {
        self.shared_lock_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> NormalizedPath {
        NormalizedPath::new("/work")
    }

    #[test]
    fn test_default_scheme() {
        let scheme = NamingScheme::from_override(None, &cwd());
        assert_eq!(scheme.base(), "Pipfile");
        assert!(scheme.override_parent().is_none());
        assert_eq!(
            scheme.manifest_candidates("py"),
            vec!["Pipfile_py".to_string(), "Pipfile".to_string()]
        );
        assert_eq!(scheme.env_lock_name("py"), "Pipfile.lock.py");
        assert_eq!(scheme.canonical_lock(), "Pipfile.lock");
    }

    #[test]
    fn test_empty_override_is_default() {
        assert_eq!(
            NamingScheme::from_override(Some(""), &cwd()),
            NamingScheme::default()
        );
    }

    #[test]
    fn test_relative_override_uses_cwd() {
        let scheme = NamingScheme::from_override(Some("Poopfile"), &cwd());
        assert_eq!(scheme.base(), "Poopfile");
        assert_eq!(scheme.override_parent().map(|p| p.as_str()), Some("/work"));
        assert_eq!(scheme.canonical_lock(), "Poopfile.lock");
    }

    #[test]
    fn test_absolute_override() {
        let scheme = NamingScheme::from_override(Some("/tmp/foo/bar/Pabstfile"), &cwd());
        assert_eq!(scheme.base(), "Pabstfile");
        assert_eq!(
            scheme.override_parent().map(|p| p.as_str()),
            Some("/tmp/foo/bar")
        );
        assert_eq!(
            scheme.manifest_candidates("py"),
            vec!["Pabstfile_py".to_string(), "Pabstfile".to_string()]
        );
    }

    #[test]
    fn test_shared_lock_only_in_single_manifest_mode() {
        let default = NamingScheme::default();
        assert_eq!(default.lock_candidates("py").len(), 1);

        let single = NamingScheme::from_override(Some("/p/Pipfile"), &cwd());
        let candidates = single.lock_candidates("py");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Pipfile.lock.py");
        assert_eq!(candidates[0].tier, LockTier::EnvironmentSpecific);
        assert_eq!(candidates[1].name, "Pipfile.lock");
        assert_eq!(candidates[1].tier, LockTier::Shared);
    }
}
