//! Manifest and lock artifact types

use pipenv_fs::NormalizedPath;
use serde::Serialize;

/// Where an artifact lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactScope {
    /// In the project root (or the override manifest's directory)
    Project,
    /// Cloned into an environment's private directory
    Environment,
}

/// Naming tier of a lock artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockTier {
    /// Scoped to one environment, e.g. `Pipfile.lock.py`
    EnvironmentSpecific,
    /// Shared by all environments, e.g. `Pipfile.lock`
    Shared,
}

/// A located dependency manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub path: NormalizedPath,
    pub scope: ArtifactScope,
}

/// A located lock artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockArtifact {
    pub path: NormalizedPath,
    pub tier: LockTier,
}

/// Outcome of looking for artifacts under one root.
///
/// Produced fresh for every lookup; artifacts may change between hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub manifest: Option<Manifest>,
    pub lock: Option<LockArtifact>,
}

impl ResolutionResult {
    /// Neither a manifest nor a lock was found
    pub fn is_empty(&self) -> bool {
        self.manifest.is_none() && self.lock.is_none()
    }

    pub fn manifest_path(&self) -> Option<&NormalizedPath> {
        self.manifest.as_ref().map(|m| &m.path)
    }

    pub fn lock_path(&self) -> Option<&NormalizedPath> {
        self.lock.as_ref().map(|l| &l.path)
    }
}
