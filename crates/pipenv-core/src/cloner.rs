//! Per-environment clones of the project's manifest and lock
//!
//! Every build copies the authoritative project artifacts into the
//! environment's private directory under the canonical names, so commands
//! run during environment creation can never modify the project copies and
//! concurrent builds never share a file.

use crate::artifact::ResolutionResult;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use pipenv_fs::{NormalizedPath, io};
use std::fs;

/// Marker file every virtual environment carries
pub const VENV_MARKER: &str = "pyvenv.cfg";

/// Paths of the artifacts inside the environment directory after cloning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClonedArtifacts {
    pub manifest: Option<NormalizedPath>,
    pub lock: Option<NormalizedPath>,
}

/// Copy the project manifest and lock into `env_dir`.
///
/// The directory is created if this environment was never built. Existing
/// clones are overwritten, and a clone whose project artifact has since
/// disappeared is removed, so the environment always mirrors the project.
pub fn clone_artifacts(
    config: &EngineConfig,
    env_dir: &NormalizedPath,
    project: &ResolutionResult,
) -> Result<ClonedArtifacts> {
    io::ensure_dir(env_dir)?;

    let naming = &config.naming;
    let manifest = sync_clone(
        project.manifest_path(),
        &env_dir.join(naming.canonical_manifest()),
    )?;
    let lock = sync_clone(project.lock_path(), &env_dir.join(&naming.canonical_lock()))?;

    tracing::debug!(
        env_dir = %env_dir,
        manifest = ?manifest.as_ref().map(|p| p.as_str()),
        lock = ?lock.as_ref().map(|p| p.as_str()),
        "cloned artifacts"
    );

    Ok(ClonedArtifacts { manifest, lock })
}

/// Clone artifacts and guarantee that a manifest exists in `env_dir`.
///
/// pipenv refuses to run without a manifest even when installing purely
/// from a lock, so an empty one is written next to the cloned lock (or in
/// `env_dir` when there is no lock either).
pub fn ensure_manifest(
    config: &EngineConfig,
    env_dir: &NormalizedPath,
    project: &ResolutionResult,
) -> Result<ClonedArtifacts> {
    let mut cloned = clone_artifacts(config, env_dir, project)?;
    if cloned.manifest.is_none() {
        let dir = cloned
            .lock
            .as_ref()
            .and_then(NormalizedPath::parent)
            .unwrap_or_else(|| env_dir.clone());
        let manifest = dir.join(config.naming.canonical_manifest());
        io::touch(&manifest)?;
        tracing::debug!(manifest = %manifest, "materialized empty manifest");
        cloned.manifest = Some(manifest);
    }
    Ok(cloned)
}

/// Empty `env_dir` so a virtual environment can be created in it.
///
/// Refuses with [`Error::Configuration`] when `env_dir` holds the project
/// or the artifact root, or when it has content and is neither a virtual
/// environment nor a directory of clones.
pub fn reset_env_dir(
    config: &EngineConfig,
    env_name: &str,
    env_dir: &NormalizedPath,
) -> Result<()> {
    for protected in [&config.project_root, config.artifact_root()] {
        if protected.starts_with(env_dir) {
            return Err(Error::configuration(
                env_name,
                format!(
                    "refusing to recreate {}, it contains the project at {}",
                    env_dir, protected
                ),
            ));
        }
    }

    if env_dir.is_dir() && !is_recreatable(config, env_dir)? {
        return Err(Error::configuration(
            env_name,
            format!(
                "refusing to recreate {}, it is not empty and has no {}",
                env_dir, VENV_MARKER
            ),
        ));
    }

    io::make_empty_dir(env_dir)?;
    Ok(())
}

/// A virtual environment, or a directory holding nothing but clones.
fn is_recreatable(config: &EngineConfig, env_dir: &NormalizedPath) -> Result<bool> {
    if env_dir.join(VENV_MARKER).is_file() {
        return Ok(true);
    }
    let native = env_dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| pipenv_fs::Error::io(&native, e))?;
    let naming = &config.naming;
    let clones = [naming.canonical_manifest().to_string(), naming.canonical_lock()];
    for entry in entries {
        let entry = entry.map_err(|e| pipenv_fs::Error::io(&native, e))?;
        let name = entry.file_name();
        if !clones.iter().any(|clone| name.as_os_str() == clone.as_str()) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn sync_clone(
    source: Option<&NormalizedPath>,
    destination: &NormalizedPath,
) -> Result<Option<NormalizedPath>> {
    match source {
        Some(source) => {
            io::copy_atomic(source, destination)?;
            Ok(Some(destination.clone()))
        }
        None => {
            if destination.is_file() {
                fs::remove_file(destination.to_native())
                    .map_err(|e| pipenv_fs::Error::io(destination.to_native(), e))?;
                tracing::debug!(path = %destination, "removed stale clone");
            }
            Ok(None)
        }
    }
}
