//! Artifact lookup under a single root

use crate::artifact::{ArtifactScope, LockArtifact, Manifest, ResolutionResult};
use crate::config::LockCandidate;
use pipenv_fs::NormalizedPath;

/// Find a manifest and a lock under `root`.
///
/// Manifest candidates are tried in order and the first existing file
/// wins. Lock candidates likewise; callers order them so the
/// environment-specific tier shadows the shared one. Missing files are a
/// normal outcome and yield `None`.
pub fn locate(
    root: &NormalizedPath,
    scope: ArtifactScope,
    manifest_candidates: &[String],
    lock_candidates: &[LockCandidate],
) -> ResolutionResult {
    let manifest = manifest_candidates
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .map(|path| Manifest { path, scope });

    let lock = lock_candidates
        .iter()
        .map(|candidate| (root.join(&candidate.name), candidate.tier))
        .find(|(path, _)| path.is_file())
        .map(|(path, tier)| LockArtifact { path, tier });

    tracing::debug!(
        root = %root,
        manifest = ?manifest.as_ref().map(|m| m.path.as_str()),
        lock = ?lock.as_ref().map(|l| l.path.as_str()),
        "located artifacts"
    );

    ResolutionResult { manifest, lock }
}
