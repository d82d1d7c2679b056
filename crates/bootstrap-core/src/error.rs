//! Fatal error taxonomy for the bootstrap pipeline
//!
//! Only failures that abort the run live here. Best-effort failures
//! (fast-mode cache restore exhaustion, git init) are absorbed inside the
//! pipeline and surface as `StageDegraded` events instead.

use crate::install::DependencyGroup;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The parent of the target directory cannot be written to. Nothing
    /// later in the pipeline can succeed, so this fails fast.
    #[error(
        "the project path {} is not writable, please check folder permissions and try again",
        .path.display()
    )]
    UnwritablePath { path: PathBuf },

    /// The target directory already contains entries that the template
    /// would conflict with. Overwriting user data is never acceptable.
    #[error(
        "the directory {} contains files that could conflict: {conflicts}",
        .path.display()
    )]
    TargetNotEmpty { path: PathBuf, conflicts: String },

    /// Copying the template tree failed part-way. No cleanup is attempted.
    #[error("failed to copy template files: {source}")]
    Template { source: io::Error },

    /// The bundled dependency manifest is missing or malformed.
    #[error("failed to read template dependency manifest: {reason}")]
    Manifest { reason: anyhow::Error },

    /// A resolved-mode install invocation failed. Resolved mode is
    /// all-or-nothing: install succeeded or the run failed.
    #[error("failed to install {group} dependencies: {reason}")]
    Install {
        group: DependencyGroup,
        reason: anyhow::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
