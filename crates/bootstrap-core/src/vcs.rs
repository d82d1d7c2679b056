//! Best-effort version-control initialization
//!
//! Git is a convenience, never a requirement: `try_init` reports success or
//! failure as a bool and must not error or abort the run.

use std::path::Path;
use std::process::{Command, Stdio};

/// Seam for version-control initialization
pub trait VcsInit {
    /// Attempt to create a repository in `root`. Advisory only.
    fn try_init(&self, root: &Path) -> bool;
}

/// Git-backed implementation
pub struct Git;

impl Git {
    fn git(root: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn inside_existing_repo(root: &Path) -> bool {
        Self::git(root, &["rev-parse", "--is-inside-work-tree"])
    }
}

impl VcsInit for Git {
    fn try_init(&self, root: &Path) -> bool {
        if !Self::git(root, &["--version"]) {
            return false;
        }
        // Nesting a repository inside an existing work tree helps nobody
        if Self::inside_existing_repo(root) {
            return false;
        }

        let created = Self::git(root, &["init"]);
        if created
            && Self::git(root, &["add", "-A"])
            && Self::git(root, &["commit", "-m", "Initial commit from create-ksext"])
        {
            return true;
        }

        // Do not leave a half-created repository behind
        if created {
            let _ = std::fs::remove_dir_all(root.join(".git"));
        }
        false
    }
}
