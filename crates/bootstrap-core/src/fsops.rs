//! Thin filesystem primitives used by the bootstrap pipeline

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Entries that may already exist in a target directory without blocking
/// bootstrap. Editor droppings, VCS metadata, and docs are harmless; the
/// template never ships files with these names.
const BENIGN_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    "LICENSE",
    "README.md",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
];

/// Check whether the directory at `path` accepts writes.
///
/// Permission bits alone miss effective access (ownership, ACLs, a
/// privileged user), so this probes by creating and removing a
/// uniquely-named transient file. The directory is left as it was found.
pub fn is_writeable(path: &Path) -> bool {
    if fs::metadata(path).is_err() {
        return false;
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let probe = path.join(format!(".writeable-probe-{}-{}", std::process::id(), nanos));
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Create `path` and any missing parents. Succeeds when it already exists
/// as a directory, fails when something non-directory is in the way.
pub fn make_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Pre-existing entries in `path` that would conflict with template files,
/// sorted for deterministic messages
pub fn folder_conflicts(path: &Path) -> io::Result<Vec<String>> {
    let mut conflicts = Vec::new();
    for entry in fs::read_dir(path)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if BENIGN_ENTRIES.contains(&name.as_str()) {
            continue;
        }
        // IntelliJ project files are harmless leftovers
        if name.ends_with(".iml") {
            continue;
        }
        conflicts.push(name);
    }
    conflicts.sort();
    Ok(conflicts)
}

/// Check the folder contains nothing that would conflict with a fresh project
pub fn is_folder_empty(path: &Path) -> io::Result<bool> {
    Ok(folder_conflicts(path)?.is_empty())
}

/// Recursively copy the contents of `src` into `dst`, preserving directory
/// structure. `dst` must already exist.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_make_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b");
        make_dir(&target).unwrap();
        make_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_empty_folder_has_no_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_folder_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_benign_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("LICENSE")).unwrap();
        File::create(dir.path().join(".DS_Store")).unwrap();
        File::create(dir.path().join("project.iml")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_folder_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_conflicting_entries_are_reported_sorted() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("package.json")).unwrap();
        File::create(dir.path().join("index.js")).unwrap();
        let conflicts = folder_conflicts(dir.path()).unwrap();
        assert_eq!(conflicts, vec!["index.js", "package.json"]);
        assert!(!is_folder_empty(dir.path()).unwrap());
    }

    #[test]
    fn test_copy_dir_preserves_structure() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("src/nested")).unwrap();
        let mut f = File::create(src.path().join("src/nested/app.js")).unwrap();
        f.write_all(b"export default {};").unwrap();
        File::create(src.path().join("package.json")).unwrap();

        copy_dir(src.path(), dst.path()).unwrap();

        assert!(dst.path().join("package.json").is_file());
        let copied = fs::read_to_string(dst.path().join("src/nested/app.js")).unwrap();
        assert_eq!(copied, "export default {};");
    }

    #[cfg(unix)]
    #[test]
    fn test_readonly_directory_is_not_writeable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // a privileged user can write regardless of mode bits; the probe
        // must agree with actual access, so there is nothing to lock down
        if fs::write(locked.join("x"), b"x").is_ok() {
            fs::remove_file(locked.join("x")).unwrap();
            assert!(is_writeable(&locked));
        } else {
            assert!(!is_writeable(&locked));
        }

        // restore so the tempdir can be cleaned up
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_writeable(&locked));
    }

    #[test]
    fn test_writeable_probe_leaves_directory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_writeable(dir.path()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_path_is_not_writeable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_writeable(&dir.path().join("does-not-exist")));
    }
}
