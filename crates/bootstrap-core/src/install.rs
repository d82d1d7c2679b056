//! Package-manager client
//!
//! The pipeline talks to the package manager through the `PackageInstaller`
//! trait so tests can substitute a recording stub. The real implementation
//! shells out to npm, yarn, or pnpm. Argument construction is split into
//! pure functions so the invocation shape is unit-testable without spawning
//! anything.

use crate::request::PackageManager;
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Dependency group being installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyGroup {
    Runtime,
    Development,
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyGroup::Runtime => write!(f, "runtime"),
            DependencyGroup::Development => write!(f, "development"),
        }
    }
}

/// Configuration for one install invocation, constructed per dependency group
#[derive(Debug, Clone, Copy)]
pub struct InstallFlags {
    pub package_manager: PackageManager,
    pub is_online: bool,
    pub dev_dependencies: bool,
}

/// Seam between the pipeline and the real package manager
pub trait PackageInstaller {
    /// Install explicit `name@version` specs into `root`
    fn install(&self, root: &Path, packages: &[String], flags: &InstallFlags) -> Result<()>;

    /// Restore the project's dependencies from the package manager's local
    /// cache, without hitting the registry
    fn install_from_cache(&self, root: &Path, package_manager: PackageManager) -> Result<()>;
}

/// Build the argument vector for an explicit install
pub fn install_args(packages: &[String], flags: &InstallFlags) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    match flags.package_manager {
        PackageManager::Yarn => {
            args.push("add".into());
            args.push("--exact".into());
            if !flags.is_online {
                args.push("--offline".into());
            }
            args.extend(packages.iter().cloned());
            if flags.dev_dependencies {
                args.push("--dev".into());
            }
        }
        PackageManager::Npm | PackageManager::Pnpm => {
            args.push("install".into());
            args.push("--save-exact".into());
            if !flags.is_online {
                args.push("--prefer-offline".into());
            }
            args.extend(packages.iter().cloned());
            if flags.dev_dependencies {
                args.push("--save-dev".into());
            }
        }
    }
    args
}

/// Build the argument vector for a cache-only restore
pub fn cache_restore_args(package_manager: PackageManager) -> Vec<String> {
    match package_manager {
        PackageManager::Yarn => vec!["install".into(), "--offline".into()],
        PackageManager::Npm | PackageManager::Pnpm => {
            vec!["install".into(), "--prefer-offline".into()]
        }
    }
}

/// Installer that shells out to the real package manager
pub struct CommandInstaller;

impl CommandInstaller {
    fn run(command: &str, args: &[String], root: &Path) -> Result<()> {
        let status = Command::new(command)
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("failed to spawn `{}`", command))?;
        if !status.success() {
            bail!("`{} {}` exited with {}", command, args.join(" "), status);
        }
        Ok(())
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, root: &Path, packages: &[String], flags: &InstallFlags) -> Result<()> {
        let args = install_args(packages, flags);
        Self::run(flags.package_manager.as_str(), &args, root)
    }

    fn install_from_cache(&self, root: &Path, package_manager: PackageManager) -> Result<()> {
        let args = cache_restore_args(package_manager);
        Self::run(package_manager.as_str(), &args, root)
    }
}
