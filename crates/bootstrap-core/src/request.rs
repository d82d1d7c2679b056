//! Request descriptors passed through the bootstrap pipeline

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// The executable name
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Render the command line that runs a package.json script.
    /// Yarn runs scripts directly; npm and pnpm need `run`.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Yarn => format!("yarn {}", script),
            _ => format!("{} run {}", self.as_str(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dependency provisioning strategy.
///
/// The failure policy is a property of the variant: `Fast` is best-effort
/// (a failed cache restore is absorbed after bounded retries), `Resolved`
/// is all-or-nothing (an install failure aborts the run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStrategy {
    /// Restore dependencies from the package manager's local cache
    Fast,
    /// Resolve and install the template manifest's dependency groups
    Resolved,
}

/// Everything the pipeline needs to know, fixed at invocation
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// Target directory exactly as given on the command line
    pub target_path: PathBuf,
    pub package_manager: PackageManager,
    pub strategy: InstallStrategy,
}

/// Validated destination, derived once in the first stage
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// Absolute path of the project directory
    pub root: PathBuf,
    /// Final path segment of `root`
    pub project_name: String,
    /// Working directory at invocation time, before the pipeline chdirs
    pub original_dir: PathBuf,
}
