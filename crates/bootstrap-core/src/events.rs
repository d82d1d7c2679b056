//! Structured pipeline events
//!
//! The pipeline reports progress through these instead of printing, so the
//! core stays observable without being coupled to an output format. Binaries
//! implement `EventSink` to render them; tests implement it to record them.

use crate::install::DependencyGroup;
use crate::request::PackageManager;
use std::path::PathBuf;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Materialize,
    Provision,
    Finalize,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Validate => "target validation",
            Stage::Materialize => "template materialization",
            Stage::Provision => "dependency installation",
            Stage::Finalize => "repository finalization",
        }
    }
}

/// Everything a presentation layer needs for the post-install instructions
#[derive(Debug, Clone)]
pub struct PostInstallSummary {
    pub project_name: String,
    /// Target path exactly as given on the command line
    pub target_path: PathBuf,
    /// Argument for the suggested `cd` command: the bare project name when
    /// the project sits directly under the invocation directory, otherwise
    /// the original path argument
    pub cd_path: String,
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone)]
pub enum BootstrapEvent {
    StageStarted(Stage),
    StageCompleted(Stage),
    /// A best-effort operation gave up; the pipeline continues
    StageDegraded { stage: Stage, reason: String },
    /// Validation passed, the project directory is about to be populated
    ProjectCreating { root: PathBuf },
    /// One attempt of the fast-mode cache restore is starting
    CacheRestoreAttempt { attempt: u32, total: u32 },
    /// A resolved-mode install invocation is starting
    InstallingDependencies {
        group: DependencyGroup,
        packages: Vec<String>,
    },
    /// Advisory git init succeeded
    RepositoryInitialized,
    Summary(PostInstallSummary),
}

/// Sink for pipeline events
pub trait EventSink {
    fn emit(&self, event: BootstrapEvent);
}

/// Sink that discards every event
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: BootstrapEvent) {}
}
