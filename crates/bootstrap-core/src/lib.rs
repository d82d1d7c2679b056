//! Bootstrap Core - Shared library for the `create-ksext` CLI
//!
//! This library implements the one-shot pipeline that turns a target path into
//! a ready-to-use KubeSphere extension project: validate the destination,
//! materialize the bundled template, install dependencies, and best-effort
//! initialize a git repository.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Collaborators** - Thin filesystem primitives (`fsops`), the
//!   package-manager client (`install`), and the version-control initializer
//!   (`vcs`). Each is a small, independently testable contract.
//! - **Layer 2: Pipeline Orchestration** - `pipeline::bootstrap` sequences the
//!   four stages and owns the partial-failure policy: validation and
//!   resolved-mode install failures are fatal, fast-mode cache restores and
//!   git init degrade gracefully.
//! - **Layer 3: Presentation** - The pipeline never prints. It emits
//!   `BootstrapEvent`s through an `EventSink`, and binaries decide how to
//!   render them.
//!
//! # Example Usage
//!
//! ```ignore
//! use bootstrap_core::{
//!     bootstrap, BootstrapRequest, CommandInstaller, Git, InstallStrategy,
//!     NullSink, PackageManager, TemplateSource,
//! };
//!
//! let request = BootstrapRequest {
//!     target_path: "my-extensions".into(),
//!     package_manager: PackageManager::Yarn,
//!     strategy: InstallStrategy::Resolved,
//! };
//! bootstrap(&request, &TemplateSource::Embedded, &CommandInstaller, &Git, &NullSink).await?;
//! ```

pub mod error;
pub mod events;
pub mod fsops;
pub mod install;
pub mod pipeline;
pub mod request;
pub mod template;
pub mod vcs;

// Re-export main types for convenience
pub use error::BootstrapError;
pub use events::{BootstrapEvent, EventSink, NullSink, PostInstallSummary, Stage};
pub use install::{CommandInstaller, DependencyGroup, InstallFlags, PackageInstaller};
pub use pipeline::bootstrap;
pub use request::{BootstrapRequest, InstallStrategy, PackageManager, ResolvedTarget};
pub use template::TemplateSource;
pub use vcs::{Git, VcsInit};
