//! The bootstrap orchestration pipeline
//!
//! Four stages, strictly forward, no branching back:
//!
//! 1. Target resolution & validation (fatal on unwritable parent or
//!    conflicting entries)
//! 2. Template materialization (fatal on I/O error, no rollback)
//! 3. Dependency provisioning (fast strategy: bounded retry, absorbed on
//!    exhaustion; resolved strategy: single attempt per group, fatal)
//! 4. Repository finalization (advisory git init, post-install summary)

use crate::error::BootstrapError;
use crate::events::{BootstrapEvent, EventSink, PostInstallSummary, Stage};
use crate::fsops;
use crate::install::{DependencyGroup, InstallFlags, PackageInstaller};
use crate::request::{BootstrapRequest, InstallStrategy, ResolvedTarget};
use crate::template::{self, TemplateSource};
use crate::vcs::VcsInit;
use std::time::Duration;

/// Total attempts for the fast-mode cache restore
const CACHE_RESTORE_ATTEMPTS: u32 = 3;

/// Delay before the first cache-restore retry, doubled after each failure
const CACHE_RESTORE_BACKOFF: Duration = Duration::from_millis(250);

/// Run the whole bootstrap pipeline for one request.
///
/// Returns `Ok(())` for every run that produced a usable project directory,
/// including runs where best-effort steps (fast-mode install, git init)
/// degraded. Errors are the fatal taxonomy of [`BootstrapError`].
pub async fn bootstrap<I, V, E>(
    request: &BootstrapRequest,
    template: &TemplateSource,
    installer: &I,
    vcs: &V,
    events: &E,
) -> Result<(), BootstrapError>
where
    I: PackageInstaller,
    V: VcsInit,
    E: EventSink,
{
    let target = resolve_target(request, events)?;
    materialize(template, &target, events)?;
    provision(request, template, &target, installer, events).await?;
    finalize(request, &target, vcs, events);
    Ok(())
}

/// Stage 1: resolve the destination, fail fast if bootstrapping cannot
/// proceed, and chdir into the created directory.
fn resolve_target<E: EventSink>(
    request: &BootstrapRequest,
    events: &E,
) -> Result<ResolvedTarget, BootstrapError> {
    events.emit(BootstrapEvent::StageStarted(Stage::Validate));

    let original_dir = std::env::current_dir()?;
    let root = std::path::absolute(&request.target_path)?;

    let parent = root.parent().unwrap_or(&root);
    if !fsops::is_writeable(parent) {
        return Err(BootstrapError::UnwritablePath {
            path: parent.to_path_buf(),
        });
    }

    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    fsops::make_dir(&root)?;

    let conflicts = fsops::folder_conflicts(&root)?;
    if !conflicts.is_empty() {
        return Err(BootstrapError::TargetNotEmpty {
            path: root,
            conflicts: conflicts.join(", "),
        });
    }

    events.emit(BootstrapEvent::ProjectCreating { root: root.clone() });

    // Later stages resolve relative paths against the project root
    std::env::set_current_dir(&root)?;

    events.emit(BootstrapEvent::StageCompleted(Stage::Validate));
    Ok(ResolvedTarget {
        root,
        project_name,
        original_dir,
    })
}

/// Stage 2: populate the target with the template skeleton and apply the
/// dotfile rename rules. Any copy failure aborts; partially written trees
/// are left as-is.
fn materialize<E: EventSink>(
    template: &TemplateSource,
    target: &ResolvedTarget,
    events: &E,
) -> Result<(), BootstrapError> {
    events.emit(BootstrapEvent::StageStarted(Stage::Materialize));

    template
        .materialize(&target.root)
        .map_err(|source| BootstrapError::Template { source })?;
    template::apply_rename_rules(&target.root)?;

    events.emit(BootstrapEvent::StageCompleted(Stage::Materialize));
    Ok(())
}

/// Stage 3: install dependencies with the strategy chosen at invocation.
async fn provision<I, E>(
    request: &BootstrapRequest,
    template: &TemplateSource,
    target: &ResolvedTarget,
    installer: &I,
    events: &E,
) -> Result<(), BootstrapError>
where
    I: PackageInstaller,
    E: EventSink,
{
    events.emit(BootstrapEvent::StageStarted(Stage::Provision));

    match request.strategy {
        InstallStrategy::Fast => {
            // Best-effort: a flaky cache must never block project creation.
            // Bounded retry written out at the call site so the
            // absorb-after-exhaustion policy stays visible.
            let mut delay = CACHE_RESTORE_BACKOFF;
            let mut attempt = 1;
            loop {
                events.emit(BootstrapEvent::CacheRestoreAttempt {
                    attempt,
                    total: CACHE_RESTORE_ATTEMPTS,
                });
                match installer.install_from_cache(&target.root, request.package_manager) {
                    Ok(()) => {
                        events.emit(BootstrapEvent::StageCompleted(Stage::Provision));
                        break;
                    }
                    Err(_) if attempt < CACHE_RESTORE_ATTEMPTS => {
                        attempt += 1;
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                    Err(err) => {
                        events.emit(BootstrapEvent::StageDegraded {
                            stage: Stage::Provision,
                            reason: format!("{:#}", err),
                        });
                        break;
                    }
                }
            }
            Ok(())
        }
        InstallStrategy::Resolved => {
            let manifest = template
                .load_manifest()
                .map_err(|reason| BootstrapError::Manifest { reason })?;

            // Runtime dependencies always install before development ones
            let runtime = manifest.runtime_specs();
            if !runtime.is_empty() {
                events.emit(BootstrapEvent::InstallingDependencies {
                    group: DependencyGroup::Runtime,
                    packages: runtime.clone(),
                });
                let flags = InstallFlags {
                    package_manager: request.package_manager,
                    is_online: true,
                    dev_dependencies: false,
                };
                installer
                    .install(&target.root, &runtime, &flags)
                    .map_err(|reason| BootstrapError::Install {
                        group: DependencyGroup::Runtime,
                        reason,
                    })?;
            }

            let dev = manifest.dev_specs();
            if !dev.is_empty() {
                events.emit(BootstrapEvent::InstallingDependencies {
                    group: DependencyGroup::Development,
                    packages: dev.clone(),
                });
                let flags = InstallFlags {
                    package_manager: request.package_manager,
                    is_online: true,
                    dev_dependencies: true,
                };
                installer
                    .install(&target.root, &dev, &flags)
                    .map_err(|reason| BootstrapError::Install {
                        group: DependencyGroup::Development,
                        reason,
                    })?;
            }

            events.emit(BootstrapEvent::StageCompleted(Stage::Provision));
            Ok(())
        }
    }
}

/// Stage 4: advisory repository init plus the post-install summary.
/// Nothing here can fail the run.
fn finalize<V: VcsInit, E: EventSink>(
    request: &BootstrapRequest,
    target: &ResolvedTarget,
    vcs: &V,
    events: &E,
) {
    events.emit(BootstrapEvent::StageStarted(Stage::Finalize));

    if vcs.try_init(&target.root) {
        events.emit(BootstrapEvent::RepositoryInitialized);
    }

    events.emit(BootstrapEvent::Summary(PostInstallSummary {
        project_name: target.project_name.clone(),
        target_path: request.target_path.clone(),
        cd_path: display_path(request, target),
        package_manager: request.package_manager,
    }));
    events.emit(BootstrapEvent::StageCompleted(Stage::Finalize));
}

/// Argument for the suggested `cd`: the bare project name when the project
/// sits directly under the invocation directory, otherwise the target path
/// exactly as the user typed it.
fn display_path(request: &BootstrapRequest, target: &ResolvedTarget) -> String {
    if target.original_dir.join(&target.project_name) == target.root {
        target.project_name.clone()
    } else {
        request.target_path.display().to_string()
    }
}
