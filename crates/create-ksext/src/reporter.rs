//! Console rendering of pipeline events
//!
//! The pipeline only emits `BootstrapEvent`s; everything the user sees is
//! decided here. Rendering failures never affect the run.

use bootstrap_core::{BootstrapEvent, DependencyGroup, EventSink, PostInstallSummary, Stage};
use colored::Colorize;

pub struct ConsoleReporter;

impl EventSink for ConsoleReporter {
    fn emit(&self, event: BootstrapEvent) {
        let _ = render(event);
    }
}

fn render(event: BootstrapEvent) -> std::io::Result<()> {
    match event {
        // stages speak through their data-carrying events below
        BootstrapEvent::StageStarted(_) | BootstrapEvent::StageCompleted(_) => Ok(()),

        BootstrapEvent::ProjectCreating { root } => cliclack::log::info(format!(
            "Creating a new KubeSphere extension project in {}.",
            root.display().to_string().green()
        )),

        BootstrapEvent::CacheRestoreAttempt { attempt: 1, .. } => {
            cliclack::log::info("Downloading dependencies. This might take a moment.")
        }
        BootstrapEvent::CacheRestoreAttempt { attempt, total } => cliclack::log::info(format!(
            "Retrying dependency download ({}/{})",
            attempt, total
        )),

        BootstrapEvent::StageDegraded { stage, reason } => {
            // fast-mode exhaustion: the project is still created, the
            // summary stays success-toned
            cliclack::log::warning(degraded_line(stage, &reason))
        }

        BootstrapEvent::InstallingDependencies { group, packages } => {
            let heading = match group {
                DependencyGroup::Runtime => "Installing dependencies:",
                DependencyGroup::Development => "Installing devDependencies:",
            };
            let mut lines = vec![heading.to_string()];
            for package in &packages {
                lines.push(format!("- {}", package.cyan()));
            }
            cliclack::log::info(lines.join("\n"))
        }

        BootstrapEvent::RepositoryInitialized => {
            cliclack::log::success("Initialized a git repository.")
        }

        BootstrapEvent::Summary(summary) => {
            for line in summary_lines(&summary) {
                println!("{}", line);
            }
            // the outro closes the cliclack session, so the success line
            // lands after the command list rather than before it
            cliclack::outro(format!(
                "{} The project {} is created at {}",
                "Success!".green(),
                summary.project_name,
                summary.target_path.display()
            ))
        }
    }
}

/// One warning line for a best-effort step that gave up
fn degraded_line(stage: Stage, reason: &str) -> String {
    format!("{} degraded: {}", stage.display_name(), reason)
}

/// The fixed post-install instruction block. Wording follows the package
/// manager's invocation syntax: yarn runs scripts bare, npm/pnpm via `run`.
fn summary_lines(summary: &PostInstallSummary) -> Vec<String> {
    let pm = summary.package_manager;
    let create_ext = pm.run_script("create:ext");
    let dev = pm.run_script("dev");
    let build = pm.run_script("build:prod");
    let start = format!("{} start", pm);

    vec![
        String::new(),
        "Inside the directory, you can run the following commands:".to_string(),
        String::new(),
        format!("  {}", create_ext.cyan()),
        "    Creates a new extension.".to_string(),
        String::new(),
        format!("  {}", dev.cyan()),
        "    Starts the development server.".to_string(),
        String::new(),
        format!("  {}", build.cyan()),
        "    Builds the app for production to use.".to_string(),
        String::new(),
        format!("  {}", start.cyan()),
        "    Runs the built app in production mode.".to_string(),
        String::new(),
        "We suggest that you begin by typing:".to_string(),
        String::new(),
        format!("  {} {}", "cd".cyan(), summary.cd_path),
        format!("  {}", create_ext.cyan()),
        String::new(),
        "And".to_string(),
        String::new(),
        format!("  {}", dev.cyan()),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstrap_core::PackageManager;
    use std::path::PathBuf;

    fn summary(pm: PackageManager) -> PostInstallSummary {
        PostInstallSummary {
            project_name: "myapp".to_string(),
            target_path: PathBuf::from("myapp"),
            cd_path: "myapp".to_string(),
            package_manager: pm,
        }
    }

    #[test]
    fn test_summary_mentions_every_command() {
        colored::control::set_override(false);
        let lines = summary_lines(&summary(PackageManager::Yarn)).join("\n");
        assert!(lines.contains("yarn create:ext"));
        assert!(lines.contains("yarn dev"));
        assert!(lines.contains("yarn build:prod"));
        assert!(lines.contains("yarn start"));
        assert!(lines.contains("cd myapp"));
    }

    #[test]
    fn test_degraded_line_names_the_stage() {
        assert_eq!(
            degraded_line(Stage::Provision, "cache miss"),
            "dependency installation degraded: cache miss"
        );
    }

    #[test]
    fn test_summary_uses_run_for_npm() {
        colored::control::set_override(false);
        let lines = summary_lines(&summary(PackageManager::Npm)).join("\n");
        assert!(lines.contains("npm run create:ext"));
        assert!(lines.contains("npm run dev"));
        assert!(lines.contains("npm start"));
        assert!(!lines.contains("npm run start"));
    }
}
