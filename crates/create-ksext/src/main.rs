//! create-ksext - scaffold a new KubeSphere extension project

mod reporter;

use bootstrap_core::{
    bootstrap, BootstrapRequest, CommandInstaller, Git, InstallStrategy, PackageManager,
    TemplateSource,
};
use clap::Parser;
use reporter::ConsoleReporter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "create-ksext")]
#[command(about = "Create a new KubeSphere extension project from the bundled template")]
#[command(version)]
pub struct Args {
    /// Directory to create the project in
    pub directory: PathBuf,

    /// Package manager used to install dependencies
    #[arg(short, long, value_enum, default_value_t = PackageManager::Yarn)]
    pub package_manager: PackageManager,

    /// Restore dependencies from the local package cache instead of
    /// resolving the template manifest (best-effort)
    #[arg(long = "fast-mode")]
    pub fast_mode: bool,

    /// Local directory to use as the template instead of the bundled one (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let request = BootstrapRequest {
        target_path: args.directory,
        package_manager: args.package_manager,
        strategy: if args.fast_mode {
            InstallStrategy::Fast
        } else {
            InstallStrategy::Resolved
        },
    };
    let template = match args.template_dir {
        Some(dir) => TemplateSource::Local(dir),
        None => TemplateSource::Embedded,
    };

    let _ = cliclack::intro("create-ksext");

    let result = bootstrap(
        &request,
        &template,
        &CommandInstaller,
        &Git,
        &ConsoleReporter,
    )
    .await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = cliclack::log::error(format!("{}", err));
            ExitCode::FAILURE
        }
    }
}
