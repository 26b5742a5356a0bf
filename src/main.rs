use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use clonevm::cli::Cli;
use clonevm::clone::{self, CloneOptions};
use clonevm::copier::Vmkfstools;

/// Exit codes: 0 success, 1 bad options, 2 missing required arguments,
/// 3 any runtime failure.
fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                ErrorKind::MissingRequiredArgument => 2,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("clonevm=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let opts = CloneOptions {
        snapshot: cli.snapshot,
        disk_format: cli.disk_format.clone(),
        rewrite_config: !cli.skip_config,
    };
    let copier = Vmkfstools::with_command(&cli.copy_tool);

    match clone::clone_vm(&cli.volume_root, &cli.source, &cli.destination, &opts, &copier) {
        Ok(outcome) => {
            println!("Cloned '{}' to {}", cli.source, outcome.disk.display());
            if let Some(config) = outcome.config {
                println!("Wrote config to {}", config.display());
            }
        }
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(3);
        }
    }
}
