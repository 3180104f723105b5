use anyhow::Context;
use configure_project::config::Config;
use configure_project::configure::{self, RunOptions};
use configure_project::{logging, ConfigureError, Walker};
use std::io;
use std::process;
use tracing::{debug, info};

mod cli;

use cli::CliOptions;

fn main() {
    let matches = cli::build_cli().get_matches();
    let options = CliOptions::from_matches(&matches);

    if let Err(e) = run(options) {
        match e.downcast_ref::<ConfigureError>() {
            // The rejection message is printed bare
            Some(err @ ConfigureError::ForbiddenName { .. }) => {
                eprintln!("{}", err);
                process::exit(err.exit_code());
            }
            Some(err) => {
                eprintln!("Error: {}", err);
                process::exit(err.exit_code());
            }
            None => {
                eprintln!("Error: {:#}", e);
                process::exit(2);
            }
        }
    }
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let mut config = Config::load(options.config_file.as_deref())?;
    options.apply(&mut config);
    logging::init_tracing(&config.logging, options.verbose);

    let root = match options.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let mut walker = Walker::from_config(&config.walker);
    if let Some(own_name) = configure::own_file_name() {
        debug!("Excluding own executable '{}'", own_name);
        walker = walker.exclude(own_name);
    }
    debug!(
        "Excluded names: {}",
        walker.excluded_names().collect::<Vec<_>>().join(", ")
    );

    let run_options = RunOptions::from_config(&root, &config).with_walker(walker);

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let configured =
        configure_project::run(&run_options, &mut input, &mut output, &mut rand::rng())?;

    info!("{}", cli::utils::summarize(&configured.report));
    Ok(())
}
