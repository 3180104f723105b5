pub mod utils;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use configure_project::config::Config;

/// Settings taken from the command line, applied on top of [`Config`]
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub root: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            root: matches.get_one::<PathBuf>("root").cloned(),
            exclude: matches
                .get_many::<String>("exclude")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            follow_links: matches.get_flag("follow-links"),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            verbose: matches.get_flag("verbose"),
        }
    }

    /// Fold command-line overrides into a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        for name in &self.exclude {
            if !config.walker.exclude.contains(name) {
                config.walker.exclude.push(name.clone());
            }
        }
        if self.follow_links {
            config.walker.follow_links = true;
        }
    }
}

pub fn build_cli() -> Command {
    Command::new("configure-project")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fill in the project name and id placeholders of a freshly cloned template")
        .long_about(
            "Walks the template tree, asks for a project name, draws a random project id \
             and replaces every __PROJID__ and <PROJECT_NAME> placeholder in place.",
        )
        .after_long_help(
            "Environment:\n  \
             CONFIGURE_PROJECT_WALKER__EXCLUDE   comma-separated names; replaces the \
             default .git,build list\n  \
             CONFIGURE_PROJECT_LOGGING__LEVEL    diagnostics level (default: warn)",
        )
        .arg(
            Arg::new("root")
                .short('C')
                .long("root")
                .help("Directory to configure (defaults to the current directory)")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .help("Additional file or directory name to skip, added to the configured list")
                .value_name("NAME")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("follow-links")
                .long("follow-links")
                .help("Follow symbolic links while walking")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Load settings from this TOML file")
                .long_help(
                    "Load settings from this TOML file. A `walker.exclude` list set here \
                     replaces the default [\".git\", \"build\"] list instead of extending it, \
                     so include those names again to keep them skipped.",
                )
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug diagnostics on stderr")
                .action(ArgAction::SetTrue),
        )
}
