//! One configuration run: walk, prompt, validate, substitute, confirm.

use rand::Rng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::project::{ProjectId, ProjectName};
use crate::prompt::{self, PROJECT_NAME_PROMPT};
use crate::substitute::{Substituter, SubstitutionReport};
use crate::walker::{EntryKind, Walker};
use crate::Result;

/// Everything a run needs besides its I/O streams and random source
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub walker: Walker,
    pub substituter: Substituter,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            walker: Walker::default(),
            substituter: Substituter::default(),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            walker: Walker::from_config(&config.walker),
            substituter: Substituter::from_config(&config.substitution),
        }
    }

    pub fn with_walker(mut self, walker: Walker) -> Self {
        self.walker = walker;
        self
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct Configured {
    pub id: ProjectId,
    pub name: ProjectName,
    pub report: SubstitutionReport,
}

impl Configured {
    pub fn confirmation(&self) -> String {
        format!("Configured projectID: {} with name {}!", self.id, self.name)
    }
}

/// Run one configuration pass over `options.root`.
///
/// The tree is walked before the operator is prompted, so an unreadable
/// directory fails the run without asking for a name. A rejected name fails
/// with [`crate::ConfigureError::ForbiddenName`] before any file is opened.
pub fn run<I, O, R>(
    options: &RunOptions,
    input: &mut I,
    output: &mut O,
    rng: &mut R,
) -> Result<Configured>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let root = options.root.as_path();
    let files = discover(&options.walker, root)?;

    let answer = prompt::ask(PROJECT_NAME_PROMPT, input, output)?;
    let id = ProjectId::generate(rng);

    let name = ProjectName::parse(answer)?;
    if name.is_empty() {
        warn!("Project name is empty; placeholders will be replaced with nothing");
    }

    let report = options.substituter.rewrite_all(&files, id, &name)?;
    for path in &report.skipped_non_utf8 {
        warn!("Left {} untouched", path.display());
    }

    let configured = Configured { id, name, report };
    writeln!(output, "{}", configured.confirmation())?;
    output.flush()?;

    Ok(configured)
}

fn discover(walker: &Walker, root: &Path) -> Result<Vec<PathBuf>> {
    let entries = walker.walk(root)?;
    let directories = entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::Directory)
        .count();

    let files: Vec<PathBuf> = entries
        .into_iter()
        .filter(|entry| entry.is_file())
        .map(|entry| entry.path)
        .collect();

    info!(
        "Found {} files in {} directories under {}",
        files.len(),
        directories,
        root.display()
    );
    Ok(files)
}

/// File name of the running executable, which must never be rewritten
pub fn own_file_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|name| name.to_string_lossy().into_owned()))
}
