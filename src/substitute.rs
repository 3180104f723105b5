use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::SubstitutionConfig;
use crate::project::{ProjectId, ProjectName};
use crate::{ConfigureError, Result};

pub const PROJECT_ID_TOKEN: &str = "__PROJID__";
pub const PROJECT_NAME_TOKEN: &str = "<PROJECT_NAME>";

/// Replace every placeholder in `template`.
///
/// Both replacements are literal. The id token is replaced first, so a name
/// that itself contains `__PROJID__` is inserted verbatim.
pub fn replace_placeholders(template: &str, id: ProjectId, name: &ProjectName) -> String {
    template
        .replace(PROJECT_ID_TOKEN, &id.to_string())
        .replace(PROJECT_NAME_TOKEN, name.as_str())
}

/// Number of placeholder occurrences in `text`
pub fn count_placeholders(text: &str) -> usize {
    text.matches(PROJECT_ID_TOKEN).count() + text.matches(PROJECT_NAME_TOKEN).count()
}

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Rewritten { replacements: usize },
    Unchanged,
    SkippedNonUtf8,
}

/// Totals for a substitution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub files_unchanged: usize,
    pub replacements: usize,
    pub skipped_non_utf8: Vec<PathBuf>,
    /// Time spent reading and rewriting files, prompt excluded
    pub elapsed: Duration,
}

impl SubstitutionReport {
    fn record(&mut self, path: &Path, outcome: FileOutcome) {
        self.files_scanned += 1;
        match outcome {
            FileOutcome::Rewritten { replacements } => {
                self.files_rewritten += 1;
                self.replacements += replacements;
            }
            FileOutcome::Unchanged => self.files_unchanged += 1,
            FileOutcome::SkippedNonUtf8 => self.skipped_non_utf8.push(path.to_path_buf()),
        }
    }
}

/// Rewrites files in place, one at a time
#[derive(Debug, Clone)]
pub struct Substituter {
    skip_non_utf8: bool,
}

impl Substituter {
    pub fn new(skip_non_utf8: bool) -> Self {
        Self { skip_non_utf8 }
    }

    pub fn from_config(config: &SubstitutionConfig) -> Self {
        Self::new(config.skip_non_utf8)
    }

    /// Read `path`, substitute both placeholders and write the result back.
    ///
    /// A file without placeholders is left untouched on disk.
    pub fn rewrite_file(
        &self,
        path: &Path,
        id: ProjectId,
        name: &ProjectName,
    ) -> Result<FileOutcome> {
        let bytes = fs::read(path).map_err(|source| ConfigureError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) if self.skip_non_utf8 => {
                warn!("Skipping {}: not valid UTF-8", path.display());
                return Ok(FileOutcome::SkippedNonUtf8);
            }
            Err(_) => {
                return Err(ConfigureError::Encoding {
                    path: path.to_path_buf(),
                });
            }
        };

        let replacements = count_placeholders(&text);
        if replacements == 0 {
            return Ok(FileOutcome::Unchanged);
        }

        let rewritten = replace_placeholders(&text, id, name);
        fs::write(path, rewritten).map_err(|source| ConfigureError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Rewrote {} ({} placeholders)", path.display(), replacements);
        Ok(FileOutcome::Rewritten { replacements })
    }

    /// Rewrite every file in order. The first failure aborts the pass and
    /// files rewritten before it stay rewritten.
    pub fn rewrite_all<P: AsRef<Path>>(
        &self,
        paths: &[P],
        id: ProjectId,
        name: &ProjectName,
    ) -> Result<SubstitutionReport> {
        let started = Instant::now();
        let mut report = SubstitutionReport::default();
        for path in paths {
            let path = path.as_ref();
            let outcome = self.rewrite_file(path, id, name)?;
            report.record(path, outcome);
        }
        report.elapsed = started.elapsed();
        Ok(report)
    }
}

impl Default for Substituter {
    fn default() -> Self {
        Self::from_config(&SubstitutionConfig::default())
    }
}
