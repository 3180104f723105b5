pub mod config;
pub mod configure;
pub mod error;
pub mod logging;
pub mod project;
pub mod prompt;
pub mod substitute;
pub mod walker;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use configure::{run, Configured, RunOptions};
pub use error::{ConfigureError, Result};
pub use project::{ProjectId, ProjectName};
pub use substitute::{Substituter, SubstitutionReport, PROJECT_ID_TOKEN, PROJECT_NAME_TOKEN};
pub use walker::{EntryKind, FileEntry, Walker};
