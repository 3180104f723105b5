use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

use crate::{ConfigureError, Result};

/// Characters a project name may not contain
pub const FORBIDDEN_NAME_CHARS: [char; 3] = [' ', '<', '>'];

/// Operator-supplied project name that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a (trimmed) project name.
    ///
    /// Anything without a space, `<` or `>` is accepted as-is, including the
    /// empty string.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.contains(FORBIDDEN_NAME_CHARS) {
            return Err(ConfigureError::ForbiddenName { name });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Random six-digit project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(u32);

impl ProjectId {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    pub fn range() -> RangeInclusive<u32> {
        Self::MIN..=Self::MAX
    }

    /// Draw an identifier uniformly from `MIN..=MAX`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::range()))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
