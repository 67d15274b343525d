use std::num::IntErrorKind;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;

use crate::directory::errors::LimitError;

/// A single public API listing, passed through from upstream untouched.
pub type DirectoryEntry = serde_json::Value;

/// Maximum number of entries a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLimit(NonZeroUsize);

impl EntryLimit {
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl FromStr for EntryLimit {
    type Err = LimitError;

    /// Integers too large for `usize` saturate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<NonZeroUsize>() {
            Ok(limit) => Ok(EntryLimit(limit)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(EntryLimit(NonZeroUsize::MAX)),
            Err(_) => Err(LimitError::NotAPositiveInteger(s.to_string())),
        }
    }
}

/// Filter applied to a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub category: Option<String>,
    pub limit: Option<EntryLimit>,
}

/// Entries returned to the caller; `count` is the length of `entries`, not the
/// upstream total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub count: usize,
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    /// Build a listing, keeping at most `limit` entries.
    pub fn new(mut entries: Vec<DirectoryEntry>, limit: Option<EntryLimit>) -> Self {
        if let Some(limit) = limit {
            entries.truncate(limit.get());
        }

        Self {
            count: entries.len(),
            entries,
        }
    }
}
