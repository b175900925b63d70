//! Folds `(width, from, to)` facts into one byte total per version range.

use std::collections::BTreeMap;

use crate::error::{GenError, GenResult};
use crate::model::VersionRange;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SkipTable {
    entries: BTreeMap<VersionRange, u32>,
}

impl SkipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `width` bytes to the total of the exact range `from..=to`.
    pub fn add(&mut self, width: u32, from: u32, to: u32) -> GenResult<()> {
        if from > to {
            return Err(GenError::InvertedRange { from, to });
        }
        let range = VersionRange::new(from, to);
        let total = self.entries.entry(range).or_insert(0);
        *total = total
            .checked_add(width)
            .ok_or(GenError::WidthOverflow { range })?;
        Ok(())
    }

    pub fn get(&self, range: VersionRange) -> Option<u32> {
        self.entries.get(&range).copied()
    }

    /// Remove a range and return its total; an absent range counts as 0.
    pub fn take(&mut self, range: VersionRange) -> u32 {
        self.entries.remove(&range).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over every range.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|&w| u64::from(w)).sum()
    }
}

impl IntoIterator for SkipTable {
    type Item = (VersionRange, u32);
    type IntoIter = std::collections::btree_map::IntoIter<VersionRange, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
