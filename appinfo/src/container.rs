// SPDX-License-Identifier: MIT
//! Parsed appinfo container

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::format::{ContainerHeader, RecordHeader};
use crate::keyvalues::Document;
use crate::reader::{self, FormatError};

/// One application's record
#[derive(Debug, Clone, Serialize)]
pub struct AppEntry {
    pub id: u32,
    pub header: RecordHeader,
    pub document: Document,
}

/// All application records of one appinfo file, keyed by app id
///
/// Built in a single pass by [`crate::ContainerReader`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct Container {
    header: ContainerHeader,
    entries: BTreeMap<u32, AppEntry>,
    failed: Vec<u32>,
}

impl Container {
    pub(crate) fn new(header: ContainerHeader) -> Self {
        Self {
            header,
            entries: BTreeMap::new(),
            failed: Vec::new(),
        }
    }

    /// Open and parse a container file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        reader::parse_file(path)
    }

    pub(crate) fn insert(&mut self, entry: AppEntry) {
        self.entries.insert(entry.id, entry);
    }

    pub(crate) fn record_failure(&mut self, app_id: u32) {
        self.failed.push(app_id);
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, app_id: u32) -> bool {
        self.entries.contains_key(&app_id)
    }

    pub fn get(&self, app_id: u32) -> Option<&AppEntry> {
        self.entries.get(&app_id)
    }

    /// Entries in ascending app id order
    pub fn iter(&self) -> impl Iterator<Item = &AppEntry> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Ids whose payload could not be decoded, in stream order
    pub fn failed_ids(&self) -> &[u32] {
        &self.failed
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a AppEntry;
    type IntoIter = std::collections::btree_map::Values<'a, u32, AppEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
