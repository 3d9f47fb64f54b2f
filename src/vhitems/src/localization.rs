//! Localization table loading
//!
//! The exported `localization.txt` is a quoted CSV table without a header
//! row. Column 0 holds the token (e.g. `item_sword_iron`), column 1 the
//! English text, and any further columns other languages.
//!
//! Example: `"item_sword_iron","Iron sword","Järnsvärd"`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::Row;

/// A single token → text translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizationEntry {
    /// Localization token
    pub name: String,
    /// English display text
    pub text: String,
}

impl Row for LocalizationEntry {
    const COLUMNS: &'static [&'static str] = &["Name", "Text"];
}

/// Token → text lookup that remembers insertion order
#[derive(Debug, Clone, Default)]
pub struct Localization {
    entries: Vec<LocalizationEntry>,
    by_name: HashMap<String, usize>,
}

impl Localization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the localization table from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file).map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a localization table from any reader
    ///
    /// Rows with an empty token or empty text are skipped, as are rows whose
    /// token was already seen (first occurrence wins).
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut localization = Self::new();
        // Stray non-UTF-8 bytes are replaced rather than failing the table
        for record in csv.byte_records() {
            let record = record?;
            if let (Some(name), Some(text)) = (record.get(0), record.get(1)) {
                localization.insert(
                    &String::from_utf8_lossy(name),
                    &String::from_utf8_lossy(text),
                );
            }
        }

        Ok(localization)
    }

    /// Add a translation unless the token is empty, the text is empty, or the
    /// token is already present. Returns whether the entry was added.
    pub fn insert(&mut self, name: &str, text: &str) -> bool {
        if name.is_empty() || text.is_empty() || self.by_name.contains_key(name) {
            return false;
        }

        self.by_name.insert(name.to_string(), self.entries.len());
        self.entries.push(LocalizationEntry {
            name: name.to_string(),
            text: text.to_string(),
        });
        true
    }

    /// Look up the display text for a token (exact match)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&idx| self.entries[idx].text.as_str())
    }

    /// Entries in the order they were loaded
    pub fn entries(&self) -> &[LocalizationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
