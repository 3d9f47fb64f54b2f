//! Prefab text asset parsing
//!
//! Exported prefabs are YAML-like text. Item prefabs carry an `m_itemData:`
//! block whose shared section holds the fields we export:
//!
//! ```text
//! m_itemData:
//!   m_shared:
//!     m_name: $item_sword_iron
//!     m_itemType: 3
//!     m_maxStackSize: 1
//! ```
//!
//! The block is not parsed as YAML. Lines are matched by key, which is
//! tolerant of the indentation and ordering differences between exports.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Marker that starts the item data block
pub const ITEM_DATA_MARKER: &str = "m_itemData:";

/// Separator between key and value on a field line
pub const SEPARATOR: char = ':';

/// Recognized item data fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Teleportable,
    UseDurability,
    MaxDurability,
    DurabilityPerLevel,
    MaxStackSize,
    MaxQuality,
    ItemType,
}

impl Field {
    /// All fields, in extraction order
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Teleportable,
        Field::UseDurability,
        Field::MaxDurability,
        Field::DurabilityPerLevel,
        Field::MaxStackSize,
        Field::MaxQuality,
        Field::ItemType,
    ];

    /// Key as it appears in the prefab text
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "m_name",
            Field::Teleportable => "m_teleportable",
            Field::UseDurability => "m_useDurability",
            Field::MaxDurability => "m_maxDurability",
            Field::DurabilityPerLevel => "m_durabilityPerLevel",
            Field::MaxStackSize => "m_maxStackSize",
            Field::MaxQuality => "m_maxQuality",
            Field::ItemType => "m_itemType",
        }
    }

    fn matches_line(self, line: &str) -> bool {
        let key = self.key();
        line.match_indices(key)
            .any(|(pos, _)| line[pos + key.len()..].starts_with(SEPARATOR))
    }
}

/// Raw key → value strings from one prefab's item data block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    values: HashMap<String, String>,
}

impl RawFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extract the raw item fields from prefab text
///
/// Returns `None` when the text has no item data block, meaning the prefab
/// is not an item definition.
pub fn parse_item_data(content: &str) -> Option<RawFields> {
    let mut markers = marker_lines(content);
    let start = markers.next()?;
    let end = markers
        .next()
        .map_or(content.len(), |next| next - ITEM_DATA_MARKER.len());
    let block = &content[start..end];

    let mut raw = RawFields::default();
    for line in block.lines() {
        if !Field::ALL.iter().any(|f| f.matches_line(line)) {
            continue;
        }

        // Values may contain the separator themselves, only split once
        if let Some((key, value)) = line.split_once(SEPARATOR) {
            let value = value.trim_matches(|c: char| c.is_whitespace() || c == '$');
            raw.values.insert(key.trim().to_string(), value.to_string());
        }
    }

    Some(raw)
}

/// Offsets just past each marker that ends its line
///
/// Inline values such as `m_itemData: {fileID: 0}` are not block markers.
fn marker_lines(content: &str) -> impl Iterator<Item = usize> + '_ {
    content
        .match_indices(ITEM_DATA_MARKER)
        .map(|(pos, _)| pos + ITEM_DATA_MARKER.len())
        .filter(|&after| {
            let rest = &content[after..];
            rest.starts_with('\n') || rest.starts_with("\r\n")
        })
}

/// List files directly inside `dir` whose name matches `pattern`
///
/// Results are sorted by file name so runs are reproducible regardless of
/// the platform's directory listing order.
pub fn find_item_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let io_err = |source: std::io::Error| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| glob_match::glob_match(pattern, name));
        if matches {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Error::NoItemFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
