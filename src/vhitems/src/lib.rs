//! Valheim item data extraction
//!
//! Reads the text assets of an exported Valheim project and produces one
//! CSV row per item prefab.
//!
//! # Inputs
//!
//! - `Assets/Resources/localization.txt`: quoted CSV, token in column 0 and
//!   English text in column 1
//! - `Assets/PrefabInstance/*.prefab`: text prefabs, item definitions carry
//!   an `m_itemData:` block
//!
//! # Pipeline
//!
//! 1. Load the localization table ([`Localization`])
//! 2. Parse each prefab's item data block into [`RawFields`]
//! 3. Join the `m_name` token against the table and build an [`ItemRecord`]
//! 4. Write all records with [`write_table`]

pub mod error;
pub mod extract;
pub mod item;
pub mod localization;
pub mod prefab;
pub mod report;
pub mod table;

pub use error::{Error, FieldError, Result};
pub use extract::{
    run, ExtractOptions, Extraction, DEFAULT_LOCALIZATION_DUMP, DEFAULT_LOCALIZATION_PATH,
    DEFAULT_OUTPUT, DEFAULT_PATTERN, DEFAULT_PREFAB_DIR,
};
pub use item::{Built, ItemName, ItemRecord, LEGACY_SUFFIX};
pub use localization::{Localization, LocalizationEntry};
pub use prefab::{find_item_files, parse_item_data, Field, RawFields, ITEM_DATA_MARKER};
pub use report::{DiscardReason, Outcome, RunReport};
pub use table::{write_rows, write_table, Row};
