//! Extraction run: localization, prefab scan, CSV export

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::item::{Built, ItemName, ItemRecord};
use crate::localization::Localization;
use crate::prefab::{find_item_files, parse_item_data};
use crate::report::{DiscardReason, Outcome, RunReport};
use crate::table::write_table;

/// Localization table, relative to the asset root
pub const DEFAULT_LOCALIZATION_PATH: &str = "Assets/Resources/localization.txt";

/// Prefab directory, relative to the asset root
pub const DEFAULT_PREFAB_DIR: &str = "Assets/PrefabInstance";

/// File name pattern for item prefabs
pub const DEFAULT_PATTERN: &str = "*.prefab";

/// Output file name
pub const DEFAULT_OUTPUT: &str = "SharedItemData.csv";

/// Localization dump file name
pub const DEFAULT_LOCALIZATION_DUMP: &str = "Localization.csv";

/// Settings for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Root of the exported project
    pub asset_root: PathBuf,
    /// Localization table, relative to `asset_root`
    pub localization_path: PathBuf,
    /// Prefab directory, relative to `asset_root`
    pub prefab_dir: PathBuf,
    /// File name glob for prefabs
    pub pattern: String,
    /// Destination CSV
    pub output: PathBuf,
    /// Also write the loaded localization table here
    pub localization_dump: Option<PathBuf>,
    /// Discard items with malformed fields instead of aborting
    pub lenient: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            asset_root: PathBuf::from("."),
            localization_path: PathBuf::from(DEFAULT_LOCALIZATION_PATH),
            prefab_dir: PathBuf::from(DEFAULT_PREFAB_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            localization_dump: None,
            lenient: false,
        }
    }
}

/// State of one extraction run
///
/// Owns the localization table, the exported items, and the counters. The
/// stages run in order: [`load_localization`](Self::load_localization),
/// [`extract_items`](Self::extract_items), [`save`](Self::save).
#[derive(Debug)]
pub struct Extraction<'a> {
    options: &'a ExtractOptions,
    localization: Localization,
    items: Vec<ItemRecord>,
    report: RunReport,
}

impl<'a> Extraction<'a> {
    pub fn new(options: &'a ExtractOptions) -> Self {
        Extraction {
            options,
            localization: Localization::new(),
            items: Vec::new(),
            report: RunReport::default(),
        }
    }

    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn report(&self) -> RunReport {
        self.report
    }

    /// Check that the asset root and the output directory exist
    pub fn check_paths(&self) -> Result<()> {
        if !self.options.asset_root.is_dir() {
            return Err(Error::MissingDirectory(self.options.asset_root.clone()));
        }

        for output in std::iter::once(&self.options.output).chain(&self.options.localization_dump)
        {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.is_dir() {
                    return Err(Error::MissingDirectory(parent.to_path_buf()));
                }
            }
        }

        Ok(())
    }

    /// Load the localization table, dumping it if requested
    pub fn load_localization(&mut self) -> Result<()> {
        let path = self.options.asset_root.join(&self.options.localization_path);
        tracing::info!("Processing file {}...", self.options.localization_path.display());
        tracing::debug!("Localization table at {}", path.display());

        self.localization = Localization::load(&path)?;
        tracing::info!("Loaded {} translations.", self.localization.len());

        if let Some(dump) = &self.options.localization_dump {
            let written = write_table(dump, self.localization.entries())?;
            tracing::info!(
                "Saved {} translations to {}",
                self.localization.len(),
                written.display()
            );
        }

        Ok(())
    }

    /// Scan prefabs and build item records
    pub fn extract_items(&mut self) -> Result<()> {
        let dir = self.options.asset_root.join(&self.options.prefab_dir);
        let files = find_item_files(&dir, &self.options.pattern)?;
        tracing::info!(
            "Processing {} files in directory {}...",
            files.len(),
            self.options.prefab_dir.display()
        );
        tracing::debug!("Prefab directory at {}", dir.display());

        for (i, path) in files.iter().enumerate() {
            let outcome = self.extract_file(path)?;
            self.report.record(i + 1, &outcome);
        }

        tracing::info!("Extracted {} items.", self.items.len());
        Ok(())
    }

    fn extract_file(&mut self, path: &Path) -> Result<Outcome> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = ItemName::from_path(path);

        let Some(raw) = parse_item_data(&content) else {
            return Ok(Outcome::Ignored { name });
        };

        let built = match ItemRecord::build(&name, &raw, &self.localization) {
            Ok(built) => built,
            Err(source) if self.options.lenient => {
                tracing::warn!("Discarding {}: {}", path.display(), source);
                return Ok(Outcome::Discarded {
                    name,
                    reason: DiscardReason::BadField(source),
                });
            }
            Err(source) => {
                return Err(Error::Record {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(match built {
            Built::Added(record) => {
                let display_name = record.display_name.clone();
                self.items.push(record);
                Outcome::Added { name, display_name }
            }
            Built::Discarded { token } => Outcome::Discarded {
                name,
                reason: token.map_or(DiscardReason::MissingName, DiscardReason::NotLocalized),
            },
        })
    }

    /// Write the exported items; returns the absolute output path
    pub fn save(&self) -> Result<PathBuf> {
        let written = write_table(&self.options.output, &self.items)?;
        tracing::info!("Saved {} items to {}", self.items.len(), written.display());
        Ok(written)
    }
}

/// Run a full extraction
pub fn run(options: &ExtractOptions) -> Result<RunReport> {
    let mut extraction = Extraction::new(options);
    extraction.check_paths()?;

    let root = fs::canonicalize(&options.asset_root).unwrap_or_else(|_| options.asset_root.clone());
    tracing::info!("ASSETROOT is {}.", root.display());

    extraction.load_localization()?;
    extraction.extract_items()?;
    extraction.report().summarize();
    extraction.save()?;

    Ok(extraction.report())
}
