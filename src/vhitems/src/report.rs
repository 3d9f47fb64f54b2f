//! Per-file classification and run counters

use std::fmt;

use crate::error::FieldError;
use crate::item::ItemName;

/// Why an item data block was not exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// The block has no `m_name` field
    MissingName,
    /// The name token has no translation
    NotLocalized(String),
    /// A field could not be converted (lenient mode only)
    BadField(FieldError),
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::MissingName => f.write_str("no m_name"),
            DiscardReason::NotLocalized(token) => write!(f, "${} not localized", token),
            DiscardReason::BadField(err) => write!(f, "{}", err),
        }
    }
}

/// How a single prefab was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exported, with the resolved display name
    Added { name: ItemName, display_name: String },
    /// Item data present but not exported
    Discarded {
        name: ItemName,
        reason: DiscardReason,
    },
    /// No item data block
    Ignored { name: ItemName },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Added { .. } => "Added",
            Outcome::Discarded { .. } => "Discarded",
            Outcome::Ignored { .. } => "Ignored",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { name, display_name } => {
                write!(f, "{:<9} {} ({})", self.label(), name, display_name)
            }
            Outcome::Discarded { name, reason } => {
                write!(f, "{:<9} {} ({})", self.label(), name, reason)
            }
            Outcome::Ignored { name } => write!(f, "{:<9} {}", self.label(), name),
        }
    }
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ignored: usize,
    pub discarded: usize,
    pub added: usize,
}

impl RunReport {
    /// Count an outcome and log its line; `index` is 1-based
    pub fn record(&mut self, index: usize, outcome: &Outcome) {
        match outcome {
            Outcome::Added { .. } => self.added += 1,
            Outcome::Discarded { .. } => self.discarded += 1,
            Outcome::Ignored { .. } => self.ignored += 1,
        }
        tracing::debug!("{:>5} {}", index, outcome);
    }

    /// Total number of files classified
    pub fn processed(&self) -> usize {
        self.ignored + self.discarded + self.added
    }

    /// Log the final counters
    pub fn summarize(&self) {
        tracing::info!(
            "Processed {} files: {} ignored, {} discarded, {} added.",
            self.processed(),
            self.ignored,
            self.discarded,
            self.added
        );
    }
}
