//! Error types and their process exit codes

use std::path::PathBuf;

/// Errors from a single item field conversion
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field {0} is missing")]
    Missing(&'static str),

    #[error("field {field} has malformed value {value:?}")]
    Malformed { field: &'static str, value: String },
}

/// Errors that abort an extraction run
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing directory: {0}")]
    MissingDirectory(PathBuf),

    #[error("missing file: {0}")]
    MissingFile(PathBuf),

    #[error("no item files: nothing matches {pattern:?} in {dir}")]
    NoItemFiles { dir: PathBuf, pattern: String },

    #[error("write failed: {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("bad item data: {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: FieldError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingDirectory(_) => 3,
            Error::MissingFile(_) => 4,
            Error::NoItemFiles { .. } => 5,
            Error::Write { .. } => 6,
            Error::Record { .. } => 7,
            Error::Io { .. } | Error::Csv { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::MissingDirectory(PathBuf::from("a")),
            Error::MissingFile(PathBuf::from("b")),
            Error::NoItemFiles {
                dir: PathBuf::from("c"),
                pattern: "*.prefab".to_string(),
            },
            Error::Write {
                path: PathBuf::from("d"),
                source: std::io::Error::other("disk full").into(),
            },
            Error::Record {
                path: PathBuf::from("e"),
                source: FieldError::Missing("m_itemType"),
            },
        ];

        let mut codes: Vec<u8> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|&c| c > 1));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_message_prefixes() {
        let err = Error::MissingFile(PathBuf::from("localization.txt"));
        assert!(err.to_string().starts_with("missing file:"));

        let err = Error::Record {
            path: PathBuf::from("Sword.prefab"),
            source: FieldError::Malformed {
                field: "m_maxStackSize",
                value: "lots".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("bad item data:"));
        assert!(msg.contains("m_maxStackSize"));
        assert!(msg.contains("\"lots\""));
    }
}
