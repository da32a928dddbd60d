use std::path::PathBuf;

use thiserror::Error;

/// Errors that may occur while loading or saving the roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Failed to create the roster directory.
    #[error("Unable to create roster directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
    /// Failed to read the roster file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the roster file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("Invalid roster at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize the roster to TOML.
    #[error("Failed to serialize roster to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// A list holds the same item id twice.
    #[error("List {list} contains a duplicate item id")]
    DuplicateItem {
        /// Container id of the offending list.
        list: String,
    },
    /// Two members share an id and would map to the same list.
    #[error("Member id {id} is used more than once")]
    DuplicateMember {
        /// The repeated member id.
        id: u32,
    },
}
