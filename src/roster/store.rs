use std::io::Write;
use std::path::{Path, PathBuf};

use rand::TryRngCore;
use tracing::info;

use super::{Roster, RosterError};
use crate::app_dirs;

/// Default filename used to store the roster.
pub const ROSTER_FILE_NAME: &str = "roster.toml";

/// Resolve the roster file path, ensuring the parent directory exists.
pub fn roster_path() -> Result<PathBuf, RosterError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(ROSTER_FILE_NAME))
}

/// Load the roster from the app directory, seeding defaults if missing.
pub fn load_or_default() -> Result<Roster, RosterError> {
    let path = roster_path()?;
    if !path.exists() {
        info!("No roster at {}; using defaults", path.display());
        return Ok(Roster::default());
    }
    load_from_path(&path)
}

/// Load and validate a roster file.
pub fn load_from_path(path: &Path) -> Result<Roster, RosterError> {
    let text = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let roster: Roster = toml::from_str(&text).map_err(|source| RosterError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    roster.validate()?;
    Ok(roster)
}

/// Persist the roster into the app directory.
pub fn save(roster: &Roster) -> Result<(), RosterError> {
    save_to_path(roster, &roster_path()?)
}

/// Save the roster to a specific path, creating parent directories as needed.
pub fn save_to_path(roster: &Roster, path: &Path) -> Result<(), RosterError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| RosterError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(roster).map_err(|source| RosterError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

/// Write through a uniquely named temporary file, then rename over `path`.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), RosterError> {
    let write_error = |path: &Path, source: std::io::Error| RosterError::Write {
        path: path.to_path_buf(),
        source,
    };
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(write_error(
            path,
            std::io::Error::other("roster path has no parent directory or file name"),
        ));
    };
    let mut last_err = None;
    for _ in 0..5 {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| {
                write_error(
                    path,
                    std::io::Error::other(format!("failed to generate temporary suffix: {source}")),
                )
            })?;
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let tmp_path = dir.join(format!("{}.tmp-{suffix}", file_name.to_string_lossy()));

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(write_error(&tmp_path, err)),
        };
        if let Err(err) = file.write_all(data).and_then(|()| file.sync_all()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(&tmp_path, err));
        }
        drop(file);
        if let Err(err) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(path, err));
        }
        return Ok(());
    }
    Err(write_error(
        path,
        last_err.unwrap_or_else(|| std::io::Error::other("no temporary file could be created")),
    ))
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> RosterError {
    match error {
        app_dirs::AppDirError::NoBaseDir => RosterError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => RosterError::CreateDir { path, source },
    }
}
