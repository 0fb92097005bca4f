//! JSON persistence helpers for the company and transfer files
//!
//! Reads treat a missing file as an empty store. Writes replace the target
//! in one rename, so `companies.json` and `transfers.json` always hold either
//! the previous or the new snapshot.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AdhesionError;

fn storage_error(action: &str, path: &Path, cause: impl std::fmt::Display) -> AdhesionError {
    AdhesionError::Storage(format!("Cannot {} {}: {}", action, path.display(), cause))
}

/// Sibling scratch file used while a snapshot is being written
fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Decode a JSON snapshot, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<T, AdhesionError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("decode", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// The snapshot is staged next to the target, synced, then renamed over it.
/// On failure the staging file is removed and the target is left as it was.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), AdhesionError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = staging_path(path);
    let result = stage_snapshot(&staging, data)
        .and_then(|_| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stage_snapshot<T: Serialize>(staging: &Path, data: &T) -> Result<(), AdhesionError> {
    let file = File::create(staging).map_err(|e| storage_error("create", staging, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("encode", staging, e))?;
    writer.flush().map_err(|e| storage_error("flush", staging, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", staging, e))
}
