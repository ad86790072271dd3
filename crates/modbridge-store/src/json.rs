//! JSON encoding shared by every artifact.

#![allow(clippy::result_large_err)]

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::atomic::atomic_write;
use crate::errors::{file_unavailable, invalid_file, io_error, serialization_error, Result};

/// Pretty-print with four-space indentation. Non-ASCII text is written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| serialization_error("to_pretty_json", e))?;
    Ok(buf)
}

/// Read and decode a JSON file.
///
/// # Errors
///
/// `NotFound` when the file does not exist, `InvalidSnapshot` when it does not
/// decode as `T`, `Io` for other read failures.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(file_unavailable(path)),
        Err(e) => return Err(io_error("read_json", path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| invalid_file(path, e))
}

/// Encode `value` and atomically replace `path` with it
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_json(value)?;
    atomic_write(path, &bytes)
}
