//! Reading and writing the JSON dump.
//!
//! The dump is a single JSON array, indented with four spaces. Non-ASCII
//! characters are written verbatim.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::errors::DumpError;
use crate::ordering::sort_by_id;

const INDENT: &[u8] = b"    ";

/// Encode `value` in the dump's formatting.
///
/// # Errors
///
/// Returns [`DumpError::Json`] if `value` cannot be serialized.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DumpError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `records` to `path`, creating missing parent directories.
///
/// Records are written in the order given; sort them first.
///
/// # Errors
///
/// Returns [`DumpError::Io`] if the directory or file cannot be written.
pub fn write_dump<T: Serialize>(path: &Path, records: &[T]) -> Result<(), DumpError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DumpError::io(parent, e))?;
    }
    let bytes = to_pretty_json(records)?;
    std::fs::write(path, bytes).map_err(|e| DumpError::io(path, e))?;
    tracing::debug!(path = %path.display(), records = records.len(), "dump written");
    Ok(())
}

/// Load a dump as untyped records, preserving each record's key order.
///
/// # Errors
///
/// Returns [`DumpError::NotFound`] if `path` does not exist,
/// [`DumpError::Json`] on a decode error, and [`DumpError::NotAnArray`] if
/// the root is not an array.
pub fn read_dump_values(path: &Path) -> Result<Vec<Value>, DumpError> {
    if !path.exists() {
        return Err(DumpError::NotFound(path.to_path_buf()));
    }
    let raw = std::fs::read(path).map_err(|e| DumpError::io(path, e))?;
    match serde_json::from_slice::<Value>(&raw)? {
        Value::Array(records) => Ok(records),
        other => Err(DumpError::NotAnArray(json_kind(&other).to_string())),
    }
}

/// Re-sort an existing dump by id and overwrite it. Returns the record count.
///
/// # Errors
///
/// Propagates any [`DumpError`] from reading or writing. Nothing is written
/// if the read fails.
pub fn sort_dump_in_place(path: &Path) -> Result<usize, DumpError> {
    let mut records = read_dump_values(path)?;
    tracing::info!(path = %path.display(), records = records.len(), "sorting dump by id");
    sort_by_id(&mut records);
    write_dump(path, &records)?;
    Ok(records.len())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
