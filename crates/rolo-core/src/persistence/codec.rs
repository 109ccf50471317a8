//! Line format codec
//!
//! One record per line, `<name>|<key>|<note>\n`, UTF-8. Reading trims each
//! line, splits it into at most three columns and fills missing trailing
//! columns with empty strings. Lines are decoded independently, so one bad
//! line (invalid UTF-8 included) costs only that line.

use crate::error::{PersistError, RecordError};
use crate::record::{Record, SEPARATOR};

/// Append the encoded line for `record` to `out`
///
/// # Errors
/// Returns error if the record violates the field policy; nothing is
/// appended in that case.
pub fn encode_into(record: &Record, out: &mut String) -> Result<(), PersistError> {
    record.validate().map_err(|source| PersistError::Unencodable {
        key: record.key.clone(),
        source,
    })?;
    out.push_str(&record.name);
    out.push(SEPARATOR);
    out.push_str(&record.key);
    out.push(SEPARATOR);
    out.push_str(&record.note);
    out.push('\n');
    Ok(())
}

/// Decode one line
///
/// Returns `None` for blank lines, otherwise the record or the policy
/// violation that makes the line unusable.
pub fn decode_line(line: &str) -> Option<Result<Record, RecordError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut columns = line.splitn(3, SEPARATOR);
    let name = columns.next().unwrap_or_default();
    let key = columns.next().unwrap_or_default();
    let note = columns.next().unwrap_or_default();

    let record = Record::new(name, key, note);
    Some(record.validate().map(|()| record))
}

/// Decode a whole file, skipping blank and malformed lines
pub fn decode(bytes: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    for (number, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(reason) => {
                tracing::warn!(line = number + 1, %reason, "skipping malformed record line");
                continue;
            }
        };
        match decode_line(line) {
            None => {}
            Some(Ok(record)) => records.push(record),
            Some(Err(reason)) => {
                tracing::warn!(line = number + 1, %reason, "skipping malformed record line");
            }
        }
    }
    records
}
