//! Row resolution and the batch normalization driver.
//!
//! Cells arrive as loosely-typed JSON values (strings, numbers, blanks).
//! Each canonical field applies its own coercion: the key keeps digits
//! only, the score tolerates comma and Arabic-comma decimal separators,
//! text is trimmed and capped. Rows that resolve without a usable key or
//! any name are dropped, counted, and never fail the batch.

use crate::normalize::mapping::ColumnMapping;
use crate::normalize::{NormalizeError, NormalizeOptions};
use crate::record::{Dossier, FieldKind, StudentRecord};
use serde_json::Value;

/// One sheet row: original header -> raw cell value, in sheet column order.
pub type Row = serde_json::Map<String, Value>;

/// Result of normalizing one sheet.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub records: Vec<StudentRecord>,
    pub mapping: ColumnMapping,
    /// Rows received, including ones dropped for failing validation.
    pub rows_in: usize,
    pub rows_dropped: usize,
}

/// Render a raw cell as text. Integral numbers print without a decimal
/// point, so a numeric key cell `77` and a text cell `"77"` coerce alike.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Trim and cap a text cell. Truncation counts characters, never splits
/// one, and marks the cut with a trailing ellipsis.
pub fn clean_text(value: &Value, cap: usize) -> String {
    let text = cell_text(value);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(cap) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Parse the unique key: ASCII digits kept, everything else stripped.
/// Empty or overflowing digit runs yield 0, which marks the record
/// non-indexable downstream.
pub fn parse_dossier(value: &Value) -> Dossier {
    let digits: String = cell_text(value)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a decimal score. Comma and Arabic comma (U+060C) act as decimal
/// separators; remaining non-numeric characters are stripped; anything
/// unparsable yields 0.0.
pub fn parse_score(value: &Value) -> f64 {
    let cleaned: String = cell_text(value)
        .chars()
        .map(|c| if c == ',' || c == '،' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Resolve one row into a canonical record. Unmapped fields and missing
/// cells keep their defaults.
pub fn resolve_record(mapping: &ColumnMapping, row: &Row, opts: &NormalizeOptions) -> StudentRecord {
    let mut record = StudentRecord::default();
    for (field, header) in mapping.mapped() {
        let Some(value) = row.get(header) else {
            continue;
        };
        match field.kind() {
            FieldKind::Key => record.dossier = parse_dossier(value),
            FieldKind::Decimal => record.score = parse_score(value),
            FieldKind::Text => {
                if let Some(slot) = record.text_field_mut(field) {
                    *slot = clean_text(value, opts.text_cap);
                }
            }
        }
    }
    record
}

/// Normalize a whole sheet: map columns from the first row's headers,
/// resolve every row, drop invalid records silently.
///
/// Hard failures: no rows at all, no recognizable columns, or every row
/// dropped by validation.
pub fn normalize_rows(rows: &[Row], opts: &NormalizeOptions) -> Result<NormalizedBatch, NormalizeError> {
    let first = rows.first().ok_or(NormalizeError::EmptyDataset)?;
    let headers: Vec<String> = first.keys().cloned().collect();

    let mapping = ColumnMapping::build(&headers, opts);
    if mapping.is_empty() {
        return Err(NormalizeError::NoColumnsMatched);
    }

    let rows_in = rows.len();
    let mut records = Vec::with_capacity(rows_in);
    for row in rows {
        let record = resolve_record(&mapping, row, opts);
        if record.is_indexable() {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(NormalizeError::NoValidRecords);
    }

    let rows_dropped = rows_in - records.len();
    Ok(NormalizedBatch {
        records,
        mapping,
        rows_in,
        rows_dropped,
    })
}
