//! Conversions between rectangular value ranges and keyed records.

use serde_json::{Map, Value as JsonValue};

/// Reshapes a rectangular range into records keyed by its first row.
///
/// Row 0 supplies the keys for every subsequent row. Rows shorter than the
/// header produce partial records; this is accepted, not corrected.
#[must_use]
pub fn rows_to_records(rows: &[Vec<JsonValue>]) -> Vec<JsonValue> {
    let Some((header, rest)) = rows.split_first() else {
        return Vec::new();
    };
    let keys: Vec<String> = header.iter().map(cell_key).collect();

    rest.iter()
        .map(|row| {
            let mut record = Map::new();
            for (key, value) in keys.iter().zip(row) {
                record.insert(key.clone(), value.clone());
            }
            JsonValue::Object(record)
        })
        .collect()
}

/// Extracts plain row-major value rows from a list of records.
#[must_use]
pub fn records_to_rows(records: &[JsonValue]) -> Vec<Vec<JsonValue>> {
    records
        .iter()
        .map(|record| match record {
            JsonValue::Object(map) => map.values().cloned().collect(),
            other => vec![other.clone()],
        })
        .collect()
}

/// Converts records into a header row of first-seen keys followed by one
/// column-major value row per key.
///
/// Records missing a key contribute nothing to that key's row, so ragged
/// input yields ragged columns.
#[must_use]
pub fn records_to_columns(records: &[JsonValue]) -> Vec<Vec<JsonValue>> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        if let JsonValue::Object(map) = record {
            for key in map.keys() {
                if !keys.iter().any(|seen| seen == key) {
                    keys.push(key.clone());
                }
            }
        }
    }

    let mut values = Vec::with_capacity(keys.len() + 1);
    values.push(keys.iter().map(|key| JsonValue::String(key.clone())).collect());
    for key in &keys {
        values.push(
            records
                .iter()
                .filter_map(|record| record.as_object()?.get(key).cloned())
                .collect(),
        );
    }
    values
}

fn cell_key(cell: &JsonValue) -> String {
    match cell {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_row_becomes_record_keys() {
        let rows = vec![
            vec![json!("a"), json!("b")],
            vec![json!("1"), json!("2")],
        ];
        assert_eq!(rows_to_records(&rows), vec![json!({"a": "1", "b": "2"})]);
    }

    #[test]
    fn short_rows_produce_partial_records() {
        let rows = vec![
            vec![json!("a"), json!("b"), json!("c")],
            vec![json!(1), json!(2)],
        ];
        assert_eq!(rows_to_records(&rows), vec![json!({"a": 1, "b": 2})]);
    }

    #[test]
    fn empty_range_produces_no_records() {
        assert!(rows_to_records(&[]).is_empty());
        assert!(rows_to_records(&[vec![json!("only-header")]]).is_empty());
    }

    #[test]
    fn non_string_header_cells_are_stringified() {
        let rows = vec![vec![json!(7)], vec![json!("x")]];
        assert_eq!(rows_to_records(&rows), vec![json!({"7": "x"})]);
    }

    #[test]
    fn records_to_rows_extracts_values() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})];
        assert_eq!(
            records_to_rows(&records),
            vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]]
        );
    }

    #[test]
    fn records_to_columns_emits_header_then_per_key_rows() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})];
        assert_eq!(
            records_to_columns(&records),
            vec![
                vec![json!("a"), json!("b")],
                vec![json!(1), json!(3)],
                vec![json!(2), json!(4)],
            ]
        );
    }

    #[test]
    fn records_to_columns_tolerates_missing_keys() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
        assert_eq!(
            records_to_columns(&records),
            vec![
                vec![json!("a"), json!("b")],
                vec![json!(1), json!(3)],
                vec![json!(2)],
            ]
        );
    }
}
