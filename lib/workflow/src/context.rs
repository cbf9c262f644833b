//! Run-scoped reference data shared across block executions.

use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Namespace holding the tabular rows blocks write into a spreadsheet.
pub const TABLE_NAMESPACE: &str = "table";

const EMPTY_ROWS: &[JsonValue] = &[];

/// The mutable, run-scoped map of named reference data.
///
/// Each integration handler owns a namespace; payload shapes are up to the
/// handler. The context lives for one run, is owned by the run's driver,
/// and is passed by reference to every block execution — block executions
/// within a run are sequential, so no interior locking is needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    data: HashMap<String, JsonValue>,
}

impl RunContext {
    /// Creates an empty run context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a namespace's payload, if present.
    #[must_use]
    pub fn namespace(&self, namespace: &str) -> Option<&JsonValue> {
        self.data.get(namespace)
    }

    /// Replaces a namespace's payload wholesale.
    pub fn set_namespace(&mut self, namespace: impl Into<String>, value: JsonValue) {
        self.data.insert(namespace.into(), value);
    }

    /// Writes a keyed reference into a namespace, creating the namespace
    /// object on demand. A namespace previously holding a non-object
    /// payload is replaced.
    pub fn set_reference(&mut self, namespace: &str, key: &str, value: JsonValue) {
        let entry = self
            .data
            .entry(namespace.to_owned())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if !entry.is_object() {
            *entry = JsonValue::Object(Map::new());
        }
        if let Some(map) = entry.as_object_mut() {
            map.insert(key.to_owned(), value);
        }
    }

    /// Reads a keyed reference from a namespace.
    #[must_use]
    pub fn reference(&self, namespace: &str, key: &str) -> Option<&JsonValue> {
        self.data.get(namespace)?.as_object()?.get(key)
    }

    /// The shared tabular input rows, or an empty slice when none are set.
    #[must_use]
    pub fn table_rows(&self) -> &[JsonValue] {
        match self.data.get(TABLE_NAMESPACE) {
            Some(JsonValue::Array(rows)) => rows,
            _ => EMPTY_ROWS,
        }
    }

    /// Replaces the shared tabular input rows.
    pub fn set_table_rows(&mut self, rows: Vec<JsonValue>) {
        self.data
            .insert(TABLE_NAMESPACE.to_owned(), JsonValue::Array(rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_reference_creates_namespace_on_demand() {
        let mut ctx = RunContext::new();
        ctx.set_reference("googleSheets", "products", json!([{"sku": "a-1"}]));

        assert_eq!(
            ctx.reference("googleSheets", "products"),
            Some(&json!([{"sku": "a-1"}]))
        );
        assert!(ctx.reference("googleSheets", "orders").is_none());
    }

    #[test]
    fn set_reference_replaces_non_object_namespace() {
        let mut ctx = RunContext::new();
        ctx.set_namespace("googleSheets", json!("scalar"));
        ctx.set_reference("googleSheets", "rows", json!([]));

        assert_eq!(ctx.reference("googleSheets", "rows"), Some(&json!([])));
    }

    #[test]
    fn table_rows_default_to_empty() {
        let ctx = RunContext::new();
        assert!(ctx.table_rows().is_empty());

        let mut ctx = RunContext::new();
        ctx.set_table_rows(vec![json!({"name": "x"})]);
        assert_eq!(ctx.table_rows().len(), 1);
    }
}
