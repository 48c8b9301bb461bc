//! The mutable per-session document content.

use crate::fields::{FieldDefault, schema_for};
use crate::kind::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value. Form inputs deliver text; numeric fields may hold
/// either a parsed number or the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Field-id → value mapping for the active document kind.
///
/// Keys are always a subset of the active schema's ids: writes to unknown
/// ids are dropped (with a warning) rather than growing the map. The map is
/// rebuilt from schema defaults whenever the kind changes and lives only in
/// memory for the duration of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    kind: DocumentKind,
    values: BTreeMap<String, FieldValue>,
}

impl DocumentData {
    /// Builds the initial data for a kind from its schema: declared defaults
    /// where present, the empty string for text-like fields, nothing for the
    /// rest (dates, numbers, separators).
    pub fn from_defaults(kind: DocumentKind) -> Self {
        let mut values = BTreeMap::new();
        for f in schema_for(kind) {
            match f.default {
                Some(FieldDefault::Text(s)) => {
                    values.insert(f.id.to_string(), FieldValue::Text(s.to_string()));
                }
                Some(FieldDefault::Number(n)) => {
                    values.insert(f.id.to_string(), FieldValue::Number(n));
                }
                None if f.field_type.is_text_like() => {
                    values.insert(f.id.to_string(), FieldValue::Text(String::new()));
                }
                None => {}
            }
        }
        Self { kind, values }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Sets a field value. Ids outside the active schema (or separator
    /// slots) are ignored so the key set stays a subset of the schema.
    pub fn set(&mut self, id: &str, value: impl Into<FieldValue>) {
        let known = schema_for(self.kind)
            .iter()
            .any(|f| f.id == id && !matches!(f.field_type, crate::fields::FieldType::Separator));
        if !known {
            log::warn!("Ignoring edit to unknown field '{}' for kind {:?}", id, self.kind);
            return;
        }
        self.values.insert(id.to_string(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    /// The field as text; absent and numeric values read as empty.
    pub fn text(&self, id: &str) -> &str {
        match self.values.get(id) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    /// The field as a number, parsing text input the way a form would.
    pub fn number(&self, id: &str) -> Option<f64> {
        match self.values.get(id)? {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}
