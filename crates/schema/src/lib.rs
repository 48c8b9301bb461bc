//! Static document schemas and per-session document data.
//!
//! A `DocumentKind` selects one of the built-in templates; its `FieldSchema`
//! is the static, ordered list of editable fields the form renders. The
//! tables are configuration, not behavior: they are defined once at compile
//! time and never mutated.

pub mod data;
pub mod fields;
pub mod kind;

pub use data::{DocumentData, FieldValue};
pub use fields::{FieldDefault, FieldDescriptor, FieldType, SelectOption, schema_for};
pub use kind::{ALL_KINDS, DocumentKind};
