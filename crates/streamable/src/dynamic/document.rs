// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record declarations loaded from JSON schema documents.
//!
//! ```json
//! { "records": [ { "name": "Pair", "fields": [ { "name": "a", "type": "u32" } ] } ] }
//! ```
//!
//! Records are resolved in document order; a field may name any record
//! declared earlier in the document or already registered.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamic::resolver::{LocalScope, Resolver, Scope};
use crate::dynamic::RecordSchema;
use crate::error::{SchemaError, SchemaErrorKind};
use crate::registry;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read schema document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub records: Vec<RecordDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaDocument {
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Describe existing schemas as a document.
    pub fn from_schemas<'a>(schemas: impl IntoIterator<Item = &'a Arc<RecordSchema>>) -> Self {
        let records = schemas
            .into_iter()
            .map(|schema| RecordDecl {
                name: schema.name().to_string(),
                fields: schema
                    .fields()
                    .iter()
                    .map(|f| FieldDecl {
                        name: f.name().to_string(),
                        ty: f.node().to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self { records }
    }

    /// Resolve every declaration without registering anything.
    pub fn load(&self) -> Result<Vec<Arc<RecordSchema>>, SchemaError> {
        let mut resolver = Resolver::new(LocalScope::new());
        let mut loaded = Vec::with_capacity(self.records.len());
        for decl in &self.records {
            let mut builder = RecordSchema::builder(&decl.name);
            for field in &decl.fields {
                let node = resolver
                    .resolve(&field.ty)
                    .map_err(|e| e.within(&field.name).within(&decl.name))?;
                builder = builder.field(&field.name, node);
            }
            let schema = builder.build()?;
            if let Some(existing) = resolver.scope().record(&decl.name) {
                if *existing != *schema {
                    return Err(SchemaErrorKind::DuplicateRecord(decl.name.clone()).into());
                }
            }
            log::debug!("loaded record {} ({} fields)", schema.name(), schema.len());
            resolver.scope_mut().insert_record(Arc::clone(&schema));
            loaded.push(schema);
        }
        Ok(loaded)
    }

    /// Resolve and publish every declaration in the registry.
    pub fn register(&self) -> Result<Vec<Arc<RecordSchema>>, SchemaError> {
        self.load()?
            .into_iter()
            .map(registry::register_named)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "records": [
            { "name": "DocInner", "fields": [ { "name": "flag", "type": "bool" } ] },
            { "name": "DocOuter", "fields": [
                { "name": "items", "type": "Vec<DocInner>" },
                { "name": "id", "type": "Bytes32" }
            ] },
            { "name": "DocEmpty" }
        ]
    }"#;

    #[test]
    fn test_load_in_order() {
        let doc = SchemaDocument::from_json_str(DOC).expect("parse");
        let schemas = doc.load().expect("load");
        assert_eq!(schemas.len(), 3);
        assert_eq!(schemas[1].fields()[0].node().to_string(), "Vec<DocInner>");
        assert!(schemas[2].is_empty());
    }

    #[test]
    fn test_forward_reference_is_unknown() {
        let doc = SchemaDocument::from_json_str(
            r#"{ "records": [ { "name": "DocFwd", "fields": [ { "name": "next", "type": "Option<DocLater>" } ] } ] }"#,
        )
        .expect("parse");
        let err = doc.load().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::UnknownType("DocLater".into()));
        assert_eq!(err.trace.to_string(), "DocFwd.next");
    }

    #[test]
    fn test_unsupported_field_names_record_and_field() {
        let doc = SchemaDocument::from_json_str(
            r#"{ "records": [ { "name": "DocBad", "fields": [ { "name": "price", "type": "f64" } ] } ] }"#,
        )
        .expect("parse");
        let err = doc.load().unwrap_err();
        assert!(matches!(err.kind, SchemaErrorKind::UnsupportedType { .. }));
        assert_eq!(err.trace.to_string(), "DocBad.price");
    }

    #[test]
    fn test_redeclared_record_with_other_layout() {
        let doc = SchemaDocument::from_json_str(
            r#"{ "records": [
                { "name": "DocTwice", "fields": [ { "name": "a", "type": "u8" } ] },
                { "name": "DocTwice", "fields": [ { "name": "a", "type": "u16" } ] }
            ] }"#,
        )
        .expect("parse");
        assert_eq!(
            doc.load().unwrap_err().kind,
            SchemaErrorKind::DuplicateRecord("DocTwice".into())
        );
    }

    #[test]
    fn test_from_schemas_round_trip() {
        let doc = SchemaDocument::from_json_str(DOC).expect("parse");
        let schemas = doc.load().expect("load");
        let exported = SchemaDocument::from_schemas(&schemas);
        assert_eq!(exported, doc);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SchemaDocument::from_json_str("{ \"records\": 3 }"),
            Err(DocumentError::Json(_))
        ));
    }
}
