// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for RecordSchema.

use std::collections::HashSet;
use std::sync::Arc;

use crate::dynamic::{FieldSchema, RecordSchema, TypeNode, UIntWidth};
use crate::error::{SchemaError, SchemaErrorKind};

/// Builder for creating [`RecordSchema`] instances.
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldSchema>,
}

impl RecordSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with an already resolved node.
    pub fn field(mut self, name: impl Into<String>, node: TypeNode) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            node,
        });
        self
    }

    pub fn uint_field(self, name: impl Into<String>, width: UIntWidth) -> Self {
        self.field(name, TypeNode::UInt(width))
    }

    pub fn bool_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeNode::Bool)
    }

    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeNode::Str)
    }

    pub fn bytes_field(self, name: impl Into<String>) -> Self {
        self.field(name, TypeNode::Bytes)
    }

    pub fn fixed_bytes_field(self, name: impl Into<String>, len: usize) -> Self {
        self.field(name, TypeNode::FixedBytes(len))
    }

    /// Add a nested record field.
    pub fn record_field(self, name: impl Into<String>, nested: &Arc<RecordSchema>) -> Self {
        self.field(name, TypeNode::Record(Arc::clone(nested)))
    }

    /// Build the schema.
    ///
    /// Field names must be non-empty and unique, and every field node must
    /// pass [`TypeNode::check_shape`]. The result is frozen: no API hands out
    /// mutable access to a built schema.
    pub fn build(self) -> Result<Arc<RecordSchema>, SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::new(SchemaErrorKind::EmptyFieldName).within(&self.name));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(
                    SchemaError::new(SchemaErrorKind::DuplicateField(field.name.clone()))
                        .within(&self.name),
                );
            }
            field
                .node
                .check_shape()
                .map_err(|e| e.within(&field.name).within(&self.name))?;
        }
        Ok(Arc::new(RecordSchema {
            name: self.name,
            fields: self.fields,
        }))
    }
}
