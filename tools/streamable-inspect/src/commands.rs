// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Command implementations. Each returns the text to print.

use std::path::PathBuf;

use anyhow::Context;
use streamable::dynamic::{self, resolve, GlobalScope, SchemaDocument};
use streamable::{registry, TypeNode};
use tracing::{debug, info};

/// Register the built-in records, then every schema document in order.
pub fn load_schemas(paths: &[PathBuf]) -> anyhow::Result<()> {
    registry::builtin().context("failed to register built-in records")?;
    for path in paths {
        let document = SchemaDocument::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let schemas = document
            .register()
            .with_context(|| format!("invalid schema in {}", path.display()))?;
        info!("loaded {} records from {}", schemas.len(), path.display());
    }
    Ok(())
}

fn resolve_type(ty: &str) -> anyhow::Result<TypeNode> {
    let node = resolve(ty, &GlobalScope).with_context(|| format!("cannot resolve type `{ty}`"))?;
    debug!("resolved `{}` to {} (min {} bytes)", ty, node, node.min_size());
    Ok(node)
}

pub fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("input is not valid hex")
}

pub fn types() -> String {
    let mut lines: Vec<String> = registry::names();
    lines.extend(
        registry::custom_names()
            .into_iter()
            .map(|name| format!("{name} (custom)")),
    );
    lines.join("\n")
}

pub fn describe(ty: &str) -> anyhow::Result<String> {
    let node = resolve_type(ty)?;
    let text = match &node {
        TypeNode::Record(schema) => {
            format!("{}min size: {} bytes", schema.describe(), schema.min_size())
        }
        other => format!("{other}\nmin size: {} bytes", other.min_size()),
    };
    Ok(text)
}

pub fn decode(ty: &str, bytes: &[u8], compact: bool) -> anyhow::Result<String> {
    let node = resolve_type(ty)?;
    let value = dynamic::decode_value(&node, bytes)
        .with_context(|| format!("failed to decode {} bytes as {node}", bytes.len()))?;
    let json = dynamic::value_to_json(&value, &node).context("decoded value does not fit its type")?;
    let text = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    Ok(text)
}

pub fn encode(ty: &str, json: &serde_json::Value) -> anyhow::Result<String> {
    let node = resolve_type(ty)?;
    let value = dynamic::value_from_json(&node, json)
        .with_context(|| format!("JSON does not match {node}"))?;
    let mut out = Vec::new();
    dynamic::encode_value(&value, &node, &mut out).with_context(|| format!("failed to encode {node}"))?;
    Ok(hex::encode(out))
}
