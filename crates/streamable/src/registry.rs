// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide schema registry.
//!
//! Append-only: a schema is published once and never replaced.
//!
//! - Typed records are memoized by `TypeId`. The schema is built completely
//!   before it is published, so no reader ever sees a partial schema; when
//!   two threads race on first use, the first publish wins and the loser
//!   adopts it.
//! - Every record is also indexed by name so tools can resolve it at
//!   runtime. Records declared at runtime (schema documents) go through
//!   [`register_named`].
//! - Custom leaf codecs are indexed by name.

use std::any::TypeId;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::dynamic::{CustomCodec, RecordSchema};
use crate::error::{SchemaError, SchemaErrorKind};

static TYPED: OnceLock<DashMap<TypeId, Arc<RecordSchema>>> = OnceLock::new();
static NAMED: OnceLock<DashMap<String, Arc<RecordSchema>>> = OnceLock::new();
static CUSTOM: OnceLock<DashMap<&'static str, CustomCodec>> = OnceLock::new();

thread_local! {
    /// Typed records currently being built on this thread.
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

fn typed() -> &'static DashMap<TypeId, Arc<RecordSchema>> {
    TYPED.get_or_init(DashMap::new)
}

fn named() -> &'static DashMap<String, Arc<RecordSchema>> {
    NAMED.get_or_init(DashMap::new)
}

fn customs() -> &'static DashMap<&'static str, CustomCodec> {
    CUSTOM.get_or_init(DashMap::new)
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Pops the resolution stack even if `build` unwinds.
struct ResolvingGuard;

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Schema for the typed record `T`, built by `build` on first use.
///
/// `build` runs outside any registry lock. If `T` is reached again while its
/// own schema is still being built (a record that contains itself through
/// some other record), this fails with `RecursiveRecord`.
pub fn record_schema<T: 'static>(
    build: impl FnOnce() -> Result<Arc<RecordSchema>, SchemaError>,
) -> Result<Arc<RecordSchema>, SchemaError> {
    let id = TypeId::of::<T>();
    if let Some(schema) = typed().get(&id).map(|entry| Arc::clone(entry.value())) {
        return Ok(schema);
    }

    let recursive = RESOLVING.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&id) {
            true
        } else {
            stack.push(id);
            false
        }
    });
    if recursive {
        return Err(SchemaErrorKind::RecursiveRecord(short_type_name::<T>().to_string()).into());
    }
    let schema = {
        let _guard = ResolvingGuard;
        build()?
    };

    let published = match typed().entry(id) {
        Entry::Occupied(entry) => {
            if **entry.get() != *schema {
                log::warn!(
                    "record {} was published concurrently with a different layout; keeping the first",
                    schema.name()
                );
            }
            Arc::clone(entry.get())
        }
        Entry::Vacant(entry) => {
            log::debug!(
                "published record {} ({} fields, min {} bytes)",
                schema.name(),
                schema.len(),
                schema.min_size()
            );
            entry.insert(Arc::clone(&schema));
            schema
        }
    };
    index_by_name(&published);
    Ok(published)
}

fn index_by_name(schema: &Arc<RecordSchema>) {
    match named().entry(schema.name().to_string()) {
        Entry::Occupied(entry) => {
            if **entry.get() != **schema {
                log::warn!(
                    "record name {} is already taken by a different layout; lookups keep the first",
                    schema.name()
                );
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(Arc::clone(schema));
        }
    }
}

/// Publish a record declared at runtime under its name.
///
/// Registering an identical schema again returns the published one; a
/// different schema under a taken name is `DuplicateRecord`.
pub fn register_named(schema: Arc<RecordSchema>) -> Result<Arc<RecordSchema>, SchemaError> {
    match named().entry(schema.name().to_string()) {
        Entry::Occupied(entry) => {
            if **entry.get() == *schema {
                Ok(Arc::clone(entry.get()))
            } else {
                Err(SchemaErrorKind::DuplicateRecord(schema.name().to_string()).into())
            }
        }
        Entry::Vacant(entry) => {
            log::debug!("registered record {} ({} fields)", schema.name(), schema.len());
            entry.insert(Arc::clone(&schema));
            Ok(schema)
        }
    }
}

pub fn lookup(name: &str) -> Option<Arc<RecordSchema>> {
    named().get(name).map(|entry| Arc::clone(entry.value()))
}

/// Registered record names, sorted.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = named().iter().map(|entry| entry.key().clone()).collect();
    names.sort();
    names
}

pub fn register_custom(codec: CustomCodec) {
    customs().entry(codec.name).or_insert(codec);
}

pub fn custom(name: &str) -> Option<CustomCodec> {
    customs().get(name).map(|entry| *entry.value())
}

/// Registered custom codec names, sorted.
pub fn custom_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = customs().iter().map(|entry| *entry.key()).collect();
    names.sort_unstable();
    names
}

/// Register every built-in record and custom leaf. Idempotent.
pub fn builtin() -> Result<(), SchemaError> {
    use crate::protocols::introducer::{RequestPeersIntroducer, RespondPeersIntroducer};
    use crate::protocols::simulator::{FarmNewBlockProtocol, ReorgProtocol};
    use crate::types::{
        BlockIdentifier, ClassgroupElement, Coin, ConditionWithArgs, PoolTarget, SignagePoint,
        TimestampedPeerInfo, VDFInfo, VDFProof, CONDITION_OPCODE, SERIALIZED_PROGRAM,
    };
    use crate::Streamable;

    register_custom(SERIALIZED_PROGRAM);
    register_custom(CONDITION_OPCODE);

    Coin::type_node()?;
    BlockIdentifier::type_node()?;
    PoolTarget::type_node()?;
    ClassgroupElement::type_node()?;
    VDFInfo::type_node()?;
    VDFProof::type_node()?;
    SignagePoint::type_node()?;
    ConditionWithArgs::type_node()?;
    TimestampedPeerInfo::type_node()?;
    RequestPeersIntroducer::type_node()?;
    RespondPeersIntroducer::type_node()?;
    FarmNewBlockProtocol::type_node()?;
    ReorgProtocol::type_node()?;
    Ok(())
}
