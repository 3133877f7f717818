// src/convert/assoc.rs

//! Association synthesis from generic relation collections
//!
//! Relation collections link records of arbitrary converted types, so they
//! can only be turned into typed association collections once the resolution
//! state covers every first-pass conversion. Endpoint types come from the
//! source collection's `FromType` / `ToType` parameters when present;
//! otherwise each endpoint is found by searching all type maps.

use crate::convert::resolution::ResolutionState;
use crate::legacy::{LegacyCollection, LegacyRecord, RecId, TypeTag};
use crate::native::{Link, LinkCollection, NativeCollection, Ref};
use tracing::warn;

/// Relation collection parameter naming the "from" endpoint type
pub const FROM_TYPE: &str = "FromType";
/// Relation collection parameter naming the "to" endpoint type
pub const TO_TYPE: &str = "ToType";

/// Convert the deferred relation collections into typed association
/// collections, one result per deferred entry
pub fn create_associations(
    state: &ResolutionState,
    relations: &[(String, &LegacyCollection)],
) -> Vec<(String, Option<NativeCollection>)> {
    relations
        .iter()
        .map(|(dest, coll)| (dest.clone(), create_links(coll, state)))
        .collect()
}

fn create_links(coll: &LegacyCollection, state: &ResolutionState) -> Option<NativeCollection> {
    let from_kind = endpoint_kind(coll, FROM_TYPE);
    let to_kind = endpoint_kind(coll, TO_TYPE);

    let mut entries = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::Relation(rel) = &entry.rec else {
            return None;
        };
        entries.push(Link {
            from: resolve_endpoint(rel.from, from_kind, state),
            to: resolve_endpoint(rel.to, to_kind, state),
            weight: rel.weight,
        });
    }
    Some(NativeCollection::Links(LinkCollection {
        from_kind,
        to_kind,
        entries,
    }))
}

/// Declared endpoint type of a relation collection, if any
fn endpoint_kind(coll: &LegacyCollection, key: &str) -> Option<TypeTag> {
    let raw = coll.parameters.get(key)?;
    match raw.parse::<TypeTag>() {
        Ok(tag) => Some(tag),
        Err(_) => {
            warn!("unknown relation endpoint type {raw}, resolving by search");
            None
        }
    }
}

fn resolve_endpoint(id: Option<RecId>, kind: Option<TypeTag>, state: &ResolutionState) -> Ref {
    let Some(id) = id else {
        return Ref::Absent;
    };
    let placement = match kind {
        Some(tag) => state.lookup(tag, id),
        None => state.lookup_any(id).map(|(_, placement)| placement),
    };
    match placement {
        Some(placement) => Ref::Target(placement.clone()),
        None => Ref::Absent,
    }
}
