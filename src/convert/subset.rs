// src/convert/subset.rs

//! Subset (view) collection materialization
//!
//! Deferred until after the resolution pass: a view's referents may live in
//! collections converted at any point of the first pass, so the view can
//! only be filled once the whole resolution state exists.

use crate::convert::resolution::ResolutionState;
use crate::legacy::{LegacyCollection, TypeTag};
use crate::native::{NativeCollection, Ref, SubsetCollection};
use tracing::debug;

/// Fill a deferred view collection through the resolution state
///
/// The result has the same length and element order as the source view.
/// Elements whose referent was never converted become absent entries.
/// Returns `None` for views of relation collections, which have no
/// per-record identity to look up.
pub fn fill_subset(
    coll: &LegacyCollection,
    state: &ResolutionState,
    tag: TypeTag,
) -> Option<NativeCollection> {
    let map = state.map(tag)?;
    let refs = coll
        .entries
        .iter()
        .map(|entry| match map.get(&entry.id) {
            Some(placement) => Ref::Target(placement.clone()),
            None => {
                debug!("view element {:?} has no converted counterpart", entry.id);
                Ref::Absent
            }
        })
        .collect();
    Some(NativeCollection::Subset(SubsetCollection { kind: tag, refs }))
}
