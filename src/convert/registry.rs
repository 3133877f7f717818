// src/convert/registry.rs

//! Target-side collection registry
//!
//! Dedup guard in front of the native store, plus propagation of recognized
//! per-collection metadata. All registration problems are collection-level:
//! logged and counted, never fatal to the event. The one exception is the
//! event header, whose failure is structural.

use crate::error::{Error, Result};
use crate::legacy::LegacyCollection;
use crate::native::{metadata_param_name, NativeCollection, NativeStore};
use tracing::{debug, error};

/// The one per-collection parameter propagated into target metadata
pub const CELL_ID_ENCODING: &str = "CellIDEncoding";

/// Guards one conversion's view of the native store
pub struct CollectionRegistry<'a> {
    store: &'a mut NativeStore,
    /// Collections handed to the store by this conversion
    pub registered: u32,
    /// Conversions that produced no collection or were rejected by the store
    pub failed: u32,
}

impl<'a> CollectionRegistry<'a> {
    pub fn new(store: &'a mut NativeStore) -> Self {
        Self {
            store,
            registered: 0,
            failed: 0,
        }
    }

    /// True if a collection with this name is already registered
    ///
    /// Checked before every conversion attempt; an existing collection is
    /// never reconverted.
    pub fn exists(&self, name: &str) -> bool {
        if self.store.is_registered(name) {
            debug!("collection {name} already registered, skipping conversion");
            return true;
        }
        false
    }

    /// Hand a converted collection to the store
    ///
    /// A `None` collection (the converter produced nothing) and a rejected
    /// registration are both logged and counted, and the rest of the event
    /// proceeds. On success, a recognized metadata parameter on the source
    /// collection is copied into store metadata under a name-qualified key.
    pub fn register(
        &mut self,
        name: &str,
        coll: Option<NativeCollection>,
        source: Option<&LegacyCollection>,
    ) {
        let Some(coll) = coll else {
            error!("could not convert collection {name}");
            self.failed += 1;
            return;
        };

        if let Err(err) = self.store.register(name, coll) {
            error!("could not register collection {name}: {err}");
            self.failed += 1;
            return;
        }
        self.registered += 1;

        if let Some(source) = source {
            for (key, value) in &source.parameters {
                if key == CELL_ID_ENCODING {
                    self.store
                        .put_parameter(metadata_param_name(name, CELL_ID_ENCODING), value.clone());
                }
                // TODO: where the remaining parameter keys should end up is
                // still undecided upstream; they are dropped for now
            }
        }
    }

    /// Register the event header; rejection here aborts the conversion
    pub fn register_header(&mut self, name: &str, coll: NativeCollection) -> Result<()> {
        self.store
            .register(name, coll)
            .map_err(|err| Error::Header(err.to_string()))?;
        self.registered += 1;
        Ok(())
    }

    /// Mutable access to the underlying store, for the passes that rewrite
    /// already-registered records
    pub fn store_mut(&mut self) -> &mut NativeStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::{LegacyCollection, TypeTag};

    #[test]
    fn test_exists_after_register() {
        let mut store = NativeStore::new();
        let mut registry = CollectionRegistry::new(&mut store);

        assert!(!registry.exists("Hits"));
        registry.register("Hits", Some(NativeCollection::TrackerHits(Vec::new())), None);
        assert!(registry.exists("Hits"));
        assert_eq!(registry.registered, 1);
        assert_eq!(registry.failed, 0);
    }

    #[test]
    fn test_missing_collection_is_counted_not_registered() {
        let mut store = NativeStore::new();
        let mut registry = CollectionRegistry::new(&mut store);

        registry.register("Hits", None, None);
        assert_eq!(registry.failed, 1);
        assert!(!store.is_registered("Hits"));
    }

    #[test]
    fn test_store_rejection_is_contained() {
        let mut store = NativeStore::new();
        store
            .register("Hits", NativeCollection::TrackerHits(Vec::new()))
            .unwrap();
        let mut registry = CollectionRegistry::new(&mut store);

        registry.register("Hits", Some(NativeCollection::CaloHits(Vec::new())), None);
        assert_eq!(registry.failed, 1);
        assert_eq!(registry.registered, 0);
    }

    #[test]
    fn test_recognized_metadata_is_propagated() {
        let mut store = NativeStore::new();
        let source = LegacyCollection::owning(TypeTag::TrackerHit)
            .with_parameter(CELL_ID_ENCODING, "M:3,S:-2")
            .with_parameter("Color", "red");

        let mut registry = CollectionRegistry::new(&mut store);
        registry.register(
            "Hits",
            Some(NativeCollection::TrackerHits(Vec::new())),
            Some(&source),
        );

        assert_eq!(store.parameter("Hits__CellIDEncoding"), Some("M:3,S:-2"));
        assert_eq!(store.parameter("Hits__Color"), None);
    }
}
