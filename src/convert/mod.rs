// src/convert/mod.rs

//! Whole-event conversion orchestration
//!
//! Drives the conversion of one legacy event into the native store: event
//! header first, then the mapped collections — immediate conversions
//! eagerly, views and relations deferred — then the resolution,
//! materialization and synthesis passes over the accumulated state.
//! Per-collection problems are contained (logged, counted); only structural
//! failures abort the call.

pub mod assoc;
pub mod contrib;
pub mod records;
pub mod registry;
pub mod resolution;
pub mod resolve;
pub mod subset;

pub use registry::{CollectionRegistry, CELL_ID_ENCODING};
pub use resolution::ResolutionState;

use crate::error::Result;
use crate::legacy::{LegacyCollection, LegacyEvent, TypeTag};
use crate::mapping::ConverterConfig;
use crate::native::NativeStore;
use tracing::{debug, error, warn};

/// Outcome counters for one event conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Collections handed to the store by this conversion
    pub registered: u32,
    /// Mapping entries whose source collection was missing from the event
    pub skipped_missing: u32,
    /// Mapping entries whose destination already existed in the store
    pub skipped_existing: u32,
    /// Conversions that produced no collection or were rejected by the store
    pub failed: u32,
}

/// Converts legacy events into the native model
///
/// One converter can serve many events; all per-event state lives inside
/// [`convert_event`](Self::convert_event). Converting the same event into
/// the same store twice registers nothing the second time (the registry
/// dedup guard sees every destination name already taken).
#[derive(Debug, Clone, Default)]
pub struct EventConverter {
    config: ConverterConfig,
}

impl EventConverter {
    /// Create a converter with the given configuration
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Create a converter with default options (no mapping, no convert-all)
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Instance label, used to prefix derived collection names
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Convert one event's collections into `store`
    ///
    /// Missing source collections, conversions that produce nothing and
    /// rejected registrations are logged and counted in the summary; the
    /// rest of the event is converted regardless. The only fatal condition
    /// is a store that cannot take the event header.
    pub fn convert_event(
        &self,
        event: &LegacyEvent,
        store: &mut NativeStore,
    ) -> Result<ConversionSummary> {
        let mut registry = CollectionRegistry::new(store);

        // Event header first, outside the mapping loop
        if !registry.exists(records::EVENT_HEADER_NAME) {
            registry.register_header(records::EVENT_HEADER_NAME, records::create_event_header(event))?;
        }

        // Start from the configured mapping; with convert_all, identity
        // entries cover the rest of the event (first writer wins, so
        // explicit entries are never overridden)
        let mut mapping = self.config.collections.clone();
        if self.config.convert_all {
            for name in event.collection_names() {
                mapping.insert_if_absent(name, name);
            }
        }

        let mut state = ResolutionState::new();
        let mut subset_colls: Vec<(String, &LegacyCollection, TypeTag)> = Vec::new();
        let mut relation_colls: Vec<(String, &LegacyCollection)> = Vec::new();
        let mut skipped_missing = 0u32;
        let mut skipped_existing = 0u32;

        for (source_name, dest_name) in mapping.iter() {
            let Some(coll) = event.collection(source_name) else {
                warn!("collection {source_name} not found in the event, skipping conversion");
                skipped_missing += 1;
                continue;
            };
            debug!(
                "converting collection {source_name} (storing it as {dest_name}), type {}",
                coll.type_tag
            );
            if registry.exists(dest_name) {
                skipped_existing += 1;
                continue;
            }

            // Views and relations are dealt with once all data is converted
            if coll.subset {
                subset_colls.push((dest_name.to_string(), coll, coll.type_tag));
                continue;
            }
            if coll.type_tag == TypeTag::Relation {
                relation_colls.push((dest_name.to_string(), coll));
            }

            for (name, converted) in records::convert_collection(dest_name, coll, &mut state) {
                if converted.is_some() {
                    registry.register(&name, converted, Some(coll));
                } else {
                    error!(
                        "could not convert collection {source_name} (type: {})",
                        coll.type_tag
                    );
                    registry.failed += 1;
                }
            }
        }

        // Now relations, views and associations can be resolved
        resolve::resolve_references(registry.store_mut(), &state);

        for (name, coll, tag) in &subset_colls {
            registry.register(name, subset::fill_subset(coll, &state, *tag), None);
        }

        for (name, links) in assoc::create_associations(&state, &relation_colls) {
            registry.register(&name, links, None);
        }

        if !state.sim_calo_hits.is_empty() {
            let name = format!("{}{}", self.config.label, contrib::CALO_CONTRIBUTIONS_SUFFIX);
            contrib::create_calo_contributions(&name, event, &state, &mut registry);
        }

        Ok(ConversionSummary {
            registered: registry.registered,
            skipped_missing,
            skipped_existing,
            failed: registry.failed,
        })
    }
}
