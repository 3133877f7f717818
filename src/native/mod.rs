// src/native/mod.rs

//! Native event data model (target side)
//!
//! Statically-typed model the converter writes into: an in-memory store of
//! named collections of concrete record structs plus a string metadata
//! table. Cross-references are explicit [`Ref`] values that are pending,
//! resolved or absent, which is what makes two-phase conversion possible
//! without lifetime coupling between passes.

pub mod records;

pub use records::{
    CaloContribution, CaloHit, Cluster, EventHeader, McParticle, ParticleId, RecoParticle,
    SimCaloHit, SimTrackerHit, Track, TrackerHit, Vertex,
};

use crate::error::{Error, Result};
use crate::legacy::{RecId, TypeTag};
use std::collections::{BTreeMap, HashMap};

/// Identity of a converted record in the native store
///
/// Collection names are unique per store, so (name, index) pins down one
/// record without holding a live reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub collection: String,
    pub index: u32,
}

impl Placement {
    pub fn new(collection: impl Into<String>, index: u32) -> Self {
        Self {
            collection: collection.into(),
            index,
        }
    }
}

/// A native-side reference value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Ref {
    /// Placeholder written during the first conversion pass, keyed by the
    /// source record's identity
    Pending(RecId),
    /// Resolved reference to a converted record
    Target(Placement),
    /// Explicitly unresolved: the source reference was null, or the
    /// referent's collection was never converted
    #[default]
    Absent,
}

impl Ref {
    /// Placeholder for a source reference (`None` becomes [`Ref::Absent`])
    pub fn from_source(id: Option<RecId>) -> Self {
        match id {
            Some(id) => Ref::Pending(id),
            None => Ref::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Ref::Absent)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Ref::Pending(_))
    }

    /// The resolved placement, if this reference has one
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Ref::Target(placement) => Some(placement),
            _ => None,
        }
    }
}

/// One entry of a typed association collection
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: Ref,
    pub to: Ref,
    pub weight: f32,
}

/// Typed association collection synthesized from a generic relation
/// collection
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCollection {
    /// Endpoint types, when the source collection declared them
    pub from_kind: Option<TypeTag>,
    pub to_kind: Option<TypeTag>,
    pub entries: Vec<Link>,
}

/// View collection: references into other collections, no data of its own
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetCollection {
    pub kind: TypeTag,
    pub refs: Vec<Ref>,
}

/// A named collection's payload in the native store
#[derive(Debug, Clone)]
pub enum NativeCollection {
    EventHeaders(Vec<EventHeader>),
    McParticles(Vec<McParticle>),
    SimTrackerHits(Vec<SimTrackerHit>),
    TrackerHits(Vec<TrackerHit>),
    Tracks(Vec<Track>),
    SimCaloHits(Vec<SimCaloHit>),
    CaloHits(Vec<CaloHit>),
    Clusters(Vec<Cluster>),
    Vertices(Vec<Vertex>),
    RecoParticles(Vec<RecoParticle>),
    ParticleIds(Vec<ParticleId>),
    CaloContributions(Vec<CaloContribution>),
    Links(LinkCollection),
    Subset(SubsetCollection),
}

impl NativeCollection {
    pub fn len(&self) -> usize {
        match self {
            Self::EventHeaders(v) => v.len(),
            Self::McParticles(v) => v.len(),
            Self::SimTrackerHits(v) => v.len(),
            Self::TrackerHits(v) => v.len(),
            Self::Tracks(v) => v.len(),
            Self::SimCaloHits(v) => v.len(),
            Self::CaloHits(v) => v.len(),
            Self::Clusters(v) => v.len(),
            Self::Vertices(v) => v.len(),
            Self::RecoParticles(v) => v.len(),
            Self::ParticleIds(v) => v.len(),
            Self::CaloContributions(v) => v.len(),
            Self::Links(l) => l.entries.len(),
            Self::Subset(s) => s.refs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Qualified metadata key for a per-collection parameter
pub fn metadata_param_name(collection: &str, key: &str) -> String {
    format!("{collection}__{key}")
}

/// In-memory event data store for the native model
///
/// Collection names are unique; registration order is preserved. Converted
/// collections are handed off to the store by value and owned by it from
/// then on.
#[derive(Debug, Default)]
pub struct NativeStore {
    collections: Vec<(String, NativeCollection)>,
    index: HashMap<String, usize>,
    metadata: BTreeMap<String, String>,
}

impl NativeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all registered collections, in registration order
    pub fn available_collections(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|(name, _)| name.as_str())
    }

    /// True if a collection with this name is already registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Take ownership of a collection under `name`
    ///
    /// Rejects duplicate names; the caller is expected to have checked
    /// [`is_registered`](Self::is_registered) first.
    pub fn register(&mut self, name: impl Into<String>, coll: NativeCollection) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateCollection(name));
        }
        self.index.insert(name.clone(), self.collections.len());
        self.collections.push((name, coll));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NativeCollection> {
        self.index.get(name).map(|&pos| &self.collections[pos].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NativeCollection> {
        let pos = *self.index.get(name)?;
        Some(&mut self.collections[pos].1)
    }

    /// All collections with their names, in registration order
    pub fn collections_mut(&mut self) -> impl Iterator<Item = (&str, &mut NativeCollection)> {
        self.collections.iter_mut().map(|(name, c)| (name.as_str(), c))
    }

    /// Store an event-level metadata parameter
    pub fn put_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Read back an event-level metadata parameter
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
