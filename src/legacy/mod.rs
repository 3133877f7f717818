// src/legacy/mod.rs

//! Legacy event data model (source side)
//!
//! Runtime-typed model: an event holds named collections of records, each
//! collection declaring a type tag, a subset/view flag and string-keyed
//! parameters. Records reference each other by event-unique identity, so a
//! record may point at records whose collections have not been converted yet.
//! Everything here is read-only to the converter.

pub mod records;

pub use records::{
    CaloContributionData, CalorimeterHit, Cluster, LegacyRecord, McParticle, ParticleIdData,
    ReconstructedParticle, Relation, SimCalorimeterHit, SimTrackerHit, Track, TrackerHit, Vertex,
};

use std::collections::{BTreeMap, HashMap};
use strum_macros::{Display, EnumString};

/// Event-unique identity of a legacy record
///
/// Stands in for an object reference in the legacy model: two entries with
/// the same id denote the same record, and reference fields carry ids rather
/// than positions. Ids are never reused within one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecId(pub u32);

/// Collection type tags of the legacy model
///
/// A closed set: every convertible collection declares exactly one of these.
/// The string form (via strum) is what relation collections use in their
/// endpoint type parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum TypeTag {
    McParticle,
    SimTrackerHit,
    TrackerHit,
    Track,
    SimCalorimeterHit,
    CalorimeterHit,
    Cluster,
    Vertex,
    ReconstructedParticle,
    Relation,
}

/// One element of a legacy collection
///
/// In an owning collection `rec` carries the payload. In a subset view
/// `rec` is [`LegacyRecord::Ref`]: the element is the identity of a record
/// owned elsewhere.
#[derive(Debug, Clone)]
pub struct LegacyEntry {
    pub id: RecId,
    pub rec: LegacyRecord,
}

/// A named, typed, ordered sequence of legacy records
#[derive(Debug, Clone)]
pub struct LegacyCollection {
    /// Declared element type of this collection
    pub type_tag: TypeTag,
    /// True for subset/view collections, which own no data of their own
    pub subset: bool,
    /// String-keyed collection parameters (encoding descriptors etc.)
    pub parameters: BTreeMap<String, String>,
    pub entries: Vec<LegacyEntry>,
}

impl LegacyCollection {
    /// Create an empty owning collection of the given type
    pub fn owning(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            subset: false,
            parameters: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    /// Create an empty subset view whose elements are records of the given type
    pub fn view(type_tag: TypeTag) -> Self {
        Self {
            subset: true,
            ..Self::owning(type_tag)
        }
    }

    /// Set a string parameter on this collection
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Append an owning entry
    pub fn push(&mut self, id: RecId, rec: LegacyRecord) {
        self.entries.push(LegacyEntry { id, rec });
    }

    /// Append a view entry referencing a record owned by another collection
    pub fn push_ref(&mut self, id: RecId) {
        self.entries.push(LegacyEntry {
            id,
            rec: LegacyRecord::Ref,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One event's worth of legacy data
///
/// Holds event-level fields (run/event numbers, timestamp, weight) and an
/// ordered set of named collections. Collection names are unique within the
/// event.
#[derive(Debug, Clone)]
pub struct LegacyEvent {
    pub run_number: i32,
    pub event_number: i32,
    /// Event timestamp, nanoseconds
    pub timestamp: u64,
    pub weight: f64,
    collections: Vec<(String, LegacyCollection)>,
    index: HashMap<String, usize>,
}

impl LegacyEvent {
    pub fn new(run_number: i32, event_number: i32) -> Self {
        Self {
            run_number,
            event_number,
            timestamp: 0,
            weight: 1.0,
            collections: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a collection under `name`, replacing any previous one of that name
    pub fn insert(&mut self, name: impl Into<String>, coll: LegacyCollection) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.collections[pos].1 = coll,
            None => {
                self.index.insert(name.clone(), self.collections.len());
                self.collections.push((name, coll));
            }
        }
    }

    /// Collection names in insertion order
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a collection by name
    ///
    /// Absence is an expected condition (optional collections); the
    /// converter treats it as warn-and-skip.
    pub fn collection(&self, name: &str) -> Option<&LegacyCollection> {
        self.index.get(name).map(|&pos| &self.collections[pos].1)
    }

    /// All collections with their names, in insertion order
    pub fn collections(&self) -> impl Iterator<Item = (&str, &LegacyCollection)> {
        self.collections.iter().map(|(name, c)| (name.as_str(), c))
    }
}
