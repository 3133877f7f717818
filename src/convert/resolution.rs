// src/convert/resolution.rs

//! Event-scoped resolution state
//!
//! One identity map per record type, from source-record identity to the
//! converted record's placement. Filled incrementally during the first
//! conversion pass; read-only for every deferred pass; dropped with the
//! event. An entry exists for a source record iff its owning collection
//! completed first-pass conversion.

use crate::legacy::{RecId, TypeTag};
use crate::native::Placement;
use std::collections::HashMap;

/// Identity map for one record type
pub type IdMap = HashMap<RecId, Placement>;

/// Accumulator of source → target record correspondences for one event
#[derive(Debug, Default)]
pub struct ResolutionState {
    pub mc_particles: IdMap,
    pub sim_tracker_hits: IdMap,
    pub tracker_hits: IdMap,
    pub tracks: IdMap,
    pub sim_calo_hits: IdMap,
    pub calo_hits: IdMap,
    pub clusters: IdMap,
    pub vertices: IdMap,
    pub reco_particles: IdMap,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity map for a type tag
    ///
    /// `None` for tags without per-record identity (relations).
    pub fn map(&self, tag: TypeTag) -> Option<&IdMap> {
        match tag {
            TypeTag::McParticle => Some(&self.mc_particles),
            TypeTag::SimTrackerHit => Some(&self.sim_tracker_hits),
            TypeTag::TrackerHit => Some(&self.tracker_hits),
            TypeTag::Track => Some(&self.tracks),
            TypeTag::SimCalorimeterHit => Some(&self.sim_calo_hits),
            TypeTag::CalorimeterHit => Some(&self.calo_hits),
            TypeTag::Cluster => Some(&self.clusters),
            TypeTag::Vertex => Some(&self.vertices),
            TypeTag::ReconstructedParticle => Some(&self.reco_particles),
            TypeTag::Relation => None,
        }
    }

    pub fn map_mut(&mut self, tag: TypeTag) -> Option<&mut IdMap> {
        match tag {
            TypeTag::McParticle => Some(&mut self.mc_particles),
            TypeTag::SimTrackerHit => Some(&mut self.sim_tracker_hits),
            TypeTag::TrackerHit => Some(&mut self.tracker_hits),
            TypeTag::Track => Some(&mut self.tracks),
            TypeTag::SimCalorimeterHit => Some(&mut self.sim_calo_hits),
            TypeTag::CalorimeterHit => Some(&mut self.calo_hits),
            TypeTag::Cluster => Some(&mut self.clusters),
            TypeTag::Vertex => Some(&mut self.vertices),
            TypeTag::ReconstructedParticle => Some(&mut self.reco_particles),
            TypeTag::Relation => None,
        }
    }

    /// Converted counterpart of a source record of known type
    pub fn lookup(&self, tag: TypeTag, id: RecId) -> Option<&Placement> {
        self.map(tag)?.get(&id)
    }

    /// Search all type maps for a source record of unknown type
    ///
    /// Used for relation endpoints when the collection does not declare
    /// them. Ids are event-unique, so at most one map can hold the record.
    pub fn lookup_any(&self, id: RecId) -> Option<(TypeTag, &Placement)> {
        const TAGS: [TypeTag; 9] = [
            TypeTag::McParticle,
            TypeTag::SimTrackerHit,
            TypeTag::TrackerHit,
            TypeTag::Track,
            TypeTag::SimCalorimeterHit,
            TypeTag::CalorimeterHit,
            TypeTag::Cluster,
            TypeTag::Vertex,
            TypeTag::ReconstructedParticle,
        ];
        TAGS.iter().find_map(|&tag| {
            self.map(tag)
                .and_then(|m| m.get(&id))
                .map(|placement| (tag, placement))
        })
    }
}
