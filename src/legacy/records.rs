// src/legacy/records.rs

//! Record payloads of the legacy model
//!
//! Reference fields hold [`RecId`]s. A `None`/empty reference is a null in
//! the source data and converts to an absent reference on the native side.

use super::RecId;

/// Payload of one legacy collection entry
#[derive(Debug, Clone)]
pub enum LegacyRecord {
    McParticle(McParticle),
    SimTrackerHit(SimTrackerHit),
    TrackerHit(TrackerHit),
    Track(Track),
    SimCalorimeterHit(SimCalorimeterHit),
    CalorimeterHit(CalorimeterHit),
    Cluster(Cluster),
    Vertex(Vertex),
    ReconstructedParticle(ReconstructedParticle),
    Relation(Relation),
    /// Element of a subset view: identity only, the payload lives in the
    /// owning collection
    Ref,
}

/// Generator-level particle
#[derive(Debug, Clone, Default)]
pub struct McParticle {
    pub pdg: i32,
    pub generator_status: i32,
    pub charge: f32,
    pub mass: f64,
    pub vertex: [f64; 3],
    pub momentum: [f64; 3],
    pub parents: Vec<RecId>,
    pub daughters: Vec<RecId>,
}

/// Simulated energy deposit in a tracking detector
#[derive(Debug, Clone, Default)]
pub struct SimTrackerHit {
    pub cell_id: u64,
    pub edep: f32,
    pub time: f32,
    pub position: [f64; 3],
    /// Particle that produced the deposit
    pub particle: Option<RecId>,
}

/// Digitized tracker measurement
#[derive(Debug, Clone, Default)]
pub struct TrackerHit {
    pub cell_id: u64,
    pub edep: f32,
    pub time: f32,
    pub position: [f64; 3],
}

/// Reconstructed track
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub chi2: f32,
    pub ndf: i32,
    pub dedx: f32,
    /// Measurements the fit used
    pub hits: Vec<RecId>,
    /// Composed sub-tracks
    pub tracks: Vec<RecId>,
}

/// Per-particle contribution data carried inline by a simulated calorimeter
/// hit; lifted into records of its own during conversion
#[derive(Debug, Clone, Default)]
pub struct CaloContributionData {
    pub particle: Option<RecId>,
    pub energy: f32,
    pub time: f32,
    pub pdg: i32,
}

/// Simulated calorimeter cell deposit
#[derive(Debug, Clone, Default)]
pub struct SimCalorimeterHit {
    pub cell_id: u64,
    pub energy: f32,
    pub position: [f32; 3],
    pub contributions: Vec<CaloContributionData>,
}

/// Digitized calorimeter measurement
#[derive(Debug, Clone, Default)]
pub struct CalorimeterHit {
    pub cell_id: u64,
    pub energy: f32,
    pub time: f32,
    pub position: [f32; 3],
}

/// Calorimeter cluster
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub energy: f32,
    pub position: [f32; 3],
    pub hits: Vec<RecId>,
}

/// Fitted interaction or decay vertex
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    pub chi2: f32,
    pub probability: f32,
    pub position: [f32; 3],
    /// Reconstructed particle this vertex belongs to
    pub associated_particle: Option<RecId>,
}

/// Particle hypothesis data carried inline by a reconstructed particle;
/// fans out into a collection of its own during conversion
#[derive(Debug, Clone, Default)]
pub struct ParticleIdData {
    pub pid_type: i32,
    pub pdg: i32,
    pub likelihood: f32,
}

/// Fully reconstructed particle
#[derive(Debug, Clone, Default)]
pub struct ReconstructedParticle {
    pub particle_type: i32,
    pub energy: f32,
    pub charge: f32,
    pub momentum: [f32; 3],
    pub tracks: Vec<RecId>,
    pub clusters: Vec<RecId>,
    pub start_vertex: Option<RecId>,
    /// Constituent particles (for compound objects like jets)
    pub particles: Vec<RecId>,
    pub particle_ids: Vec<ParticleIdData>,
}

/// Generic weighted link between two records of arbitrary type
///
/// Relation collections are not typed like record collections; their
/// endpoint types, when known, come from the collection's `FromType` /
/// `ToType` parameters.
#[derive(Debug, Clone, Default)]
pub struct Relation {
    pub from: Option<RecId>,
    pub to: Option<RecId>,
    pub weight: f32,
}
