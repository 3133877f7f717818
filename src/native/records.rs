// src/native/records.rs

//! Record structs of the native model
//!
//! Field-for-field counterparts of the legacy payloads, with [`Ref`] in
//! place of raw identities. After the resolution pass no `Pending` value
//! survives in any of these.

use super::Ref;

/// Event-level header record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventHeader {
    pub run_number: i32,
    pub event_number: i32,
    /// Event timestamp, nanoseconds
    pub timestamp: u64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct McParticle {
    pub pdg: i32,
    pub generator_status: i32,
    pub charge: f32,
    pub mass: f64,
    pub vertex: [f64; 3],
    pub momentum: [f64; 3],
    pub parents: Vec<Ref>,
    pub daughters: Vec<Ref>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimTrackerHit {
    pub cell_id: u64,
    pub edep: f32,
    pub time: f32,
    pub position: [f64; 3],
    pub particle: Ref,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerHit {
    pub cell_id: u64,
    pub edep: f32,
    pub time: f32,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub chi2: f32,
    pub ndf: i32,
    pub dedx: f32,
    pub hits: Vec<Ref>,
    pub tracks: Vec<Ref>,
}

/// Simulated calorimeter hit
///
/// `contributions` stays empty through the first pass; the appendix pass
/// fills it once the contribution collection exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimCaloHit {
    pub cell_id: u64,
    pub energy: f32,
    pub position: [f32; 3],
    pub contributions: Vec<Ref>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaloHit {
    pub cell_id: u64,
    pub energy: f32,
    pub time: f32,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    pub energy: f32,
    pub position: [f32; 3],
    pub hits: Vec<Ref>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub chi2: f32,
    pub probability: f32,
    pub position: [f32; 3],
    pub associated_particle: Ref,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoParticle {
    pub particle_type: i32,
    pub energy: f32,
    pub charge: f32,
    pub momentum: [f32; 3],
    pub tracks: Vec<Ref>,
    pub clusters: Vec<Ref>,
    pub start_vertex: Ref,
    pub particles: Vec<Ref>,
}

/// Particle hypothesis record, split out of its reconstructed particle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleId {
    pub pid_type: i32,
    pub pdg: i32,
    pub likelihood: f32,
    /// The particle this hypothesis applies to
    pub particle: Ref,
}

/// Per-particle energy contribution to a simulated calorimeter hit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaloContribution {
    pub pdg: i32,
    pub energy: f32,
    pub time: f32,
    pub particle: Ref,
}
