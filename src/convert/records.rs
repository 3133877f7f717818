// src/convert/records.rs

//! Per-type record converters (first conversion pass)
//!
//! One converter per concrete legacy type, dispatched over the closed tag
//! set. Converters copy the plain fields, write [`Ref::Pending`]
//! placeholders for every reference, and record each converted record's
//! placement in the resolution state. No placement is recorded for a
//! collection that fails to convert, so the state never points at records
//! that were not produced.

use crate::convert::resolution::{IdMap, ResolutionState};
use crate::legacy::{LegacyCollection, LegacyEvent, LegacyRecord, RecId, TypeTag};
use crate::native::{self, NativeCollection, Placement, Ref};

/// Name of the header collection in the native store
pub const EVENT_HEADER_NAME: &str = "EventHeader";

/// Synthesize the header collection from event-level fields
pub fn create_event_header(event: &LegacyEvent) -> NativeCollection {
    NativeCollection::EventHeaders(vec![native::EventHeader {
        run_number: event.run_number,
        event_number: event.event_number,
        timestamp: event.timestamp,
        weight: event.weight,
    }])
}

/// Run the immediate conversion for one source collection
///
/// Returns zero or more named results: most types map to exactly one
/// destination, reconstructed particles fan out into a second collection of
/// particle hypotheses, and relation collections produce nothing here (they
/// are synthesized after resolution). A `None` result reports a conversion
/// gap under that name.
pub fn convert_collection(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Vec<(String, Option<NativeCollection>)> {
    match coll.type_tag {
        TypeTag::McParticle => single(dest, convert_mc_particles(dest, coll, state)),
        TypeTag::SimTrackerHit => single(dest, convert_sim_tracker_hits(dest, coll, state)),
        TypeTag::TrackerHit => single(dest, convert_tracker_hits(dest, coll, state)),
        TypeTag::Track => single(dest, convert_tracks(dest, coll, state)),
        TypeTag::SimCalorimeterHit => single(dest, convert_sim_calo_hits(dest, coll, state)),
        TypeTag::CalorimeterHit => single(dest, convert_calo_hits(dest, coll, state)),
        TypeTag::Cluster => single(dest, convert_clusters(dest, coll, state)),
        TypeTag::Vertex => single(dest, convert_vertices(dest, coll, state)),
        TypeTag::ReconstructedParticle => convert_reco_particles(dest, coll, state),
        // Relation collections have no immediate form; their typed
        // counterpart is synthesized once every endpoint is resolvable
        TypeTag::Relation => Vec::new(),
    }
}

fn single(dest: &str, coll: Option<NativeCollection>) -> Vec<(String, Option<NativeCollection>)> {
    vec![(dest.to_string(), coll)]
}

/// Record the placements of a fully converted collection
fn record_placements(map: &mut IdMap, dest: &str, ids: &[RecId]) {
    for (index, &id) in ids.iter().enumerate() {
        map.insert(id, Placement::new(dest, index as u32));
    }
}

fn pending_refs(ids: &[RecId]) -> Vec<Ref> {
    ids.iter().map(|&id| Ref::Pending(id)).collect()
}

fn convert_mc_particles(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::McParticle(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::McParticle {
            pdg: rec.pdg,
            generator_status: rec.generator_status,
            charge: rec.charge,
            mass: rec.mass,
            vertex: rec.vertex,
            momentum: rec.momentum,
            parents: pending_refs(&rec.parents),
            daughters: pending_refs(&rec.daughters),
        });
    }
    record_placements(&mut state.mc_particles, dest, &ids);
    Some(NativeCollection::McParticles(out))
}

fn convert_sim_tracker_hits(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::SimTrackerHit(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::SimTrackerHit {
            cell_id: rec.cell_id,
            edep: rec.edep,
            time: rec.time,
            position: rec.position,
            particle: Ref::from_source(rec.particle),
        });
    }
    record_placements(&mut state.sim_tracker_hits, dest, &ids);
    Some(NativeCollection::SimTrackerHits(out))
}

fn convert_tracker_hits(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::TrackerHit(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::TrackerHit {
            cell_id: rec.cell_id,
            edep: rec.edep,
            time: rec.time,
            position: rec.position,
        });
    }
    record_placements(&mut state.tracker_hits, dest, &ids);
    Some(NativeCollection::TrackerHits(out))
}

fn convert_tracks(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::Track(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::Track {
            chi2: rec.chi2,
            ndf: rec.ndf,
            dedx: rec.dedx,
            hits: pending_refs(&rec.hits),
            tracks: pending_refs(&rec.tracks),
        });
    }
    record_placements(&mut state.tracks, dest, &ids);
    Some(NativeCollection::Tracks(out))
}

fn convert_sim_calo_hits(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::SimCalorimeterHit(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::SimCaloHit {
            cell_id: rec.cell_id,
            energy: rec.energy,
            position: rec.position,
            // filled by the appendix pass once the contribution records exist
            contributions: Vec::new(),
        });
    }
    record_placements(&mut state.sim_calo_hits, dest, &ids);
    Some(NativeCollection::SimCaloHits(out))
}

fn convert_calo_hits(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::CalorimeterHit(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::CaloHit {
            cell_id: rec.cell_id,
            energy: rec.energy,
            time: rec.time,
            position: rec.position,
        });
    }
    record_placements(&mut state.calo_hits, dest, &ids);
    Some(NativeCollection::CaloHits(out))
}

fn convert_clusters(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::Cluster(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::Cluster {
            energy: rec.energy,
            position: rec.position,
            hits: pending_refs(&rec.hits),
        });
    }
    record_placements(&mut state.clusters, dest, &ids);
    Some(NativeCollection::Clusters(out))
}

fn convert_vertices(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Option<NativeCollection> {
    let mut out = Vec::with_capacity(coll.len());
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::Vertex(rec) = &entry.rec else {
            return None;
        };
        ids.push(entry.id);
        out.push(native::Vertex {
            chi2: rec.chi2,
            probability: rec.probability,
            position: rec.position,
            associated_particle: Ref::from_source(rec.associated_particle),
        });
    }
    record_placements(&mut state.vertices, dest, &ids);
    Some(NativeCollection::Vertices(out))
}

/// Reconstructed particles fan out: the particle collection itself plus,
/// when any particle carries hypothesis data, a `{dest}_particleIDs`
/// collection holding the split-out hypothesis records.
fn convert_reco_particles(
    dest: &str,
    coll: &LegacyCollection,
    state: &mut ResolutionState,
) -> Vec<(String, Option<NativeCollection>)> {
    let mut particles = Vec::with_capacity(coll.len());
    let mut pids = Vec::new();
    let mut ids = Vec::with_capacity(coll.len());
    for entry in &coll.entries {
        let LegacyRecord::ReconstructedParticle(rec) = &entry.rec else {
            return single(dest, None);
        };
        for pid in &rec.particle_ids {
            pids.push(native::ParticleId {
                pid_type: pid.pid_type,
                pdg: pid.pdg,
                likelihood: pid.likelihood,
                particle: Ref::Pending(entry.id),
            });
        }
        ids.push(entry.id);
        particles.push(native::RecoParticle {
            particle_type: rec.particle_type,
            energy: rec.energy,
            charge: rec.charge,
            momentum: rec.momentum,
            tracks: pending_refs(&rec.tracks),
            clusters: pending_refs(&rec.clusters),
            start_vertex: Ref::from_source(rec.start_vertex),
            particles: pending_refs(&rec.particles),
        });
    }
    record_placements(&mut state.reco_particles, dest, &ids);

    let mut results = single(dest, Some(NativeCollection::RecoParticles(particles)));
    if !pids.is_empty() {
        results.push((
            format!("{dest}_particleIDs"),
            Some(NativeCollection::ParticleIds(pids)),
        ));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy;

    #[test]
    fn test_header_carries_event_fields() {
        let mut event = LegacyEvent::new(11, 42);
        event.timestamp = 1_700_000_000_000_000_000;
        event.weight = 0.5;

        let NativeCollection::EventHeaders(headers) = create_event_header(&event) else {
            panic!("expected a header collection");
        };
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].run_number, 11);
        assert_eq!(headers[0].event_number, 42);
        assert_eq!(headers[0].timestamp, 1_700_000_000_000_000_000);
        assert_eq!(headers[0].weight, 0.5);
    }

    #[test]
    fn test_references_become_pending_placeholders() {
        let mut coll = LegacyCollection::owning(TypeTag::Track);
        coll.push(
            RecId(1),
            LegacyRecord::Track(legacy::Track {
                chi2: 1.5,
                ndf: 4,
                hits: vec![RecId(20), RecId(21)],
                ..Default::default()
            }),
        );

        let mut state = ResolutionState::new();
        let results = convert_collection("Tracks", &coll, &mut state);
        assert_eq!(results.len(), 1);

        let Some(NativeCollection::Tracks(tracks)) = &results[0].1 else {
            panic!("expected a track collection");
        };
        assert_eq!(tracks[0].hits, vec![Ref::Pending(RecId(20)), Ref::Pending(RecId(21))]);
        assert_eq!(
            state.lookup(TypeTag::Track, RecId(1)),
            Some(&Placement::new("Tracks", 0))
        );
    }

    #[test]
    fn test_null_reference_becomes_absent() {
        let mut coll = LegacyCollection::owning(TypeTag::SimTrackerHit);
        coll.push(
            RecId(1),
            LegacyRecord::SimTrackerHit(legacy::SimTrackerHit::default()),
        );

        let mut state = ResolutionState::new();
        let results = convert_collection("SimHits", &coll, &mut state);
        let Some(NativeCollection::SimTrackerHits(hits)) = &results[0].1 else {
            panic!("expected sim tracker hits");
        };
        assert_eq!(hits[0].particle, Ref::Absent);
    }

    #[test]
    fn test_mismatched_payload_fails_without_polluting_state() {
        let mut coll = LegacyCollection::owning(TypeTag::TrackerHit);
        coll.push(
            RecId(1),
            LegacyRecord::TrackerHit(legacy::TrackerHit::default()),
        );
        // payload does not match the declared tag
        coll.push(RecId(2), LegacyRecord::Track(legacy::Track::default()));

        let mut state = ResolutionState::new();
        let results = convert_collection("Hits", &coll, &mut state);
        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_none());
        assert!(state.tracker_hits.is_empty());
    }

    #[test]
    fn test_reco_particles_fan_out_into_particle_ids() {
        let mut coll = LegacyCollection::owning(TypeTag::ReconstructedParticle);
        coll.push(
            RecId(1),
            LegacyRecord::ReconstructedParticle(legacy::ReconstructedParticle {
                particle_ids: vec![
                    legacy::ParticleIdData {
                        pid_type: 1,
                        pdg: 211,
                        likelihood: 0.9,
                    },
                    legacy::ParticleIdData {
                        pid_type: 1,
                        pdg: 321,
                        likelihood: 0.1,
                    },
                ],
                ..Default::default()
            }),
        );
        coll.push(
            RecId(2),
            LegacyRecord::ReconstructedParticle(legacy::ReconstructedParticle::default()),
        );

        let mut state = ResolutionState::new();
        let results = convert_collection("Reco", &coll, &mut state);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "Reco");
        assert_eq!(results[1].0, "Reco_particleIDs");

        let Some(NativeCollection::ParticleIds(pids)) = &results[1].1 else {
            panic!("expected particle ids");
        };
        assert_eq!(pids.len(), 2);
        assert_eq!(pids[0].particle, Ref::Pending(RecId(1)));
    }

    #[test]
    fn test_reco_particles_without_hypotheses_do_not_fan_out() {
        let mut coll = LegacyCollection::owning(TypeTag::ReconstructedParticle);
        coll.push(
            RecId(1),
            LegacyRecord::ReconstructedParticle(legacy::ReconstructedParticle::default()),
        );

        let mut state = ResolutionState::new();
        let results = convert_collection("Reco", &coll, &mut state);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_relation_collections_have_no_immediate_form() {
        let mut coll = LegacyCollection::owning(TypeTag::Relation);
        coll.push(RecId(1), LegacyRecord::Relation(legacy::Relation::default()));

        let mut state = ResolutionState::new();
        assert!(convert_collection("Rel", &coll, &mut state).is_empty());
    }
}
