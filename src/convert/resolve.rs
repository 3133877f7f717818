// src/convert/resolve.rs

//! Deferred reference resolution (second pass)
//!
//! Rewrites every [`Ref::Pending`] placeholder left by the first pass into
//! the final placement now available in the resolution state. A referent
//! whose owning collection was never converted becomes [`Ref::Absent`]
//! without a log entry: that gap reflects the source data, not a resolver
//! problem, and must stay visible. Already-resolved references are left
//! alone, so running the pass again is a no-op.

use crate::convert::resolution::{IdMap, ResolutionState};
use crate::legacy::TypeTag;
use crate::native::{NativeCollection, NativeStore, Ref};

/// Rewrite every pending reference in the store
pub fn resolve_references(store: &mut NativeStore, state: &ResolutionState) {
    for (_name, coll) in store.collections_mut() {
        match coll {
            NativeCollection::EventHeaders(_)
            | NativeCollection::TrackerHits(_)
            | NativeCollection::CaloHits(_) => {}
            NativeCollection::McParticles(recs) => {
                let map = state.map(TypeTag::McParticle);
                for rec in recs {
                    resolve_slice(&mut rec.parents, map);
                    resolve_slice(&mut rec.daughters, map);
                }
            }
            NativeCollection::SimTrackerHits(recs) => {
                for rec in recs {
                    resolve(&mut rec.particle, state.map(TypeTag::McParticle));
                }
            }
            NativeCollection::Tracks(recs) => {
                for rec in recs {
                    resolve_slice(&mut rec.hits, state.map(TypeTag::TrackerHit));
                    resolve_slice(&mut rec.tracks, state.map(TypeTag::Track));
                }
            }
            NativeCollection::SimCaloHits(recs) => {
                // contribution references are created resolved by the
                // appendix pass, which runs after this one
                for rec in recs {
                    resolve_slice(&mut rec.contributions, None);
                }
            }
            NativeCollection::Clusters(recs) => {
                for rec in recs {
                    resolve_slice(&mut rec.hits, state.map(TypeTag::CalorimeterHit));
                }
            }
            NativeCollection::Vertices(recs) => {
                for rec in recs {
                    resolve(
                        &mut rec.associated_particle,
                        state.map(TypeTag::ReconstructedParticle),
                    );
                }
            }
            NativeCollection::RecoParticles(recs) => {
                for rec in recs {
                    resolve_slice(&mut rec.tracks, state.map(TypeTag::Track));
                    resolve_slice(&mut rec.clusters, state.map(TypeTag::Cluster));
                    resolve(&mut rec.start_vertex, state.map(TypeTag::Vertex));
                    resolve_slice(&mut rec.particles, state.map(TypeTag::ReconstructedParticle));
                }
            }
            NativeCollection::ParticleIds(recs) => {
                for rec in recs {
                    resolve(&mut rec.particle, state.map(TypeTag::ReconstructedParticle));
                }
            }
            NativeCollection::CaloContributions(recs) => {
                for rec in recs {
                    resolve(&mut rec.particle, state.map(TypeTag::McParticle));
                }
            }
            NativeCollection::Links(links) => {
                let from_map = links.from_kind.and_then(|tag| state.map(tag));
                let to_map = links.to_kind.and_then(|tag| state.map(tag));
                for entry in &mut links.entries {
                    resolve(&mut entry.from, from_map);
                    resolve(&mut entry.to, to_map);
                }
            }
            NativeCollection::Subset(sub) => {
                resolve_slice(&mut sub.refs, state.map(sub.kind));
            }
        }
    }
}

fn resolve(r: &mut Ref, map: Option<&IdMap>) {
    if let Ref::Pending(id) = *r {
        *r = match map.and_then(|m| m.get(&id)) {
            Some(placement) => Ref::Target(placement.clone()),
            None => Ref::Absent,
        };
    }
}

fn resolve_slice(refs: &mut [Ref], map: Option<&IdMap>) {
    for r in refs {
        resolve(r, map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::RecId;
    use crate::native::{self, Placement};

    fn store_with_tracks(hits: Vec<Ref>) -> NativeStore {
        let mut store = NativeStore::new();
        store
            .register(
                "Tracks",
                NativeCollection::Tracks(vec![native::Track {
                    hits,
                    ..Default::default()
                }]),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_pending_refs_resolve_to_placements() {
        let mut store = store_with_tracks(vec![Ref::Pending(RecId(7))]);
        let mut state = ResolutionState::new();
        state.tracker_hits.insert(RecId(7), Placement::new("Hits", 3));

        resolve_references(&mut store, &state);

        let Some(NativeCollection::Tracks(tracks)) = store.get("Tracks") else {
            panic!("expected tracks");
        };
        assert_eq!(tracks[0].hits, vec![Ref::Target(Placement::new("Hits", 3))]);
    }

    #[test]
    fn test_unconverted_referent_becomes_absent() {
        let mut store = store_with_tracks(vec![Ref::Pending(RecId(7))]);
        let state = ResolutionState::new();

        resolve_references(&mut store, &state);

        let Some(NativeCollection::Tracks(tracks)) = store.get("Tracks") else {
            panic!("expected tracks");
        };
        assert_eq!(tracks[0].hits, vec![Ref::Absent]);
    }

    #[test]
    fn test_resolved_refs_are_untouched_on_second_pass() {
        let mut store = store_with_tracks(vec![Ref::Target(Placement::new("Hits", 3))]);
        // a later pass with unrelated state must not rewrite resolved refs
        let state = ResolutionState::new();
        resolve_references(&mut store, &state);

        let Some(NativeCollection::Tracks(tracks)) = store.get("Tracks") else {
            panic!("expected tracks");
        };
        assert_eq!(tracks[0].hits, vec![Ref::Target(Placement::new("Hits", 3))]);
    }

    #[test]
    fn test_self_type_references_resolve() {
        let mut store = NativeStore::new();
        store
            .register(
                "Mc",
                NativeCollection::McParticles(vec![
                    native::McParticle {
                        daughters: vec![Ref::Pending(RecId(2))],
                        ..Default::default()
                    },
                    native::McParticle {
                        parents: vec![Ref::Pending(RecId(1))],
                        ..Default::default()
                    },
                ]),
            )
            .unwrap();
        let mut state = ResolutionState::new();
        state.mc_particles.insert(RecId(1), Placement::new("Mc", 0));
        state.mc_particles.insert(RecId(2), Placement::new("Mc", 1));

        resolve_references(&mut store, &state);

        let Some(NativeCollection::McParticles(mc)) = store.get("Mc") else {
            panic!("expected mc particles");
        };
        assert_eq!(mc[0].daughters, vec![Ref::Target(Placement::new("Mc", 1))]);
        assert_eq!(mc[1].parents, vec![Ref::Target(Placement::new("Mc", 0))]);
    }
}
