// src/convert/contrib.rs

//! Derived contribution collection (appendix pass)
//!
//! Simulated calorimeter hits carry their per-particle contribution data
//! inline in the legacy model; the native model keeps contributions as
//! records of their own. This pass lifts them into one extra collection and
//! links every converted hit to its contribution records. It runs last, so
//! particle references can be resolved directly through the state.

use crate::convert::registry::CollectionRegistry;
use crate::convert::resolution::ResolutionState;
use crate::legacy::{LegacyEvent, LegacyRecord, TypeTag};
use crate::native::{self, NativeCollection, Placement, Ref};

/// Suffix appended to the converter label to name the derived collection
pub const CALO_CONTRIBUTIONS_SUFFIX: &str = "_CaloHitContributions";

/// Synthesize the hit → contribution collection under `name`
///
/// Walks the owning sim-calo collections of the source event; hits that
/// were never converted are passed over. The caller skips this pass
/// entirely when no sim-calo hit was converted.
pub fn create_calo_contributions(
    name: &str,
    event: &LegacyEvent,
    state: &ResolutionState,
    registry: &mut CollectionRegistry<'_>,
) {
    let mut contributions: Vec<native::CaloContribution> = Vec::new();
    let mut hit_links: Vec<(Placement, Vec<Ref>)> = Vec::new();

    for (_coll_name, coll) in event.collections() {
        if coll.type_tag != TypeTag::SimCalorimeterHit || coll.subset {
            continue;
        }
        for entry in &coll.entries {
            let LegacyRecord::SimCalorimeterHit(rec) = &entry.rec else {
                continue;
            };
            let Some(placement) = state.lookup(TypeTag::SimCalorimeterHit, entry.id) else {
                continue;
            };
            let mut refs = Vec::with_capacity(rec.contributions.len());
            for data in &rec.contributions {
                let particle = match data
                    .particle
                    .and_then(|id| state.lookup(TypeTag::McParticle, id))
                {
                    Some(p) => Ref::Target(p.clone()),
                    None => Ref::Absent,
                };
                refs.push(Ref::Target(Placement::new(name, contributions.len() as u32)));
                contributions.push(native::CaloContribution {
                    pdg: data.pdg,
                    energy: data.energy,
                    time: data.time,
                    particle,
                });
            }
            hit_links.push((placement.clone(), refs));
        }
    }

    for (placement, refs) in hit_links {
        if let Some(NativeCollection::SimCaloHits(hits)) =
            registry.store_mut().get_mut(&placement.collection)
        {
            if let Some(hit) = hits.get_mut(placement.index as usize) {
                hit.contributions = refs;
            }
        }
    }

    registry.register(name, Some(NativeCollection::CaloContributions(contributions)), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::{self, LegacyCollection, RecId};
    use crate::native::NativeStore;

    #[test]
    fn test_contributions_are_lifted_and_linked() {
        let mut event = LegacyEvent::new(1, 1);
        let mut calo = LegacyCollection::owning(TypeTag::SimCalorimeterHit);
        calo.push(
            RecId(1),
            LegacyRecord::SimCalorimeterHit(legacy::SimCalorimeterHit {
                contributions: vec![
                    legacy::CaloContributionData {
                        particle: Some(RecId(50)),
                        energy: 0.3,
                        time: 1.0,
                        pdg: 22,
                    },
                    legacy::CaloContributionData {
                        particle: None,
                        energy: 0.1,
                        time: 2.0,
                        pdg: 11,
                    },
                ],
                ..Default::default()
            }),
        );
        event.insert("Calo", calo);

        let mut store = NativeStore::new();
        store
            .register(
                "Calo",
                NativeCollection::SimCaloHits(vec![native::SimCaloHit::default()]),
            )
            .unwrap();

        let mut state = ResolutionState::new();
        state.sim_calo_hits.insert(RecId(1), Placement::new("Calo", 0));
        state.mc_particles.insert(RecId(50), Placement::new("Mc", 4));

        let mut registry = CollectionRegistry::new(&mut store);
        create_calo_contributions("conv_CaloHitContributions", &event, &state, &mut registry);

        let Some(NativeCollection::CaloContributions(contribs)) =
            store.get("conv_CaloHitContributions")
        else {
            panic!("expected contributions");
        };
        assert_eq!(contribs.len(), 2);
        assert_eq!(contribs[0].particle, Ref::Target(Placement::new("Mc", 4)));
        assert_eq!(contribs[1].particle, Ref::Absent);

        let Some(NativeCollection::SimCaloHits(hits)) = store.get("Calo") else {
            panic!("expected sim calo hits");
        };
        assert_eq!(
            hits[0].contributions,
            vec![
                Ref::Target(Placement::new("conv_CaloHitContributions", 0)),
                Ref::Target(Placement::new("conv_CaloHitContributions", 1)),
            ]
        );
    }

    #[test]
    fn test_unconverted_hits_are_passed_over() {
        let mut event = LegacyEvent::new(1, 1);
        let mut calo = LegacyCollection::owning(TypeTag::SimCalorimeterHit);
        calo.push(
            RecId(1),
            LegacyRecord::SimCalorimeterHit(legacy::SimCalorimeterHit {
                contributions: vec![legacy::CaloContributionData::default()],
                ..Default::default()
            }),
        );
        event.insert("Calo", calo);

        let mut store = NativeStore::new();
        let state = ResolutionState::new();
        let mut registry = CollectionRegistry::new(&mut store);
        create_calo_contributions("conv_CaloHitContributions", &event, &state, &mut registry);

        let Some(coll) = store.get("conv_CaloHitContributions") else {
            panic!("expected the collection to be registered");
        };
        assert!(coll.is_empty());
    }
}
