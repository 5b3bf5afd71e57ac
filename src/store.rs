// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::collections::HashSet;

use common::{IdGenerator, ParticleId, Pose, PosePatch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::particle::{Particle, ParticleKind};
use crate::placement::ClusterLayout;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("particle id {0} is used more than once")]
    DuplicateId(ParticleId),
}

/// Mints ids and cluster positions for new particles.
///
/// All randomness of a document (id suffixes and placement jitter) comes from the one rng
/// in here, so a spawner built with [`Spawner::seeded`] makes every layout reproducible.
#[derive(Debug)]
pub struct Spawner {
    ids: IdGenerator,
    rng: StdRng,
    pub layout: ClusterLayout,
}

impl Spawner {
    pub fn new(layout: ClusterLayout) -> Self {
        Self {
            ids: IdGenerator::new(),
            rng: StdRng::from_entropy(),
            layout,
        }
    }

    pub fn seeded(layout: ClusterLayout, seed: u64) -> Self {
        Self {
            ids: IdGenerator::new(),
            rng: StdRng::seed_from_u64(seed),
            layout,
        }
    }

    pub fn next_id(&mut self, kind: ParticleKind) -> ParticleId {
        self.ids.next_id(kind.label(), &mut self.rng)
    }

    pub fn cluster_pose(&mut self, index: usize) -> Pose {
        Pose::at(self.layout.position(index, &mut self.rng))
    }
}

/// The particles of a document, one ordered collection per kind.
///
/// The order inside a collection is creation order; it only matters for display and for
/// which particles survive when a collection is shrunk. Ids are unique across all four
/// collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleStore {
    protons: Vec<Particle>,
    neutrons: Vec<Particle>,
    electrons: Vec<Particle>,
    arrows: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, kind: ParticleKind) -> &[Particle] {
        match kind {
            ParticleKind::Proton => &self.protons,
            ParticleKind::Neutron => &self.neutrons,
            ParticleKind::Electron => &self.electrons,
            ParticleKind::Arrow => &self.arrows,
        }
    }

    fn collection_mut(&mut self, kind: ParticleKind) -> &mut Vec<Particle> {
        match kind {
            ParticleKind::Proton => &mut self.protons,
            ParticleKind::Neutron => &mut self.neutrons,
            ParticleKind::Electron => &mut self.electrons,
            ParticleKind::Arrow => &mut self.arrows,
        }
    }

    fn collections_mut(&mut self) -> [&mut Vec<Particle>; 4] {
        [
            &mut self.protons,
            &mut self.neutrons,
            &mut self.electrons,
            &mut self.arrows,
        ]
    }

    pub fn count(&self, kind: ParticleKind) -> usize {
        self.collection(kind).len()
    }

    pub fn len(&self) -> usize {
        ParticleKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every particle: protons first, then neutrons, electrons and arrows.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        ParticleKind::ALL
            .into_iter()
            .flat_map(move |kind| self.collection(kind).iter())
    }

    pub fn get(&self, id: &ParticleId) -> Option<&Particle> {
        self.iter().find(|particle| &particle.id == id)
    }

    pub fn get_mut(&mut self, id: &ParticleId) -> Option<&mut Particle> {
        self.collections_mut()
            .into_iter()
            .flat_map(|collection| collection.iter_mut())
            .find(|particle| &particle.id == id)
    }

    pub fn contains(&self, id: &ParticleId) -> bool {
        self.get(id).is_some()
    }

    pub fn kind_of(&self, id: &ParticleId) -> Option<ParticleKind> {
        self.get(id).map(|particle| particle.kind)
    }

    /// Appends an existing particle to the collection of its kind.
    pub fn insert(&mut self, particle: Particle) -> Result<(), StoreError> {
        if self.contains(&particle.id) {
            return Err(StoreError::DuplicateId(particle.id));
        }
        self.collection_mut(particle.kind).push(particle);
        Ok(())
    }

    /// Appends a new particle of `kind` at `pose` and returns its id.
    pub fn add_particle(
        &mut self,
        kind: ParticleKind,
        pose: Pose,
        spawner: &mut Spawner,
    ) -> ParticleId {
        let id = self.fresh_id(kind, spawner);
        self.collection_mut(kind)
            .push(Particle::new(id.clone(), kind, pose));
        id
    }

    /// A generated id that does not collide with any particle already in the store, such as
    /// one loaded from a file.
    pub fn fresh_id(&self, kind: ParticleKind, spawner: &mut Spawner) -> ParticleId {
        loop {
            let id = spawner.next_id(kind);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Removes every particle whose id is in `ids` and returns how many were removed. Ids
    /// that are not in the store are ignored.
    pub fn remove_particles<'a>(&mut self, ids: impl IntoIterator<Item = &'a ParticleId>) -> usize {
        let doomed: HashSet<&ParticleId> = ids.into_iter().collect();
        if doomed.is_empty() {
            return 0;
        }

        let before = self.len();
        for collection in self.collections_mut() {
            collection.retain(|particle| !doomed.contains(&particle.id));
        }
        before - self.len()
    }

    /// Grows or shrinks the `kind` collection to exactly `n` particles.
    ///
    /// New particles continue the cluster layout from the current length. Shrinking keeps
    /// the first `n` particles; the ids of the dropped ones are returned so callers can
    /// forget them.
    pub fn set_count(
        &mut self,
        kind: ParticleKind,
        n: usize,
        spawner: &mut Spawner,
    ) -> Vec<ParticleId> {
        let current = self.count(kind);
        if n < current {
            return self
                .collection_mut(kind)
                .drain(n..)
                .map(|particle| particle.id)
                .collect();
        }

        for index in current..n {
            let pose = spawner.cluster_pose(index);
            self.add_particle(kind, pose, spawner);
        }
        Vec::new()
    }

    /// Applies `patch` to the particle `id`. Returns false, and does nothing, if no such
    /// particle exists.
    pub fn update_pose(&mut self, id: &ParticleId, patch: &PosePatch) -> bool {
        match self.get_mut(id) {
            Some(particle) => {
                particle.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for collection in self.collections_mut() {
            collection.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::f64::DVec3;

    use super::*;

    fn spawner() -> Spawner {
        Spawner::seeded(ClusterLayout::default(), 42)
    }

    #[test]
    fn ids_are_unique_across_kinds() {
        let mut store = ParticleStore::new();
        let mut spawner = spawner();
        store.set_count(ParticleKind::Proton, 20, &mut spawner);
        store.set_count(ParticleKind::Neutron, 20, &mut spawner);
        store.set_count(ParticleKind::Electron, 5, &mut spawner);

        let ids: HashSet<_> = store.iter().map(|particle| &particle.id).collect();
        assert_eq!(ids.len(), 45);
        assert_eq!(store.len(), 45);
    }

    #[test]
    fn shrinking_keeps_the_oldest_particles() {
        let mut store = ParticleStore::new();
        let mut spawner = spawner();
        store.set_count(ParticleKind::Neutron, 5, &mut spawner);
        let kept: Vec<_> = store.collection(ParticleKind::Neutron)[..2]
            .iter()
            .map(|particle| particle.id.clone())
            .collect();

        let dropped = store.set_count(ParticleKind::Neutron, 2, &mut spawner);

        assert_eq!(dropped.len(), 3);
        let remaining: Vec<_> = store
            .collection(ParticleKind::Neutron)
            .iter()
            .map(|particle| particle.id.clone())
            .collect();
        assert_eq!(remaining, kept);
    }

    #[test]
    fn remove_ignores_unknown_ids() {
        let mut store = ParticleStore::new();
        let mut spawner = spawner();
        let id = store.add_particle(ParticleKind::Arrow, Pose::default(), &mut spawner);

        let ghost = ParticleId::from("ghost");
        assert_eq!(store.remove_particles([&ghost]), 0);
        assert_eq!(store.remove_particles([&id, &ghost]), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn update_pose_finds_the_particle_in_any_collection() {
        let mut store = ParticleStore::new();
        let mut spawner = spawner();
        store.add_particle(ParticleKind::Proton, Pose::default(), &mut spawner);
        let electron = store.add_particle(ParticleKind::Electron, Pose::default(), &mut spawner);

        assert!(store.update_pose(&electron, &PosePatch::position(DVec3::X)));
        assert_eq!(store.get(&electron).unwrap().position, DVec3::X);
        assert!(!store.update_pose(&ParticleId::from("gone"), &PosePatch::position(DVec3::X)));
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut store = ParticleStore::new();
        let particle = Particle::new(ParticleId::from("p"), ParticleKind::Proton, Pose::default());
        store.insert(particle.clone()).unwrap();

        let mut clash = particle;
        clash.kind = ParticleKind::Neutron;
        assert_eq!(
            store.insert(clash),
            Err(StoreError::DuplicateId(ParticleId::from("p")))
        );
    }
}

// End of File
