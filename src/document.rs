// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use app_config::BuilderConfig;
use common::{BoundingBox, ParticleId, Pose, PosePatch};
use glam::f64::DVec3;
use keyboard::KeyCommand;
use log::debug;
use periodic_table::Element;

use crate::drag::{DragCoordinator, DragSnapshot};
use crate::history::History;
use crate::particle::{Color, ColorChannel, Particle, ParticleKind};
use crate::placement::{snap_to_grid, ClusterLayout};
use crate::selection::{Selection, TransformMode};
use crate::store::{ParticleStore, Spawner};

/// One atom-builder scene: the particles, what is selected, the gesture in progress and the
/// undo history.
///
/// Every editing operation is a method taking `&mut self`. After each call the presentation
/// layer reads the state back ([`Document::store`], [`Document::selection`]) and redraws.
///
/// Operations that change particles record the previous particles in the history first, so
/// one `undo` reverts exactly one operation. A whole gizmo gesture counts as one operation.
/// Operations that would change nothing record nothing. Ids that no longer exist are
/// ignored everywhere: with the host delivering events asynchronously, a pick or a drag
/// update can legitimately arrive for a particle that was just deleted.
#[derive(Debug)]
pub struct Document {
    store: ParticleStore,
    selection: Selection,
    history: History<ParticleStore>,
    drag: DragCoordinator,
    spawner: Spawner,
    duplicate_offset: DVec3,
    grid_step: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with the default settings: a single proton at the origin.
    pub fn new() -> Self {
        Self::build(&BuilderConfig::default(), None)
    }

    /// Like [`Document::new`], with reproducible id suffixes and placement jitter.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(&BuilderConfig::default(), Some(seed))
    }

    pub fn with_config(config: &BuilderConfig, seed: Option<u64>) -> Self {
        Self::build(config, seed)
    }

    fn build(config: &BuilderConfig, seed: Option<u64>) -> Self {
        let layout = ClusterLayout::from(config);
        let spawner = match seed {
            Some(seed) => Spawner::seeded(layout, seed),
            None => Spawner::new(layout),
        };

        let mut document = Self {
            store: ParticleStore::new(),
            selection: Selection::new(),
            history: History::new(config.history_limit),
            drag: DragCoordinator::new(),
            spawner,
            duplicate_offset: DVec3::from_array(config.duplicate_offset),
            grid_step: config.grid_step,
        };
        document.restore_initial_scene();
        document
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History<ParticleStore> {
        &self.history
    }

    pub fn particle(&self, id: &ParticleId) -> Option<&Particle> {
        self.store.get(id)
    }

    pub fn drag_snapshot(&self) -> Option<&DragSnapshot> {
        self.drag.snapshot()
    }

    /// Records the current particles as an undo step.
    fn checkpoint(&mut self) {
        self.history.record(self.store.clone());
    }

    fn restore_initial_scene(&mut self) {
        self.store.clear();
        self.store
            .add_particle(ParticleKind::Proton, Pose::default(), &mut self.spawner);
        self.selection.deselect_all();
        self.drag.end();
    }

    // Particle store

    /// Grows or shrinks the `kind` collection to `n` particles. Dropped particles leave the
    /// selection too.
    pub fn set_count(&mut self, kind: ParticleKind, n: usize) {
        let current = self.store.count(kind);
        if n == current {
            return;
        }

        self.checkpoint();
        let dropped = self.store.set_count(kind, n, &mut self.spawner);
        self.selection.remove(&dropped);
        if !dropped.is_empty() {
            self.drag.invalidate();
        }
        debug!("{} count {} -> {}", kind, current, n);
    }

    pub fn add_particle(&mut self, kind: ParticleKind, pose: Pose) -> ParticleId {
        self.checkpoint();
        let id = self.store.add_particle(kind, pose, &mut self.spawner);
        debug!("added {} {}", kind, id);
        id
    }

    /// Adds a particle where the user clicked, snapped to the placement grid.
    pub fn place_particle(&mut self, kind: ParticleKind, position: DVec3) -> ParticleId {
        self.add_particle(kind, Pose::at(snap_to_grid(position, self.grid_step)))
    }

    /// Writes part of a particle's pose directly, outside of any gesture. No undo step is
    /// recorded. Returns false if the particle does not exist.
    pub fn update_pose(&mut self, id: &ParticleId, patch: &PosePatch) -> bool {
        self.store.update_pose(id, patch)
    }

    // Selection

    /// Handles a pick of `id`, see [`Selection::toggle_select`].
    pub fn toggle_select(&mut self, id: &ParticleId, multi: bool) {
        let Some(kind) = self.store.kind_of(id) else {
            debug!("pick of vanished particle {} ignored", id);
            return;
        };
        debug!("picked {} {}", kind, id);
        self.selection.toggle_select(id.clone(), multi);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Selects every particle; the first one gets the gizmo.
    pub fn select_all(&mut self) {
        self.selection
            .replace(self.store.iter().map(|particle| particle.id.clone()));
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.selection.set_mode(mode);
    }

    // Gizmo gestures

    /// The pointer went down on the gizmo of `leader`.
    pub fn drag_start(&mut self, leader: &ParticleId) {
        self.drag.start(leader.clone());
    }

    /// The gizmo of `leader` now reports `pose`.
    ///
    /// The first update of a gesture records the undo step and captures the starting poses
    /// of the selection; later updates reuse them, unless the gizmo moved to another
    /// particle or the selection changed size, in which case the poses are captured (and an
    /// undo step recorded) again.
    pub fn drag_update(&mut self, leader: &ParticleId, pose: Pose, mode: TransformMode) {
        if self.drag.needs_capture(leader, self.selection.len()) {
            let Some(snapshot) = DragSnapshot::capture(leader, &self.store, &self.selection)
            else {
                debug!("drag of vanished particle {} ignored", leader);
                return;
            };
            self.checkpoint();
            debug!(
                "captured drag snapshot for {} with {} particles",
                leader,
                snapshot.particles.len()
            );
            self.drag.set_snapshot(snapshot);
        }

        self.drag.apply(&mut self.store, &pose, mode);
    }

    /// The pointer was released. The last applied poses stay.
    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    // History

    pub fn undo(&mut self) {
        let current = self.store.clone();
        match self.history.undo(current) {
            Some(previous) => self.restore(previous),
            None => debug!("nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        let current = self.store.clone();
        match self.history.redo(current) {
            Some(next) => self.restore(next),
            None => debug!("nothing to redo"),
        }
    }

    fn restore(&mut self, store: ParticleStore) {
        self.store = store;
        self.selection.deselect_all();
        self.drag.invalidate();
    }

    // Editing the selection

    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        self.checkpoint();
        let removed = self.store.remove_particles(self.selection.ids());
        self.selection.deselect_all();
        self.drag.invalidate();
        debug!("deleted {} particles", removed);
    }

    /// Copies every selected particle, shifted by the duplicate offset, and selects the
    /// copies instead of the originals.
    pub fn duplicate_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        self.checkpoint();
        let originals: Vec<Particle> = self
            .selection
            .ids()
            .filter_map(|id| self.store.get(id).cloned())
            .collect();

        let mut copies = Vec::with_capacity(originals.len());
        for original in originals {
            let id = self.store.fresh_id(original.kind, &mut self.spawner);
            let copy = Particle {
                id: id.clone(),
                position: original.position + self.duplicate_offset,
                ..original
            };
            if self.store.insert(copy).is_ok() {
                copies.push(id);
            }
        }

        debug!("duplicated {} particles", copies.len());
        self.selection.replace(copies);
        self.drag.invalidate();
    }

    pub fn recolor(&mut self, color: Color, channel: ColorChannel) {
        if self.selection.is_empty() {
            return;
        }

        self.checkpoint();
        for id in self.selection.ids() {
            if let Some(particle) = self.store.get_mut(id) {
                particle.set_color(channel, color);
            }
        }
    }

    // Whole-scene operations

    /// Replaces the scene with `protons` protons, `neutrons` neutrons and `electrons`
    /// electrons. Arrows are removed.
    ///
    /// A lone proton and a lone electron sit exactly at the origin, so that hydrogen shows
    /// its electron around its proton. Every other collection is laid out as a cluster.
    pub fn load_element_preset(&mut self, protons: usize, neutrons: usize, electrons: usize) {
        self.checkpoint();
        self.selection.deselect_all();
        self.drag.end();
        self.store.clear();

        for (kind, count) in [
            (ParticleKind::Proton, protons),
            (ParticleKind::Neutron, neutrons),
            (ParticleKind::Electron, electrons),
        ] {
            let centered = count == 1 && kind != ParticleKind::Neutron;
            if centered {
                self.store.add_particle(kind, Pose::default(), &mut self.spawner);
            } else {
                self.store.set_count(kind, count, &mut self.spawner);
            }
        }
        debug!(
            "loaded preset {}p {}n {}e",
            protons, neutrons, electrons
        );
    }

    /// Loads the neutral atom of `element` from the preset catalog.
    pub fn load_element(&mut self, element: Element) {
        let preset = element.preset();
        self.load_element_preset(preset.protons, preset.neutrons, preset.electrons());
    }

    /// Back to a single proton at the origin.
    pub fn reset(&mut self) {
        self.checkpoint();
        self.restore_initial_scene();
    }

    /// Replaces the whole scene with `store`, as when opening a file. Selection, gesture
    /// and history all start over.
    pub fn replace_store(&mut self, store: ParticleStore) {
        self.store = store;
        self.selection.deselect_all();
        self.drag.end();
        self.history.clear();
    }

    // Keyboard

    pub fn apply_key_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::DeleteSelected => self.delete_selected(),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
            KeyCommand::DuplicateSelected => self.duplicate_selected(),
            KeyCommand::DeselectAll => self.deselect_all(),
        }
    }

    // Read-outs

    /// Z
    pub fn proton_count(&self) -> usize {
        self.store.count(ParticleKind::Proton)
    }

    /// N
    pub fn neutron_count(&self) -> usize {
        self.store.count(ParticleKind::Neutron)
    }

    pub fn electron_count(&self) -> usize {
        self.store.count(ParticleKind::Electron)
    }

    /// A = Z + N
    pub fn mass_number(&self) -> usize {
        self.proton_count() + self.neutron_count()
    }

    /// Charge in elementary charges: protons minus electrons.
    pub fn net_charge(&self) -> i64 {
        self.proton_count() as i64 - self.electron_count() as i64
    }

    /// The element with as many protons as the scene, if it is in the catalog.
    pub fn element(&self) -> Option<Element> {
        u8::try_from(self.proton_count())
            .ok()
            .and_then(Element::from_atomic_number)
    }

    /// Box around every particle's mesh, for framing the camera. `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing_spheres(
            self.store
                .iter()
                .map(|particle| (particle.position, particle.bounding_radius())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_proton_at_the_origin() {
        let document = Document::with_seed(1);
        let protons = document.store().collection(ParticleKind::Proton);
        assert_eq!(protons.len(), 1);
        assert_eq!(protons[0].position, DVec3::ZERO);
        assert_eq!(document.store().len(), 1);
        assert!(!document.history().can_undo());
    }

    #[test]
    fn no_op_operations_record_no_history() {
        let mut document = Document::with_seed(1);
        document.set_count(ParticleKind::Proton, 1);
        document.delete_selected();
        document.duplicate_selected();
        document.recolor(Color::WHITE, ColorChannel::Base);
        assert_eq!(document.history().past_len(), 0);
    }

    #[test]
    fn placed_particles_snap_to_the_grid() {
        let mut document = Document::with_seed(1);
        let id = document.place_particle(ParticleKind::Electron, DVec3::new(0.7, -0.2, 1.26));
        assert_eq!(
            document.particle(&id).unwrap().position,
            DVec3::new(0.5, 0.0, 1.5)
        );
    }

    #[test]
    fn picks_of_unknown_ids_are_ignored() {
        let mut document = Document::with_seed(1);
        document.toggle_select(&ParticleId::from("nope"), false);
        assert!(document.selection().is_empty());
    }

    #[test]
    fn read_outs_follow_the_scene() {
        let mut document = Document::with_seed(1);
        document.load_element(Element::Carbon);
        assert_eq!(document.proton_count(), 6);
        assert_eq!(document.neutron_count(), 6);
        assert_eq!(document.mass_number(), 12);
        assert_eq!(document.net_charge(), 0);
        assert_eq!(document.element(), Some(Element::Carbon));

        document.set_count(ParticleKind::Electron, 4);
        assert_eq!(document.net_charge(), 2);
    }

    #[test]
    fn bounding_box_covers_the_electron_cloud() {
        let mut document = Document::with_seed(1);
        document.load_element(Element::Hydrogen);
        let bounds = document.bounding_box().unwrap();
        assert!((bounds.max.x - 1.55).abs() < 1e-12);
        assert!((bounds.min.x + 1.55).abs() < 1e-12);
    }

    #[test]
    fn key_commands_drive_the_document() {
        let mut document = Document::with_seed(1);
        let proton = document.store().collection(ParticleKind::Proton)[0].id.clone();
        document.toggle_select(&proton, false);

        document.apply_key_command(KeyCommand::DuplicateSelected);
        assert_eq!(document.store().len(), 2);
        document.apply_key_command(KeyCommand::DeselectAll);
        assert!(document.selection().is_empty());
        document.apply_key_command(KeyCommand::Undo);
        assert_eq!(document.store().len(), 1);
        document.apply_key_command(KeyCommand::Redo);
        assert_eq!(document.store().len(), 2);
    }
}

// End of File
