// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Group manipulation through the transform gizmo.
//!
//! The gizmo is attached to one particle, the *leader*. While it is dragged, every other
//! selected particle (the *followers*) receives the same rigid motion: the translation the
//! leader went through, or the rotation it went through about the leader's starting
//! position. Motions are always computed from the poses captured when the gesture started,
//! never accumulated from the previous update, so rounding errors do not build up over a
//! long drag.
//!
//! A gesture goes `Idle → Armed → Dragging → Idle`. The starting poses are captured lazily
//! by the first update rather than by `start`, so that a click on the gizmo that never moves
//! costs nothing and records no undo step.

use common::{euler_to_quat, ParticleId, Pose, PosePatch, RigidRotation};
use glam::f64::DVec3;
use indexmap::IndexMap;

use crate::selection::{Selection, TransformMode};
use crate::store::ParticleStore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialPose {
    pub position: DVec3,
    pub rotation: DVec3,
}

/// The poses of the gesture's participants when it started.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSnapshot {
    pub leader_id: ParticleId,
    pub initial_leader_position: DVec3,
    pub initial_leader_rotation: DVec3,
    /// Every selected particle, leader included if it is selected.
    pub particles: IndexMap<ParticleId, InitialPose>,
}

impl DragSnapshot {
    /// Captures the current poses of `leader` and of the selection. Returns `None` if the
    /// leader is not in the store.
    pub fn capture(
        leader: &ParticleId,
        store: &ParticleStore,
        selection: &Selection,
    ) -> Option<Self> {
        let leader_particle = store.get(leader)?;
        let particles = selection
            .ids()
            .filter_map(|id| {
                store.get(id).map(|particle| {
                    (
                        id.clone(),
                        InitialPose {
                            position: particle.position,
                            rotation: particle.rotation,
                        },
                    )
                })
            })
            .collect();

        Some(Self {
            leader_id: leader.clone(),
            initial_leader_position: leader_particle.position,
            initial_leader_rotation: leader_particle.rotation,
            particles,
        })
    }

    /// A snapshot no longer describes the gesture once the gizmo moved to another particle
    /// or the selection grew or shrank underneath it.
    pub fn is_stale(&self, leader: &ParticleId, selection_len: usize) -> bool {
        &self.leader_id != leader || self.particles.len() != selection_len
    }

    fn followers(&self) -> impl Iterator<Item = (&ParticleId, &InitialPose)> {
        self.particles
            .iter()
            .filter(move |(id, _)| *id != &self.leader_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    /// The pointer is down on the gizmo of this particle, nothing has moved yet.
    Armed(ParticleId),
    Dragging(DragSnapshot),
}

#[derive(Clone, Debug, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, leader: ParticleId) {
        self.state = DragState::Armed(leader);
    }

    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drops the captured poses. A gesture still in progress recaptures on its next update.
    pub fn invalidate(&mut self) {
        if let DragState::Dragging(snapshot) = &self.state {
            self.state = DragState::Armed(snapshot.leader_id.clone());
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    pub fn leader(&self) -> Option<&ParticleId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Armed(leader) => Some(leader),
            DragState::Dragging(snapshot) => Some(&snapshot.leader_id),
        }
    }

    pub fn snapshot(&self) -> Option<&DragSnapshot> {
        match &self.state {
            DragState::Dragging(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Whether an update for `leader` has to capture a fresh snapshot before it can be
    /// applied: at the first update of a gesture, or when the current snapshot is stale.
    pub fn needs_capture(&self, leader: &ParticleId, selection_len: usize) -> bool {
        match &self.state {
            DragState::Dragging(snapshot) => snapshot.is_stale(leader, selection_len),
            DragState::Idle | DragState::Armed(_) => true,
        }
    }

    pub fn set_snapshot(&mut self, snapshot: DragSnapshot) {
        self.state = DragState::Dragging(snapshot);
    }

    /// Moves the leader to `pose` (the components `mode` manipulates) and carries the
    /// followers along. Does nothing until a snapshot has been captured.
    pub fn apply(&self, store: &mut ParticleStore, pose: &Pose, mode: TransformMode) {
        let DragState::Dragging(snapshot) = &self.state else {
            return;
        };

        match mode {
            TransformMode::Translate => translate_group(store, snapshot, pose.position),
            TransformMode::Rotate => rotate_group(store, snapshot, pose.rotation),
            TransformMode::Scale => {
                store.update_pose(&snapshot.leader_id, &PosePatch::scale(pose.scale));
            }
        }
    }
}

/// Leader goes to `position`; followers keep their offset from it. Orientations are left
/// alone.
fn translate_group(store: &mut ParticleStore, snapshot: &DragSnapshot, position: DVec3) {
    let delta = position - snapshot.initial_leader_position;
    store.update_pose(&snapshot.leader_id, &PosePatch::position(position));
    for (id, initial) in snapshot.followers() {
        store.update_pose(id, &PosePatch::position(initial.position + delta));
    }
}

/// Leader takes `rotation`; followers orbit the leader's starting position by the same
/// rotation and turn with it.
fn rotate_group(store: &mut ParticleStore, snapshot: &DragSnapshot, rotation: DVec3) {
    let motion = RigidRotation::between(
        snapshot.initial_leader_position,
        euler_to_quat(snapshot.initial_leader_rotation),
        euler_to_quat(rotation),
    );

    store.update_pose(&snapshot.leader_id, &PosePatch::rotation(rotation));
    for (id, initial) in snapshot.followers() {
        let patch = PosePatch {
            position: Some(motion.apply_to_position(initial.position)),
            rotation: Some(motion.apply_to_euler(initial.rotation)),
            scale: None,
        };
        store.update_pose(id, &patch);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::particle::ParticleKind;
    use crate::placement::ClusterLayout;
    use crate::store::Spawner;

    fn two_selected() -> (ParticleStore, Selection, ParticleId, ParticleId) {
        let mut store = ParticleStore::new();
        let mut spawner = Spawner::seeded(ClusterLayout::default(), 5);
        let leader = store.add_particle(ParticleKind::Proton, Pose::at(DVec3::ZERO), &mut spawner);
        let follower = store.add_particle(
            ParticleKind::Neutron,
            Pose::at(DVec3::new(1.0, 0.0, 0.0)),
            &mut spawner,
        );
        let mut selection = Selection::new();
        selection.toggle_select(leader.clone(), true);
        selection.toggle_select(follower.clone(), true);
        (store, selection, leader, follower)
    }

    #[test]
    fn nothing_moves_before_a_snapshot_exists() {
        let (mut store, _, leader, _) = two_selected();
        let mut drag = DragCoordinator::new();
        drag.start(leader.clone());

        drag.apply(&mut store, &Pose::at(DVec3::splat(9.0)), TransformMode::Translate);
        assert_eq!(store.get(&leader).unwrap().position, DVec3::ZERO);
        assert!(drag.needs_capture(&leader, 2));
    }

    #[test]
    fn snapshot_goes_stale_when_the_selection_changes() {
        let (store, selection, leader, follower) = two_selected();
        let snapshot = DragSnapshot::capture(&leader, &store, &selection).unwrap();

        assert!(!snapshot.is_stale(&leader, 2));
        assert!(snapshot.is_stale(&leader, 1));
        assert!(snapshot.is_stale(&follower, 2));
    }

    #[test]
    fn quarter_turn_swings_the_follower_around_the_leader() {
        let (mut store, selection, leader, follower) = two_selected();
        let mut drag = DragCoordinator::new();
        drag.start(leader.clone());
        drag.set_snapshot(DragSnapshot::capture(&leader, &store, &selection).unwrap());

        let turned = Pose::default().with_rotation(DVec3::new(0.0, 0.0, FRAC_PI_2));
        drag.apply(&mut store, &turned, TransformMode::Rotate);

        let follower = store.get(&follower).unwrap();
        assert!((follower.position - DVec3::new(0.0, 1.0, 0.0)).length() < 1e-9);
        assert!((follower.rotation - DVec3::new(0.0, 0.0, FRAC_PI_2)).length() < 1e-9);
        assert_eq!(store.get(&leader).unwrap().rotation, turned.rotation);
    }

    #[test]
    fn scaling_only_touches_the_leader() {
        let (mut store, selection, leader, follower) = two_selected();
        let mut drag = DragCoordinator::new();
        drag.set_snapshot(DragSnapshot::capture(&leader, &store, &selection).unwrap());

        drag.apply(
            &mut store,
            &Pose::default().with_scale(DVec3::splat(3.0)),
            TransformMode::Scale,
        );

        assert_eq!(store.get(&leader).unwrap().scale, DVec3::splat(3.0));
        assert_eq!(store.get(&follower).unwrap().scale, DVec3::ONE);
    }

    #[test]
    fn invalidate_rearms_a_running_gesture() {
        let (store, selection, leader, _) = two_selected();
        let mut drag = DragCoordinator::new();
        drag.set_snapshot(DragSnapshot::capture(&leader, &store, &selection).unwrap());

        drag.invalidate();
        assert_eq!(drag.snapshot(), None);
        assert_eq!(drag.leader(), Some(&leader));

        drag.end();
        assert!(drag.is_idle());
    }
}

// End of File
