// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use common::ParticleId;
use indexmap::IndexSet;

/// What the transform gizmo does when it is dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    /// translate → rotate → scale → translate
    pub fn next(self) -> Self {
        match self {
            TransformMode::Translate => TransformMode::Rotate,
            TransformMode::Rotate => TransformMode::Scale,
            TransformMode::Scale => TransformMode::Translate,
        }
    }
}

/// The set of selected particles and the one among them that owns the gizmo.
///
/// Invariant: the active id, when there is one, is a member of the selection. Whenever the
/// membership changes the active id is re-derived: a lone member becomes active, an empty
/// selection has no active id, and if the active id was removed from a larger selection the
/// oldest remaining member takes over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    ids: IndexSet<ParticleId>,
    active: Option<ParticleId>,
    mode: TransformMode,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ParticleId> {
        self.ids.iter()
    }

    pub fn contains(&self, id: &ParticleId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn active(&self) -> Option<&ParticleId> {
        self.active.as_ref()
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    /// Handles a pick of `id`.
    ///
    /// Without `multi`, picking the active particle again cycles the transform mode and
    /// leaves the selection alone; picking anything else selects only that particle. With
    /// `multi`, the membership of `id` is flipped and the rest of the selection is kept.
    pub fn toggle_select(&mut self, id: ParticleId, multi: bool) {
        if multi {
            if !self.ids.shift_remove(&id) {
                self.ids.insert(id);
            }
        } else if self.active.as_ref() == Some(&id) {
            self.mode = self.mode.next();
            return;
        } else {
            self.ids.clear();
            self.ids.insert(id);
        }
        self.refresh_active();
    }

    /// Selects exactly `ids`, in order. The first id becomes active.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ParticleId>) {
        self.ids = ids.into_iter().collect();
        self.active = self.ids.first().cloned();
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
        self.active = None;
    }

    pub fn remove<'a>(&mut self, ids: impl IntoIterator<Item = &'a ParticleId>) {
        let mut changed = false;
        for id in ids {
            changed |= self.ids.shift_remove(id);
        }
        if changed {
            self.refresh_active();
        }
    }

    fn refresh_active(&mut self) {
        match self.ids.len() {
            0 => self.active = None,
            1 => self.active = self.ids.first().cloned(),
            _ => {
                let still_member = self
                    .active
                    .as_ref()
                    .is_some_and(|active| self.ids.contains(active));
                if !still_member {
                    self.active = self.ids.first().cloned();
                }
            }
        }
    }
}


// End of File
