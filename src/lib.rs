// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Headless core of the atom builder.
//!
//! A [`Document`] holds a scene of protons, neutrons, electrons and arrow annotations. The
//! presentation layer (renderer, transform gizmo, picking, control panel) forwards user
//! input to the document's methods and redraws from [`Document::store`] and
//! [`Document::selection`] afterwards.

pub mod document;
pub mod drag;
pub mod history;
pub mod particle;
pub mod persistence;
pub mod placement;
pub mod selection;
pub mod store;

pub use common::{ParticleId, Pose, PosePatch};
pub use document::Document;
pub use particle::{Color, ColorChannel, Geometry, Particle, ParticleKind};
pub use persistence::PersistenceError;
pub use selection::{Selection, TransformMode};
pub use store::ParticleStore;

pub const APP_NAME: &str = "atom-builder";

/// Crates whose log records are shown.
pub const LOG_TARGETS: &[&str] = &[
    "atom_builder",
    "app_config",
    "atom_builder_common",
    "atom_builder_keyboard",
];

// End of File
