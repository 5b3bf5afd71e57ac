// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Types shared by every atom-builder crate: particle ids, poses and the small amount of 3D
//! math the transform gizmo needs.

mod bounding_box;
pub mod ids;
mod pose;
pub mod serialization_utils;

pub use bounding_box::BoundingBox;
pub use ids::{IdGenerator, ParticleId};
pub use pose::{euler_to_quat, quat_to_euler, Pose, PosePatch, RigidRotation, EULER_ORDER};

// End of File
