// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use glam::f64::{DQuat, DVec3};
use glam::EulerRot;
use serde::{Deserialize, Serialize};

use crate::serialization_utils::dvec3_serializer;

/// Rotation order used for every Euler triple in the document: rotate about X, then Y,
/// then Z (intrinsic), matching the scene graph the particles are rendered in.
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

pub fn euler_to_quat(euler: DVec3) -> DQuat {
    DQuat::from_euler(EULER_ORDER, euler.x, euler.y, euler.z)
}

pub fn quat_to_euler(rotation: DQuat) -> DVec3 {
    let (x, y, z) = rotation.to_euler(EULER_ORDER);
    DVec3::new(x, y, z)
}

/// Position, orientation (Euler radians) and per-axis scale of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(with = "dvec3_serializer")]
    pub position: DVec3,
    #[serde(with = "dvec3_serializer")]
    pub rotation: DVec3,
    #[serde(with = "dvec3_serializer")]
    pub scale: DVec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

impl Pose {
    pub fn new(position: DVec3, rotation: DVec3, scale: DVec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// An unrotated, unscaled pose at `position`.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: DVec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn orientation(&self) -> DQuat {
        euler_to_quat(self.rotation)
    }
}

/// A partial pose update: only the components that are `Some` are written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PosePatch {
    pub position: Option<DVec3>,
    pub rotation: Option<DVec3>,
    pub scale: Option<DVec3>,
}

impl PosePatch {
    pub fn position(position: DVec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: DVec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn scale(scale: DVec3) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    pub fn apply(&self, position: &mut DVec3, rotation: &mut DVec3, scale: &mut DVec3) {
        if let Some(new_position) = self.position {
            *position = new_position;
        }
        if let Some(new_rotation) = self.rotation {
            *rotation = new_rotation;
        }
        if let Some(new_scale) = self.scale {
            *scale = new_scale;
        }
    }
}

/// A rotation by `delta` about a fixed `pivot` point.
///
/// For a point `x` this gives `pivot + delta * (x - pivot)`, and an orientation `q` becomes
/// `delta * q`. Applying it to several objects moves them as one rigid body: pairwise
/// distances and relative orientations are preserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidRotation {
    pub pivot: DVec3,
    pub delta: DQuat,
}

impl RigidRotation {
    /// The rotation about `pivot` that takes orientation `from` to orientation `to`.
    pub fn between(pivot: DVec3, from: DQuat, to: DQuat) -> Self {
        Self {
            pivot,
            delta: (to * from.inverse()).normalize(),
        }
    }

    pub fn apply_to_position(&self, position: DVec3) -> DVec3 {
        self.pivot + self.delta.mul_vec3(position - self.pivot)
    }

    /// Rotates an Euler orientation and returns it as Euler angles again.
    pub fn apply_to_euler(&self, rotation: DVec3) -> DVec3 {
        quat_to_euler((self.delta * euler_to_quat(rotation)).normalize())
    }
}


// End of File
