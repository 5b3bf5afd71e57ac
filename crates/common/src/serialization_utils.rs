// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! `#[serde(with = ...)]` helpers for glam types, so that vectors are written as plain
//! `[x, y, z]` arrays.

/// Serializes a `DVec3` as an array of 3 f64 values.
pub mod dvec3_serializer {
    use glam::f64::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vec: &DVec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        vec.to_array().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DVec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[f64; 3]>::deserialize(deserializer).map(DVec3::from_array)
    }
}


// End of File
