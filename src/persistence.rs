// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Documents on disk.
//!
//! A document is stored as a JSON object with one array per particle kind:
//!
//! ```json
//! {
//!   "protons": [
//!     {
//!       "id": "proton-18f3a2b4c1d-0-x7Qa",
//!       "position": [0.0, 0.0, 0.0],
//!       "rotation": [0.0, 0.0, 0.0],
//!       "scale": [1.0, 1.0, 1.0],
//!       "color": "#ff3333",
//!       "emissive": "#ff0000"
//!     }
//!   ],
//!   "neutrons": [],
//!   "electrons": [],
//!   "arrows": []
//! }
//! ```
//!
//! The kind of a particle is given by the array it appears in. A missing array reads as
//! empty; a particle missing any field is rejected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use common::serialization_utils::dvec3_serializer;
use common::ParticleId;
use glam::f64::DVec3;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::particle::{Color, Particle, ParticleKind};
use crate::store::{ParticleStore, StoreError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("particle id {0} is used more than once")]
    DuplicateId(ParticleId),

    #[error("particle {id} has a non-finite coordinate")]
    NonFiniteValue { id: ParticleId },
}

impl From<StoreError> for PersistenceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => PersistenceError::DuplicateId(id),
        }
    }
}

/// One particle as written to disk. The kind is not stored per record: it is implied by the
/// array the record sits in, and a `kind` field in a file is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct ParticleRecord {
    id: ParticleId,
    #[serde(with = "dvec3_serializer")]
    position: DVec3,
    #[serde(with = "dvec3_serializer")]
    rotation: DVec3,
    #[serde(with = "dvec3_serializer")]
    scale: DVec3,
    color: Color,
    emissive: Color,
}

impl ParticleRecord {
    fn from_particle(particle: &Particle) -> Self {
        Self {
            id: particle.id.clone(),
            position: particle.position,
            rotation: particle.rotation,
            scale: particle.scale,
            color: particle.color,
            emissive: particle.emissive,
        }
    }

    fn into_particle(self, kind: ParticleKind) -> Result<Particle, PersistenceError> {
        let finite = [self.position, self.rotation, self.scale]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(PersistenceError::NonFiniteValue { id: self.id });
        }

        Ok(Particle {
            id: self.id,
            kind,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            color: self.color,
            emissive: self.emissive,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct DocumentFile {
    protons: Vec<ParticleRecord>,
    neutrons: Vec<ParticleRecord>,
    electrons: Vec<ParticleRecord>,
    arrows: Vec<ParticleRecord>,
}

impl DocumentFile {
    fn records_mut(&mut self, kind: ParticleKind) -> &mut Vec<ParticleRecord> {
        match kind {
            ParticleKind::Proton => &mut self.protons,
            ParticleKind::Neutron => &mut self.neutrons,
            ParticleKind::Electron => &mut self.electrons,
            ParticleKind::Arrow => &mut self.arrows,
        }
    }

    fn from_store(store: &ParticleStore) -> Self {
        let mut file = Self::default();
        for kind in ParticleKind::ALL {
            *file.records_mut(kind) = store
                .collection(kind)
                .iter()
                .map(ParticleRecord::from_particle)
                .collect();
        }
        file
    }

    /// Validates every record and builds the store they describe.
    fn into_store(mut self) -> Result<ParticleStore, PersistenceError> {
        let mut store = ParticleStore::new();
        for kind in ParticleKind::ALL {
            for record in std::mem::take(self.records_mut(kind)) {
                store.insert(record.into_particle(kind)?)?;
            }
        }
        Ok(store)
    }
}

/// Serializes `store` as a pretty-printed JSON document.
pub fn store_to_json(store: &ParticleStore) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&DocumentFile::from_store(store))?)
}

/// Parses and validates a JSON document.
pub fn store_from_json(json: &str) -> Result<ParticleStore, PersistenceError> {
    serde_json::from_str::<DocumentFile>(json)?.into_store()
}

impl Document {
    pub fn save_json(&self) -> Result<String, PersistenceError> {
        store_to_json(self.store())
    }

    /// Replaces the scene with the document in `json`. On error the current scene, its
    /// selection and its history are left exactly as they were.
    pub fn load_json(&mut self, json: &str) -> Result<(), PersistenceError> {
        let store = store_from_json(json)?;
        self.replace_store(store);
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = self.save_json()?;
        fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved {} particles to {}", self.store().len(), path.display());
        Ok(())
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let result = fs::read_to_string(path)
            .map_err(|source| PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| self.load_json(&json));

        match &result {
            Ok(()) => info!("loaded {} particles from {}", self.store().len(), path.display()),
            Err(err) => warn!("could not load {}: {}", path.display(), err),
        }
        result
    }
}


// End of File
