// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random tail appended to every generated id.
const SUFFIX_LEN: usize = 4;

/// The identifier of a single particle. A `ParticleId` is unique across every particle
/// collection of a document and never changes for the lifetime of the particle it names.
///
/// Ids are opaque: nothing may be inferred from their contents. Generated ids happen to look
/// like `proton-18f2a0c11d2-0-k3x9`, but ids loaded from a file can be any string.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ParticleId(String);

impl ParticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Produces fresh `ParticleId`s from a wall-clock timestamp, a sequence number and a short
/// random suffix.
///
/// The (timestamp, sequence) pair never repeats for one generator: when the clock has not
/// advanced (or went backwards) since the previous id, the last timestamp is reused and the
/// sequence number is bumped instead. The suffix only makes ids from independent generators
/// unlikely to collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: u64,
    sequence: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id<R: Rng>(&mut self, prefix: &str, rng: &mut R) -> ParticleId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        if now > self.last_millis {
            self.last_millis = now;
            self.sequence = 0;
        } else {
            self.sequence += 1;
        }

        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect();

        ParticleId(format!(
            "{}-{:x}-{:x}-{}",
            prefix, self.last_millis, self.sequence, suffix
        ))
    }
}


// End of File
