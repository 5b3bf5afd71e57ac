// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;
use std::str::FromStr;

use common::{ParticleId, Pose, PosePatch};
use glam::f64::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a particle depicts. Every kind lives in its own collection of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Proton,
    Neutron,
    Electron,
    /// A free-standing arrow annotation.
    Arrow,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Proton,
        ParticleKind::Neutron,
        ParticleKind::Electron,
        ParticleKind::Arrow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParticleKind::Proton => "proton",
            ParticleKind::Neutron => "neutron",
            ParticleKind::Electron => "electron",
            ParticleKind::Arrow => "arrow",
        }
    }

    pub fn default_color(self) -> Color {
        match self {
            ParticleKind::Proton => Color::from_rgb_u32(0xff3333),
            ParticleKind::Neutron => Color::from_rgb_u32(0x4488ff),
            ParticleKind::Electron => Color::from_rgb_u32(0xaaddff),
            ParticleKind::Arrow => Color::from_rgb_u32(0x00ccff),
        }
    }

    pub fn default_emissive(self) -> Color {
        match self {
            ParticleKind::Proton => Color::from_rgb_u32(0xff0000),
            ParticleKind::Neutron => Color::from_rgb_u32(0x2266dd),
            ParticleKind::Electron => Color::from_rgb_u32(0x4488bb),
            ParticleKind::Arrow => Color::BLACK,
        }
    }

    /// The mesh the renderer should build for this kind, in model units at scale 1.
    pub fn geometry(self) -> Geometry {
        match self {
            ParticleKind::Proton | ParticleKind::Neutron => Geometry::Torus {
                radius: 0.35,
                tube: 0.15,
            },
            // A fat torus with a tiny hole, large enough to envelop the nucleons.
            ParticleKind::Electron => Geometry::Torus {
                radius: 0.8,
                tube: 0.75,
            },
            ParticleKind::Arrow => Geometry::Arrow {
                length: 0.8,
                shaft_radius: 0.03,
                head_radius: 0.08,
                head_length: 0.2,
            },
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Torus {
        radius: f64,
        tube: f64,
    },
    /// A straight shaft along +X centered on the origin, capped by a cone.
    Arrow {
        length: f64,
        shaft_radius: f64,
        head_radius: f64,
        head_length: f64,
    },
}

impl Geometry {
    /// Radius of a sphere around the model origin that contains the whole mesh.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Geometry::Torus { radius, tube } => radius + tube,
            Geometry::Arrow {
                length,
                head_radius,
                head_length,
                ..
            } => (length * 0.5 + head_length).max(head_radius),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #rrggbb or #rgb")]
pub struct ColorParseError(String);

/// A 24-bit RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self(rgb & 0xff_ffff)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_owned());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Color)
                .map_err(|_| invalid()),
            // #rgb is shorthand for #rrggbb
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Color)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Which color of a particle's material a recolor operation writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChannel {
    Base,
    Emissive,
}

/// A single object of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub position: DVec3,
    /// Euler angles in radians, see [`common::EULER_ORDER`].
    pub rotation: DVec3,
    pub scale: DVec3,
    pub color: Color,
    pub emissive: Color,
}

impl Particle {
    /// A particle with the default look of its kind.
    pub fn new(id: ParticleId, kind: ParticleKind, pose: Pose) -> Self {
        Self {
            id,
            kind,
            position: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
            color: kind.default_color(),
            emissive: kind.default_emissive(),
        }
    }

    pub fn apply_patch(&mut self, patch: &PosePatch) {
        patch.apply(&mut self.position, &mut self.rotation, &mut self.scale);
    }

    pub fn set_color(&mut self, channel: ColorChannel, color: Color) {
        match channel {
            ColorChannel::Base => self.color = color,
            ColorChannel::Emissive => self.emissive = color,
        }
    }

    pub fn bounding_radius(&self) -> f64 {
        self.kind.geometry().bounding_radius() * self.scale.abs().max_element()
    }
}


// End of File
