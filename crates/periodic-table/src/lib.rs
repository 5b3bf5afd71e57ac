// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! The elements the atom builder can load as one-click presets, with the nucleon counts of
//! their most common isotope.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Element {
    Hydrogen = 1,
    Helium = 2,
    Lithium = 3,
    Beryllium = 4,
    Boron = 5,
    Carbon = 6,
    Nitrogen = 7,
    Oxygen = 8,
    Iron = 26,
    Gold = 79,
}

impl Element {
    pub const ALL: [Element; 10] = [
        Element::Hydrogen,
        Element::Helium,
        Element::Lithium,
        Element::Beryllium,
        Element::Boron,
        Element::Carbon,
        Element::Nitrogen,
        Element::Oxygen,
        Element::Iron,
        Element::Gold,
    ];

    pub fn atomic_number(self) -> u8 {
        self as u8
    }

    pub fn from_atomic_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|element| element.atomic_number() == n)
    }

    /// Case-insensitive lookup by chemical symbol (`"he"`, `"He"` and `"HE"` all match).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        BY_SYMBOL
            .get(symbol.to_ascii_lowercase().as_str())
            .map(|preset| preset.element)
    }

    pub fn preset(self) -> &'static ElementPreset {
        PRESETS
            .iter()
            .find(|preset| preset.element == self)
            .expect("every Element has an entry in PRESETS")
    }

    pub fn symbol(self) -> &'static str {
        self.preset().symbol
    }

    pub fn name(self) -> &'static str {
        self.preset().name
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Particle counts for a neutral atom of `element`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementPreset {
    pub element: Element,
    pub symbol: &'static str,
    pub name: &'static str,
    pub protons: usize,
    pub neutrons: usize,
}

impl ElementPreset {
    /// Presets describe neutral atoms, so there is one electron per proton.
    pub fn electrons(&self) -> usize {
        self.protons
    }

    /// A = Z + N.
    pub fn mass_number(&self) -> usize {
        self.protons + self.neutrons
    }
}

const fn preset(
    element: Element,
    symbol: &'static str,
    name: &'static str,
    neutrons: usize,
) -> ElementPreset {
    ElementPreset {
        element,
        symbol,
        name,
        protons: element as usize,
        neutrons,
    }
}

/// The preset catalog, in display order.
pub static PRESETS: [ElementPreset; 10] = [
    preset(Element::Hydrogen, "H", "Hydrogen", 0),
    preset(Element::Helium, "He", "Helium", 2),
    preset(Element::Lithium, "Li", "Lithium", 4),
    preset(Element::Beryllium, "Be", "Beryllium", 5),
    preset(Element::Boron, "B", "Boron", 6),
    preset(Element::Carbon, "C", "Carbon", 6),
    preset(Element::Nitrogen, "N", "Nitrogen", 7),
    preset(Element::Oxygen, "O", "Oxygen", 8),
    preset(Element::Iron, "Fe", "Iron", 30),
    preset(Element::Gold, "Au", "Gold", 118),
];

lazy_static! {
    static ref BY_SYMBOL: HashMap<String, &'static ElementPreset> = PRESETS
        .iter()
        .map(|preset| (preset.symbol.to_ascii_lowercase(), preset))
        .collect();
}


// End of File
