// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use glam::f64::DVec3;

/// An axis-aligned bounding box defined by two opposite corners (`min` and `max`).
/// `min.x <= max.x`, `min.y <= max.y`, `min.z <= max.z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    /// A degenerate box containing exactly one `point`.
    pub fn from_point(point: DVec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// The smallest box containing every sphere in `spheres`, given as `(center, radius)`
    /// pairs. Returns `None` when the iterator is empty.
    pub fn enclosing_spheres(spheres: impl IntoIterator<Item = (DVec3, f64)>) -> Option<Self> {
        let mut spheres = spheres.into_iter();
        let (center, radius) = spheres.next()?;
        let mut bounds = Self::from_point(center);
        bounds.enclose_sphere(center, radius);
        for (center, radius) in spheres {
            bounds.enclose_sphere(center, radius);
        }
        Some(bounds)
    }

    /// Grows this `BoundingBox` in-place to ensure that it will contain a
    /// sphere with a specified `center` position and `radius`.
    pub fn enclose_sphere(&mut self, center: DVec3, radius: f64) {
        self.min = self.min.min(center - DVec3::splat(radius));
        self.max = self.max.max(center + DVec3::splat(radius));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sphere_list_has_no_bounds() {
        assert_eq!(BoundingBox::enclosing_spheres(std::iter::empty()), None);
    }

    #[test]
    fn encloses_every_sphere() {
        let bounds = BoundingBox::enclosing_spheres([
            (DVec3::ZERO, 0.5),
            (DVec3::new(2.0, -1.0, 0.0), 1.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, DVec3::new(-0.5, -2.0, -1.0));
        assert_eq!(bounds.max, DVec3::new(3.0, 0.5, 1.0));
    }

    #[test]
    fn zero_radius_spheres_are_points() {
        let bounds =
            BoundingBox::enclosing_spheres([(DVec3::new(1.0, 2.0, 3.0), 0.0)]).unwrap();
        assert_eq!(bounds, BoundingBox::from_point(DVec3::new(1.0, 2.0, 3.0)));
    }
}

// End of File
