// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Where new particles go.
//!
//! Particles created in bulk are laid out as a loose ball: shells of growing radius, each
//! filled along a golden-angle spiral, with a little random jitter so that the ball does not
//! look machined. The layout is decorative, it models nothing physical.

use std::f64::consts::PI;

use app_config::BuilderConfig;
use glam::f64::DVec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterLayout {
    pub layer_spacing: f64,
    pub points_per_layer: usize,
    pub jitter: f64,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self::from(&BuilderConfig::default())
    }
}

impl From<&BuilderConfig> for ClusterLayout {
    fn from(config: &BuilderConfig) -> Self {
        Self {
            layer_spacing: config.layer_spacing,
            points_per_layer: config.points_per_layer,
            jitter: config.jitter,
        }
    }
}

impl ClusterLayout {
    /// Position of the `index`-th particle of a cluster, before jitter.
    ///
    /// The shell is `floor(cbrt(index + 1))`, so shell `k` starts at index `k³ - 1`; the polar
    /// angle cycles through `points_per_layer` evenly spaced bands and the azimuth advances by
    /// the golden angle.
    pub fn base_position(&self, index: usize) -> DVec3 {
        let bands = self.points_per_layer.max(1);
        let layer = ((index + 1) as f64).cbrt().floor();
        let radius = layer * self.layer_spacing;

        let band = (index % bands) as f64;
        let phi = (1.0 - 2.0 * (band + 0.5) / bands as f64).acos();
        let theta = PI * (1.0 + 5f64.sqrt()) * index as f64;

        radius
            * DVec3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            )
    }

    pub fn position<R: Rng>(&self, index: usize, rng: &mut R) -> DVec3 {
        let base = self.base_position(index);
        if self.jitter <= 0.0 {
            return base;
        }
        let jitter = self.jitter;
        base + DVec3::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        )
    }
}

/// Rounds every component of `position` to the nearest multiple of `step`. A non-positive
/// step leaves the position untouched.
pub fn snap_to_grid(position: DVec3, step: f64) -> DVec3 {
    if step <= 0.0 {
        return position;
    }
    (position / step).round() * step
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn first_shell_sits_on_the_layer_radius() {
        let layout = ClusterLayout::default();
        // Indices 0..=6 all have floor(cbrt(i + 1)) == 1.
        for index in 0..7 {
            let radius = layout.base_position(index).length();
            assert!((radius - 0.8).abs() < 1e-12, "index {index}: {radius}");
        }
        assert!(layout.base_position(30).length() > 0.8 + 1e-9);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let layout = ClusterLayout::default();
        let mut rng = StdRng::seed_from_u64(3);
        for index in 0..50 {
            let offset = layout.position(index, &mut rng) - layout.base_position(index);
            assert!(offset.abs().max_element() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let layout = ClusterLayout::default();
        let (mut a, mut b) = (StdRng::seed_from_u64(11), StdRng::seed_from_u64(11));
        for index in 0..20 {
            assert_eq!(layout.position(index, &mut a), layout.position(index, &mut b));
        }
    }

    #[test]
    fn jitter_free_layout_is_deterministic_without_a_seed() {
        let layout = ClusterLayout {
            jitter: 0.0,
            ..Default::default()
        };
        assert_eq!(
            layout.position(5, &mut rand::thread_rng()),
            layout.base_position(5)
        );
    }

    #[test]
    fn snapping_rounds_to_half_units() {
        let snapped = snap_to_grid(DVec3::new(0.24, 0.26, -1.1), 0.5);
        assert_eq!(snapped, DVec3::new(0.0, 0.5, -1.0));
        assert_eq!(snap_to_grid(DVec3::splat(0.3), 0.0), DVec3::splat(0.3));
    }
}

// End of File
