//! Twinkling background stars.

use crate::config::SkyConfig;
use crate::surface::{Rgba, Surface};
use bevy::math::Vec2;
use rand::Rng;

/// A fixed point of light whose opacity oscillates between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// Signed per-frame opacity change.  Flips sign at either bound.
    pub opacity_delta: f32,
    /// Lower twinkle bound.
    pub floor: f32,
    /// Upper twinkle bound.
    pub ceiling: f32,
}

impl Star {
    /// Place a star uniformly at random inside a `width × height` surface.
    pub fn new(rng: &mut impl Rng, width: f32, height: f32, config: &SkyConfig) -> Self {
        Self {
            position: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            radius: rng.gen_range(config.star_radius_min..config.star_radius_max),
            opacity: rng.gen_range(config.star_opacity_start_min..config.star_opacity_start_max),
            opacity_delta: rng.gen_range(config.star_twinkle_min..config.star_twinkle_max),
            floor: config.star_opacity_floor,
            ceiling: config.star_opacity_ceiling,
        }
    }

    /// Advance the twinkle by one frame.
    ///
    /// On crossing a bound the opacity is pinned to that bound and the delta
    /// reverses, so it never leaves `[floor, ceiling]`.
    pub fn update(&mut self) {
        self.opacity += self.opacity_delta;
        if self.opacity > self.ceiling {
            self.opacity = self.ceiling;
            self.opacity_delta = -self.opacity_delta.abs();
        } else if self.opacity < self.floor {
            self.opacity = self.floor;
            self.opacity_delta = self.opacity_delta.abs();
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, color: Rgba) {
        surface.save();
        surface.set_global_alpha(self.opacity);
        surface.set_fill_color(color);
        surface.fill_circle(self.position.x, self.position.y, self.radius);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_star_samples_within_configured_ranges() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let star = Star::new(&mut rng, 640.0, 480.0, &config);
            assert!((0.0..640.0).contains(&star.position.x));
            assert!((0.0..480.0).contains(&star.position.y));
            assert!((0.5..2.0).contains(&star.radius));
            assert!((0.5..1.0).contains(&star.opacity));
            assert!((0.005..0.025).contains(&star.opacity_delta));
        }
    }

    #[test]
    fn opacity_stays_within_bounds_over_many_frames() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut stars: Vec<Star> = (0..150)
            .map(|_| Star::new(&mut rng, 800.0, 600.0, &config))
            .collect();

        for _ in 0..10_000 {
            for star in stars.iter_mut() {
                star.update();
                assert!(
                    (0.3..=1.0).contains(&star.opacity),
                    "opacity {} escaped [0.3, 1.0]",
                    star.opacity
                );
            }
        }
    }

    #[test]
    fn delta_reverses_at_each_bound() {
        let mut star = Star {
            position: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.99,
            opacity_delta: 0.02,
            floor: 0.3,
            ceiling: 1.0,
        };
        star.update();
        assert_eq!(star.opacity, 1.0);
        assert!(star.opacity_delta < 0.0);

        star.opacity = 0.31;
        star.update();
        assert_eq!(star.opacity, 0.3);
        assert!(star.opacity_delta > 0.0);

        // Inside the band the direction is kept.
        star.update();
        assert!(star.opacity > 0.3 && star.opacity_delta > 0.0);
    }
}
