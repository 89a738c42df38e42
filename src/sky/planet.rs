//! Glowing planets on circular orbits around fixed centres.

use crate::config::SkyConfig;
use crate::surface::{Rgba, Surface};
use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub center: Vec2,
    pub orbit_radius: f32,
    /// Current orbit angle (rad).  Only ever increases; trig handles wrap.
    pub angle: f32,
    /// Radians added to `angle` each frame.
    pub angular_speed: f32,
    /// Rendered disc radius (px).
    pub radius: f32,
    pub color: Rgba,
    /// Derived from the orbit equation; see [`Planet::orbit_position`].
    pub position: Vec2,
}

impl Planet {
    pub fn new(rng: &mut impl Rng, width: f32, height: f32, config: &SkyConfig) -> Self {
        let center = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let radius = rng.gen_range(config.planet_radius_min..config.planet_radius_max);
        let color = Rgba::new(
            rng.gen_range(0..255),
            rng.gen_range(0..255),
            rng.gen_range(0..255),
            config.planet_alpha,
        );
        let angular_speed =
            rng.gen_range(config.planet_angular_speed_min..config.planet_angular_speed_max);
        let angle = rng.gen_range(0.0..TAU);
        let orbit_radius =
            rng.gen_range(config.planet_orbit_radius_min..config.planet_orbit_radius_max);

        let mut planet = Self {
            center,
            orbit_radius,
            angle,
            angular_speed,
            radius,
            color,
            position: center,
        };
        planet.position = planet.orbit_position();
        planet
    }

    /// `center + orbit_radius · (cos angle, sin angle)`.
    pub fn orbit_position(&self) -> Vec2 {
        self.center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.orbit_radius
    }

    pub fn update(&mut self) {
        self.angle += self.angular_speed;
        self.position = self.orbit_position();
    }

    /// Filled disc with a glow halo in the planet's own colour.
    pub fn draw(&self, surface: &mut impl Surface, glow_blur: f32) {
        surface.save();
        surface.set_fill_color(self.color);
        surface.set_shadow(self.color, glow_blur);
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
    fn new_planet_samples_within_configured_ranges() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..300 {
            let planet = Planet::new(&mut rng, 1024.0, 768.0, &config);
            assert!((0.0..1024.0).contains(&planet.center.x));
            assert!((0.0..768.0).contains(&planet.center.y));
            assert!((30.0..70.0).contains(&planet.radius));
            assert!((50.0..150.0).contains(&planet.orbit_radius));
            assert!((0.001..0.011).contains(&planet.angular_speed));
            assert!((0.0..TAU).contains(&planet.angle));
            assert_eq!(planet.color.a, 0.8);
        }
    }

    #[test]
    fn position_follows_orbit_equation_every_frame() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut planet = Planet::new(&mut rng, 800.0, 600.0, &config);
        assert_eq!(planet.position, planet.orbit_position());

        let mut last_angle = planet.angle;
        for _ in 0..2_000 {
            planet.update();
            assert!(planet.angle > last_angle, "angle must increase monotonically");
            last_angle = planet.angle;

            let expected = planet.center
                + Vec2::new(planet.angle.cos(), planet.angle.sin()) * planet.orbit_radius;
            assert!(planet.position.distance(expected) < 1e-3);
            assert!((planet.position.distance(planet.center) - planet.orbit_radius).abs() < 1e-2);
        }
    }

    #[test]
    fn quarter_turn_lands_below_centre() {
        let mut planet = Planet {
            center: Vec2::new(200.0, 200.0),
            orbit_radius: 100.0,
            angle: 0.0,
            angular_speed: std::f32::consts::FRAC_PI_2,
            radius: 30.0,
            color: Rgba::new(10, 20, 30, 0.8),
            position: Vec2::new(300.0, 200.0),
        };
        planet.update();
        assert!(planet.position.distance(Vec2::new(200.0, 300.0)) < 1e-3);
    }
}
