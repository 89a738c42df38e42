//! Shooting stars that streak diagonally and recycle themselves off-screen.

use crate::config::SkyConfig;
use crate::surface::{Rgba, Surface};
use bevy::math::Vec2;
use rand::Rng;

/// A line-segment meteor travelling at a fixed angle.
///
/// A meteor is never removed.  Once its head passes the bottom or right edge
/// of the surface, [`Meteor::reset`] re-rolls every field in place and it
/// re-enters from above the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Head of the trail.
    pub position: Vec2,
    /// Trail length behind the head (px).
    pub length: f32,
    /// Distance travelled per frame (px).
    pub speed: f32,
    /// Travel direction in radians, y pointing down.
    pub angle: f32,
    pub opacity: f32,
}

impl Meteor {
    pub fn new(rng: &mut impl Rng, width: f32, height: f32, config: &SkyConfig) -> Self {
        let mut meteor = Self {
            position: Vec2::ZERO,
            length: 0.0,
            speed: 0.0,
            angle: config.meteor_angle,
            opacity: 0.0,
        };
        meteor.reset(rng, width, height, config);
        meteor
    }

    /// Re-roll every field: a fresh position somewhere above the visible area
    /// and new length, speed and opacity.
    pub fn reset(&mut self, rng: &mut impl Rng, width: f32, height: f32, config: &SkyConfig) {
        self.position = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(-height..0.0));
        self.length = rng.gen_range(config.meteor_length_min..config.meteor_length_max);
        self.speed = rng.gen_range(config.meteor_speed_min..config.meteor_speed_max);
        self.angle = config.meteor_angle;
        self.opacity = rng.gen_range(config.meteor_opacity_min..config.meteor_opacity_max);
    }

    /// Unit vector along the travel direction.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Tail end of the trail, `length` pixels behind the head.
    pub fn tail(&self) -> Vec2 {
        self.position - self.direction() * self.length
    }

    /// Advance one frame; reset in place once past the bottom or right edge.
    ///
    /// Returns `true` if the meteor was recycled this frame.
    pub fn update(
        &mut self,
        rng: &mut impl Rng,
        width: f32,
        height: f32,
        config: &SkyConfig,
    ) -> bool {
        self.position += self.direction() * self.speed;
        if self.position.y > height || self.position.x > width {
            self.reset(rng, width, height, config);
            return true;
        }
        false
    }

    pub fn draw(&self, surface: &mut impl Surface, color: Rgba, line_width: f32) {
        let tail = self.tail();
        surface.save();
        surface.set_stroke_color(color.with_alpha(self.opacity));
        surface.set_line_width(line_width);
        surface.stroke_line(self.position.x, self.position.y, tail.x, tail.y);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_4;

    fn assert_fresh(meteor: &Meteor, width: f32, height: f32) {
        assert!((0.0..width).contains(&meteor.position.x), "{meteor:?}");
        assert!(meteor.position.y < 0.0 && meteor.position.y >= -height, "{meteor:?}");
        assert!((50.0..130.0).contains(&meteor.length), "{meteor:?}");
        assert!((6.0..16.0).contains(&meteor.speed), "{meteor:?}");
        assert!((0.5..=1.0).contains(&meteor.opacity), "{meteor:?}");
        assert_eq!(meteor.angle, FRAC_PI_4);
    }

    #[test]
    fn one_step_moves_along_45_degrees() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut meteor = Meteor {
            position: Vec2::new(100.0, -50.0),
            length: 60.0,
            speed: 10.0,
            angle: FRAC_PI_4,
            opacity: 0.8,
        };

        let recycled = meteor.update(&mut rng, 800.0, 600.0, &config);

        assert!(!recycled);
        assert!((meteor.position.x - 107.07).abs() < 0.01, "{meteor:?}");
        assert!((meteor.position.y - -42.93).abs() < 0.01, "{meteor:?}");
        assert_eq!(meteor.length, 60.0);
        assert_eq!(meteor.speed, 10.0);
    }

    #[test]
    fn tail_trails_behind_head() {
        let meteor = Meteor {
            position: Vec2::new(100.0, 100.0),
            length: 60.0,
            speed: 10.0,
            angle: FRAC_PI_4,
            opacity: 1.0,
        };
        let tail = meteor.tail();
        assert!(tail.x < 100.0 && tail.y < 100.0);
        assert!((meteor.position.distance(tail) - 60.0).abs() < 1e-3);
    }

    #[test]
    fn new_meteor_starts_above_the_surface() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_fresh(&Meteor::new(&mut rng, 800.0, 600.0, &config), 800.0, 600.0);
        }
    }

    #[test]
    fn crossing_bottom_edge_fully_resets() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut meteor = Meteor {
            position: Vec2::new(10.0, 595.0),
            length: 200.0,
            speed: 40.0,
            angle: FRAC_PI_4,
            opacity: 0.1,
        };
        assert!(meteor.update(&mut rng, 800.0, 600.0, &config));
        assert_fresh(&meteor, 800.0, 600.0);
    }

    #[test]
    fn crossing_right_edge_fully_resets() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(10);
        let mut meteor = Meteor {
            position: Vec2::new(799.0, 10.0),
            length: 60.0,
            speed: 10.0,
            angle: FRAC_PI_4,
            opacity: 0.9,
        };
        assert!(meteor.update(&mut rng, 800.0, 600.0, &config));
        assert_fresh(&meteor, 800.0, 600.0);
    }

    #[test]
    fn every_meteor_stays_in_play_over_many_frames() {
        let config = SkyConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        let mut meteor = Meteor::new(&mut rng, 400.0, 300.0, &config);
        let mut resets = 0;
        for _ in 0..5_000 {
            if meteor.update(&mut rng, 400.0, 300.0, &config) {
                resets += 1;
                assert_fresh(&meteor, 400.0, 300.0);
            } else {
                assert!(meteor.position.x <= 400.0 && meteor.position.y <= 300.0);
            }
        }
        assert!(resets > 0);
    }
}
