//! The night-sky renderer context.
//!
//! [`NightSky`] owns every particle plus the RNG that seeds them and the
//! settings they were built from.  It knows nothing about Bevy scheduling: a
//! host calls [`NightSky::init`] once a surface exists and [`NightSky::step`]
//! once per display refresh.
//!
//! ## Frame step
//!
//! 1. Fill the whole surface with the background colour.
//! 2. Stars: twinkle, then draw.
//! 3. Meteors: advance (recycling any that left the surface), then draw.
//! 4. Planets: advance along the orbit, then draw with glow.
//!
//! Particles never interact, so each kind is a plain `Vec` iterated in order.

pub mod meteor;
pub mod planet;
pub mod star;

pub use meteor::Meteor;
pub use planet::Planet;
pub use star::Star;

use crate::config::{Palette, SkyConfig};
use crate::error::SkyResult;
use crate::surface::Surface;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Renderer context: the three particle collections and their settings.
#[derive(Resource, Debug, Clone)]
pub struct NightSky {
    pub stars: Vec<Star>,
    pub meteors: Vec<Meteor>,
    pub planets: Vec<Planet>,
    config: SkyConfig,
    palette: Palette,
    rng: StdRng,
}

impl NightSky {
    /// Build an empty sky.  Fails if the config's colours do not parse.
    ///
    /// The RNG is seeded from `config.seed` when present, otherwise from OS
    /// entropy.
    pub fn new(config: SkyConfig) -> SkyResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build an empty sky driven by the given generator.
    pub fn with_rng(config: SkyConfig, rng: StdRng) -> SkyResult<Self> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(Self {
            stars: Vec::new(),
            meteors: Vec::new(),
            planets: Vec::new(),
            config,
            palette,
            rng,
        })
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Discard every particle and repopulate with the configured counts,
    /// placed within a `width × height` surface.
    ///
    /// Safe to call again at any time; nothing from the previous population
    /// survives.
    pub fn init(&mut self, width: f32, height: f32) {
        let (width, height) = (width.max(1.0), height.max(1.0));
        let Self {
            stars,
            meteors,
            planets,
            config,
            rng,
            ..
        } = self;

        stars.clear();
        meteors.clear();
        planets.clear();

        stars.extend((0..config.star_count).map(|_| Star::new(rng, width, height, config)));
        meteors.extend((0..config.meteor_count).map(|_| Meteor::new(rng, width, height, config)));
        planets.extend((0..config.planet_count).map(|_| Planet::new(rng, width, height, config)));

        info!(
            "Night sky initialised: {} stars, {} meteors, {} planets on {}x{}",
            stars.len(),
            meteors.len(),
            planets.len(),
            width,
            height
        );
    }

    /// One frame: update and draw every particle onto `surface`.
    ///
    /// Bounds are read from the surface on every call, so a resize takes
    /// effect on the very next frame.
    pub fn step(&mut self, surface: &mut impl Surface) {
        let (width, height) = (surface.width().max(1.0), surface.height().max(1.0));
        let palette = self.palette;
        let Self {
            stars,
            meteors,
            planets,
            config,
            rng,
            ..
        } = self;

        surface.save();
        surface.set_global_alpha(1.0);
        surface.set_fill_color(palette.background);
        surface.fill_rect(0.0, 0.0, width, height);
        surface.restore();

        for star in stars.iter_mut() {
            star.update();
            star.draw(surface, palette.star);
        }

        for meteor in meteors.iter_mut() {
            meteor.update(rng, width, height, config);
            meteor.draw(surface, palette.meteor, config.meteor_line_width);
        }

        for planet in planets.iter_mut() {
            planet.update();
            planet.draw(surface, config.planet_glow_blur);
        }
    }

    /// Total number of live particles.
    pub fn particle_count(&self) -> usize {
        self.stars.len() + self.meteors.len() + self.planets.len()
    }
}
