//! Runtime sky configuration loaded from `assets/sky.toml`.
//!
//! [`SkyConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_sky_config`] reads the TOML file
//! (path overridable with `NIGHT_SKY_CONFIG`) and overwrites the defaults with
//! any values present.  Missing keys fall back to the compile-time defaults, so
//! a minimal TOML can override just the values you care about:
//!
//! ```toml
//! star_count = 400
//! background_color = "#000000"
//! planet_glow_blur = 35.0
//! ```
//!
//! A file that fails to parse or validate is reported and ignored.

use crate::constants::*;
use crate::error::{
    validate_heading, validate_non_negative, validate_opacity, validate_range, validate_within,
    SkyResult,
};
use crate::surface::Rgba;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable sky configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    // ── Population ───────────────────────────────────────────────────────────
    pub star_count: usize,
    pub meteor_count: usize,
    pub planet_count: usize,

    // ── Colours (#rrggbb) ─────────────────────────────────────────────────────
    pub background_color: String,
    pub star_color: String,
    pub meteor_color: String,

    // ── Stars ─────────────────────────────────────────────────────────────────
    pub star_radius_min: f32,
    pub star_radius_max: f32,
    pub star_opacity_start_min: f32,
    pub star_opacity_start_max: f32,
    pub star_opacity_floor: f32,
    pub star_opacity_ceiling: f32,
    pub star_twinkle_min: f32,
    pub star_twinkle_max: f32,

    // ── Meteors ───────────────────────────────────────────────────────────────
    pub meteor_length_min: f32,
    pub meteor_length_max: f32,
    pub meteor_speed_min: f32,
    pub meteor_speed_max: f32,
    pub meteor_opacity_min: f32,
    pub meteor_opacity_max: f32,
    pub meteor_angle: f32,
    pub meteor_line_width: f32,

    // ── Planets ───────────────────────────────────────────────────────────────
    pub planet_radius_min: f32,
    pub planet_radius_max: f32,
    pub planet_orbit_radius_min: f32,
    pub planet_orbit_radius_max: f32,
    pub planet_angular_speed_min: f32,
    pub planet_angular_speed_max: f32,
    pub planet_alpha: f32,
    pub planet_glow_blur: f32,

    // ── Window ────────────────────────────────────────────────────────────────
    pub window_title: String,
    /// Physical pixels.
    pub window_width: u32,
    /// Physical pixels.
    pub window_height: u32,

    /// Fixed RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            meteor_count: METEOR_COUNT,
            planet_count: PLANET_COUNT,
            background_color: BACKGROUND_COLOR.to_string(),
            star_color: STAR_COLOR.to_string(),
            meteor_color: METEOR_COLOR.to_string(),
            star_radius_min: STAR_RADIUS_MIN,
            star_radius_max: STAR_RADIUS_MAX,
            star_opacity_start_min: STAR_OPACITY_START_MIN,
            star_opacity_start_max: STAR_OPACITY_START_MAX,
            star_opacity_floor: STAR_OPACITY_FLOOR,
            star_opacity_ceiling: STAR_OPACITY_CEILING,
            star_twinkle_min: STAR_TWINKLE_MIN,
            star_twinkle_max: STAR_TWINKLE_MAX,
            meteor_length_min: METEOR_LENGTH_MIN,
            meteor_length_max: METEOR_LENGTH_MAX,
            meteor_speed_min: METEOR_SPEED_MIN,
            meteor_speed_max: METEOR_SPEED_MAX,
            meteor_opacity_min: METEOR_OPACITY_MIN,
            meteor_opacity_max: METEOR_OPACITY_MAX,
            meteor_angle: METEOR_ANGLE,
            meteor_line_width: METEOR_LINE_WIDTH,
            planet_radius_min: PLANET_RADIUS_MIN,
            planet_radius_max: PLANET_RADIUS_MAX,
            planet_orbit_radius_min: PLANET_ORBIT_RADIUS_MIN,
            planet_orbit_radius_max: PLANET_ORBIT_RADIUS_MAX,
            planet_angular_speed_min: PLANET_ANGULAR_SPEED_MIN,
            planet_angular_speed_max: PLANET_ANGULAR_SPEED_MAX,
            planet_alpha: PLANET_ALPHA,
            planet_glow_blur: PLANET_GLOW_BLUR,
            window_title: WINDOW_TITLE.to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            seed: None,
        }
    }
}

/// Colours resolved from their hex strings once, at init.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub star: Rgba,
    pub meteor: Rgba,
}

impl SkyConfig {
    /// Check every colour parses, every sampling range is non-empty, and
    /// every value the animation relies on keeps it bounded.
    pub fn validate(&self) -> SkyResult<()> {
        self.palette()?;

        validate_range("star_radius", self.star_radius_min, self.star_radius_max)?;
        validate_range(
            "star_opacity_start",
            self.star_opacity_start_min,
            self.star_opacity_start_max,
        )?;
        validate_range(
            "star_opacity_bounds",
            self.star_opacity_floor,
            self.star_opacity_ceiling,
        )?;
        validate_opacity("star_opacity_floor", self.star_opacity_floor)?;
        validate_opacity("star_opacity_ceiling", self.star_opacity_ceiling)?;
        // Stars start inside the interval they twinkle in.
        validate_within(
            "star_opacity_start_min",
            self.star_opacity_start_min,
            self.star_opacity_floor,
            self.star_opacity_ceiling,
            "[star_opacity_floor, star_opacity_ceiling]",
        )?;
        validate_within(
            "star_opacity_start_max",
            self.star_opacity_start_max,
            self.star_opacity_floor,
            self.star_opacity_ceiling,
            "[star_opacity_floor, star_opacity_ceiling]",
        )?;
        validate_range("star_twinkle", self.star_twinkle_min, self.star_twinkle_max)?;

        validate_range("meteor_length", self.meteor_length_min, self.meteor_length_max)?;
        validate_range("meteor_speed", self.meteor_speed_min, self.meteor_speed_max)?;
        validate_range(
            "meteor_opacity",
            self.meteor_opacity_min,
            self.meteor_opacity_max,
        )?;
        validate_opacity("meteor_opacity_min", self.meteor_opacity_min)?;
        validate_opacity("meteor_opacity_max", self.meteor_opacity_max)?;
        validate_heading("meteor_angle", self.meteor_angle)?;
        validate_non_negative("meteor_line_width", self.meteor_line_width)?;

        validate_range("planet_radius", self.planet_radius_min, self.planet_radius_max)?;
        validate_range(
            "planet_orbit_radius",
            self.planet_orbit_radius_min,
            self.planet_orbit_radius_max,
        )?;
        validate_range(
            "planet_angular_speed",
            self.planet_angular_speed_min,
            self.planet_angular_speed_max,
        )?;
        validate_opacity("planet_alpha", self.planet_alpha)?;
        validate_non_negative("planet_glow_blur", self.planet_glow_blur)?;
        Ok(())
    }

    pub fn palette(&self) -> SkyResult<Palette> {
        Ok(Palette {
            background: Rgba::from_hex(&self.background_color)?,
            star: Rgba::from_hex(&self.star_color)?,
            meteor: Rgba::from_hex(&self.meteor_color)?,
        })
    }

    /// Parse and validate a TOML document.  Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let config: SkyConfig = toml::from_str(contents).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// Config file path: `$NIGHT_SKY_CONFIG` if set, else [`CONFIG_PATH`].
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_PATH.to_string())
}

/// Seed from `$NIGHT_SKY_SEED`, if set and a valid `u64`.
pub fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!("{SEED_ENV}={raw:?} is not a u64; ignoring");
            None
        }
    }
}

/// Read the config file, falling back to compiled defaults when the file is
/// absent or rejected.  `$NIGHT_SKY_SEED` overrides any seed in the file.
pub fn read_sky_config() -> SkyConfig {
    let path = config_path();
    let mut config = match std::fs::read_to_string(&path) {
        Ok(contents) => match SkyConfig::from_toml(&contents) {
            Ok(loaded) => {
                info!("Loaded sky config from {path}");
                loaded
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
                SkyConfig::default()
            }
        },
        // File not present: defaults are fine.
        Err(_) => {
            info!("No {path} found; using compiled defaults");
            SkyConfig::default()
        }
    };
    if let Some(seed) = seed_from_env() {
        config.seed = Some(seed);
    }
    config
}

/// Startup system: overwrite the [`SkyConfig`] resource from disk.
///
/// Runs first in `Startup` so every later startup system sees final values.
pub fn load_sky_config(mut config: ResMut<SkyConfig>) {
    *config = read_sky_config();
}

/// Startup system: apply the configured title and size to the primary window.
///
/// `window_width`/`window_height` are physical pixels, the same unit
/// `WindowResolution::new` takes in `main`.
pub fn apply_window_config(
    config: Res<SkyConfig>,
    mut windows: Query<&mut Window, With<bevy::window::PrimaryWindow>>,
) {
    for mut window in windows.iter_mut() {
        window.title = config.window_title.clone();
        window
            .resolution
            .set_physical_resolution(config.window_width, config.window_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_match_constants() {
        let config = SkyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.star_count, 150);
        assert_eq!(config.meteor_count, 5);
        assert_eq!(config.planet_count, 3);
        assert_eq!(
            config.palette().unwrap().background,
            Rgba::new(1, 16, 32, 1.0)
        );
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = SkyConfig::from_toml(
            r##"
            star_count = 400
            background_color = "#000000"
            seed = 7
            "##,
        )
        .unwrap();
        assert_eq!(config.star_count, 400);
        assert_eq!(config.background_color, "#000000");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.meteor_count, METEOR_COUNT);
        assert_eq!(config.planet_glow_blur, PLANET_GLOW_BLUR);
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SkyConfig::from_toml("").unwrap(), SkyConfig::default());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = SkyConfig::from_toml("meteor_speed_min = 20.0\nmeteor_speed_max = 5.0")
            .unwrap_err();
        assert!(err.contains("meteor_speed"), "{err}");
    }

    #[test]
    fn bad_colour_is_rejected() {
        let err = SkyConfig::from_toml("star_color = \"white\"").unwrap_err();
        assert!(err.contains("white"), "{err}");
    }

    #[test]
    fn meteor_heading_away_from_right_and_bottom_is_rejected() {
        let err = SkyConfig::from_toml("meteor_angle = 3.14159").unwrap_err();
        assert!(err.contains("meteor_angle"), "{err}");
        assert!(SkyConfig::from_toml("meteor_angle = -1.5708").is_err());
        // Straight down and up-right both still reach an edge.
        assert!(SkyConfig::from_toml("meteor_angle = 1.5708").is_ok());
        assert!(SkyConfig::from_toml("meteor_angle = -0.5").is_ok());
    }

    #[test]
    fn star_start_opacity_must_sit_inside_twinkle_bounds() {
        let err = SkyConfig::from_toml("star_opacity_start_min = 0.0\nstar_opacity_start_max = 0.1")
            .unwrap_err();
        assert!(err.contains("star_opacity_start_min"), "{err}");

        let err = SkyConfig::from_toml("star_opacity_ceiling = 0.8").unwrap_err();
        assert!(err.contains("star_opacity_start_max"), "{err}");

        let config = SkyConfig::from_toml(
            "star_opacity_floor = 0.2\nstar_opacity_start_min = 0.2\nstar_opacity_start_max = 0.6",
        )
        .unwrap();
        assert_eq!(config.star_opacity_start_min, 0.2);
    }

    #[test]
    fn negative_meteor_opacity_is_rejected() {
        let err = SkyConfig::from_toml("meteor_opacity_min = -0.5").unwrap_err();
        assert!(err.contains("meteor_opacity_min"), "{err}");
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(SkyConfig::from_toml("star_count = ").is_err());
    }
}
