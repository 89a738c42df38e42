//! Centralised night-sky constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  [`crate::config::SkyConfig::default`] mirrors every value below;
//! `assets/sky.toml` can override any subset at startup.
//!
//! Ranges are half-open (`MIN..MAX`) and sampled uniformly.  Per-frame
//! quantities (speeds, deltas) are in pixels or radians **per frame**, not per
//! second: the sky advances one step per display refresh.

// ── Population ────────────────────────────────────────────────────────────────

/// Number of twinkling stars created by `NightSky::init`.
pub const STAR_COUNT: usize = 150;

/// Number of meteors.  Meteors recycle in place, so this never changes at runtime.
pub const METEOR_COUNT: usize = 5;

/// Number of orbiting planets.
pub const PLANET_COUNT: usize = 3;

// ── Background ────────────────────────────────────────────────────────────────

/// Opaque deep-navy fill painted over the whole surface every frame.
pub const BACKGROUND_COLOR: &str = "#011020";

// ── Stars ─────────────────────────────────────────────────────────────────────

pub const STAR_COLOR: &str = "#ffffff";

/// Star disc radius range (px).
pub const STAR_RADIUS_MIN: f32 = 0.5;
pub const STAR_RADIUS_MAX: f32 = 2.0;

/// Opacity a star starts at.  Always inside the twinkle bounds below.
pub const STAR_OPACITY_START_MIN: f32 = 0.5;
pub const STAR_OPACITY_START_MAX: f32 = 1.0;

/// Twinkle bounds.  Opacity reflects off these and never leaves them.
pub const STAR_OPACITY_FLOOR: f32 = 0.3;
pub const STAR_OPACITY_CEILING: f32 = 1.0;

/// Magnitude of the per-frame opacity change.
///
/// At 0.025 a star crosses its whole twinkle range in ~28 frames (≈0.5 s at 60 Hz).
pub const STAR_TWINKLE_MIN: f32 = 0.005;
pub const STAR_TWINKLE_MAX: f32 = 0.025;

// ── Meteors ───────────────────────────────────────────────────────────────────

/// Trail length range (px).
pub const METEOR_LENGTH_MIN: f32 = 50.0;
pub const METEOR_LENGTH_MAX: f32 = 130.0;

/// Travel speed range (px/frame).
pub const METEOR_SPEED_MIN: f32 = 6.0;
pub const METEOR_SPEED_MAX: f32 = 16.0;

/// Trail opacity range.
pub const METEOR_OPACITY_MIN: f32 = 0.5;
pub const METEOR_OPACITY_MAX: f32 = 1.0;

/// Fixed travel direction: down and to the right (y grows downward).
pub const METEOR_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Stroke width of the trail (px).
pub const METEOR_LINE_WIDTH: f32 = 2.0;

pub const METEOR_COLOR: &str = "#ffffff";

// ── Planets ───────────────────────────────────────────────────────────────────

/// Rendered disc radius range (px).
pub const PLANET_RADIUS_MIN: f32 = 30.0;
pub const PLANET_RADIUS_MAX: f32 = 70.0;

/// Distance from orbit centre to the planet centre (px).
pub const PLANET_ORBIT_RADIUS_MIN: f32 = 50.0;
pub const PLANET_ORBIT_RADIUS_MAX: f32 = 150.0;

/// Angular speed range (rad/frame).  0.011 rad/frame ≈ one orbit every 9.5 s.
pub const PLANET_ANGULAR_SPEED_MIN: f32 = 0.001;
pub const PLANET_ANGULAR_SPEED_MAX: f32 = 0.011;

/// Alpha applied to every randomly coloured planet.
pub const PLANET_ALPHA: f32 = 0.8;

/// Glow halo width (px) painted in the planet's own colour.
pub const PLANET_GLOW_BLUR: f32 = 20.0;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Alpha multiplier for the halo disc drawn `blur` px wider than a glowing
/// shape.  Low enough that overlapping halos stay soft.
pub const GLOW_HALO_ALPHA: f32 = 0.3;

/// Depth step between consecutive discs so later draws sit on top.
pub const DISC_Z_STEP: f32 = 0.001;

/// Rim vertices of the shared unit-circle mesh.
pub const DISC_MESH_SIDES: u32 = 32;

// ── Window ────────────────────────────────────────────────────────────────────

pub const WINDOW_TITLE: &str = "Night Sky";
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 680;

// ── Files / environment ───────────────────────────────────────────────────────

/// Default config path, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/sky.toml";

/// Environment variable overriding [`CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "NIGHT_SKY_CONFIG";

/// Environment variable holding a `u64` RNG seed.
pub const SEED_ENV: &str = "NIGHT_SKY_SEED";
