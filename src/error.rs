//! Night-sky error types.
//!
//! Startup systems propagate errors through these types; Bevy's error handler
//! treats a failed startup system as fatal.  Config problems are reported and
//! the compiled defaults are kept instead.
//!
//! ## Usage
//!
//! ```rust
//! use night_sky::error::{validate_range, SkyResult};
//!
//! fn check() -> SkyResult<()> {
//!     validate_range("star_radius", 0.5, 2.0)?;
//!     Ok(())
//! }
//! # check().unwrap();
//! ```

use std::fmt;

/// Top-level error enum for the night-sky renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SkyError {
    /// No drawing surface could be created because the primary window is
    /// missing.  The renderer cannot run without it.
    MissingSurface,

    /// A colour string could not be parsed as `#rrggbb`.
    InvalidColor {
        /// The rejected input.
        value: String,
    },

    /// A random sampling range is empty or inverted.
    InvalidRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A tunable value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SkyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyError::MissingSurface => {
                write!(f, "no primary window: the night sky has no surface to draw on")
            }
            SkyError::InvalidColor { value } => {
                write!(f, "invalid colour '{}': expected #rrggbb", value)
            }
            SkyError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is empty: min {} must be below max {}",
                name, min, max
            ),
            SkyError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SkyError {}

/// Convenience alias: a `Result` using `SkyError` as the error type.
pub type SkyResult<T> = Result<T, SkyError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `min < max` and both are finite.
///
/// `rand` panics on empty ranges, so every configured range passes through here.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> SkyResult<()> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(SkyError::InvalidRange { name, min, max })
    }
}

/// Returns an error if `value` is not an opacity in `[0.0, 1.0]`.
pub fn validate_opacity(name: &'static str, value: f32) -> SkyResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SkyError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Returns an error if `value` is negative or not finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> SkyResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SkyError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `lo <= value <= hi`.
///
/// Used for values that must sit inside another configured interval; the
/// bounds are validated separately.
pub fn validate_within(
    name: &'static str,
    value: f32,
    lo: f32,
    hi: f32,
    safe_range: &'static str,
) -> SkyResult<()> {
    if value.is_finite() && lo <= value && value <= hi {
        Ok(())
    } else {
        Err(SkyError::UnsafeConstant {
            name,
            value,
            safe_range,
        })
    }
}

/// Returns an error unless a heading (radians, y down) moves right or down.
///
/// Particles moving along the heading are recycled once they leave past the
/// right or bottom edge, so a heading with neither component never recycles.
pub fn validate_heading(name: &'static str, angle: f32) -> SkyResult<()> {
    if angle.is_finite() && (angle.cos() > 0.0 || angle.sin() > 0.0) {
        Ok(())
    } else {
        Err(SkyError::UnsafeConstant {
            name,
            value: angle,
            safe_range: "a heading with a rightward or downward component",
        })
    }
}
