//! Night sky renderer library
//!
//! An animated star field: twinkling stars, meteors that streak across and
//! recycle themselves, and glowing planets on circular orbits, drawn with
//! Bevy 2D meshes and gizmo lines.

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod graphics;
pub mod render;
pub mod sky;
pub mod surface;
