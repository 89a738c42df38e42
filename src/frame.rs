//! The per-frame display list the sky paints into.
//!
//! ## Design
//!
//! [`SkyFrame`] implements [`Surface`] by recording shapes instead of
//! rasterising them.  The render systems then turn the recording into Bevy
//! primitives:
//!
//! | Recorded            | Shown as                                            |
//! |---------------------|-----------------------------------------------------|
//! | full-surface fill   | `ClearColor`                                        |
//! | filled circle       | `Mesh2d` disc with its own `ColorMaterial`          |
//! | circle with glow    | an extra, wider low-alpha disc beneath it           |
//! | stroked line        | `Gizmos::line_2d`                                   |
//!
//! A fill covering the whole surface starts a new frame: it replaces the
//! background and discards everything recorded before it.  Surface
//! coordinates are y-down from the top-left corner; [`SkyFrame::to_world`]
//! maps them into the centred, y-up space of the 2D camera.

use crate::constants::{DISC_Z_STEP, GLOW_HALO_ALPHA};
use crate::surface::{Rgba, Surface};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    global_alpha: f32,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
    shadow_color: Rgba,
    shadow_blur: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            fill: Rgba::new(0, 0, 0, 1.0),
            stroke: Rgba::new(0, 0, 0, 1.0),
            line_width: 1.0,
            shadow_color: Rgba::TRANSPARENT,
            shadow_blur: 0.0,
        }
    }
}

/// Halo recorded with a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

/// A filled circle in surface coordinates, alpha already multiplied by the
/// global alpha in effect when it was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub glow: Option<Glow>,
}

/// A stroked line in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgba,
    pub width: f32,
}

/// One mesh entity's worth of drawing: world position, scale and colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscLayer {
    pub translation: Vec3,
    pub radius: f32,
    pub color: Rgba,
}

/// Recording surface for one window.
#[derive(Resource, Debug, Clone)]
pub struct SkyFrame {
    width: u32,
    height: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    background: Option<Rgba>,
    discs: Vec<Disc>,
    segments: Vec<Segment>,
}

impl SkyFrame {
    /// Empty frame.  Zero dimensions are clamped to 1 so the sky always has a
    /// non-empty area to sample from.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            state: DrawState::default(),
            stack: Vec::new(),
            background: None,
            discs: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Change the size.  The recording is kept; the next background fill
    /// replaces it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Surface point (top-left origin, y down) to world point (centre
    /// origin, y up).
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x - self.width as f32 * 0.5,
            self.height as f32 * 0.5 - point.y,
        )
    }

    /// Flatten the recorded discs into mesh layers in draw order.  A glowing
    /// disc contributes its halo first so the disc covers it.
    pub fn disc_layers(&self) -> Vec<DiscLayer> {
        let mut layers = Vec::with_capacity(self.discs.len());
        for disc in &self.discs {
            let center = self.to_world(disc.center);
            if let Some(glow) = disc.glow {
                layers.push(DiscLayer {
                    translation: center.extend(layers.len() as f32 * DISC_Z_STEP),
                    radius: disc.radius + glow.blur,
                    color: glow.color.with_alpha(glow.color.a * GLOW_HALO_ALPHA),
                });
            }
            layers.push(DiscLayer {
                translation: center.extend(layers.len() as f32 * DISC_Z_STEP),
                radius: disc.radius,
                color: disc.color,
            });
        }
        layers
    }

    fn covers_surface(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width as f32 && y + height >= self.height as f32
    }

    fn faded(&self, color: Rgba) -> Rgba {
        color.with_alpha((color.a * self.state.global_alpha).clamp(0.0, 1.0))
    }
}

impl Surface for SkyFrame {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_shadow(&mut self, color: Rgba, blur: f32) {
        self.state.shadow_color = color;
        self.state.shadow_blur = if blur.is_finite() { blur.max(0.0) } else { 0.0 };
    }

    /// Only fills covering the whole surface are kept: they become the
    /// background and start a fresh recording.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if !self.covers_surface(x, y, width, height) {
            trace!("Partial fill_rect ignored at ({x}, {y}) {width}x{height}");
            return;
        }
        self.background = Some(self.faded(self.state.fill));
        self.discs.clear();
        self.segments.clear();
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let glow = (self.state.shadow_blur > 0.0 && self.state.shadow_color.a > 0.0).then(|| Glow {
            color: self.faded(self.state.shadow_color),
            blur: self.state.shadow_blur,
        });
        self.discs.push(Disc {
            center: Vec2::new(cx, cy),
            radius,
            color: self.faded(self.state.fill),
            glow,
        });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        self.segments.push(Segment {
            from: Vec2::new(x0, y0),
            to: Vec2::new(x1, y1),
            color: self.faded(self.state.stroke),
            width: self.state.line_width,
        });
    }
}
