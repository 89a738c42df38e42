//! Bevy host for the night sky: surface creation, resize handling, the
//! per-frame step, and turning each frame into meshes and gizmo lines.
//!
//! ## Design
//!
//! [`NightSky::step`] paints into a [`SkyFrame`], which records shapes.  The
//! draw systems then mirror that recording onto the GPU:
//!
//! - Stars, planets and planet halos are a pool of [`SkyDisc`] entities, each
//!   a `Mesh2d` of the shared unit disc with its own `ColorMaterial`.  Slot
//!   `i` shows layer `i` of [`SkyFrame::disc_layers`]; its `Transform` and
//!   material colour are rewritten every frame.  The pool grows or shrinks
//!   to match the layer count.
//! - Meteors are `Gizmos::line_2d` segments.
//! - The background fill becomes the `ClearColor`.
//!
//! | System                      | Schedule | Purpose                                       |
//! |-----------------------------|----------|-----------------------------------------------|
//! | `load_sky_config`           | Startup  | Read `assets/sky.toml` into [`SkyConfig`]      |
//! | `apply_window_config`       | Startup  | Title and size of the primary window           |
//! | `setup_camera`              | Startup  | 2D camera                                      |
//! | `configure_meteor_gizmos`   | Startup  | Gizmo line width from `meteor_line_width`      |
//! | `setup_sky_meshes`          | Startup  | Shared unit-disc mesh                          |
//! | `setup_sky_surface`         | Startup  | [`SkyFrame`] sized to the window; fatal if none |
//! | `init_night_sky`            | Startup  | Populate [`NightSky`]                          |
//! | `resize_surface_system`     | Update   | Follow `WindowResized` for the primary window  |
//! | `night_sky_frame_system`    | Update   | Step the sky into the frame                    |
//! | `sync_sky_discs_system`     | Update   | Frame discs → mesh entities                    |
//! | `sync_background_system`    | Update   | Frame background → `ClearColor`                |
//! | `draw_meteor_trails_system` | Update   | Frame segments → gizmo lines                   |

use crate::config::{apply_window_config, load_sky_config, SkyConfig};
use crate::constants::DISC_MESH_SIDES;
use crate::error::SkyError;
use crate::frame::{DiscLayer, SkyFrame};
use crate::graphics::{setup_camera, unit_disc_mesh};
use crate::sky::NightSky;
use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

// ── Resources / components ───────────────────────────────────────────────────

/// Mesh shared by every [`SkyDisc`].
#[derive(Resource)]
pub struct SkyMeshes {
    pub disc: Handle<Mesh>,
}

/// Pooled disc entity showing layer `slot` of the current frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyDisc {
    pub slot: usize,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct NightSkyPlugin;

impl Plugin for NightSkyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkyConfig>()
            .add_systems(
                Startup,
                (
                    load_sky_config,
                    apply_window_config,
                    setup_camera,
                    configure_meteor_gizmos,
                    setup_sky_meshes,
                    setup_sky_surface,
                    init_night_sky,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    resize_surface_system,
                    night_sky_frame_system,
                    (
                        sync_sky_discs_system,
                        sync_background_system,
                        draw_meteor_trails_system,
                    ),
                )
                    .chain(),
            );
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Frame size for a window: its logical size in whole pixels.
fn window_pixels(width: f32, height: f32) -> (u32, u32) {
    (width.round().max(1.0) as u32, height.round().max(1.0) as u32)
}

fn layer_transform(layer: &DiscLayer) -> Transform {
    Transform::from_translation(layer.translation)
        .with_scale(Vec3::new(layer.radius, layer.radius, 1.0))
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Meteor trails are the only gizmos drawn, so the default group carries
/// their width.
pub fn configure_meteor_gizmos(config: Res<SkyConfig>, mut store: ResMut<GizmoConfigStore>) {
    let (gizmos, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    gizmos.line.width = config.meteor_line_width;
}

pub fn setup_sky_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let disc = meshes.add(unit_disc_mesh(DISC_MESH_SIDES));
    commands.insert_resource(SkyMeshes { disc });
}

/// Create the [`SkyFrame`] at the primary window's size.
///
/// Without a window there is nothing to draw on, so this fails with
/// [`SkyError::MissingSurface`].
pub fn setup_sky_surface(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
) -> Result {
    let window = windows.single().map_err(|_| SkyError::MissingSurface)?;
    let (width, height) = window_pixels(window.width(), window.height());

    commands.insert_resource(SkyFrame::new(width, height));
    info!("Sky surface created at {width}x{height}");
    Ok(())
}

/// Build the [`NightSky`] from the loaded config and populate it.
pub fn init_night_sky(
    mut commands: Commands,
    config: Res<SkyConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) -> Result {
    let window = windows.single().map_err(|_| SkyError::MissingSurface)?;
    let (width, height) = window_pixels(window.width(), window.height());

    let mut sky = NightSky::new(config.clone())?;
    sky.init(width as f32, height as f32);
    commands.insert_resource(sky);
    Ok(())
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Track primary-window resizes.  Only the latest size in a frame matters.
pub fn resize_surface_system(
    mut resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    frame: Option<ResMut<SkyFrame>>,
) {
    let primary = primary.single().ok();
    let latest = resized
        .read()
        .filter(|e| primary.is_none_or(|p| p == e.window))
        .last();
    let (Some(latest), Some(mut frame)) = (latest, frame) else {
        return;
    };

    let (width, height) = window_pixels(latest.width, latest.height);
    if frame.size() == (width, height) {
        return;
    }
    frame.resize(width, height);
    debug!("Sky surface resized to {width}x{height}");
}

/// The frame step: advance and paint every particle.
pub fn night_sky_frame_system(sky: Option<ResMut<NightSky>>, frame: Option<ResMut<SkyFrame>>) {
    let (Some(mut sky), Some(mut frame)) = (sky, frame) else {
        return;
    };
    sky.step(&mut *frame);
}

/// Mirror the frame's disc layers onto the [`SkyDisc`] pool.
///
/// Slots are contiguous from 0: surplus entities are despawned from the top,
/// missing ones are spawned with a fresh material.
pub fn sync_sky_discs_system(
    mut commands: Commands,
    frame: Option<Res<SkyFrame>>,
    meshes: Option<Res<SkyMeshes>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut discs: Query<(Entity, &SkyDisc, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let (Some(frame), Some(meshes)) = (frame, meshes) else {
        return;
    };
    let layers = frame.disc_layers();

    let mut live = 0;
    for (entity, disc, mut transform, material) in discs.iter_mut() {
        let Some(layer) = layers.get(disc.slot) else {
            commands.entity(entity).despawn();
            continue;
        };
        *transform = layer_transform(layer);
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = layer.color.into();
        }
        live += 1;
    }

    for (slot, layer) in layers.iter().enumerate().skip(live) {
        let material = materials.add(ColorMaterial::from_color(Color::from(layer.color)));
        commands.spawn((
            Mesh2d(meshes.disc.clone()),
            MeshMaterial2d(material),
            layer_transform(layer),
            SkyDisc { slot },
        ));
    }
}

pub fn sync_background_system(frame: Option<Res<SkyFrame>>, mut clear: ResMut<ClearColor>) {
    let Some(background) = frame.and_then(|f| f.background()) else {
        return;
    };
    let color = Color::from(background);
    if clear.0 != color {
        clear.0 = color;
    }
}

pub fn draw_meteor_trails_system(mut gizmos: Gizmos, frame: Option<Res<SkyFrame>>) {
    let Some(frame) = frame else {
        return;
    };
    for segment in frame.segments() {
        gizmos.line_2d(
            frame.to_world(segment.from),
            frame.to_world(segment.to),
            segment.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Rgba, Surface};

    #[test]
    fn window_pixels_rounds_and_clamps() {
        assert_eq!(window_pixels(800.4, 599.6), (800, 600));
        assert_eq!(window_pixels(0.0, -3.0), (1, 1));
    }

    #[test]
    fn layer_transform_scales_unit_disc_to_radius() {
        let mut frame = SkyFrame::new(200, 100);
        frame.set_fill_color(Rgba::WHITE);
        frame.fill_circle(150.0, 25.0, 4.0);

        let transform = layer_transform(&frame.disc_layers()[0]);
        assert_eq!(transform.translation, Vec3::new(50.0, 25.0, 0.0));
        assert_eq!(transform.scale, Vec3::new(4.0, 4.0, 1.0));
    }
}
