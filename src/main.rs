use bevy::prelude::*;
use bevy::window::WindowResolution;
use night_sky::config::SkyConfig;
use night_sky::constants::{BACKGROUND_COLOR, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use night_sky::render::NightSkyPlugin;
use night_sky::surface::Rgba;

fn main() {
    // Replaced by the configured background on the first frame.
    let clear = Rgba::from_hex(BACKGROUND_COLOR).unwrap_or(Rgba::new(0, 0, 0, 1.0));

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(clear.r, clear.g, clear.b)))
        // Compiled defaults; load_sky_config overwrites them from
        // assets/sky.toml (if present) at the start of Startup.
        .insert_resource(SkyConfig::default())
        .add_plugins(NightSkyPlugin)
        .run();
}
