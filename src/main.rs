use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use particle_field::{FieldSettings, ParticleFieldPlugin, SnapshotJob, SnapshotPlugin};

mod args;

use args::ARGS;

fn main() -> AppExit {
    let (width, height) = match ARGS.window_size() {
        Ok(size) => size,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    if let Some(path) = &ARGS.snapshot {
        return App::new()
            .add_plugins((
                MinimalPlugins,
                LogPlugin::default(),
                SnapshotPlugin {
                    job: SnapshotJob {
                        path: path.clone(),
                        frames: ARGS.frames,
                    },
                    width,
                    height,
                    settings: FieldSettings::default(),
                    seed: ARGS.seed,
                },
            ))
            .run();
    }

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Particle Field".into(),
                    resolution: WindowResolution::new(width, height),
                    ..default()
                }),
                ..default()
            }),
            ParticleFieldPlugin::new(FieldSettings::default(), ARGS.seed),
        ))
        .insert_resource(ClearColor(Color::srgb_u8(12, 10, 24)))
        .run()
}
