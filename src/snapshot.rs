//! Headless rendering: run the field for a number of frames against a
//! [`RasterSurface`] and save the last one as a PNG.

use std::path::PathBuf;

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::field::ParticleField;
use crate::raster::RasterSurface;
use crate::settings::FieldSettings;
use crate::surface::Surface;

/// Snapshot background, close to the page's dark theme.
pub const BACKGROUND: [u8; 3] = [12, 10, 24];

/// Where and when to take the snapshot.
#[derive(Resource, Clone, Debug)]
pub struct SnapshotJob {
    pub path: PathBuf,
    pub frames: u32,
}

pub struct SnapshotPlugin {
    pub job: SnapshotJob,
    pub width: u32,
    pub height: u32,
    pub settings: FieldSettings,
    pub seed: Option<u64>,
}

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        let field = ParticleField::mount(self.width as f32, self.height as f32, self.settings.clone(), self.seed);
        app.insert_resource(field)
            .insert_resource(RasterSurface::new(self.width, self.height, BACKGROUND))
            .insert_resource(self.job.clone())
            .add_systems(Update, render_snapshot);
    }
}

fn render_snapshot(
    mut field: ResMut<ParticleField>,
    mut raster: ResMut<RasterSurface>,
    job: Res<SnapshotJob>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if !field.is_running() {
        return;
    }
    let bounds = field.bounds();
    raster.resize(bounds.x as u32, bounds.y as u32);
    field.frame(Some(&mut *raster as &mut dyn Surface));
    if field.frame_count() < u64::from(job.frames.max(1)) {
        return;
    }

    match raster.save(&job.path) {
        Ok(()) => {
            info!("Wrote {} after {} frames", job.path.display(), field.frame_count());
            app_exit.write(AppExit::Success);
        }
        Err(e) => {
            error!("{e}");
            app_exit.write(AppExit::error());
        }
    }
    field.teardown();
}

#[cfg(test)]
mod tests {
    use crate::field::FieldState;

    use super::*;

    fn snapshot_app(path: PathBuf, frames: u32) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            SnapshotPlugin {
                job: SnapshotJob { path, frames },
                width: 64,
                height: 48,
                settings: FieldSettings::default(),
                seed: Some(3),
            },
        ));
        app
    }

    fn temp_png(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("particle-field-{}-{name}.png", std::process::id()))
    }

    #[test]
    fn writes_png_and_stops_after_requested_frames() {
        let path = temp_png("frames");
        let _ = std::fs::remove_file(&path);
        let mut app = snapshot_app(path.clone(), 2);

        app.update();
        assert!(!path.exists());
        assert_eq!(app.world().resource::<ParticleField>().frame_count(), 1);

        app.update();
        assert!(path.exists());
        let field = app.world().resource::<ParticleField>();
        assert_eq!(field.state(), FieldState::Stopped);
        assert_eq!(field.frame_count(), 2);

        // Further updates leave the stopped field alone.
        app.update();
        assert_eq!(app.world().resource::<ParticleField>().frame_count(), 2);

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (64, 48));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn raster_follows_field_resize() {
        let path = temp_png("resize");
        let mut app = snapshot_app(path.clone(), 10);
        app.update();
        assert_eq!(app.world().resource::<RasterSurface>().image().dimensions(), (64, 48));

        app.world_mut().resource_mut::<ParticleField>().on_resize(32.0, 16.0);
        app.update();
        assert_eq!(app.world().resource::<RasterSurface>().image().dimensions(), (32, 16));
        let _ = std::fs::remove_file(&path);
    }
}
