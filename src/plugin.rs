use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::error::FieldError;
use crate::field::ParticleField;
use crate::gizmo_surface::GizmoSurface;
use crate::keyboard::{handle_keypress, KeyboardCommands};
use crate::settings::FieldSettings;
use crate::surface::Surface;

/// Marks the camera looking at the field.
#[derive(Component)]
pub struct FieldCamera;

/// Full-window animated particle background.
///
/// The animation and resize systems only run while the field is running, so
/// tearing the field down also unhooks them from the schedule.
pub struct ParticleFieldPlugin {
    pub settings: FieldSettings,
    pub seed: Option<u64>,
}

impl ParticleFieldPlugin {
    pub fn new(settings: FieldSettings, seed: Option<u64>) -> Self {
        ParticleFieldPlugin { settings, seed }
    }
}

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ParticleField::new(self.settings.clone(), self.seed))
            .insert_resource(KeyboardCommands::create())
            .add_systems(Startup, (configure_gizmos, mount_field))
            .add_systems(
                Update,
                (follow_window_resize, animate_field, handle_keypress)
                    .chain()
                    .run_if(field_running),
            )
            .add_systems(Last, teardown_on_exit);
    }
}

pub fn field_running(field: Option<Res<ParticleField>>) -> bool {
    field.is_some_and(|field| field.is_running())
}

fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>, field: Res<ParticleField>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = field.settings().link_width;
}

fn mount_field(
    mut commands: Commands,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut field: ResMut<ParticleField>,
) {
    let (width, height) = match window_query.single() {
        Ok(window) => (window.width(), window.height()),
        Err(_) => {
            warn!("{}; animating without drawing", FieldError::SurfaceUnavailable);
            (0.0, 0.0)
        }
    };

    commands.spawn((
        Camera2d,
        Transform::from_xyz(width / 2.0, height / 2.0, 0.0),
        FieldCamera,
    ));

    field.initialize(width, height);
    info!("{:?}", *field);
}

fn follow_window_resize(
    mut resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut camera: Query<&mut Transform, With<FieldCamera>>,
    mut field: ResMut<ParticleField>,
) {
    for event in resized.read() {
        if primary.get(event.window).is_err() {
            continue;
        }
        field.on_resize(event.width, event.height);
        for mut transform in &mut camera {
            transform.translation.x = event.width / 2.0;
            transform.translation.y = event.height / 2.0;
        }
    }
}

fn animate_field(
    mut gizmos: Gizmos,
    window_query: Query<(), With<PrimaryWindow>>,
    mut field: ResMut<ParticleField>,
    mut warned: Local<bool>,
) {
    if window_query.single().is_err() {
        if !*warned {
            warn!("{}; skipping draw calls", FieldError::SurfaceUnavailable);
            *warned = true;
        }
        field.frame(None);
        return;
    }

    // Gizmo surfaces live for one frame, so each one is sized to the
    // field's current bounds.
    let bounds = field.bounds();
    let mut surface = GizmoSurface::new(&mut gizmos);
    surface.resize(bounds.x as u32, bounds.y as u32);
    field.frame(Some(&mut surface as &mut dyn Surface));
}

fn teardown_on_exit(mut exits: MessageReader<AppExit>, field: Option<ResMut<ParticleField>>) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(mut field) = field {
        field.teardown();
    }
}
