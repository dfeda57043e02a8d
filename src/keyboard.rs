use std::collections::HashMap;
use std::time::{Duration, Instant};

use bevy::app::AppExit;
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::field::ParticleField;

/// Defines a keyboard command to associate with a keypress.
/// Each command can have a different repeat rate.
pub struct KeyboardCommand {
    pub description: String,
    pub last_action_time: Instant,
    pub interval: Duration,
    pub action: KeyboardAction,
}

/// The function that invokes the keyboard action.
type KeyboardAction = fn(field: &mut ParticleField);

/// Contains the collection of keyboard commands.
#[derive(Resource)]
pub struct KeyboardCommands {
    pub commands: HashMap<KeyCode, KeyboardCommand>,
}

impl KeyboardCommands {
    pub fn create() -> Self {
        let mut kb_cmds = KeyboardCommands {
            commands: HashMap::new(),
        };

        // R: throw away every particle and spawn a fresh batch.
        kb_cmds.add_command(KeyCode::KeyR, "Respawn particles", 250, respawn);
        // L: log the field state.
        kb_cmds.add_command(KeyCode::KeyL, "Log field state", 250, |field| info!("{field:?}"));

        kb_cmds
    }

    pub fn add_command(&mut self, key: KeyCode, description: &str, interval_millis: u64, action: KeyboardAction) {
        self.commands.insert(
            key,
            KeyboardCommand {
                description: description.into(),
                last_action_time: Instant::now(),
                interval: Duration::from_millis(interval_millis),
                action,
            },
        );
    }

    pub fn help(&self) -> String {
        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by(|(_, a), (_, b)| a.description.cmp(&b.description));

        let mut kb_help: String = "Keyboard commands:\nEscape/Q - Quit".into();
        for (key, cmd) in entries {
            kb_help.push('\n');
            kb_help.push_str(&format!("{key:?} - {}", cmd.description));
        }
        kb_help
    }
}

fn respawn(field: &mut ParticleField) {
    let bounds = field.bounds();
    field.initialize(bounds.x, bounds.y);
}

pub fn handle_keypress(
    kb: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
    mut field: ResMut<ParticleField>,
    mut kb_cmds: ResMut<KeyboardCommands>,
) {
    // Esc / Q: stop the field and quit the app
    if kb.just_pressed(KeyCode::Escape) || kb.just_pressed(KeyCode::KeyQ) {
        field.teardown();
        app_exit.write(AppExit::Success);
        return;
    }

    // ?: display help
    if kb.just_pressed(KeyCode::Slash) && (kb.pressed(KeyCode::ShiftLeft) || kb.pressed(KeyCode::ShiftRight)) {
        info!("{}", kb_cmds.help());
    }

    let now = Instant::now();
    for key in kb.get_pressed() {
        if let Some(command) = kb_cmds.commands.get_mut(key) {
            if now.duration_since(command.last_action_time) >= command.interval {
                command.last_action_time = now;
                (command.action)(&mut *field);
            }
        }
    }
}
