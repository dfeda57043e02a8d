//! An ambient particle background: large glowing orbs drifting across the
//! window, fading out and respawning, linked by faint lines when close.
//!
//! The animation core ([`ParticleField`]) draws through the [`Surface`]
//! trait and doesn't know about windows. [`ParticleFieldPlugin`] runs it in
//! a Bevy app with gizmos; [`SnapshotPlugin`] runs it headless into a PNG.

pub mod error;
pub mod field;
pub mod gizmo_surface;
pub mod keyboard;
pub mod particle;
pub mod plugin;
pub mod raster;
pub mod settings;
pub mod snapshot;
pub mod surface;

pub use error::{FieldError, Result};
pub use field::{FieldState, Link, ParticleField};
pub use particle::Particle;
pub use plugin::ParticleFieldPlugin;
pub use settings::FieldSettings;
pub use snapshot::{SnapshotJob, SnapshotPlugin};
pub use surface::{Glow, Rgba, Surface};
