use std::fmt::{Debug, Formatter};

use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::particle::Particle;
use crate::settings::FieldSettings;
use crate::surface::{Glow, Rgba, Surface};

/// Lifecycle of a field. There is no way back from `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Running,
    Stopped,
}

/// A line between two particles close enough to be linked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
    pub glow_blur: f32,
}

/// The animated background: a set of drifting, fading orbs plus the lines
/// between neighbours.
///
/// The field owns the current surface bounds and hands them to each
/// particle's update, so resizes are visible from the next tick on.
#[derive(Resource)]
pub struct ParticleField {
    settings: FieldSettings,
    bounds: Vec2,
    particles: Vec<Particle>,
    state: FieldState,
    rng: StdRng,
    frame_count: u64,
}

impl ParticleField {
    /// An empty, running field. Call [`ParticleField::initialize`] once the
    /// surface size is known.
    pub fn new(settings: FieldSettings, seed: Option<u64>) -> ParticleField {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        ParticleField {
            settings,
            bounds: Vec2::ZERO,
            particles: Vec::new(),
            state: FieldState::Running,
            rng,
            frame_count: 0,
        }
    }

    /// New field, sized and populated.
    pub fn mount(width: f32, height: f32, settings: FieldSettings, seed: Option<u64>) -> ParticleField {
        let mut field = ParticleField::new(settings, seed);
        field.initialize(width, height);
        field
    }

    /// Size the field and replace its particles with a fresh batch. Safe to
    /// call repeatedly; particles are never accumulated. Ignored once the
    /// field is stopped.
    pub fn initialize(&mut self, width: f32, height: f32) {
        if !self.is_running() {
            return;
        }
        self.bounds = Vec2::new(width, height);
        let count = self.settings.particle_count(width, height);
        let Self {
            particles,
            rng,
            settings,
            bounds,
            ..
        } = self;
        particles.clear();
        particles.extend((0..count).map(|_| Particle::spawn(rng, *bounds, settings)));
        info!("Spawned {count} particles for a {width}x{height} surface");
    }

    /// Track a new surface size. Particles stay where they are; any that
    /// end up outside wrap back in on later ticks.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if !self.is_running() {
            return;
        }
        let bounds = Vec2::new(width, height);
        if bounds != self.bounds {
            debug!("Field resized to {width}x{height}");
            self.bounds = bounds;
        }
    }

    /// One display frame: clear, tick, then draw connections. Without a
    /// surface the particles still move but nothing is drawn.
    pub fn frame(&mut self, surface: Option<&mut dyn Surface>) {
        if !self.is_running() {
            return;
        }
        match surface {
            Some(surface) => {
                surface.clear();
                self.tick(Some(&mut *surface));
                self.draw_connections(surface);
            }
            None => self.tick(None),
        }
        self.frame_count += 1;
    }

    /// Move, draw and (if faded) respawn every particle.
    pub fn tick(&mut self, mut surface: Option<&mut dyn Surface>) {
        if !self.is_running() {
            return;
        }
        let Self {
            particles,
            rng,
            settings,
            bounds,
            ..
        } = self;
        for particle in particles.iter_mut() {
            particle.update(*bounds, settings);

            if let Some(surface) = surface.as_deref_mut() {
                surface.fill_circle(
                    particle.position,
                    particle.size,
                    Rgba::new(settings.color, particle.fill_alpha(settings)),
                    Glow {
                        blur: particle.glow_blur(settings),
                        color: Rgba::new(settings.color, settings.glow_alpha),
                    },
                );
            }

            if particle.is_faded(settings) {
                particle.reset(rng, *bounds, settings);
            }
        }
    }

    /// Draw a line between every pair of particles closer than the link
    /// distance.
    pub fn draw_connections(&self, surface: &mut dyn Surface) {
        if !self.is_running() {
            return;
        }
        let glow_color = Rgba::new(self.settings.color, self.settings.link_glow_alpha);
        for link in self.connections() {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                self.settings.link_width,
                Rgba::new(self.settings.color, link.alpha),
                Glow {
                    blur: link.glow_blur,
                    color: glow_color,
                },
            );
        }
    }

    /// Links between nearby particles, each unordered pair at most once.
    pub fn connections(&self) -> impl Iterator<Item = Link> + '_ {
        let particles = &self.particles;
        let settings = &self.settings;
        (0..particles.len()).flat_map(move |a| {
            (a + 1..particles.len()).filter_map(move |b| {
                let (pa, pb) = (&particles[a], &particles[b]);
                let distance = pa.position.distance(pb.position);
                (distance < settings.link_distance).then(|| Link {
                    a,
                    b,
                    distance,
                    alpha: settings.link_alpha * (1.0 - distance / settings.link_distance),
                    glow_blur: ((pa.size + pb.size) * settings.link_glow_factor).min(settings.link_glow_max),
                })
            })
        })
    }

    /// Stop for good. Returns `false` if the field was already stopped.
    pub fn teardown(&mut self) -> bool {
        if self.state == FieldState::Stopped {
            return false;
        }
        self.state = FieldState::Stopped;
        self.particles = Vec::new();
        info!("Particle field stopped after {} frames", self.frame_count);
        true
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Debug for ParticleField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ParticleField:")?;
        writeln!(f, "    state: {:?}", self.state)?;
        writeln!(f, "    bounds: {}", self.bounds)?;
        writeln!(f, "    particles: {}", self.particles.len())?;
        writeln!(f, "    frame_count: {}", self.frame_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_particle(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            size: 40.0,
            opacity: 0.9,
        }
    }

    fn field_with(particles: &[Particle]) -> ParticleField {
        let mut field = ParticleField::mount(2000.0, 1500.0, FieldSettings::default(), Some(3));
        field.particles = particles.to_vec();
        field
    }

    #[test]
    fn mount_spawns_area_based_count() {
        let small = ParticleField::mount(800.0, 600.0, FieldSettings::default(), Some(1));
        assert_eq!(small.particles().len(), 4);
        let large = ParticleField::mount(2000.0, 1500.0, FieldSettings::default(), Some(1));
        assert_eq!(large.particles().len(), 5);
        assert_eq!(large.state(), FieldState::Running);
    }

    #[test]
    fn initialize_replaces_instead_of_appending() {
        let mut field = ParticleField::mount(2000.0, 1500.0, FieldSettings::default(), Some(1));
        field.initialize(2000.0, 1500.0);
        field.initialize(800.0, 600.0);
        assert_eq!(field.particles().len(), 4);
        assert_eq!(field.bounds(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn same_seed_same_particles() {
        let a = ParticleField::mount(1280.0, 800.0, FieldSettings::default(), Some(42));
        let b = ParticleField::mount(1280.0, 800.0, FieldSettings::default(), Some(42));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn connections_skip_self_and_duplicate_pairs() {
        let field = field_with(&[
            still_particle(100.0, 100.0),
            still_particle(200.0, 100.0),
            still_particle(300.0, 100.0),
        ]);
        let pairs: Vec<_> = field.connections().map(|link| (link.a, link.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn connection_alpha_fades_with_distance() {
        let field = field_with(&[still_particle(100.0, 100.0), still_particle(519.0, 100.0)]);
        let links: Vec<_> = field.connections().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].distance, 419.0);
        assert!((links[0].alpha - 0.3 * (1.0 / 420.0)).abs() < 1e-6);
        assert!((links[0].glow_blur - 48.0).abs() < 1e-4);
    }

    #[test]
    fn no_connection_at_link_distance() {
        let field = field_with(&[still_particle(100.0, 100.0), still_particle(520.0, 100.0)]);
        assert_eq!(field.connections().count(), 0);
        let far = field_with(&[still_particle(0.0, 0.0), still_particle(900.0, 900.0)]);
        assert_eq!(far.connections().count(), 0);
    }

    #[test]
    fn link_glow_is_capped() {
        let mut big = still_particle(0.0, 0.0);
        big.size = 109.0;
        let mut other = big;
        other.position.x = 10.0;
        let field = field_with(&[big, other]);
        let link = field.connections().next().unwrap();
        assert_eq!(link.glow_blur, 120.0);
    }

    #[test]
    fn frame_without_surface_still_animates() {
        let mut moving = still_particle(100.0, 100.0);
        moving.velocity = Vec2::new(0.5, -0.25);
        let mut field = field_with(&[moving]);
        field.frame(None);
        assert_eq!(field.particles()[0].position, Vec2::new(100.5, 99.75));
        assert_eq!(field.frame_count(), 1);
    }

    #[test]
    fn resize_only_moves_bounds() {
        let mut field = ParticleField::mount(1280.0, 800.0, FieldSettings::default(), Some(9));
        let before = field.particles().to_vec();
        field.on_resize(300.0, 200.0);
        field.on_resize(300.0, 200.0);
        assert_eq!(field.bounds(), Vec2::new(300.0, 200.0));
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn teardown_is_terminal() {
        let mut field = ParticleField::mount(1280.0, 800.0, FieldSettings::default(), Some(9));
        assert!(field.teardown());
        assert!(!field.teardown());
        field.on_resize(10.0, 10.0);
        field.frame(None);
        assert_eq!(field.state(), FieldState::Stopped);
        assert_eq!(field.bounds(), Vec2::new(1280.0, 800.0));
        assert_eq!(field.frame_count(), 0);
    }

    #[test]
    fn initialize_after_teardown_spawns_nothing() {
        let mut field = ParticleField::mount(1280.0, 800.0, FieldSettings::default(), Some(9));
        field.teardown();
        field.initialize(4000.0, 3000.0);
        assert!(field.particles().is_empty());
        assert_eq!(field.state(), FieldState::Stopped);
        assert_eq!(field.bounds(), Vec2::new(1280.0, 800.0));
    }
}
