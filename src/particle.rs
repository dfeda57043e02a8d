use bevy::math::Vec2;
use rand::Rng;

use crate::settings::FieldSettings;

/// One glowing orb. Positions are in surface space: origin at the top left,
/// y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radius.
    pub size: f32,
    pub opacity: f32,
}

impl Particle {
    /// A fresh particle at a uniformly random spot inside `bounds`.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: Vec2, settings: &FieldSettings) -> Particle {
        let mut particle = Particle::default();
        particle.reset(rng, bounds, settings);
        particle
    }

    /// Re-randomize every attribute in place.
    pub fn reset<R: Rng>(&mut self, rng: &mut R, bounds: Vec2, settings: &FieldSettings) {
        // Scaling a unit sample keeps zero-sized bounds valid (random_range
        // panics on an empty range).
        self.position = Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y);
        self.size = rng.random_range(settings.size.clone());
        self.velocity = Vec2::new(
            rng.random_range(settings.speed.clone()),
            rng.random_range(settings.speed.clone()),
        );
        self.opacity = rng.random_range(settings.opacity.clone());
    }

    /// Advance one tick: move, wrap around the edges of `bounds`, fade.
    pub fn update(&mut self, bounds: Vec2, settings: &FieldSettings) {
        self.position += self.velocity;

        // Wrap once the whole disc has left the surface, reappearing just
        // off the opposite edge.
        if self.position.x - self.size > bounds.x {
            self.position.x = -self.size;
        } else if self.position.x + self.size < 0.0 {
            self.position.x = bounds.x + self.size;
        }
        if self.position.y - self.size > bounds.y {
            self.position.y = -self.size;
        } else if self.position.y + self.size < 0.0 {
            self.position.y = bounds.y + self.size;
        }

        self.opacity = (self.opacity - settings.decay).max(settings.opacity_floor);
    }

    pub fn is_faded(&self, settings: &FieldSettings) -> bool {
        self.opacity <= settings.opacity_floor
    }

    pub fn fill_alpha(&self, settings: &FieldSettings) -> f32 {
        (self.opacity * settings.fill_alpha_boost).min(1.0)
    }

    pub fn glow_blur(&self, settings: &FieldSettings) -> f32 {
        (self.size * settings.glow_factor).min(settings.glow_max)
    }
}
