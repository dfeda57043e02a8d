use std::fmt::{Debug, Formatter};
use std::ops::Range;

/// Tuning knobs for the particle field.
///
/// The defaults reproduce the background used on the portfolio page: a handful
/// of large violet orbs that fade out over roughly eight seconds at 60 fps.
#[derive(Clone, PartialEq)]
pub struct FieldSettings {
    /// Surface area (in square units) that earns one particle.
    pub area_per_particle: f32,
    pub min_particles: usize,

    pub size: Range<f32>,
    pub speed: Range<f32>,
    pub opacity: Range<f32>,
    /// Opacity lost per tick.
    pub decay: f32,
    /// Particles at or below this opacity respawn.
    pub opacity_floor: f32,

    // Drawing:
    pub color: [u8; 3],
    pub fill_alpha_boost: f32,
    pub glow_factor: f32,
    pub glow_max: f32,
    pub glow_alpha: f32,

    // Connections between nearby particles:
    pub link_distance: f32,
    pub link_alpha: f32,
    pub link_width: f32,
    pub link_glow_factor: f32,
    pub link_glow_max: f32,
    pub link_glow_alpha: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        FieldSettings {
            area_per_particle: 600_000.0,
            min_particles: 4,
            size: 30.0..110.0,
            speed: -0.9..0.9,
            opacity: 0.75..1.0,
            decay: 0.0015,
            opacity_floor: 0.02,
            color: [139, 92, 246],
            fill_alpha_boost: 1.15,
            glow_factor: 2.5,
            glow_max: 180.0,
            glow_alpha: 0.7,
            link_distance: 420.0,
            link_alpha: 0.3,
            link_width: 2.0,
            link_glow_factor: 0.6,
            link_glow_max: 120.0,
            link_glow_alpha: 0.6,
        }
    }
}

impl FieldSettings {
    /// Number of particles for a surface of the given size.
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        let by_area = (width * height / self.area_per_particle).floor();
        // Negative or NaN areas saturate to zero.
        (by_area as usize).max(self.min_particles)
    }
}

impl Debug for FieldSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "FieldSettings:")?;
        writeln!(f, "    area_per_particle: {}", self.area_per_particle)?;
        writeln!(f, "    min_particles: {}", self.min_particles)?;
        writeln!(f, "    size: {:?}", self.size)?;
        writeln!(f, "    speed: {:?}", self.speed)?;
        writeln!(f, "    opacity: {:?}", self.opacity)?;
        writeln!(f, "    decay: {} (floor {})", self.decay, self.opacity_floor)?;
        writeln!(f, "    link_distance: {}", self.link_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_scales_with_area() {
        let settings = FieldSettings::default();
        assert_eq!(settings.particle_count(800.0, 600.0), 4);
        assert_eq!(settings.particle_count(2000.0, 1500.0), 5);
        assert_eq!(settings.particle_count(4000.0, 3000.0), 20);
    }

    #[test]
    fn particle_count_never_drops_below_minimum() {
        let settings = FieldSettings::default();
        assert_eq!(settings.particle_count(0.0, 0.0), 4);
        assert_eq!(settings.particle_count(-10.0, 50.0), 4);
    }
}
