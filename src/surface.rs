//! The drawing seam between the field and whatever renders it.

use bevy::math::Vec2;

/// A straight-alpha color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], alpha: f32) -> Rgba {
        Rgba { rgb, alpha }
    }
}

/// Soft halo drawn around a shape, like a canvas shadow blur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// How far the halo reaches past the shape's edge.
    pub blur: f32,
    pub color: Rgba,
}

/// A 2D surface with the handful of primitives the field needs.
///
/// Coordinates are in field space: origin at the top left, y down.
pub trait Surface {
    /// Match the surface to new field bounds. Existing pixels are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Wipe last frame's pixels.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba, glow: Glow);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Rgba, glow: Glow);
}
