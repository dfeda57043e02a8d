use std::path::Path;

use bevy::math::Vec2;
use bevy::prelude::Resource;
use image::{Rgba as Pixel, RgbaImage};

use crate::error::Result;
use crate::surface::{Glow, Rgba, Surface};

/// A software surface backed by an RGBA image. Used for headless
/// snapshots.
///
/// Shapes are blended straight-alpha over whatever is already there; halos
/// fall off linearly over the blur distance.
#[derive(Resource)]
pub struct RasterSurface {
    image: RgbaImage,
    background: Pixel<u8>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> RasterSurface {
        let [r, g, b] = background;
        let background = Pixel([r, g, b, 255]);
        RasterSurface {
            image: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Blend `coverage` over every pixel in the `min..max` box. `coverage`
    /// maps a pixel centre to the paint for that pixel, if any.
    fn shade(&mut self, min: Vec2, max: Vec2, coverage: impl Fn(Vec2) -> Option<Rgba>) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        if max.x < 0.0 || max.y < 0.0 || min.x > width as f32 || min.y > height as f32 {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil() as u32).min(width - 1);
        let y1 = (max.y.ceil() as u32).min(height - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(paint) = coverage(center) {
                    blend(self.image.get_pixel_mut(x, y), paint);
                }
            }
        }
    }
}

fn blend(pixel: &mut Pixel<u8>, paint: Rgba) {
    let alpha = paint.alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    for (channel, source) in pixel.0.iter_mut().zip(paint.rgb) {
        let mixed = source as f32 * alpha + *channel as f32 * (1.0 - alpha);
        *channel = mixed.round() as u8;
    }
}

/// Paint for a point `distance` from a shape whose body extends to `edge`.
fn body_or_glow(distance: f32, edge: f32, body: Rgba, glow: &Glow) -> Option<Rgba> {
    if distance <= edge {
        Some(body)
    } else if glow.blur > 0.0 && distance < edge + glow.blur {
        let falloff = 1.0 - (distance - edge) / glow.blur;
        Some(Rgba::new(glow.color.rgb, glow.color.alpha * body.alpha * falloff))
    } else {
        None
    }
}

fn distance_to_segment(point: Vec2, from: Vec2, to: Vec2) -> f32 {
    let segment = to - from;
    let length_sq = segment.length_squared();
    if length_sq == 0.0 {
        return point.distance(from);
    }
    let t = ((point - from).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(from + segment * t)
}

impl Surface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::from_pixel(width, height, self.background);
        }
    }

    fn clear(&mut self) {
        let background = self.background;
        self.image.pixels_mut().for_each(|pixel| *pixel = background);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba, glow: Glow) {
        let reach = Vec2::splat(radius + glow.blur.max(0.0));
        self.shade(center - reach, center + reach, |point| {
            body_or_glow(point.distance(center), radius, fill, &glow)
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Rgba, glow: Glow) {
        let half_width = width / 2.0;
        let reach = Vec2::splat(half_width + glow.blur.max(0.0));
        self.shade(from.min(to) - reach, from.max(to) + reach, |point| {
            body_or_glow(distance_to_segment(point, from, to), half_width, stroke, &glow)
        });
    }
}
