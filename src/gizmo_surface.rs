use bevy::prelude::*;

use crate::surface::{Glow, Rgba, Surface};

/// Spacing between the concentric rings that fill a disc.
const FILL_STEP: f32 = 1.5;
/// Spacing between halo rings.
const GLOW_STEP: f32 = 3.0;
/// Parallel strokes on each side of a line used to fake its glow.
const MAX_LINE_GLOW_STROKES: u32 = 6;

/// Draws the field with Bevy's immediate-mode gizmos.
///
/// Gizmos only draw outlines, so discs are filled with tightly packed rings
/// and glows are rings (or parallel strokes) fading out with distance.
/// Gizmos are cleared by Bevy every frame.
pub struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    height: f32,
}

impl<'a, 'w, 's> GizmoSurface<'a, 'w, 's> {
    /// A surface with zero height; [`Surface::resize`] it to the field
    /// bounds before drawing.
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>) -> Self {
        GizmoSurface { gizmos, height: 0.0 }
    }

    fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, self.height - point.y)
    }
}

fn to_color(paint: Rgba) -> Color {
    let [r, g, b] = paint.rgb;
    Color::srgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        paint.alpha.clamp(0.0, 1.0),
    )
}

/// Alpha of a halo sample `offset` units past the edge.
fn glow_alpha(glow: &Glow, offset: f32) -> f32 {
    if glow.blur <= 0.0 {
        return 0.0;
    }
    glow.color.alpha * (1.0 - offset / glow.blur).max(0.0)
}

impl Surface for GizmoSurface<'_, '_, '_> {
    // Bevy resizes the window itself; only the y flip depends on the size.
    fn resize(&mut self, _width: u32, height: u32) {
        self.height = height as f32;
    }

    fn clear(&mut self) {}

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba, glow: Glow) {
        let center = self.to_world(center);

        // Halo first so the disc sits on top of it. Each ring is faint;
        // together they build up the falloff.
        let rings = (glow.blur / GLOW_STEP).ceil() as u32;
        for i in 1..=rings {
            let offset = i as f32 * GLOW_STEP;
            let alpha = glow_alpha(&glow, offset) * fill.alpha / rings as f32 * 4.0;
            self.gizmos
                .circle_2d(center, radius + offset, to_color(Rgba::new(glow.color.rgb, alpha)));
        }

        let color = to_color(fill);
        let mut r = radius;
        while r > 0.0 {
            self.gizmos.circle_2d(center, r, color);
            r -= FILL_STEP;
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, stroke: Rgba, glow: Glow) {
        let (from, to) = (self.to_world(from), self.to_world(to));

        let normal = (to - from).perp().normalize_or_zero();
        let strokes = ((glow.blur / GLOW_STEP).ceil() as u32).min(MAX_LINE_GLOW_STROKES);
        for i in 1..=strokes {
            let offset = i as f32 * GLOW_STEP;
            // Scale the halo by the stroke so faint lines get faint glows.
            let alpha = glow_alpha(&glow, offset) * stroke.alpha;
            let color = to_color(Rgba::new(glow.color.rgb, alpha));
            self.gizmos.line_2d(from + normal * offset, to + normal * offset, color);
            self.gizmos.line_2d(from - normal * offset, to - normal * offset, color);
        }

        // Line width comes from the gizmo config, set at startup.
        self.gizmos.line_2d(from, to, to_color(stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_fades_linearly_to_zero() {
        let glow = Glow {
            blur: 10.0,
            color: Rgba::new([0, 0, 0], 0.6),
        };
        assert!((glow_alpha(&glow, 0.0) - 0.6).abs() < 1e-6);
        assert!((glow_alpha(&glow, 5.0) - 0.3).abs() < 1e-6);
        assert_eq!(glow_alpha(&glow, 10.0), 0.0);
        assert_eq!(glow_alpha(&glow, 20.0), 0.0);
    }

    #[test]
    fn zero_blur_has_no_glow() {
        let glow = Glow {
            blur: 0.0,
            color: Rgba::new([0, 0, 0], 0.6),
        };
        assert_eq!(glow_alpha(&glow, 0.0), 0.0);
    }
}
