//! Procedural rendering of the 1024x1024 master app icon.
//!
//! The icon is built in ordered compositing passes on an RGB canvas:
//! a diagonal gradient backdrop, six satellite "person" badge circles
//! arranged around the center (each with a soft drop shadow), and a
//! central white circle carrying a checkmark glyph. Rendering is a pure
//! function of an [`IconStyle`]; persistence is the caller's job.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::f32::consts::PI;
use std::str::FromStr;

/// A satellite badge: fill color plus its angle on the orbit circle.
///
/// Angles are in degrees with -90 at 12 o'clock; successive satellites
/// sit 60 degrees apart going clockwise.
#[derive(Debug, Clone, Copy)]
pub struct Satellite {
    pub color: Rgb<u8>,
    pub angle_deg: f32,
}

/// Soft drop-shadow parameters for a badge circle.
///
/// The shadow is approximated by `blur` stacked rings of decreasing
/// radius and increasing alpha rather than a true Gaussian blur; ring
/// `i` (counted from `blur` down to 1) has radius `r + i/2` and alpha
/// `max_alpha * (1 - i/blur)`.
#[derive(Debug, Clone, Copy)]
pub struct ShadowStyle {
    pub offset_y: f32,
    pub blur: u32,
    pub max_alpha: u8,
}

/// Every geometric and color constant the rasterizer consumes.
///
/// `IconStyle::default()` is the shipped icon; tests substitute smaller
/// canvases or different palettes without touching the drawing code.
#[derive(Debug, Clone)]
pub struct IconStyle {
    /// Canvas edge length in pixels (the canvas is square).
    pub size: u32,
    /// Gradient runs from this color at the top-left corner...
    pub gradient_start: Rgb<u8>,
    /// ...to this color at the bottom-right corner.
    pub gradient_end: Rgb<u8>,
    /// Flat fill for the person silhouettes and the center circle.
    pub glyph_color: Rgb<u8>,
    /// Stroke color of the center checkmark.
    pub check_color: Rgb<u8>,
    /// Radius of each satellite badge circle.
    pub satellite_radius: f32,
    /// Distance from the canvas center to each satellite center.
    pub orbit_radius: f32,
    /// Radius of the central checkmark circle.
    pub center_radius: f32,
    /// Stroke width of the checkmark.
    pub check_stroke: f32,
    pub satellite_shadow: ShadowStyle,
    pub center_shadow: ShadowStyle,
    pub satellites: Vec<Satellite>,
}

impl Default for IconStyle {
    fn default() -> Self {
        IconStyle {
            size: 1024,
            gradient_start: rgb_from_hex("#4CAF50"),
            gradient_end: rgb_from_hex("#2196F3"),
            glyph_color: Rgb([255, 255, 255]),
            check_color: rgb_from_hex("#4CAF50"),
            satellite_radius: 70.0,
            orbit_radius: 320.0,
            center_radius: 100.0,
            check_stroke: 18.0,
            satellite_shadow: ShadowStyle {
                offset_y: 6.0,
                blur: 20,
                max_alpha: 64,
            },
            center_shadow: ShadowStyle {
                offset_y: 10.0,
                blur: 30,
                max_alpha: 77,
            },
            satellites: vec![
                Satellite { color: rgb_from_hex("#FF9800"), angle_deg: -90.0 }, // 12 o'clock
                Satellite { color: rgb_from_hex("#9C27B0"), angle_deg: -30.0 }, // 2 o'clock
                Satellite { color: rgb_from_hex("#FFE66D"), angle_deg: 30.0 },  // 4 o'clock
                Satellite { color: rgb_from_hex("#FF6B6B"), angle_deg: 90.0 },  // 6 o'clock
                Satellite { color: rgb_from_hex("#4ECDC4"), angle_deg: 150.0 }, // 8 o'clock
                Satellite { color: rgb_from_hex("#95E1D3"), angle_deg: 210.0 }, // 10 o'clock
            ],
        }
    }
}

/// Parse a CSS hex color string into an RGB triple.
///
/// Falls back to white on malformed input.
pub fn rgb_from_hex(hex: &str) -> Rgb<u8> {
    css_color::Srgb::from_str(hex)
        .map(|color| {
            Rgb([
                (color.red * 255.) as u8,
                (color.green * 255.) as u8,
                (color.blue * 255.) as u8,
            ])
        })
        .unwrap_or(Rgb([255, 255, 255]))
}

/// Center of the satellite at `angle_deg` on the orbit circle.
pub fn satellite_center(style: &IconStyle, angle_deg: f32) -> (f32, f32) {
    let half = style.size as f32 / 2.0;
    let rad = angle_deg * PI / 180.0;
    (half + style.orbit_radius * rad.cos(), half + style.orbit_radius * rad.sin())
}

/// Render the full master icon.
///
/// Compositing order: gradient backdrop, all satellite shadows on one
/// overlay composited at once, then the opaque satellite badges and
/// their silhouettes, then the center shadow, circle, and checkmark.
pub fn render_master(style: &IconStyle) -> RgbImage {
    let size = style.size;
    let half = size as f32 / 2.0;

    let mut canvas = fill_gradient(size, style.gradient_start, style.gradient_end);

    // Shadows for all six satellites accumulate on a single transparent
    // overlay and hit the canvas before any badge is drawn, so a badge
    // never sits under its neighbor's shadow.
    let mut shadow_layer = RgbaImage::new(size, size);
    for satellite in &style.satellites {
        let (x, y) = satellite_center(style, satellite.angle_deg);
        draw_shadow(&mut shadow_layer, x, y, style.satellite_radius, style.satellite_shadow);
    }
    composite_over(&mut canvas, &shadow_layer);

    for satellite in &style.satellites {
        let (x, y) = satellite_center(style, satellite.angle_deg);
        fill_circle(&mut canvas, x, y, style.satellite_radius, satellite.color);
        draw_person(&mut canvas, x, y, style.satellite_radius, style.glyph_color);
    }

    let mut center_shadow = RgbaImage::new(size, size);
    draw_shadow(&mut center_shadow, half, half, style.center_radius, style.center_shadow);
    composite_over(&mut canvas, &center_shadow);

    fill_circle(&mut canvas, half, half, style.center_radius, style.glyph_color);
    draw_checkmark(&mut canvas, half, half, style);

    canvas
}

/// Fill a square canvas with a 135-degree diagonal gradient.
///
/// Blend factor `t = (x + y) / 2S` runs over [0, 1) so pixel (0,0) is
/// exactly the start color and the far corner approaches the end color.
pub fn fill_gradient(size: u32, start: Rgb<u8>, end: Rgb<u8>) -> RgbImage {
    let span = (2 * size) as f32;
    RgbImage::from_fn(size, size, |x, y| {
        let t = (x + y) as f32 / span;
        Rgb([
            lerp_channel(start[0], end[0], t),
            lerp_channel(start[1], end[1], t),
            lerp_channel(start[2], end[2], t),
        ])
    })
}

fn lerp_channel(start: u8, end: u8, t: f32) -> u8 {
    (start as f32 * (1.0 - t) + end as f32 * t).round() as u8
}

/// Stack decreasing-alpha rings onto `layer` to fake a blurred shadow.
///
/// Rings are written innermost-last so the highest alpha wins near the
/// circle center; each ring overwrites, it does not blend.
fn draw_shadow(layer: &mut RgbaImage, cx: f32, cy: f32, radius: f32, shadow: ShadowStyle) {
    for i in (1..=shadow.blur).rev() {
        let alpha =
            (shadow.max_alpha as f32 * (1.0 - i as f32 / shadow.blur as f32)) as u8;
        stamp_circle(
            layer,
            cx,
            cy + shadow.offset_y,
            radius + i as f32 / 2.0,
            Rgba([0, 0, 0, alpha]),
        );
    }
}

/// Overwrite every pixel inside the circle with `color` (no blending,
/// no edge anti-aliasing). Used only for the shadow overlay.
fn stamp_circle(layer: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (width, height) = layer.dimensions();
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil() as u32).min(width.saturating_sub(1));
    let y1 = ((cy + radius).ceil() as u32).min(height.saturating_sub(1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                layer.put_pixel(x, y, color);
            }
        }
    }
}

/// Alpha-composite a straight-alpha RGBA overlay onto the RGB canvas.
fn composite_over(canvas: &mut RgbImage, overlay: &RgbaImage) {
    for (x, y, pixel) in overlay.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        let dst = canvas.get_pixel_mut(x, y);
        for channel in 0..3 {
            dst[channel] = (pixel[channel] as f32 * alpha
                + dst[channel] as f32 * (1.0 - alpha))
                .round() as u8;
        }
    }
}

/// Draw an opaque filled circle with a one-pixel anti-aliased rim.
fn fill_circle(canvas: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let x0 = (cx - radius - 1.0).floor().max(0.0) as u32;
    let y0 = (cy - radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((cx + radius + 1.0).ceil() as u32).min(width.saturating_sub(1));
    let y1 = ((cy + radius + 1.0).ceil() as u32).min(height.saturating_sub(1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance <= radius - 1.0 {
                canvas.put_pixel(x, y, color);
            } else if distance <= radius {
                // Anti-aliasing edge
                let coverage = radius - distance;
                blend_pixel(canvas, x, y, color, coverage);
            }
        }
    }
}

fn blend_pixel(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>, coverage: f32) {
    let dst = canvas.get_pixel_mut(x, y);
    for channel in 0..3 {
        dst[channel] = (color[channel] as f32 * coverage
            + dst[channel] as f32 * (1.0 - coverage))
            .round() as u8;
    }
}

/// Draw the person silhouette inside a satellite badge: a head circle
/// above a shoulder trapezoid whose four corners are rounded with small
/// filled circles. Proportions follow the shipped 70 px badge.
fn draw_person(canvas: &mut RgbImage, cx: f32, cy: f32, badge_radius: f32, color: Rgb<u8>) {
    let scale = badge_radius / 70.0;

    let head_radius = 17.5 * scale;
    let head_cy = cy - badge_radius * 0.25;
    fill_circle(canvas, cx, head_cy, head_radius, color);

    // Small gap below the head, then shoulders widening toward the bottom.
    let body_top_y = head_cy + head_radius + 3.0 * scale;
    let body_height = 45.0 * scale;
    let top_half_width = 22.5 * scale;
    let bottom_half_width = 32.5 * scale;
    fill_trapezoid(
        canvas,
        cx,
        body_top_y,
        body_height,
        top_half_width,
        bottom_half_width,
        color,
    );

    let corner_radius = 8.0 * scale;
    let corners = [
        (cx - top_half_width, body_top_y),
        (cx + top_half_width, body_top_y),
        (cx - bottom_half_width, body_top_y + body_height),
        (cx + bottom_half_width, body_top_y + body_height),
    ];
    for (x, y) in corners {
        fill_circle(canvas, x, y, corner_radius, color);
    }
}

/// Fill a trapezoid with horizontal top and bottom edges, scanline by
/// scanline, interpolating the half-width between top and bottom.
fn fill_trapezoid(
    canvas: &mut RgbImage,
    cx: f32,
    top_y: f32,
    height: f32,
    top_half_width: f32,
    bottom_half_width: f32,
    color: Rgb<u8>,
) {
    let (width, canvas_height) = canvas.dimensions();
    let y0 = top_y.round().max(0.0) as u32;
    let y1 = ((top_y + height).round() as u32).min(canvas_height.saturating_sub(1));

    for y in y0..=y1 {
        let t = ((y as f32 - top_y) / height).clamp(0.0, 1.0);
        let half_width = top_half_width + (bottom_half_width - top_half_width) * t;
        let x0 = (cx - half_width).round().max(0.0) as u32;
        let x1 = ((cx + half_width).round() as u32).min(width.saturating_sub(1));
        for x in x0..=x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Draw the center checkmark: a short down stroke meeting a long up
/// stroke, both with round caps so the joint reads as rounded.
fn draw_checkmark(canvas: &mut RgbImage, cx: f32, cy: f32, style: &IconStyle) {
    // Checkmark bounding box is proportioned to the center circle.
    let check_width = style.center_radius * 1.2;
    let check_height = style.center_radius;

    let start = (cx - check_width * 0.4, cy);
    let middle = (cx - check_width * 0.1, cy + check_height * 0.3);
    let end = (cx + check_width * 0.4, cy - check_height * 0.3);

    stroke_segment(canvas, start, middle, style.check_stroke, style.check_color);
    stroke_segment(canvas, middle, end, style.check_stroke, style.check_color);
}

/// Stroke a single line segment with round caps, by distance test over
/// the segment's bounding box with a one-pixel anti-aliased rim.
fn stroke_segment(
    canvas: &mut RgbImage,
    a: (f32, f32),
    b: (f32, f32),
    stroke_width: f32,
    color: Rgb<u8>,
) {
    let radius = stroke_width / 2.0;
    let (width, height) = canvas.dimensions();
    let x0 = (a.0.min(b.0) - radius - 1.0).floor().max(0.0) as u32;
    let y0 = (a.1.min(b.1) - radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((a.0.max(b.0) + radius + 1.0).ceil() as u32).min(width.saturating_sub(1));
    let y1 = ((a.1.max(b.1) + radius + 1.0).ceil() as u32).min(height.saturating_sub(1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            let distance = segment_distance(x as f32, y as f32, a, b);
            if distance <= radius - 0.5 {
                canvas.put_pixel(x, y, color);
            } else if distance <= radius + 0.5 {
                blend_pixel(canvas, x, y, color, radius + 0.5 - distance);
            }
        }
    }
}

/// Distance from point (px, py) to the segment a-b.
fn segment_distance(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((px - a.0) * dx + (py - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let nearest_x = a.0 + t * dx;
    let nearest_y = a.1 + t * dy;
    ((px - nearest_x).powi(2) + (py - nearest_y).powi(2)).sqrt()
}
