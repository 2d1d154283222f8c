//! Compositing of the debug badge onto a single icon image.
use crate::font::LabelFont;
use ab_glyph::point;
use image::{Pixel, Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut},
    rect::Rect,
};

/// Pixel geometry of the badge for one icon.
///
/// Proportions are derived from the icon's width and clamped to minimums so
/// the badge stays visible on the smallest icons. The badge covers the
/// half-open rectangle `[x, x + width) x [y, y + height)`, inset from the
/// bottom-right corner by `margin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub margin: u32,
    pub font_size: u32,
}

fn proportion(value: u32, factor: f64, min: u32) -> u32 {
    ((value as f64 * factor) as u32).max(min)
}

impl BadgeGeometry {
    pub fn for_icon(size: u32) -> Self {
        BadgeGeometry::for_canvas(size, size)
    }

    pub fn for_canvas(width: u32, height: u32) -> Self {
        let badge_height = proportion(width, 0.22, 6);
        let badge_width = proportion(width, 0.42, 12);
        let radius = proportion(badge_height, 0.28, 2);
        let margin = proportion(width, 0.04, 1);
        let font_size = proportion(badge_height, 0.65, 8);
        BadgeGeometry {
            x: width as i32 - margin as i32 - badge_width as i32,
            y: height as i32 - margin as i32 - badge_height as i32,
            width: badge_width,
            height: badge_height,
            radius,
            margin,
            font_size,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Label text and colours of the badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    pub label: String,
    pub fill: Rgba<u8>,
    pub text: Rgba<u8>,
}

impl BadgeStyle {
    pub fn with_label(label: impl Into<String>) -> Self {
        BadgeStyle {
            label: label.into(),
            ..BadgeStyle::default()
        }
    }
}

impl Default for BadgeStyle {
    fn default() -> Self {
        BadgeStyle {
            label: "DEV".to_owned(),
            fill: Rgba([220, 38, 38, 230]),
            text: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Returns a copy of `icon` with the badge blended onto its bottom-right
/// corner. The result has the same dimensions as `icon`.
pub fn add_badge(icon: &RgbaImage, style: &BadgeStyle, font: &LabelFont) -> RgbaImage {
    let geometry = BadgeGeometry::for_canvas(icon.width(), icon.height());
    tracing::debug!(?geometry, "badge geometry for {}x{}", icon.width(), icon.height());

    let overlay = render_overlay(icon.width(), icon.height(), &geometry, style, font);
    let mut badged = icon.clone();
    composite(&mut badged, &overlay);
    badged
}

fn render_overlay(
    width: u32,
    height: u32,
    geometry: &BadgeGeometry,
    style: &BadgeStyle,
    font: &LabelFont,
) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    draw_rounded_rect(&mut overlay, geometry, style.fill);

    let px = geometry.font_size as f32;
    let Some(bounds) = font.text_bounds(&style.label, px) else {
        return overlay;
    };
    // centre the ink box, not the baseline
    let origin = point(
        geometry.x as f32 + (geometry.width as f32 - bounds.width()) / 2.0 - bounds.min.x,
        geometry.y as f32 + (geometry.height as f32 - bounds.height()) / 2.0 - bounds.min.y,
    );
    font.draw_text(&style.label, px, origin, |x, y, coverage| {
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }
        let pixel = overlay.get_pixel_mut(x as u32, y as u32);
        // clip to the badge body
        if pixel[3] == 0 {
            return;
        }
        let mut ink = style.text;
        ink[3] = (ink[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        if ink[3] > 0 {
            pixel.blend(&ink);
        }
    });
    overlay
}

fn draw_rounded_rect(canvas: &mut RgbaImage, geometry: &BadgeGeometry, color: Rgba<u8>) {
    let (x, y, w, h) = (geometry.x, geometry.y, geometry.width, geometry.height);
    let r = geometry.radius.min(w / 2).min(h / 2);
    let ri = r as i32;

    if w > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x + ri, y).of_size(w - 2 * r, h), color);
    }
    if h > 2 * r {
        draw_filled_rect_mut(canvas, Rect::at(x, y + ri).of_size(w, h - 2 * r), color);
    }
    let (left, top) = (x + ri, y + ri);
    let (right, bottom) = (geometry.right() - 1 - ri, geometry.bottom() - 1 - ri);
    for center in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        draw_filled_circle_mut(canvas, center, ri, color);
    }
}

/// Straight-alpha "over" of `overlay` onto `base`. Fully transparent overlay
/// pixels leave the base untouched.
fn composite(base: &mut RgbaImage, overlay: &RgbaImage) {
    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        if src[3] != 0 {
            dst.blend(src);
        }
    }
}
