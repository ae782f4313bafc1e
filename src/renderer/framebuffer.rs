//! RGBA framebuffer with the handful of primitives the scene needs
//!
//! Coordinates are signed so callers can draw effects that spill past the
//! surface edge; every primitive clips instead of failing.

use glam::Vec2;

use super::font;

/// RGBA color, 8 bits per channel.
pub type Color = [u8; 4];

/// A clippable pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PxRect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// An owned RGBA pixel surface.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Re-allocate for a new surface size. Contents become undefined until
    /// the next clear.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.resize(width as usize * height as usize * 4, 0);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&color);
        }
    }

    /// Blend one pixel over the existing content. `alpha` applies to `color`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let Some(i) = self.index(x, y) else { return };
        if alpha == 255 {
            self.data[i..i + 4].copy_from_slice(&color);
            return;
        }
        let a = alpha as u32;
        let inv = 255 - a;
        for c in 0..3 {
            let base = self.data[i + c] as u32;
            self.data[i + c] = ((base * inv + color[c] as u32 * a + 127) / 255) as u8;
        }
        self.data[i + 3] = 255;
    }

    fn clip(&self, rect: PxRect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(rect.w as i32).min(self.width as i32);
        let y1 = rect.y.saturating_add(rect.h as i32).min(self.height as i32);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    pub fn fill_rect(&mut self, rect: PxRect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        let row_bytes = (x1 - x0) as usize * 4;
        for y in y0..y1 {
            let start = (y as usize * self.width as usize + x0 as usize) * 4;
            for px in self.data[start..start + row_bytes].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    pub fn blend_rect(&mut self, rect: PxRect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, alpha);
            }
        }
    }

    /// Filled circle, alpha-blended.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color, alpha: u8) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i32;
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.blend_pixel(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// Circle outline, roughly 2px wide.
    pub fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Color, alpha: u8) {
        if radius <= 0.0 {
            return;
        }
        let r = (radius + 1.5).ceil() as i32;
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                let d = ((dx * dx + dy * dy) as f32).sqrt();
                if (d - radius).abs() <= 1.0 {
                    self.blend_pixel(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// Block-font text, top-left anchored.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1) as i32;
        let mut cursor = x;
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (row, bits) in rows.into_iter().enumerate() {
                    for col in 0..font::GLYPH_W {
                        if bits & (1 << (font::GLYPH_W - 1 - col)) == 0 {
                            continue;
                        }
                        self.fill_rect(
                            PxRect::new(
                                cursor + col as i32 * scale,
                                y + row as i32 * scale,
                                scale as u32,
                                scale as u32,
                            ),
                            color,
                        );
                    }
                }
            }
            cursor += font::advance(scale as u32) as i32;
        }
    }

    /// Text centered on `cx`, with a one-pixel drop shadow for contrast.
    pub fn draw_text_centered(&mut self, cx: i32, y: i32, text: &str, color: Color, scale: u32) {
        let w = font::measure(text, scale) as i32;
        let x = cx - w / 2;
        self.draw_text(x + 1, y + 1, text, [0x20, 0x12, 0x0a, 0xff], scale);
        self.draw_text(x, y, text, color, scale);
    }
}
