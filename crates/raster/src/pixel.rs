//! Software [`Surface`] over an RGBA8 pixel buffer.
//!
//! Strokes are rasterized by distance to each path segment: a pixel whose
//! center lies within half the line width of a segment is covered, with half
//! a pixel of linear falloff at the edge. Coverage from all segments of one
//! stroke is merged (max) before blending, so overlapping segments and
//! repeated points do not darken the line. With `LineCap::Round` joins and
//! caps come out round. With `LineCap::Butt` (the default) each segment is
//! cut flush at its endpoints. Zero-length segments add nothing, so a
//! one-point path is invisible.

use flowfield_core::color::{Rgba8, Srgb};
use flowfield_core::error::EngineError;
use flowfield_core::surface::{LineCap, Surface};

/// Line width, cap and stroke style, the state `save`/`restore` push and pop.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokeState {
    line_width: f64,
    line_cap: LineCap,
    style: Rgba8,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_cap: LineCap::Butt,
            style: Rgba8::WHITE,
        }
    }
}

/// A transparent RGBA8 canvas that implements [`Surface`].
///
/// Pixels are stored row-major, four bytes each, not premultiplied.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    state: StrokeState,
    saved: Vec<StrokeState>,
    path: Vec<Vec<(f64, f64)>>,
    coverage: Vec<f32>,
    touched: Vec<usize>,
}

impl PixelSurface {
    /// Creates a fully transparent surface.
    ///
    /// Returns `EngineError::InvalidDimensions` if either side is zero or the
    /// buffer size overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let invalid = EngineError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or(invalid)?;
        let bytes = len
            .checked_mul(4)
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; bytes],
            state: StrokeState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            coverage: vec![0.0; len],
            touched: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 buffer, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgba8 {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        })
    }

    /// Current line width.
    pub fn line_width(&self) -> f64 {
        self.state.line_width
    }

    /// Current stroke style.
    pub fn stroke_style(&self) -> Rgba8 {
        self.state.style
    }

    /// Current line cap.
    pub fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    /// Flattens the surface over an opaque background into an RGBA8 buffer
    /// whose alpha is always 255.
    pub fn composite_over(&self, background: Srgb) -> Vec<u8> {
        let bg = background.to_rgba8();
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as f64 / 255.0;
                let mix = |c: u8, b: u8| (c as f64 * a + b as f64 * (1.0 - a)).round() as u8;
                [mix(px[0], bg.r), mix(px[1], bg.g), mix(px[2], bg.b), 255u8]
            })
            .collect()
    }

    /// Accumulates coverage of the segment `a`-`b` with half-width `hw`.
    fn cover_segment(&mut self, a: (f64, f64), b: (f64, f64), hw: f64, cap: LineCap) {
        let reach = hw + 0.5;
        let min_x = a.0.min(b.0) - reach;
        let max_x = a.0.max(b.0) + reach;
        let min_y = a.1.min(b.1) - reach;
        let max_y = a.1.max(b.1) + reach;
        let (w, h) = (self.width as f64, self.height as f64);
        if max_x < 0.0 || max_y < 0.0 || min_x >= w || min_y >= h {
            return;
        }
        let x0 = min_x.floor().max(0.0) as usize;
        let y0 = min_y.floor().max(0.0) as usize;
        let x1 = (max_x.ceil() as usize).min(self.width - 1);
        let y1 = (max_y.ceil() as usize).min(self.height - 1);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let center = (px as f64 + 0.5, py as f64 + 0.5);
                let cov = match cap {
                    LineCap::Round => (reach - distance_to_segment(center, a, b)).clamp(0.0, 1.0),
                    LineCap::Butt => butt_coverage(center, a, b, reach),
                } as f32;
                if cov <= 0.0 {
                    continue;
                }
                let idx = py * self.width + px;
                if self.coverage[idx] == 0.0 {
                    self.touched.push(idx);
                }
                self.coverage[idx] = self.coverage[idx].max(cov);
            }
        }
    }

    /// Blends the accumulated coverage with the stroke style and resets it.
    fn flush_coverage(&mut self) {
        let style = self.state.style;
        let src_alpha = style.a as f64 / 255.0;
        for &idx in &self.touched {
            let sa = src_alpha * self.coverage[idx] as f64;
            self.coverage[idx] = 0.0;
            let i = idx * 4;
            let da = self.pixels[i + 3] as f64 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            if out_a <= 0.0 {
                continue;
            }
            let blend = |s: u8, d: u8| {
                ((s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a).round() as u8
            };
            self.pixels[i] = blend(style.r, self.pixels[i]);
            self.pixels[i + 1] = blend(style.g, self.pixels[i + 1]);
            self.pixels[i + 2] = blend(style.b, self.pixels[i + 2]);
            self.pixels[i + 3] = (out_a * 255.0).round() as u8;
        }
        self.touched.clear();
    }
}

impl Surface for PixelSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (w, h) = (self.width as f64, self.height as f64);
        let x0 = x.max(0.0).min(w).floor() as usize;
        let y0 = y.max(0.0).min(h).floor() as usize;
        let x1 = (x + width).max(0.0).min(w).ceil() as usize;
        let y1 = (y + height).max(0.0).min(h).ceil() as usize;
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for row in y0..y1 {
            let start = (row * self.width + x0) * 4;
            let end = (row * self.width + x1) * 4;
            self.pixels[start..end].fill(0);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_stroke_style(&mut self, color: &str) {
        match Rgba8::from_hex(color) {
            Ok(style) => self.state.style = style,
            Err(e) => log::warn!("ignoring stroke style '{color}': {e}"),
        }
    }

    fn stroke(&mut self) {
        let hw = self.state.line_width / 2.0;
        let cap = self.state.line_cap;
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for pair in subpath.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a != b {
                    self.cover_segment(a, b, hw, cap);
                }
            }
        }
        self.path = path;
        self.flush_coverage();
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}

/// Euclidean distance from `p` to the segment `a`-`b` (`a != b`).
fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let t = ((apx * abx + apy * aby) / (abx * abx + aby * aby)).clamp(0.0, 1.0);
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}

/// Coverage of `p` by the flush-ended band around segment `a`-`b` (`a != b`).
///
/// `reach` is half the line width plus the half-pixel falloff. Across the
/// line the falloff matches the round case; along it the band ends at the
/// endpoints with the same half-pixel ramp.
fn butt_coverage(p: (f64, f64), a: (f64, f64), b: (f64, f64), reach: f64) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len = (abx * abx + aby * aby).sqrt();
    let along = (apx * abx + apy * aby) / len;
    let across = (apx * aby - apy * abx).abs() / len;
    // Negative once `p` projects past either endpoint.
    let inside = along.min(len - along);
    (reach - across).clamp(0.0, 1.0) * (0.5 + inside).clamp(0.0, 1.0)
}
