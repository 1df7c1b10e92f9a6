//! Software framebuffer implementing [`Surface`]

use std::io::{self, Write};

use super::surface::{Color, Surface};

/// Glyph cell: 3x5 bitmap scaled up
const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;
const GLYPH_SCALE: i32 = 4;
const GLYPH_ADVANCE: i32 = (GLYPH_W + 1) * GLYPH_SCALE;

#[rustfmt::skip]
fn glyph(ch: char) -> Option<[u8; 15]> {
    let bits = match ch.to_ascii_uppercase() {
        '0' => [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        '1' => [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1],
        '2' => [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1],
        '3' => [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1],
        '4' => [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1],
        '5' => [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1],
        '6' => [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1],
        '7' => [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0],
        '8' => [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1],
        '9' => [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1],
        'A' => [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'C' => [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1],
        'E' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1],
        'O' => [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        'R' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0],
        ':' => [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0],
        '-' => [0,0,0, 0,0,0, 1,1,1, 0,0,0, 0,0,0],
        _ => return None,
    };
    Some(bits)
}

/// An in-memory RGB image
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGB bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the frame as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        out.write_all(self.as_bytes())?;
        out.flush()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Fill `[x0, x1)` on row `y`, clipped
    fn span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32);
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
    }

    /// Calls `f(px, py, nx, ny)` for each pixel of the box whose centre lies in
    /// the inscribed ellipse, with `(nx, ny)` the centre in unit-circle space
    /// (y pointing up).
    fn for_each_in_oval(&mut self, x: i32, y: i32, w: i32, h: i32, mut f: impl FnMut(&mut Self, i32, i32, f64, f64)) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rx = f64::from(w) / 2.0;
        let ry = f64::from(h) / 2.0;
        let cx = f64::from(x) + rx;
        let cy = f64::from(y) + ry;
        for py in y.max(0)..(y + h).min(self.height as i32) {
            let ny = (cy - (f64::from(py) + 0.5)) / ry;
            for px in x.max(0)..(x + w).min(self.width as i32) {
                let nx = (f64::from(px) + 0.5 - cx) / rx;
                if nx * nx + ny * ny <= 1.0 {
                    f(self, px, py, nx, ny);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        for row in y..y + h {
            self.span(row, x, x + w, color);
        }
    }

    fn fill_oval(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.for_each_in_oval(x, y, w, h, |canvas, px, py, _, _| {
            if let Some(i) = canvas.index(px, py) {
                canvas.pixels[i] = color;
            }
        });
    }

    fn fill_arc(&mut self, x: i32, y: i32, w: i32, h: i32, start: i32, sweep: i32, color: Color) {
        if sweep == 0 {
            return;
        }
        if sweep.abs() >= 360 {
            self.fill_oval(x, y, w, h, color);
            return;
        }
        // Normalise to a counter-clockwise span starting at `low`
        let (low, span) = if sweep < 0 {
            (start + sweep, -sweep)
        } else {
            (start, sweep)
        };
        let (low, span) = (f64::from(low), f64::from(span));
        self.for_each_in_oval(x, y, w, h, |canvas, px, py, nx, ny| {
            let angle = ny.atan2(nx).to_degrees();
            if (angle - low).rem_euclid(360.0) <= span {
                if let Some(i) = canvas.index(px, py) {
                    canvas.pixels[i] = color;
                }
            }
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let top = y - GLYPH_H * GLYPH_SCALE;
        for (n, ch) in text.chars().enumerate() {
            let Some(bits) = glyph(ch) else { continue };
            let left = x + n as i32 * GLYPH_ADVANCE;
            for row in 0..GLYPH_H {
                for col in 0..GLYPH_W {
                    if bits[(row * GLYPH_W + col) as usize] == 1 {
                        self.fill_rect(
                            left + col * GLYPH_SCALE,
                            top + row * GLYPH_SCALE,
                            GLYPH_SCALE,
                            GLYPH_SCALE,
                            color,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(canvas: &Canvas, color: Color) -> usize {
        canvas.pixels().iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(-5, 8, 8, 10, Color::RED);
        assert_eq!(count(&canvas, Color::RED), 3 * 2);
        assert_eq!(canvas.pixel(0, 9), Some(Color::RED));
        assert_eq!(canvas.pixel(3, 9), Some(Color::WHITE));
        assert_eq!(canvas.pixel(10, 9), None);
    }

    #[test]
    fn test_fill_oval_is_round() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_oval(10, 10, 20, 20, Color::BLACK);
        assert_eq!(canvas.pixel(20, 20), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(29, 29), Some(Color::WHITE));
        // Area close to pi * r^2
        let area = count(&canvas, Color::BLACK) as f64;
        assert!((area - std::f64::consts::PI * 100.0).abs() < 20.0, "area = {area}");
    }

    #[test]
    fn test_fill_arc_negative_sweep_covers_lower_half() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_arc(0, 0, 20, 20, 0, -180, Color::BLACK);
        assert_eq!(canvas.pixel(10, 15), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 4), Some(Color::WHITE));

        let mut upper = Canvas::new(20, 20);
        upper.fill_arc(0, 0, 20, 20, 180, -180, Color::BLACK);
        assert_eq!(upper.pixel(10, 4), Some(Color::BLACK));
        assert_eq!(upper.pixel(10, 15), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_arc_full_turn_matches_oval() {
        let mut arc = Canvas::new(16, 16);
        let mut oval = Canvas::new(16, 16);
        arc.fill_arc(2, 2, 12, 12, 45, 720, Color::RED);
        oval.fill_oval(2, 2, 12, 12, Color::RED);
        assert_eq!(arc.pixels(), oval.pixels());
    }

    #[test]
    fn test_draw_text_sits_on_baseline() {
        let mut canvas = Canvas::new(200, 40);
        canvas.draw_text("Score: 7", 4, 30, Color::BLACK);
        let inked: Vec<(i32, i32)> = (0..40)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(Color::BLACK))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(_, y)| (10..30).contains(&y)));
        assert!(inked.iter().all(|&(x, _)| x >= 4 && x < 4 + 8 * GLYPH_ADVANCE));
    }

    #[test]
    fn test_ppm_header_and_length() {
        let canvas = Canvas::new(3, 2);
        let mut out = Vec::new();
        canvas.write_ppm(&mut out).unwrap();
        let header = b"P6\n3 2\n255\n";
        assert!(out.starts_with(header));
        assert_eq!(out.len(), header.len() + 3 * 2 * 3);
    }
}
