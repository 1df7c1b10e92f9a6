//! Drawing surface abstraction
//!
//! Pixel coordinates, origin top-left, y increasing downward. Angles are in
//! degrees, 0 pointing right and positive turning counter-clockwise.

use bytemuck::{Pod, Zeroable};

/// An opaque RGB colour, laid out as three bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
}

/// Primitive drawing operations the game needs from its display
pub trait Surface {
    /// Surface size in pixels `(width, height)`
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    /// Fill the ellipse inscribed in the given box
    fn fill_oval(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    /// Fill a pie slice of the inscribed ellipse.
    ///
    /// `sweep` may be negative (clockwise); a sweep of 360 or more fills the oval.
    fn fill_arc(&mut self, x: i32, y: i32, w: i32, h: i32, start: i32, sweep: i32, color: Color);

    /// Draw text with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}
