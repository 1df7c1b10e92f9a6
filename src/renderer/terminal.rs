//! Terminal presenter
//!
//! A display-refresh thread that copies the shared canvas to the terminal.
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block glyph with separate foreground and background colours.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, anyhow};
use crossterm::{cursor, queue, style, terminal};
use parking_lot::Mutex;

use super::canvas::Canvas;
use super::surface::{Color, Surface};

/// Canvas shared between the simulation thread (writer) and the presenter (reader)
pub type SharedCanvas = Arc<Mutex<Canvas>>;

/// A downsampled copy of the canvas sized for the terminal
#[derive(Debug, Clone, PartialEq)]
pub struct CellFrame {
    /// Width in cells (one pixel per column)
    pub width: usize,
    /// Height in pixels, always even (two pixels per row)
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl CellFrame {
    fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}

/// Scale the canvas to fit `cols` x `rows` cells, keeping the aspect ratio
pub fn downsample(canvas: &Canvas, cols: u16, rows: u16) -> CellFrame {
    let (w, h) = canvas.size();
    let (w, h) = (w as usize, h as usize);
    let (cols, pixel_rows) = (usize::from(cols), usize::from(rows) * 2);
    let (width, height) = if cols * h <= pixel_rows * w {
        (cols, cols * h / w)
    } else {
        (pixel_rows * w / h, pixel_rows)
    };
    let height = height & !1;

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = ((y as f64 + 0.5) * h as f64 / height as f64) as i32;
        for x in 0..width {
            let sx = ((x as f64 + 0.5) * w as f64 / width as f64) as i32;
            pixels.push(canvas.pixel(sx, sy).unwrap_or_default());
        }
    }
    CellFrame { width, height, pixels }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Write the frame at the top-left of the terminal
pub fn render_cells(frame: &CellFrame, out: &mut impl Write) -> io::Result<()> {
    let rows = frame.height / 2;
    for row in 0..rows {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        let mut prev: Option<(Color, Color)> = None;
        for col in 0..frame.width {
            let top = frame.get(col, row * 2);
            let bot = frame.get(col, row * 2 + 1);
            if prev != Some((top, bot)) {
                queue!(
                    out,
                    style::SetForegroundColor(term_color(top)),
                    style::SetBackgroundColor(term_color(bot))
                )?;
                prev = Some((top, bot));
            }
            queue!(out, style::Print('\u{2580}'))?; // ▀
        }
        queue!(out, style::ResetColor)?;
    }
    out.flush()
}

/// Background thread repainting the terminal from the shared canvas
pub struct TerminalPresenter {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
}

impl TerminalPresenter {
    pub fn spawn(canvas: SharedCanvas, refresh: Duration) -> anyhow::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("presenter".into())
            .spawn(move || present_loop(&canvas, &flag, refresh))
            .context("failed to spawn presenter thread")?;
        Ok(Self { stop, handle: Some(handle) })
    }

    /// True once the thread has exited, normally only after a write failure
    pub fn has_exited(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the thread and surface any error it hit
    pub fn shutdown(mut self) -> anyhow::Result<()> {
        self.join()
    }

    fn join(&mut self) -> anyhow::Result<()> {
        self.stop.store(true, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("presenter thread panicked"))?,
            None => Ok(()),
        }
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            log::error!("presenter: {e:#}");
        }
    }
}

fn present_loop(canvas: &SharedCanvas, stop: &AtomicBool, refresh: Duration) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut last_size = None;
    while !stop.load(Ordering::SeqCst) {
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        if last_size != Some((cols, rows)) {
            queue!(out, terminal::Clear(terminal::ClearType::All))?;
            last_size = Some((cols, rows));
        }
        // Hold the lock only long enough to copy a complete frame
        let frame = {
            let canvas = canvas.lock();
            downsample(&canvas, cols, rows)
        };
        render_cells(&frame, &mut out).context("failed to write frame to terminal")?;
        thread::sleep(refresh);
    }
    log::debug!("presenter stopped");
    Ok(())
}
