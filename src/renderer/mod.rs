//! Rendering module
//!
//! The simulation draws into an in-memory [`Canvas`] through the [`Surface`]
//! primitives; a presenter thread copies finished frames to the terminal.

pub mod canvas;
pub mod scene;
pub mod surface;
pub mod terminal;

pub use canvas::Canvas;
pub use scene::draw_frame;
pub use surface::{Color, Surface};
pub use terminal::{SharedCanvas, TerminalPresenter};
