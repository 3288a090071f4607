//! Drawing module
//!
//! The game never talks to a window directly. Frames are drawn through the
//! `Surface` trait, which a platform backend implements with its own polygon,
//! image and text primitives. `RecordingSurface` keeps the calls in memory
//! for headless runs and tests.

pub mod frame;
pub mod shapes;

pub use frame::draw_frame;

use glam::Vec2;

use crate::sim::texture::{Image, Rgba};

/// Colors for game elements
pub mod colors {
    use crate::sim::texture::Rgba;

    pub const BACKGROUND: Rgba = Rgba::new(0, 0, 0, 255);
    pub const SHIP: Rgba = Rgba::new(255, 255, 255, 255);
    pub const SHOT: Rgba = Rgba::new(255, 255, 255, 255);
    pub const HUD_TEXT: Rgba = Rgba::new(255, 255, 255, 255);
    pub const OVERLAY: Rgba = Rgba::new(0, 0, 0, 128);
    pub const POPUP: Rgba = Rgba::new(50, 50, 50, 255);
    pub const POPUP_BORDER: Rgba = Rgba::new(255, 255, 255, 255);
}

/// Drawing primitives a rendering backend provides
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);
    /// Closed polygon outline
    fn draw_polygon(&mut self, points: &[Vec2], color: Rgba, width: f32);
    /// Filled polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    /// Copy an image with its centre at `center`
    fn blit(&mut self, image: &Image, center: Vec2);
    /// Text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Polygon {
        points: Vec<Vec2>,
        color: Rgba,
        width: f32,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    Blit {
        center: Vec2,
        width: u32,
        height: u32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
    },
}

/// Surface that stores draw calls instead of producing pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Frames started (one per `clear`)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn since the last clear
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of image blits since the last clear
    pub fn blit_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Blit { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn blit(&mut self, image: &Image, center: Vec2) {
        self.commands.push(DrawCommand::Blit {
            center,
            width: image.width(),
            height: image.height(),
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, _color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
        });
    }
}
