//! Draw-primitive contract
//!
//! Once per tick, including the waiting/paused/game-over overlays, each game
//! produces a full frame as a flat list of primitives. The surface that
//! consumes them performs no simulation logic.

/// Packed 0xRRGGBB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);
    pub const BLUE: Color = Color(0x0000FF);
    pub const CYAN: Color = Color(0x00FFFF);
    pub const MAGENTA: Color = Color(0xFF00FF);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const ORANGE: Color = Color(0xFF8800);
    pub const GRAY: Color = Color(0x333333);
}

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A single draw primitive. Coordinates are pixels in the game's own
/// field space; the surface scales as it sees fit.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
        color: Color,
        align: Align,
    },
}

impl DrawCmd {
    pub fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        DrawCmd::Rect { x, y, w, h, color }
    }

    pub fn circle(x: f32, y: f32, radius: f32, color: Color) -> Self {
        DrawCmd::Circle { x, y, radius, color }
    }

    pub fn text(x: f32, y: f32, size: f32, text: impl Into<String>, color: Color) -> Self {
        DrawCmd::Text {
            x,
            y,
            size,
            text: text.into(),
            color,
            align: Align::Center,
        }
    }

    pub fn text_aligned(
        x: f32,
        y: f32,
        size: f32,
        text: impl Into<String>,
        color: Color,
        align: Align,
    ) -> Self {
        DrawCmd::Text {
            x,
            y,
            size,
            text: text.into(),
            color,
            align,
        }
    }
}
