use serde::{Deserialize, Serialize};

pub const MIN_PEN_WIDTH: u32 = 1;
pub const MAX_PEN_WIDTH: u32 = 100;
pub const DEFAULT_PEN_WIDTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Active pen. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Color,
    pub width: u32,
}

impl Pen {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color,
            width: clamp_pen_width(width),
        }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

pub fn clamp_pen_width(width: u32) -> u32 {
    width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
    BucketFill,
    ColorPick,
}

impl ToolMode {
    pub fn is_stroke(self) -> bool {
        matches!(self, Self::Draw | Self::Erase)
    }
}

/// What a stroke or bucket fill writes: the pen color or a transparent hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintSource {
    #[default]
    Pen,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn from_points(a: (i32, i32), b: (i32, i32), pad: i32) -> Self {
        let min_x = a.0.min(b.0).saturating_sub(pad);
        let max_x = a.0.max(b.0).saturating_add(pad);
        let min_y = a.1.min(b.1).saturating_sub(pad);
        let max_y = a.1.max(b.1).saturating_add(pad);
        Self {
            x: min_x,
            y: min_y,
            width: span(min_x, max_x.saturating_add(1)),
            height: span(min_y, max_y.saturating_add(1)),
        }
    }

    pub fn full(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        })
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self
            .x
            .saturating_add(self.width)
            .max(other.x.saturating_add(other.width));
        let max_y = self
            .y
            .saturating_add(self.height)
            .max(other.y.saturating_add(other.height));
        DirtyRect {
            x: min_x,
            y: min_y,
            width: span(min_x, max_x),
            height: span(min_y, max_y),
        }
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let max_w = width.min(i32::MAX as u32) as i32;
        let max_h = height.min(i32::MAX as u32) as i32;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.x.saturating_add(self.width).clamp(0, max_w);
        let y1 = self.y.saturating_add(self.height).clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn contains(self, point: (i32, i32)) -> bool {
        point.0 >= self.x
            && point.0 < self.x.saturating_add(self.width)
            && point.1 >= self.y
            && point.1 < self.y.saturating_add(self.height)
    }
}

/// `end - start`, at least 1, saturated to `i32::MAX`.
fn span(start: i32, end: i32) -> i32 {
    let len = i64::from(end) - i64::from(start);
    i32::try_from(len.max(1)).unwrap_or(i32::MAX)
}
