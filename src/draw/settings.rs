use serde::{Deserialize, Serialize};

use crate::draw::model::{clamp_pen_width, Color, Pen, DEFAULT_PEN_WIDTH};
use crate::draw::save::DRAW_EXPORT_SUBDIR;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub color: Color,
}

impl PaletteEntry {
    fn hex(name: &str, hex: &str) -> Self {
        Self {
            name: name.to_owned(),
            color: Color::from_hex(hex).unwrap_or(Color::WHITE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawSettings {
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteEntry>,
    #[serde(default = "default_last_color")]
    pub last_color: Color,
    #[serde(default = "default_last_width")]
    pub last_width: u32,
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default = "default_export_subdir")]
    pub export_subdir: String,
}

impl DrawSettings {
    pub fn pen(&self) -> Pen {
        Pen::new(self.last_color, self.last_width)
    }

    pub fn remember_pen(&mut self, pen: Pen) {
        self.last_color = pen.color;
        self.last_width = pen.width;
    }

    /// Brings out-of-range values back to something usable. Returns whether
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        let width = clamp_pen_width(self.last_width);
        if width != self.last_width {
            self.last_width = width;
            changed = true;
        }

        if self.palette.is_empty() {
            self.palette = default_palette();
            changed = true;
        }

        if self.export_subdir.trim().is_empty() {
            self.export_subdir = default_export_subdir();
            changed = true;
        }

        changed
    }
}

fn default_last_color() -> Color {
    Color::WHITE
}

fn default_last_width() -> u32 {
    DEFAULT_PEN_WIDTH
}

fn default_export_subdir() -> String {
    DRAW_EXPORT_SUBDIR.to_owned()
}

fn default_palette() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry::hex("yellow", "#FFD600"),
        PaletteEntry::hex("black", "#000000"),
        PaletteEntry::hex("white", "#FFFFFF"),
        PaletteEntry::hex("gray", "#888888"),
        PaletteEntry::hex("blue", "#2196F3"),
        PaletteEntry::hex("red", "#F44336"),
        PaletteEntry::hex("pink", "#E91E63"),
        PaletteEntry::hex("purple", "#9C27B0"),
        PaletteEntry::hex("green", "#4CAF50"),
        PaletteEntry::hex("cyan", "#00BCD4"),
    ]
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            last_color: default_last_color(),
            last_width: default_last_width(),
            debug_logging: false,
            export_subdir: default_export_subdir(),
        }
    }
}
