use ratatui::style::Color;

use crate::catalog::{Category, Difficulty};
use crate::theme::ThemeMode;

/// Colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub status_ok: Color,
    pub status_warn: Color,
    pub status_error: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0x11, 0x18, 0x27),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    border: Color::Rgb(0xd1, 0xd5, 0xdb),
    accent: Color::Rgb(0x25, 0x63, 0xeb),
    highlight: Color::Rgb(0xef, 0xf6, 0xff),
    status_ok: Color::Rgb(0x16, 0xa3, 0x4a),
    status_warn: Color::Rgb(0xca, 0x8a, 0x04),
    status_error: Color::Rgb(0xdc, 0x26, 0x26),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(0x11, 0x18, 0x27),
    text: Color::Rgb(0xe5, 0xe5, 0xe5),
    muted: Color::Rgb(0x9c, 0xa3, 0xaf),
    border: Color::Rgb(0x40, 0x40, 0x40),
    accent: Color::Rgb(0x60, 0xa5, 0xfa),
    highlight: Color::Rgb(0x26, 0x26, 0x26),
    status_ok: Color::Rgb(0x22, 0xc5, 0x5e),
    status_warn: Color::Rgb(0xea, 0xb3, 0x08),
    status_error: Color::Rgb(0xef, 0x44, 0x44),
};

pub fn palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

impl Palette {
    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Beginner => self.status_ok,
            Difficulty::Intermediate => self.status_warn,
            Difficulty::Advanced => self.status_error,
        }
    }

    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Performance => self.accent,
            Category::Ux => self.status_ok,
            Category::DataHandling => self.status_warn,
        }
    }
}
