use ratatui::style::Color;

use crate::model::{DisplayMode, UiConfig};

/// Color palette for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub done: Color,
    pub selection_bg: Color,
    pub drag_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            done: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            drag_bg: Color::Rgb(0x2A, 0x22, 0x55),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xFA, 0xF8, 0xF5),
            text: Color::Rgb(0x33, 0x2E, 0x4A),
            text_bright: Color::Rgb(0x0C, 0x00, 0x1B),
            highlight: Color::Rgb(0xC2, 0x18, 0x5B),
            dim: Color::Rgb(0x8A, 0x85, 0x9E),
            done: Color::Rgb(0x1E, 0x8E, 0x4E),
            selection_bg: Color::Rgb(0xF3, 0xD9, 0xE6),
            drag_bg: Color::Rgb(0xDD, 0xE3, 0xF7),
        }
    }

    /// Palette for `mode`, with `[ui.colors]` overrides applied
    pub fn for_mode(mode: DisplayMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            DisplayMode::Dark => Theme::dark(),
            DisplayMode::Light => Theme::light(),
        };

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "done" => theme.done = color,
                    "selection_bg" => theme.selection_bg = color,
                    "drag_bg" => theme.drag_bg = color,
                    _ => {}
                }
            }
        }

        theme
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
