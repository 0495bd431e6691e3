use eframe::egui::{self, Color32};
use palette::{Darken, Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0 + 120.0;
            let hsl = Hsl::new(hue, 0.55, 0.5);
            to_color32(hsl.into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Background themes
// ---------------------------------------------------------------------------

/// A selectable page background plus the accent derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    background: Srgb<u8>,
}

pub const THEMES: [Theme; 7] = [
    Theme::new("Grey", 0xF4, 0xF6, 0xF7),
    Theme::new("White", 0xFF, 0xFF, 0xFF),
    Theme::new("Light Blue", 0xE3, 0xF2, 0xFD),
    Theme::new("Light Green", 0xE8, 0xF5, 0xE9),
    Theme::new("Light Yellow", 0xFF, 0xFD, 0xE7),
    Theme::new("Light Grey", 0xF5, 0xF5, 0xF5),
    Theme::new("Light Pink", 0xFC, 0xE4, 0xEC),
];

impl Theme {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            background: Srgb::new(r, g, b),
        }
    }

    /// Look a theme up by name, falling back to white like the selector does.
    pub fn by_name(name: &str) -> Theme {
        THEMES
            .iter()
            .copied()
            .find(|t| t.name == name)
            .unwrap_or(THEMES[1])
    }

    pub fn background(&self) -> Color32 {
        let c = self.background;
        Color32::from_rgb(c.red, c.green, c.blue)
    }

    /// Same hue as the background, much darker; used for headings and card
    /// strokes.
    pub fn accent(&self) -> Color32 {
        let hsl: Hsl = self.background.into_format::<f32>().into_color();
        let accent = if hsl.saturation < 0.05 {
            Hsl::new(122.0, 0.39, 0.49)
        } else {
            let vivid = Hsl::new(hsl.hue, hsl.saturation.max(0.5), hsl.lightness);
            vivid.darken(0.55)
        };
        to_color32(accent.into_color())
    }

    /// Apply the background to every panel.
    pub fn apply(&self, ctx: &egui::Context) {
        let bg = self.background();
        ctx.style_mut(|style| {
            style.visuals.panel_fill = bg;
            style.visuals.window_fill = bg;
            style.visuals.extreme_bg_color = Color32::WHITE;
        });
    }
}
