//! Palette and style helpers for the detail screen
//!
//! Fixed chrome colors plus styles derived from a media record's accent
//! color (toolbar scrim, play affordance tint).

use ratatui::style::{Color, Modifier, Style};

/// Screen palette
pub struct Theme;

impl Theme {
    /// Background: #0a0a0f
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);

    /// Panel behind the background-image region: #14141e
    pub const BACKDROP: Color = Color::Rgb(0x14, 0x14, 0x1e);

    /// Primary: #00fff2
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);

    /// Accent: #ffff00
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);

    /// Text: #e0e0e0
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);

    /// Dim: #404050
    pub const DIM: Color = Color::Rgb(0x40, 0x40, 0x50);

    /// Success: #00ff00
    pub const SUCCESS: Color = Color::Rgb(0x00, 0xff, 0x00);

    /// Error: #ff0040
    pub const ERROR: Color = Color::Rgb(0xff, 0x00, 0x40);

    /// Border: #008078
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    /// Text color used on top of light scrims
    pub const INK: Color = Color::Rgb(0x00, 0x00, 0x00);

    /// Text color used on top of dark scrims
    pub const PAPER: Color = Color::Rgb(0xff, 0xff, 0xff);

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Keybind hint (e.g., "[p]")
    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKDROP)
    }

    pub fn backdrop() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKDROP)
    }

    /// Toolbar scrim in the media's accent color with readable text
    pub fn scrim(color: u32) -> Style {
        let bg = media_color(color);
        Style::default()
            .fg(readable_on(color))
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Play affordance tinted with `color`
    pub fn play_button(color: u32) -> Style {
        Style::default()
            .fg(readable_on(color))
            .bg(media_color(color))
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Split a 0xAARRGGBB / 0xRRGGBB value into RGB
pub fn split_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
    )
}

/// Terminal color for a media accent color
pub fn media_color(color: u32) -> Color {
    let (r, g, b) = split_rgb(color);
    Color::Rgb(r, g, b)
}

/// Ink or paper, whichever contrasts more with `color`
pub fn readable_on(color: u32) -> Color {
    let bg = split_rgb(color);
    if contrast_ratio((0, 0, 0), bg) >= contrast_ratio((255, 255, 255), bg) {
        Theme::INK
    } else {
        Theme::PAPER
    }
}

/// Relative luminance per WCAG 2.0
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Large-text WCAG AA threshold (3:1)
    fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
        contrast_ratio(fg, bg) >= 3.0
    }

    fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
        match color {
            Color::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        }
    }

    #[test]
    fn test_split_rgb_ignores_alpha() {
        assert_eq!(split_rgb(0xFF336699), (0x33, 0x66, 0x99));
        assert_eq!(split_rgb(0x336699), (0x33, 0x66, 0x99));
    }

    #[test]
    fn test_readable_on_picks_contrasting_text() {
        assert_eq!(readable_on(0xFFFFFF), Theme::INK);
        assert_eq!(readable_on(0x000000), Theme::PAPER);
        assert_eq!(readable_on(0xFFFF00), Theme::INK);
        assert_eq!(readable_on(0x1a1a6e), Theme::PAPER);
    }

    #[test]
    fn test_scrim_text_always_readable() {
        for color in [0xFF0000, 0x00FF00, 0x0000FF, 0x808080, 0xFF00FF, 0x00FFFF] {
            let fg = color_to_rgb(readable_on(color)).unwrap();
            assert!(
                meets_wcag_aa_large(fg, split_rgb(color)),
                "scrim text unreadable on {:06x}",
                color
            );
        }
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
