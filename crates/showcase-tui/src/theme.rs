//! Color palette and style constants for the showcase TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 14, 22);
pub const C_PRIMARY: Color = Color::Rgb(214, 210, 228);
pub const C_SECONDARY: Color = Color::Rgb(118, 112, 140);
pub const C_MUTED: Color = Color::Rgb(70, 66, 88);
pub const C_ACCENT: Color = Color::Rgb(252, 120, 98);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 40, 60);
pub const C_OVERLAY_BG: Color = Color::Rgb(24, 20, 34);
pub const C_POPUP_BG: Color = Color::Rgb(28, 24, 40);
pub const C_NAV_ACTIVE: Color = Color::Rgb(255, 204, 92);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_heading() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_body() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_accent() -> Style {
    Style::default().fg(C_ACCENT)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_nav_active() -> Style {
    Style::default().fg(C_NAV_ACTIVE).add_modifier(Modifier::BOLD)
}
