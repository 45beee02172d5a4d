//! Frame rendering for the showcase page.
//!
//! Reads the `ViewState` the coordinator recorded and lays it out as a
//! terminal page: nav bar on top, one hero section in the middle, the
//! dot row at the bottom, and the overlay / mobile popup floated above.
//! Returns the clickable rects so the app can hit-test mouse input.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use showcase_core::config::DeviceProfile;
use showcase_core::content::Content;

use crate::app::HitAreas;
use crate::theme;
use crate::view::ViewState;

pub fn draw(
    f: &mut Frame,
    view: &ViewState,
    content: &Content,
    profile: DeviceProfile,
) -> HitAreas {
    let mut hit = HitAreas::default();

    f.render_widget(
        Block::default().style(Style::default().bg(theme::C_BG)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // nav bar
            Constraint::Min(3),    // hero section
            Constraint::Length(1), // tooltip row
            Constraint::Length(1), // dot row
            Constraint::Length(1), // status line
        ])
        .split(f.area());

    draw_nav(f, chunks[0], view, content, &mut hit);
    draw_section(f, chunks[1], view, content);
    draw_tooltips(f, chunks[2], view, content);
    draw_dots(f, chunks[3], view, content, &mut hit);
    draw_status(f, chunks[4], view, profile, &mut hit);

    if view.overlay_visible {
        draw_overlay(f, view);
    }
    if view.popup_attached {
        draw_popup(f, view, &mut hit);
    }

    hit
}

// ── Nav bar ───────────────────────────────────────────────────────────────────

fn draw_nav(f: &mut Frame, area: Rect, view: &ViewState, content: &Content, hit: &mut HitAreas) {
    let mut x = area.x + 1;
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, section) in content.sections.iter().enumerate() {
        let label = format!(" {} ", section.name);
        let width = label.chars().count() as u16;
        let style = if view.nav_highlight == Some(i) {
            theme::style_nav_active()
        } else {
            theme::style_body()
        };
        hit.nav.push(Rect {
            x,
            y: area.y,
            width,
            height: 1,
        });
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        x += width + 1;
    }
    let line = Line::from(spans);
    f.render_widget(Paragraph::new(line), area);
}

// ── Hero section ──────────────────────────────────────────────────────────────

fn draw_section(f: &mut Frame, area: Rect, view: &ViewState, content: &Content) {
    let visible = view
        .sections
        .iter()
        .position(|s| s.visible)
        .and_then(|i| content.sections.get(i).map(|sec| (i, sec)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::C_PANEL_BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some((_, section)) = visible else {
        return; // all sections down while the overlay holds the page
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(section.heading.as_str())
            .style(theme::style_heading())
            .alignment(Alignment::Center),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(section.paragraph.as_str())
            .style(theme::style_body())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[3],
    );
}

// ── Dots and tooltips ─────────────────────────────────────────────────────────

const DOT_WIDTH: u16 = 3;

fn dot_row_origin(area: Rect, count: usize) -> u16 {
    let total = count as u16 * (DOT_WIDTH + 1);
    area.x + area.width.saturating_sub(total) / 2
}

fn draw_dots(f: &mut Frame, area: Rect, view: &ViewState, content: &Content, hit: &mut HitAreas) {
    let count = content.tracks.len();
    if count == 0 {
        return;
    }
    let mut x = dot_row_origin(area, count);
    let mut spans: Vec<Span> = vec![Span::raw(
        " ".repeat((x - area.x) as usize),
    )];
    for i in 0..count {
        let active = view.dot_active == Some(i);
        let glyph = if active { "(●)" } else { " ○ " };
        let style = if active {
            theme::style_accent()
        } else {
            theme::style_muted()
        };
        hit.dots.push(Rect {
            x,
            y: area.y,
            width: DOT_WIDTH,
            height: 1,
        });
        spans.push(Span::styled(glyph, style));
        spans.push(Span::raw(" "));
        x += DOT_WIDTH + 1;
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tooltips(f: &mut Frame, area: Rect, view: &ViewState, content: &Content) {
    let Some(dot) = view.tooltips.iter().position(|v| *v) else {
        return;
    };
    let Some(track) = content.tracks.get(dot) else {
        return;
    };
    let label = if track.title.is_empty() {
        track.id.as_str()
    } else {
        track.title.as_str()
    };
    f.render_widget(
        Paragraph::new(label)
            .style(theme::style_accent())
            .alignment(Alignment::Center),
        area,
    );
}

// ── Status line ───────────────────────────────────────────────────────────────

fn draw_status(
    f: &mut Frame,
    area: Rect,
    view: &ViewState,
    profile: DeviceProfile,
    hit: &mut HitAreas,
) {
    let sound = if view.sound_on { "[♪ on ]" } else { "[♪ off]" };
    let sound_style = if view.sound_on {
        theme::style_accent()
    } else {
        theme::style_muted()
    };

    let mut spans = vec![Span::styled(sound, sound_style)];
    hit.sound_icon = Rect {
        x: area.x,
        y: area.y,
        width: sound.chars().count() as u16,
        height: 1,
    };

    if profile.is_mobile() {
        let label = "  [view details]";
        hit.view_details = Rect {
            x: area.x + hit.sound_icon.width,
            y: area.y,
            width: label.chars().count() as u16,
            height: 1,
        };
        spans.push(Span::styled(label, theme::style_body()));
    }

    spans.push(Span::styled(
        "   q quit · 1-9 tracks · ↑↓ sections · m sound",
        theme::style_muted(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── Overlay ───────────────────────────────────────────────────────────────────

fn draw_overlay(f: &mut Frame, view: &ViewState) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::C_ACCENT))
        .style(Style::default().bg(theme::C_OVERLAY_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            view.overlay.title.clone(),
            theme::style_heading(),
        )),
        Line::from(Span::styled(
            view.overlay.artist.clone(),
            theme::style_accent(),
        )),
        Line::raw(""),
    ];
    for text_line in view.overlay.description_html.lines() {
        lines.push(Line::from(Span::styled(
            text_line.to_string(),
            theme::style_body(),
        )));
    }
    if !view.overlay.meta_text.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            view.overlay.meta_text.clone(),
            theme::style_muted(),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        inner,
    );
}

// ── Mobile popup ──────────────────────────────────────────────────────────────

fn draw_popup(f: &mut Frame, view: &ViewState, hit: &mut HitAreas) {
    let frame_area = f.area();
    let height = (frame_area.height / 3).max(5);
    let area = Rect {
        x: frame_area.x,
        y: frame_area.y + frame_area.height - height,
        width: frame_area.width,
        height,
    };
    f.render_widget(Clear, area);

    // Exit settle: the sheet stays attached but renders dimmed until the
    // coordinator detaches it.
    let closing = !view.popup_open;
    let body_style = if closing {
        theme::style_muted()
    } else {
        theme::style_body()
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme::C_PANEL_BORDER))
        .style(Style::default().bg(theme::C_POPUP_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let close = "[ close ✕ ]";
    let close_x = rows[0].x + rows[0].width.saturating_sub(close.chars().count() as u16);
    hit.popup_close = Rect {
        x: close_x,
        y: rows[0].y,
        width: close.chars().count() as u16,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(close)
            .style(theme::style_accent())
            .alignment(Alignment::Right),
        rows[0],
    );

    f.render_widget(
        Paragraph::new(view.popup_text.as_str())
            .style(body_style)
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Centered rect sized as a percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
