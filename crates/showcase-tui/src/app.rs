//! App — terminal event loop around the coordinator.
//!
//! The loop owns the terminal and translates crossterm events into the
//! coordinator's `Input` values.  Everything stateful about the page
//! lives in the coordinator; this file only maps keys and mouse hits,
//! ticks the deadlines, and redraws from the recorded `ViewState`.

use std::io;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;

use showcase_core::config::{Config, DeviceProfile};
use showcase_core::content::Content;
use showcase_core::coordinator::Coordinator;
use showcase_core::input::Input;
use showcase_core::sink::SinkEvent;

use crate::mpv::MpvSink;
use crate::ui;
use crate::view::TermSurface;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Sink(SinkEvent),
}

/// Last-drawn layout rects, used for mouse hit-testing.
#[derive(Default, Clone)]
pub struct HitAreas {
    pub dots: Vec<Rect>,
    pub sound_icon: Rect,
    pub nav: Vec<Rect>,
    pub view_details: Rect,
    pub popup_close: Rect,
}

pub struct App {
    coordinator: Coordinator<MpvSink, TermSurface>,
    /// Section/track text kept alongside for rendering; the coordinator
    /// only tracks visibility.
    content: Content,
    profile: DeviceProfile,
    swipe_threshold: f32,
    hit: HitAreas,
    hovered_dot: Option<usize>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, content: Content, sink: MpvSink) -> Self {
        let coordinator = Coordinator::new(config, content.clone(), sink, TermSurface::default());
        Self {
            coordinator,
            content,
            profile: config.display.profile,
            swipe_threshold: config.input.swipe_threshold,
            hit: HitAreas::default(),
            hovered_dot: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self, mut sink_rx: mpsc::Receiver<SinkEvent>) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: sink events (mpv driver → coordinator) ──────────
        let sink_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(ev) = sink_rx.recv().await {
                if sink_tx.send(AppMessage::Sink(ev)).await.is_err() {
                    break;
                }
            }
        });

        // Deadline tick: overlay auto-hide and popup exit settle.
        let mut tick = tokio::time::interval(Duration::from_millis(50));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.coordinator.start(Instant::now());

        loop {
            terminal.draw(|f| {
                self.hit = ui::draw(
                    f,
                    &self.coordinator.surface().view,
                    &self.content,
                    self.profile,
                );
            })?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    match msg {
                        AppMessage::Event(ev) => self.handle_event(ev),
                        AppMessage::Sink(ev) => self.coordinator.on_sink_event(ev),
                    }
                }
                _ = tick.tick() => {
                    self.coordinator.tick(Instant::now());
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                if is_quit_key(key) {
                    self.should_quit = true;
                    return;
                }
                if let Some(input) = key_to_input(key, self.profile, self.swipe_threshold) {
                    self.coordinator.handle(input, Instant::now());
                }
            }
            Event::Mouse(mouse) => {
                for input in self.handle_mouse(mouse) {
                    self.coordinator.handle(input, Instant::now());
                }
            }
            _ => {}
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Input> {
        let col = event.column;
        let row = event.row;

        match event.kind {
            MouseEventKind::ScrollDown => {
                return vec![self.scroll_input(1.0)];
            }
            MouseEventKind::ScrollUp => {
                return vec![self.scroll_input(-1.0)];
            }
            MouseEventKind::Moved => {
                // Tooltip transitions follow the pointer across the dots.
                let over = self
                    .hit
                    .dots
                    .iter()
                    .position(|r| hit(*r, col, row));
                let mut inputs = Vec::new();
                if over != self.hovered_dot {
                    if let Some(prev) = self.hovered_dot {
                        inputs.push(Input::DotHover {
                            dot: prev,
                            entered: false,
                        });
                    }
                    if let Some(next) = over {
                        inputs.push(Input::DotHover {
                            dot: next,
                            entered: true,
                        });
                    }
                    self.hovered_dot = over;
                }
                return inputs;
            }
            MouseEventKind::Down(_) => {}
            _ => return vec![],
        }

        // Click: front-most hit wins, anything else counts as a page click.
        if let Some(dot) = self.hit.dots.iter().position(|r| hit(*r, col, row)) {
            return vec![Input::DotClick(dot)];
        }
        if hit(self.hit.popup_close, col, row) {
            return vec![Input::PopupCloseClick];
        }
        if hit(self.hit.view_details, col, row) {
            return vec![Input::ViewDetailsClick];
        }
        if hit(self.hit.sound_icon, col, row) {
            return vec![Input::SoundIconClick];
        }
        if let Some(target) = self.hit.nav.iter().position(|r| hit(*r, col, row)) {
            return vec![Input::NavClick(target)];
        }
        vec![Input::PageClick]
    }

    fn scroll_input(&self, direction: f32) -> Input {
        if self.profile.is_mobile() {
            // A terminal scroll is a deliberate gesture; report it above
            // the swipe threshold so it always registers.
            Input::Swipe {
                delta: direction * (self.swipe_threshold + 1.0),
            }
        } else {
            Input::Wheel {
                delta: direction * 100.0,
            }
        }
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && r.height > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

fn is_quit_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Pure key → input mapping.  Digits pick dots, arrows page sections,
/// letters mirror the page's clickable regions.
fn key_to_input(key: KeyEvent, profile: DeviceProfile, swipe_threshold: f32) -> Option<Input> {
    let step = |direction: f32| {
        if profile.is_mobile() {
            Input::Swipe {
                delta: direction * (swipe_threshold + 1.0),
            }
        } else {
            Input::Wheel {
                delta: direction * 100.0,
            }
        }
    };

    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as u8 - b'1') as usize;
            Some(Input::DotClick(idx))
        }
        KeyCode::Char('m') => Some(Input::SoundIconClick),
        KeyCode::Char('v') => Some(Input::ViewDetailsClick),
        KeyCode::Esc => Some(Input::PopupCloseClick),
        KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') => Some(step(1.0)),
        KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => Some(step(-1.0)),
        KeyCode::Char('h') => Some(Input::NavClick(0)),
        KeyCode::Char('w') => Some(Input::NavClick(1)),
        KeyCode::Char('e') => Some(Input::NavClick(2)),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_map_to_zero_based_dots() {
        let input = key_to_input(key(KeyCode::Char('1')), DeviceProfile::Desktop, 40.0);
        assert!(matches!(input, Some(Input::DotClick(0))));
        let input = key_to_input(key(KeyCode::Char('3')), DeviceProfile::Desktop, 40.0);
        assert!(matches!(input, Some(Input::DotClick(2))));
    }

    #[test]
    fn arrows_become_wheel_on_desktop_and_swipe_on_mobile() {
        let input = key_to_input(key(KeyCode::Down), DeviceProfile::Desktop, 40.0);
        assert!(matches!(input, Some(Input::Wheel { delta }) if delta > 0.0));

        let input = key_to_input(key(KeyCode::Down), DeviceProfile::Mobile, 40.0);
        match input {
            Some(Input::Swipe { delta }) => assert!(delta > 40.0),
            other => panic!("expected swipe, got {:?}", other),
        }
    }

    #[test]
    fn unmapped_keys_produce_no_input() {
        assert!(key_to_input(key(KeyCode::Char('z')), DeviceProfile::Desktop, 40.0).is_none());
        assert!(key_to_input(key(KeyCode::Tab), DeviceProfile::Desktop, 40.0).is_none());
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(key(KeyCode::Char('q'))));
        assert!(is_quit_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(key(KeyCode::Char('c'))));
    }
}
