// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Owns the event loop, translates crossterm input into the selection
//! engine's named gesture transitions, and renders the chart, the selection
//! panel, and save outcomes.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::chart::{candle_lines, panel_lines, ChartViewport};
use crate::model::Series;
use crate::select::{
    take_outcome, GestureSignal, PixelPoint, PixelRect, SaveOutcome, SelectionEngine,
    SelectionSink, SharedSaveOutcome, Signals,
};

const ARMED_BORDER_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_COLOR: Color = Color::LightYellow;
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Modifiers that arm selection: Ctrl, or the Meta/Super equivalent.
const SELECT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::META)
    .union(KeyModifiers::SUPER);

/// Runs the interactive chart until the user quits.
pub fn run(
    series: Arc<Series>,
    sink: Box<dyn SelectionSink + Send>,
    save_outcome: SharedSaveOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(SelectionEngine::new(series), sink, save_outcome);

    while !app.should_quit {
        app.poll_save_outcome();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::FocusLost => app.handle_focus_lost(),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Raw-mode guard: alternate screen plus mouse capture and focus change
/// reporting, all restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange,
        );
    }
}

struct App {
    engine: SelectionEngine,
    sink: Box<dyn SelectionSink + Send>,
    save_outcome: SharedSaveOutcome,
    offset: usize,
    overlay: Option<PixelRect>,
    select_mode: bool,
    viewport: Option<ChartViewport>,
    pan_anchor: Option<u16>,
    toast: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    fn new(
        engine: SelectionEngine,
        sink: Box<dyn SelectionSink + Send>,
        save_outcome: SharedSaveOutcome,
    ) -> Self {
        Self {
            engine,
            sink,
            save_outcome,
            offset: 0,
            overlay: None,
            select_mode: false,
            viewport: None,
            pan_anchor: None,
            toast: None,
            should_quit: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    fn active_toast(&self) -> Option<&str> {
        match &self.toast {
            Some((message, shown_at)) if shown_at.elapsed() < TOAST_TTL => Some(message),
            _ => None,
        }
    }

    fn poll_save_outcome(&mut self) {
        if let Some(outcome) = take_outcome(&self.save_outcome) {
            match outcome {
                SaveOutcome::Saved { count, message } if message.is_empty() => {
                    self.set_toast(format!("Saved {count} point(s)"));
                }
                SaveOutcome::Saved { count, message } => {
                    self.set_toast(format!("Saved {count} point(s): {message}"));
                }
                SaveOutcome::Failed { reason } => {
                    self.set_toast(format!("Save failed: {reason}"));
                }
            }
        }
    }

    /// Terminals deliver no bare modifier-press events; the armed state is
    /// derived from the modifiers carried on every key and mouse event.
    fn sync_modifier(&mut self, modifiers: KeyModifiers) {
        let signals = if modifiers.intersects(SELECT_MODIFIERS) {
            self.engine.modifier_pressed()
        } else {
            self.engine.modifier_released()
        };
        self.dispatch(signals);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.sync_modifier(key.modifiers);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('c') => {
                self.engine.clear();
                self.set_toast("Selection cleared");
            }
            KeyCode::Char('s') => self.save_selection(),
            KeyCode::Left => self.pan(-1),
            KeyCode::Right => self.pan(1),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.pan(i64::MAX),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.sync_modifier(mouse.modifiers);
        let position = PixelPoint::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.engine.tracker().native_pan_enabled() {
                    self.pan_anchor = Some(mouse.column);
                } else {
                    let signals = self.engine.pointer_down(position);
                    self.dispatch(signals);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.engine.tracker().native_pan_enabled() {
                    if let Some(anchor) = self.pan_anchor {
                        self.pan(i64::from(anchor) - i64::from(mouse.column));
                    }
                    self.pan_anchor = Some(mouse.column);
                } else {
                    let signals = self.engine.pointer_moved(position);
                    self.dispatch(signals);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pan_anchor = None;
                let signals = self.engine.pointer_up(position);
                self.dispatch(signals);
            }
            MouseEventKind::Moved => {
                let signals = self.engine.pointer_moved(position);
                self.dispatch(signals);
            }
            MouseEventKind::ScrollLeft => self.pan(-1),
            MouseEventKind::ScrollRight => self.pan(1),
            _ => {}
        }
    }

    fn handle_focus_lost(&mut self) {
        self.pan_anchor = None;
        let signals = self.engine.focus_lost();
        self.dispatch(signals);
    }

    fn dispatch(&mut self, signals: Signals) {
        for signal in signals {
            match signal {
                GestureSignal::CursorArmed => self.select_mode = true,
                GestureSignal::CursorRestored => {
                    self.select_mode = false;
                    self.overlay = None;
                }
                GestureSignal::OverlayChanged(rect) => self.overlay = Some(rect),
                GestureSignal::OverlayRemoved => self.overlay = None,
                GestureSignal::CommitRegion(rect) => {
                    // Without a laid-out viewport there is no stable scale
                    // to convert against; drop the commit.
                    if let Some(viewport) = self.viewport.clone() {
                        self.engine.commit_region(rect, &viewport);
                    }
                }
                GestureSignal::ClickAt(position) => {
                    let point = self.viewport.as_ref().and_then(|v| v.point_at(position));
                    if let Some(id) = point {
                        self.engine.toggle_point(id);
                    }
                }
            }
        }
    }

    fn save_selection(&mut self) {
        if self.engine.selection().is_empty() {
            self.set_toast("Nothing selected");
            return;
        }
        let records = self.engine.save_selection(self.sink.as_ref());
        self.set_toast(format!("Saving {} point(s)...", records.len()));
    }

    /// Native pan. Only reachable while the tracker is idle; selection
    /// gestures suspend it.
    fn pan(&mut self, delta: i64) {
        let width = match &self.viewport {
            Some(viewport) => viewport.plot().width,
            None => return,
        };
        let max = ChartViewport::max_offset(self.engine.series(), width) as i64;
        let next = (self.offset as i64).saturating_add(delta).clamp(0, max);
        self.offset = next as usize;
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_area);
    let chart_area = panes[0];
    let panel_area = panes[1];

    draw_chart(frame, app, chart_area);
    draw_panel(frame, app, panel_area);
    draw_status(frame, app, status_area);
}

fn draw_chart(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = if app.select_mode {
        format!("Chart — {} points — select", app.engine.series().len())
    } else {
        format!("Chart — {} points", app.engine.series().len())
    };
    let border_style = if app.select_mode {
        Style::default().fg(ARMED_BORDER_COLOR)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
    let inner = block.inner(area);

    let series = app.engine.series_handle();
    app.viewport = ChartViewport::layout(series.clone(), inner, app.offset);

    match &app.viewport {
        Some(viewport) => {
            app.offset = viewport.offset();
            let lines = candle_lines(viewport, &series, app.engine.highlight(), app.overlay);
            frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
        }
        None => {
            let empty = Paragraph::new("No data loaded")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
        }
    }
}

fn draw_panel(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!("Selection ({})", app.engine.highlight().len());
    let block = Block::default().borders(Borders::ALL).title(title);
    let lines = panel_lines(app.engine.highlight());
    frame.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(block), area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let line = match app.active_toast() {
        Some(message) => Line::from(Span::styled(
            message.to_owned(),
            Style::default().fg(TOAST_COLOR),
        )),
        None => footer_hints(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_hints() -> Line<'static> {
    let key = Style::default().fg(FOOTER_KEY_COLOR);
    let label = Style::default().fg(FOOTER_LABEL_COLOR);
    Line::from(vec![
        Span::styled("ctrl+click", key),
        Span::styled(" toggle  ", label),
        Span::styled("ctrl+drag", key),
        Span::styled(" select  ", label),
        Span::styled("←/→", key),
        Span::styled(" pan  ", label),
        Span::styled("c", key),
        Span::styled(" clear  ", label),
        Span::styled("s", key),
        Span::styled(" save  ", label),
        Span::styled("q", key),
        Span::styled(" quit", label),
    ])
}
