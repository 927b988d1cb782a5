// TUI module - terminal preview of a themed screen
//
// This module runs one screen in the terminal using ratatui. It handles:
// - Terminal initialization and cleanup
// - The frame loop (drain input, update regions, draw)
// - A log panel fed from the in-memory log buffer
//
// The screen itself is drawn through `CellCanvas`, which maps the theme's
// pixel surface onto character cells.

pub mod canvas;
pub mod source;

pub use canvas::{CellCanvas, CellScale};
pub use source::{CrosstermSource, KeyTracker, RELEASE_AFTER_MS};

use crate::clock::{Clock, SystemClock};
use crate::input::{EventManager, InputSettings};
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::region::LogAudio;
use crate::screen::{Screen, Stage};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect as Area},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Upper bound on one frame when no input arrives
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Rows given to the log panel, borders included
const LOG_PANEL_HEIGHT: u16 = 8;

/// What the status line shows
struct Status {
    screen: String,
    last_event: Option<String>,
}

/// Run the preview for one screen until Ctrl+C
///
/// Sets up the terminal, runs the frame loop and restores the terminal
/// even when the loop fails.
pub fn run_preview(
    stage: &Stage,
    screen_name: &str,
    input: &InputSettings,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    // Key releases only exist with the kitty protocol
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release events")?;
    }
    tracing::debug!(reports_release, "terminal keyboard");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_frame_loop(
        &mut terminal,
        stage,
        screen_name,
        input,
        &log_buffer,
        reports_release,
    );

    // Restore terminal
    if reports_release {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
            .context("Failed to restore keyboard mode")?;
    }
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Split the terminal into screen viewport, log panel and status line
fn split(area: Area) -> [Area; 3] {
    Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(LOG_PANEL_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// One frame: drain input, update every region, draw, wait for input or timeout
fn run_frame_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    stage: &Stage,
    screen_name: &str,
    settings: &InputSettings,
    log_buffer: &LogBuffer,
    reports_release: bool,
) -> Result<()> {
    let size = terminal.size().context("Failed to read terminal size")?;
    let [viewport, _, _] = split(Area::new(0, 0, size.width, size.height));
    let root = stage.rects.root();
    let scale = CellScale::fit(root.width(), root.height(), viewport);

    let clock = SystemClock::new();
    let mut screen = stage
        .screen(screen_name, &scale, clock.now_ms())
        .with_context(|| format!("Failed to build screen '{}'", screen_name))?;

    let source = CrosstermSource::new(reports_release, clock.clone());
    let mut input = EventManager::with_settings(Box::new(source), Box::new(clock), settings);
    let mut audio = LogAudio;
    let mut status = Status {
        screen: screen_name.to_string(),
        last_event: None,
    };

    screen.activate(&mut audio);
    loop {
        input.handle_events();
        if input.quit_requested() {
            break;
        }

        for region_event in screen.update(&input, &mut audio) {
            tracing::info!(event = %region_event, "region event");
            status.last_event = Some(region_event.to_string());
        }

        terminal
            .draw(|f| draw(f, &screen, scale, log_buffer, &status))
            .context("Failed to draw terminal")?;

        // wakes early on input so presses are not a frame late
        event::poll(FRAME_TIME).context("Failed to poll terminal")?;
    }
    screen.deactivate(&mut audio);

    Ok(())
}

fn draw(f: &mut Frame, screen: &Screen, scale: CellScale, log_buffer: &LogBuffer, status: &Status) {
    let [viewport, logs, status_line] = split(f.area());

    {
        let mut canvas = CellCanvas::new(f.buffer_mut(), viewport, scale);
        screen.draw(&mut canvas);
    }

    render_logs(f, logs, log_buffer);
    render_status(f, status_line, status);
}

// ═══════════════════════════════════════════════════════════════════════════
// Log panel
// ═══════════════════════════════════════════════════════════════════════════

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

fn render_logs(f: &mut Frame, area: Area, log_buffer: &LogBuffer) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = log_buffer
        .recent(visible)
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level)))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Logs "));
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, area: Area, status: &Status) {
    let last = status.last_event.as_deref().unwrap_or("-");
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", status.screen),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!(" last: {} ", last)),
        Span::styled(" Ctrl+C quits ", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
