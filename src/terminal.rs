// SPDX-License-Identifier: GPL-3.0-only

//! Terminal front end
//!
//! Renders the session read-only and forwards the five user gestures. The
//! captured still is drawn with Unicode half-block characters for improved
//! vertical resolution.

use crate::app::{Alert, CaptureSession, Gesture, ModeKind, SessionRuntime, SessionState};
use crate::backends::camera::{CapturedPicture, SimulatedCamera, SimulatedPermission};
use crate::config::Config;
use crate::constants;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use std::collections::VecDeque;
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Run the terminal front end against the simulated devices
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;

    let (alert_sender, alert_receiver) = mpsc::unbounded_channel();
    let session = CaptureSession::new(
        Arc::new(SimulatedPermission::new(config.permission)),
        Arc::new(SimulatedCamera::new(config)),
        Arc::new(alert_sender),
    );
    let mut runtime = SessionRuntime::new(session, rt.handle().clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut runtime, alert_receiver);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut SessionRuntime,
    mut alert_receiver: mpsc::UnboundedReceiver<Alert>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ui = UiState::default();
    info!("Terminal front end started");

    loop {
        runtime.pump();
        while let Ok(alert) = alert_receiver.try_recv() {
            ui.alerts.push_back(alert);
        }
        ui.sync(runtime.state());

        terminal.draw(|f| draw(f, runtime.state(), &ui))?;

        // Handle input with timeout so task results keep flowing in
        if event::poll(constants::UI_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match handle_key(key, runtime.state(), &mut ui) {
                KeyAction::Quit => break,
                KeyAction::Forward(gesture) => runtime.dispatch(gesture),
                KeyAction::None => {}
            }
        }
    }

    Ok(())
}

/// Presentation-local state: never fed back into the session
#[derive(Default)]
struct UiState {
    /// Text field of the naming dialog
    draft: String,
    prompt_was_visible: bool,
    /// Modal alerts waiting for acknowledgement, oldest first
    alerts: VecDeque<Alert>,
    preview_uri: Option<String>,
    preview: Option<image::RgbImage>,
}

impl UiState {
    fn sync(&mut self, state: &SessionState) {
        let visible = state.label_prompt_visible();
        if visible && !self.prompt_was_visible {
            self.draft = state.subject_name().to_string();
        }
        self.prompt_was_visible = visible;

        let photo = state.captured_photo();
        let uri = photo.map(|p| p.uri.clone());
        if uri != self.preview_uri {
            self.preview = photo.and_then(load_preview);
            self.preview_uri = uri;
        }
    }
}

fn load_preview(picture: &CapturedPicture) -> Option<image::RgbImage> {
    let path = picture.file_path()?;
    match image::open(&path) {
        Ok(img) => Some(img.to_rgb8()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load photo preview");
            None
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    None,
    Quit,
    Forward(Gesture),
}

fn handle_key(key: KeyEvent, state: &SessionState, ui: &mut UiState) -> KeyAction {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    // An alert blocks everything until acknowledged
    if !ui.alerts.is_empty() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            ui.alerts.pop_front();
        }
        return KeyAction::None;
    }

    if state.label_prompt_visible() {
        return match key.code {
            KeyCode::Enter => KeyAction::Forward(Gesture::SubmitLabel(ui.draft.clone())),
            KeyCode::Esc => KeyAction::Forward(Gesture::DismissLabelPrompt),
            KeyCode::Backspace => {
                ui.draft.pop();
                KeyAction::None
            }
            KeyCode::Char(c) => {
                ui.draft.push(c);
                KeyAction::None
            }
            _ => KeyAction::None,
        };
    }

    match (state.mode_kind(), key.code) {
        (_, KeyCode::Char('q')) => KeyAction::Quit,
        (ModeKind::Browsing, KeyCode::Char('c')) => KeyAction::Forward(Gesture::RequestAccess),
        (ModeKind::LiveCapture, KeyCode::Char(' ') | KeyCode::Char('p')) => {
            KeyAction::Forward(Gesture::Capture)
        }
        (ModeKind::LiveCapture, KeyCode::Char('x') | KeyCode::Esc) => {
            KeyAction::Forward(Gesture::CancelLiveView)
        }
        _ => KeyAction::None,
    }
}

fn draw(f: &mut Frame, state: &SessionState, ui: &UiState) {
    let area = f.area();
    let [header, body, footer] = split_screen(area);

    match state.mode_kind() {
        ModeKind::Browsing => draw_browsing(f, state, ui, header, body),
        ModeKind::LiveCapture => draw_viewfinder(f, body.union(header)),
    }

    f.render_widget(
        StatusBar {
            line: status_line(state),
        },
        footer,
    );

    if state.label_prompt_visible() {
        draw_label_prompt(f, ui, area);
    }
    if let Some(alert) = ui.alerts.front() {
        draw_alert(f, alert, area);
    }
}

fn split_screen(area: Rect) -> [Rect; 3] {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn draw_browsing(f: &mut Frame, state: &SessionState, ui: &UiState, header: Rect, body: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", constants::APP_TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" [c] camera"),
    ]);
    f.render_widget(
        Paragraph::new(title).style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        header,
    );

    let mut photo_area = body;
    if let Some(error) = state.last_error() {
        let error_area = Rect { height: 1, ..body };
        f.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            error_area,
        );
        photo_area.y += 1;
        photo_area.height = photo_area.height.saturating_sub(1);
    }

    if !state.subject_name().is_empty() && photo_area.height > 1 {
        let caption_area = Rect {
            y: photo_area.y + photo_area.height - 1,
            height: 1,
            ..photo_area
        };
        photo_area.height -= 1;
        f.render_widget(
            Paragraph::new(Line::from(state.subject_name()).centered())
                .style(Style::default().fg(Color::Black).bg(Color::Gray)),
            caption_area,
        );
    }

    if state.captured_photo().is_some() {
        f.render_widget(
            &PhotoWidget {
                image: ui.preview.as_ref(),
            },
            photo_area,
        );
    }
}

fn draw_viewfinder(f: &mut Frame, area: Rect) {
    let block = Block::bordered().title(" viewfinder ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let middle = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(1),
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "● LIVE",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )))
        .centered(),
        middle,
    );
}

fn status_line(state: &SessionState) -> Line<'static> {
    if state.access_pending() {
        return Line::from("requesting camera access…");
    }
    match state.mode_kind() {
        ModeKind::LiveCapture => {
            if !state.status_message().is_empty() {
                Line::from(state.status_message().to_string())
            } else if let Some(error) = state.last_error() {
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::LightRed),
                ))
            } else {
                Line::from("'space' capture | 'x' cancel | 'q' quit")
            }
        }
        ModeKind::Browsing => Line::from("'c' camera | 'q' quit"),
    }
}

fn draw_label_prompt(f: &mut Frame, ui: &UiState, area: Rect) {
    let dialog = centered_rect(area, 50, 6);
    f.render_widget(Clear, dialog);
    let text = vec![
        Line::from(constants::LABEL_FIELD_LABEL),
        Line::from(Span::styled(
            format!("{}_", ui.draft),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from("[enter] save  [esc] dismiss"),
    ];
    f.render_widget(
        Paragraph::new(text).block(Block::bordered().title(format!(
            " {} ",
            constants::LABEL_PROMPT_TITLE
        ))),
        dialog,
    );
}

fn draw_alert(f: &mut Frame, alert: &Alert, area: Rect) {
    let dialog = centered_rect(area, 40, 5);
    f.render_widget(Clear, dialog);
    let text = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from("[enter] ok"),
    ];
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(format!(" {} ", alert.title))
                    .border_style(Style::default().fg(Color::Red)),
            ),
        dialog,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Widget that renders a still using half-block characters
struct PhotoWidget<'a> {
    image: Option<&'a image::RgbImage>,
}

impl Widget for &PhotoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(img) = self.image else {
            let msg = "Photo unavailable";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, Style::default());
            }
            return;
        };
        if img.width() == 0 || img.height() == 0 || area.width == 0 || area.height == 0 {
            return;
        }

        // Each terminal cell displays 2 vertical pixels
        let img_aspect = img.width() as f64 / img.height() as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > img_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * img_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / img_aspect;
            (w as u16, (h / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = img.width() as f64 / display_width as f64;
        let y_scale = img.height() as f64 / (display_height * 2) as f64;

        // Upper half (▀) colored with fg, lower half with bg
        for ty in 0..display_height {
            for tx in 0..display_width {
                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top = sample_pixel(img, src_x, src_y_top);
                let bottom = sample_pixel(img, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

fn sample_pixel(img: &image::RgbImage, x: u32, y: u32) -> Color {
    let x = x.min(img.width() - 1);
    let y = y.min(img.height() - 1);
    let [r, g, b] = img.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar {
    line: Line<'static>,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        buf.set_style(area, style);
        buf.set_line(area.x, area.y, &self.line, area.width);
    }
}
