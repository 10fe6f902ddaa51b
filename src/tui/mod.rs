//! Ratatui-based terminal dashboard.
//!
//! Renders the selected issuer's score card, feature importance, risk factors,
//! score trend and the events feed, and drives the controller's scheduled
//! tasks from the input loop.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tracing::info;

use crate::app::{DashboardController, DashboardTask};
use crate::config::DashboardConfig;
use crate::domain::{
    AlertKind, HistoryPoint, Impact, Issuer, Notification, NotificationLevel, Period, Rating, RiskLevel,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::ScoreTrendChart;

/// How long the input loop blocks before servicing scheduled tasks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Start the dashboard.
pub fn run(config: DashboardConfig, out_dir: PathBuf) -> Result<(), AppError> {
    // Build the controller before touching the terminal so config errors print normally.
    let mut app = App::new(config, out_dir, Instant::now())?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let result = app.event_loop(&mut terminal);
    app.controller.teardown();
    result
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Threshold being typed after pressing `a`.
#[derive(Debug, Clone, PartialEq)]
struct AlertInput {
    kind: AlertKind,
    threshold: String,
}

struct App {
    controller: DashboardController,
    out_dir: PathBuf,
    /// Trend currently on screen; regenerated on selection change and refresh.
    history: Vec<HistoryPoint>,
    status: Option<Notification>,
    alert: Option<AlertInput>,
}

impl App {
    fn new(config: DashboardConfig, out_dir: PathBuf, now: Instant) -> Result<Self, AppError> {
        let controller = DashboardController::new(config, now)?;
        let mut app = Self {
            controller,
            out_dir,
            history: Vec::new(),
            status: None,
            alert: None,
        };
        app.reload_history();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.service_timers(Instant::now()) {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(POLL_INTERVAL).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key, Instant::now()) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Fire due tasks and collect notifications. Returns true if anything changed.
    fn service_timers(&mut self, now: Instant) -> bool {
        let ran = self.controller.advance(now);
        if ran.contains(&DashboardTask::RefreshComplete) {
            self.reload_history();
        }
        let pulled = self.pull_notifications();
        !ran.is_empty() || pulled
    }

    fn pull_notifications(&mut self) -> bool {
        match self.controller.take_notifications().pop() {
            Some(latest) => {
                self.status = Some(latest);
                true
            }
            None => false,
        }
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if self.alert.is_some() {
            self.handle_alert_key(key.code);
            self.pull_notifications();
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.start_refresh(now),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('a') => {
                self.alert = Some(AlertInput {
                    kind: AlertKind::Above,
                    threshold: String::new(),
                });
            }
            KeyCode::Left => self.cycle(-1),
            KeyCode::Right => self.cycle(1),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.controller.select_period(Period::ALL[idx]);
                self.reload_history();
            }
            _ => {}
        }
        self.pull_notifications();
        false
    }

    fn handle_alert_key(&mut self, code: KeyCode) {
        let Some(input) = self.alert.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.alert = None;
            }
            KeyCode::Tab => {
                input.kind = input.kind.toggle();
            }
            KeyCode::Backspace => {
                input.threshold.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                input.threshold.push(c);
            }
            KeyCode::Enter => {
                let kind = input.kind;
                let parsed = crate::cli::parse_threshold(&input.threshold);
                match parsed {
                    Ok(threshold) => {
                        self.controller.submit_alert(kind, threshold);
                        self.alert = None;
                    }
                    Err(msg) => {
                        self.controller
                            .notify(Notification::error(format!("Invalid threshold: {msg}")));
                    }
                }
            }
            _ => {}
        }
    }

    fn start_refresh(&mut self, now: Instant) {
        if self.controller.is_loading() {
            return;
        }
        self.controller.refresh(now);
        self.controller.notify(Notification::info("Refreshing data..."));
    }

    fn export(&mut self) {
        match crate::app::export_selected(&self.controller, &self.out_dir) {
            Ok(path) => {
                info!(path = %path.display(), "export from dashboard");
                self.controller.notify(Notification::success(format!(
                    "Report exported successfully! {}",
                    path.display()
                )));
            }
            Err(err) => self.controller.notify(Notification::error(err.to_string())),
        }
    }

    fn cycle(&mut self, step: isize) {
        if let Err(err) = self.controller.cycle_issuer(step) {
            self.controller.notify(Notification::error(err.to_string()));
            return;
        }
        self.reload_history();
    }

    fn reload_history(&mut self) {
        match self.controller.history() {
            Ok(points) => self.history = points,
            Err(err) => self.controller.notify(Notification::error(err.to_string())),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("pulse", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
        ];
        for issuer in self.controller.issuers() {
            let style = if issuer.code == self.controller.selected_issuer() {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", issuer.code), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(
                "| period: {} | updated {}",
                self.controller.selected_period(),
                self.controller.last_updated().format("%H:%M:%S")
            ),
            Style::default().fg(Color::Gray),
        ));
        if self.controller.is_loading() {
            spans.push(Span::styled(
                "  refreshing…",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(13), Constraint::Min(8)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(28),
                Constraint::Percentage(40),
                Constraint::Percentage(32),
            ])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(rows[1]);

        match self.controller.current() {
            Ok(issuer) => {
                self.draw_score_card(frame, top[0], issuer);
                self.draw_features(frame, top[1], issuer);
            }
            Err(err) => {
                let msg = Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red));
                frame.render_widget(msg, rows[0]);
            }
        }
        self.draw_events(frame, top[2]);
        self.draw_chart(frame, bottom[0]);
        self.draw_metrics(frame, bottom[1]);
    }

    fn draw_score_card(&self, frame: &mut ratatui::Frame<'_>, area: Rect, issuer: &Issuer) {
        let change_style = if issuer.change > 0.0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };

        let mut lines = vec![
            Line::from(Span::styled(issuer.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(vec![
                Span::raw("Rating "),
                Span::styled(
                    issuer.rating.as_str(),
                    Style::default().fg(rating_color(issuer.rating)).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("   Score {:.0}", issuer.current_score)),
            ]),
            Line::from(Span::styled(
                crate::report::format_change_badge(issuer.change),
                change_style,
            )),
            Line::from(""),
            Line::from(Span::styled("Risk factors", Style::default().fg(Color::Gray))),
        ];
        for risk in &issuer.risk_factors {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", risk.name)),
                Span::styled(
                    risk.level.as_str().to_uppercase(),
                    Style::default().fg(risk_color(risk.level)),
                ),
            ]));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title(format!("Score: {}", issuer.code)).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_features(&self, frame: &mut ratatui::Frame<'_>, area: Rect, issuer: &Issuer) {
        let block = Block::default().title("Feature importance").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = issuer.features.by_weight();
        let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
        let bar_width = (inner.width as usize).saturating_sub(name_width + 9).max(1);

        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(name, f)| {
                let filled = ((f.weight.clamp(0.0, 1.0) * bar_width as f64).round() as usize).min(bar_width);
                Line::from(vec![
                    Span::raw(format!("{name:<name_width$} ")),
                    Span::styled("█".repeat(filled), Style::default().fg(impact_color(f.impact))),
                    Span::raw(" ".repeat(bar_width - filled)),
                    Span::styled(format!(" {:>5.1}%", f.weight * 100.0), Style::default().fg(Color::Gray)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_events(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .controller
            .events()
            .all()
            .map(|e| {
                ListItem::new(Text::from(vec![
                    Line::from(vec![
                        Span::styled(format!("{} ", e.time), Style::default().fg(Color::DarkGray)),
                        Span::styled(e.title.clone(), Style::default().fg(impact_color(e.impact))),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", e.description),
                        Style::default().fg(Color::Gray),
                    )),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("Events ({})", self.controller.events().len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Score trend ({})", self.controller.selected_period()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.history.is_empty() {
            let msg = Paragraph::new("No history").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let (points, labels, y_bounds) = chart_series(&self.history);
        let widget = ScoreTrendChart {
            points: &points,
            labels: &labels,
            y_bounds,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_metrics(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let m = self.controller.metrics();
        let lines = vec![
            Line::from(format!("Accuracy   {:>5.1}%", m.accuracy)),
            Line::from(format!("Precision  {:>5.1}%", m.precision)),
            Line::from(format!("Recall     {:>5.1}%", m.recall)),
            Line::from(format!("Latency    {:>5.0}ms", m.latency_ms)),
        ];
        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Model").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        if let Some(input) = &self.alert {
            spans.push(Span::styled(
                format!("Alert: score {} {}▏", input.kind, input.threshold),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                "  Tab above/below  Enter set  Esc cancel",
                Style::default().fg(Color::Gray),
            ));
        } else {
            spans.push(Span::styled(
                "←/→ issuer  1-4 period  r refresh  e export  a alert  q quit",
                Style::default().fg(Color::Gray),
            ));
        }
        if let Some(status) = &self.status {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                status.message.clone(),
                Style::default().fg(level_color(status.level)),
            ));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart points, x-axis labels and padded y bounds.
fn chart_series(history: &[HistoryPoint]) -> (Vec<(f64, f64)>, Vec<String>, [f64; 2]) {
    let points: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.score as f64))
        .collect();
    let labels = history.iter().map(|p| p.label.clone()).collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &points {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = crate::domain::SCORE_MIN;
        y_max = crate::domain::SCORE_MAX;
    }
    let pad = ((y_max - y_min).abs() * 0.1).max(5.0);
    (points, labels, [y_min - pad, y_max + pad])
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Aaa | Rating::Aa => Color::Green,
        Rating::A | Rating::Bbb => Color::Yellow,
        Rating::Bb | Rating::B => Color::Red,
    }
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn impact_color(impact: Impact) -> Color {
    match impact {
        Impact::Positive => Color::Green,
        Impact::Negative => Color::Red,
        Impact::Neutral => Color::Gray,
    }
}

fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Error => Color::Red,
    }
}
