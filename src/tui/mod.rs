//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel with the two report selectors (mode and,
//! when visible, year) and renders the resulting charts in a 2×2 grid. Every
//! selector change triggers one full view recomputation; the dataset itself
//! is fetched exactly once before the terminal is set up.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::domain::{ReportMode, ReportSelection, SalesTable, YEAR_MAX, YEAR_MIN};
use crate::error::AppError;
use crate::view::ViewModel;

mod chart;

use chart::ChartWidget;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    // Load before touching the terminal so a dataset failure prints as a
    // normal diagnostic. The table is never refreshed afterwards.
    println!("Loading dataset...");
    let table = crate::data::load_table(args.data.data_file.as_deref(), args.data.data_url.as_deref())?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(table);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    table: SalesTable,
    mode: Option<ReportMode>,
    year: Option<i32>,
    year_input: String,
    selected_field: usize,
    editing_year: bool,
    status: String,
    view: ViewModel,
}

impl App {
    fn new(table: SalesTable) -> Self {
        let view = crate::view::render(&table, &ReportSelection::default());
        Self {
            table,
            mode: None,
            year: None,
            year_input: String::new(),
            selected_field: 0,
            editing_year: false,
            status: "Select a report type (←/→).".to_string(),
            view,
        }
    }

    fn selection(&self) -> ReportSelection {
        ReportSelection::new(self.mode, self.year)
    }

    /// Number of visible selector fields (Rule A hides the year field).
    fn field_count(&self) -> usize {
        if self.view.year_selector_hidden { 1 } else { 2 }
    }

    fn recompute(&mut self) {
        self.view = crate::view::render(&self.table, &self.selection());
        if self.selected_field >= self.field_count() {
            self.selected_field = 0;
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_year {
            self.handle_year_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < self.field_count() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == 1 {
                    self.editing_year = true;
                    self.year_input.clear();
                    self.status = format!(
                        "Editing year ({YEAR_MIN}-{YEAR_MAX}). Enter to apply, empty clears, Esc cancels."
                    );
                }
            }
            KeyCode::Char('d') => {
                match crate::debug::write_bundle(&self.table, &self.selection()) {
                    Ok(path) => {
                        self.status = format!("Wrote debug bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Debug write failed: {err}");
                    }
                }
            }
            _ => {}
        }

        false
    }

    fn handle_year_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_year = false;
                self.status = "Year edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_year = false;
                self.apply_year_input();
            }
            KeyCode::Backspace => {
                self.year_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() && self.year_input.len() < 4 {
                    self.year_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_year_input(&mut self) {
        let trimmed = self.year_input.trim();
        if trimmed.is_empty() {
            self.year = None;
            self.recompute();
            self.status = "Year cleared.".to_string();
            return;
        }

        match trimmed.parse::<i32>() {
            Ok(year) if (YEAR_MIN..=YEAR_MAX).contains(&year) => {
                self.year = Some(year);
                self.recompute();
                self.status = format!("year: {year}");
            }
            Ok(year) => {
                self.status = format!("Year {year} is outside {YEAR_MIN}-{YEAR_MAX}.");
            }
            Err(e) => {
                self.status = format!("Invalid year '{trimmed}': {e}");
            }
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                let mode = match self.mode {
                    Some(m) => {
                        if delta >= 0 {
                            m.next()
                        } else {
                            m.prev()
                        }
                    }
                    None if delta >= 0 => ReportMode::Yearly,
                    None => ReportMode::Recession,
                };
                self.mode = Some(mode);
                self.recompute();
                self.status = format!("report: {}", mode.display_name());
            }
            1 => {
                let year = match self.year {
                    Some(y) => (y + delta.signum()).clamp(YEAR_MIN, YEAR_MAX),
                    // First touch lands on the most recent year.
                    None => YEAR_MAX,
                };
                self.year = Some(year);
                self.recompute();
                self.status = format!("year: {year}");
            }
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let stats = self.table.stats();

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("autostats", Style::default().fg(Color::Cyan)),
            Span::raw(" — Automobile Sales Statistics Dashboard"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "rows: {} | years: {}-{} | recession rows: {} | report: {} | year: {}",
                stats.n_rows,
                stats.year_min,
                stats.year_max,
                stats.recession_rows,
                self.mode.map(|m| m.display_name()).unwrap_or("-"),
                self.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_charts(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        if self.view.charts.is_empty() {
            let block = Block::default().title("Charts").borders(Borders::ALL);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Clear, inner);

            let hint = if matches!(self.mode, Some(ReportMode::Yearly)) {
                "Pick a year to render the yearly statistics."
            } else {
                "Select a report type to render charts."
            };
            let msg = Paragraph::new(hint).style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        // Two rows of two, in chart order.
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let mut cells = Vec::with_capacity(4);
        for row in rows.iter() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            cells.extend(cols.iter().copied());
        }

        for (spec, cell) in self.view.charts.iter().zip(cells) {
            frame.render_widget(ChartWidget { spec }, cell);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        items.push(ListItem::new(format!(
            "Report: {}",
            self.mode
                .map(|m| m.display_name())
                .unwrap_or("Select a report type")
        )));
        if !self.view.year_selector_hidden {
            let year_label = if self.editing_year {
                format!("Year: {}_", self.year_input)
            } else {
                format!(
                    "Year: {}",
                    self.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
                )
            };
            items.push(ListItem::new(year_label));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_year {
            let hint = Paragraph::new("Editing year…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit year  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
