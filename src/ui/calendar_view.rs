use crate::calc::grid::DayCell;
use crate::calc::month::WEEKDAY_ABBREVS;
use crate::data::{AppSettings, Availability, Tier};
use crate::ui::controller::{CalendarController, OutputField, Phase, RenderedGrid, TextField};
use crate::ui::effects::{Motion, Pulse};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::{Duration, Instant};

// Grid indent in columns; an entering month is drawn this far off to one side.
const GRID_INDENT: usize = 2;

const FRAME_POLL: Duration = Duration::from_millis(16);

pub struct App<A> {
    controller: CalendarController<A, TextField>,
    settings: AppSettings,
    /// Day-of-month under the keyboard cursor.
    focus_day: u32,
}

impl<A: Availability> App<A> {
    pub fn new(availability: A, settings: AppSettings, today: NaiveDate) -> Self {
        let controller =
            CalendarController::new(availability, TextField::default(), today, settings.clone());
        let mut app = App {
            controller,
            settings,
            focus_day: 1,
        };
        app.reset_focus();
        app
    }

    /// The current output field value, or None when nothing is picked.
    pub fn selected_text(&self) -> Option<&str> {
        let value = self.controller.output().value();
        (!value.is_empty()).then_some(value)
    }

    /// Refreshes "today" and fires due cosmetic timers.
    pub fn tick(&mut self, today: NaiveDate, now: Instant) {
        self.controller.refresh_today(today);
        self.controller.tick(now);
    }

    fn days_shown(&self) -> u32 {
        self.controller.state().displayed.days()
    }

    fn focus_index(&self) -> usize {
        let grid = self.controller.grid();
        grid.cells
            .iter()
            .position(|rc| rc.cell.day() == Some(self.focus_day))
            .unwrap_or(0)
    }

    /// Focus the selected day if shown, else today if shown, else the 1st.
    fn reset_focus(&mut self) {
        let grid = self.controller.grid();
        let selected = grid
            .cells
            .iter()
            .find(|rc| rc.cell.is_selected())
            .and_then(|rc| rc.cell.day());
        let today = grid
            .cells
            .iter()
            .find(|rc| matches!(rc.cell, DayCell::Day { is_today: true, .. }))
            .and_then(|rc| rc.cell.day());
        self.focus_day = selected.or(today).unwrap_or(1);
    }

    fn move_focus(&mut self, delta: i64) {
        let last = i64::from(self.days_shown());
        let next = (i64::from(self.focus_day) + delta).clamp(1, last);
        self.focus_day = u32::try_from(next).unwrap_or(1);
    }

    fn navigate(&mut self, direction: i32) {
        self.controller.navigate_month(direction, Instant::now());
        self.reset_focus();
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Left | KeyCode::Char('h') => self.move_focus(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_focus(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(7),
            KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => self.navigate(1),
            KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => self.navigate(-1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let index = self.focus_index();
                if !self.controller.press(index, Instant::now()) {
                    log::debug!("day {} is not selectable", self.focus_day);
                }
            }
            KeyCode::Char('c') => {
                self.controller.clear_selection();
                log::info!("selection cleared");
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // label + weekday header + 6 weeks + borders
                Constraint::Length(3),  // output field
                Constraint::Length(if self.settings.show_legend { 1 } else { 0 }),
                Constraint::Min(2), // key help
            ])
            .split(f.area());

        self.render_grid(f, chunks[0]);
        self.render_field(f, chunks[1]);
        if self.settings.show_legend {
            f.render_widget(Paragraph::new(legend()), chunks[2]);
        }
        f.render_widget(
            Paragraph::new(vec![
                Line::from("arrows/hjkl move  enter/space pick  n/p month  c clear  q quit"),
            ])
            .style(Style::default().add_modifier(Modifier::DIM)),
            chunks[3],
        );
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let grid = self.controller.grid();
        let focus = self.focus_index();
        let motion = grid.motion();
        let pad = " ".repeat(grid_indent(motion));

        let mut lines = vec![Line::from(format!("{pad}{}", WEEKDAY_ABBREVS.join(" ")))];
        lines.extend(week_lines(grid, focus, &pad));

        let mut widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", grid.label),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );
        if self.controller.phase() == Phase::Transitioning {
            widget = widget.style(Style::default().add_modifier(Modifier::DIM));
        }
        f.render_widget(widget, area);
    }

    fn render_field(&self, f: &mut Frame, area: Rect) {
        let text = self.selected_text().unwrap_or("(none)");
        let widget = Paragraph::new(Line::from(vec![
            Span::raw("Selected date: "),
            Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}

fn week_lines(grid: &RenderedGrid, focus: usize, pad: &str) -> Vec<Line<'static>> {
    grid.cells
        .chunks(7)
        .enumerate()
        .map(|(week, row)| {
            let mut spans = vec![Span::raw(pad.to_string())];
            for (col, rc) in row.iter().enumerate() {
                let index = week * 7 + col;
                let text = match rc.cell.day() {
                    Some(day) => format!("{day:2}"),
                    None => "  ".to_string(),
                };
                spans.push(Span::styled(text, day_style(&rc.cell, rc.pulse(), index == focus)));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect()
}

fn legend() -> Line<'static> {
    Line::from(vec![
        Span::styled("■ available  ", Style::default().fg(Color::Green)),
        Span::styled("■ limited  ", Style::default().fg(Color::Yellow)),
        Span::raw("■ unavailable  "),
        Span::styled("past", Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)),
    ])
}

/// Columns of left padding for the grid in a given motion state.
pub(crate) fn grid_indent(motion: Motion) -> usize {
    match motion {
        Motion::Entering { from_right: true } => GRID_INDENT * 2,
        Motion::Entering { from_right: false } => 0,
        Motion::Settling | Motion::Settled => GRID_INDENT,
    }
}

/// Determines the ratatui `Style` for a grid cell.
/// Unavailable and untagged future days share the default look.
pub(crate) fn day_style(cell: &DayCell, pulse: Pulse, focused: bool) -> Style {
    let DayCell::Day {
        tier,
        is_today,
        is_past,
        is_selected,
        ..
    } = *cell
    else {
        return Style::default();
    };

    let mut style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_past {
        Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        match tier {
            Some(Tier::Available) => Style::default().fg(Color::Green),
            Some(Tier::Limited) => Style::default().fg(Color::Yellow),
            Some(Tier::Unavailable) | None => Style::default(),
        }
    };
    if is_today {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if pulse == Pulse::Raised {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if focused {
        style = style.bg(Color::Cyan);
    }
    style
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app<A: Availability>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<A>,
) -> Result<()> {
    loop {
        app.tick(Local::now().date_naive(), Instant::now());
        terminal.draw(|f| app.render(f))?;
        if event::poll(FRAME_POLL)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
