use crate::calc::grid::{build_grid, DayCell, SelectedDate};
use crate::calc::month::MonthCursor;
use crate::data::{AppSettings, Availability};
use crate::ui::effects::{self, Motion, Pulse, Scheduler, TimerId, Visual};
use chrono::NaiveDate;
use std::rc::Rc;
use std::time::Instant;

/// The external text holder the chosen date is written to.
pub trait OutputField {
    fn set(&mut self, value: String);
    fn value(&self) -> &str;
    fn clear(&mut self) {
        self.set(String::new());
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl OutputField for TextField {
    fn set(&mut self, value: String) {
        self.value = value;
    }

    fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub displayed: MonthCursor,
    pub selected: Option<SelectedDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
}

/// A rendered cell plus its transient visual state. The visual is owned here;
/// timers only ever see a weak handle to it.
pub struct RenderedCell {
    pub cell: DayCell,
    pulse: Visual<Pulse>,
}

impl RenderedCell {
    pub fn pulse(&self) -> Pulse {
        self.pulse.get()
    }

}

pub struct RenderedGrid {
    pub label: String,
    pub year: i32,
    pub month0: u32,
    pub cells: Vec<RenderedCell>,
    motion: Visual<Motion>,
}

impl RenderedGrid {
    pub fn motion(&self) -> Motion {
        self.motion.get()
    }

    /// The date the trigger at `index` selects, if that cell has one.
    pub fn trigger(&self, index: usize) -> Option<SelectedDate> {
        let cell = &self.cells.get(index)?.cell;
        if !cell.is_selectable() {
            return None;
        }
        Some(SelectedDate::new(cell.day()?, self.month0, self.year))
    }

    pub fn shows(&self, month0: u32, year: i32) -> bool {
        self.month0 == month0 && self.year == year
    }
}

/// Owns the calendar state, renders month grids and handles selection and
/// navigation.
pub struct CalendarController<A, O> {
    availability: A,
    output: O,
    state: CalendarState,
    today: NaiveDate,
    settings: AppSettings,
    scheduler: Scheduler,
    rendered: RenderedGrid,
    transition: Option<[TimerId; 2]>,
}

impl<A: Availability, O: OutputField> CalendarController<A, O> {
    pub fn new(availability: A, output: O, today: NaiveDate, settings: AppSettings) -> Self {
        let state = CalendarState {
            displayed: MonthCursor::containing(today),
            selected: None,
        };
        let rendered = render_grid(&availability, &state, today);
        CalendarController {
            availability,
            output,
            state,
            today,
            settings,
            scheduler: Scheduler::new(),
            rendered,
            transition: None,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn grid(&self) -> &RenderedGrid {
        &self.rendered
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn phase(&self) -> Phase {
        match self.rendered.motion() {
            Motion::Settled => Phase::Idle,
            _ => Phase::Transitioning,
        }
    }

    /// Replaces the grid wholesale. Pending effects on the old grid go stale.
    pub fn render(&mut self) {
        self.rendered = render_grid(&self.availability, &self.state, self.today);
    }

    /// The per-cell trigger. Placeholders and past days have none.
    pub fn press(&mut self, index: usize, now: Instant) -> bool {
        match self.rendered.trigger(index) {
            Some(date) => {
                self.select_date(date.day, date.month0, date.year, now);
                true
            }
            None => false,
        }
    }

    pub fn select_date(&mut self, day: u32, month0: u32, year: i32, now: Instant) {
        let date = SelectedDate::new(day, month0, year);
        let shown = self.rendered.shows(month0, year);
        for rc in &mut self.rendered.cells {
            let hit = shown && rc.cell.day() == Some(day);
            rc.cell.set_selected(hit);
            if hit {
                effects::pulse(&mut self.scheduler, &rc.pulse, now, self.settings.pulse());
            }
        }
        self.state.selected = Some(date);
        self.output.set(date.field_text());
        log::debug!("selected {}", date.field_text());
    }

    /// Moves the displayed month by `direction` and re-renders. The selection
    /// survives; it is only highlighted when its month is shown again.
    pub fn navigate_month(&mut self, direction: i32, now: Instant) {
        self.state.displayed = self.state.displayed.step(direction);
        self.render();
        // Last write wins: the previous slide is abandoned.
        for id in self.transition.take().into_iter().flatten() {
            self.scheduler.cancel(id);
        }
        self.transition = Some(effects::slide_in(
            &mut self.scheduler,
            &self.rendered.motion,
            direction > 0,
            now,
            self.settings.transition_delay(),
            self.settings.transition(),
        ));
        log::debug!("showing {}", self.rendered.label);
    }

    /// Called by the booking form once it has consumed the date. Idempotent.
    pub fn clear_selection(&mut self) {
        self.state.selected = None;
        self.output.clear();
        for rc in &mut self.rendered.cells {
            rc.cell.set_selected(false);
        }
    }

    /// Re-renders when the calendar day rolls over so past/today stay right.
    pub fn refresh_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.render();
        }
    }

    /// Fires due cosmetic timers.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.scheduler.run_due(now)
    }
}

fn render_grid<A: Availability>(
    availability: &A,
    state: &CalendarState,
    today: NaiveDate,
) -> RenderedGrid {
    let grid = build_grid(state.displayed, today, availability, state.selected);
    let cells = grid
        .cells
        .into_iter()
        .map(|cell| RenderedCell {
            cell,
            pulse: Rc::default(),
        })
        .collect();
    RenderedGrid {
        label: grid.label,
        year: grid.year,
        month0: grid.month0,
        cells,
        motion: Rc::default(),
    }
}
