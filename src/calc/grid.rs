use crate::calc::month::{month_abbrev, MonthCursor};
use crate::data::{Availability, Tier};
use chrono::NaiveDate;
use serde::Serialize;

/// A chosen (day, month, year). `month0` is zero-based.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedDate {
    pub day: u32,
    pub month0: u32,
    pub year: i32,
}

impl SelectedDate {
    pub fn new(day: u32, month0: u32, year: i32) -> Self {
        SelectedDate { day, month0, year }
    }

    /// `"<AbbreviatedMonth> <day>, <year>"`, the value written to the output field.
    pub fn field_text(&self) -> String {
        format!("{} {}, {}", month_abbrev(self.month0), self.day, self.year)
    }

    fn matches(&self, cursor: &MonthCursor, day: u32) -> bool {
        self.year == cursor.year() && self.month0 == cursor.month0() && self.day == day
    }
}

/// One grid unit: a leading blank or a day of the displayed month.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DayCell {
    Placeholder,
    Day {
        day: u32,
        /// `None` for past days, which never show availability.
        tier: Option<Tier>,
        is_today: bool,
        is_past: bool,
        is_selected: bool,
    },
}

impl DayCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            DayCell::Day { day, .. } => Some(*day),
            DayCell::Placeholder => None,
        }
    }

    /// Only non-past days get a selection trigger. Tier plays no part.
    pub fn is_selectable(&self) -> bool {
        matches!(self, DayCell::Day { is_past: false, .. })
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, DayCell::Day { is_selected: true, .. })
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        if let DayCell::Day { is_selected, .. } = self {
            *is_selected = selected;
        }
    }
}

/// A fully built month: label plus leading placeholders and one cell per day.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub label: String,
    pub year: i32,
    pub month0: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Seven-column rows; the last row is padded with trailing placeholders.
    pub fn weeks(&self) -> Vec<Vec<DayCell>> {
        self.cells
            .chunks(7)
            .map(|chunk| {
                let mut row = chunk.to_vec();
                row.resize(7, DayCell::Placeholder);
                row
            })
            .collect()
    }
}

/// Builds the grid for `cursor`. Past and today are judged against `today` by
/// calendar day; selection highlighting comes from `selected`.
pub fn build_grid<A: Availability + ?Sized>(
    cursor: MonthCursor,
    today: NaiveDate,
    availability: &A,
    selected: Option<SelectedDate>,
) -> MonthGrid {
    let leading = cursor.first_weekday() as usize;
    let days = cursor.days();
    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.resize(leading, DayCell::Placeholder);

    for day in 1..=days {
        let Some(date) = cursor.date(day) else {
            continue;
        };
        let is_past = date < today;
        let tier = (!is_past).then(|| availability.classify(day));
        cells.push(DayCell::Day {
            day,
            tier,
            is_today: date == today,
            is_past,
            is_selected: selected.is_some_and(|s| s.matches(&cursor, day)),
        });
    }

    MonthGrid {
        label: cursor.label(),
        year: cursor.year(),
        month0: cursor.month0(),
        cells,
    }
}
