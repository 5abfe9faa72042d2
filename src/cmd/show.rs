use crate::calc::grid::{build_grid, DayCell, MonthGrid};
use crate::calc::month::{MonthCursor, WEEKDAY_ABBREVS};
use crate::data::persistence::{encode, Format};
use crate::data::{AvailabilityModel, Tier};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

pub fn run(month: Option<&str>, json: bool) -> Result<()> {
    let availability = AvailabilityModel::load_checked()?;
    let today = Local::now().date_naive();
    let cursor = match month {
        Some(m) => parse_month(m)?,
        None => MonthCursor::containing(today),
    };
    let grid = build_grid(cursor, today, &availability, None);

    let mut out = std::io::stdout();
    if json {
        use std::io::Write;
        writeln!(out, "{}", encode(&grid, Format::Json)?)?;
        Ok(())
    } else {
        write_month(&grid, &mut out)
    }
}

/// Parses `YYYY-MM` into the month it names.
pub(crate) fn parse_month(raw: &str) -> Result<MonthCursor> {
    let first = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{raw}', expected YYYY-MM"))?;
    Ok(MonthCursor::containing(first))
}

pub(crate) fn write_month<W: std::io::Write>(grid: &MonthGrid, out: &mut W) -> Result<()> {
    writeln!(out, "{:^27}", grid.label)?;
    let header: Vec<String> = WEEKDAY_ABBREVS.iter().map(|d| format!("{d:<3}")).collect();
    writeln!(out, "{}", header.join(" ").trim_end())?;
    for week in grid.weeks() {
        let row: Vec<String> = week.iter().map(cell_text).collect();
        writeln!(out, "{}", row.join(" ").trim_end())?;
    }
    writeln!(out, "---")?;
    writeln!(out, "+ available  ~ limited  . past")?;
    Ok(())
}

fn cell_text(cell: &DayCell) -> String {
    match cell {
        DayCell::Placeholder => "   ".to_string(),
        DayCell::Day { day, .. } => format!("{day:2}{}", marker(cell)),
    }
}

fn marker(cell: &DayCell) -> char {
    match cell {
        DayCell::Day { is_past: true, .. } => '.',
        DayCell::Day {
            tier: Some(Tier::Available),
            ..
        } => '+',
        DayCell::Day {
            tier: Some(Tier::Limited),
            ..
        } => '~',
        _ => ' ',
    }
}
