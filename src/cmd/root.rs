use crate::data::{AppSettings, AvailabilityModel};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let availability = AvailabilityModel::load_checked()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(availability, settings, today);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result?;

    // The picked date goes to stdout for whatever booking step comes next.
    match app.selected_text() {
        Some(date) => println!("Selected: {date}"),
        None => println!("No date selected"),
    }
    Ok(())
}
