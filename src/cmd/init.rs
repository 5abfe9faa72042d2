use crate::data::persistence::get_data_dir;
use crate::data::settings::ConfigFile;
use crate::data::{AvailabilityModel, Persistable};
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    log::info!("initialized data files in {}", dir.display());
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    ConfigFile::default().save_to(dir)?;
    AvailabilityModel::default().save_to(dir)?;
    Ok(())
}
