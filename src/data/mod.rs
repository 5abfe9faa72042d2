pub mod availability;
pub mod persistence;
pub mod settings;

pub use availability::{Availability, AvailabilityModel, Tier};
pub use persistence::Persistable;
pub use settings::AppSettings;
