pub mod grid;
pub mod month;
