//! Hurricane event detection over daily wind-speed series.

pub mod daily_grid;
pub mod detector;
pub mod error;
pub mod frame;
