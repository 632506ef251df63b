pub mod into_utc_trait;
pub mod reference_time;
