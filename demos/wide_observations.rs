use frost_events::{Frost, FrostConfig, FrostError, ReferenceTime};
use chrono::NaiveDate;
use std::env;

#[tokio::main]
async fn main() -> Result<(), FrostError> {
    configure_polars_display();
    let config = FrostConfig::from_env()?.with_default_cache_dir()?;
    let client = Frost::with_config(config).await?;

    let first = NaiveDate::from_ymd_opt(2023, 8, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2023, 8, 14).unwrap();

    let wide = client
        .wide_observations()
        .sources("SN18700")
        .elements("max(wind_speed_of_gust P1D),mean(wind_speed P1D)")
        .reference_time(ReferenceTime::days(first, last).unwrap())
        .call()
        .await?
        .collect()?;

    println!("{}", wide);
    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
