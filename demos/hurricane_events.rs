use frost_events::{Frost, FrostError, Year, ReferenceTime};
use std::env;

// Usage: cargo run --example hurricane_events -- SN18700 1990 2020
#[tokio::main]
async fn main() -> Result<(), FrostError> {
    let mut args = env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "SN18700".to_string());
    let first = args.next().and_then(|y| y.parse().ok()).unwrap_or(2000);
    let last = args.next().and_then(|y| y.parse().ok()).unwrap_or(2020);

    let reference_time = ReferenceTime::years(Year(first), Year(last))
        .unwrap_or_else(|| ReferenceTime::from(Year(last)));

    let client = Frost::new().await?;
    let events = client
        .hurricane_events()
        .source(source.as_str())
        .element("max(wind_speed_of_gust P1D)")
        .reference_time(reference_time)
        .call()
        .await?;

    println!("Hurricane events at {} ({}-{}):\n{}", source, first, last, events);
    Ok(())
}
