//! demos/explore_sensor.rs
//!
//! Fetches two weeks of readings from one sensor.community device, then filters,
//! smooths and correlates them.
//!
//! To run this demo:
//! cargo run --example explore_sensor

use airquality::{pearson, smooth, AirQuality, DateRange, HourRange, SensorId, SensorRequest};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = AirQuality::with_defaults()?;

    // 1. Fetch every day in the range; days the archive lacks are skipped.
    let request = SensorRequest::parse("2022-06-10", "2022-06-24", SensorId(57925))?;
    let readings = client.readings(&request).await?;
    println!("Fetched {} readings", readings.height()?);

    // 2. Morning PM10 between the 18th and the 20th.
    let mornings = readings.filter(
        &DateRange::new("2022-06-18", "2022-06-20")?,
        &HourRange::new(6, 10)?,
    );
    println!("Morning PM10: {:?}", mornings.pm10()?);

    // 3. Moving average over one day.
    let day = readings
        .filter_by_date(&DateRange::new("2022-06-18", "2022-06-18")?)
        .with_moving_average(20)?;
    println!("{}", day.collect()?);

    // 4. Correlation of the smoothed series up to the 18th.
    let until = readings.filter_by_date(&DateRange::new("", "2022-06-18")?);
    let pm10 = smooth(&until.pm10()?, 10)?;
    let pm2_5 = smooth(&until.pm2_5()?, 10)?;
    match pearson(&pm10, &pm2_5)? {
        Some(r) => println!("PM10 / PM2.5 correlation R = {:.3}", r),
        None => println!("Not enough data for a correlation"),
    }

    // 5. Latest APPA bulletin for Trento.
    let bulletin = client.appa().call().await?;
    for pollutant in bulletin.pollutants()? {
        println!("{}:\n{}", pollutant, bulletin.for_pollutant(&pollutant).collect()?);
    }

    Ok(())
}
