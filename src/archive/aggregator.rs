//! Walks a date range, fetching and concatenating one archive file per day.

use crate::archive::error::ArchiveError;
use crate::archive::fetcher::{DailyFetch, DailyFetcher};
use crate::archive::locator::ArchiveLocator;
use crate::archive::normalize::{derive_calendar_columns, normalize_day};
use crate::types::reading_frame::ReadingFrame;
use crate::types::request::SensorRequest;
use log::{debug, info};
use polars::prelude::{DataFrame, IntoLazy};

/// Aggregates the archive days of a [`SensorRequest`] into one [`ReadingFrame`].
///
/// Days are fetched one after another in ascending order. A day the archive does not
/// have is skipped; any other failure aborts the whole aggregation.
pub struct RangeAggregator<F> {
    fetcher: F,
    locator: ArchiveLocator,
}

impl<F: DailyFetcher> RangeAggregator<F> {
    pub fn new(fetcher: F, locator: ArchiveLocator) -> Self {
        Self { fetcher, locator }
    }

    pub fn locator(&self) -> &ArchiveLocator {
        &self.locator
    }

    /// Fetches every day in `request.start..=request.end`.
    ///
    /// # Errors
    ///
    /// * [`ArchiveError::EmptyRange`] if no day yielded a table.
    /// * The first transport, parse or schema error encountered; accumulated days are discarded.
    pub async fn aggregate(&self, request: &SensorRequest) -> Result<ReadingFrame, ArchiveError> {
        let mut days = Vec::new();
        let mut absent = 0usize;

        for date in request.days() {
            let address = self
                .locator
                .locate(request.sensor, request.sensor_type, date);
            match self.fetcher.fetch(date, &address).await? {
                DailyFetch::Found(raw) => days.push(normalize_day(raw, date)?),
                DailyFetch::Absent => absent += 1,
            }
        }

        let found = days.len();
        let frame = merge_days(days)?.ok_or(ArchiveError::EmptyRange {
            start: request.start,
            end: request.end,
        })?;

        info!(
            "Aggregated sensor {} from {} to {}: {} days found, {} absent, {} rows",
            request.sensor,
            request.start,
            request.end,
            found,
            absent,
            frame.height()
        );
        Ok(ReadingFrame::new(frame.lazy()))
    }
}

/// Stacks normalized day tables in the given order and derives `hour` and `date`.
///
/// Returns `None` when there is nothing to stack.
pub(crate) fn merge_days(days: Vec<DataFrame>) -> Result<Option<DataFrame>, ArchiveError> {
    let mut days = days.into_iter();
    let Some(mut merged) = days.next() else {
        return Ok(None);
    };
    for day in days {
        merged.vstack_mut(&day)?;
    }
    debug!("Deriving calendar columns for {} rows", merged.height());
    Ok(Some(derive_calendar_columns(merged.lazy()).collect()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::clock::FixedClock;
    use crate::archive::fetcher::HttpDailyFetcher;
    use crate::archive::normalize::read_day_csv;
    use crate::test_support::{archive_csv, capture_logs, date, logged_on_this_thread};
    use crate::types::sensor::SensorId;
    use chrono::NaiveDate;
    use polars::error::PolarsError;
    use std::collections::{HashMap, HashSet};
    use httpmock::prelude::*;
    use log::Level;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Serves CSV bodies from memory; days without a body are absent.
    #[derive(Default)]
    struct MemoryFetcher {
        days: HashMap<NaiveDate, String>,
        failing: HashSet<NaiveDate>,
        requested: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        fn with_day(mut self, day: NaiveDate, csv: String) -> Self {
            self.days.insert(day, csv);
            self
        }

        fn failing_on(mut self, day: NaiveDate) -> Self {
            self.failing.insert(day);
            self
        }
    }

    impl DailyFetcher for &MemoryFetcher {
        async fn fetch(&self, date: NaiveDate, address: &str) -> Result<DailyFetch, ArchiveError> {
            self.requested.lock().unwrap().push(address.to_string());
            if self.failing.contains(&date) {
                return Err(ArchiveError::CsvRead {
                    date,
                    source: PolarsError::NoData("truncated body".into()),
                });
            }
            match self.days.get(&date) {
                Some(csv) => Ok(DailyFetch::Found(read_day_csv(
                    csv.clone().into_bytes(),
                    date,
                )?)),
                None => Ok(DailyFetch::Absent),
            }
        }
    }

    fn locator() -> ArchiveLocator {
        ArchiveLocator::new(
            "http://archive.test",
            Arc::new(FixedClock(date(2022, 7, 1))),
        )
    }

    fn day_csv(day: NaiveDate, readings: usize) -> String {
        let stamps: Vec<String> = (0..readings)
            .map(|i| format!("{}T{:02}:00:00", day, (i * 5) % 24))
            .collect();
        let rows: Vec<(&str, f64, f64)> = stamps
            .iter()
            .enumerate()
            .map(|(i, ts)| (ts.as_str(), i as f64, i as f64 / 2.0))
            .collect();
        archive_csv(&rows)
    }

    #[tokio::test]
    async fn test_row_count_is_sum_of_days_in_order() {
        let fetcher = MemoryFetcher::default()
            .with_day(date(2022, 6, 10), day_csv(date(2022, 6, 10), 3))
            .with_day(date(2022, 6, 11), day_csv(date(2022, 6, 11), 4))
            .with_day(date(2022, 6, 12), day_csv(date(2022, 6, 12), 2));
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 10), date(2022, 6, 12), SensorId(57925));

        let readings = aggregator.aggregate(&request).await.unwrap().readings().unwrap();
        assert_eq!(readings.len(), 9);

        let dates: Vec<NaiveDate> = readings.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);

        // Within a day the file order is kept, not re-sorted by time.
        let day_two: Vec<u32> = readings
            .iter()
            .filter(|r| r.date == date(2022, 6, 11))
            .map(|r| r.hour)
            .collect();
        assert_eq!(day_two, vec![0, 5, 10, 15]);
    }

    #[tokio::test]
    async fn test_absent_day_is_skipped() {
        let start = date(2022, 6, 10);
        let end = date(2022, 6, 24);
        let absent = date(2022, 6, 15);
        let mut fetcher = MemoryFetcher::default();
        for day in start.iter_days().take_while(|d| *d <= end) {
            if day != absent {
                fetcher = fetcher.with_day(day, day_csv(day, 2));
            }
        }
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(start, end, SensorId(57925));

        let frame = aggregator.aggregate(&request).await.unwrap();
        let readings = frame.readings().unwrap();
        assert_eq!(readings.len(), 28);
        assert!(readings.iter().all(|r| r.date != absent));

        let distinct: HashSet<NaiveDate> = readings.iter().map(|r| r.date).collect();
        assert_eq!(distinct.len(), 14);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_no_data_is_empty_range_error() {
        let fetcher = MemoryFetcher::default();
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 10), date(2022, 6, 12), SensorId(1));

        let err = aggregator.aggregate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::EmptyRange { start, end } if start == date(2022, 6, 10) && end == date(2022, 6, 12)
        ));
    }

    #[tokio::test]
    async fn test_reversed_range_fetches_nothing() {
        let fetcher = MemoryFetcher::default().with_day(date(2022, 6, 10), day_csv(date(2022, 6, 10), 1));
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 12), date(2022, 6, 10), SensorId(1));

        assert!(matches!(
            aggregator.aggregate(&request).await,
            Err(ArchiveError::EmptyRange { .. })
        ));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fatal_error_aborts_remaining_days() {
        let fetcher = MemoryFetcher::default()
            .with_day(date(2022, 6, 10), day_csv(date(2022, 6, 10), 2))
            .failing_on(date(2022, 6, 11))
            .with_day(date(2022, 6, 12), day_csv(date(2022, 6, 12), 2));
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 10), date(2022, 6, 12), SensorId(1));

        let err = aggregator.aggregate(&request).await.unwrap_err();
        assert!(matches!(err, ArchiveError::CsvRead { date: d, .. } if d == date(2022, 6, 11)));
        assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_schema_error_is_fatal() {
        let fetcher = MemoryFetcher::default().with_day(
            date(2022, 6, 10),
            "sensor_id;timestamp;P1\n1;2022-06-10T00:00:00;1.0\n".to_string(),
        );
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 10), date(2022, 6, 10), SensorId(1));

        assert!(matches!(
            aggregator.aggregate(&request).await,
            Err(ArchiveError::MissingColumn { .. })
        ));
    }

    #[tokio::test]
    async fn test_addresses_come_from_locator() {
        let fetcher = MemoryFetcher::default().with_day(date(2021, 12, 31), day_csv(date(2021, 12, 31), 1));
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2021, 12, 31), date(2022, 1, 1), SensorId(57925));

        aggregator.aggregate(&request).await.unwrap();
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec![
                "http://archive.test/2021/2021-12-31/2021-12-31_sds011_sensor_57925.csv".to_string(),
                "http://archive.test/2022-01-01/2022-01-01_sds011_sensor_57925.csv".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_day_logs_one_notice() {
        capture_logs();
        let server = MockServer::start_async().await;
        let bodies = [
            (
                date(2022, 6, 14),
                archive_csv(&[("2022-06-14T08:00:00", 10.0, 4.0), ("2022-06-14T09:00:00", 12.0, 5.0)]),
            ),
            (date(2022, 6, 16), archive_csv(&[])),
            (
                date(2022, 6, 17),
                format!("{}57925;SDS011;44184;46.066;11.124;2022-06-17T10:00:00;;;;;;\n", archive_csv(&[])),
            ),
        ];
        for (day, body) in bodies {
            let path = format!("/{0}/{0}_sds011_sensor_57925.csv", day);
            server
                .mock_async(move |when, then| {
                    when.method(GET).path(path);
                    then.status(200).body(body);
                })
                .await;
        }
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/2022-06-15/2022-06-15_sds011_sensor_57925.csv");
                then.status(404);
            })
            .await;

        let locator = ArchiveLocator::new(server.base_url(), Arc::new(FixedClock(date(2022, 7, 1))));
        let fetcher = HttpDailyFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        let aggregator = RangeAggregator::new(fetcher, locator);
        let request = SensorRequest::new(date(2022, 6, 14), date(2022, 6, 17), SensorId(57925));

        let frame = aggregator.aggregate(&request).await.unwrap();
        assert_eq!(frame.height().unwrap(), 3);

        let info = logged_on_this_thread(Level::Info);
        let notices: Vec<&str> = info
            .iter()
            .map(String::as_str)
            .filter(|message| message.contains("2022-06-15"))
            .collect();
        assert_eq!(notices, vec!["CSV not found for date: 2022-06-15"]);
        assert!(info
            .iter()
            .any(|message| message.ends_with("3 days found, 1 absent, 3 rows")));
    }

    #[tokio::test]
    async fn test_header_only_day_counts_as_found() {
        let fetcher = MemoryFetcher::default().with_day(date(2022, 6, 10), archive_csv(&[]));
        let aggregator = RangeAggregator::new(&fetcher, locator());
        let request = SensorRequest::new(date(2022, 6, 10), date(2022, 6, 10), SensorId(1));

        let frame = aggregator.aggregate(&request).await.unwrap();
        assert_eq!(frame.height().unwrap(), 0);
    }
}
