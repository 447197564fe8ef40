//! Builders for archive-shaped test data and a log recorder for tests.

use crate::archive::aggregator::merge_days;
use crate::archive::normalize::{normalize_day, read_day_csv};
use crate::types::reading_frame::ReadingFrame;
use chrono::NaiveDate;
use log::{Level, LevelFilter, Log, Metadata, Record};
use polars::prelude::IntoLazy;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

const ARCHIVE_HEADER: &str =
    "sensor_id;sensor_type;location;lat;lon;timestamp;P1;durP1;ratioP1;P2;durP2;ratioP2";

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A day file in the archive layout with `(timestamp, P1, P2)` rows.
pub(crate) fn archive_csv(rows: &[(&str, f64, f64)]) -> String {
    let mut csv = String::from(ARCHIVE_HEADER);
    csv.push('\n');
    for (timestamp, pm10, pm2_5) in rows {
        csv.push_str(&format!(
            "57925;SDS011;44184;46.066;11.124;{};{};;;{};;\n",
            timestamp, pm10, pm2_5
        ));
    }
    csv
}

/// Runs the day files through the same parse, normalize and merge steps as the aggregator.
pub(crate) fn reading_frame(days: &[(NaiveDate, String)]) -> ReadingFrame {
    let normalized = days
        .iter()
        .map(|(day, csv)| {
            let raw = read_day_csv(csv.clone().into_bytes(), *day).unwrap();
            normalize_day(raw, *day).unwrap()
        })
        .collect();
    let merged = merge_days(normalized).unwrap().unwrap();
    ReadingFrame::new(merged.lazy())
}

/// Records this crate's log lines together with the thread that emitted them.
struct CapturingLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records.lock().unwrap().push((
                thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

/// Installs the capturing logger; later calls are no-ops.
pub(crate) fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Log lines emitted so far by the calling thread at `level`.
pub(crate) fn logged_on_this_thread(level: Level) -> Vec<String> {
    let id = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, l, _)| *thread == id && *l == level)
        .map(|(_, _, message)| message.clone())
        .collect()
}
