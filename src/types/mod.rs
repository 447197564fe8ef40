pub mod appa_frame;
pub mod columns;
pub mod date_range;
pub mod hour_range;
pub mod reading;
pub mod reading_frame;
pub mod request;
pub mod sensor;
