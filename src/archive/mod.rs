pub mod aggregator;
pub mod clock;
pub mod error;
pub mod fetcher;
pub mod locator;
pub(crate) mod normalize;
