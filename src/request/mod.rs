pub mod client;
pub mod error;
pub mod retry;

pub use client::{HttpPriceSource, PriceSource, PriceUrls, fetch_all, fetch_price, parse_price_body};
pub use error::FetchError;
pub use retry::{RetryPolicy, fetch_all_with_retry};
