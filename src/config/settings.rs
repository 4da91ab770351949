use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{
    DEFAULT_LOG_FILE, RETRY_ATTEMPTS, RETRY_INITIAL_BACKOFF_MS, RETRY_MAX_BACKOFF_MS,
};
use crate::request::{PriceUrls, RetryPolicy};
use crate::third_party::cryptowatch::api_path::{
    CRYPTOWATCH_BTCUSD_PRICE, CRYPTOWATCH_ETHUSD_PRICE, CRYPTOWATCH_EURUSD_PRICE,
    CRYPTOWATCH_LTCUSD_PRICE,
};

/// Convert a USD amount into EUR, LTC, ETH and BTC at live prices.
#[derive(Debug, Clone, Parser)]
#[command(name = "convert", version, about)]
pub struct Settings {
    /// Glyph file used for the large price display. The bundled block
    /// digits are used when omitted.
    #[arg(long, env = "CONVERT_FONT")]
    pub font: Option<PathBuf>,

    /// Where log output goes; the terminal belongs to the UI.
    #[arg(long, env = "CONVERT_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Re-fetch prices every N seconds. Prices are fetched once when omitted.
    #[arg(long, env = "CONVERT_REFRESH_SECS")]
    pub refresh_secs: Option<u64>,

    /// Attempts per fetch round before the error is shown.
    #[arg(long, default_value_t = RETRY_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    #[arg(long, default_value = CRYPTOWATCH_BTCUSD_PRICE)]
    pub btc_url: String,

    #[arg(long, default_value = CRYPTOWATCH_ETHUSD_PRICE)]
    pub eth_url: String,

    #[arg(long, default_value = CRYPTOWATCH_LTCUSD_PRICE)]
    pub ltc_url: String,

    #[arg(long, default_value = CRYPTOWATCH_EURUSD_PRICE)]
    pub eur_url: String,
}

impl Settings {
    pub fn price_urls(&self) -> PriceUrls {
        PriceUrls {
            btc: self.btc_url.clone(),
            eth: self.eth_url.clone(),
            ltc: self.ltc_url.clone(),
            eur: self.eur_url.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retries,
            initial_backoff: Duration::from_millis(RETRY_INITIAL_BACKOFF_MS),
            max_backoff: Duration::from_millis(RETRY_MAX_BACKOFF_MS),
        }
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
