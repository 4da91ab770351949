use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::data::{Asset, PriceUpdate};
use crate::request::FetchError;
use crate::third_party::cryptowatch::api_path::{
    CRYPTOWATCH_BTCUSD_PRICE, CRYPTOWATCH_ETHUSD_PRICE, CRYPTOWATCH_EURUSD_PRICE,
    CRYPTOWATCH_LTCUSD_PRICE,
};
use crate::third_party::cryptowatch::data::{ApiPriceResponse, PriceValue};

/// Somewhere USD prices come from.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, asset: Asset) -> Result<f64, FetchError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceUrls {
    pub btc: String,
    pub eth: String,
    pub ltc: String,
    pub eur: String,
}

impl PriceUrls {
    pub fn url_for(&self, asset: Asset) -> Option<&str> {
        match asset {
            Asset::Usd => None,
            Asset::Btc => Some(&self.btc),
            Asset::Eth => Some(&self.eth),
            Asset::Ltc => Some(&self.ltc),
            Asset::Eur => Some(&self.eur),
        }
    }
}

impl Default for PriceUrls {
    fn default() -> Self {
        Self {
            btc: CRYPTOWATCH_BTCUSD_PRICE.to_string(),
            eth: CRYPTOWATCH_ETHUSD_PRICE.to_string(),
            ltc: CRYPTOWATCH_LTCUSD_PRICE.to_string(),
            eur: CRYPTOWATCH_EURUSD_PRICE.to_string(),
        }
    }
}

pub struct HttpPriceSource {
    client: Client,
    urls: PriceUrls,
}

impl HttpPriceSource {
    pub fn new(urls: PriceUrls) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, urls })
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch(&self, asset: Asset) -> Result<f64, FetchError> {
        match self.urls.url_for(asset) {
            Some(url) => fetch_price(&self.client, url).await,
            None => Ok(1.0),
        }
    }
}

pub async fn fetch_price(client: &Client, url: &str) -> Result<f64, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await?;
    let price = parse_price_body(&body)?;
    log::debug!("{url} -> {price}");
    Ok(price)
}

/// Pulls `result.price` out of a market price response.
pub fn parse_price_body(body: &str) -> Result<f64, FetchError> {
    let parsed: ApiPriceResponse = serde_json::from_str(body)?;
    let price = match parsed.result.price {
        PriceValue::Number(n) => n,
        PriceValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::InvalidPrice(text.clone()))?,
    };

    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(FetchError::InvalidPrice(price.to_string()))
    }
}

/// Fetches every priced asset concurrently.
///
/// All four requests are always attempted; any failure yields one
/// [`FetchError::Incomplete`] naming each asset that failed.
pub async fn fetch_all<S>(source: &S) -> Result<PriceUpdate, FetchError>
where
    S: PriceSource + ?Sized,
{
    let results = futures::future::join_all(
        Asset::PRICED
            .iter()
            .map(|&asset| async move { (asset, source.fetch(asset).await) }),
    )
    .await;

    let mut update = PriceUpdate {
        is_available: Some(true),
        ..PriceUpdate::default()
    };
    let mut failures = Vec::new();
    for (asset, result) in results {
        match result {
            Ok(price) => update.set_price(asset, price),
            Err(err) => failures.push((asset, err)),
        }
    }

    if !failures.is_empty() {
        return Err(FetchError::Incomplete { failures });
    }
    log::info!("prices fetched: {update:?}");
    Ok(update)
}
