use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApiPriceResponse {
    pub result: PriceResult,
}

#[derive(Debug, Deserialize)]
pub struct PriceResult {
    pub price: PriceValue,
}

/// Markets report the price either as a JSON number or as a decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}
