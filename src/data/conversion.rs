use crate::data::{Asset, PriceState};

/// Base amount expressed in each displayed currency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Magnitudes {
    pub usd: f64,
    pub eur: f64,
    pub ltc: f64,
    pub eth: f64,
    pub btc: f64,
}

impl Magnitudes {
    pub fn get(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Usd => self.usd,
            Asset::Eur => self.eur,
            Asset::Ltc => self.ltc,
            Asset::Eth => self.eth,
            Asset::Btc => self.btc,
        }
    }
}

/// Converts `base` USD into every displayed currency.
///
/// Zero prices are not guarded: callers only convert once the state is
/// available.
pub fn derive_magnitudes(base: f64, prices: &PriceState) -> Magnitudes {
    Magnitudes {
        usd: base,
        eur: base / prices.price_of(Asset::Eur),
        ltc: base / prices.price_of(Asset::Ltc),
        eth: base / prices.price_of(Asset::Eth),
        btc: base / prices.price_of(Asset::Btc),
    }
}
