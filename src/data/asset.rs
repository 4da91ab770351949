/// A currency row on the conversion screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    Usd,
    Eur,
    Ltc,
    Eth,
    Btc,
}

impl Asset {
    /// Display order, top to bottom. The slider sits between `Eur` and `Ltc`.
    pub const ALL: [Asset; 5] = [Asset::Usd, Asset::Eur, Asset::Ltc, Asset::Eth, Asset::Btc];

    /// Assets whose USD price has to be fetched.
    pub const PRICED: [Asset; 4] = [Asset::Btc, Asset::Ltc, Asset::Eth, Asset::Eur];

    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Usd => "$",
            Asset::Eur => "€",
            Asset::Ltc => "LTC",
            Asset::Eth => "ETH",
            Asset::Btc => "BTC",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Asset::Usd => "United States Dollar",
            Asset::Eur => "Euro",
            Asset::Ltc => "Litecoin",
            Asset::Eth => "Ethereum",
            Asset::Btc => "Bitcoin",
        }
    }

    /// Decimal places shown for this asset.
    pub fn precision(self) -> usize {
        match self {
            Asset::Usd | Asset::Eur => 2,
            Asset::Ltc => 3,
            Asset::Eth => 4,
            Asset::Btc => 5,
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code = match self {
            Asset::Usd => "USD",
            Asset::Eur => "EUR",
            Asset::Ltc => "LTC",
            Asset::Eth => "ETH",
            Asset::Btc => "BTC",
        };
        f.write_str(code)
    }
}
