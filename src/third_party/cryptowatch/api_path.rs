use const_format::concatcp;

// Root
pub const CRYPTOWATCH_API_URL: &str = "https://api.cryptowat.ch";

// Paths
pub const GDAX_BTCUSD_PRICE_PATH: &str = "/markets/gdax/btcusd/price";
pub const GDAX_ETHUSD_PRICE_PATH: &str = "/markets/gdax/ethusd/price";
pub const GDAX_LTCUSD_PRICE_PATH: &str = "/markets/gdax/ltcusd/price";
pub const BITSTAMP_EURUSD_PRICE_PATH: &str = "/markets/bitstamp/eurusd/price";

// Endpoints
pub const CRYPTOWATCH_BTCUSD_PRICE: &str = concatcp!(CRYPTOWATCH_API_URL, GDAX_BTCUSD_PRICE_PATH);
pub const CRYPTOWATCH_ETHUSD_PRICE: &str = concatcp!(CRYPTOWATCH_API_URL, GDAX_ETHUSD_PRICE_PATH);
pub const CRYPTOWATCH_LTCUSD_PRICE: &str = concatcp!(CRYPTOWATCH_API_URL, GDAX_LTCUSD_PRICE_PATH);
pub const CRYPTOWATCH_EURUSD_PRICE: &str =
    concatcp!(CRYPTOWATCH_API_URL, BITSTAMP_EURUSD_PRICE_PATH);
