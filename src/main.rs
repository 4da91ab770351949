//! USD conversion board
//!
//! Fetches BTC, ETH, LTC and EUR prices once, then converts a slider-picked
//! USD amount into each of them with eased number transitions.

pub mod app;
pub mod config;
pub mod data;
pub mod logging;
pub mod request;
pub mod store;
pub mod third_party;
pub mod ui;

use crate::app::App;
use crate::config::Settings;
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::parse();
    if let Err(err) = logging::init(&settings.log_file) {
        eprintln!("logging disabled: {err:#}");
    }

    let app = App::new(settings);
    app.run().await
}
