pub mod loader;

pub use loader::{LoadEvent, load_font, run_price_loader};

use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::data::PriceReducer;
use crate::request::HttpPriceSource;
use crate::store::Store;
use crate::ui::TuiApp;

/// Composition root: owns the store and wires the loaders to the UI.
#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel::<LoadEvent>();

        // Retry requests from the error screen
        let (retry_tx, retry_rx) = mpsc::unbounded_channel::<()>();

        let font_task = tokio::spawn(load_font(self.settings.font.clone(), tx.clone()));

        let source = HttpPriceSource::new(self.settings.price_urls())?;
        let policy = self.settings.retry_policy();
        let refresh = self.settings.refresh_interval();
        log::info!(
            "fetching prices ({} attempts, refresh {:?})",
            policy.attempts,
            refresh
        );
        let price_task = tokio::spawn(run_price_loader(source, policy, refresh, tx, retry_rx));

        let store = Store::<PriceReducer>::default();

        // The UI loop blocks on terminal events
        let ui_task = tokio::task::spawn_blocking(move || {
            let terminal = ratatui::init();
            if let Err(err) = execute!(std::io::stdout(), EnableMouseCapture) {
                log::warn!("mouse capture unavailable: {err}");
            }
            let app = TuiApp::new(store, retry_tx);
            let app_result = app.run(terminal, rx);
            let _ = execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();
            app_result
        });

        let ui_result = ui_task.await;

        price_task.abort();
        font_task.abort();

        match ui_result {
            Ok(result) => result,
            Err(err) => Err(err.into()),
        }
    }
}
