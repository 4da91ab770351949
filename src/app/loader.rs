use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::data::PriceUpdate;
use crate::request::{PriceSource, RetryPolicy, fetch_all_with_retry};
use crate::ui::DisplayFont;

/// Results of background work, drained by the UI loop.
#[derive(Debug)]
pub enum LoadEvent {
    FontLoaded(DisplayFont),
    PricesFetched(PriceUpdate),
    PricesFailed(String),
}

/// Loads the font at `path`, or the bundled one when no path is given.
pub async fn load_font(path: Option<PathBuf>, tx: mpsc::UnboundedSender<LoadEvent>) {
    let font = match path {
        Some(path) => DisplayFont::load_or_default(&path).await,
        None => DisplayFont::bundled(),
    };
    let _ = tx.send(LoadEvent::FontLoaded(font));
}

/// Fetches prices and reports them to the UI.
///
/// Without a refresh interval it stops after a success and waits for a retry
/// request after a failure. With one, every round is followed by the next
/// after the interval; a retry request cuts the wait short after a failure.
/// Returns when the UI side of either channel is gone.
pub async fn run_price_loader<S>(
    source: S,
    policy: RetryPolicy,
    refresh: Option<Duration>,
    tx: mpsc::UnboundedSender<LoadEvent>,
    mut retry_rx: mpsc::UnboundedReceiver<()>,
) where
    S: PriceSource,
{
    loop {
        let (event, failed) = match fetch_all_with_retry(&source, policy).await {
            Ok(update) => (LoadEvent::PricesFetched(update), false),
            Err(err) => (LoadEvent::PricesFailed(err.to_string()), true),
        };
        if tx.send(event).is_err() {
            return;
        }

        match (failed, refresh) {
            (true, Some(interval)) => {
                tokio::select! {
                    request = retry_rx.recv() => {
                        if request.is_none() {
                            return;
                        }
                    }
                    _ = tokio::time::sleep(interval) => {
                        log::debug!("retrying on the refresh schedule");
                    }
                }
            }
            (true, None) => {
                if retry_rx.recv().await.is_none() {
                    return;
                }
            }
            (false, Some(interval)) => {
                log::debug!("next price refresh in {interval:?}");
                tokio::time::sleep(interval).await;
            }
            (false, None) => return,
        }
    }
}
