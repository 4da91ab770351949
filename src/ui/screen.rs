use std::time::Instant;

use tokio::sync::mpsc;

use crate::data::{Asset, PriceState, derive_magnitudes};
use crate::store::{StateContainer, Subscription};
use crate::ui::{PriceRow, Slider};

/// The conversion screen: slider, rows and its store registration.
///
/// Rows only exist once prices are available; dropping the screen drops the
/// rows and unsubscribes from the store.
pub struct ConversionScreen {
    slider: Slider,
    prices: PriceState,
    rows: Option<Vec<PriceRow>>,
    updates: mpsc::UnboundedReceiver<PriceState>,
    _subscription: Subscription<PriceState>,
}

impl ConversionScreen {
    pub fn mount<C>(store: &C) -> Self
    where
        C: StateContainer<State = PriceState>,
    {
        let (tx, updates) = mpsc::unbounded_channel();
        let subscription = store.subscribe(move |state: &PriceState| {
            let _ = tx.send(*state);
        });

        let mut screen = Self {
            slider: Slider::default(),
            prices: PriceState::default(),
            rows: None,
            updates,
            _subscription: subscription,
        };
        screen.apply_prices(*store.state(), Instant::now());
        screen
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut Slider {
        &mut self.slider
    }

    pub fn prices(&self) -> &PriceState {
        &self.prices
    }

    pub fn rows(&self) -> Option<&[PriceRow]> {
        self.rows.as_deref()
    }

    pub fn base_amount(&self) -> f64 {
        self.slider.value()
    }

    pub fn is_animating(&self) -> bool {
        self.rows
            .as_ref()
            .is_some_and(|rows| rows.iter().any(PriceRow::is_easing))
    }

    /// Applies pending store snapshots and settles finished eases.
    pub fn sync(&mut self, now: Instant) {
        while let Ok(state) = self.updates.try_recv() {
            self.apply_prices(state, now);
        }
        if let Some(rows) = self.rows.as_mut() {
            rows.iter_mut().for_each(|row| row.tick(now));
        }
    }

    /// Commits the slider. Rows retarget when the base amount changed.
    pub fn commit_slider(&mut self, now: Instant) -> Option<f64> {
        let base = self.slider.commit()?;
        log::info!("base amount set to {base}");
        self.retarget(now);
        Some(base)
    }

    fn apply_prices(&mut self, state: PriceState, now: Instant) {
        self.prices = state;
        if !state.is_available {
            return;
        }
        if self.rows.is_some() {
            self.retarget(now);
        } else {
            let magnitudes = derive_magnitudes(self.base_amount(), &state);
            self.rows = Some(
                Asset::ALL
                    .iter()
                    .map(|&asset| PriceRow::new(asset, magnitudes.get(asset)))
                    .collect(),
            );
        }
    }

    fn retarget(&mut self, now: Instant) {
        let Some(rows) = self.rows.as_mut() else {
            return;
        };
        let magnitudes = derive_magnitudes(self.slider.value(), &self.prices);
        for row in rows.iter_mut() {
            row.set_target(magnitudes.get(row.asset()), now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Action, PriceReducer, PriceUpdate};
    use crate::store::Store;
    use std::time::Duration;

    fn available() -> Action {
        Action::UpdateState(PriceUpdate::complete(50_000.0, 100.0, 3_000.0, 0.9))
    }

    #[test]
    fn no_rows_until_prices_are_available() {
        let store = Store::<PriceReducer>::default();
        let mut screen = ConversionScreen::mount(&store);
        screen.sync(Instant::now());
        assert!(screen.rows().is_none());
        assert!(!screen.is_animating());
    }

    #[test]
    fn rows_appear_without_easing_when_prices_arrive() {
        let mut store = Store::<PriceReducer>::default();
        let mut screen = ConversionScreen::mount(&store);
        store.dispatch(available());
        screen.sync(Instant::now());

        let rows = screen.rows().unwrap();
        assert_eq!(rows.len(), 5);
        assert!(!screen.is_animating());
        assert_eq!(rows[0].asset(), Asset::Usd);
        assert_eq!(rows[0].target(), 1.0);
        assert!((rows[4].target() - 1.0 / 50_000.0).abs() < 1e-12);
    }

    #[test]
    fn mounting_after_prices_uses_the_current_snapshot() {
        let mut store = Store::<PriceReducer>::default();
        store.dispatch(available());
        let screen = ConversionScreen::mount(&store);
        assert!(screen.rows().is_some());
        assert!(screen.prices().is_available);
    }

    #[test]
    fn committing_the_slider_retargets_every_row() {
        let mut store = Store::<PriceReducer>::default();
        let mut screen = ConversionScreen::mount(&store);
        store.dispatch(available());
        let t0 = Instant::now();
        screen.sync(t0);

        screen.slider_mut().move_to(1_000.0);
        assert!(!screen.is_animating());
        assert_eq!(screen.commit_slider(t0), Some(1_000.0));
        assert!(screen.is_animating());

        let targets: Vec<f64> = screen.rows().unwrap().iter().map(PriceRow::target).collect();
        assert_eq!(targets[0], 1_000.0);
        assert!((targets[1] - 1_111.11).abs() < 0.01);
        assert!((targets[2] - 10.0).abs() < 1e-12);
        assert!((targets[3] - 0.3333).abs() < 1e-4);
        assert!((targets[4] - 0.02).abs() < 1e-12);

        let settled = t0 + Duration::from_millis(600);
        screen.sync(settled);
        assert!(!screen.is_animating());
        let row = &screen.rows().unwrap()[0];
        assert_eq!(row.text(settled), "$ 1,000.00");
    }

    #[test]
    fn refreshed_prices_retarget_rows() {
        let mut store = Store::<PriceReducer>::default();
        let mut screen = ConversionScreen::mount(&store);
        store.dispatch(available());
        screen.sync(Instant::now());

        store.dispatch(Action::UpdateState(PriceUpdate {
            btc_per_usd: Some(25_000.0),
            ..PriceUpdate::default()
        }));
        screen.sync(Instant::now());

        let btc = &screen.rows().unwrap()[4];
        assert!(btc.is_easing());
        assert!((btc.target() - 1.0 / 25_000.0).abs() < 1e-12);
    }

    #[test]
    fn dropping_the_screen_unsubscribes() {
        let mut store = Store::<PriceReducer>::default();
        let screen = ConversionScreen::mount(&store);
        assert_eq!(store.observer_count(), 1);
        drop(screen);
        assert_eq!(store.observer_count(), 0);
        store.dispatch(available());
    }
}
