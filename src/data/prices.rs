use crate::data::Asset;
use crate::store::Reducer;

/// USD prices of the tracked assets plus the availability gate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceState {
    pub btc_per_usd: f64,
    pub ltc_per_usd: f64,
    pub eur_per_usd: f64,
    pub eth_per_usd: f64,
    pub is_available: bool,
}

impl PriceState {
    /// Price used as the divisor for `asset`. USD is its own unit.
    pub fn price_of(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Usd => 1.0,
            Asset::Eur => self.eur_per_usd,
            Asset::Ltc => self.ltc_per_usd,
            Asset::Eth => self.eth_per_usd,
            Asset::Btc => self.btc_per_usd,
        }
    }
}

/// Partial state carried by [`Action::UpdateState`]. `None` keeps the old value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceUpdate {
    pub btc_per_usd: Option<f64>,
    pub ltc_per_usd: Option<f64>,
    pub eur_per_usd: Option<f64>,
    pub eth_per_usd: Option<f64>,
    pub is_available: Option<bool>,
}

impl PriceUpdate {
    /// A complete update: every price populated and the state marked available.
    pub fn complete(btc: f64, ltc: f64, eth: f64, eur: f64) -> Self {
        Self {
            btc_per_usd: Some(btc),
            ltc_per_usd: Some(ltc),
            eur_per_usd: Some(eur),
            eth_per_usd: Some(eth),
            is_available: Some(true),
        }
    }

    /// Sets the price of `asset`. USD has no price and is ignored.
    pub fn set_price(&mut self, asset: Asset, price: f64) {
        match asset {
            Asset::Usd => {}
            Asset::Eur => self.eur_per_usd = Some(price),
            Asset::Ltc => self.ltc_per_usd = Some(price),
            Asset::Eth => self.eth_per_usd = Some(price),
            Asset::Btc => self.btc_per_usd = Some(price),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    UpdateState(PriceUpdate),
}

pub struct PriceReducer;

impl Reducer for PriceReducer {
    type State = PriceState;
    type Action = Action;

    fn reduce(state: &PriceState, action: Action) -> PriceState {
        match action {
            Action::UpdateState(update) => PriceState {
                btc_per_usd: update.btc_per_usd.unwrap_or(state.btc_per_usd),
                ltc_per_usd: update.ltc_per_usd.unwrap_or(state.ltc_per_usd),
                eur_per_usd: update.eur_per_usd.unwrap_or(state.eur_per_usd),
                eth_per_usd: update.eth_per_usd.unwrap_or(state.eth_per_usd),
                is_available: update.is_available.unwrap_or(state.is_available),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_unavailable_and_zeroed() {
        let state = PriceState::default();
        assert!(!state.is_available);
        assert_eq!(state.btc_per_usd, 0.0);
        assert_eq!(state.ltc_per_usd, 0.0);
        assert_eq!(state.eur_per_usd, 0.0);
        assert_eq!(state.eth_per_usd, 0.0);
    }

    #[test]
    fn update_is_a_shallow_merge() {
        let state = PriceState::default();
        let update = PriceUpdate {
            btc_per_usd: Some(5.0),
            ..PriceUpdate::default()
        };

        let next = PriceReducer::reduce(&state, Action::UpdateState(update));

        assert_eq!(
            next,
            PriceState {
                btc_per_usd: 5.0,
                ..PriceState::default()
            }
        );
    }

    #[test]
    fn later_updates_keep_earlier_fields() {
        let state = PriceReducer::reduce(
            &PriceState::default(),
            Action::UpdateState(PriceUpdate::complete(50_000.0, 100.0, 3_000.0, 0.9)),
        );
        let next = PriceReducer::reduce(
            &state,
            Action::UpdateState(PriceUpdate {
                eth_per_usd: Some(3_100.0),
                ..PriceUpdate::default()
            }),
        );

        assert!(next.is_available);
        assert_eq!(next.btc_per_usd, 50_000.0);
        assert_eq!(next.eth_per_usd, 3_100.0);
        assert_eq!(next.eur_per_usd, 0.9);
    }

    #[test]
    fn set_price_fills_the_matching_field() {
        let mut update = PriceUpdate::default();
        for (asset, price) in [
            (Asset::Btc, 50_000.0),
            (Asset::Ltc, 100.0),
            (Asset::Eth, 3_000.0),
            (Asset::Eur, 0.9),
        ] {
            update.set_price(asset, price);
        }
        update.set_price(Asset::Usd, 2.0);
        update.is_available = Some(true);

        assert_eq!(update, PriceUpdate::complete(50_000.0, 100.0, 3_000.0, 0.9));
    }

    #[test]
    fn price_of_usd_is_identity() {
        let state = PriceState::default();
        assert_eq!(state.price_of(Asset::Usd), 1.0);
    }
}
