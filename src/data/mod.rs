pub mod asset;
pub mod conversion;
pub mod prices;

pub use asset::Asset;
pub use conversion::{Magnitudes, derive_magnitudes};
pub use prices::{Action, PriceReducer, PriceState, PriceUpdate};
