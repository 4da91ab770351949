pub mod animation;
pub mod app;
pub mod colors;
pub mod easing;
pub mod font;
pub mod format;
pub mod price_row;
pub mod screen;
pub mod slider;

pub use animation::{AnimatedValue, Phase};
pub use app::{FetchStatus, TuiApp};
pub use colors::ScreenColors;
pub use easing::{CubicBezier, Easing};
pub use font::{DisplayFont, FontError};
pub use format::format_grouped;
pub use price_row::PriceRow;
pub use screen::ConversionScreen;
pub use slider::Slider;
