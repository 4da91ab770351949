pub mod settings;

pub use settings::Settings;

use ratatui::style::palette::tailwind;

pub const PALETTES: [tailwind::Palette; 4] = [
    tailwind::SLATE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::AMBER,
];

pub const INFO_TEXT: [&str; 2] = [
    "(←/→) ±10000 | (Shift ←/→) ±100 | ([/]) ±1 | (Home/End) bounds | (Enter) convert",
    "(Esc) cancel / quit | (q) quit | (c) cycle color | (r) retry",
];

pub const POLL_DURATION_MS: u64 = 250;
pub const FRAME_DURATION_MS: u64 = 16;
pub const EASE_DURATION_MS: u64 = 600;

pub const SLIDER_MIN: f64 = 1.0;
pub const SLIDER_MAX: f64 = 1_000_000.0;
pub const SLIDER_STEP: f64 = 1.0;
pub const SLIDER_COARSE_STEP: f64 = 10_000.0;
pub const SLIDER_FINE_STEP: f64 = 100.0;
pub const INITIAL_BASE_AMOUNT: f64 = 1.0;

pub const BUNDLED_FONT_NAME: &str = "block-digits";
pub const BUNDLED_FONT: &str = include_str!("../../assets/fonts/block-digits.txt");
pub const DEFAULT_LOG_FILE: &str = "/tmp/convert.log";

pub const RETRY_ATTEMPTS: u32 = 3;
pub const RETRY_INITIAL_BACKOFF_MS: u64 = 500;
pub const RETRY_MAX_BACKOFF_MS: u64 = 8_000;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
