use ratatui::style::{Color, palette::tailwind};

pub struct ScreenColors {
    pub buffer_bg: Color,
    pub value_fg: Color,
    pub label_fg: Color,
    pub slider_fg: Color,
    pub slider_track: Color,
    pub dragging_fg: Color,
    pub footer_border_color: Color,
    pub error_fg: Color,
}

impl ScreenColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: Color::Black,
            value_fg: Color::White,
            label_fg: tailwind::SLATE.c400,
            slider_fg: color.c400,
            slider_track: tailwind::SLATE.c800,
            dragging_fg: color.c200,
            footer_border_color: color.c400,
            error_fg: tailwind::RED.c400,
        }
    }
}
