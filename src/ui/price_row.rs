use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Paragraph,
};

use crate::data::Asset;
use crate::ui::{AnimatedValue, DisplayFont, ScreenColors, format_grouped};

/// One converted amount: a large eased number with the currency name below.
#[derive(Clone, Debug)]
pub struct PriceRow {
    asset: Asset,
    display: AnimatedValue,
}

impl PriceRow {
    pub fn new(asset: Asset, magnitude: f64) -> Self {
        Self {
            asset,
            display: AnimatedValue::new(magnitude),
        }
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    pub fn set_target(&mut self, magnitude: f64, now: Instant) -> bool {
        self.display.retarget(magnitude, now)
    }

    pub fn target(&self) -> f64 {
        self.display.target()
    }

    pub fn tick(&mut self, now: Instant) {
        self.display.tick(now);
    }

    pub fn is_easing(&self) -> bool {
        self.display.is_easing()
    }

    /// Symbol and grouped value as shown at `now`.
    pub fn text(&self, now: Instant) -> String {
        let value = format_grouped(self.display.sample(now), self.asset.precision());
        format!("{} {}", self.asset.symbol(), value)
    }

    /// Rows needed to draw this with `font`: the glyphs plus the name line.
    pub fn height(font: &DisplayFont) -> u16 {
        u16::try_from(font.height() + 1).unwrap_or(u16::MAX)
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        font: &DisplayFont,
        colors: &ScreenColors,
        now: Instant,
    ) {
        let value_style = Style::new().fg(colors.value_fg).bg(colors.buffer_bg);
        let mut lines: Vec<Line> = font
            .render(&self.text(now))
            .into_iter()
            .map(|row| Line::styled(row, value_style))
            .collect();
        lines.push(Line::styled(
            self.asset.name(),
            Style::new().fg(colors.label_fg).bg(colors.buffer_bg),
        ));

        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }
}
