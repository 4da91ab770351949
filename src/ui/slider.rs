use ratatui::layout::Rect;

use crate::config::{INITIAL_BASE_AMOUNT, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP};

/// Bounded, stepped slider that only reports a value when the user lets go.
///
/// Moving the handle changes a pending position; [`Slider::commit`] turns it
/// into the committed value.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    value: f64,
    pending: Option<f64>,
}

impl Slider {
    pub fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        let mut slider = Self {
            min,
            max,
            step,
            value: min,
            pending: None,
        };
        slider.value = slider.snap(value);
        slider
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Where the handle is drawn: the pending position while dragging.
    pub fn position(&self) -> f64 {
        self.pending.unwrap_or(self.value)
    }

    pub fn is_dragging(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ratio(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        (self.position() - self.min) / (self.max - self.min)
    }

    pub fn nudge(&mut self, delta: f64) {
        self.move_to(self.position() + delta);
    }

    pub fn move_to(&mut self, position: f64) {
        self.pending = Some(self.snap(position));
    }

    pub fn move_to_min(&mut self) {
        self.move_to(self.min);
    }

    pub fn move_to_max(&mut self) {
        self.move_to(self.max);
    }

    pub fn move_to_ratio(&mut self, ratio: f64) {
        self.move_to(self.min + ratio.clamp(0.0, 1.0) * (self.max - self.min));
    }

    /// Moves the handle under terminal column `column` of the bar `area`.
    pub fn drag_to_column(&mut self, area: Rect, column: u16) {
        if area.width <= 1 {
            self.move_to_ratio(0.0);
            return;
        }
        let offset = column.saturating_sub(area.x).min(area.width - 1);
        self.move_to_ratio(f64::from(offset) / f64::from(area.width - 1));
    }

    /// Ends the interaction. Returns the new value if it changed.
    pub fn commit(&mut self) -> Option<f64> {
        let position = self.pending.take()?;
        if position == self.value {
            return None;
        }
        self.value = position;
        Some(position)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn snap(&self, position: f64) -> f64 {
        let clamped = position.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(SLIDER_MIN, SLIDER_MAX, SLIDER_STEP, INITIAL_BASE_AMOUNT)
    }
}
