use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, LineGauge, Paragraph, Wrap},
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::app::LoadEvent;
use crate::config::{
    FRAME_DURATION_MS, INFO_TEXT, PALETTES, POLL_DURATION_MS, SLIDER_COARSE_STEP,
    SLIDER_FINE_STEP, SLIDER_STEP,
};
use crate::data::{Action, PriceState};
use crate::store::StateContainer;
use crate::ui::{ConversionScreen, DisplayFont, PriceRow, ScreenColors, format_grouped};

const SLIDER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Failed(String),
    Ready,
}

pub struct TuiApp<C> {
    store: C,
    font: Option<DisplayFont>,
    screen: Option<ConversionScreen>,
    fetch_status: FetchStatus,
    retry_tx: mpsc::UnboundedSender<()>,
    colors: ScreenColors,
    color_index: usize,
    slider_area: Option<Rect>,
}

impl<C> TuiApp<C>
where
    C: StateContainer<State = PriceState, Action = Action>,
{
    pub fn new(store: C, retry_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            store,
            font: None,
            screen: None,
            fetch_status: FetchStatus::Loading,
            retry_tx,
            colors: ScreenColors::new(&PALETTES[0]),
            color_index: 0,
            slider_area: None,
        }
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn screen(&self) -> Option<&ConversionScreen> {
        self.screen.as_ref()
    }

    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch_status
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::FontLoaded(font) => {
                log::debug!("font {} ready, mounting screen", font.name());
                self.font = Some(font);
                if self.screen.is_none() {
                    self.screen = Some(ConversionScreen::mount(&self.store));
                }
            }
            LoadEvent::PricesFetched(update) => {
                self.store.dispatch(Action::UpdateState(update));
                self.fetch_status = FetchStatus::Ready;
                if let Some(screen) = self.screen.as_mut() {
                    screen.sync(Instant::now());
                }
            }
            LoadEvent::PricesFailed(message) => {
                log::error!("prices unavailable: {message}");
                self.fetch_status = FetchStatus::Failed(message);
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.screen
            .as_ref()
            .is_some_and(|screen| screen.is_animating() || screen.slider().is_dragging())
    }

    fn retry(&mut self) {
        if matches!(self.fetch_status, FetchStatus::Failed(_)) {
            log::info!("retrying price fetch");
            self.fetch_status = FetchStatus::Loading;
            let _ = self.retry_tx.send(());
        }
    }

    fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
        self.colors = ScreenColors::new(&PALETTES[self.color_index]);
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ready = self.store.state().is_available;

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') => self.next_color(),
            KeyCode::Char('r') => self.retry(),
            KeyCode::Esc => match self.screen.as_mut() {
                Some(screen) if screen.slider().is_dragging() => screen.slider_mut().cancel(),
                _ => return true,
            },
            _ => {}
        }

        let Some(screen) = self.screen.as_mut().filter(|_| ready) else {
            return false;
        };
        let slider = screen.slider_mut();
        match key.code {
            KeyCode::Right if shift => slider.nudge(SLIDER_FINE_STEP),
            KeyCode::Left if shift => slider.nudge(-SLIDER_FINE_STEP),
            KeyCode::Right => slider.nudge(SLIDER_COARSE_STEP),
            KeyCode::Left => slider.nudge(-SLIDER_COARSE_STEP),
            KeyCode::Char(']') => slider.nudge(SLIDER_STEP),
            KeyCode::Char('[') => slider.nudge(-SLIDER_STEP),
            KeyCode::Home => slider.move_to_min(),
            KeyCode::End => slider.move_to_max(),
            KeyCode::Enter => {
                screen.commit_slider(now);
            }
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(area) = self.slider_area else {
            return;
        };
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        let over_bar = area.contains(Position::new(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if over_bar => {
                screen.slider_mut().drag_to_column(area, mouse.column);
            }
            MouseEventKind::Drag(MouseButton::Left) if screen.slider().is_dragging() => {
                screen.slider_mut().drag_to_column(area, mouse.column);
            }
            MouseEventKind::Up(MouseButton::Left) if screen.slider().is_dragging() => {
                screen.commit_slider(now);
            }
            _ => {}
        }
    }

    pub fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut rx: mpsc::UnboundedReceiver<LoadEvent>,
    ) -> Result<()> {
        loop {
            while let Ok(load_event) = rx.try_recv() {
                self.handle_load_event(load_event);
            }

            let now = Instant::now();
            if let Some(screen) = self.screen.as_mut() {
                screen.sync(now);
            }

            terminal.draw(|frame| self.draw(frame, now))?;

            let timeout = if self.is_animating() {
                FRAME_DURATION_MS
            } else {
                POLL_DURATION_MS
            };
            if event::poll(Duration::from_millis(timeout))? {
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) => {
                            if self.handle_key(key, Instant::now()) {
                                return Ok(());
                            }
                        }
                        Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                        _ => {}
                    }
                }
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();
        frame.render_widget(Block::new().bg(self.colors.buffer_bg), area);
        self.slider_area = None;

        // Nothing but the background until the font is in.
        let (Some(font), Some(screen)) = (self.font.as_ref(), self.screen.as_ref()) else {
            return;
        };

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(area);
        render_footer(frame, footer, &self.colors, &self.fetch_status, screen);

        let Some(rows) = screen.rows() else {
            render_status(frame, body, &self.colors, &self.fetch_status);
            return;
        };

        let inner = body.inner(Margin {
            vertical: 0,
            horizontal: 2,
        });

        // Too short for the glyphs: draw plain text instead of clipping rows.
        let plain;
        let font = if stack_height(rows.len(), font) > inner.height {
            plain = DisplayFont::system_default();
            &plain
        } else {
            font
        };

        let row_height = PriceRow::height(font);
        let (upper, lower) = rows.split_at(2.min(rows.len()));
        let mut constraints = vec![Constraint::Length(row_height); upper.len()];
        constraints.push(Constraint::Length(SLIDER_HEIGHT));
        constraints.extend(vec![Constraint::Length(row_height); lower.len()]);
        let areas = Layout::vertical(constraints)
            .flex(Flex::Center)
            .split(inner);

        for (row, row_area) in upper.iter().zip(areas.iter()) {
            row.render(frame, *row_area, font, &self.colors, now);
        }
        let slider_area = areas[upper.len()];
        self.slider_area = Some(render_slider(frame, slider_area, &self.colors, screen));
        for (row, row_area) in lower.iter().zip(areas.iter().skip(upper.len() + 1)) {
            row.render(frame, *row_area, font, &self.colors, now);
        }
    }
}

/// Rows taken by `count` price rows in `font` plus the slider.
fn stack_height(count: usize, font: &DisplayFont) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    PriceRow::height(font)
        .saturating_mul(count)
        .saturating_add(SLIDER_HEIGHT)
}

/// Draws the slider and returns the area that accepts mouse drags.
fn render_slider(
    frame: &mut Frame,
    area: Rect,
    colors: &ScreenColors,
    screen: &ConversionScreen,
) -> Rect {
    let slider = screen.slider();
    let label_style = if slider.is_dragging() {
        Style::new().fg(colors.dragging_fg).add_modifier(Modifier::ITALIC)
    } else {
        Style::new().fg(colors.label_fg)
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(colors.slider_track))
        .title(Line::styled(
            format!(" USD {} ", format_grouped(slider.position(), 0)),
            label_style,
        ));
    let inner = block.inner(area);

    let gauge = LineGauge::default()
        .ratio(slider.ratio().clamp(0.0, 1.0))
        .label("")
        .filled_style(Style::new().fg(colors.slider_fg))
        .unfilled_style(Style::new().fg(colors.slider_track));

    frame.render_widget(block, area);
    frame.render_widget(gauge, inner);
    inner
}

fn render_status(frame: &mut Frame, area: Rect, colors: &ScreenColors, status: &FetchStatus) {
    let (text, style) = match status {
        FetchStatus::Failed(message) => (
            format!("Could not load prices: {message}\n\n(r) retry | (q) quit"),
            Style::new().fg(colors.error_fg),
        ),
        FetchStatus::Loading | FetchStatus::Ready => (
            "Fetching prices…".to_string(),
            Style::new().fg(colors.label_fg),
        ),
    };
    let [centered] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let paragraph = Paragraph::new(text)
        .style(style.bg(colors.buffer_bg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered);
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    colors: &ScreenColors,
    status: &FetchStatus,
    screen: &ConversionScreen,
) {
    let mut lines: Vec<Line> = INFO_TEXT.iter().map(|text| Line::from(*text)).collect();
    if let FetchStatus::Failed(message) = status {
        if screen.prices().is_available {
            lines = vec![
                Line::styled(
                    format!("refresh failed: {message}"),
                    Style::new().fg(colors.error_fg),
                ),
                Line::from(INFO_TEXT[1]),
            ];
        }
    }

    let info_footer = Paragraph::new(lines)
        .style(Style::new().fg(colors.label_fg).bg(colors.buffer_bg))
        .centered()
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(Style::new().fg(colors.footer_border_color)),
        );
    frame.render_widget(info_footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PriceReducer, PriceUpdate};
    use crate::store::Store;
    use ratatui::{Terminal, backend::TestBackend};

    fn make_app() -> (TuiApp<Store<PriceReducer>>, mpsc::UnboundedReceiver<()>) {
        let (retry_tx, retry_rx) = mpsc::unbounded_channel();
        (TuiApp::new(Store::default(), retry_tx), retry_rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn prices() -> LoadEvent {
        LoadEvent::PricesFetched(PriceUpdate::complete(50_000.0, 100.0, 3_000.0, 0.9))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &mut TuiApp<Store<PriceReducer>>, now: Instant) -> String {
        draw_sized(app, now, 80, 30)
    }

    fn draw_sized(
        app: &mut TuiApp<Store<PriceReducer>>,
        now: Instant,
        width: u16,
        height: u16,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame, now)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn bundled_font_draws_glyphs_when_they_fit() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::bundled()));
        app.handle_load_event(prices());

        let text = draw_sized(&mut app, Instant::now(), 80, 30);

        assert!(text.contains("┏━┓"), "{text}");
        assert!(!text.contains("BTC 0.00002"), "{text}");
        assert!(text.contains("Bitcoin"), "{text}");
        assert!(app.slider_area.is_some());
    }

    #[test]
    fn short_terminal_falls_back_to_plain_text() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::bundled()));
        app.handle_load_event(prices());

        let text = draw_sized(&mut app, Instant::now(), 80, 24);

        assert!(!text.contains("┏━┓"), "{text}");
        for expected in ["$ 1.00", "€ 1.11", "LTC 0.010", "ETH 0.0003", "BTC 0.00002"] {
            assert!(text.contains(expected), "missing {expected}: {text}");
        }
        assert!(text.contains("Bitcoin"), "{text}");
        assert!(text.contains("Litecoin"), "{text}");
    }

    #[test]
    fn stack_height_counts_name_lines_and_slider() {
        assert_eq!(stack_height(5, &DisplayFont::bundled()), 23);
        assert_eq!(stack_height(5, &DisplayFont::system_default()), 13);
    }

    #[test]
    fn prices_reach_the_store() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(prices());
        assert!(app.store().state().is_available);
        assert_eq!(app.store().state().eur_per_usd, 0.9);
        assert_eq!(app.fetch_status(), &FetchStatus::Ready);
    }

    #[test]
    fn nothing_renders_before_the_font() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(prices());
        let text = draw(&mut app, Instant::now());
        assert!(text.trim().is_empty());
        assert!(app.screen().is_none());
    }

    #[test]
    fn end_to_end_conversion_of_a_thousand_dollars() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_load_event(prices());

        let t0 = Instant::now();
        app.screen.as_mut().unwrap().slider_mut().move_to(1_000.0);
        assert!(!app.handle_key(key(KeyCode::Enter), t0));

        let settled = t0 + Duration::from_millis(600);
        app.screen.as_mut().unwrap().sync(settled);
        let text = draw(&mut app, settled);

        assert!(text.contains("$ 1,000.00"), "{text}");
        assert!(text.contains("€ 1,111.11"), "{text}");
        assert!(text.contains("LTC 10.000"), "{text}");
        assert!(text.contains("ETH 0.3333"), "{text}");
        assert!(text.contains("BTC 0.02000"), "{text}");
        assert!(text.contains("Bitcoin"));
    }

    #[test]
    fn arrow_keys_move_then_enter_commits() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_load_event(prices());
        let now = Instant::now();

        app.handle_key(key(KeyCode::Right), now);
        let screen = app.screen().unwrap();
        assert_eq!(screen.slider().position(), 10_001.0);
        assert_eq!(screen.base_amount(), 1.0);

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.screen().unwrap().base_amount(), 10_001.0);
    }

    #[test]
    fn mouse_release_commits_drag() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_load_event(prices());
        let now = Instant::now();
        draw(&mut app, now);
        let bar = app.slider_area.unwrap();

        let mouse = |kind, column| MouseEvent {
            kind,
            column,
            row: bar.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), bar.x), now);
        app.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), bar.right() - 1),
            now,
        );
        assert_eq!(app.screen().unwrap().base_amount(), 1.0);

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), bar.right() - 1), now);
        assert_eq!(app.screen().unwrap().base_amount(), 1_000_000.0);
        assert!(app.screen().unwrap().is_animating());
    }

    #[test]
    fn esc_cancels_drag_before_quitting() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_load_event(prices());
        let now = Instant::now();

        app.handle_key(key(KeyCode::End), now);
        assert!(!app.handle_key(key(KeyCode::Esc), now));
        assert!(!app.screen().unwrap().slider().is_dragging());
        assert!(app.handle_key(key(KeyCode::Esc), now));
    }

    #[test]
    fn slider_ignores_keys_until_prices_arrive() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_key(key(KeyCode::End), Instant::now());
        assert!(!app.screen().unwrap().slider().is_dragging());
    }

    #[test]
    fn failure_is_shown_and_retry_requested() {
        let (mut app, mut retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        app.handle_load_event(LoadEvent::PricesFailed("BTC: timed out".to_string()));

        let text = draw(&mut app, Instant::now());
        assert!(text.contains("Could not load prices: BTC: timed out"), "{text}");

        app.handle_key(key(KeyCode::Char('r')), Instant::now());
        assert_eq!(app.fetch_status(), &FetchStatus::Loading);
        assert!(retry_rx.try_recv().is_ok());

        app.handle_key(key(KeyCode::Char('r')), Instant::now());
        assert!(retry_rx.try_recv().is_err());
    }

    #[test]
    fn loading_message_while_fetching() {
        let (mut app, _retry_rx) = make_app();
        app.handle_load_event(LoadEvent::FontLoaded(DisplayFont::system_default()));
        let text = draw(&mut app, Instant::now());
        assert!(text.contains("Fetching prices"), "{text}");
    }

    #[test]
    fn q_quits() {
        let (mut app, _retry_rx) = make_app();
        assert!(app.handle_key(key(KeyCode::Char('q')), Instant::now()));
    }
}
