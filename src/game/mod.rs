mod clock;
mod direction;
mod food;
mod snake;
mod state;
mod variant;
pub(crate) use self::food::FruitKind;
pub(crate) use self::variant::Variant;
use self::direction::{Cell, Direction};
use self::state::{GameState, InputEvent};
use crate::app::Screen;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::highscore::HighScoreFile;
use crate::menu::Menu;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: a [`GameState`] driven by the terminal
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    state: GameState<R>,
    config: Config,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(variant: Variant, config: Config) -> Self {
        Game::new_with_rng(variant, config, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(variant: Variant, config: Config, rng: R) -> Game<R> {
        let store = if variant.keeps_high_score() {
            config.high_score_file()
        } else {
            HighScoreFile::disabled()
        };
        log::info!("Starting {variant} game");
        Game {
            state: GameState::new(variant, store, rng, clock::MonotonicClock),
            config,
            next_tick: None,
        }
    }

    /// Wait for either the next tick or a key press, whichever comes first,
    /// and act on it.  Once the game is over, only key presses are waited
    /// for.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.state.is_game_over() {
            return Ok(self.handle_event(read()?));
        }
        let period = self.state.tick_period();
        let when = *self.next_tick.get_or_insert_with(|| Instant::now() + period);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.state.tick();
            self.next_tick = None;
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        let variant = self.state.variant();
        let input = match cmd {
            Command::Quit | Command::Q => InputEvent::Quit,
            Command::Up => InputEvent::DirectionPressed(Direction::Up),
            Command::Down => InputEvent::DirectionPressed(Direction::Down),
            Command::Left => InputEvent::DirectionPressed(Direction::Left),
            Command::Right => InputEvent::DirectionPressed(Direction::Right),
            Command::M if self.state.is_game_over() => {
                return Some(Screen::Menu(Menu::new(self.config.clone(), variant)));
            }
            c if c == variant.restart_command() => InputEvent::RestartPressed,
            _ => return None,
        };
        if input == InputEvent::Quit {
            return Some(Screen::Quit);
        }
        self.state.apply_input(input);
        None
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    #[cfg(test)]
    pub(crate) fn variant(&self) -> Variant {
        self.state.variant()
    }

    fn layout(&self, area: Rect) -> GameLayout {
        let display = get_display_area(area);
        let [score, block, msg1, msg2] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let field_size = field_size(self.state.variant());
        let block = center_rect(
            block,
            Size {
                width: field_size.width.saturating_add(2),
                height: field_size.height.saturating_add(2),
            },
        );
        GameLayout {
            score,
            block,
            field: block.inner(Margin::new(1, 1)),
            msg1,
            msg2,
        }
    }

    fn render_score_bar(&self, area: Rect, buf: &mut Buffer) {
        let score = format!(" Score: {}", self.state.score());
        if !self.state.variant().keeps_high_score() {
            Line::styled(score, consts::SCORE_BAR_STYLE).render(area, buf);
            return;
        }
        buf.set_style(area, Style::new().bg(consts::HEADER_COLOR));
        Line::raw(score).render(area, buf);
        Line::from(Span::styled(
            format!("High Score: {}", self.state.high_score()),
            consts::HIGH_SCORE_STYLE,
        ))
        .centered()
        .render(area, buf);
        Line::raw(format!("Time: {}s ", self.state.elapsed_secs()))
            .right_aligned()
            .render(area, buf);
    }

    fn render_game_over(&self, msg1_area: Rect, msg2_area: Rect, buf: &mut Buffer) {
        let variant = self.state.variant();
        let restart = [
            Span::raw("Press "),
            Span::styled(variant.restart_key(), consts::KEY_STYLE),
            Span::raw(" to Restart"),
        ];
        let menu_and_quit = [
            Span::raw("Main Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ];
        let banner = [Span::raw(" "), Span::styled("Game Over!", consts::GAME_OVER_STYLE)];
        if variant.keeps_high_score() {
            Line::from_iter(
                banner
                    .into_iter()
                    .chain([Span::raw(format!("  Final Score: {}", self.state.score()))]),
            )
            .render(msg1_area, buf);
            Line::from_iter(
                std::iter::once(Span::raw(" "))
                    .chain(restart)
                    .chain([Span::raw(" — ")])
                    .chain(menu_and_quit),
            )
            .render(msg2_area, buf);
        } else {
            Line::from_iter(banner.into_iter().chain([Span::raw(" ")]).chain(restart))
                .render(msg1_area, buf);
            Line::from_iter(std::iter::once(Span::raw(" ")).chain(menu_and_quit))
                .render(msg2_area, buf);
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        let variant = self.state.variant();
        self.render_score_bar(layout.score, buf);

        if variant.wraps() {
            DottedBorder.render(layout.block, buf);
        } else {
            Block::bordered().render(layout.block, buf);
        }

        let mut field = Canvas {
            area: layout.field,
            top_row: variant.top_row(),
            buf,
        };
        field.fill(variant.background());
        let snake = self.state.snake();
        for cell in snake.segments().skip(1) {
            field.paint(cell, consts::SNAKE_COLOR);
        }
        field.paint(snake.head(), variant.head_color());
        let food = self.state.food();
        field.paint(food.cell(), food.color());

        if self.state.is_game_over() {
            self.render_game_over(layout.msg1, layout.msg2, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameLayout {
    score: Rect,
    block: Rect,
    field: Rect,
    msg1: Rect,
    msg2: Rect,
}

/// Size in terminal cells of the play field of the given variant, with two
/// grid rows per terminal row
fn field_size(variant: Variant) -> Size {
    Size {
        width: u16::try_from(consts::GRID_WIDTH).unwrap_or_default(),
        height: u16::try_from(variant.rows().saturating_add(1) / 2).unwrap_or_default(),
    }
}

/// Draws grid cells onto the play field area using half-block glyphs
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    /// The grid row drawn in the upper half of the area's first line
    top_row: i32,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn fill(&mut self, color: Color) {
        for pos in self.area.positions() {
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(consts::HALF_BLOCK_SYMBOL);
                cell.set_style(Style::reset().fg(color).bg(color));
            }
        }
    }

    /// Color in a single grid cell.  Cells outside the area are ignored.
    fn paint(&mut self, cell: Cell, color: Color) {
        let Ok(x) = u16::try_from(cell.x) else {
            return;
        };
        let Ok(row) = u16::try_from(cell.y - self.top_row) else {
            return;
        };
        let Some(x) = self.area.x.checked_add(x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row / 2) else {
            return;
        };
        if !self.area.contains(Position::new(x, y)) {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            if row % 2 == 0 {
                c.set_fg(color);
            } else {
                c.set_bg(color);
            }
        }
    }
}

/// Border drawn around a play field whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl DottedBorder {
    fn put(buf: &mut Buffer, x: u16, y: u16, symbol: char) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }
}

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let (left, top) = (area.x, area.y);
        let right = area.right().saturating_sub(1);
        let bottom = area.bottom().saturating_sub(1);
        for (x, y) in [(left, top), (right, top), (right, bottom), (left, bottom)] {
            DottedBorder::put(buf, x, y, '·');
        }
        for x in left.saturating_add(1)..right {
            DottedBorder::put(buf, x, top, '⋯');
            DottedBorder::put(buf, x, bottom, '⋯');
        }
        for y in top.saturating_add(1)..bottom {
            DottedBorder::put(buf, left, y, '⋮');
            DottedBorder::put(buf, right, y, '⋮');
        }
    }
}
