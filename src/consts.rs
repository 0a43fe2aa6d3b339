//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Number of cells across the play field
pub(crate) const GRID_WIDTH: i32 = 40;

/// Number of cells down the play field, including the header band in the
/// enhanced variant
pub(crate) const GRID_HEIGHT: i32 = 30;

/// In the enhanced variant, the top rows of the grid are reserved for the
/// scoreboard and are never entered by the snake or the food.
pub(crate) const HEADER_ROWS: i32 = 2;

/// How long a special (gold) fruit stays on the board before it is replaced
pub(crate) const SPECIAL_FOOD_LIFETIME: Duration = Duration::from_secs(5);

/// Chance that a freshly-spawned fruit is promoted to special after one is
/// eaten
pub(crate) const SPECIAL_FOOD_CHANCE: f64 = 0.1;

/// Ticks per second in the basic variant
pub(crate) const BASIC_SPEED: u32 = 10;

/// Starting ticks per second in the enhanced variant
pub(crate) const BASE_SPEED: u32 = 6;

/// Fastest tick rate the enhanced variant ramps up to
pub(crate) const MAX_SPEED: u32 = 12;

/// Points needed for each one-step increase in speed
pub(crate) const POINTS_PER_SPEED_STEP: u32 = 10;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph used to draw two vertically-stacked grid cells in one terminal
/// cell: the foreground color is the upper grid cell, the background color
/// the lower one.
pub(crate) const HALF_BLOCK_SYMBOL: char = '▀';

/// Snake body color
pub(crate) const SNAKE_COLOR: Color = Color::Rgb(0, 255, 0);

/// Snake head color in the enhanced variant
pub(crate) const SNAKE_HEAD_COLOR: Color = Color::Rgb(0, 100, 0);

/// Color of the food in the basic variant
pub(crate) const BASIC_FOOD_COLOR: Color = Color::Rgb(255, 0, 0);

/// Color of a special fruit
pub(crate) const GOLD: Color = Color::Rgb(255, 215, 0);

/// Empty play field in the basic variant
pub(crate) const BASIC_BACKGROUND: Color = Color::Rgb(0, 0, 0);

/// Empty play field in the enhanced variant
pub(crate) const BACKGROUND_COLOR: Color = Color::Rgb(15, 15, 30);

/// Scoreboard band in the enhanced variant
pub(crate) const HEADER_COLOR: Color = Color::Rgb(30, 30, 50);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the high score in the score bar
pub(crate) const HIGH_SCORE_STYLE: Style = Style::new().fg(GOLD).add_modifier(Modifier::BOLD);

/// Style for the "Game Over!" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::Rgb(255, 0, 0))
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the title on the menu screen
pub(crate) const TITLE_STYLE: Style = Style::new()
    .fg(SNAKE_COLOR)
    .add_modifier(Modifier::BOLD);
