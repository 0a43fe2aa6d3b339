use super::direction::Cell;
use super::food::FruitKind;
use crate::command::Command;
use crate::consts;
use enum_map::Enum;
use ratatui::style::Color;
use serde::Deserialize;
use std::fmt;

/// The two rule sets the game can be played under.  Everything that differs
/// between them is answered here so that the update loop has a single path.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Variant {
    /// Walls are fatal, one kind of food, fixed speed, no high score
    Basic,

    /// Wraparound field below a scoreboard, five fruits, special fruits,
    /// speed ramp, persisted high score
    #[default]
    Enhanced,
}

impl Variant {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Variant::Basic => "Classic",
            Variant::Enhanced => "Fruits",
        }
    }

    /// Does the snake re-enter from the opposite edge instead of dying?
    pub(crate) fn wraps(self) -> bool {
        self == Variant::Enhanced
    }

    /// The first row of the grid that is part of the play field
    pub(crate) fn top_row(self) -> i32 {
        match self {
            Variant::Basic => 0,
            Variant::Enhanced => consts::HEADER_ROWS,
        }
    }

    /// Number of rows in the play field
    pub(crate) fn rows(self) -> i32 {
        consts::GRID_HEIGHT - self.top_row()
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..consts::GRID_WIDTH).contains(&cell.x)
            && (self.top_row()..consts::GRID_HEIGHT).contains(&cell.y)
    }

    /// Bring a cell that has stepped off one edge back in at the opposite
    /// edge.  The header rows count as "off the top".
    pub(crate) fn wrap(self, cell: Cell) -> Cell {
        Cell {
            x: wrap_axis(cell.x, 0, consts::GRID_WIDTH),
            y: wrap_axis(cell.y, self.top_row(), consts::GRID_HEIGHT),
        }
    }

    /// Is a head at `cell` dead from hitting a wall?
    pub(crate) fn hits_wall(self, cell: Cell) -> bool {
        !self.wraps() && !self.contains(cell)
    }

    /// The catalog that newly-spawned food is drawn from
    pub(crate) fn fruits(self) -> &'static [FruitKind] {
        match self {
            Variant::Basic => &[FruitKind::Food],
            Variant::Enhanced => &[
                FruitKind::Apple,
                FruitKind::Banana,
                FruitKind::Orange,
                FruitKind::Blueberry,
                FruitKind::Grape,
            ],
        }
    }

    /// Probability that the food spawned after an eat is made special.
    /// `None` if special food does not exist in this variant.
    pub(crate) fn special_food_chance(self) -> Option<f64> {
        match self {
            Variant::Basic => None,
            Variant::Enhanced => Some(consts::SPECIAL_FOOD_CHANCE),
        }
    }

    /// Ticks per second at the given score
    pub(crate) fn speed_for(self, score: u32) -> u32 {
        match self {
            Variant::Basic => consts::BASIC_SPEED,
            Variant::Enhanced => consts::BASE_SPEED
                .saturating_add(score / consts::POINTS_PER_SPEED_STEP)
                .min(consts::MAX_SPEED),
        }
    }

    /// Is the high score loaded, saved, and shown?
    pub(crate) fn keeps_high_score(self) -> bool {
        self == Variant::Enhanced
    }

    /// Is the time since the start of the game tracked and shown?
    pub(crate) fn tracks_time(self) -> bool {
        self == Variant::Enhanced
    }

    /// The command that starts a new game after a game over
    pub(crate) fn restart_command(self) -> Command {
        match self {
            Variant::Basic => Command::R,
            Variant::Enhanced => Command::Space,
        }
    }

    /// The name of the restart key as shown to the player
    pub(crate) fn restart_key(self) -> &'static str {
        match self {
            Variant::Basic => "R",
            Variant::Enhanced => "SPACE",
        }
    }

    pub(crate) fn head_color(self) -> Color {
        match self {
            Variant::Basic => consts::SNAKE_COLOR,
            Variant::Enhanced => consts::SNAKE_HEAD_COLOR,
        }
    }

    pub(crate) fn background(self) -> Color {
        match self {
            Variant::Basic => consts::BASIC_BACKGROUND,
            Variant::Enhanced => consts::BACKGROUND_COLOR,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn wrap_axis(value: i32, low: i32, high: i32) -> i32 {
    if value < low {
        high - 1
    } else if value >= high {
        low
    } else {
        value
    }
}
