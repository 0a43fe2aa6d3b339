use super::direction::Cell;
use super::variant::Variant;
use crate::consts;
use rand::{seq::IndexedRandom, Rng};
use ratatui::style::Color;
use std::time::Instant;

/// The categories of food.  The basic variant only ever uses `Food`; the
/// enhanced variant draws from the five fruits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FruitKind {
    Food,
    Apple,
    Banana,
    Orange,
    Blueberry,
    Grape,
}

impl FruitKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            FruitKind::Food => "food",
            FruitKind::Apple => "apple",
            FruitKind::Banana => "banana",
            FruitKind::Orange => "orange",
            FruitKind::Blueberry => "blueberry",
            FruitKind::Grape => "grape",
        }
    }

    pub(crate) fn points(self) -> u32 {
        match self {
            FruitKind::Food | FruitKind::Apple => 1,
            FruitKind::Banana => 2,
            FruitKind::Orange => 3,
            FruitKind::Blueberry => 4,
            FruitKind::Grape => 5,
        }
    }

    pub(crate) fn color(self) -> Color {
        match self {
            FruitKind::Food => consts::BASIC_FOOD_COLOR,
            FruitKind::Apple => Color::Rgb(255, 59, 59),
            FruitKind::Banana => Color::Rgb(255, 225, 53),
            FruitKind::Orange => Color::Rgb(255, 159, 41),
            FruitKind::Blueberry => Color::Rgb(41, 128, 255),
            FruitKind::Grape => Color::Rgb(155, 89, 182),
        }
    }
}

/// The single piece of food on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    cell: Cell,
    kind: FruitKind,
    points: u32,
    /// When the food was made special; `None` for ordinary food
    special_since: Option<Instant>,
}

impl Food {
    pub(crate) fn new(cell: Cell, kind: FruitKind) -> Food {
        Food {
            cell,
            kind,
            points: kind.points(),
            special_since: None,
        }
    }

    /// Create a fresh, non-special food at a uniformly random cell of the
    /// variant's play field with a uniformly random kind from the variant's
    /// catalog.
    ///
    /// Cells occupied by the snake are *not* excluded, so food can land
    /// underneath the snake's body.
    pub(crate) fn spawn<R: Rng + ?Sized>(rng: &mut R, variant: Variant) -> Food {
        let x = rng.random_range(0..consts::GRID_WIDTH);
        let y = rng.random_range(variant.top_row()..consts::GRID_HEIGHT);
        let kind = variant
            .fruits()
            .choose(rng)
            .copied()
            .unwrap_or(FruitKind::Food);
        Food::new(Cell::new(x, y), kind)
    }

    /// Turn this food into a special food worth double, with its lifetime
    /// starting at `now`
    pub(crate) fn promote_to_special(&mut self, now: Instant) {
        self.special_since = Some(now);
        self.points = self.points.saturating_mul(2);
    }

    /// Has this special food been on the board for longer than its
    /// lifetime?  Always `false` for ordinary food.
    pub(crate) fn expired(&self, now: Instant) -> bool {
        self.special_since
            .is_some_and(|t| now.saturating_duration_since(t) > consts::SPECIAL_FOOD_LIFETIME)
    }

    pub(crate) fn cell(&self) -> Cell {
        self.cell
    }

    pub(crate) fn kind(&self) -> FruitKind {
        self.kind
    }

    pub(crate) fn points(&self) -> u32 {
        self.points
    }

    pub(crate) fn is_special(&self) -> bool {
        self.special_since.is_some()
    }

    pub(crate) fn color(&self) -> Color {
        if self.is_special() {
            consts::GOLD
        } else {
            self.kind.color()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn spawn_stays_in_basic_field() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..1000 {
            let food = Food::spawn(&mut rng, Variant::Basic);
            assert!(Variant::Basic.contains(food.cell()));
            assert_eq!(food.kind(), FruitKind::Food);
            assert_eq!(food.points(), 1);
            assert!(!food.is_special());
        }
    }

    #[test]
    fn spawn_avoids_header_rows() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut seen_kinds = Vec::new();
        for _ in 0..1000 {
            let food = Food::spawn(&mut rng, Variant::Enhanced);
            assert!(food.cell().y >= consts::HEADER_ROWS);
            assert!(Variant::Enhanced.contains(food.cell()));
            assert_ne!(food.kind(), FruitKind::Food);
            assert_eq!(food.points(), food.kind().points());
            if !seen_kinds.contains(&food.kind()) {
                seen_kinds.push(food.kind());
            }
        }
        assert_eq!(seen_kinds.len(), 5);
    }

    #[test]
    fn promote_doubles_points_and_turns_gold() {
        let mut food = Food::new(Cell::new(3, 4), FruitKind::Orange);
        assert_eq!(food.color(), FruitKind::Orange.color());
        food.promote_to_special(Instant::now());
        assert!(food.is_special());
        assert_eq!(food.points(), 6);
        assert_eq!(food.color(), consts::GOLD);
        assert_eq!(food.kind(), FruitKind::Orange);
    }

    #[test]
    fn special_expires_strictly_after_lifetime() {
        let start = Instant::now();
        let mut food = Food::new(Cell::new(3, 4), FruitKind::Apple);
        food.promote_to_special(start);
        assert!(!food.expired(start));
        assert!(!food.expired(start + consts::SPECIAL_FOOD_LIFETIME));
        assert!(food.expired(start + consts::SPECIAL_FOOD_LIFETIME + Duration::from_millis(1)));
    }

    #[test]
    fn ordinary_food_never_expires() {
        let start = Instant::now();
        let food = Food::new(Cell::new(3, 4), FruitKind::Grape);
        assert!(!food.expired(start + Duration::from_secs(3600)));
    }
}
