use super::direction::{Cell, Direction};
use super::variant::Variant;
use std::collections::VecDeque;

/// Snake state.
///
/// The snake is never empty: `head` always exists, and `body` holds the
/// remaining segments in order, with the segment immediately behind the head
/// at the front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the rest of the snake, nearest the head first
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake will move on the next advance
    pub(super) heading: Direction,

    /// If set, the next advance keeps the tail instead of dropping it
    pub(super) pending_growth: bool,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `heading`
    pub(crate) fn new(head: Cell, heading: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            heading,
            pending_growth: false,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterate over every cell of the snake from head to tail
    pub(crate) fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Turn the snake to face `direction`, unless that would reverse it onto
    /// itself
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if direction != self.heading.reverse() {
            self.heading = direction;
        }
    }

    /// Keep the tail on the next advance
    pub(crate) fn grow_next(&mut self) {
        self.pending_growth = true;
    }

    /// Move the snake forwards one cell.  In a wrapping variant the new head
    /// re-enters at the opposite edge; otherwise it may end up outside the
    /// field, which the caller is expected to check for.
    pub(crate) fn advance(&mut self, variant: Variant) {
        let mut next = self.heading.step(self.head);
        if variant.wraps() {
            next = variant.wrap(next);
        }
        self.body.push_front(self.head);
        self.head = next;
        if !self.pending_growth {
            let _ = self.body.pop_back();
        }
        self.pending_growth = false;
    }

    /// Does the head occupy the same cell as any other segment?
    pub(crate) fn collides_with_self(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Build a snake from `(x, y)` pairs listed head first
    #[cfg(test)]
    pub(super) fn from_cells(cells: &[(i32, i32)], heading: Direction) -> Snake {
        let mut cells = cells.iter().map(|&(x, y)| Cell::new(x, y));
        let head = cells.next().expect("test snake should not be empty");
        Snake {
            head,
            body: cells.collect(),
            heading,
            pending_growth: false,
        }
    }
}
