use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

/// The snake's body, head first. Never empty: a tail cell is only dropped
/// right after a new head was pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    growth_pending: u32,
}

impl Snake {
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size.max(1) as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, growth_pending: 0 }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Coords]) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least one cell");
        Snake { body: cells.iter().copied().collect(), growth_pending: 0 }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Prepends the cell one step ahead of the head and returns it.
    pub fn push_head(&mut self, direction: Direction) -> Coords {
        let (x, y) = self.head();
        let (dx, dy) = direction.delta();
        let new_head = (x + dx, y + dy);

        self.body.push_front(new_head);
        new_head
    }

    pub fn grow(&mut self) {
        self.growth_pending += 1;
    }

    /// Either spends one pending growth (length kept) or drops the tail.
    /// Returns the dropped cell, if any.
    pub fn settle_tail(&mut self) -> Option<Coords> {
        if self.growth_pending > 0 {
            self.growth_pending -= 1;
            None
        } else if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((1, 0), 2, Right);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(1, 0), (0, 0)]);

        let snake = Snake::new((5, 5), 3, Up);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(5, 5), (5, 6), (5, 7)]);
    }

    #[test]
    fn push_head_then_settle_translates() {
        let mut snake = Snake::new((1, 0), 2, Right);

        assert_eq!(snake.push_head(Right), (2, 0));
        assert_eq!(snake.settle_tail(), Some((0, 0)));
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(2, 0), (1, 0)]);
    }

    #[test]
    fn pending_growth_keeps_the_tail() {
        let mut snake = Snake::new((1, 0), 2, Right);
        snake.grow();
        snake.grow();

        snake.push_head(Down);
        assert_eq!(snake.settle_tail(), None);
        snake.push_head(Down);
        assert_eq!(snake.settle_tail(), None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.growth_pending(), 0);

        snake.push_head(Down);
        assert_eq!(snake.settle_tail(), Some((0, 0)));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn single_cell_never_loses_its_last_cell() {
        let mut snake = Snake::from_cells(&[(3, 3)]);
        assert_eq!(snake.settle_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn detects_head_on_body() {
        let snake = Snake::from_cells(&[(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)]);
        assert!(snake.bites_itself());

        let snake = Snake::from_cells(&[(1, 1), (2, 1), (2, 2)]);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn axis_helpers() {
        assert!(Left.is_horizontal() && Right.is_horizontal());
        assert!(Up.is_vertical() && Down.is_vertical());
        assert!(!Up.is_horizontal());
    }
}
