//! Module for containing the Snake Game Agent.
use std::collections::VecDeque;

use super::snake_game::{Coord, Result, SnakeAction, SnakeError};

/// The snake moving on a [`crate::models::snake::snake_board::SnakeBoard`].
///
/// `body` runs from the oldest segment at the front to the segment right
/// behind the head at the back.
#[derive(Clone, Debug)]
pub struct SnakeAgent {
    head: Coord,
    body: VecDeque<Coord>,
    direction: SnakeAction,
    target_length: usize,
}

impl SnakeAgent {
    /// Creates a snake with its head at `head` and `length - 1` body segments
    /// trailing to the left of it.
    ///
    /// Segments that would fall left of column 0 are dropped; callers are
    /// expected to validate the length against the board first.
    #[must_use]
    pub fn new(head: Coord, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length);
        for i in (1..length).rev() {
            if let Some(col) = head.1.checked_sub(i) {
                body.push_back((head.0, col));
            }
        }
        Self {
            head,
            body,
            direction: SnakeAction::Up,
            target_length: length,
        }
    }

    /// Moves the head one cell in the direction of `action`, leaving the old
    /// head as the newest body segment.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::OutOfBounds`] if the head would move above row 0
    /// or left of column 0. The snake is left untouched in that case.
    pub fn advance(&mut self, action: SnakeAction) -> Result<()> {
        let (d_row, d_col) = action.value();
        let row = self.head.0.checked_add_signed(isize::from(d_row));
        let col = self.head.1.checked_add_signed(isize::from(d_col));
        let (Some(row), Some(col)) = (row, col) else {
            return Err(SnakeError::OutOfBounds {
                row: self.head.0,
                col: self.head.1,
            });
        };
        self.body.push_back(self.head);
        self.head = (row, col);
        self.direction = action;
        Ok(())
    }

    /// Grows the target length on a food tick, otherwise drops the oldest
    /// segment once the body outgrows the target.
    ///
    /// The length check runs against the target before this tick's growth,
    /// so a freshly grown snake keeps one extra segment for a tick.
    pub fn trim(&mut self, food_eaten: bool) {
        if food_eaten {
            self.target_length += 1;
        } else if self.body.len() > self.target_length {
            self.body.pop_front();
        }
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.head
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    #[must_use]
    pub fn direction(&self) -> SnakeAction {
        self.direction
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Head followed by the body, newest segment first.
    pub fn segments(&self) -> impl Iterator<Item = Coord> + '_ {
        std::iter::once(self.head).chain(self.body.iter().rev().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lays_body_out_to_the_left() {
        let agent = SnakeAgent::new((5, 5), 4);
        assert_eq!(
            agent.body().iter().copied().collect::<Vec<_>>(),
            vec![(5, 2), (5, 3), (5, 4)]
        );
        assert_eq!(agent.target_length(), 4);
        assert_eq!(agent.direction(), SnakeAction::Up);
    }

    #[test]
    fn advance_follows_unit_vectors() {
        let mut agent = SnakeAgent::new((5, 5), 2);
        agent.advance(SnakeAction::Up).unwrap();
        assert_eq!(agent.head(), (4, 5));
        agent.advance(SnakeAction::Left).unwrap();
        assert_eq!(agent.head(), (4, 4));
        agent.advance(SnakeAction::Down).unwrap();
        assert_eq!(agent.head(), (5, 4));
        agent.advance(SnakeAction::Right).unwrap();
        assert_eq!(agent.head(), (5, 5));
        assert_eq!(agent.direction(), SnakeAction::Right);
        assert_eq!(agent.body().back(), Some(&(5, 4)));
        assert_eq!(agent.body().len(), 5);
    }

    #[test]
    fn advance_off_the_top_is_rejected() {
        let mut agent = SnakeAgent::new((0, 3), 2);
        assert!(matches!(
            agent.advance(SnakeAction::Up),
            Err(SnakeError::OutOfBounds { row: 0, col: 3 })
        ));
        assert_eq!(agent.head(), (0, 3));
        assert_eq!(agent.body().len(), 1);
    }

    #[test]
    fn trim_lags_one_tick_behind() {
        let mut agent = SnakeAgent::new((5, 5), 3);
        agent.advance(SnakeAction::Right).unwrap();
        agent.trim(false);
        // body holds length segments before the first trim kicks in
        assert_eq!(agent.body().len(), 3);
        agent.advance(SnakeAction::Right).unwrap();
        agent.trim(false);
        assert_eq!(agent.body().len(), 3);
        assert_eq!(agent.body().front(), Some(&(5, 4)));
    }

    #[test]
    fn food_grows_target_without_trimming() {
        let mut agent = SnakeAgent::new((5, 5), 3);
        agent.advance(SnakeAction::Right).unwrap();
        agent.advance(SnakeAction::Right).unwrap();
        let before = agent.body().len();
        agent.trim(true);
        assert_eq!(agent.target_length(), 4);
        assert_eq!(agent.body().len(), before);
    }

    #[test]
    fn segments_start_at_head() {
        let agent = SnakeAgent::new((2, 3), 3);
        assert_eq!(
            agent.segments().collect::<Vec<_>>(),
            vec![(2, 3), (2, 2), (2, 1)]
        );
    }
}
