//! Circular index cursor shared by variant navigation and image galleries.

use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};

/// Navigation direction for circular cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

/// A circular cursor over a fixed-length sequence.
///
/// The cursor is always valid modulo the sequence length: `advance` wraps
/// at both ends and is a no-op when the sequence has a single element.
/// Galleries, logo pickers and variant sets all navigate through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselCursor {
    index: usize,
    length: usize,
}

impl CarouselCursor {
    /// Creates a cursor over a sequence of `length` elements, positioned at 0.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `length` is zero.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(MuseError::invalid_input(
                "cursor length must be at least 1",
            ));
        }
        Ok(Self { index: 0, length })
    }

    /// Returns the current index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the sequence length this cursor ranges over.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always false: construction rejects zero-length sequences.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Moves the cursor one step in `direction`, wrapping at both ends.
    ///
    /// A no-op (not an error) when the sequence has a single element.
    pub fn advance(&mut self, direction: Direction) {
        if self.length == 1 {
            return;
        }
        self.index = match direction {
            Direction::Next => (self.index + 1) % self.length,
            Direction::Prev => (self.index + self.length - 1) % self.length,
        };
    }

    /// Jumps the cursor directly to `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not within `[0, len)`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.length {
            return Err(MuseError::index_out_of_range(index, self.length));
        }
        self.index = index;
        Ok(())
    }

    /// Resets the cursor to position 0.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_length() {
        let err = CarouselCursor::new(0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_advance_wraps_forward_and_backward() {
        let mut cursor = CarouselCursor::new(3).unwrap();
        cursor.advance(Direction::Prev);
        assert_eq!(cursor.index(), 2);
        cursor.advance(Direction::Next);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_cyclic_law() {
        // advance(Next) N times returns to the original index
        for len in 1..=5 {
            let mut cursor = CarouselCursor::new(len).unwrap();
            cursor.select(len / 2).unwrap();
            let origin = cursor.index();
            for _ in 0..len {
                cursor.advance(Direction::Next);
            }
            assert_eq!(cursor.index(), origin);
        }
    }

    #[test]
    fn test_single_element_is_noop() {
        let mut cursor = CarouselCursor::new(1).unwrap();
        cursor.advance(Direction::Next);
        cursor.advance(Direction::Prev);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut cursor = CarouselCursor::new(2).unwrap();
        let err = cursor.select(2).unwrap_err();
        assert!(matches!(
            err,
            MuseError::IndexOutOfRange { index: 2, len: 2 }
        ));
    }
}
