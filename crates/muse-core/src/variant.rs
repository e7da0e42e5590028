//! Variant sets: ordered candidate contents for a single channel.

use crate::carousel::{CarouselCursor, Direction};
use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};

/// An ordered, circularly navigable set of candidate contents for one channel.
///
/// A variant set is replaced wholesale by generation fulfillment (cursor
/// reset to 0) and mutated in place only through [`VariantSet::replace_at`]
/// when an edit session commits. Navigation moves the embedded cursor and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    variants: Vec<String>,
    cursor: CarouselCursor,
}

impl VariantSet {
    /// Creates a variant set from generated candidates, cursor at 0.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `variants` is empty.
    pub fn new(variants: Vec<String>) -> Result<Self> {
        if variants.is_empty() {
            return Err(MuseError::invalid_input(
                "variant set requires at least one candidate",
            ));
        }
        let cursor = CarouselCursor::new(variants.len())?;
        Ok(Self { variants, cursor })
    }

    /// Returns the candidate at the current cursor position.
    pub fn current(&self) -> &str {
        // Cursor index is valid by construction
        &self.variants[self.cursor.index()]
    }

    /// Moves the cursor one step, wrapping around. No-op at length 1.
    pub fn advance(&mut self, direction: Direction) {
        self.cursor.advance(direction);
    }

    /// Overwrites the candidate at `index` with `content`.
    ///
    /// Used by edit-session commit; the cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not within `[0, len)`.
    pub fn replace_at(&mut self, index: usize, content: String) -> Result<()> {
        if index >= self.variants.len() {
            return Err(MuseError::index_out_of_range(index, self.variants.len()));
        }
        self.variants[index] = content;
        Ok(())
    }

    /// Returns the current cursor position.
    pub fn cursor_index(&self) -> usize {
        self.cursor.index()
    }

    /// Jumps the cursor to `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not within `[0, len)`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.cursor.select(index)
    }

    /// Number of candidates in the set.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false: construction rejects empty candidate lists.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All candidates in order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VariantSet {
        VariantSet::new(vec!["first".to_string(), "second".to_string()]).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = VariantSet::new(Vec::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_current_follows_cursor() {
        let mut set = sample();
        assert_eq!(set.current(), "first");
        set.advance(Direction::Next);
        assert_eq!(set.current(), "second");
        set.advance(Direction::Next);
        assert_eq!(set.current(), "first");
    }

    #[test]
    fn test_advance_cycles_back_to_start() {
        let mut set = VariantSet::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ])
        .unwrap();
        for _ in 0..set.len() {
            set.advance(Direction::Next);
        }
        assert_eq!(set.cursor_index(), 0);
    }

    #[test]
    fn test_single_variant_navigation_is_noop() {
        let mut set = VariantSet::new(vec!["only".to_string()]).unwrap();
        set.advance(Direction::Next);
        set.advance(Direction::Prev);
        assert_eq!(set.current(), "only");
    }

    #[test]
    fn test_replace_at() {
        let mut set = sample();
        set.replace_at(1, "edited".to_string()).unwrap();
        assert_eq!(set.current(), "first");
        set.advance(Direction::Next);
        assert_eq!(set.current(), "edited");
    }

    #[test]
    fn test_replace_at_out_of_range() {
        let mut set = sample();
        let err = set.replace_at(2, "nope".to_string()).unwrap_err();
        assert!(err.is_index_out_of_range());
    }
}
