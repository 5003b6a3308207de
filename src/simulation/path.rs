//! Bounded turn-symbol buffer.

use crate::simulation::heading::Relative;
use crate::simulation::params::PATH_CAPACITY;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path buffer full: capacity is {capacity} symbols")]
    CapacityExceeded { capacity: usize },

    #[error("invalid path symbol {symbol:?} at index {index}")]
    InvalidSymbol { symbol: char, index: usize },
}

/// An ordered sequence of turn symbols with a fixed capacity.
///
/// Appending past the capacity fails instead of truncating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    symbols: Vec<Relative>,
    capacity: usize,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    /// Creates an empty path with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(PATH_CAPACITY)
    }

    /// Creates an empty path holding at most `capacity` symbols. Storage
    /// grows as symbols are recorded.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::new(),
            capacity,
        }
    }

    /// Parses a `UDLR` string into a path of the given capacity.
    ///
    /// # Errors
    ///
    /// Fails on any other character, or if the string does not fit.
    pub fn parse(text: &str, capacity: usize) -> Result<Self, PathError> {
        let mut path = Self::with_capacity(capacity);
        for (index, symbol) in text.chars().enumerate() {
            let turn =
                Relative::from_symbol(symbol).ok_or(PathError::InvalidSymbol { symbol, index })?;
            path.record(turn)?;
        }
        Ok(path)
    }

    /// Appends one symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::CapacityExceeded`] when the buffer is full; the
    /// path is left unchanged.
    pub fn record(&mut self, turn: Relative) -> Result<(), PathError> {
        if self.symbols.len() >= self.capacity {
            return Err(PathError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.symbols.push(turn);
        Ok(())
    }

    /// Replaces `len` symbols starting at `at` with a single `replacement`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn splice_collapse(&mut self, at: usize, len: usize, replacement: Relative) {
        self.symbols.splice(at..at + len, [replacement]);
    }

    /// Start index of the first occurrence of `window`.
    #[must_use]
    pub fn find(&self, window: &[Relative]) -> Option<usize> {
        if window.is_empty() {
            return Some(0);
        }
        self.symbols.windows(window.len()).position(|w| w == window)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Relative> {
        self.symbols.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for turn in &self.symbols {
            write!(f, "{turn}")?;
        }
        Ok(())
    }
}
