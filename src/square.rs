//! Board squares as 0–63 indices.
//!
//! TCN addresses squares by a single number, `file + rank * 8`, so
//! a1 = 0, b1 = 1, ..., h8 = 63. [`Square`] keeps that index behind a
//! type that can only hold values in range.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0:?} is not a valid square name")]
pub struct InvalidSquare(pub String);

/// A square on the 8x8 board, stored as its 0–63 index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Creates a square from a 0–63 index, `None` if out of range.
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from an index already known to be in range.
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// The 0–63 board index.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The 0-based file, 0 = a-file.
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// The 0-based rank, 0 = first rank.
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2
            || !(b'a'..=b'h').contains(&bytes[0])
            || !(b'1'..=b'8').contains(&bytes[1])
        {
            return Err(InvalidSquare(s.to_string()));
        }
        let file = bytes[0] - b'a';
        let rank = bytes[1] - b'1';
        Ok(Square(file + rank * 8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}
