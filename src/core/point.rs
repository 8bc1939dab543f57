//! Board coordinates and move notation.
//!
//! A move is written as one lowercase letter naming the column followed by a
//! non-negative decimal row index: `a0`, `c12`, `s18`. Columns run `a..z`, so
//! at most 26 columns can be addressed.
//!
//! ```
//! use rust_go::core::Point;
//!
//! let p = Point::parse("c12", 19).unwrap();
//! assert_eq!((p.col, p.row), (2, 12));
//! assert_eq!(p.to_string(), "c12");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::NotationError;

/// Largest number of columns the notation can address.
pub const MAX_COLUMNS: usize = 26;

/// A board intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub col: u8,
    pub row: u8,
}

impl Point {
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Parse move notation against a board of `size` columns and rows.
    ///
    /// Shape errors (too short, non-lowercase column, non-digit row) are
    /// `Malformed`; well-formed notation outside the board is `OutOfBounds`.
    pub fn parse(notation: &str, size: usize) -> Result<Self, NotationError> {
        let mut chars = notation.chars();
        let column = chars.next().ok_or(NotationError::Malformed)?;
        let digits = chars.as_str();

        if !column.is_ascii_lowercase() || digits.is_empty() {
            return Err(NotationError::Malformed);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NotationError::Malformed);
        }

        let col = (column as u8 - b'a') as usize;
        // A digit run too long for usize is still well-formed, just off the board.
        let row = digits.parse::<usize>().map_err(|_| NotationError::OutOfBounds)?;

        if col >= size || row >= size {
            return Err(NotationError::OutOfBounds);
        }

        Ok(Self::new(col as u8, row as u8))
    }

    /// Flat index into a column-major `size * size` cell array.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.col as usize * size + self.row as usize
    }

    /// Inverse of `index`.
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self::new((index / size) as u8, (index % size) as u8)
    }

    /// Orthogonal neighbors that lie on a board of the given size.
    ///
    /// Candidates are filtered into a fresh collection, so edge and corner
    /// points get exactly their 3 or 2 on-board neighbors.
    #[must_use]
    pub fn neighbors(self, size: usize) -> SmallVec<[Point; 4]> {
        let (col, row) = (self.col as isize, self.row as isize);
        let limit = size as isize;

        [(col - 1, row), (col + 1, row), (col, row - 1), (col, row + 1)]
            .into_iter()
            .filter(|&(c, r)| (0..limit).contains(&c) && (0..limit).contains(&r))
            .map(|(c, r)| Point::new(c as u8, r as u8))
            .collect()
    }

    /// Column letter used by the notation.
    #[must_use]
    pub const fn column_letter(self) -> char {
        (b'a' + self.col) as char
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row)
    }
}
