//! Stone colors and per-color data storage.
//!
//! ## Color
//!
//! The two playing colors. Black always moves first.
//!
//! ## Cell
//!
//! Contents of one board intersection: empty or a stone of one color.
//! Groups reuse `Cell` as their "color" so that empty regions and stone
//! chains are handled by the same flood fill.
//!
//! ## ColorMap
//!
//! Fixed two-slot storage indexed by `Color` (prisoners, proposals, totals).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two playing colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colors in move order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// The other color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Slot index (Black = 0, White = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Contents of a board cell, also used as the color of a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// A stone of the given color.
    #[must_use]
    pub const fn stone(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }

    /// The stone's color, or `None` for an empty cell.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Cell::stone(color)
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_go::core::{Color, ColorMap};
///
/// let mut prisoners: ColorMap<u32> = ColorMap::default();
/// prisoners[Color::White] += 3;
///
/// assert_eq!(prisoners[Color::Black], 0);
/// assert_eq!(prisoners[Color::White], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: [factory(Color::Black), factory(Color::White)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in move order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Color, &mut T) pairs in move order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
