//! Fixed-width text rendering.
//!
//! Each printed line is one notation column, labelled with its uppercase
//! letter; the header lists the row indices. Every cell takes three
//! characters so two-digit indices on 13x13 and 19x19 boards stay aligned.
//!
//! ```text
//!     0  1  2
//!  A  X  .  .
//!  B  O  .  .
//!  C  .  .  .
//! ```

use std::fmt::Write as _;

use super::engine::Board;
use super::grid::Grid;
use crate::core::{Cell, Point, RenderConfig};

/// Render a grid with the given glyphs.
#[must_use]
pub fn render_grid(grid: &Grid, glyphs: &RenderConfig) -> String {
    let lines = grid.lines();
    let mut out = String::with_capacity((lines + 1) * (lines * 3 + 3));

    out.push_str("  ");
    for row in 0..lines {
        let _ = write!(out, "{row:>3}");
    }

    for col in 0..lines {
        out.push('\n');
        let label = (b'A' + col as u8) as char;
        let _ = write!(out, "{label:>2}");
        for row in 0..lines {
            let glyph = match grid.get(Point::new(col as u8, row as u8)) {
                Cell::Empty => glyphs.empty,
                Cell::Black => glyphs.black,
                Cell::White => glyphs.white,
            };
            let _ = write!(out, "{glyph:>3}");
        }
    }

    out
}

impl Board {
    /// Render the board with the given glyphs.
    #[must_use]
    pub fn render(&self, glyphs: &RenderConfig) -> String {
        render_grid(&self.grid, glyphs)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&RenderConfig::default()))
    }
}
