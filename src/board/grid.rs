//! Flat storage for board cells.

use serde::{Deserialize, Serialize};

use crate::core::{BoardSize, Cell, Point};

/// `size * size` cells, indexed column-major by `Point::index`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An empty grid.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.area()],
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of lines in each direction.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.size.lines()
    }

    /// Whether `point` lies on this grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let lines = self.lines();
        (point.col as usize) < lines && (point.row as usize) < lines
    }

    /// Cell at `point`. The point must be on the grid.
    #[must_use]
    pub fn get(&self, point: Point) -> Cell {
        debug_assert!(self.contains(point), "{point:?} is off a {} board", self.size);
        self.cells[point.index(self.lines())]
    }

    /// Overwrite the cell at `point`. The point must be on the grid.
    pub fn set(&mut self, point: Point, cell: Cell) {
        debug_assert!(self.contains(point), "{point:?} is off a {} board", self.size);
        let index = point.index(self.lines());
        self.cells[index] = cell;
    }

    /// All points, column by column.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let lines = self.lines();
        (0..lines * lines).map(move |i| Point::from_index(i, lines))
    }

    /// Number of cells holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
