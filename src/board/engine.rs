//! The board engine: stone placement, captures and passing.

use tracing::{debug, info};

use super::grid::Grid;
use super::group::Groups;
use crate::core::{BoardSize, Cell, Color, ColorMap, Outcome, Point};
use crate::negotiation::TakeOffNegotiation;

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u8 = 2;

/// Board state for one game.
///
/// ## Rules as implemented
///
/// - A placement writes the mover's stone, recomputes every group and
///   removes every stone group left without an empty neighbor region. That
///   includes the group just placed, so self-capture simply empties the point
///   again. There is no suicide or ko rejection.
/// - Each stone removed during play is credited to the prisoner counter of
///   the removed stone's own color.
/// - Two consecutive passes end the game; `ended` never reverts.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) groups: Groups,
    pub(crate) current_move: Color,
    pub(crate) prisoners: ColorMap<u32>,
    pub(crate) passes: u8,
    pub(crate) ended: bool,
    pub(crate) takeoff: TakeOffNegotiation,
    pub(crate) move_number: u32,
}

impl Board {
    /// An empty board with Black to move.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        let grid = Grid::new(size);
        let groups = Groups::compute(&grid);
        Self {
            grid,
            groups,
            current_move: Color::Black,
            prisoners: ColorMap::default(),
            passes: 0,
            ended: false,
            takeoff: TakeOffNegotiation::default(),
            move_number: 0,
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.grid.size()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Groups of the current position.
    #[must_use]
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Color to move. Frozen once the game has ended.
    #[must_use]
    pub fn current_move(&self) -> Color {
        self.current_move
    }

    /// Prisoner/score counter of `color`.
    #[must_use]
    pub fn prisoners(&self, color: Color) -> u32 {
        self.prisoners[color]
    }

    /// Consecutive passes since the last placement.
    #[must_use]
    pub fn passes(&self) -> u8 {
        self.passes
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[must_use]
    pub fn takeoff(&self) -> &TakeOffNegotiation {
        &self.takeoff
    }

    /// Number of accepted placements and passes so far.
    #[must_use]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Resolve notation against this board's size.
    pub fn point(&self, notation: &str) -> Result<Point, Outcome> {
        Point::parse(notation, self.grid.lines()).map_err(Outcome::from)
    }

    /// Place a stone of the color to move.
    pub fn place_stone(&mut self, notation: &str) -> Outcome {
        if self.ended {
            return Outcome::GameEnded;
        }
        match self.point(notation) {
            Ok(point) => self.place_at(point),
            Err(outcome) => outcome,
        }
    }

    /// Place a stone of the color to move at an already resolved point.
    pub fn place_at(&mut self, point: Point) -> Outcome {
        if self.ended {
            return Outcome::GameEnded;
        }
        if !self.grid.contains(point) {
            return Outcome::InvalidPosition;
        }
        if !self.grid.get(point).is_empty() {
            return Outcome::PlaceTaken;
        }

        let color = self.current_move;
        self.grid.set(point, Cell::stone(color));
        self.groups = Groups::compute(&self.grid);
        let captured = self.remove_dead_groups();

        self.passes = 0;
        self.current_move = color.opponent();
        self.move_number += 1;

        debug!(move_number = self.move_number, %color, %point, captured, "Stone placed");
        Outcome::Accepted
    }

    /// Pass the turn.
    ///
    /// Returns `GameEnded` on the second consecutive pass (and on any pass
    /// after that); the color to move is then left as it was.
    pub fn pass(&mut self) -> Outcome {
        if self.ended {
            return Outcome::GameEnded;
        }

        self.passes += 1;
        self.move_number += 1;

        if self.passes < PASSES_TO_END {
            debug!(move_number = self.move_number, color = %self.current_move, "Pass");
            self.current_move = self.current_move.opponent();
            return Outcome::Accepted;
        }

        self.ended = true;
        info!(move_number = self.move_number, "Game ended after consecutive passes");
        Outcome::GameEnded
    }

    /// Remove every stone group without a liberty, crediting each stone to
    /// its own color. Returns the number of stones removed.
    fn remove_dead_groups(&mut self) -> u32 {
        let dead: Vec<(Color, Vec<Point>)> = self
            .groups
            .dead()
            .filter_map(|g| g.cell().color().map(|c| (c, g.members().to_vec())))
            .collect();

        if dead.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for (color, members) in dead {
            for point in &members {
                self.grid.set(*point, Cell::Empty);
            }
            let count = members.len() as u32;
            self.prisoners[color] += count;
            removed += count;
        }

        self.groups = Groups::compute(&self.grid);
        removed
    }
}
