//! Group discovery.
//!
//! A group is a maximal 4-connected set of cells with the same contents:
//! a chain of stones of one color, or a contiguous empty region. Groups are
//! computed from scratch for a given grid and never mutated afterwards; a
//! `Groups` value is a snapshot of one board state.
//!
//! ## Liberties
//!
//! A stone group is alive while at least one of its neighbor groups is an
//! empty region. The size of that region does not matter.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::{Cell, Color, Point};

/// Identifier of a group within one `Groups` snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One connected region of identical cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    cell: Cell,
    members: Vec<Point>,
    neighbors: Vec<GroupId>,
}

impl Group {
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Contents shared by every member (`Cell::Empty` for empty regions).
    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Member points in ascending order.
    #[must_use]
    pub fn members(&self) -> &[Point] {
        &self.members
    }

    /// Adjacent groups, all of differing contents, in ascending id order.
    #[must_use]
    pub fn neighbors(&self) -> &[GroupId] {
        &self.neighbors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.members.binary_search(&point).is_ok()
    }
}

/// All groups of one board state.
#[derive(Clone, Debug)]
pub struct Groups {
    lines: usize,
    groups: Vec<Group>,
    owner: Vec<GroupId>,
}

impl Groups {
    /// Partition the grid into groups.
    ///
    /// Uses an explicit work stack, so long chains on a 19x19 board do not
    /// grow the call stack.
    #[must_use]
    pub fn compute(grid: &Grid) -> Self {
        let lines = grid.lines();
        let cells = grid.cells();
        let mut owner: Vec<Option<GroupId>> = vec![None; cells.len()];
        let mut groups = Vec::new();
        let mut stack = Vec::new();

        for start in 0..cells.len() {
            if owner[start].is_some() {
                continue;
            }

            let id = GroupId(groups.len() as u32);
            let cell = cells[start];
            let mut members = Vec::new();

            owner[start] = Some(id);
            stack.push(start);

            while let Some(index) = stack.pop() {
                let point = Point::from_index(index, lines);
                members.push(point);

                for next in point.neighbors(lines) {
                    let next_index = next.index(lines);
                    if owner[next_index].is_none() && cells[next_index] == cell {
                        owner[next_index] = Some(id);
                        stack.push(next_index);
                    }
                }
            }

            members.sort_unstable();
            groups.push(Group {
                id,
                cell,
                members,
                neighbors: Vec::new(),
            });
        }

        // Every cell was claimed by the loop above.
        let owner: Vec<GroupId> = owner.into_iter().flatten().collect();

        let mut adjacency = vec![FxHashSet::default(); groups.len()];
        for (index, &id) in owner.iter().enumerate() {
            for next in Point::from_index(index, lines).neighbors(lines) {
                let other = owner[next.index(lines)];
                if other != id {
                    adjacency[id.index()].insert(other);
                }
            }
        }

        for (group, set) in groups.iter_mut().zip(adjacency) {
            let mut neighbors: Vec<GroupId> = set.into_iter().collect();
            neighbors.sort_unstable();
            group.neighbors = neighbors;
        }

        Self {
            lines,
            groups,
            owner,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    /// The group containing `point`.
    #[must_use]
    pub fn at(&self, point: Point) -> &Group {
        &self.groups[self.owner[point.index(self.lines)].index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Whether any neighbor of `group` is an empty region.
    #[must_use]
    pub fn has_liberty(&self, group: &Group) -> bool {
        group
            .neighbors
            .iter()
            .any(|&n| self.groups[n.index()].cell.is_empty())
    }

    /// Stone groups without a liberty.
    pub fn dead(&self) -> impl Iterator<Item = &Group> {
        self.groups
            .iter()
            .filter(|g| !g.cell.is_empty() && !self.has_liberty(g))
    }

    /// The single stone color bordering `group`, if there is exactly one.
    ///
    /// Used for territory: an empty region touching only black stones
    /// belongs to Black. Regions touching both colors, or no stones at
    /// all, return `None`.
    #[must_use]
    pub fn sole_bordering_color(&self, group: &Group) -> Option<Color> {
        let mut colors = group
            .neighbors
            .iter()
            .filter_map(|&n| self.groups[n.index()].cell.color());

        let first = colors.next()?;
        colors.all(|c| c == first).then_some(first)
    }
}
