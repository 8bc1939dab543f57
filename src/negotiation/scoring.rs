//! Final scoring after both sides agree on dead stones.
//!
//! 1. Every distinct group touched by a mark of either color is removed.
//!    Each removed stone is one point for the *opposing* color.
//! 2. Groups are recomputed. Every empty region bordered by stones of a
//!    single color is worth one point per cell to that color.
//!
//! Note the credit direction differs from captures during play, where the
//! captured stone's own color is credited.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, Groups};
use crate::core::{Cell, Color, ColorMap, Point};

/// Breakdown of a finalized game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Stones removed as dead, by the color of the stones.
    pub removed: ColorMap<u32>,
    /// Territory points awarded.
    pub territory: ColorMap<u32>,
    /// Final prisoner/score counters.
    pub totals: ColorMap<u32>,
}

impl ScoreCard {
    /// The color with the higher total, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Color> {
        let (black, white) = (self.totals[Color::Black], self.totals[Color::White]);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for ScoreCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (color, total) in self.totals.iter() {
            writeln!(f, "{color}: {total} (territory {})", self.territory[color])?;
        }
        match self.leader() {
            Some(color) => write!(f, "{color} wins"),
            None => write!(f, "Draw"),
        }
    }
}

impl Board {
    /// Remove agreed dead groups and add territory. Called once, on mutual
    /// agreement.
    pub(crate) fn finalize(&mut self) -> ScoreCard {
        let mut card = ScoreCard::default();

        for (color, members) in marked_groups(&self.groups, self.takeoff.all_marked()) {
            for point in &members {
                self.grid.set(*point, Cell::Empty);
            }
            let count = members.len() as u32;
            card.removed[color] += count;
            self.prisoners[color.opponent()] += count;
        }

        self.groups = Groups::compute(&self.grid);

        for group in self.groups.iter().filter(|g| g.cell().is_empty()) {
            if let Some(color) = self.groups.sole_bordering_color(group) {
                card.territory[color] += group.len() as u32;
            }
        }
        for color in Color::ALL {
            self.prisoners[color] += card.territory[color];
        }

        card.totals = self.prisoners.clone();
        self.takeoff.set_scored();

        info!(
            black = card.totals[Color::Black],
            white = card.totals[Color::White],
            removed_black = card.removed[Color::Black],
            removed_white = card.removed[Color::White],
            "Game scored"
        );
        card
    }
}

/// Distinct stone groups touched by `marks`, with their color and members.
fn marked_groups(groups: &Groups, marks: impl Iterator<Item = Point>) -> Vec<(Color, Vec<Point>)> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();

    for point in marks {
        let group = groups.at(point);
        if let Some(color) = group.cell().color() {
            if seen.insert(group.id()) {
                out.push((color, group.members().to_vec()));
            }
        }
    }

    out
}
