//! Per-color dead-stone proposals.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, Point};

/// One color's side of the negotiation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    marked: Vec<Point>,
    ready: bool,
    agreed: bool,
}

impl Proposal {
    /// Points flagged as belonging to dead groups, in marking order.
    #[must_use]
    pub fn marked(&self) -> &[Point] {
        &self.marked
    }

    /// Marking is complete.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The other side's markings were accepted.
    #[must_use]
    pub fn has_agreed(&self) -> bool {
        self.agreed
    }
}

/// Negotiation state attached to an ended board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeOffNegotiation {
    sides: ColorMap<Proposal>,
    scored: bool,
}

impl TakeOffNegotiation {
    #[must_use]
    pub fn proposal(&self, color: Color) -> &Proposal {
        &self.sides[color]
    }

    #[must_use]
    pub fn marked(&self, color: Color) -> &[Point] {
        self.sides[color].marked()
    }

    #[must_use]
    pub fn is_ready(&self, color: Color) -> bool {
        self.sides[color].ready
    }

    #[must_use]
    pub fn has_agreed(&self, color: Color) -> bool {
        self.sides[color].agreed
    }

    /// Final scoring has been applied.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Iterate over marked points of both colors.
    pub fn all_marked(&self) -> impl Iterator<Item = Point> + '_ {
        self.sides.iter().flat_map(|(_, p)| p.marked.iter().copied())
    }

    pub(crate) fn mark(&mut self, color: Color, point: Point) {
        self.sides[color].marked.push(point);
    }

    pub(crate) fn commit(&mut self, color: Color) {
        self.sides[color].ready = true;
    }

    pub(crate) fn agree(&mut self, color: Color) {
        self.sides[color].agreed = true;
    }

    /// Drop every mark and flag of both colors.
    pub(crate) fn reset(&mut self) {
        self.sides = ColorMap::default();
    }

    pub(crate) fn set_scored(&mut self) {
        self.scored = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_flags() {
        let mut takeoff = TakeOffNegotiation::default();

        takeoff.mark(Color::Black, Point::new(1, 1));
        takeoff.mark(Color::White, Point::new(2, 2));
        takeoff.commit(Color::Black);
        takeoff.agree(Color::White);

        assert_eq!(takeoff.marked(Color::Black), &[Point::new(1, 1)]);
        assert!(takeoff.is_ready(Color::Black));
        assert!(!takeoff.is_ready(Color::White));
        assert!(takeoff.has_agreed(Color::White));
        assert_eq!(takeoff.all_marked().count(), 2);
    }

    #[test]
    fn test_reset_clears_both_sides() {
        let mut takeoff = TakeOffNegotiation::default();
        for color in Color::ALL {
            takeoff.mark(color, Point::new(0, 0));
            takeoff.commit(color);
            takeoff.agree(color);
        }

        takeoff.reset();

        for color in Color::ALL {
            assert_eq!(takeoff.proposal(color), &Proposal::default());
        }
    }
}
