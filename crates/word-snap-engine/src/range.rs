use crate::tree::NodeId;

/// A position inside the document tree.
///
/// On a text-bearing leaf `offset` is a character index in `0..=len`, where
/// `len` means "just after the last character". On a structural node it is a
/// child index: the point sits before child `offset`, or after the last child
/// when `offset` equals the child count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// An ordered pair of boundary points.
///
/// `start` is expected not to come after `end` in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    /// Range within a single node, e.g. `Range::within(text, 4, 9)`.
    pub fn within(node: NodeId, start: usize, end: usize) -> Self {
        Self::new(BoundaryPoint::new(node, start), BoundaryPoint::new(node, end))
    }

    pub fn collapsed_at(point: BoundaryPoint) -> Self {
        Self::new(point, point)
    }

    /// True when both boundaries are the same point.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn boundary(&self, edge: Edge) -> BoundaryPoint {
        match edge {
            Edge::Start => self.start,
            Edge::End => self.end,
        }
    }

    pub fn boundary_mut(&mut self, edge: Edge) -> &mut BoundaryPoint {
        match edge {
            Edge::Start => &mut self.start,
            Edge::End => &mut self.end,
        }
    }
}

/// Which end of a range an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Edge::Start => Edge::End,
            Edge::End => Edge::Start,
        }
    }

    /// Direction that grows the range at this edge.
    pub fn outward(self) -> Direction {
        match self {
            Edge::Start => Direction::Backward,
            Edge::End => Direction::Forward,
        }
    }

    /// Direction that shrinks the range at this edge.
    pub fn inward(self) -> Direction {
        self.outward().reverse()
    }
}

/// Document-order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}
