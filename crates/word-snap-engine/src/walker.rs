use crate::order::DocumentOrder;
use crate::range::Direction;
use crate::tree::NodeId;

/// Bidirectional cursor over a [`DocumentOrder`].
///
/// The cursor rests on a node. [`Iterator::next`] moves to the node that
/// follows it in document order and [`NodeWalker::previous`] to the one that
/// precedes it. Running off either end of the container returns `None` and
/// leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct NodeWalker<'a> {
    order: &'a DocumentOrder,
    current: Option<usize>,
}

impl<'a> NodeWalker<'a> {
    /// Walker resting on `node`. Exhausted if `node` is outside the container.
    pub fn at(order: &'a DocumentOrder, node: NodeId) -> Self {
        Self {
            order,
            current: order.index_of(node),
        }
    }

    pub(crate) fn at_index(order: &'a DocumentOrder, index: usize) -> Self {
        Self {
            order,
            current: (index < order.len()).then_some(index),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.order.node_at(self.current?)
    }

    pub fn previous(&mut self) -> Option<NodeId> {
        let index = self.current?.checked_sub(1)?;
        self.current = Some(index);
        self.order.node_at(index)
    }

    /// Steps one node in `direction`.
    pub fn step(&mut self, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.previous(),
        }
    }

    /// Nearest text-bearing node in `direction`, empty or not.
    pub fn find_text(&mut self, direction: Direction) -> Option<NodeId> {
        while let Some(node) = self.step(direction) {
            if self.order.is_text(node) {
                return Some(node);
            }
        }
        None
    }

    /// Nearest text-bearing node in `direction` holding at least one character.
    pub fn find_non_empty_text(&mut self, direction: Direction) -> Option<NodeId> {
        while let Some(node) = self.find_text(direction) {
            if self.order.text_len(node).is_some_and(|len| len > 0) {
                return Some(node);
            }
        }
        None
    }

    pub fn next_text(&mut self) -> Option<NodeId> {
        self.find_text(Direction::Forward)
    }

    pub fn previous_text(&mut self) -> Option<NodeId> {
        self.find_text(Direction::Backward)
    }

    pub fn next_non_empty_text(&mut self) -> Option<NodeId> {
        self.find_non_empty_text(Direction::Forward)
    }

    pub fn previous_non_empty_text(&mut self) -> Option<NodeId> {
        self.find_non_empty_text(Direction::Backward)
    }
}

impl Iterator for NodeWalker<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let index = self.current? + 1;
        let node = self.order.node_at(index)?;
        self.current = Some(index);
        Some(node)
    }
}

/// Walker positioned so that its first step yields the node immediately
/// after (or before) `node`. Shorthand for [`NodeWalker::at`].
pub fn iterator_at(order: &DocumentOrder, node: NodeId) -> NodeWalker<'_> {
    NodeWalker::at(order, node)
}
