//! Immutable document-order snapshot of a container subtree.
//!
//! The snapshot flattens the container and all of its descendants into a
//! pre-order list once, so walking, comparing boundary points and mapping
//! to linear text offsets never touch the live tree again.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::InvalidSelectionError;
use crate::range::{BoundaryPoint, Range};
use crate::tree::{DocumentTree, NodeId, NodeKind};

/// One node of the snapshot, in pre-order.
#[derive(Debug, Clone)]
pub struct OrderEntry {
    pub node: NodeId,
    /// Snapshot index of the parent; `None` for the container.
    pub parent: Option<usize>,
    /// Position among the parent's children.
    pub index_in_parent: usize,
    /// Snapshot index of the last node in this subtree (itself for leaves).
    pub last_descendant: usize,
    /// Snapshot indices of the direct children.
    pub children: Vec<usize>,
    chars: Option<Vec<char>>,
}

impl OrderEntry {
    pub fn is_text(&self) -> bool {
        self.chars.is_some()
    }

    pub fn chars(&self) -> Option<&[char]> {
        self.chars.as_deref()
    }

    /// Valid offset range upper bound: character count for text, child count otherwise.
    pub fn max_offset(&self) -> usize {
        match &self.chars {
            Some(chars) => chars.len(),
            None => self.children.len(),
        }
    }
}

/// Which leaf wins when a linear offset falls exactly between two leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// Prefer the leaf that starts at the offset.
    Start,
    /// Prefer the leaf that ends at the offset.
    End,
}

#[derive(Debug, Clone)]
pub struct DocumentOrder {
    entries: Vec<OrderEntry>,
    positions: HashMap<NodeId, usize>,
}

impl DocumentOrder {
    /// Snapshots `container` and its descendants from `tree`.
    pub fn capture(
        tree: &DocumentTree,
        container: NodeId,
    ) -> Result<Self, InvalidSelectionError> {
        if tree.kind(container).is_none() {
            return Err(InvalidSelectionError::OutsideContainer(container));
        }

        let mut entries: Vec<OrderEntry> = Vec::new();
        let mut positions = HashMap::new();
        let mut stack: Vec<(NodeId, Option<usize>, usize)> = vec![(container, None, 0)];

        while let Some((node, parent, index_in_parent)) = stack.pop() {
            let index = entries.len();
            let chars = match tree.kind(node) {
                Some(NodeKind::Text(text)) => Some(text.chars().collect()),
                _ => None,
            };
            entries.push(OrderEntry {
                node,
                parent,
                index_in_parent,
                last_descendant: index,
                children: Vec::new(),
                chars,
            });
            positions.insert(node, index);
            if let Some(parent) = parent {
                entries[parent].children.push(index);
            }
            for (i, &child) in tree.children(node).iter().enumerate().rev() {
                stack.push((child, Some(index), i));
            }
        }

        // Children always follow their parent, so a reverse sweep sees every
        // subtree's extent before its parent needs it.
        for index in (0..entries.len()).rev() {
            if let Some(&last_child) = entries[index].children.last() {
                entries[index].last_descendant = entries[last_child].last_descendant;
            }
        }

        Ok(Self { entries, positions })
    }

    pub fn container(&self) -> NodeId {
        self.entries[0].node
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the container itself is always captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&OrderEntry> {
        self.entries.get(index)
    }

    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|e| e.node)
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.positions.contains_key(&node)
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        self.entry_for(node).is_some_and(OrderEntry::is_text)
    }

    pub fn text_chars(&self, node: NodeId) -> Option<&[char]> {
        self.entry_for(node)?.chars()
    }

    pub fn text_len(&self, node: NodeId) -> Option<usize> {
        self.text_chars(node).map(<[char]>::len)
    }

    fn entry_for(&self, node: NodeId) -> Option<&OrderEntry> {
        self.entries.get(self.index_of(node)?)
    }

    /// Checks that `point` lies inside the snapshot with an in-range offset.
    pub fn validate(&self, point: BoundaryPoint) -> Result<(), InvalidSelectionError> {
        let entry = self
            .entry_for(point.node)
            .ok_or(InvalidSelectionError::OutsideContainer(point.node))?;
        let len = entry.max_offset();
        if point.offset > len {
            return Err(InvalidSelectionError::OffsetOutOfBounds {
                node: point.node,
                offset: point.offset,
                len,
            });
        }
        Ok(())
    }

    /// Sort key for a point: `(snapshot index, character offset)`.
    ///
    /// Structural points map onto the child they precede, or onto the first
    /// node past their subtree.
    fn point_key(&self, point: BoundaryPoint) -> Option<(usize, usize)> {
        let index = self.index_of(point.node)?;
        let entry = &self.entries[index];
        if entry.is_text() {
            return Some((index, point.offset));
        }
        match entry.children.get(point.offset) {
            Some(&child) => Some((child, 0)),
            None => Some((entry.last_descendant + 1, 0)),
        }
    }

    /// Document-order comparison; `None` if either point is outside the snapshot.
    pub fn compare(&self, a: BoundaryPoint, b: BoundaryPoint) -> Option<Ordering> {
        Some(self.point_key(a)?.cmp(&self.point_key(b)?))
    }

    fn text_entries(&self) -> impl Iterator<Item = (usize, &[char])> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.chars().map(|c| (i, c)))
    }

    /// Total number of characters under the container.
    pub fn text_len_total(&self) -> usize {
        self.text_entries().map(|(_, chars)| chars.len()).sum()
    }

    /// Concatenated text of the container.
    pub fn text(&self) -> String {
        self.text_entries()
            .flat_map(|(_, chars)| chars.iter())
            .collect()
    }

    /// Maps a character offset in the container's text to a boundary point.
    ///
    /// Returns `None` when the offset is past the end of the text or the
    /// container holds no non-empty text leaf.
    pub fn point_at_text_offset(&self, offset: usize, affinity: Affinity) -> Option<BoundaryPoint> {
        let mut consumed = 0;
        let mut last_leaf = None;
        for (index, chars) in self.text_entries().filter(|(_, c)| !c.is_empty()) {
            let len = chars.len();
            let node = self.entries[index].node;
            let hit = match affinity {
                Affinity::Start => offset < consumed + len,
                Affinity::End => offset <= consumed + len,
            };
            if hit && offset >= consumed {
                return Some(BoundaryPoint::new(node, offset - consumed));
            }
            consumed += len;
            last_leaf = Some((node, len));
        }
        match last_leaf {
            Some((node, len)) if offset == consumed => Some(BoundaryPoint::new(node, len)),
            _ => None,
        }
    }

    /// Character offset of `point` in the container's text.
    pub fn text_offset_of(&self, point: BoundaryPoint) -> Option<usize> {
        let (index, offset) = self.point_key(point)?;
        let before: usize = self
            .text_entries()
            .take_while(|(i, _)| *i < index)
            .map(|(_, chars)| chars.len())
            .sum();
        let own = match self.entries.get(index) {
            Some(entry) if entry.is_text() => offset,
            _ => 0,
        };
        Some(before + own)
    }

    /// Text covered by `range`; empty when the range is collapsed or inverted.
    pub fn text_between(&self, range: &Range) -> String {
        let (Some(start), Some(end)) = (
            self.text_offset_of(range.start),
            self.text_offset_of(range.end),
        ) else {
            return String::new();
        };
        if start >= end {
            return String::new();
        }
        self.text_entries()
            .flat_map(|(_, chars)| chars.iter())
            .skip(start)
            .take(end - start)
            .collect()
    }
}
