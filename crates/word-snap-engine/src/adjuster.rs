//! Word-boundary snapping for a single selection range.
//!
//! [`TextSelection`] owns a private copy of the host's first range and moves
//! each boundary independently:
//!
//! - **extend** pushes a boundary outward (start left, end right) while it
//!   sits inside a word, crossing into neighbouring text leaves as needed;
//! - **trim** pulls a boundary inward past a run of delimiters.
//!
//! Both walk the container's text leaves through a [`DocumentOrder`]
//! snapshot taken at construction, so nothing outside the container is ever
//! considered. Neither operation fails: when no further progress is
//! possible the boundary stays at its last valid position.
//!
//! ```
//! use word_snap_engine::{DocumentTree, Range, SimpleSelection, TextSelection};
//!
//! let mut tree = DocumentTree::new("p");
//! let text = tree.append_text(tree.root(), "The quick brown, fox jumps.").unwrap();
//! let mut selection = SimpleSelection::from_range(Range::within(text, 5, 8));
//!
//! let mut adjuster = TextSelection::new(Some(&selection), &tree, tree.root()).unwrap();
//! adjuster.adjust_start();
//! adjuster.adjust_end();
//! adjuster.restore_selection(&mut selection);
//!
//! assert_eq!(adjuster.selected_text(), "quick");
//! assert_eq!(selection.ranges(), &[Range::within(text, 4, 9)]);
//! ```

use std::cmp::Ordering;

use crate::delimiters::DelimiterSet;
use crate::error::InvalidSelectionError;
use crate::order::DocumentOrder;
use crate::range::{BoundaryPoint, Direction, Edge, Range};
use crate::selection::HostSelection;
use crate::tree::{DocumentTree, NodeId};
use crate::walker::NodeWalker;

/// Adjusts one selection range to whole-word boundaries.
#[derive(Debug, Clone)]
pub struct TextSelection {
    order: DocumentOrder,
    delimiters: DelimiterSet,
    range: Range,
}

impl TextSelection {
    /// Clones the first range of `selection` for adjustment inside `container`.
    ///
    /// # Errors
    ///
    /// Fails when the selection is absent, has no ranges, is collapsed, or its
    /// boundaries do not lie inside `container`.
    pub fn new<S: HostSelection + ?Sized>(
        selection: Option<&S>,
        tree: &DocumentTree,
        container: NodeId,
    ) -> Result<Self, InvalidSelectionError> {
        Self::with_delimiters(selection, tree, container, DelimiterSet::default())
    }

    /// Like [`TextSelection::new`] with an explicit delimiter set.
    ///
    /// # Errors
    ///
    /// See [`TextSelection::new`].
    pub fn with_delimiters<S: HostSelection + ?Sized>(
        selection: Option<&S>,
        tree: &DocumentTree,
        container: NodeId,
        delimiters: DelimiterSet,
    ) -> Result<Self, InvalidSelectionError> {
        let selection = selection.ok_or(InvalidSelectionError::Missing)?;
        if selection.range_count() == 0 {
            return Err(InvalidSelectionError::NoRanges);
        }
        if selection.is_collapsed() {
            return Err(InvalidSelectionError::Collapsed);
        }
        let range = selection
            .range_at(0)
            .ok_or(InvalidSelectionError::NoRanges)?;
        Self::from_range_with_delimiters(range, tree, container, delimiters)
    }

    /// Adjusts a bare range value; translating to and from a host selection
    /// is left to the caller.
    ///
    /// # Errors
    ///
    /// Fails when the range is collapsed or inverted, or its boundaries do
    /// not lie inside `container`.
    pub fn from_range(
        range: Range,
        tree: &DocumentTree,
        container: NodeId,
    ) -> Result<Self, InvalidSelectionError> {
        Self::from_range_with_delimiters(range, tree, container, DelimiterSet::default())
    }

    /// # Errors
    ///
    /// See [`TextSelection::from_range`].
    pub fn from_range_with_delimiters(
        range: Range,
        tree: &DocumentTree,
        container: NodeId,
        delimiters: DelimiterSet,
    ) -> Result<Self, InvalidSelectionError> {
        if range.is_collapsed() {
            return Err(InvalidSelectionError::Collapsed);
        }

        let order = DocumentOrder::capture(tree, container)?;
        order.validate(range.start)?;
        order.validate(range.end)?;
        match order.compare(range.start, range.end) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => return Err(InvalidSelectionError::Collapsed),
            _ => return Err(InvalidSelectionError::Inverted),
        }

        Ok(Self {
            order,
            delimiters,
            range,
        })
    }

    /// The current (possibly adjusted) range.
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn into_range(self) -> Range {
        self.range
    }

    pub fn container(&self) -> NodeId {
        self.order.container()
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        &self.delimiters
    }

    /// Text currently covered by the range.
    pub fn selected_text(&self) -> String {
        self.order.text_between(&self.range)
    }

    /// Snaps the start boundary to the start of a word.
    pub fn adjust_start(&mut self) {
        self.adjust(Edge::Start);
    }

    /// Snaps the end boundary to the end of a word.
    pub fn adjust_end(&mut self) {
        self.adjust(Edge::End);
    }

    /// Replaces every range of `selection` with the adjusted range.
    pub fn restore_selection<S: HostSelection + ?Sized>(&self, selection: &mut S) {
        selection.remove_all_ranges();
        selection.add_range(self.range);
    }

    pub fn extend_start(&mut self) {
        self.extend(Edge::Start);
    }

    pub fn extend_end(&mut self) {
        self.extend(Edge::End);
    }

    pub fn trim_start(&mut self) {
        self.trim(Edge::Start);
    }

    pub fn trim_end(&mut self) {
        self.trim(Edge::End);
    }

    /// Moves the start onto the first text leaf at or after it.
    pub fn dive_start_to_text_node(&mut self) -> bool {
        self.dive(Edge::Start)
    }

    /// Moves the end onto the last text leaf at or before it.
    pub fn dive_end_to_text_node(&mut self) -> bool {
        self.dive(Edge::End)
    }

    pub fn move_start_to_next_text_node(&mut self) -> bool {
        self.move_to_adjacent_text(Edge::Start, Direction::Forward)
    }

    pub fn move_start_to_prev_text_node(&mut self) -> bool {
        self.move_to_adjacent_text(Edge::Start, Direction::Backward)
    }

    pub fn move_end_to_next_text_node(&mut self) -> bool {
        self.move_to_adjacent_text(Edge::End, Direction::Forward)
    }

    pub fn move_end_to_prev_text_node(&mut self) -> bool {
        self.move_to_adjacent_text(Edge::End, Direction::Backward)
    }

    fn adjust(&mut self, edge: Edge) {
        if !self.dive(edge) {
            log::debug!("{edge:?} boundary has no text leaf to rest on, leaving it as is");
            return;
        }

        let before = self.point(edge);
        let at_word_edge = self
            .facing_char(before, edge.inward())
            .is_none_or(|ch| self.is_stop(edge, ch));

        if at_word_edge {
            log::debug!("{edge:?} boundary at {before:?} faces a delimiter, trimming");
            let skipped = self.trim(edge);
            // Crossing into a new leaf without passing a delimiter can land
            // mid-word; finish the job so the result is a fixed point.
            if skipped == 0 && self.point(edge) != before && !self.range.is_collapsed() {
                self.extend(edge);
            }
        } else {
            log::debug!("{edge:?} boundary at {before:?} is inside a word, extending");
            self.extend(edge);
            self.trim(edge);
        }
    }

    /// Pushes the boundary outward until the next character is a delimiter
    /// or the container edge is reached.
    fn extend(&mut self, edge: Edge) {
        let direction = edge.outward();
        loop {
            let point = self.point(edge);
            let Some(len) = self.order.text_len(point.node) else {
                break;
            };

            if point.offset == exhausted_offset(len, direction) {
                match self.peek_adjacent(point, direction) {
                    Some(ch) if !self.is_stop(edge, ch) => {
                        if !self.move_to_adjacent_text(edge, direction) {
                            break;
                        }
                    }
                    _ => break,
                }
                continue;
            }

            match self.facing_char(point, direction) {
                Some(ch) if !self.is_stop(edge, ch) => {
                    let next = stepped(point, direction);
                    log::trace!("extend {edge:?}: {point:?} -> {next:?}");
                    self.set_point(edge, next);
                }
                _ => break,
            }
        }
    }

    /// Pulls the boundary inward past delimiters. Returns how many characters
    /// were skipped.
    ///
    /// The boundary never passes the opposite boundary; if it would, it stops
    /// on it and the range collapses there.
    fn trim(&mut self, edge: Edge) -> usize {
        let direction = edge.inward();
        let mut skipped = 0;
        loop {
            let point = self.point(edge);
            let Some(len) = self.order.text_len(point.node) else {
                break;
            };

            if point.offset == exhausted_offset(len, direction) {
                if !self.move_to_adjacent_text(edge, direction) || self.clamp_to_opposite(edge) {
                    break;
                }
                continue;
            }

            match self.facing_char(point, direction) {
                Some(ch) if self.is_stop(edge, ch) => {
                    let next = stepped(point, direction);
                    log::trace!("trim {edge:?}: {point:?} -> {next:?}");
                    self.set_point(edge, next);
                    skipped += 1;
                    if self.clamp_to_opposite(edge) {
                        break;
                    }
                }
                _ => break,
            }
        }
        skipped
    }

    /// Normalizes a boundary resting on a structural node onto a text leaf.
    /// Returns false if no text leaf exists in that direction.
    fn dive(&mut self, edge: Edge) -> bool {
        let point = self.point(edge);
        if self.order.is_text(point.node) {
            return true;
        }
        let Some(entry) = self
            .order
            .index_of(point.node)
            .and_then(|index| self.order.entry(index))
        else {
            return false;
        };

        // Snapshot index of the first node after the point.
        let after = entry
            .children
            .get(point.offset)
            .copied()
            .unwrap_or(entry.last_descendant + 1);

        let found = match edge {
            Edge::Start => {
                let mut walker = NodeWalker::at_index(&self.order, after);
                walker
                    .current()
                    .filter(|&node| self.order.is_text(node))
                    .or_else(|| walker.next_text())
            }
            Edge::End => {
                let mut walker = NodeWalker::at_index(&self.order, after - 1);
                walker
                    .current()
                    .filter(|&node| self.order.is_text(node))
                    .or_else(|| walker.previous_text())
            }
        };
        let Some(node) = found else {
            return false;
        };

        let offset = match edge {
            Edge::Start => 0,
            Edge::End => self.order.text_len(node).unwrap_or(0),
        };
        let target = BoundaryPoint::new(node, offset);
        log::trace!("dive {edge:?}: {point:?} -> {target:?}");
        self.set_point(edge, target);
        true
    }

    /// Moves the boundary onto the nearest non-empty text leaf in `direction`,
    /// at offset 0 when moving forward and at the leaf's end when moving
    /// backward.
    fn move_to_adjacent_text(&mut self, edge: Edge, direction: Direction) -> bool {
        let point = self.point(edge);
        let mut walker = NodeWalker::at(&self.order, point.node);
        let Some(node) = walker.find_non_empty_text(direction) else {
            return false;
        };
        let len = self.order.text_len(node).unwrap_or(0);
        let target = BoundaryPoint::new(node, entry_offset(len, direction));
        log::trace!("move {edge:?}: {point:?} -> {target:?}");
        self.set_point(edge, target);
        true
    }

    /// First character of the nearest non-empty leaf beyond `point`'s node.
    fn peek_adjacent(&self, point: BoundaryPoint, direction: Direction) -> Option<char> {
        let mut walker = NodeWalker::at(&self.order, point.node);
        let node = walker.find_non_empty_text(direction)?;
        let chars = self.order.text_chars(node)?;
        match direction {
            Direction::Forward => chars.first().copied(),
            Direction::Backward => chars.last().copied(),
        }
    }

    /// Character immediately next to `point` within its own leaf.
    fn facing_char(&self, point: BoundaryPoint, direction: Direction) -> Option<char> {
        let chars = self.order.text_chars(point.node)?;
        let index = match direction {
            Direction::Forward => point.offset,
            Direction::Backward => point.offset.checked_sub(1)?,
        };
        chars.get(index).copied()
    }

    /// Stops `edge` on the opposite boundary if it reached or passed it.
    fn clamp_to_opposite(&mut self, edge: Edge) -> bool {
        let point = self.point(edge);
        let opposite = self.point(edge.opposite());
        match (edge, self.order.compare(point, opposite)) {
            (_, Some(Ordering::Equal)) => true,
            (Edge::Start, Some(Ordering::Greater)) | (Edge::End, Some(Ordering::Less)) => {
                log::debug!("{edge:?} boundary crossed {opposite:?}, collapsing");
                self.set_point(edge, opposite);
                true
            }
            _ => false,
        }
    }

    fn is_stop(&self, edge: Edge, ch: char) -> bool {
        match edge {
            Edge::Start => self.delimiters.is_leading_stop(ch),
            Edge::End => self.delimiters.is_trailing_stop(ch),
        }
    }

    fn point(&self, edge: Edge) -> BoundaryPoint {
        self.range.boundary(edge)
    }

    fn set_point(&mut self, edge: Edge, point: BoundaryPoint) {
        *self.range.boundary_mut(edge) = point;
    }
}

/// Offset at which a leaf of `len` characters has nothing left in `direction`.
fn exhausted_offset(len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => len,
        Direction::Backward => 0,
    }
}

/// Offset a boundary takes when it enters a leaf moving in `direction`.
fn entry_offset(len: usize, direction: Direction) -> usize {
    exhausted_offset(len, direction.reverse())
}

fn stepped(point: BoundaryPoint, direction: Direction) -> BoundaryPoint {
    let offset = match direction {
        Direction::Forward => point.offset + 1,
        Direction::Backward => point.offset.saturating_sub(1),
    };
    BoundaryPoint::new(point.node, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SimpleSelection;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const D: &str = "The quick brown, fox jumps.";

    fn single_leaf() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), D).unwrap();
        (tree, text)
    }

    fn adjuster(tree: &DocumentTree, text: NodeId, start: usize, end: usize) -> TextSelection {
        TextSelection::from_range(Range::within(text, start, end), tree, tree.root()).unwrap()
    }

    #[rstest]
    #[case::mid_word(5, 8, 4, 9, "quick")]
    #[case::trailing_punctuation(10, 16, 10, 15, "brown")]
    #[case::exact_word(4, 9, 4, 9, "quick")]
    #[case::leading_space(3, 9, 4, 9, "quick")]
    #[case::spanning_words(6, 12, 4, 15, "quick brown")]
    #[case::first_word(1, 2, 0, 3, "The")]
    #[case::last_word_with_period(22, 27, 21, 26, "jumps")]
    #[case::whole_text(0, 27, 0, 26, "The quick brown, fox jumps")]
    fn snaps_to_words(
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected_start: usize,
        #[case] expected_end: usize,
        #[case] expected_text: &str,
    ) {
        let (tree, text) = single_leaf();
        let mut selection = adjuster(&tree, text, start, end);
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.range(), Range::within(text, expected_start, expected_end));
        assert_eq!(selection.selected_text(), expected_text);
    }

    #[test]
    fn start_and_end_are_independent() {
        let (tree, text) = single_leaf();
        let mut selection = adjuster(&tree, text, 5, 8);
        selection.adjust_start();
        assert_eq!(selection.range(), Range::within(text, 4, 8));

        let mut selection = adjuster(&tree, text, 5, 8);
        selection.adjust_end();
        assert_eq!(selection.range(), Range::within(text, 5, 9));
    }

    #[test]
    fn adjustment_is_idempotent_for_every_range() {
        let (tree, text) = single_leaf();
        let len = D.chars().count();
        for start in 0..len {
            for end in start + 1..=len {
                let mut selection = adjuster(&tree, text, start, end);
                selection.adjust_start();
                selection.adjust_end();
                let once = selection.range();
                selection.adjust_start();
                selection.adjust_end();
                assert_eq!(selection.range(), once, "range {start}..{end}");
            }
        }
    }

    #[test]
    fn adjusted_range_is_never_inverted() {
        let (tree, text) = single_leaf();
        let len = D.chars().count();
        for start in 0..len {
            for end in start + 1..=len {
                let mut selection = adjuster(&tree, text, start, end);
                selection.adjust_end();
                selection.adjust_start();
                let range = selection.range();
                assert!(range.start.offset <= range.end.offset, "range {start}..{end}");
            }
        }
    }

    #[test]
    fn delimiter_only_selection_collapses_in_either_order() {
        let (tree, text) = single_leaf();

        let mut selection = adjuster(&tree, text, 15, 16);
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.range(), Range::within(text, 16, 16));
        assert_eq!(selection.selected_text(), "");

        let mut selection = adjuster(&tree, text, 15, 16);
        selection.adjust_end();
        selection.adjust_start();
        assert_eq!(selection.range(), Range::within(text, 15, 15));
    }

    #[test]
    fn delimiters_up_to_the_container_edge_collapse_at_the_edge() {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), "word ...").unwrap();
        let mut selection = adjuster(&tree, text, 5, 8);
        selection.adjust_start();
        assert_eq!(selection.range(), Range::within(text, 8, 8));
    }

    #[test]
    fn closing_parenthesis_is_trimmed_from_start() {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), "(see above) then").unwrap();
        let mut selection = adjuster(&tree, text, 10, 16);
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.selected_text(), "then");
    }

    #[test]
    fn opening_parenthesis_is_trimmed_from_end() {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), "term (plural)").unwrap();
        let mut selection = adjuster(&tree, text, 0, 6);
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.selected_text(), "term");
    }

    #[test]
    fn custom_delimiters_change_word_edges() {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), "alpha-beta gamma").unwrap();
        let delimiters = DelimiterSet {
            punctuation: vec!['-'],
            ..DelimiterSet::default()
        };
        let mut selection = TextSelection::from_range_with_delimiters(
            Range::within(text, 7, 8),
            &tree,
            tree.root(),
            delimiters,
        )
        .unwrap();
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.selected_text(), "beta");
    }

    #[test]
    fn restore_replaces_all_host_ranges() {
        let (tree, text) = single_leaf();
        let mut host = SimpleSelection::from_range(Range::within(text, 5, 8));
        host.add_range(Range::within(text, 17, 19));

        let mut selection = TextSelection::new(Some(&host), &tree, tree.root()).unwrap();
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(host.ranges().len(), 2, "host untouched until restore");

        selection.restore_selection(&mut host);
        assert_eq!(host.ranges(), &[Range::within(text, 4, 9)]);
    }

    #[test]
    fn construction_rejects_invalid_selections() {
        let (tree, text) = single_leaf();
        let root = tree.root();

        assert_eq!(
            TextSelection::new::<SimpleSelection>(None, &tree, root).unwrap_err(),
            InvalidSelectionError::Missing
        );
        assert_eq!(
            TextSelection::new(Some(&SimpleSelection::new()), &tree, root).unwrap_err(),
            InvalidSelectionError::NoRanges
        );
        let collapsed = SimpleSelection::from_range(Range::within(text, 3, 3));
        assert_eq!(
            TextSelection::new(Some(&collapsed), &tree, root).unwrap_err(),
            InvalidSelectionError::Collapsed
        );
        assert_eq!(
            TextSelection::from_range(Range::within(text, 9, 4), &tree, root).unwrap_err(),
            InvalidSelectionError::Inverted
        );
        assert_eq!(
            TextSelection::from_range(Range::within(text, 0, 40), &tree, root).unwrap_err(),
            InvalidSelectionError::OffsetOutOfBounds {
                node: text,
                offset: 40,
                len: 27
            }
        );
    }

    #[test]
    fn unicode_offsets_are_characters() {
        let mut tree = DocumentTree::new("p");
        let text = tree.append_text(tree.root(), "čaj, kávé a víno").unwrap();
        let mut selection = adjuster(&tree, text, 6, 8);
        selection.adjust_start();
        selection.adjust_end();
        assert_eq!(selection.range(), Range::within(text, 5, 9));
        assert_eq!(selection.selected_text(), "kávé");
    }
}
