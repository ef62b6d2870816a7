use crate::range::Range;

/// A live, possibly multi-range selection owned by the host UI.
///
/// The adjuster reads the first range at construction and writes a single
/// range back on restore. Any further ranges are ignored.
pub trait HostSelection {
    fn range_count(&self) -> usize;

    fn range_at(&self, index: usize) -> Option<Range>;

    /// True when the selection holds no range or its first range is collapsed.
    fn is_collapsed(&self) -> bool {
        self.range_at(0).is_none_or(|range| range.is_collapsed())
    }

    fn remove_all_ranges(&mut self);

    fn add_range(&mut self, range: Range);
}

/// In-memory [`HostSelection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSelection {
    ranges: Vec<Range>,
}

impl SimpleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_range(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

impl HostSelection for SimpleSelection {
    fn range_count(&self) -> usize {
        self.ranges.len()
    }

    fn range_at(&self, index: usize) -> Option<Range> {
        self.ranges.get(index).copied()
    }

    fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }

    fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;

    #[test]
    fn empty_selection_is_collapsed() {
        let selection = SimpleSelection::new();
        assert_eq!(selection.range_count(), 0);
        assert!(selection.is_collapsed());
    }

    #[test]
    fn collapsed_state_follows_first_range() {
        let mut selection = SimpleSelection::from_range(Range::within(NodeId(1), 2, 2));
        assert!(selection.is_collapsed());

        selection.remove_all_ranges();
        selection.add_range(Range::within(NodeId(1), 2, 5));
        selection.add_range(Range::within(NodeId(1), 7, 7));
        assert!(!selection.is_collapsed());
        assert_eq!(selection.range_count(), 2);
    }
}
