use crate::tree::NodeId;

/// Reasons a selection cannot be adjusted.
///
/// Raised only at construction; adjustment itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelectionError {
    #[error("Invalid selection: no selection supplied")]
    Missing,
    #[error("Invalid selection: selection has no ranges")]
    NoRanges,
    #[error("Invalid selection: selection is collapsed")]
    Collapsed,
    #[error("Invalid selection: start boundary comes after end boundary")]
    Inverted,
    #[error("Invalid selection: node {0} is not inside the container")]
    OutsideContainer(NodeId),
    #[error("Invalid selection: offset {offset} is out of bounds for node {node} (length {len})")]
    OffsetOutOfBounds {
        node: NodeId,
        offset: usize,
        len: usize,
    },
}
