//! # word-snap-engine
//!
//! Snaps a free-form text selection inside a rendered document to whole-word
//! boundaries, so the selected span can be annotated as a term occurrence.
//!
//! ## Pipeline
//!
//! ```text
//! host selection ──► TextSelection (private Range clone)
//!                        │  adjust_start / adjust_end
//!                        ▼
//!                    DocumentOrder snapshot ──► NodeWalker ──► DelimiterSet
//!                        │
//!                        ▼
//!                  restore_selection ──► host selection
//! ```
//!
//! - [`tree`]: the document being annotated (text leaves and structural nodes)
//! - [`order`]: immutable pre-order snapshot of the container subtree
//! - [`walker`]: bidirectional cursor over the snapshot
//! - [`delimiters`]: which characters separate words
//! - [`adjuster`]: the extend/trim boundary algorithm
//! - [`selection`]: the seam to the host's multi-range selection
//!
//! Only the first range of a host selection is ever used.

pub mod adjuster;
pub mod delimiters;
pub mod error;
pub mod order;
pub mod range;
pub mod selection;
pub mod tree;
pub mod walker;

// Re-export key types for easier usage
pub use adjuster::TextSelection;
pub use delimiters::{DelimiterSet, PUNCTUATION_CHARS, is_delimiter, trim_left, trim_right};
pub use error::InvalidSelectionError;
pub use order::{Affinity, DocumentOrder};
pub use range::{BoundaryPoint, Direction, Edge, Range};
pub use selection::{HostSelection, SimpleSelection};
pub use tree::{DocumentTree, NodeId, NodeKind, TreeError};
pub use walker::{NodeWalker, iterator_at};
