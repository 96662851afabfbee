//! Span tree reconstruction.
//!
//! Turns the flat span list of a trace into a rooted, ordered tree of span
//! ids under a synthetic root ([`TREE_ROOT_ID`](crate::utils::config::TREE_ROOT_ID)).

pub mod builder;
pub mod node;

// Re-export main types and functions
pub use builder::build_span_tree;
pub use node::{SpanTree, TreeNode};
