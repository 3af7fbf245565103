//! The conditional filter: pruning a table block down to its
//! render-relevant nodes.
//!
//! Table blocks may contain anything the host layer puts there — literal
//! markup, unrelated constructs — but only declarations matter to
//! composition, along with the conditionals and loops that guard them.
//! [`relevant`] walks the block once and rebuilds it with just those nodes,
//! recursing into the two nesting shapes it recognizes: multiple guarded
//! branches ([`Condition`](crate::Condition)) and a single nested body
//! ([`ForEach`](crate::ForEach)). Everything else is dropped, including any
//! declaration nested inside an unrecognized construct.
//!
//! This is a pure tree transform. No condition is evaluated and the input
//! is never mutated, so the same source block can be filtered once and the
//! result evaluated any number of times without aliasing.

use crate::node::{Block, Node};

/// Returns the render-relevant subsequence of a block: declarations at any
/// depth, plus the conditional and loop wrappers guarding them with their
/// bodies recursively filtered.
///
/// # Examples
///
/// ```rust
/// use trestle_compose::{relevant, Block, Condition, Header};
///
/// let block = Block::new()
///     .raw("<p>decoration</p>")
///     .header(Header::new().key("name"))
///     .when(Condition::when(
///         "detailed",
///         Block::new().raw("noise").header(Header::new().key("age")),
///     ));
///
/// let filtered = relevant(&block);
/// assert_eq!(filtered.len(), 2);
/// ```
pub fn relevant(block: &Block) -> Block {
    block
        .iter()
        .filter_map(|node| match node {
            Node::Header(_) | Node::RowAction(_) | Node::Subtable(_) => Some(node.clone()),
            Node::Condition(condition) => {
                Some(Node::Condition(condition.map_bodies(relevant)))
            }
            Node::ForEach(repeat) => Some(Node::ForEach(repeat.map_body(relevant))),
            Node::Raw(_) => None,
        })
        .collect()
}
