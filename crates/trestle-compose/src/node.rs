//! The declarative block: a typed tree of table declarations and the
//! control-flow wrappers that guard them.
//!
//! A [`Block`] is the body of one table declaration. Besides the three
//! declaration kinds it may contain [`Condition`] nodes (multiple guarded
//! branches, first truthy branch wins), [`ForEach`] nodes (a single nested
//! body repeated over a structural sequence — never the data rows), and raw
//! markup, which the conditional filter discards before evaluation.
//!
//! Condition tests and loop sources are dotted scope paths with truthiness
//! semantics (`show_last_name`, `settings.columns`); expression logic
//! beyond that belongs to the host template layer.

use crate::declaration::{Header, RowAction, Subtable};

/// One node inside a table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A column header declaration.
    Header(Header),
    /// A per-row action declaration.
    RowAction(RowAction),
    /// A sub-table declaration.
    Subtable(Subtable),
    /// Guarded branches; the first with a truthy (or absent) test runs.
    Condition(Condition),
    /// A single nested body repeated over a structural sequence.
    ForEach(ForEach),
    /// Literal markup. Dropped by the conditional filter.
    Raw(String),
}

/// An ordered sequence of nodes: the body of a table block, a conditional
/// branch, or a loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    nodes: Vec<Node>,
}

impl Block {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header declaration.
    pub fn header(mut self, header: Header) -> Self {
        self.nodes.push(Node::Header(header));
        self
    }

    /// Appends a row-action declaration.
    pub fn row_action(mut self, action: RowAction) -> Self {
        self.nodes.push(Node::RowAction(action));
        self
    }

    /// Appends a sub-table declaration.
    pub fn subtable(mut self, subtable: Subtable) -> Self {
        self.nodes.push(Node::Subtable(subtable));
        self
    }

    /// Appends a conditional.
    pub fn when(mut self, condition: Condition) -> Self {
        self.nodes.push(Node::Condition(condition));
        self
    }

    /// Appends a structural loop.
    pub fn for_each(mut self, repeat: ForEach) -> Self {
        self.nodes.push(Node::ForEach(repeat));
        self
    }

    /// Appends literal markup.
    pub fn raw(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Raw(text.into()));
        self
    }

    /// Appends any node.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Returns `true` if the block holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates the top-level nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

impl FromIterator<Node> for Block {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// A conditional wrapper: condition -> body pairs evaluated in order, with
/// an optional trailing else body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    branches: Vec<Branch>,
}

/// One guarded branch of a [`Condition`]. A branch without a test is an
/// else branch and always runs when reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub(crate) test: Option<String>,
    pub(crate) body: Block,
}

impl Condition {
    /// Creates a conditional with its first guarded branch.
    pub fn when(test: impl Into<String>, body: Block) -> Self {
        Self {
            branches: vec![Branch {
                test: Some(test.into()),
                body,
            }],
        }
    }

    /// Adds another guarded branch.
    pub fn elif(mut self, test: impl Into<String>, body: Block) -> Self {
        self.branches.push(Branch {
            test: Some(test.into()),
            body,
        });
        self
    }

    /// Adds a trailing else branch.
    pub fn otherwise(mut self, body: Block) -> Self {
        self.branches.push(Branch { test: None, body });
        self
    }

    /// The condition -> body pairs, in evaluation order.
    pub fn branches(&self) -> impl Iterator<Item = (Option<&str>, &Block)> {
        self.branches
            .iter()
            .map(|branch| (branch.test.as_deref(), &branch.body))
    }

    pub(crate) fn map_bodies(&self, mut f: impl FnMut(&Block) -> Block) -> Self {
        Self {
            branches: self
                .branches
                .iter()
                .map(|branch| Branch {
                    test: branch.test.clone(),
                    body: f(&branch.body),
                })
                .collect(),
        }
    }
}

/// A structural loop: the body is evaluated once per element of the source
/// sequence, with the element bound under the loop variable name and jinja
/// style counters bound under `loop`.
///
/// This iterates structure (e.g. a configured list of extra columns), not
/// data rows; row iteration belongs to the output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForEach {
    pub(crate) var: String,
    pub(crate) source: String,
    pub(crate) body: Block,
}

impl ForEach {
    /// Creates a loop binding each element of `source` as `var`.
    pub fn new(var: impl Into<String>, source: impl Into<String>, body: Block) -> Self {
        Self {
            var: var.into(),
            source: source.into(),
            body,
        }
    }

    /// The loop variable name.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The dotted path of the source sequence.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The loop body.
    pub fn body(&self) -> &Block {
        &self.body
    }

    pub(crate) fn map_body(&self, f: impl FnOnce(&Block) -> Block) -> Self {
        Self {
            var: self.var.clone(),
            source: self.source.clone(),
            body: f(&self.body),
        }
    }
}
