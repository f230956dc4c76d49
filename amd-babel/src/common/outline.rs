//! Builds the nested paragraph outline of a memo body.
//!
//! # The High-Level Concept
//!
//! Authors nest paragraphs by indenting dash lines. Indentation is measured
//! in characters before the dash and is only meaningful relative to the other
//! indentations used so far: the nesting level of a line is the number of
//! distinct, previously seen indentations that are strictly smaller than its
//! own. A line indented deeper than the line before it opens a new group of
//! sub-paragraphs; anything else is a sibling at its level.
//!
//! # The Algorithm
//!
//! The builder keeps a stack of open groups. The bottom of the stack is the
//! document root and each entry above it is the trailing group of the entry
//! below, which is exactly the path the walk "descend `level` times into the
//! last child while it is a group" would take.
//!
//! 1. **Items:** compute the level, close open groups above it, then either
//!    open a new group holding the item or append the item to the top group.
//! 2. **Continuations:** a line without a dash is another paragraph of the
//!    most recent item. It is joined to that item with a blank line.
//! 3. **Tables:** attached to the container that received the most recent
//!    item.
//! 4. **Completion:** remaining groups are closed into their parents.

use std::collections::BTreeSet;

use crate::model::{Node, Table};

/// Incremental outline builder fed one body line at a time
#[derive(Debug, Default)]
pub struct OutlineBuilder {
    root: Vec<Node>,
    open: Vec<Vec<Node>>,
    seen_depths: BTreeSet<usize>,
    previous_depth: usize,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nesting level of an item indented by `depth` characters
    pub fn level_of(&self, depth: usize) -> usize {
        self.seen_depths.range(..depth).count()
    }

    /// Add a numbered paragraph whose dash sits at column `depth`.
    pub fn push_item(&mut self, depth: usize, text: String) {
        let level = self.level_of(depth);
        self.settle(level);
        if depth > self.previous_depth {
            self.open.push(vec![Node::Item(text)]);
        } else {
            self.current_mut().push(Node::Item(text));
        }
        self.previous_depth = depth;
        self.seen_depths.insert(depth);
    }

    /// Append another paragraph to the most recent item. Ignored before the
    /// first item.
    pub fn push_continuation(&mut self, text: &str) {
        let frames = self
            .open
            .iter_mut()
            .rev()
            .chain(std::iter::once(&mut self.root));
        for frame in frames {
            if let Some(item) = last_item_mut(frame) {
                item.push_str("\n\n");
                item.push_str(text);
                return;
            }
        }
    }

    pub fn push_table(&mut self, table: Table) {
        self.current_mut().push(Node::Table(table));
    }

    pub fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.root
    }

    fn current_mut(&mut self) -> &mut Vec<Node> {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    /// Close groups until the container at `level` (or the deepest open one)
    /// is on top.
    fn settle(&mut self, level: usize) {
        while self.open.len() > level {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(children) = self.open.pop() {
            self.current_mut().push(Node::Group(children));
        }
    }
}

fn last_item_mut(nodes: &mut [Node]) -> Option<&mut String> {
    nodes.iter_mut().rev().find_map(|node| match node {
        Node::Item(text) => Some(text),
        Node::Group(children) => last_item_mut(children),
        Node::Table(_) => None,
    })
}
