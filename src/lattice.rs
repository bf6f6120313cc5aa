//! Candidate morpheme lattice over one input.
//!
//! Offsets are character indices. Whitespace never belongs to a node: a node
//! that starts after a whitespace run records `start_node`, the offset its
//! predecessors end at, separately from `start`.

use log::trace;

use crate::dictionary::entry::Entry;
use crate::dictionary::{Dictionary, LookupMatch};
use crate::utils::char_boundaries;

/// Span that must become exactly one node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForcedSpan<'a> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) entry: &'a Entry,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    pub(crate) entry: &'a Entry,
    pub(crate) start: usize,
    pub(crate) start_node: usize,
    pub(crate) end: usize,
    pub(crate) eojeol: usize,
    pub(crate) best_cost: Option<i64>,
    pub(crate) prev: Option<usize>,
}

impl<'a> Node<'a> {
    fn new(entry: &'a Entry, start: usize, start_node: usize, end: usize, eojeol: usize) -> Self {
        Self {
            entry,
            start,
            start_node,
            end,
            eojeol,
            best_cost: None,
            prev: None,
        }
    }
}

pub(crate) struct Lattice<'a> {
    text: &'a str,
    bounds: Vec<usize>,
    nodes: Vec<Node<'a>>,
    ends: Vec<Vec<usize>>,
}

impl<'a> Lattice<'a> {
    /// Builds the lattice of `text`.
    ///
    /// `forced` must be sorted, non-overlapping and free of whitespace.
    /// Dictionary matches never cross whitespace or a forced span.
    pub(crate) fn build(
        dictionary: &'a Dictionary,
        text: &'a str,
        forced: &[ForcedSpan<'a>],
    ) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let bounds = char_boundaries(text);
        let len = chars.len();
        let runs = dictionary.char_runs(&chars);

        let mut lattice = Self {
            text,
            bounds,
            nodes: Vec::new(),
            ends: vec![Vec::new(); len + 1],
        };
        lattice.push(Node::new(dictionary.boundary(), 0, 0, 0, 0));

        let mut matches: Vec<LookupMatch<'a>> = Vec::new();
        let mut forced = forced.iter().peekable();
        let mut last_end = 0;
        let mut eojeol = 0;
        let mut seen_word = false;
        let mut after_space = false;
        let mut segment_end = 0;
        let mut covered_until = 0;

        for i in 0..len {
            if chars[i].is_whitespace() {
                after_space = true;
                continue;
            }
            if i >= segment_end {
                segment_end = chars[i..]
                    .iter()
                    .position(|c| c.is_whitespace())
                    .map_or(len, |offset| i + offset);
            }
            if after_space && seen_word {
                eojeol += 1;
            }
            after_space = false;
            seen_word = true;
            let start_node = last_end;
            last_end = i + 1;

            while forced.peek().is_some_and(|span| span.end <= i) {
                forced.next();
            }
            if i < covered_until {
                continue;
            }
            if let Some(span) = forced.peek().filter(|span| span.start == i) {
                lattice.push(Node::new(span.entry, i, start_node, span.end, eojeol));
                covered_until = span.end;
                continue;
            }

            let limit = forced
                .peek()
                .map_or(segment_end, |span| span.start.clamp(i, segment_end));
            matches.clear();
            dictionary.lookup_window(&chars[i..limit], runs.at(i, limit), &mut matches);
            for found in &matches {
                lattice.push(Node::new(found.entry, i, start_node, i + found.len, eojeol));
            }
        }

        lattice.push(Node::new(dictionary.boundary(), len, last_end, len, eojeol));
        trace!("built lattice with {} nodes over {} chars", lattice.nodes.len(), len);
        lattice
    }

    fn push(&mut self, node: Node<'a>) {
        let id = self.nodes.len();
        // EOS is never a predecessor.
        if id == 0 || node.start < node.end {
            self.ends[node.end].push(id);
        }
        self.nodes.push(node);
    }

    /// Nodes in insertion order: BOS first, then by start offset, EOS last.
    pub(crate) fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node<'a>] {
        &mut self.nodes
    }

    /// Ids of nodes whose span ends at `offset`.
    pub(crate) fn ending_at(&self, offset: usize) -> &[usize] {
        &self.ends[offset]
    }

    pub(crate) fn eos(&self) -> usize {
        self.nodes.len() - 1
    }

    pub(crate) fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn char_len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Input text covered by `node`.
    pub(crate) fn surface(&self, node: &Node<'_>) -> &'a str {
        &self.text[self.bounds[node.start]..self.bounds[node.end]]
    }
}
