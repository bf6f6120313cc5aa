//! Additive path cost model.

use crate::dictionary::connector::Connector;
use crate::dictionary::entry::Entry;

/// Scores nodes and the edges between them. Lower is better.
#[derive(Clone, Copy)]
pub(crate) struct PathScorer<'a> {
    connector: &'a Connector,
    boundary: &'a Entry,
}

impl<'a> PathScorer<'a> {
    pub(crate) fn new(connector: &'a Connector, boundary: &'a Entry) -> Self {
        Self {
            connector,
            boundary,
        }
    }

    /// Connection cost between `left.last_pos` and `right.first_pos`.
    #[inline(always)]
    pub(crate) fn edge_cost(&self, left: &Entry, right: &Entry) -> i32 {
        self.connector.cost(left.right_id, right.left_id)
    }

    #[inline(always)]
    pub(crate) fn node_cost(&self, entry: &Entry) -> i32 {
        entry.cost()
    }

    /// Total cost of `entries` between BOS and EOS.
    pub(crate) fn path_cost(&self, entries: &[&Entry]) -> i64 {
        let mut total = 0i64;
        let mut left = self.boundary;
        for &entry in entries {
            total += i64::from(self.edge_cost(left, entry)) + i64::from(self.node_cost(entry));
            left = entry;
        }
        total + i64::from(self.edge_cost(left, self.boundary))
    }
}
