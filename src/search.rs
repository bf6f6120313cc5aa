//! Minimum-cost path through a lattice.

use crate::error::{HansegError, Result};
use crate::lattice::{Lattice, Node};
use crate::scorer::PathScorer;

/// Runs the forward pass and returns the best path without BOS and EOS.
///
/// Nodes are visited in insertion order, which is start-offset order.
/// Predecessors are tried in insertion order and only a strictly lower cost
/// replaces the current best, so ties keep the earlier predecessor.
pub(crate) fn search<'a>(
    lattice: &mut Lattice<'a>,
    scorer: &PathScorer<'_>,
) -> Result<Vec<Node<'a>>> {
    if let Some(bos) = lattice.nodes_mut().first_mut() {
        bos.best_cost = Some(0);
    }

    for id in 1..lattice.nodes().len() {
        let node = lattice.nodes()[id];
        let mut best: Option<(i64, usize)> = None;
        for &prev_id in lattice.ending_at(node.start_node) {
            let prev = &lattice.nodes()[prev_id];
            let Some(prev_cost) = prev.best_cost else {
                continue;
            };
            let cost = prev_cost + i64::from(scorer.edge_cost(prev.entry, node.entry));
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, prev_id));
            }
        }
        if let Some((cost, prev_id)) = best {
            let slot = &mut lattice.nodes_mut()[id];
            slot.best_cost = Some(cost + i64::from(scorer.node_cost(node.entry)));
            slot.prev = Some(prev_id);
        }
    }

    let eos = lattice.eos();
    if lattice.nodes()[eos].best_cost.is_none() {
        let offset = lattice
            .nodes()
            .iter()
            .find(|node| node.best_cost.is_none())
            .map_or(lattice.char_len(), |node| node.start);
        return Err(HansegError::NoPath {
            offset,
            input: lattice.text().to_string(),
        });
    }

    let mut path = Vec::new();
    let mut cursor = lattice.nodes()[eos].prev;
    while let Some(id) = cursor {
        if id == 0 {
            break;
        }
        let node = lattice.nodes()[id];
        path.push(node);
        cursor = node.prev;
    }
    path.reverse();
    Ok(path)
}
