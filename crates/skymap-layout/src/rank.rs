//! Longest-path rank assignment

use std::collections::VecDeque;

use skymap_core::{Graph, Placement, Topology};

/// Rank and drawing row of every slot, and whether it sits in the
/// unconnected pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ranking {
    /// Longest containment path from a containment root.
    pub ranks: Vec<usize>,
    /// Longest path over edges of every kind. An attached volume is drawn one
    /// row below its instance while keeping containment rank 0.
    pub rows: Vec<usize>,
    pub pooled: Vec<bool>,
}

impl Ranking {
    /// Hierarchy slots grouped by drawing row, slot order within each row.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let depth = self
            .rows
            .iter()
            .zip(&self.pooled)
            .filter(|(_, pooled)| !**pooled)
            .map(|(&row, _)| row + 1)
            .max()
            .unwrap_or(0);

        let mut layers = vec![Vec::new(); depth];
        for (slot, (&row, &pooled)) in self.rows.iter().zip(&self.pooled).enumerate() {
            if !pooled {
                layers[row].push(slot);
            }
        }
        layers
    }
}

/// Rank every node of `graph`.
///
/// Nodes touching no edge are pooled, except network roots, which stay in
/// the first row of the hierarchy.
pub(crate) fn assign_ranks(graph: &Graph, topology: &Topology) -> Ranking {
    let count = topology.node_count();
    let pooled = (0..count)
        .map(|slot| topology.is_isolated(slot) && graph.nodes[slot].placement != Placement::Root)
        .collect();

    let ranks = longest_paths(
        count,
        |slot| topology.containment_parents(slot),
        |slot| topology.containment_children(slot),
    );
    let rows = longest_paths(
        count,
        |slot| topology.parents(slot),
        |slot| topology.children(slot),
    );

    Ranking {
        ranks,
        rows,
        pooled,
    }
}

/// Nodes without parents get 0; every other node sits one below its deepest
/// parent.
///
/// Nodes left over by the topological pass (only possible with cycles) take
/// one more than their deepest already-ranked parent.
fn longest_paths<P, C>(count: usize, parents: P, children: C) -> Vec<usize>
where
    P: Fn(usize) -> Vec<usize>,
    C: Fn(usize) -> Vec<usize>,
{
    let mut ranks = vec![0usize; count];
    let mut visited = vec![false; count];

    let mut in_degree: Vec<usize> = (0..count).map(|slot| parents(slot).len()).collect();
    let mut queue: VecDeque<usize> = (0..count).filter(|&slot| in_degree[slot] == 0).collect();

    while let Some(slot) = queue.pop_front() {
        visited[slot] = true;
        for child in children(slot) {
            ranks[child] = ranks[child].max(ranks[slot] + 1);
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    for slot in 0..count {
        if visited[slot] {
            continue;
        }
        tracing::debug!("Node slot {} is on a cycle, ranking from visited parents", slot);
        ranks[slot] = parents(slot)
            .into_iter()
            .filter(|&parent| visited[parent])
            .map(|parent| ranks[parent] + 1)
            .max()
            .unwrap_or(0);
        visited[slot] = true;
    }

    ranks
}
