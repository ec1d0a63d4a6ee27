//! Crossing reduction using the barycenter heuristic

use skymap_core::Topology;

/// Reorder each layer to reduce edge crossings between adjacent layers.
///
/// Alternates downward sweeps (order by mean parent position) and upward
/// sweeps (order by mean child position). Sorting is stable and nodes with
/// no neighbour in the reference layer keep their current position, so the
/// result depends only on the input order. The ordering with the fewest
/// crossings seen is returned; ties keep the earlier one.
pub(crate) fn order_layers(
    mut layers: Vec<Vec<usize>>,
    rows: &[usize],
    topology: &Topology,
    sweeps: usize,
) -> Vec<Vec<usize>> {
    let mut positions = vec![0usize; rows.len()];
    update_positions(&layers, &mut positions);

    let mut best = layers.clone();
    let mut best_crossings = count_crossings(&layers, rows, &positions, topology);

    for sweep in 0..sweeps {
        if best_crossings == 0 {
            break;
        }

        if sweep % 2 == 0 {
            for r in 1..layers.len() {
                reorder(&mut layers[r], &positions, |slot| topology.parents(slot));
                update_positions(&layers[r..=r], &mut positions);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                reorder(&mut layers[r], &positions, |slot| topology.children(slot));
                update_positions(&layers[r..=r], &mut positions);
            }
        }

        let crossings = count_crossings(&layers, rows, &positions, topology);
        tracing::debug!("Ordering sweep {}: {} crossings", sweep, crossings);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }

    best
}

fn update_positions(layers: &[Vec<usize>], positions: &mut [usize]) {
    for layer in layers {
        for (i, &slot) in layer.iter().enumerate() {
            positions[slot] = i;
        }
    }
}

fn reorder<F>(layer: &mut Vec<usize>, positions: &[usize], neighbours: F)
where
    F: Fn(usize) -> Vec<usize>,
{
    let mut keyed: Vec<(usize, f64)> = layer
        .iter()
        .map(|&slot| {
            let adjacent = neighbours(slot);
            let barycenter = if adjacent.is_empty() {
                positions[slot] as f64
            } else {
                adjacent.iter().map(|&n| positions[n] as f64).sum::<f64>() / adjacent.len() as f64
            };
            (slot, barycenter)
        })
        .collect();

    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
    *layer = keyed.into_iter().map(|(slot, _)| slot).collect();
}

/// Crossings between edges joining consecutive layers.
pub(crate) fn count_crossings(
    layers: &[Vec<usize>],
    rows: &[usize],
    positions: &[usize],
    topology: &Topology,
) -> usize {
    let mut total = 0;
    for layer in layers {
        let segments: Vec<(usize, usize)> = layer
            .iter()
            .flat_map(|&source| {
                topology
                    .children(source)
                    .into_iter()
                    .filter(move |&target| rows[target] == rows[source] + 1)
                    .map(move |target| (positions[source], positions[target]))
            })
            .collect();

        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::assign_ranks;
    use skymap_core::build_graph;
    use skymap_core::test_utils::*;

    #[test]
    fn test_children_follow_parent_order() {
        // Subnets listed in the opposite order from their VPCs cross once.
        let graph = build_graph(&[
            vpc("vpc-a"),
            vpc("vpc-b"),
            subnet("subnet-b", "vpc-b"),
            subnet("subnet-a", "vpc-a"),
        ]);
        let topology = Topology::new(&graph).unwrap();
        let ranking = assign_ranks(&graph, &topology);
        let layers = ranking.layers();
        assert_eq!(layers, vec![vec![0, 1], vec![2, 3]]);

        let mut positions = vec![0; 4];
        update_positions(&layers, &mut positions);
        assert_eq!(count_crossings(&layers, &ranking.rows, &positions, &topology), 1);

        let ordered = order_layers(layers, &ranking.rows, &topology, 8);
        assert_eq!(ordered, vec![vec![0, 1], vec![3, 2]]);
        update_positions(&ordered, &mut positions);
        assert_eq!(count_crossings(&ordered, &ranking.rows, &positions, &topology), 0);
    }

    #[test]
    fn test_zero_sweeps_keeps_input_order() {
        let graph = build_graph(&[
            vpc("vpc-a"),
            vpc("vpc-b"),
            subnet("subnet-b", "vpc-b"),
            subnet("subnet-a", "vpc-a"),
        ]);
        let topology = Topology::new(&graph).unwrap();
        let ranking = assign_ranks(&graph, &topology);
        let ordered = order_layers(ranking.layers(), &ranking.rows, &topology, 0);
        assert_eq!(ordered, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let graph = build_graph(&sample_estate());
        let topology = Topology::new(&graph).unwrap();
        let ranking = assign_ranks(&graph, &topology);
        let first = order_layers(ranking.layers(), &ranking.rows, &topology, 8);
        let second = order_layers(ranking.layers(), &ranking.rows, &topology, 8);
        assert_eq!(first, second);
    }
}
