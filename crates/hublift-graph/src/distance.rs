//! All-pairs shortest-path distances.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use hublift_core::NetworkType;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::model::WeightedGraph;

/// Distances from one source, in the order targets were settled by the traversal.
///
/// Both traversals settle targets in nondecreasing distance, so iteration order is also
/// distance order. The source itself comes first at distance 0; unreachable nodes are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceRow {
    entries: IndexMap<usize, f64>,
}

impl DistanceRow {
    /// Returns the distance to `target`, if reachable.
    pub fn get(&self, target: usize) -> Option<f64> {
        self.entries.get(&target).copied()
    }

    /// Iterates `(target, distance)` pairs in settlement order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().map(|(&target, &distance)| (target, distance))
    }

    /// Returns the number of reachable targets, the source included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the row is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One [`DistanceRow`] per source node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceTable {
    rows: Vec<DistanceRow>,
}

impl DistanceTable {
    /// Returns the row for `source`.
    pub fn row(&self, source: usize) -> Option<&DistanceRow> {
        self.rows.get(source)
    }

    /// Returns the distance between two nodes, if connected.
    pub fn distance(&self, source: usize, target: usize) -> Option<f64> {
        self.row(source)?.get(target)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes distances from every node: hop counts when unweighted, accumulated edge weight
/// when weighted. Sources are processed in parallel; the result does not depend on scheduling.
pub fn all_pairs_distances(graph: &WeightedGraph, mode: NetworkType) -> DistanceTable {
    let rows: Vec<DistanceRow> = (0..graph.num_nodes())
        .into_par_iter()
        .map(|source| match mode {
            NetworkType::Unweighted => single_source_hops(graph, source),
            NetworkType::Weighted => single_source_dijkstra(graph, source),
        })
        .collect();
    debug!(
        sources = rows.len(),
        pairs = rows.iter().map(DistanceRow::len).sum::<usize>(),
        mode = %mode,
        "computed all-pairs distances"
    );
    DistanceTable { rows }
}

/// Breadth-first hop counts from `source`.
pub fn single_source_hops(graph: &WeightedGraph, source: usize) -> DistanceRow {
    let mut entries = IndexMap::new();
    if source >= graph.num_nodes() {
        return DistanceRow { entries };
    }
    let mut queue = VecDeque::new();
    entries.insert(source, 0.0);
    queue.push_back((source, 0usize));
    while let Some((node, hops)) = queue.pop_front() {
        for (neighbour, _) in graph.neighbors(node) {
            if !entries.contains_key(&neighbour) {
                entries.insert(neighbour, (hops + 1) as f64);
                queue.push_back((neighbour, hops + 1));
            }
        }
    }
    DistanceRow { entries }
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    sequence: usize,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // reversed: BinaryHeap pops the smallest distance, earliest push first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Dijkstra distances from `source`; weights are non-negative by construction of the graph.
pub fn single_source_dijkstra(graph: &WeightedGraph, source: usize) -> DistanceRow {
    let mut settled: IndexMap<usize, f64> = IndexMap::new();
    if source >= graph.num_nodes() {
        return DistanceRow { entries: settled };
    }
    let mut tentative: Vec<Option<f64>> = vec![None; graph.num_nodes()];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0usize;

    tentative[source] = Some(0.0);
    heap.push(Frontier {
        distance: 0.0,
        sequence,
        node: source,
    });

    while let Some(Frontier { distance, node, .. }) = heap.pop() {
        if settled.contains_key(&node) {
            continue;
        }
        settled.insert(node, distance);
        for (neighbour, weight) in graph.neighbors(node) {
            if settled.contains_key(&neighbour) {
                continue;
            }
            let candidate = distance + weight;
            let improves = tentative[neighbour].map_or(true, |best| candidate < best);
            if improves {
                tentative[neighbour] = Some(candidate);
                sequence += 1;
                heap.push(Frontier {
                    distance: candidate,
                    sequence,
                    node: neighbour,
                });
            }
        }
    }
    DistanceRow { entries: settled }
}
