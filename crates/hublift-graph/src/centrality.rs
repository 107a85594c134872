//! Damped PageRank over the weighted adjacency.

use hublift_core::LiftingConfig;
use tracing::{debug, warn};

use crate::model::WeightedGraph;

/// Power-iteration controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankParams {
    /// Damping factor; `1 - alpha` is the teleportation probability.
    pub alpha: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Per-node tolerance; the run stops once the L1 change drops below `n * tolerance`.
    pub tolerance: f64,
}

impl Default for PageRankParams {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl From<&LiftingConfig> for PageRankParams {
    fn from(config: &LiftingConfig) -> Self {
        Self {
            alpha: config.alpha,
            max_iterations: config.max_iter,
            tolerance: config.tol,
        }
    }
}

/// Influence score per node, summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores {
    /// Score indexed by node id.
    pub scores: Vec<f64>,
    /// Number of power iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached before the cap.
    pub converged: bool,
}

impl CentralityScores {
    /// Returns the score of a node.
    pub fn get(&self, node: usize) -> Option<f64> {
        self.scores.get(node).copied()
    }

    /// Returns the number of scored nodes.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns whether no node was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Computes PageRank with uniform teleportation.
///
/// Edge weights are normalised per source node into transition probabilities. Nodes with
/// zero outgoing weight are dangling and spread their mass uniformly over all nodes. The
/// last iterate is returned when `max_iterations` is hit.
pub fn pagerank(graph: &WeightedGraph, params: &PageRankParams) -> CentralityScores {
    let n = graph.num_nodes();
    if n == 0 {
        return CentralityScores {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let uniform = 1.0 / n as f64;
    let transitions: Vec<Option<Vec<(usize, f64)>>> =
        (0..n).map(|node| transition_row(graph, node)).collect();
    let dangling: Vec<usize> = (0..n).filter(|&node| transitions[node].is_none()).collect();
    let threshold = n as f64 * params.tolerance;

    let mut scores = vec![uniform; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        iterations += 1;
        next.iter_mut().for_each(|value| *value = 0.0);

        for (source, row) in transitions.iter().enumerate() {
            let Some(row) = row else {
                continue;
            };
            for &(target, probability) in row {
                next[target] += scores[source] * probability;
            }
        }

        let dangling_mass: f64 = dangling.iter().map(|&node| scores[node]).sum();
        for value in next.iter_mut() {
            *value = params.alpha * (*value + dangling_mass * uniform)
                + (1.0 - params.alpha) * uniform;
        }

        let delta: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (new - old).abs())
            .sum();
        std::mem::swap(&mut scores, &mut next);

        if delta < threshold {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, nodes = n, "pagerank converged");
    } else {
        warn!(
            iterations,
            nodes = n,
            "pagerank hit the iteration cap before converging; using last iterate"
        );
    }

    CentralityScores {
        scores,
        iterations,
        converged,
    }
}

/// Transition probabilities out of `node`, or `None` when its outgoing weight is zero.
fn transition_row(graph: &WeightedGraph, node: usize) -> Option<Vec<(usize, f64)>> {
    // weights are rescaled by their maximum so the row sum stays finite and nonzero
    let scale = graph
        .neighbors(node)
        .map(|(_, weight)| weight)
        .fold(0.0_f64, f64::max);
    if scale == 0.0 {
        return None;
    }
    let total: f64 = graph.neighbors(node).map(|(_, weight)| weight / scale).sum();
    Some(
        graph
            .neighbors(node)
            .map(|(target, weight)| (target, weight / scale / total))
            .collect(),
    )
}
