use hublift_core::GraphInput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Path `0 - 1 - ... - (n - 1)` without features.
pub fn path_graph(n_nodes: usize) -> GraphInput {
    let edges = (1..n_nodes).map(|node| (node - 1, node)).collect();
    GraphInput::new(n_nodes, edges)
}

/// Star with `center` joined to every other node of `0..n_nodes`.
pub fn star_graph(n_nodes: usize, center: usize) -> GraphInput {
    let edges = (0..n_nodes)
        .filter(|&node| node != center)
        .map(|leaf| (center, leaf))
        .collect();
    GraphInput::new(n_nodes, edges)
}

/// Seeded random graph with `n_edges` uniformly drawn endpoint pairs.
///
/// Self-loops are skipped; repeated pairs are kept, matching how raw edge lists arrive.
pub fn random_graph(n_nodes: usize, n_edges: usize, seed: u64) -> GraphInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n_edges);
    if n_nodes > 1 {
        while edges.len() < n_edges {
            let u = rng.gen_range(0..n_nodes);
            let v = rng.gen_range(0..n_nodes);
            if u != v {
                edges.push((u, v));
            }
        }
    }
    GraphInput::new(n_nodes, edges)
}
