use hublift_core::{FeatureTable, GraphInput, LiftError, NetworkType};
use indexmap::IndexMap;
use tracing::debug;

/// Immutable undirected graph with scalar node and edge weights.
///
/// Neighbour maps keep first-insertion order; a repeated edge overwrites the stored weight
/// without moving the neighbour. Traversals in [`crate::distance`] rely on this order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    network_type: NetworkType,
    node_weights: Vec<f64>,
    adjacency: Vec<IndexMap<usize, f64>>,
    num_edges: usize,
}

impl WeightedGraph {
    /// Builds the graph from a flat description.
    ///
    /// Node and edge weights take the single scalar of their feature row when features exist,
    /// the network is weighted, and the table is exactly one column wide; otherwise they are 1.
    /// In weighted mode every edge weight must be finite and non-negative.
    pub fn build(input: &GraphInput, network_type: NetworkType) -> Result<Self, LiftError> {
        input.validate()?;
        let node_weights =
            scalar_weights(input.node_features.as_ref(), input.num_nodes, network_type);
        let edge_weights =
            scalar_weights(input.edge_features.as_ref(), input.edges.len(), network_type);

        let mut adjacency: Vec<IndexMap<usize, f64>> = vec![IndexMap::new(); input.num_nodes];
        for (index, (&(u, v), &weight)) in input.edges.iter().zip(&edge_weights).enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LiftError::configuration(
                    "negative-edge-weight",
                    "weighted shortest paths require finite non-negative edge weights",
                )
                .with_context("edge", index)
                .with_context("weight", weight)
                .with_hint("use the unweighted network type or fix the edge features"));
            }
            adjacency[u].insert(v, weight);
            if u != v {
                adjacency[v].insert(u, weight);
            }
        }
        let num_edges = adjacency
            .iter()
            .enumerate()
            .map(|(node, neighbours)| neighbours.keys().filter(|&&other| other >= node).count())
            .sum();

        debug!(
            nodes = input.num_nodes,
            edges = num_edges,
            network_type = %network_type,
            "built weighted graph"
        );
        Ok(Self {
            network_type,
            node_weights,
            adjacency,
            num_edges,
        })
    }

    /// Returns the network type the weights were derived under.
    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.node_weights.len()
    }

    /// Returns the number of distinct undirected edges, self-loops included.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the scalar weight of a node.
    pub fn node_weight(&self, node: usize) -> Option<f64> {
        self.node_weights.get(node).copied()
    }

    /// Returns the weight of the edge between `u` and `v`, if it exists.
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency.get(u)?.get(&v).copied()
    }

    /// Iterates the neighbours of `node` with edge weights, in insertion order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().map(|(&other, &weight)| (other, weight)))
    }

    /// Returns the sum of incident edge weights (a self-loop counts once).
    ///
    /// The sum is unscaled and reaches infinity for weights near `f64::MAX`.
    pub fn weighted_degree(&self, node: usize) -> f64 {
        self.neighbors(node).map(|(_, weight)| weight).sum()
    }
}

fn scalar_weights(
    features: Option<&FeatureTable>,
    len: usize,
    network_type: NetworkType,
) -> Vec<f64> {
    match (network_type, features.and_then(FeatureTable::scalar_column)) {
        (NetworkType::Weighted, Some(column)) => column.to_vec(),
        _ => vec![1.0; len],
    }
}
