use sha2::{Digest, Sha256};

use crate::lifting::LiftedHypergraph;

/// Computes a structural hash of the incidence matrix and hub list.
///
/// Weights are hashed by bit pattern, so equal hashes mean bit-identical matrices.
pub fn incidence_hash(lifted: &LiftedHypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((lifted.num_nodes() as u64).to_le_bytes());
    hasher.update((lifted.num_hyperedges as u64).to_le_bytes());
    update_slice(&lifted.hubs, &mut hasher);
    for node in 0..lifted.num_nodes() {
        let row = lifted.row_entries(node);
        hasher.update((row.len() as u64).to_le_bytes());
        for (hyperedge, weight) in row {
            hasher.update((hyperedge as u64).to_le_bytes());
            hasher.update(weight.to_bits().to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}

fn update_slice(values: &[usize], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update((*value as u64).to_le_bytes());
    }
}
