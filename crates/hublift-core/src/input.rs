//! Flat graph descriptions consumed by the lifting.

use serde::{Deserialize, Serialize};

use crate::errors::LiftError;

/// Dense row-major table of per-node or per-edge features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureTable")]
pub struct FeatureTable {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureTable {
    /// Creates a table from row-major values; `data.len()` must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LiftError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(LiftError::input(
                "feature-shape-mismatch",
                "feature buffer length does not match the declared shape",
            )
            .with_context("rows", rows)
            .with_context("cols", cols)
            .with_context("len", data.len()));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a table from nested rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LiftError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LiftError::input("ragged-features", "feature rows differ in width")
                    .with_context("row", index)
                    .with_context("expected", cols)
                    .with_context("found", row.len()));
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, data)
    }

    /// Builds a single-column table, one scalar per row.
    pub fn scalars(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the given row, if present.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Returns the first scalar of every row when the table is exactly one column wide.
    pub fn scalar_column(&self) -> Option<&[f64]> {
        (self.cols == 1).then_some(self.data.as_slice())
    }

    /// Gathers the listed rows, in the order given, into a new table.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, LiftError> {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &index in indices {
            let row = self.row(index).ok_or_else(|| {
                LiftError::input("feature-row-out-of-range", "feature row does not exist")
                    .with_context("row", index)
                    .with_context("rows", self.rows)
            })?;
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: indices.len(),
            cols: self.cols,
            data,
        })
    }
}

#[derive(Deserialize)]
struct RawFeatureTable {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawFeatureTable> for FeatureTable {
    type Error = LiftError;

    fn try_from(raw: RawFeatureTable) -> Result<Self, Self::Error> {
        FeatureTable::new(raw.rows, raw.cols, raw.data)
    }
}

/// Plain graph description: node count, optional features, and an undirected edge list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphInput {
    /// Number of nodes; valid ids are `0..num_nodes`.
    pub num_nodes: usize,
    /// Optional `(num_nodes, F)` node feature table.
    #[serde(default)]
    pub node_features: Option<FeatureTable>,
    /// Edge endpoints.
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
    /// Optional `(E, F)` edge feature table aligned with `edges`.
    #[serde(default)]
    pub edge_features: Option<FeatureTable>,
}

impl GraphInput {
    /// Creates a featureless description.
    pub fn new(num_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            num_nodes,
            node_features: None,
            edges,
            edge_features: None,
        }
    }

    /// Attaches a node feature table.
    pub fn with_node_features(mut self, features: FeatureTable) -> Self {
        self.node_features = Some(features);
        self
    }

    /// Attaches an edge feature table.
    pub fn with_edge_features(mut self, features: FeatureTable) -> Self {
        self.edge_features = Some(features);
        self
    }

    /// Checks that endpoints are in range and that feature tables line up with nodes and edges.
    pub fn validate(&self) -> Result<(), LiftError> {
        for (index, &(u, v)) in self.edges.iter().enumerate() {
            if u >= self.num_nodes || v >= self.num_nodes {
                return Err(LiftError::input("unknown-node", "edge endpoint is out of range")
                    .with_context("edge", index)
                    .with_context("endpoint", u.max(v))
                    .with_context("num_nodes", self.num_nodes));
            }
        }
        if let Some(features) = &self.node_features {
            if features.rows() != self.num_nodes {
                return Err(LiftError::input(
                    "node-feature-rows",
                    "node feature table must have one row per node",
                )
                .with_context("rows", features.rows())
                .with_context("num_nodes", self.num_nodes));
            }
        }
        if let Some(features) = &self.edge_features {
            if features.rows() != self.edges.len() {
                return Err(LiftError::input(
                    "edge-feature-rows",
                    "edge feature table must have one row per edge",
                )
                .with_context("rows", features.rows())
                .with_context("edges", self.edges.len()));
            }
        }
        Ok(())
    }
}
