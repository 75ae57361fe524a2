//! On-disk graph datasets (JSON).
//!
//! # Format
//!
//! ```json
//! {
//!   "directed": true,
//!   "n": 8,
//!   "edges": [ { "u": 0, "v": 1, "w": 3 } ],
//!   "source": 4,
//!   "weight_model": "edge"
//! }
//! ```
//!
//! `directed` defaults to `true`, `edges` to empty, `weight_model` to
//! `"edge"`; `source` is optional. Graphs are always analysed as directed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::graph::{Graph, Weight};

/// Failures while loading or saving a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write dataset {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid graph JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode dataset: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One weighted edge `u -> v` as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub u: usize,
    pub v: usize,
    pub w: Weight,
}

/// A serialized graph plus an optional designated source vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default = "default_true")]
    pub directed: bool,
    /// Vertex count.
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    #[serde(default = "default_weight_model")]
    pub weight_model: String,
}

const fn default_true() -> bool {
    true
}

fn default_weight_model() -> String {
    "edge".to_string()
}

impl GraphData {
    /// An empty directed dataset with `n` vertices.
    #[must_use]
    pub fn new(n: usize, source: Option<usize>) -> Self {
        Self {
            directed: true,
            n,
            edges: Vec::new(),
            source,
            weight_model: default_weight_model(),
        }
    }

    pub fn add_edge(&mut self, u: usize, v: usize, w: Weight) {
        self.edges.push(EdgeData { u, v, w });
    }

    /// Build the [`Graph`] described by this dataset.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] if an edge endpoint is not below `n`.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        if !self.directed {
            warn!(n = self.n, "undirected dataset will be analysed as directed");
        }
        Graph::from_edges(self.n, self.edges.iter().map(|e| (e.u, e.v, e.w)))
    }

    /// Capture an existing graph (with its last-written weights).
    #[must_use]
    pub fn from_graph(graph: &Graph, source: Option<usize>) -> Self {
        let mut data = Self::new(graph.vertex_count(), source);
        for (u, v, w) in graph.edges() {
            data.add_edge(u, v, w);
        }
        data
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if encoding fails.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// [`DatasetError::Read`] or [`DatasetError::Parse`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&text).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), n = data.n, edges = data.edges.len(), "dataset loaded");
        Ok(data)
    }

    /// Write the dataset as pretty JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// [`DatasetError::Encode`] or [`DatasetError::Write`].
    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        let mut json = self.to_json_string()?;
        json.push('\n');
        fs::write(path, json).map_err(|source| DatasetError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), n = self.n, edges = self.edges.len(), "dataset written");
        Ok(())
    }
}
