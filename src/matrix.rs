//! Pairwise travel matrix between route nodes.
//!
//! Every ordered pair of distinct nodes gets one estimator call. Calls are
//! grouped into batches of [`MATRIX_BATCH_SIZE`]; a batch runs in parallel,
//! batches run one after another, and each batch is merged into the matrix
//! only after all of its calls have returned.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::model::{HOME_NODE_ID, OptimizeRequest, START_NODE_ID};
use crate::traits::{Coordinate, TravelEstimate, TravelEstimator};

/// Maximum number of estimator calls in flight at once.
pub const MATRIX_BATCH_SIZE: usize = 5;

/// A location the matrix knows about: a stop or a virtual node.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixNode {
    pub id: String,
    pub location: Coordinate,
}

impl MatrixNode {
    pub fn new(id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }
}

/// `from -> to -> estimate`. May be asymmetric; has no self entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelMatrix {
    entries: HashMap<String, HashMap<String, TravelEstimate>>,
}

impl TravelMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, estimate: TravelEstimate) {
        self.entries
            .entry(from.into())
            .or_default()
            .insert(to.into(), estimate);
    }

    pub fn get(&self, from: &str, to: &str) -> Option<TravelEstimate> {
        self.entries.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Nodes for a run: the stops in input order, then `__start__` and
/// `__home__` when the request carries them.
pub fn request_nodes(request: &OptimizeRequest) -> Vec<MatrixNode> {
    let mut nodes: Vec<MatrixNode> = request
        .stops
        .iter()
        .map(|stop| MatrixNode::new(stop.id.clone(), stop.location()))
        .collect();

    if let Some(start) = request.start_location {
        nodes.push(MatrixNode::new(START_NODE_ID, start));
    }
    if let Some(home) = &request.home_base {
        nodes.push(MatrixNode::new(HOME_NODE_ID, home.location()));
    }

    nodes
}

/// Build the full matrix for `nodes`.
pub fn build_matrix<E>(estimator: &E, nodes: &[MatrixNode]) -> TravelMatrix
where
    E: TravelEstimator + ?Sized,
{
    let pairs: Vec<(usize, usize)> = (0..nodes.len())
        .flat_map(|i| (0..nodes.len()).filter(move |&j| j != i).map(move |j| (i, j)))
        .collect();

    debug!(
        nodes = nodes.len(),
        pairs = pairs.len(),
        estimator = estimator.name(),
        "building travel matrix"
    );

    let mut matrix = TravelMatrix::new();
    for batch in pairs.chunks(MATRIX_BATCH_SIZE) {
        let results: Vec<(usize, usize, TravelEstimate)> = batch
            .par_iter()
            .map(|&(i, j)| (i, j, estimator.estimate(nodes[i].location, nodes[j].location)))
            .collect();

        for (i, j, estimate) in results {
            matrix.insert(nodes[i].id.clone(), nodes[j].id.clone(), estimate);
        }
    }

    matrix
}
