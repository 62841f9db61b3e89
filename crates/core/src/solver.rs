use super::network::FlowNetwork;
use super::traits::ShortestPathOracle;
use common::error::Error;

/// Distances and predecessor tree from the source for one augmentation round.
///
/// `None` marks an unreachable vertex in both vectors. The source is its own
/// predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    pub source: usize,
    pub sink: usize,
    pub distance: Vec<Option<i64>>,
    pub predecessor: Vec<Option<usize>>,
}

impl ShortestPathTree {
    /// A tree where only `source` is reached.
    pub fn rooted_at(source: usize, sink: usize, vertex_count: usize) -> Self {
        let mut distance = vec![None; vertex_count];
        let mut predecessor = vec![None; vertex_count];
        distance[source] = Some(0);
        predecessor[source] = Some(source);

        Self {
            source,
            sink,
            distance,
            predecessor,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.predecessor[self.sink].is_some()
    }

    pub fn distance_to_sink(&self) -> Option<i64> {
        self.distance[self.sink]
    }

    /// Reconstructs the source-to-sink path by walking predecessors back from the sink.
    ///
    /// Returns `Ok(None)` when the sink is unreachable.
    ///
    /// # Errors
    /// Returns `Error::PathReconstructionFailed` if the chain breaks or does not
    /// reach the source within `vertex_count` steps.
    pub fn path_to_sink(&self) -> Result<Option<Vec<usize>>, Error> {
        if !self.is_reachable() {
            return Ok(None);
        }

        let mut path = vec![self.sink];
        let mut current = self.sink;

        while current != self.source {
            if path.len() > self.predecessor.len() {
                return Err(Error::PathReconstructionFailed);
            }
            current = self.predecessor[current].ok_or(Error::PathReconstructionFailed)?;
            path.push(current);
        }

        path.reverse();
        Ok(Some(path))
    }
}

/// Bellman-Ford shortest paths over the residual graph.
///
/// Reverse residual edges carry the negated cost of their forward edge, so the
/// residual graph has negative edges and Dijkstra does not apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFordSolver;

impl ShortestPathOracle for BellmanFordSolver {
    /// Relaxes every edge with positive residual capacity up to `vertex_count - 1` times.
    ///
    /// Self-loops never lie on a simple path and are skipped. A pass that changes
    /// nothing ends the relaxation early.
    fn shortest_paths(&self, network: &FlowNetwork) -> Result<ShortestPathTree, Error> {
        let n = network.vertex_count();
        let source = network.source();
        let sink = network.sink();
        if source >= n {
            return Err(Error::NodeIndexOutOfBounds(source));
        }

        let residual = network.residual();
        let cost = network.cost();
        let mut tree = ShortestPathTree::rooted_at(source, sink, n);

        for _ in 1..n {
            let mut relaxed = false;

            for i in 0..n {
                let Some(dist_i) = tree.distance[i] else {
                    continue;
                };

                for (j, &capacity) in residual.row(i).iter().enumerate() {
                    if capacity <= 0 || i == j {
                        continue;
                    }

                    let candidate = dist_i.saturating_add(cost[(i, j)]);
                    if tree.distance[j].is_none_or(|dist_j| candidate < dist_j) {
                        tree.distance[j] = Some(candidate);
                        tree.predecessor[j] = Some(i);
                        relaxed = true;
                    }
                }
            }

            if !relaxed {
                break;
            }
        }

        Ok(tree)
    }
}
