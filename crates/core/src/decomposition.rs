use super::network::FlowNetwork;
use common::types::{DecomposedPath, FlowPath};

/// Paths recovered from the saturated edges of a finished network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub paths: Vec<DecomposedPath>,
}

impl Decomposition {
    /// Sum of the flow reported by every completed path.
    pub fn total_flow(&self) -> i64 {
        self.paths.iter().map(DecomposedPath::flow).sum()
    }

    pub fn completed(&self) -> impl Iterator<Item = &FlowPath> {
        self.paths.iter().filter_map(|p| match p {
            DecomposedPath::Complete(path) => Some(path),
            DecomposedPath::DeadEnd(_) => None,
        })
    }
}

/// An original edge is saturated once its residual capacity has dropped to zero.
fn is_saturated(network: &FlowNetwork, row: usize, col: usize) -> bool {
    network.capacity()[(row, col)] > 0 && network.residual()[(row, col)] == 0
}

/// First saturated outgoing edge of `row`, in index order.
fn next_saturated(network: &FlowNetwork, row: usize) -> Option<usize> {
    (0..network.vertex_count()).find(|&col| is_saturated(network, row, col))
}

/// Greedily splits the final flow into source-to-sink paths.
///
/// Every saturated edge leaving the source starts one walk, which follows the
/// first saturated outgoing edge of each vertex until it reaches the sink. A
/// completed walk reports its bottleneck over the original capacities.
///
/// This is a reporting aid layered on an already correct flow total. Walks are
/// not disjoint, and flow on edges that are used but not saturated is not
/// attributed to any path.
pub fn decompose(network: &FlowNetwork) -> Decomposition {
    let source = network.source();
    let sink = network.sink();
    let n = network.vertex_count();
    let mut paths = Vec::new();

    for first in (0..n).filter(|&col| is_saturated(network, source, col)) {
        let mut path = vec![source, first];
        let mut current = first;

        while current != sink && path.len() <= n {
            match next_saturated(network, current) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }

        if current != sink {
            paths.push(DecomposedPath::DeadEnd(path));
            continue;
        }

        let flow = network.capacity().path_bottleneck(&path).unwrap_or(0);
        paths.push(DecomposedPath::Complete(FlowPath { path, flow }));
    }

    Decomposition { paths }
}

#[cfg(test)]
mod decomposition_tests {
    use super::*;
    use crate::flow::min_cost_max_flow;

    fn solved(vertex_count: usize, edges: &[common::types::Edge]) -> FlowNetwork {
        let mut network = FlowNetwork::from_edges(vertex_count, edges).unwrap();
        min_cost_max_flow(&mut network).unwrap();
        network
    }

    #[test]
    fn single_edge_is_one_path() {
        let network = solved(2, &[(0, 1, 5, 3)]);
        let decomposition = decompose(&network);

        assert_eq!(
            decomposition.paths,
            vec![DecomposedPath::Complete(FlowPath {
                path: vec![0, 1],
                flow: 5
            })]
        );
        assert_eq!(decomposition.total_flow(), 5);
    }

    #[test]
    fn two_saturated_routes() {
        let edges = [(0, 1, 10, 1), (1, 3, 10, 1), (0, 2, 5, 2), (2, 3, 5, 2)];
        let network = solved(4, &edges);

        let decomposition = decompose(&network);
        let completed: Vec<_> = decomposition.completed().cloned().collect();

        assert_eq!(
            completed,
            vec![
                FlowPath {
                    path: vec![0, 1, 3],
                    flow: 10
                },
                FlowPath {
                    path: vec![0, 2, 3],
                    flow: 5
                },
            ]
        );
        assert_eq!(decomposition.total_flow(), 15);
    }

    #[test]
    fn disconnected_sink_has_no_paths() {
        let network = solved(4, &[(0, 1, 3, 1), (2, 3, 3, 1)]);
        let decomposition = decompose(&network);

        assert!(decomposition.paths.is_empty());
        assert_eq!(decomposition.total_flow(), 0);
    }

    #[test]
    fn walk_without_saturated_continuation_is_dead_end() {
        // 0->1 saturates; 1->2 carries flow but keeps spare capacity.
        let network = solved(3, &[(0, 1, 2, 1), (1, 2, 5, 1)]);
        let decomposition = decompose(&network);

        assert_eq!(decomposition.paths, vec![DecomposedPath::DeadEnd(vec![0, 1])]);
        assert_eq!(decomposition.total_flow(), 0);
    }

    #[test]
    fn unsolved_network_has_nothing_saturated() {
        let network = FlowNetwork::from_edges(3, &[(0, 1, 2, 1), (1, 2, 2, 1)]).unwrap();
        assert!(decompose(&network).paths.is_empty());
    }
}
