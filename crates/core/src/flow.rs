use super::network::FlowNetwork;
use super::solver::BellmanFordSolver;
use super::traits::ShortestPathOracle;
use common::{error::Error, types::Augmentation};
use log::debug;

/// Result of running the augmentation loop to exhaustion.
///
/// Fields:
/// - `augmentations`: Every augmenting path in the order it was found.
/// - `max_flow`: Sum of the flow pushed over all rounds.
/// - `total_cost`: Sum of `flow * unit_cost` over all rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowSummary {
    pub augmentations: Vec<Augmentation>,
    pub max_flow: i64,
    pub total_cost: i64,
}

/// Successive-shortest-paths min-cost max-flow driven by a [`ShortestPathOracle`].
pub struct MinCostMaxFlow<O> {
    oracle: O,
}

impl<O> MinCostMaxFlow<O>
where
    O: ShortestPathOracle,
{
    pub fn new(oracle: O) -> Self {
        MinCostMaxFlow { oracle }
    }

    /// Augments along the cheapest residual path until the sink is unreachable.
    ///
    /// The oracle runs before every augmentation; no round reuses a stale tree,
    /// which keeps the residual graph free of negative cycles.
    ///
    /// # Errors
    /// Propagates oracle and path reconstruction failures. The residual state
    /// reflects every round completed before the failure.
    pub fn run(&self, network: &mut FlowNetwork) -> Result<FlowSummary, Error> {
        let mut summary = FlowSummary::default();

        loop {
            let tree = self.oracle.shortest_paths(network)?;

            let Some(path) = tree.path_to_sink()? else {
                break;
            };

            // A one-vertex network has source == sink and nothing to push.
            let Some(flow) = network.residual().path_bottleneck(&path) else {
                break;
            };

            let unit_cost = tree
                .distance_to_sink()
                .ok_or(Error::PathReconstructionFailed)?;

            network.push_flow(&path, flow)?;

            let augmentation = Augmentation {
                path,
                flow,
                unit_cost,
            };
            debug!(
                "round {}: {} (unit cost {})",
                summary.augmentations.len() + 1,
                augmentation,
                unit_cost
            );

            summary.max_flow += augmentation.flow;
            summary.total_cost += augmentation.cost();
            summary.augmentations.push(augmentation);
        }

        debug!(
            "augmentation finished after {} rounds: flow {} cost {}",
            summary.augmentations.len(),
            summary.max_flow,
            summary.total_cost
        );
        Ok(summary)
    }
}

/// Runs successive shortest paths with [`BellmanFordSolver`].
pub fn min_cost_max_flow(network: &mut FlowNetwork) -> Result<FlowSummary, Error> {
    MinCostMaxFlow::new(BellmanFordSolver).run(network)
}
