use log::{error, info, warn};
use std::collections::VecDeque;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

use super::{error::Error, report::NetworkReport, types::NetworkDescription};
use mcmf_core::{FlowNetwork, MinCostMaxFlow, decompose, traits::ShortestPathOracle};

/// Consumes network descriptions and solves each one on the blocking pool.
///
/// Networks share no state, so up to `max_parallel` of them are solved at once.
/// Reports are printed in the order the networks arrived, and at most
/// `max_parallel` finished or running tasks are held at any time.
pub struct FlowRunner<O> {
    oracle: O,
    receiver: Receiver<NetworkDescription>,
    max_parallel: usize,
    print_matrices: bool,
}

impl<O> FlowRunner<O>
where
    O: ShortestPathOracle + Clone + Send + 'static,
{
    pub fn new(
        oracle: O,
        receiver: Receiver<NetworkDescription>,
        max_parallel: usize,
        print_matrices: bool,
    ) -> Self {
        FlowRunner {
            oracle,
            receiver,
            max_parallel,
            print_matrices,
        }
    }

    /// Runs until the producer closes the channel and every report is printed.
    ///
    /// A network that fails to build or solve, or whose solver task panics, is
    /// logged and skipped. Returns the number of networks reported successfully.
    pub async fn process_networks(mut self) -> Result<usize, Error> {
        info!("Runner ready.");

        let max_parallel = self.max_parallel.max(1);
        let mut pending: VecDeque<(String, JoinHandle<Result<String, Error>>)> =
            VecDeque::with_capacity(max_parallel);
        let mut reported = 0;

        while let Some(description) = self.receiver.recv().await {
            while pending.front().is_some_and(|(_, handle)| handle.is_finished()) {
                if let Some((name, handle)) = pending.pop_front() {
                    reported += usize::from(print_report(&name, handle).await);
                }
            }
            if pending.len() >= max_parallel {
                if let Some((name, handle)) = pending.pop_front() {
                    reported += usize::from(print_report(&name, handle).await);
                }
            }

            let oracle = self.oracle.clone();
            let print_matrices = self.print_matrices;
            let name = description.name.clone();

            let handle = tokio::task::spawn_blocking(move || {
                solve(&oracle, description, print_matrices)
            });
            pending.push_back((name, handle));
        }

        while let Some((name, handle)) = pending.pop_front() {
            reported += usize::from(print_report(&name, handle).await);
        }

        if reported == 0 {
            warn!("Runner: no network was solved.");
        }
        info!("Runner: {} networks reported.", reported);
        Ok(reported)
    }

    /// Spawns the runner onto the Tokio runtime.
    pub fn spawn_task(self) -> JoinHandle<Result<usize, Error>> {
        tokio::spawn(self.process_networks())
    }
}

/// Waits for one solver task and prints its report. Returns whether it succeeded.
async fn print_report(name: &str, handle: JoinHandle<Result<String, Error>>) -> bool {
    match handle.await {
        Ok(Ok(report)) => {
            println!("{}", report);
            true
        }
        Ok(Err(e)) => {
            error!("Runner: network {} failed: {}", name, e);
            false
        }
        Err(e) => {
            error!("Runner: solver task for {} aborted: {}", name, e);
            false
        }
    }
}

/// Builds, solves and decomposes one network and renders its report.
pub fn solve<O: ShortestPathOracle>(
    oracle: &O,
    description: NetworkDescription,
    print_matrices: bool,
) -> Result<String, Error> {
    let mut network = FlowNetwork::from_edges(description.vertex_count, &description.edges)?;
    let capacity = network.capacity().clone();
    let cost = network.cost().clone();

    let summary = MinCostMaxFlow::new(oracle).run(&mut network)?;
    let decomposition = decompose(&network);

    info!(
        "{}: flow {} cost {} in {} rounds",
        description.name,
        summary.max_flow,
        summary.total_cost,
        summary.augmentations.len()
    );

    let report = NetworkReport {
        name: &description.name,
        capacity: &capacity,
        cost: &cost,
        residual: network.residual(),
        summary: &summary,
        decomposition: &decomposition,
    };
    Ok(report.render(print_matrices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error as NetworkError;
    use common::types::Edge;
    use mcmf_core::solver::{BellmanFordSolver, ShortestPathTree};
    use tokio::sync::mpsc;

    fn description(name: &str, vertex_count: usize, edges: Vec<Edge>) -> NetworkDescription {
        NetworkDescription {
            name: name.to_string(),
            vertex_count,
            edges,
        }
    }

    #[test]
    fn solve_reports_single_edge_network() {
        let report = solve(
            &BellmanFordSolver,
            description("one-edge", 2, vec![(0, 1, 5, 3)]),
            false,
        )
        .unwrap();

        assert!(report.contains("Found flow: 5 path: 0 1"));
        assert!(report.contains("total flow: 5"));
        assert!(report.contains("total cost: 15"));
    }

    #[test]
    fn solve_rejects_invalid_edge() {
        let result = solve(
            &BellmanFordSolver,
            description("bad", 5, vec![(0, 99, 5, 1)]),
            false,
        );

        assert!(matches!(
            result,
            Err(Error::NetworkError(NetworkError::InvalidEdge { to: 99, .. }))
        ));
    }

    #[tokio::test]
    async fn runner_skips_failed_networks_and_counts_reports() {
        let (tx, rx) = mpsc::channel(4);
        let runner = FlowRunner::new(BellmanFordSolver, rx, 2, false);
        let handle = runner.spawn_task();

        tx.send(description("ok", 2, vec![(0, 1, 1, 1)])).await.unwrap();
        tx.send(description("empty", 0, vec![])).await.unwrap();
        tx.send(description("disconnected", 3, vec![(0, 1, 1, 1)]))
            .await
            .unwrap();
        drop(tx);

        let reported = handle.await.unwrap().unwrap();
        assert_eq!(reported, 2);
    }

    /// Delegates to Bellman-Ford but panics on three-vertex networks.
    #[derive(Clone)]
    struct PanicsOnThreeVertices;

    impl ShortestPathOracle for PanicsOnThreeVertices {
        fn shortest_paths(&self, network: &FlowNetwork) -> Result<ShortestPathTree, NetworkError> {
            if network.vertex_count() == 3 {
                panic!("oracle blew up");
            }
            BellmanFordSolver.shortest_paths(network)
        }
    }

    #[tokio::test]
    async fn runner_survives_panicking_solver_task() {
        let (tx, rx) = mpsc::channel(4);
        let handle = FlowRunner::new(PanicsOnThreeVertices, rx, 2, false).spawn_task();

        tx.send(description("before", 2, vec![(0, 1, 1, 1)])).await.unwrap();
        tx.send(description("panics", 3, vec![(0, 1, 1, 1)])).await.unwrap();
        tx.send(description("after", 2, vec![(0, 1, 2, 1)])).await.unwrap();
        drop(tx);

        let reported = handle.await.unwrap().unwrap();
        assert_eq!(reported, 2);
    }

    #[tokio::test]
    async fn runner_with_single_slot_reports_every_network() {
        let (tx, rx) = mpsc::channel(1);
        let handle = FlowRunner::new(BellmanFordSolver, rx, 1, false).spawn_task();

        for i in 0..6 {
            let name = format!("chain-{}", i);
            tx.send(description(&name, 2, vec![(0, 1, i + 1, 1)])).await.unwrap();
        }
        drop(tx);

        let reported = handle.await.unwrap().unwrap();
        assert_eq!(reported, 6);
    }
}
