use async_trait::async_trait;
use log::{error, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;

use super::config::GeneratorConfig;
use super::error::Error;
use super::types::{NetworkDescription, NetworkSource};
use common::types::Edge;

/// Produces random networks for simulation purposes.
///
/// Every generated edge points from a lower to a higher vertex index, so the
/// original graph is acyclic and has no negative-cost cycles. Capacities are
/// drawn from `1..=max_capacity` and costs from `0..=max_cost`.
pub struct SimulatorStreamer {
    config: GeneratorConfig,
}

impl SimulatorStreamer {
    pub fn new(config: GeneratorConfig) -> Self {
        SimulatorStreamer { config }
    }

    fn random_network(&self, rng: &mut SmallRng, index: usize) -> NetworkDescription {
        let n = self.config.vertex_count;
        let density = self.config.edge_density.clamp(0.0, 1.0);
        let capacity_range = 1..=self.config.max_capacity.max(1);
        let cost_range = 0..=self.config.max_cost.max(0);

        let mut edges: Vec<Edge> = Vec::new();
        for from in 0..n {
            for to in from + 1..n {
                if rng.random_bool(density) {
                    let capacity = rng.random_range(capacity_range.clone());
                    let cost = rng.random_range(cost_range.clone());
                    edges.push((from, to, capacity, cost));
                }
            }
        }

        NetworkDescription {
            name: format!("sim-{}", index),
            vertex_count: n,
            edges,
        }
    }
}

#[async_trait]
impl NetworkSource for SimulatorStreamer {
    /// Generates `networks` random networks and sends them one by one.
    ///
    /// Backpressure is handled by awaiting on `sender.send()`. Exits with
    /// `ChannelSendFailed` if the receiver is dropped.
    async fn run_stream(self, sender: Sender<NetworkDescription>) -> Result<(), Error> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(
            "SimulatorStreamer: generating {} networks of {} vertices",
            self.config.networks, self.config.vertex_count
        );

        for index in 0..self.config.networks {
            let description = self.random_network(&mut rng, index);
            if sender.send(description).await.is_err() {
                error!("Simulator shutting down: runner receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn config(networks: usize, seed: Option<u64>) -> GeneratorConfig {
        GeneratorConfig {
            networks,
            vertex_count: 6,
            edge_density: 0.5,
            max_capacity: 9,
            max_cost: 4,
            seed,
        }
    }

    async fn collect(streamer: SimulatorStreamer) -> Vec<NetworkDescription> {
        let (tx, mut rx) = mpsc::channel(16);
        streamer.run_stream(tx).await.expect("stream failed");

        let mut received = Vec::new();
        while let Some(description) = rx.recv().await {
            received.push(description);
        }
        received
    }

    /// SimulatorStreamer sends exactly the configured number of networks.
    #[tokio::test]
    async fn test_network_count() {
        let received = collect(SimulatorStreamer::new(config(3, None))).await;

        assert_eq!(received.len(), 3);
        assert_eq!(received[2].name, "sim-2");
    }

    /// All generated edges point forward and stay within the configured ranges.
    #[tokio::test]
    async fn test_edges_in_bounds() {
        let received = collect(SimulatorStreamer::new(config(5, None))).await;

        for description in received {
            assert_eq!(description.vertex_count, 6);
            for (u, v, capacity, cost) in description.edges {
                assert!(u < v, "edge must point forward");
                assert!(v < 6, "to node out of bounds");
                assert!((1..=9).contains(&capacity), "capacity out of bounds");
                assert!((0..=4).contains(&cost), "cost out of bounds");
            }
        }
    }

    /// The same seed reproduces the same networks.
    #[tokio::test]
    async fn test_seed_is_deterministic() {
        let first = collect(SimulatorStreamer::new(config(2, Some(7)))).await;
        let second = collect(SimulatorStreamer::new(config(2, Some(7)))).await;

        assert_eq!(first, second);
    }

    /// A dropped receiver stops the stream with an error.
    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = SimulatorStreamer::new(config(1, Some(1))).run_stream(tx).await;

        assert!(matches!(result, Err(Error::ChannelSendFailed)));
    }
}
