use super::network::FlowNetwork;
use super::solver::ShortestPathTree;
use common::error::Error;

/// Trait for shortest-path oracles driving the augmentation loop.
pub trait ShortestPathOracle {
    /// Computes cheapest distances from the network's source over edges with
    /// positive residual capacity.
    ///
    /// Must tolerate negative edge costs, which every reverse residual edge carries.
    /// Returns `Err(e)` only on structural failure; an unreachable sink is a
    /// normal outcome reported through [`ShortestPathTree::is_reachable`].
    fn shortest_paths(&self, network: &FlowNetwork) -> Result<ShortestPathTree, Error>;
}

impl<T> ShortestPathOracle for &T
where
    T: ShortestPathOracle + ?Sized,
{
    fn shortest_paths(&self, network: &FlowNetwork) -> Result<ShortestPathTree, Error> {
        (**self).shortest_paths(network)
    }
}
