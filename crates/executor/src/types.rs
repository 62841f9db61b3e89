use tokio::sync::mpsc::Sender;

use super::error::Error;
use common::types::Edge;

/// A trait defining the contract for any source that produces networks and streams
/// them into the solving pipeline.
///
/// Decouples the Producer task from the specific origin of the networks
/// (text files, CSV files, or randomly generated ones).
///
/// The trait bounds (`Send`, `Sync`, `'static`) let the implementation run on the
/// multi-threaded Tokio runtime.
#[async_trait::async_trait]
pub trait NetworkSource: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<NetworkDescription>) -> Result<(), Error>;
}

/// A network as read by a loader, before validation by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescription {
    pub name: String,
    pub vertex_count: usize,
    pub edges: Vec<Edge>,
}

/// Where the pipeline takes its networks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sim,
    Text(Vec<String>),
    Csv(Vec<String>),
}
