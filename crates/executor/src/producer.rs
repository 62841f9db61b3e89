use log::info;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::error::Error;
use super::types::{NetworkDescription, NetworkSource};

pub struct Producer<S: NetworkSource> {
    source: S,
}

impl<S> Producer<S>
where
    S: NetworkSource,
{
    pub fn new(source: S) -> Self {
        Producer { source }
    }

    /// Spawns the source's stream onto the Tokio runtime. The channel closes
    /// when the stream finishes and `sender` is dropped.
    pub fn spawn(self, sender: Sender<NetworkDescription>) -> JoinHandle<Result<(), Error>> {
        info!("Producer ready.");
        tokio::spawn(async move { self.source.run_stream(sender).await })
    }
}
