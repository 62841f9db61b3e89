use log::{error, info};
use tokio::sync::mpsc::Sender;

use super::error::Error;
use super::types::{NetworkDescription, NetworkSource};
use common::types::Edge;

/// Streams networks stored in the whitespace separated text format:
/// the vertex count, followed by `from to capacity cost` quadruples.
pub struct TextStreamer {
    paths: Vec<String>,
}

impl TextStreamer {
    pub fn new(paths: Vec<String>) -> Self {
        TextStreamer { paths }
    }

    async fn read_network(path: &str) -> Result<NetworkDescription, Error> {
        let contents = tokio::fs::read_to_string(path).await?;
        parse_network(path, &contents)
    }
}

/// Parses one network in the text format.
///
/// # Errors
/// Returns `Error::ParseError` for a missing vertex count, a non-integer token,
/// a negative vertex index, or a trailing incomplete edge.
pub fn parse_network(name: &str, contents: &str) -> Result<NetworkDescription, Error> {
    let parse_error = |reason: String| Error::ParseError {
        source_name: name.to_string(),
        reason,
    };

    let tokens = contents
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| parse_error(format!("'{}' is not an integer", token)))
        })
        .collect::<Result<Vec<i64>, Error>>()?;

    let Some((&vertex_count, rest)) = tokens.split_first() else {
        return Err(parse_error("missing vertex count".to_string()));
    };
    let vertex_count = usize::try_from(vertex_count)
        .map_err(|_| parse_error(format!("invalid vertex count {}", vertex_count)))?;

    if rest.len() % 4 != 0 {
        return Err(parse_error(format!(
            "trailing incomplete edge after {} complete edges",
            rest.len() / 4
        )));
    }

    let index = |value: i64| {
        usize::try_from(value).map_err(|_| parse_error(format!("invalid vertex index {}", value)))
    };

    let edges = rest
        .chunks_exact(4)
        .map(|quad| -> Result<Edge, Error> {
            Ok((index(quad[0])?, index(quad[1])?, quad[2], quad[3]))
        })
        .collect::<Result<Vec<Edge>, Error>>()?;

    Ok(NetworkDescription {
        name: name.to_string(),
        vertex_count,
        edges,
    })
}

#[async_trait::async_trait]
impl NetworkSource for TextStreamer {
    async fn run_stream(self, sender: Sender<NetworkDescription>) -> Result<(), Error> {
        info!("TextStreamer: reading {} network files", self.paths.len());

        for path in &self.paths {
            let description = match Self::read_network(path).await {
                Ok(description) => description,
                Err(e) => {
                    error!("TextStreamer: skipping {}: {}", path, e);
                    continue;
                }
            };

            if sender.send(description).await.is_err() {
                error!("TextStreamer shutting down: runner receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        Ok(())
    }
}
