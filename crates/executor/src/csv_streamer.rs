use csv::ReaderBuilder;
use log::{error, info};
use serde::Deserialize;
use std::fs::File;
use tokio::sync::mpsc::Sender;

use super::error::Error;
use super::types::{NetworkDescription, NetworkSource};
use common::types::Edge;

// Helper struct for CSV parsing
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    #[serde(rename = "from")]
    pub from_node: usize,

    #[serde(rename = "to")]
    pub to_node: usize,

    pub capacity: i64,

    pub cost: i64,
}

/// Streams one network per CSV file. Vertex count is inferred as one more than
/// the largest endpoint index, so the highest index is the sink.
pub struct CsvStreamer {
    paths: Vec<String>,
}

impl CsvStreamer {
    pub fn new(paths: Vec<String>) -> Self {
        CsvStreamer { paths }
    }

    fn parse_csv_to_network(path: &str) -> Result<NetworkDescription, Error> {
        let file = File::open(path)?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut edges: Vec<Edge> = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            edges.push((
                record.from_node,
                record.to_node,
                record.capacity,
                record.cost,
            ));
        }

        let vertex_count = edges
            .iter()
            .flat_map(|&(u, v, _, _)| [u, v])
            .max()
            .map_or(0, |max_id| max_id + 1);

        Ok(NetworkDescription {
            name: path.to_string(),
            vertex_count,
            edges,
        })
    }
}

#[async_trait::async_trait]
impl NetworkSource for CsvStreamer {
    async fn run_stream(self, sender: Sender<NetworkDescription>) -> Result<(), Error> {
        info!("CsvStreamer: reading {} network files", self.paths.len());

        for path in &self.paths {
            let description = match Self::parse_csv_to_network(path) {
                Ok(description) => description,
                Err(e) => {
                    error!("CsvStreamer: skipping {}: {}", path, e);
                    continue;
                }
            };

            if sender.send(description).await.is_err() {
                error!("CsvStreamer shutting down: runner receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOCK_CSV_CONTENT: &str = "\
id,from,to,capacity,cost,label
1,0,1,10,1,a
2,1,3,10,1,b
3,0,2,5,2,c
4,2,3,5,2,d
";

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    #[test]
    fn test_parse_csv_to_network_success() {
        let temp_file = write_temp(MOCK_CSV_CONTENT);
        let path = temp_file
            .path()
            .to_str()
            .expect("Failed to get path string");

        let result = CsvStreamer::parse_csv_to_network(path);

        assert!(
            result.is_ok(),
            "Parsing failed with error: {:?}",
            result.err()
        );

        let description = result.unwrap();

        let expected_edges: Vec<Edge> =
            vec![(0, 1, 10, 1), (1, 3, 10, 1), (0, 2, 5, 2), (2, 3, 5, 2)];

        assert_eq!(description.vertex_count, 4, "Should infer 4 vertices.");
        assert_eq!(
            description.edges, expected_edges,
            "Parsed edges do not match expected data."
        );
    }

    #[test]
    fn test_parse_csv_header_only_has_no_vertices() {
        let temp_file = write_temp("from,to,capacity,cost\n");
        let path = temp_file.path().to_str().expect("Failed to get path string");

        let description = CsvStreamer::parse_csv_to_network(path).unwrap();

        assert_eq!(description.vertex_count, 0);
        assert!(description.edges.is_empty());
    }

    #[test]
    fn test_parse_csv_rejects_bad_field() {
        let temp_file = write_temp("from,to,capacity,cost\n0,1,lots,1\n");
        let path = temp_file.path().to_str().expect("Failed to get path string");

        let result = CsvStreamer::parse_csv_to_network(path);

        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[test]
    fn test_parse_csv_to_network_file_not_found() {
        let result = CsvStreamer::parse_csv_to_network("non_existent_file.csv");

        assert!(
            result.is_err(),
            "Should have failed to open non-existent file."
        );

        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result.err());
        }
    }
}
