pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod producer;
pub mod report;
pub mod runner;
pub mod sim_streamer;
pub mod text_streamer;
pub mod types;

use log::{error, info};
use std::env;
use tokio::sync::{mpsc, mpsc::Sender};
use tokio::task::JoinHandle;

use csv_streamer::CsvStreamer;
use error::Error;
use mcmf_core::solver::BellmanFordSolver;
use producer::Producer;
use runner::FlowRunner;
use sim_streamer::SimulatorStreamer;
use text_streamer::TextStreamer;
use types::{DataSource, NetworkDescription};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let Some(source) = parse_args(&args, &config.runner.inputs) else {
        eprintln!(
            "Usage: {} [sim | text <file>... | csv <file>...]\n  - sim: solve randomly generated networks\n  - text: read networks in the text format (default: runner.inputs)\n  - csv: read networks from CSV files with from,to,capacity,cost columns",
            args.first().map(String::as_str).unwrap_or("executor")
        );
        std::process::exit(1);
    };

    let (sender, receiver) = mpsc::channel::<NetworkDescription>(config.runner.channel_capacity);

    let producer_handle = spawn_producer(source, sender, &config);
    let runner_handle = FlowRunner::new(
        BellmanFordSolver,
        receiver,
        config.runner.max_parallel,
        config.runner.print_matrices,
    )
    .spawn_task();

    let (producer_result, runner_result) = tokio::join!(producer_handle, runner_handle);

    if let Err(e) = flatten(producer_result) {
        error!("Producer failed: {}", e);
    }
    match flatten(runner_result) {
        Ok(reported) => info!("Pipeline shut down after {} networks.", reported),
        Err(e) => {
            error!("Runner failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Determines the data source from command-line arguments.
///
/// With no arguments the configured text inputs are used. Returns `None` on
/// unrecognised input.
fn parse_args(args: &[String], default_inputs: &[String]) -> Option<DataSource> {
    let Some(mode) = args.get(1).map(|s| s.to_lowercase()) else {
        return Some(DataSource::Text(default_inputs.to_vec()));
    };
    let paths: Vec<String> = args.iter().skip(2).cloned().collect();

    match mode.as_str() {
        "sim" => Some(DataSource::Sim),
        "text" if !paths.is_empty() => Some(DataSource::Text(paths)),
        "csv" if !paths.is_empty() => Some(DataSource::Csv(paths)),
        _ => None,
    }
}

pub fn spawn_producer(
    source: DataSource,
    sender: Sender<NetworkDescription>,
    config: &config::Config,
) -> JoinHandle<Result<(), Error>> {
    match source {
        DataSource::Sim => {
            info!("Starting SimulatorStreamer producer task...");
            Producer::new(SimulatorStreamer::new(config.generator.clone())).spawn(sender)
        }
        DataSource::Text(paths) => {
            info!("Starting TextStreamer producer task...");
            Producer::new(TextStreamer::new(paths)).spawn(sender)
        }
        DataSource::Csv(paths) => {
            info!("Starting CsvStreamer producer task...");
            Producer::new(CsvStreamer::new(paths)).spawn(sender)
        }
    }
}

fn flatten<T>(result: Result<Result<T, Error>, tokio::task::JoinError>) -> Result<T, Error> {
    result?
}
