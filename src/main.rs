//! Loads a digit CSV, splits off a dev set, and runs the untrained
//! two-layer network over it.
//!
//! Run with:
//!   cargo run --release -- --data ./dataset/mnist_train.csv --seed 42

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use ferrite_digits::activation::softmax::{Softmax, SoftmaxPolicy};
use ferrite_digits::data::csv::load_csv;
use ferrite_digits::data::dataset::{scale, split_frame, SplitShapes};
use ferrite_digits::network::metrics::{accuracy, argmax_columns};
use ferrite_digits::{logging, RunConfig, Shape, TwoLayerNetwork};

#[derive(Debug, Parser)]
#[command(name = "ferrite-digits", version, about = "Forward pass of a two-layer digit classifier")]
struct Cli {
    /// CSV dataset (header row, then label followed by pixels)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON run configuration; flags override its values
    #[arg(short, long)]
    config: Option<String>,

    /// Rows held out as the dev set
    #[arg(long)]
    dev_size: Option<usize>,

    /// Seed for weight initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Softmax arithmetic: exact or rounded
    #[arg(long)]
    softmax: Option<SoftmaxPolicy>,

    /// Scale pixels into [0, 1]
    #[arg(long)]
    normalize: bool,

    /// Print a JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct RunReport {
    dev: SplitShapes,
    train: SplitShapes,
    parameters: Vec<(&'static str, Shape)>,
    output: Shape,
    softmax: SoftmaxPolicy,
    dev_accuracy: f64,
}

fn resolve_config(cli: &Cli) -> std::io::Result<RunConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load_json(path)?,
        None => RunConfig::default(),
    };
    if let Some(path) = &cli.data {
        cfg.dataset_path = path.clone();
    }
    if let Some(n) = cli.dev_size {
        cfg.dev_size = n;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    if let Some(policy) = cli.softmax {
        cfg.softmax = policy;
    }
    cfg.normalize_inputs |= cli.normalize;
    Ok(cfg)
}

fn run(cfg: &RunConfig) -> Result<RunReport, Box<dyn std::error::Error>> {
    let frame = load_csv(&cfg.dataset_path)?;
    info!(path = %cfg.dataset_path.display(), shape = %frame.shape(), "loaded dataset");

    let (dev, train) = split_frame(&frame, cfg.dev_size)?;
    info!(labels = %dev.labels.shape(), data = %dev.features.shape(), "dev set");
    info!(labels = %train.labels.shape(), data = %train.features.shape(), "train set");

    let net = TwoLayerNetwork::random(cfg.network_shape(), cfg.seed)
        .with_activation(cfg.activation.clone())
        .with_softmax(Softmax::new(cfg.softmax));
    for (name, shape) in net.shapes() {
        info!("{} shape: {}", name, shape);
    }

    let x = if cfg.normalize_inputs {
        scale(&dev.features, 255.0)
    } else {
        dev.features.clone()
    };

    let probs = net.forward(&x)?;
    let preds = argmax_columns(&probs);
    let dev_accuracy = accuracy(&preds, &dev.labels)?;
    info!(output = %probs.shape(), dev_accuracy, "forward pass complete");

    Ok(RunReport {
        dev: dev.shapes(),
        train: train.shapes(),
        parameters: net.shapes().to_vec(),
        output: probs.shape(),
        softmax: cfg.softmax,
        dev_accuracy,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = match resolve_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("unable to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cfg) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        error!("unable to encode report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
