use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::activation::activation::ActivationFunction;
use crate::activation::softmax::SoftmaxPolicy;
use crate::network::network::NetworkShape;

/// Settings for one load-split-forward run.
///
/// Every field has a default, so a JSON file only needs the keys it
/// changes. Command-line flags are applied on top of whatever was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// CSV with a header row, then `label, pixel0, ..., pixelN` per line.
    pub dataset_path: PathBuf,
    /// Leading rows held out as the dev set.
    pub dev_size: usize,
    pub input_size: usize,
    pub hidden_size: usize,
    pub classes: usize,
    /// Fixed seed for weight initialization; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub activation: ActivationFunction,
    pub softmax: SoftmaxPolicy,
    /// Divide pixel values by 255 before the forward pass.
    pub normalize_inputs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let shape = NetworkShape::default();
        RunConfig {
            dataset_path: PathBuf::from("./dataset/mnist_train.csv"),
            dev_size: 1000,
            input_size: shape.input_size,
            hidden_size: shape.hidden_size,
            classes: shape.classes,
            seed: None,
            activation: ActivationFunction::ReLU,
            softmax: SoftmaxPolicy::Exact,
            normalize_inputs: false,
        }
    }
}

impl RunConfig {
    pub fn network_shape(&self) -> NetworkShape {
        NetworkShape {
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            classes: self.classes,
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
