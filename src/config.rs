use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::topology::Topology;
use crate::train::step_size::StepSchedule;
use crate::train::target::TargetEncoding;
use crate::train::train_config::TrainConfig;

/// Settings for a full training run from the command line.
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub topology: Topology,
    pub iterations: usize,
    /// Seed for both the initial fill and example selection. Taken from the
    /// wall clock when absent.
    pub seed: Option<u64>,
    pub images: String,
    pub labels: String,
    /// Where the freshly initialized network is written before training.
    pub initial_output: Option<String>,
    pub output: String,
    /// Continue from a saved network instead of a random one.
    pub resume: Option<String>,
    pub schedule: StepSchedule,
    pub target: TargetEncoding,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            topology: Topology {
                inputs: 784,
                outputs: 10,
                hidden: vec![16, 16],
            },
            iterations: 10,
            seed: None,
            images: "images".to_string(),
            labels: "labels".to_string(),
            initial_output: Some("network.bin.old".to_string()),
            output: "network.bin".to_string(),
            resume: None,
            schedule: StepSchedule::default(),
            target: TargetEncoding::default(),
        }
    }
}

impl RunConfig {
    /// Parses and validates a run configuration from JSON text.
    pub fn from_json(json: &str) -> Result<RunConfig> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.topology.validate()?;
        Ok(config)
    }

    /// Reads a run configuration from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let contents = std::fs::read_to_string(path)?;
        RunConfig::from_json(&contents)
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// The training-loop settings for this run, without progress channel or
    /// stop flag.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.iterations, self.schedule, self.target)
    }
}
