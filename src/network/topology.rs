use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// The layer layout of a fully-connected network.
///
/// Fields:
/// - `inputs`  — number of scalar inputs accepted
/// - `outputs` — number of scalar outputs produced
/// - `hidden`  — size of each hidden layer, in order from input to output
///
/// A topology with `L` hidden layers has `L + 1` transitions. Transition `i`
/// maps `prev_layer_size(i)` values onto `layer_size(i)` neurons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub outputs: usize,
    #[serde(default)]
    pub hidden: Vec<usize>,
}

impl Topology {
    /// Validates and builds a topology.
    ///
    /// Fails with `NetError::Shape` if any size is zero or exceeds `u32::MAX`.
    pub fn new(inputs: usize, outputs: usize, hidden: Vec<usize>) -> Result<Topology> {
        let topology = Topology { inputs, outputs, hidden };
        topology.validate()?;
        Ok(topology)
    }

    /// Like `new`, but also checks the stated hidden layer count against the
    /// number of sizes given.
    pub fn with_layer_count(
        inputs: usize,
        outputs: usize,
        hidden_layer_count: usize,
        hidden: &[usize],
    ) -> Result<Topology> {
        if hidden.len() != hidden_layer_count {
            return Err(NetError::shape(format!(
                "{hidden_layer_count} hidden layers declared but {} sizes given",
                hidden.len()
            )));
        }
        Topology::new(inputs, outputs, hidden.to_vec())
    }

    /// Checks that every size is positive and fits in a `u32`.
    pub fn validate(&self) -> Result<()> {
        let max = u32::MAX as usize;
        if self.inputs > max || self.outputs > max || self.hidden.iter().any(|&s| s > max) {
            return Err(NetError::shape(format!("layer sizes must not exceed {max}")));
        }
        if self.inputs == 0 {
            return Err(NetError::shape("input count must be positive"));
        }
        if self.outputs == 0 {
            return Err(NetError::shape("output count must be positive"));
        }
        if let Some(i) = self.hidden.iter().position(|&size| size == 0) {
            return Err(NetError::shape(format!("hidden layer {i} has size zero")));
        }
        Ok(())
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.hidden.len()
    }

    /// Number of transitions, always `hidden_layer_count() + 1`.
    pub fn transitions(&self) -> usize {
        self.hidden.len() + 1
    }

    /// Neurons produced by transition `i`.
    pub fn layer_size(&self, i: usize) -> usize {
        if i < self.hidden.len() {
            self.hidden[i]
        } else {
            self.outputs
        }
    }

    /// Values consumed by transition `i`.
    pub fn prev_layer_size(&self, i: usize) -> usize {
        if i == 0 {
            self.inputs
        } else {
            self.hidden[i - 1]
        }
    }

    pub fn weight_count(&self) -> usize {
        (0..self.transitions())
            .map(|i| self.layer_size(i) * self.prev_layer_size(i))
            .sum()
    }

    pub fn bias_count(&self) -> usize {
        (0..self.transitions()).map(|i| self.layer_size(i)).sum()
    }

    pub fn parameter_count(&self) -> usize {
        self.weight_count() + self.bias_count()
    }

    /// `parameter_count`, or `None` if it does not fit in a `usize`.
    pub fn checked_parameter_count(&self) -> Option<usize> {
        (0..self.transitions()).try_fold(0usize, |acc, i| {
            let size = self.layer_size(i);
            size.checked_mul(self.prev_layer_size(i))?
                .checked_add(size)?
                .checked_add(acc)
        })
    }

    /// Serializes the topology to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a topology from a JSON file.
    pub fn load_json(path: &str) -> Result<Topology> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let topology: Topology = serde_json::from_reader(reader)?;
        topology.validate()?;
        Ok(topology)
    }
}
