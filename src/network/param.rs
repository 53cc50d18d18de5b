use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::topology::Topology;

/// Address of a single trainable scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Param {
    /// Connection from `source` in the previous layer to `neuron` at transition `layer`.
    Weight { layer: usize, neuron: usize, source: usize },
    /// Bias of `neuron` at transition `layer`.
    Bias { layer: usize, neuron: usize },
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Weight { layer, neuron, source } => write!(f, "w[{layer}][{neuron}][{source}]"),
            Param::Bias { layer, neuron } => write!(f, "b[{layer}][{neuron}]"),
        }
    }
}

/// Every weight (layer, then neuron, then source), followed by every bias
/// (layer, then neuron).
pub fn visit_order(topology: &Topology) -> impl Iterator<Item = Param> + '_ {
    let weights = (0..topology.transitions()).flat_map(move |layer| {
        (0..topology.layer_size(layer)).flat_map(move |neuron| {
            (0..topology.prev_layer_size(layer)).map(move |source| Param::Weight {
                layer,
                neuron,
                source,
            })
        })
    });
    let biases = (0..topology.transitions()).flat_map(move |layer| {
        (0..topology.layer_size(layer)).map(move |neuron| Param::Bias { layer, neuron })
    });
    weights.chain(biases)
}
