use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// One affine mapping from a layer (or the raw input) to the next.
///
/// `weights` has one row per destination neuron and one column per source
/// value; `biases` has one entry per destination neuron. No activation is
/// applied, so a chain of transitions is affine end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub weights: Matrix,
    pub biases: Vec<f32>,
}

impl Transition {
    pub fn zeros(size: usize, input_size: usize) -> Transition {
        Transition {
            weights: Matrix::zeros(size, input_size),
            biases: vec![0.0; size],
        }
    }

    /// Neurons produced by this transition.
    pub fn size(&self) -> usize {
        self.weights.rows
    }

    /// Values consumed by this transition.
    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    /// `neuron[j] = bias[j] + Σ_k weight[j][k] * source[k]`
    pub fn feed_from(&self, source: &[f32]) -> Vec<f32> {
        self.weights.affine(source, &self.biases)
    }
}
