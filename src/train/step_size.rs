use serde::{Deserialize, Serialize};

/// Perturbation magnitude used for every probe during one training step.
pub trait StepSize {
    fn step_size(&self, iteration: usize, total_iterations: usize) -> f32;
}

/// `max(total - iteration² / 4, max(iteration, 1))` in integer arithmetic.
///
/// Shrinks quadratically early on, then is floored by the iteration index
/// itself. Subtraction saturates at zero and iteration 0 floors at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticDecay;

impl StepSize for QuadraticDecay {
    fn step_size(&self, iteration: usize, total_iterations: usize) -> f32 {
        let decayed = total_iterations.saturating_sub(iteration.saturating_mul(iteration) / 4);
        decayed.max(iteration.max(1)) as f32
    }
}

/// The same step for every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f32);

impl StepSize for Constant {
    fn step_size(&self, _iteration: usize, _total_iterations: usize) -> f32 {
        self.0
    }
}

/// Configurable choice of step-size policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepSchedule {
    #[default]
    QuadraticDecay,
    Constant { value: f32 },
}

impl StepSize for StepSchedule {
    fn step_size(&self, iteration: usize, total_iterations: usize) -> f32 {
        match self {
            StepSchedule::QuadraticDecay => QuadraticDecay.step_size(iteration, total_iterations),
            StepSchedule::Constant { value } => Constant(*value).step_size(iteration, total_iterations),
        }
    }
}
