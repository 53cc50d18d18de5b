use serde::{Deserialize, Serialize};

/// Summary of one coordinate-search training step.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `StepReport` after every completed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// 0-based step index.
    pub iteration: usize,
    /// Total steps requested for this run.
    pub total_iterations: usize,
    /// Dataset index of the example used, when drawn from a source.
    pub index: Option<usize>,
    /// Label of the example used.
    pub label: u8,
    /// Step size applied to every probe.
    pub step: f32,
    /// Network output on the example after all parameters were visited.
    pub output: Vec<f32>,
    /// Cost of `output` against the expected vector.
    pub cost: f32,
    /// Index of the largest output.
    pub predicted: usize,
    /// Parameters left on the negative side.
    pub negative_commits: usize,
    /// Parameters left on the positive side.
    pub positive_commits: usize,
    /// Wall-clock duration of this step in milliseconds.
    pub elapsed_ms: u64,
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f32]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
