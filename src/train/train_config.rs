use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::train::step_report::StepReport;
use crate::train::step_size::StepSchedule;
use crate::train::target::TargetEncoding;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`  — number of training steps, one example each
/// - `schedule`    — step-size policy applied to every probe of a step
/// - `target`      — how labels become expected output vectors
/// - `progress_tx` — optional channel sender; one `StepReport` is sent per
///                   completed step.  If the receiver is dropped the loop
///                   terminates early.
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates before the next step.
pub struct TrainConfig {
    pub iterations: usize,
    pub schedule: StepSchedule,
    pub target: TargetEncoding,
    pub progress_tx: Option<mpsc::Sender<StepReport>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(iterations: usize, schedule: StepSchedule, target: TargetEncoding) -> Self {
        TrainConfig {
            iterations,
            schedule,
            target,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(10, StepSchedule::default(), TargetEncoding::default())
    }
}
