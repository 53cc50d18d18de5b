pub mod loop_fn;
pub mod probe;
pub mod step_report;
pub mod step_size;
pub mod target;
pub mod train_config;
pub mod trainer;

pub use loop_fn::train_loop;
pub use probe::{Direction, Probe, ProbeState};
pub use step_report::StepReport;
pub use step_size::{Constant, QuadraticDecay, StepSchedule, StepSize};
pub use target::TargetEncoding;
pub use train_config::TrainConfig;
pub use trainer::train_step;
