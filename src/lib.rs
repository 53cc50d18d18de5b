pub mod config;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use config::RunConfig;
pub use data::{Example, ExampleSource, IdxStore, InMemorySource};
pub use error::{NetError, Result};
pub use layers::transition::Transition;
pub use loss::{cost, SquaredError};
pub use math::matrix::Matrix;
pub use network::{decode, encode, evaluate, Network, Param, Topology};
pub use train::{train_loop, train_step, StepReport, StepSchedule, TargetEncoding, TrainConfig};
