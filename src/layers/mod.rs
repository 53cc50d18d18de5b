pub mod transition;

pub use transition::Transition;
