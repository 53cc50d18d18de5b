pub mod example;
pub mod idx;

pub use example::{Example, ExampleSource, InMemorySource};
pub use idx::IdxStore;
