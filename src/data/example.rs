use crate::error::{NetError, Result};

/// One training sample: normalized inputs and a raw class label.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub input: Vec<f32>,
    pub label: u8,
}

impl Example {
    /// Maps byte intensities onto `[0, 1]` by dividing by 255.
    pub fn from_pixels(pixels: &[u8], label: u8) -> Example {
        Example {
            input: pixels.iter().map(|&px| px as f32 / 255.0).collect(),
            label,
        }
    }
}

/// Random-access provider of training samples.
pub trait ExampleSource {
    /// Number of examples available.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the example at `index`.
    fn example(&mut self, index: usize) -> Result<Example>;
}

/// Examples held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    examples: Vec<Example>,
}

impl InMemorySource {
    pub fn new(examples: Vec<Example>) -> Self {
        InMemorySource { examples }
    }
}

impl ExampleSource for InMemorySource {
    fn len(&self) -> usize {
        self.examples.len()
    }

    fn example(&mut self, index: usize) -> Result<Example> {
        self.examples.get(index).cloned().ok_or_else(|| {
            NetError::shape(format!(
                "example {index} out of range for {} examples",
                self.examples.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_normalized() {
        let ex = Example::from_pixels(&[0, 51, 255], 7);
        assert_eq!(ex.input, vec![0.0, 0.2, 1.0]);
        assert_eq!(ex.label, 7);
    }

    #[test]
    fn in_memory_bounds_are_checked() {
        let mut src = InMemorySource::new(vec![Example { input: vec![1.0], label: 0 }]);
        assert_eq!(src.len(), 1);
        assert!(src.example(0).is_ok());
        assert!(matches!(src.example(1), Err(NetError::Shape(_))));
    }
}
