use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// How a label becomes the expected output vector for a training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEncoding {
    /// One-hot: position `label` is `1.0`, every other position `0.0`.
    #[default]
    Label,
    /// Every position is `1.0` when `label == iteration`, otherwise `0.0`.
    ///
    /// Compares the label against the step counter rather than the output
    /// position, so most steps train toward an all-zero target.
    IterationIndex,
}

impl TargetEncoding {
    /// Builds the expected vector of length `outputs`.
    ///
    /// `Label` fails with `NetError::Shape` if `label >= outputs`.
    pub fn expected(&self, label: u8, iteration: usize, outputs: usize) -> Result<Vec<f32>> {
        match self {
            TargetEncoding::Label => {
                let class = label as usize;
                if class >= outputs {
                    return Err(NetError::shape(format!(
                        "label {label} cannot be one-hot encoded into {outputs} outputs"
                    )));
                }
                let mut one_hot = vec![0.0f32; outputs];
                one_hot[class] = 1.0;
                Ok(one_hot)
            }
            TargetEncoding::IterationIndex => {
                let hit = if label as usize == iteration { 1.0 } else { 0.0 };
                Ok(vec![hit; outputs])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_one_hot() {
        let v = TargetEncoding::Label.expected(3, 7, 10).unwrap();
        assert_eq!(v.len(), 10);
        assert_eq!(v[3], 1.0);
        assert_eq!(v.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn label_out_of_range_is_rejected() {
        let res = TargetEncoding::Label.expected(10, 0, 10);
        assert!(matches!(res, Err(NetError::Shape(_))));
    }

    #[test]
    fn iteration_index_fills_uniformly() {
        assert_eq!(TargetEncoding::IterationIndex.expected(4, 4, 3).unwrap(), vec![1.0; 3]);
        assert_eq!(TargetEncoding::IterationIndex.expected(4, 5, 3).unwrap(), vec![0.0; 3]);
    }
}
