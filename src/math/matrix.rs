use rand::Rng;
use serde::{Deserialize, Serialize};

/// Row-major weight storage: one row per destination neuron, one column per
/// source neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f32>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently and uniformly from `[0, 1)`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill_uniform(rng);
        res
    }

    /// Overwrites every entry with a fresh `[0, 1)` draw, row by row.
    pub fn fill_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for value in row.iter_mut() {
                *value = rng.gen::<f32>();
            }
        }
    }

    /// Builds a matrix from its rows. All rows must share one length.
    pub fn from_rows(data: Vec<Vec<f32>>) -> Matrix {
        let cols = data.first().map_or(0, Vec::len);
        debug_assert!(data.iter().all(|row| row.len() == cols));
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    /// Computes `self · x + bias` for a column vector `x` of length `cols`.
    pub fn affine(&self, x: &[f32], bias: &[f32]) -> Vec<f32> {
        assert_eq!(x.len(), self.cols, "Matrix and vector are of incorrect sizes");
        assert_eq!(bias.len(), self.rows, "Matrix and bias are of incorrect sizes");

        self.data
            .iter()
            .zip(bias)
            .map(|(row, b)| {
                let mut sum = 0.0;
                for (w, v) in row.iter().zip(x) {
                    sum += w * v;
                }
                sum + b
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 4);
        assert_eq!(m.data.len(), 3);
        assert!(m.data.iter().all(|row| row.len() == 4 && row.iter().all(|&v| v == 0.0)));
        assert_eq!(m.len(), 12);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(8, 8, &mut rng);
        assert!(m.data.iter().flatten().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn affine_adds_bias_after_weighted_sum() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![0.5, -1.0]]);
        let out = m.affine(&[3.0, 1.0], &[0.25, 1.0]);
        assert_eq!(out, vec![5.25, 1.5]);
    }

    #[test]
    #[should_panic]
    fn affine_rejects_wrong_input_length() {
        Matrix::zeros(2, 3).affine(&[1.0], &[0.0, 0.0]);
    }
}
