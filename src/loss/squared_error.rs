pub struct SquaredError;

impl SquaredError {
    /// Scalar cost: Σ (output - expected)².
    ///
    /// Not averaged. Panics if the two slices differ in length.
    pub fn cost(output: &[f32], expected: &[f32]) -> f32 {
        assert_eq!(
            output.len(),
            expected.len(),
            "output and expected must have equal length"
        );
        output
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

/// Shorthand for [`SquaredError::cost`].
pub fn cost(output: &[f32], expected: &[f32]) -> f32 {
    SquaredError::cost(output, expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_output_examples() {
        assert_eq!(cost(&[1.0], &[1.0]), 0.0);
        assert_eq!(cost(&[1.0], &[0.0]), 1.0);
    }

    #[test]
    fn sums_without_averaging() {
        assert_eq!(cost(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]), 14.0);
    }

    #[test]
    fn identical_vectors_cost_nothing() {
        let v = [0.3, -7.5, 1e6, 0.0];
        assert_eq!(cost(&v, &v), 0.0);
    }

    #[test]
    fn symmetric_and_non_negative() {
        let a = [0.1, -0.4, 2.5];
        let b = [1.0, 0.6, -3.0];
        assert_eq!(cost(&a, &b), cost(&b, &a));
        assert!(cost(&a, &b) >= 0.0);
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_panic() {
        cost(&[1.0, 2.0], &[1.0]);
    }
}
