use p3_field::{Field, PrimeCharacteristicRing};
use serde::{Deserialize, Serialize};

use super::{hypercube::BinaryHypercubePoint, multilinear::MultilinearPoint};
use crate::errors::{MleError, Result};

/// Represents a multilinear polynomial `f` in `n` variables, stored by its evaluations
/// over the boolean hypercube `{0,1}^n`.
///
/// Entry `b` of the inner vector is `f(bits_le(b, n))`: bit `i` of the index is the value
/// of variable `i`. The number of variables `n` is inferred from the length of this
/// vector, where `self.len() = 2^n`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct EvaluationsList<F>(pub(crate) Vec<F>);

impl<F> EvaluationsList<F>
where
    F: Field,
{
    /// Constructs an `EvaluationsList` from a vector of evaluations.
    ///
    /// # Panics
    /// Panics if `evals.len()` is not a power of two.
    #[inline]
    pub const fn new(evals: Vec<F>) -> Self {
        assert!(
            evals.len().is_power_of_two(),
            "Evaluation list length must be a power of two."
        );

        Self(evals)
    }

    /// Pads `values` with zeros up to the next power of two.
    pub fn from_padded(mut values: Vec<F>) -> Self {
        let len = values.len().max(1).next_power_of_two();
        values.resize(len, F::ZERO);
        Self(values)
    }

    /// Given a number of variables initializes a new zero polynomial
    pub fn zero(num_variables: usize) -> Self {
        Self(F::zero_vec(1 << num_variables))
    }

    /// Returns the total number of stored evaluations.
    #[must_use]
    #[inline]
    pub const fn num_evals(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of variables in the multilinear polynomial.
    #[must_use]
    #[inline]
    pub const fn num_variables(&self) -> usize {
        // Safety: The length is guaranteed to be a power of two.
        self.0.len().ilog2() as usize
    }

    #[must_use]
    pub fn as_slice(&self) -> &[F] {
        &self.0
    }

    /// Value at a hypercube point.
    #[must_use]
    pub fn get(&self, point: BinaryHypercubePoint) -> Option<F> {
        self.0.get(point.0).copied()
    }

    /// Evaluates the polynomial as a constant.
    /// This is only valid for constant polynomials (i.e., when `num_variables` is 0).
    ///
    /// Returns None in other cases.
    #[must_use]
    #[inline]
    pub fn as_constant(&self) -> Option<F> {
        (self.num_evals() == 1).then_some(self.0[0])
    }

    /// Sum of the polynomial over the whole hypercube.
    #[must_use]
    pub fn sum(&self) -> F {
        self.0.iter().copied().sum()
    }

    /// Evaluates the multilinear polynomial at `point ∈ F^n`.
    ///
    /// Folds one variable at a time, starting from variable 0 which pairs up adjacent
    /// entries:
    ///
    /// ```text
    ///     f(r, x_1, ..., x_{n-1}) = f(0, x_1, ...) + r * (f(1, x_1, ...) - f(0, x_1, ...))
    /// ```
    pub fn evaluate(&self, point: &MultilinearPoint<F>) -> Result<F> {
        if point.num_variables() != self.num_variables() {
            return Err(MleError::DimensionMismatch {
                context: "evaluation point",
                expected: self.num_variables(),
                actual: point.num_variables(),
            });
        }

        let mut current = self.0.clone();
        for &r in point.as_slice() {
            current = current
                .chunks_exact(2)
                .map(|pair| pair[0] + r * (pair[1] - pair[0]))
                .collect();
        }
        Ok(current[0])
    }
}

#[cfg(test)]
mod tests {
    use p3_baby_bear::BabyBear;
    use proptest::prelude::*;

    use super::*;
    use crate::poly::hypercube::BinaryHypercube;

    type F = BabyBear;

    #[test]
    fn test_new_evaluations_list() {
        let evals = vec![F::ZERO, F::ONE, F::ZERO, F::ONE];
        let evaluations_list = EvaluationsList::new(evals.clone());

        assert_eq!(evaluations_list.num_evals(), evals.len());
        assert_eq!(evaluations_list.num_variables(), 2);
        assert_eq!(evaluations_list.as_slice(), &evals);
    }

    #[test]
    #[should_panic]
    fn test_new_evaluations_list_invalid_length() {
        // Length is not a power of two, should panic
        let _ = EvaluationsList::new(vec![F::ONE, F::ZERO, F::ONE]);
    }

    #[test]
    fn test_from_padded() {
        let list = EvaluationsList::from_padded(vec![F::ONE, F::TWO, F::ONE]);
        assert_eq!(list.as_slice(), &[F::ONE, F::TWO, F::ONE, F::ZERO]);

        let empty = EvaluationsList::<F>::from_padded(vec![]);
        assert_eq!(empty.as_constant(), Some(F::ZERO));
    }

    #[test]
    fn test_evaluate_on_hypercube() {
        let evals: Vec<_> = (0..8).map(F::from_u64).collect();
        let list = EvaluationsList::new(evals.clone());

        for b in BinaryHypercube::new(3) {
            let point = MultilinearPoint::from_binary_hypercube_point(b, 3);
            assert_eq!(list.evaluate(&point).unwrap(), evals[*b]);
            assert_eq!(list.get(b), Some(evals[*b]));
        }
    }

    #[test]
    fn test_evaluate_outside_hypercube() {
        // f(x0, x1) with table [a, b, c, d] at indices 0b00, 0b01, 0b10, 0b11
        let a = F::from_u64(3);
        let b = F::from_u64(5);
        let c = F::from_u64(7);
        let d = F::from_u64(11);
        let list = EvaluationsList::new(vec![a, b, c, d]);

        let x0 = F::from_u64(2);
        let x1 = F::from_u64(9);
        let expected = a * (F::ONE - x0) * (F::ONE - x1)
            + b * x0 * (F::ONE - x1)
            + c * (F::ONE - x0) * x1
            + d * x0 * x1;

        assert_eq!(list.evaluate(&MultilinearPoint(vec![x0, x1])).unwrap(), expected);
    }

    #[test]
    fn test_evaluate_dimension_mismatch() {
        let list = EvaluationsList::new(vec![F::ONE, F::ZERO]);
        assert!(list.evaluate(&MultilinearPoint(vec![])).is_err());
    }

    #[test]
    fn test_zero_and_sum() {
        let zero = EvaluationsList::<F>::zero(3);
        assert_eq!(zero.num_evals(), 8);
        assert_eq!(zero.sum(), F::ZERO);

        let list = EvaluationsList::new(vec![F::ONE, F::TWO, F::ONE, F::TWO]);
        assert_eq!(list.sum(), F::from_u64(6));
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_linear_in_each_variable(
            values in prop::collection::vec(0u64..1_000_000, 8),
            r in 0u64..1_000_000,
        ) {
            let list = EvaluationsList::new(values.into_iter().map(F::from_u64).collect());
            let r = F::from_u64(r);

            // Along variable 1, with x0 = x2 = 0, f interpolates the entries 0 and 2.
            let point = MultilinearPoint(vec![F::ZERO, r, F::ZERO]);
            let f0 = list.as_slice()[0];
            let f1 = list.as_slice()[2];
            prop_assert_eq!(list.evaluate(&point).unwrap(), f0 + r * (f1 - f0));
        }
    }
}
