use p3_field::{Field, PrimeCharacteristicRing};
use serde::{Deserialize, Serialize};

use super::{eq::eq_poly, hypercube::BinaryHypercubePoint};
use crate::errors::Result;

/// Point (x_0,..., x_{n-1}) in F^n for some n. Often, the x_i are binary.
/// For the latter case, we also have `BinaryHypercubePoint`.
///
/// Coordinate `i` binds variable `i` of the ring the point is used with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilinearPoint<F>(pub Vec<F>);

impl<F> MultilinearPoint<F>
where
    F: Field,
{
    /// Wraps a vector of coordinates.
    #[must_use]
    pub const fn new(coords: Vec<F>) -> Self {
        Self(coords)
    }

    /// returns the number of variables.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.0.len()
    }

    /// Coordinates of the point.
    #[must_use]
    pub fn as_slice(&self) -> &[F] {
        &self.0
    }

    /// Creates a MultilinearPoint from a BinaryHypercubePoint; the latter models the same thing,
    /// but is restricted to binary entries.
    ///
    /// Bit `i` of the hypercube point becomes coordinate `i`.
    #[must_use]
    pub fn from_binary_hypercube_point(point: BinaryHypercubePoint, num_variables: usize) -> Self {
        Self(
            (0..num_variables)
                .map(|i| F::from_bool(point.bit(i)))
                .collect(),
        )
    }

    /// Converts to a BinaryHypercubePoint, provided the MultilinearPoint is actually in {0,1}^n.
    #[must_use]
    pub fn to_hypercube(&self) -> Option<BinaryHypercubePoint> {
        self.0
            .iter()
            .rev()
            .try_fold(0, |acc, &coord| {
                if coord == F::ZERO {
                    Some(acc << 1)
                } else if coord == F::ONE {
                    Some((acc << 1) | 1)
                } else {
                    None
                }
            })
            .map(BinaryHypercubePoint)
    }

    /// Compute eq(coords,point), where eq is the equality polynomial, where point is binary.
    ///
    /// Recall that the equality polynomial eq(c, p) is defined as eq(c,p) == \prod_i c_i * p_i +
    /// (1-c_i)*(1-p_i). Note that for fixed p, viewed as a polynomial in c, it is the
    /// interpolation polynomial associated to the evaluation point p in the evaluation set {0,1}^n.
    #[must_use]
    pub fn eq_poly_at_binary(&self, point: BinaryHypercubePoint) -> F {
        assert!(
            self.num_variables() >= usize::BITS as usize || *point < (1 << self.num_variables())
        );

        self.0
            .iter()
            .enumerate()
            .map(|(i, &c)| if point.bit(i) { c } else { F::ONE - c })
            .product()
    }

    /// Compute eq(coords,point), where eq is the equality polynomial and where point is not
    /// neccessarily binary.
    pub fn eq_poly(&self, point: &Self) -> Result<F> {
        eq_poly(&self.0, &point.0)
    }
}

impl<F> From<F> for MultilinearPoint<F> {
    fn from(value: F) -> Self {
        Self(vec![value])
    }
}

#[cfg(test)]
mod tests {
    use p3_baby_bear::BabyBear;

    use super::*;
    use crate::{errors::MleError, poly::hypercube::BinaryHypercube};

    type F = BabyBear;

    #[test]
    fn test_num_variables() {
        let point = MultilinearPoint::<F>(vec![F::ONE, F::ZERO, F::ONE]);
        assert_eq!(point.num_variables(), 3);
    }

    #[test]
    fn test_from_binary_hypercube_point_mixed_bits() {
        // 0b001101 -> (1, 0, 1, 1, 0, 0), variable 0 first
        let ml_point = MultilinearPoint::<F>::from_binary_hypercube_point(
            BinaryHypercubePoint(0b00_1101),
            6,
        );

        let expected = vec![F::ONE, F::ZERO, F::ONE, F::ONE, F::ZERO, F::ZERO];
        assert_eq!(ml_point.0, expected);
    }

    #[test]
    fn test_from_binary_hypercube_point_truncation() {
        // Only the low 3 bits (101) are used.
        let ml_point =
            MultilinearPoint::<F>::from_binary_hypercube_point(BinaryHypercubePoint(0b1_0101), 3);

        assert_eq!(ml_point.0, vec![F::ONE, F::ZERO, F::ONE]);
    }

    #[test]
    fn test_to_hypercube_roundtrip() {
        for point in BinaryHypercube::new(4) {
            let ml_point = MultilinearPoint::<F>::from_binary_hypercube_point(point, 4);
            assert_eq!(ml_point.to_hypercube(), Some(point));
        }
    }

    #[test]
    fn test_to_hypercube_non_binary_values() {
        let point = MultilinearPoint(vec![F::ONE, F::from_u64(2), F::ZERO]);
        assert_eq!(point.to_hypercube(), None);
    }

    #[test]
    fn test_to_hypercube_empty_vector() {
        let point = MultilinearPoint::<F>(vec![]);
        assert_eq!(point.to_hypercube(), Some(BinaryHypercubePoint(0)));
    }

    #[test]
    fn test_eq_poly_at_binary_is_indicator() {
        let n = 3;
        for p in BinaryHypercube::new(n) {
            for q in BinaryHypercube::new(n) {
                let coords = MultilinearPoint::<F>::from_binary_hypercube_point(q, n);
                let expected = if p == q { F::ONE } else { F::ZERO };
                assert_eq!(coords.eq_poly_at_binary(p), expected);
            }
        }
    }

    #[test]
    fn test_eq_poly_at_binary_outside_hypercube() {
        // eq((x0, x1), (1, 0)) = x0 * (1 - x1)
        let x0 = F::from_u64(7);
        let x1 = F::from_u64(11);
        let point = MultilinearPoint(vec![x0, x1]);

        assert_eq!(
            point.eq_poly_at_binary(BinaryHypercubePoint(1)),
            x0 * (F::ONE - x1)
        );
    }

    #[test]
    fn test_eq_poly_matches_binary_variant() {
        let point = MultilinearPoint(vec![F::from_u64(3), F::from_u64(5), F::from_u64(9)]);
        let corner = MultilinearPoint::from_binary_hypercube_point(BinaryHypercubePoint(0b110), 3);

        assert_eq!(
            point.eq_poly(&corner).unwrap(),
            point.eq_poly_at_binary(BinaryHypercubePoint(0b110))
        );
    }

    #[test]
    fn test_eq_poly_dimension_mismatch() {
        let a = MultilinearPoint(vec![F::ONE, F::ZERO]);
        let b = MultilinearPoint(vec![F::ONE]);

        assert!(matches!(
            a.eq_poly(&b),
            Err(MleError::DimensionMismatch { .. })
        ));
    }
}
