use p3_field::Field;
use p3_matrix::{Matrix, dense::RowMajorMatrix};
use p3_maybe_rayon::prelude::*;

use crate::errors::{MleError, Result};

/// Entry-wise product `v1 ⊙ v2`.
pub fn hadamard_product<F: Field>(v1: &[F], v2: &[F]) -> Result<Vec<F>> {
    if v1.len() != v2.len() {
        return Err(MleError::DimensionMismatch {
            context: "hadamard product operands",
            expected: v1.len(),
            actual: v2.len(),
        });
    }
    Ok(v1.iter().zip(v2).map(|(&a, &b)| a * b).collect())
}

/// Computes `M · v` for an `R x C` matrix and a vector of length `C`.
///
/// Rows are processed in parallel when the `parallel` feature is enabled.
pub fn matrix_vector_product<F: Field>(matrix: &RowMajorMatrix<F>, v: &[F]) -> Result<Vec<F>> {
    let width = matrix.width();
    if width != v.len() {
        return Err(MleError::DimensionMismatch {
            context: "matrix-vector product",
            expected: width,
            actual: v.len(),
        });
    }
    if width == 0 {
        return Err(MleError::EmptyMatrix);
    }

    Ok(matrix
        .values
        .par_chunks_exact(width)
        .map(|row| row.iter().zip(v).map(|(&m, &x)| m * x).sum::<F>())
        .collect())
}
