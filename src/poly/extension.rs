//! Multilinear extensions of matrices and vectors.
//!
//! An `R x C` matrix `M` is lifted to the polynomial
//!
//! ```text
//!     M~(X, Y) = \sum_{i < R, j < C} M[i][j] eq(X, bits(i)) eq(Y, bits(j))
//! ```
//!
//! over `⌈log2 R⌉` row variables `X` and `⌈log2 C⌉` column variables `Y`. At the
//! boolean point `(bits(i), bits(j))` it takes the value `M[i][j]`; at padded points
//! outside the matrix no term contributes, so it is zero there.

use p3_field::Field;
use p3_matrix::{Matrix, dense::RowMajorMatrix};
use p3_maybe_rayon::prelude::*;
use p3_util::log2_ceil_usize;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    eq::eq_indicator,
    hypercube::fits_in_bits,
    ring::{PolynomialRing, Variable},
    sparse::MultilinearPolynomial,
};
use crate::{
    constant::PARALLEL_BASIS_THRESHOLD,
    errors::{MleError, Result},
};

/// The multilinear extension of a matrix together with its variable partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixExtension<F> {
    poly: MultilinearPolynomial<F>,
    row_vars: Vec<Variable>,
    col_vars: Vec<Variable>,
}

impl<F: Field> MatrixExtension<F> {
    /// The extension polynomial.
    pub const fn poly(&self) -> &MultilinearPolynomial<F> {
        &self.poly
    }

    /// Consumes the extension, keeping only the polynomial.
    pub fn into_poly(self) -> MultilinearPolynomial<F> {
        self.poly
    }

    /// The ring of the extension, to be passed to further calls that must share it.
    #[must_use]
    pub const fn ring(&self) -> &PolynomialRing {
        self.poly.ring()
    }

    /// Variables indexing the rows (little-endian).
    #[must_use]
    pub fn row_vars(&self) -> &[Variable] {
        &self.row_vars
    }

    /// Variables indexing the columns (little-endian).
    #[must_use]
    pub fn col_vars(&self) -> &[Variable] {
        &self.col_vars
    }
}

/// Splits the generators of `ring` into `⌈log2 rows⌉` row variables followed by
/// `⌈log2 cols⌉` column variables.
///
/// The ring must have exactly that many generators.
pub fn partition_variables(
    ring: &PolynomialRing,
    rows: usize,
    cols: usize,
) -> Result<(Vec<Variable>, Vec<Variable>)> {
    if rows == 0 || cols == 0 {
        return Err(MleError::EmptyMatrix);
    }
    let row_bits = log2_ceil_usize(rows);
    let col_bits = log2_ceil_usize(cols);
    if ring.num_variables() != row_bits + col_bits {
        return Err(MleError::DimensionMismatch {
            context: "ring generators for matrix extension",
            expected: row_bits + col_bits,
            actual: ring.num_variables(),
        });
    }

    let mut gens = ring.gens();
    let col_vars = gens.split_off(row_bits);
    Ok((gens, col_vars))
}

/// Computes the multilinear extension of `matrix` in `ring`.
///
/// The ring is an explicit argument so that several matrices (e.g. the `A`, `B`, `C`
/// of an R1CS instance) can be extended into one common ring; use
/// [`PolynomialRing::for_matrix`] to create it. The same matrix and an equal ring
/// always produce the same polynomial.
#[instrument(skip_all, fields(cols = matrix.width()), level = "debug")]
pub fn multilinearize_matrix<F: Field>(
    matrix: &RowMajorMatrix<F>,
    ring: &PolynomialRing,
) -> Result<MatrixExtension<F>> {
    let cols = matrix.width();
    if cols == 0 {
        return Err(MleError::EmptyMatrix);
    }
    let rows = matrix.height();
    let (row_vars, col_vars) = partition_variables(ring, rows, cols)?;

    let row_basis = lagrange_basis(ring, rows, &row_vars)?;
    let col_basis = lagrange_basis(ring, cols, &col_vars)?;

    // Group by row: M~ = \sum_i eq(X, i) * (\sum_j M[i][j] eq(Y, j)).
    // Row and column variables are disjoint, so every product is multilinear.
    let row_terms = matrix
        .values
        .par_chunks_exact(cols)
        .zip(row_basis.par_iter())
        .map(|(row, row_eq)| {
            let mut combination = MultilinearPolynomial::zero(ring.clone());
            for (&entry, col_eq) in row.iter().zip(&col_basis) {
                if entry != F::ZERO {
                    combination.add_assign_scaled(col_eq, entry);
                }
            }
            row_eq.try_mul(&combination)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut poly = MultilinearPolynomial::zero(ring.clone());
    for term in &row_terms {
        poly.add_assign_scaled(term, F::ONE);
    }
    debug!(num_terms = poly.num_terms(), "matrix extension built");

    Ok(MatrixExtension {
        poly,
        row_vars,
        col_vars,
    })
}

/// Computes `\sum_i vec[i] eq(variables, i)`, the multilinear extension of `vec` over
/// `variables`.
///
/// Requires `vec.len() <= 2^variables.len()`. Points past the end of the vector take
/// the value zero.
#[instrument(skip_all, fields(len = vec.len(), num_variables = variables.len()), level = "debug")]
pub fn multilinearize_vector<F: Field>(
    vec: &[F],
    ring: &PolynomialRing,
    variables: &[Variable],
) -> Result<MultilinearPolynomial<F>> {
    if !fits_in_bits(vec.len().saturating_sub(1), variables.len()) {
        return Err(MleError::VectorTooLong {
            len: vec.len(),
            num_variables: variables.len(),
        });
    }

    let basis = lagrange_basis(ring, vec.len(), variables)?;
    let mut poly = MultilinearPolynomial::zero(ring.clone());
    for (&value, eq) in vec.iter().zip(&basis) {
        if value != F::ZERO {
            poly.add_assign_scaled(eq, value);
        }
    }
    Ok(poly)
}

/// Lagrange indicators `eq(variables, i)` for `i < count`.
fn lagrange_basis<F: Field>(
    ring: &PolynomialRing,
    count: usize,
    variables: &[Variable],
) -> Result<Vec<MultilinearPolynomial<F>>> {
    if count < PARALLEL_BASIS_THRESHOLD {
        (0..count)
            .map(|i| eq_indicator(ring, i, Some(variables)))
            .collect()
    } else {
        (0..count)
            .into_par_iter()
            .map(|i| eq_indicator(ring, i, Some(variables)))
            .collect()
    }
}
