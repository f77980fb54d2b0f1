//! Rank-1 constraint systems together with the multilinear extensions of their
//! matrices and witness.
//!
//! An instance `(A, B, C, w)` with `R` constraints over `C` columns is satisfied when
//!
//! ```text
//!     (A · w) ⊙ (B · w) = C · w
//! ```
//!
//! All three matrices are extended into one common ring whose first `⌈log2 R⌉`
//! generators index constraints (`x`) and whose last `⌈log2 C⌉` generators index
//! columns (`y`). The witness is extended over the `y` variables of the same ring.

use itertools::{Itertools, izip};
use p3_field::Field;
use p3_matrix::{Matrix, dense::RowMajorMatrix};
use tracing::{debug, instrument, warn};

use crate::{
    errors::{MleError, Result},
    poly::{
        extension::{MatrixExtension, multilinearize_matrix, multilinearize_vector},
        ring::{PolynomialRing, Variable},
        sparse::MultilinearPolynomial,
    },
    utils::{hadamard_product, matrix_vector_product},
};

#[cfg(test)]
pub(crate) mod random;

/// A satisfied R1CS instance with cached multilinear extensions.
///
/// Construction fails unless the instance is well formed and satisfied, so every
/// value of this type is a valid instance. It is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct R1cs<F> {
    a: RowMajorMatrix<F>,
    b: RowMajorMatrix<F>,
    c: RowMajorMatrix<F>,
    witness: Vec<F>,
    a_tilde: MatrixExtension<F>,
    b_tilde: MatrixExtension<F>,
    c_tilde: MatrixExtension<F>,
    w_tilde: MultilinearPolynomial<F>,
}

impl<F: Field> R1cs<F> {
    /// Validates `(a, b, c, witness)` and builds the extensions.
    ///
    /// # Errors
    /// - [`MleError::EmptyMatrix`] if `a` has no row or no column.
    /// - [`MleError::DimensionMismatch`] if `b` or `c` differ in shape from `a`, or if
    ///   the witness length differs from the number of columns.
    /// - [`MleError::UnsatisfiableInstance`] for the first constraint that fails.
    #[instrument(skip_all, fields(rows = a.height(), cols = a.width()), level = "debug")]
    pub fn new(
        a: RowMajorMatrix<F>,
        b: RowMajorMatrix<F>,
        c: RowMajorMatrix<F>,
        witness: Vec<F>,
    ) -> Result<Self> {
        check_shapes(&a, &b, &c, &witness)?;

        if let Some(row) = first_unsatisfied_row(&a, &b, &c, &witness)? {
            warn!(row, "R1CS constraint not satisfied");
            return Err(MleError::UnsatisfiableInstance { row });
        }

        let ring = PolynomialRing::for_matrix(a.height(), a.width())?;
        let a_tilde = multilinearize_matrix(&a, &ring)?;
        let b_tilde = multilinearize_matrix(&b, &ring)?;
        let c_tilde = multilinearize_matrix(&c, &ring)?;
        let w_tilde = multilinearize_vector(&witness, &ring, a_tilde.col_vars())?;
        debug!(
            num_variables = ring.num_variables(),
            a_terms = a_tilde.poly().num_terms(),
            b_terms = b_tilde.poly().num_terms(),
            c_terms = c_tilde.poly().num_terms(),
            w_terms = w_tilde.num_terms(),
            "R1CS extensions built"
        );

        Ok(Self {
            a,
            b,
            c,
            witness,
            a_tilde,
            b_tilde,
            c_tilde,
            w_tilde,
        })
    }

    /// Recomputes `(A · w) ⊙ (B · w) = C · w`.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        matches!(
            first_unsatisfied_row(&self.a, &self.b, &self.c, &self.witness),
            Ok(None)
        )
    }

    /// Number of constraints `R`.
    #[must_use]
    pub fn num_constraints(&self) -> usize {
        self.a.height()
    }

    /// Number of columns `C`, i.e. the witness length.
    #[must_use]
    pub const fn num_columns(&self) -> usize {
        self.witness.len()
    }

    #[must_use]
    pub const fn a(&self) -> &RowMajorMatrix<F> {
        &self.a
    }

    #[must_use]
    pub const fn b(&self) -> &RowMajorMatrix<F> {
        &self.b
    }

    #[must_use]
    pub const fn c(&self) -> &RowMajorMatrix<F> {
        &self.c
    }

    #[must_use]
    pub fn witness(&self) -> &[F] {
        &self.witness
    }

    /// `Ã(x, y)`.
    pub const fn a_tilde(&self) -> &MultilinearPolynomial<F> {
        self.a_tilde.poly()
    }

    /// `B̃(x, y)`.
    pub const fn b_tilde(&self) -> &MultilinearPolynomial<F> {
        self.b_tilde.poly()
    }

    /// `C̃(x, y)`.
    pub const fn c_tilde(&self) -> &MultilinearPolynomial<F> {
        self.c_tilde.poly()
    }

    /// `w̃(y)`, in the same ring as the matrix extensions.
    pub const fn w_tilde(&self) -> &MultilinearPolynomial<F> {
        &self.w_tilde
    }

    /// The ring shared by all four extensions.
    #[must_use]
    pub const fn ring(&self) -> &PolynomialRing {
        self.a_tilde.ring()
    }

    /// Constraint (row) variables.
    #[must_use]
    pub fn x_vars(&self) -> &[Variable] {
        self.a_tilde.row_vars()
    }

    /// Column variables.
    #[must_use]
    pub fn y_vars(&self) -> &[Variable] {
        self.a_tilde.col_vars()
    }
}

fn check_shapes<F: Field>(
    a: &RowMajorMatrix<F>,
    b: &RowMajorMatrix<F>,
    c: &RowMajorMatrix<F>,
    witness: &[F],
) -> Result<()> {
    if a.width() == 0 || a.height() == 0 {
        return Err(MleError::EmptyMatrix);
    }

    let widths = [a.width(), b.width(), c.width()];
    if !widths.iter().all_equal() {
        let actual = widths.into_iter().find(|&w| w != a.width()).unwrap_or_default();
        return Err(MleError::DimensionMismatch {
            context: "R1CS matrix columns",
            expected: a.width(),
            actual,
        });
    }

    let heights = [a.height(), b.height(), c.height()];
    if !heights.iter().all_equal() {
        let actual = heights.into_iter().find(|&h| h != a.height()).unwrap_or_default();
        return Err(MleError::DimensionMismatch {
            context: "R1CS matrix rows",
            expected: a.height(),
            actual,
        });
    }

    if witness.len() != a.width() {
        return Err(MleError::DimensionMismatch {
            context: "R1CS witness length",
            expected: a.width(),
            actual: witness.len(),
        });
    }

    Ok(())
}

/// Index of the first constraint with `(A w)_i (B w)_i != (C w)_i`, if any.
fn first_unsatisfied_row<F: Field>(
    a: &RowMajorMatrix<F>,
    b: &RowMajorMatrix<F>,
    c: &RowMajorMatrix<F>,
    witness: &[F],
) -> Result<Option<usize>> {
    let az = matrix_vector_product(a, witness)?;
    let bz = matrix_vector_product(b, witness)?;
    let cz = matrix_vector_product(c, witness)?;
    let ab = hadamard_product(&az, &bz)?;

    Ok(izip!(&ab, &cz).position(|(lhs, rhs)| lhs != rhs))
}
