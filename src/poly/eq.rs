//! The equality polynomial and the Lagrange basis of the boolean hypercube.
//!
//! ```text
//!     eq(x, y) = \prod_i (x_i y_i + (1 - x_i)(1 - y_i))
//! ```
//!
//! For fixed `y ∈ {0,1}^n`, `eq(·, y)` is the multilinear polynomial that is 1 at `y`
//! and 0 at every other point of `{0,1}^n`. Every multilinear extension in this crate
//! is a linear combination of these indicators.

use p3_field::{Field, PrimeCharacteristicRing};

use super::{
    hypercube::{bits_le, fits_in_bits},
    ring::{PolynomialRing, Variable},
    sparse::{Monomial, MultilinearPolynomial},
};
use crate::errors::{MleError, Result};

/// Computes `eq(xs, ys)` for field-valued inputs.
///
/// The empty product is `1`.
pub fn eq_poly<F: Field>(xs: &[F], ys: &[F]) -> Result<F> {
    if xs.len() != ys.len() {
        return Err(MleError::DimensionMismatch {
            context: "eq_poly inputs",
            expected: xs.len(),
            actual: ys.len(),
        });
    }

    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| x * y + (F::ONE - x) * (F::ONE - y))
        .product())
}

/// Computes `eq(X, ys)` as a polynomial in the symbolic variables `X = variables`.
///
/// The `ys` can be arbitrary field elements, e.g. verifier challenges. Each factor
/// is rewritten as `X_i (2 y_i - 1) + (1 - y_i)`; since the variables are distinct,
/// the product stays multilinear.
pub fn eq_poly_in_ring<F: Field>(
    ring: &PolynomialRing,
    variables: &[Variable],
    ys: &[F],
) -> Result<MultilinearPolynomial<F>> {
    if variables.len() != ys.len() {
        return Err(MleError::DimensionMismatch {
            context: "eq_poly variables",
            expected: variables.len(),
            actual: ys.len(),
        });
    }
    ring.check_distinct(variables)?;

    // Expand the product one factor at a time, each step at most doubling the terms.
    let mut terms = vec![(Monomial::ONE, F::ONE)];
    for (&var, &y) in variables.iter().zip(ys) {
        let with_var = y.double() - F::ONE;
        let without_var = F::ONE - y;
        terms = terms
            .into_iter()
            .flat_map(|(m, c)| {
                [
                    (m, c * without_var),
                    (Monomial(m.0 | var.mask()), c * with_var),
                ]
            })
            .filter(|&(_, c)| c != F::ZERO)
            .collect();
    }

    MultilinearPolynomial::from_terms(ring.clone(), terms)
}

/// Lagrange basis polynomial of the hypercube over `variables` at `index`.
///
/// With `variables` defaulting to every generator of `ring`, the result evaluates to 1
/// at the point `bits_le(index, N)` (variable `i` bound to bit `i`) and to 0 at every
/// other point of `{0,1}^N`.
///
/// Fails with [`MleError::IndexOutOfRange`] if `index >= 2^N`.
pub fn eq_indicator<F: Field>(
    ring: &PolynomialRing,
    index: usize,
    variables: Option<&[Variable]>,
) -> Result<MultilinearPolynomial<F>> {
    let gens;
    let variables = match variables {
        Some(vars) => vars,
        None => {
            gens = ring.gens();
            &gens
        }
    };

    let num_variables = variables.len();
    if !fits_in_bits(index, num_variables) {
        return Err(MleError::IndexOutOfRange {
            index,
            num_variables,
        });
    }

    let bits: Vec<F> = bits_le(index, num_variables)
        .into_iter()
        .map(F::from_bool)
        .collect();
    eq_poly_in_ring(ring, variables, &bits)
}
