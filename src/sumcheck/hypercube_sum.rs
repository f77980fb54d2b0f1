//! Partial summation of a multilinear polynomial over a hypercube.
//!
//! Given `f(x_0, ..., x_{n-1})`, a set `S` of variables to keep and a domain `H`
//! (`{0, 1}` by default), the reducer computes
//!
//! ```text
//!     g(x_S) = \sum_{x_i ∈ H, i ∉ S} f(x_0, ..., x_{n-1})
//! ```
//!
//! by eliminating one variable at a time. This is the core of a sum-check round: the
//! already challenged (or currently sent) variables are kept, the rest are summed out.

use std::collections::BTreeSet;

use p3_field::Field;
use tracing::{instrument, trace};

use crate::{
    errors::Result,
    poly::{
        ring::Variable,
        sparse::{Monomial, MultilinearPolynomial},
    },
};

/// Configuration for a hypercube summation.
///
/// The default keeps no variable and sums over the boolean domain `{0, 1}`. Every
/// instance owns its skip set, so defaults are never shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypercubeSum<F> {
    skip: BTreeSet<Variable>,
    domain: Vec<F>,
}

impl<F: Field> Default for HypercubeSum<F> {
    fn default() -> Self {
        Self {
            skip: BTreeSet::new(),
            domain: vec![F::ZERO, F::ONE],
        }
    }
}

impl<F: Field> HypercubeSum<F> {
    /// Boolean hypercube, nothing skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves `vars` unbound in the result.
    #[must_use]
    pub fn skip<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = Variable>,
    {
        self.skip.extend(vars);
        self
    }

    /// Sums over `domain` instead of `{0, 1}`.
    ///
    /// An empty domain makes every summed variable contribute the empty sum, so the
    /// result is zero as soon as one variable is summed out.
    #[must_use]
    pub fn with_domain(mut self, domain: Vec<F>) -> Self {
        self.domain = domain;
        self
    }

    /// Variables kept in the result.
    #[must_use]
    pub const fn skipped(&self) -> &BTreeSet<Variable> {
        &self.skip
    }

    /// Summation domain.
    #[must_use]
    pub fn domain(&self) -> &[F] {
        &self.domain
    }

    /// Applies the summation to `poly`.
    ///
    /// Every generator of the ring that is not skipped is eliminated, in ascending order,
    /// including generators the polynomial does not depend on (those scale the result by
    /// the domain size). The result lives in the same ring and only mentions skipped
    /// variables. Use [`MultilinearPolynomial::as_constant`] when nothing was skipped.
    #[instrument(skip_all, fields(
        num_terms = poly.num_terms(),
        skipped = self.skip.len(),
        domain = self.domain.len(),
    ), level = "debug")]
    pub fn apply(&self, poly: &MultilinearPolynomial<F>) -> Result<MultilinearPolynomial<F>> {
        let ring = poly.ring();
        for &var in &self.skip {
            ring.check_variable(var)?;
        }

        let mut acc = poly.clone();
        for var in ring.gens() {
            if self.skip.contains(&var) {
                continue;
            }

            let mut round = MultilinearPolynomial::zero(ring.clone());
            for &h in &self.domain {
                round.add_assign_scaled(&acc.partial_evaluate(var, h)?, F::ONE);
            }
            trace!(variable = var.index(), num_terms = round.num_terms(), "variable summed out");
            acc = round;
        }

        Ok(acc)
    }
}

/// Sums `poly` over `hypercube_values` for every variable not in `skip_variables`.
///
/// Shorthand for
/// `HypercubeSum::new().skip(skip_variables).with_domain(hypercube_values).apply(poly)`.
pub fn hypercube_sum<F: Field>(
    poly: &MultilinearPolynomial<F>,
    skip_variables: &[Variable],
    hypercube_values: &[F],
) -> Result<MultilinearPolynomial<F>> {
    HypercubeSum::new()
        .skip(skip_variables.iter().copied())
        .with_domain(hypercube_values.to_vec())
        .apply(poly)
}

/// Sums `poly` over the full boolean hypercube of its ring.
pub fn boolean_hypercube_sum<F: Field>(poly: &MultilinearPolynomial<F>) -> Result<F> {
    let reduced = HypercubeSum::new().apply(poly)?;
    debug_assert!(reduced.as_constant().is_some());
    Ok(reduced.coefficient(Monomial::ONE))
}
