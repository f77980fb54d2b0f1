//! Sparse multilinear polynomials over a named polynomial ring.
//!
//! A polynomial is a map from monomials to non-zero coefficients. Since every
//! exponent is 0 or 1, a monomial is just a set of variables, stored as a bitmask:
//!
//! ```text
//!     f(X_0, ..., X_{n-1}) = \sum_{S ⊆ [n]} c_S \prod_{i ∈ S} X_i
//! ```
//!
//! Bit `i` of the mask of `S` marks `X_i`. The same bit convention indexes the
//! boolean hypercube, which is what makes the zeta/Möbius conversions with
//! [`EvaluationsList`] line up.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    ops::{Mul, Neg},
};

use p3_field::{Field, PrimeCharacteristicRing};
use serde::{Deserialize, Serialize};

use super::{
    evals::EvaluationsList,
    hypercube::BinaryHypercubePoint,
    multilinear::MultilinearPoint,
    ring::{PolynomialRing, Variable},
};
use crate::errors::{MleError, Result};

/// A set of distinct variables, i.e. a multilinear monomial.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Monomial(pub(crate) u64);

impl Monomial {
    /// The constant monomial `1`.
    pub const ONE: Self = Self(0);

    /// Monomial consisting of a single variable.
    #[must_use]
    pub const fn from_variable(var: Variable) -> Self {
        Self(var.mask())
    }

    /// Whether `var` divides this monomial.
    #[must_use]
    #[inline]
    pub const fn contains(self, var: Variable) -> bool {
        self.0 & var.mask() != 0
    }

    /// Total degree, i.e. the number of variables.
    #[must_use]
    #[inline]
    pub const fn degree(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Variables of the monomial in ascending order.
    pub fn variables(self) -> impl Iterator<Item = Variable> {
        (0..u64::BITS as usize)
            .filter(move |&i| (self.0 >> i) & 1 == 1)
            .map(Variable)
    }

    #[inline]
    const fn without(self, var: Variable) -> Self {
        Self(self.0 & !var.mask())
    }
}

/// A multilinear polynomial stored as a sparse coefficient map.
///
/// Zero coefficients are never stored, so two polynomials are equal iff they live in
/// the same ring and have the same terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct MultilinearPolynomial<F> {
    ring: PolynomialRing,
    terms: BTreeMap<Monomial, F>,
}

impl<F> MultilinearPolynomial<F>
where
    F: Field,
{
    /// The zero polynomial of `ring`.
    pub const fn zero(ring: PolynomialRing) -> Self {
        Self {
            ring,
            terms: BTreeMap::new(),
        }
    }

    /// The constant polynomial `value`.
    pub fn constant(ring: PolynomialRing, value: F) -> Self {
        let mut poly = Self::zero(ring);
        poly.add_term(Monomial::ONE, value);
        poly
    }

    /// The polynomial `X_var`.
    pub fn variable(ring: PolynomialRing, var: Variable) -> Result<Self> {
        ring.check_variable(var)?;
        let mut poly = Self::zero(ring);
        poly.add_term(Monomial::from_variable(var), F::ONE);
        Ok(poly)
    }

    /// Builds a polynomial from `(monomial, coefficient)` pairs, summing repeated monomials.
    pub fn from_terms<I>(ring: PolynomialRing, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Monomial, F)>,
    {
        let limit = ring_mask(&ring);
        let mut poly = Self::zero(ring);
        for (monomial, coeff) in terms {
            if monomial.0 & !limit != 0 {
                return Err(MleError::UnknownVariable {
                    index: (monomial.0 & !limit).trailing_zeros() as usize,
                    num_variables: poly.ring.num_variables(),
                });
            }
            poly.add_term(monomial, coeff);
        }
        Ok(poly)
    }

    /// The ring this polynomial lives in.
    #[must_use]
    pub const fn ring(&self) -> &PolynomialRing {
        &self.ring
    }

    /// Number of non-zero terms.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `monomial` (zero if absent).
    #[must_use]
    pub fn coefficient(&self, monomial: Monomial) -> F {
        self.terms.get(&monomial).copied().unwrap_or(F::ZERO)
    }

    /// Non-zero terms in ascending monomial order.
    pub fn terms(&self) -> impl Iterator<Item = (Monomial, F)> + '_ {
        self.terms.iter().map(|(&m, &c)| (m, c))
    }

    /// Evaluates the polynomial as a constant.
    ///
    /// Returns `None` if some variable still occurs.
    #[must_use]
    pub fn as_constant(&self) -> Option<F> {
        match self.terms.iter().next_back() {
            None => Some(F::ZERO),
            Some((&m, &c)) if m == Monomial::ONE => Some(c),
            Some(_) => None,
        }
    }

    /// Variables that occur in at least one term, in ascending order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        let support = self.terms.keys().fold(0u64, |acc, m| acc | m.0);
        Monomial(support).variables().collect()
    }

    /// Total degree (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.terms.keys().map(|m| m.degree()).max().unwrap_or(0)
    }

    /// `self + other`.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.check_same_ring(other)?;
        let mut out = self.clone();
        out.add_assign_scaled(other, F::ONE);
        Ok(out)
    }

    /// `self - other`.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.check_same_ring(other)?;
        let mut out = self.clone();
        out.add_assign_scaled(other, F::NEG_ONE);
        Ok(out)
    }

    /// `self * other`, which must stay multilinear.
    ///
    /// Fails with [`MleError::NotMultilinear`] if a pair of non-zero terms shares a
    /// variable, since the product would contain a square.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.check_same_ring(other)?;
        let mut out = Self::zero(self.ring.clone());
        for (&m1, &c1) in &self.terms {
            for (&m2, &c2) in &other.terms {
                if m1.0 & m2.0 != 0 {
                    return Err(MleError::NotMultilinear);
                }
                out.add_term(Monomial(m1.0 | m2.0), c1 * c2);
            }
        }
        Ok(out)
    }

    /// Multiplies every coefficient by `scalar`.
    pub fn scale(&self, scalar: F) -> Self {
        let mut out = Self::zero(self.ring.clone());
        if scalar != F::ZERO {
            out.terms = self.terms.iter().map(|(&m, &c)| (m, c * scalar)).collect();
        }
        out
    }

    /// `self += scalar * other`, assuming both share a ring.
    pub(crate) fn add_assign_scaled(&mut self, other: &Self, scalar: F) {
        debug_assert_eq!(self.ring, other.ring);
        for (&m, &c) in &other.terms {
            self.add_term(m, c * scalar);
        }
    }

    /// Substitutes `value` for `var`, leaving every other variable free.
    pub fn partial_evaluate(&self, var: Variable, value: F) -> Result<Self> {
        self.ring.check_variable(var)?;
        let mut out = Self::zero(self.ring.clone());
        for (&m, &c) in &self.terms {
            if m.contains(var) {
                out.add_term(m.without(var), c * value);
            } else {
                out.add_term(m, c);
            }
        }
        Ok(out)
    }

    /// Substitutes every variable of `assignment` at once.
    ///
    /// The result stays in the same ring; it is constant iff every variable of the
    /// support was assigned.
    pub fn substitute(&self, assignment: &BTreeMap<Variable, F>) -> Result<Self> {
        for &var in assignment.keys() {
            self.ring.check_variable(var)?;
        }
        let mut out = Self::zero(self.ring.clone());
        for (&m, &c) in &self.terms {
            let mut coeff = c;
            let mut rest = m;
            for var in m.variables() {
                if let Some(&value) = assignment.get(&var) {
                    coeff *= value;
                    rest = rest.without(var);
                }
            }
            out.add_term(rest, coeff);
        }
        Ok(out)
    }

    /// Substitutes boolean values, e.g. the output of
    /// [`bits_to_var_assignment`](super::hypercube::bits_to_var_assignment).
    pub fn substitute_bits(&self, assignment: &BTreeMap<Variable, bool>) -> Result<Self> {
        let assignment = assignment
            .iter()
            .map(|(&var, &bit)| (var, F::from_bool(bit)))
            .collect();
        self.substitute(&assignment)
    }

    /// Evaluates at a point of `F^n`, where `n` is the number of generators of the ring.
    pub fn evaluate(&self, point: &MultilinearPoint<F>) -> Result<F> {
        if point.num_variables() != self.ring.num_variables() {
            return Err(MleError::DimensionMismatch {
                context: "evaluation point",
                expected: self.ring.num_variables(),
                actual: point.num_variables(),
            });
        }
        let coords = point.as_slice();
        Ok(self
            .terms
            .iter()
            .map(|(m, &c)| m.variables().fold(c, |acc, var| acc * coords[var.index()]))
            .sum())
    }

    /// Evaluates at a boolean point: variable `i` takes bit `i` of `point`.
    #[must_use]
    pub fn evaluate_at_hypercube(&self, point: BinaryHypercubePoint) -> F {
        // A monomial survives iff all its variables are set in the point.
        self.terms
            .iter()
            .filter(|(m, _)| m.0 & (*point as u64) == m.0)
            .map(|(_, &c)| c)
            .sum()
    }

    /// Values of the polynomial over the full hypercube `{0,1}^n` of its ring.
    ///
    /// This is the zeta transform of the coefficient vector: the value at `b` is the
    /// sum of the coefficients of all monomials contained in `b`.
    pub fn to_evaluations(&self) -> EvaluationsList<F> {
        let n = self.ring.num_variables();
        let mut table = F::zero_vec(1 << n);
        for (&m, &c) in &self.terms {
            table[m.0 as usize] = c;
        }
        for i in 0..n {
            let bit = 1 << i;
            for b in (0..table.len()).filter(|b| b & bit != 0) {
                let lower = table[b ^ bit];
                table[b] += lower;
            }
        }
        EvaluationsList::new(table)
    }

    /// Interpolates the multilinear polynomial over `variables` whose hypercube values
    /// are `evals` (entry `b` sits at the point `bits_le(b, variables.len())`).
    ///
    /// This is the Möbius transform, the inverse of [`Self::to_evaluations`].
    pub fn from_evaluations(
        ring: PolynomialRing,
        variables: &[Variable],
        evals: &EvaluationsList<F>,
    ) -> Result<Self> {
        ring.check_distinct(variables)?;
        if evals.num_variables() != variables.len() {
            return Err(MleError::DimensionMismatch {
                context: "evaluation table variables",
                expected: variables.len(),
                actual: evals.num_variables(),
            });
        }

        let n = variables.len();
        let mut table = evals.as_slice().to_vec();
        for i in 0..n {
            let bit = 1 << i;
            for b in (0..table.len()).filter(|b| b & bit != 0) {
                let lower = table[b ^ bit];
                table[b] -= lower;
            }
        }

        let mut poly = Self::zero(ring);
        for (b, coeff) in table.into_iter().enumerate() {
            let mask = variables
                .iter()
                .enumerate()
                .filter(|&(i, _)| (b >> i) & 1 == 1)
                .fold(0u64, |acc, (_, var)| acc | var.mask());
            poly.add_term(Monomial(mask), coeff);
        }
        Ok(poly)
    }

    /// Adds `coeff * monomial`, dropping the entry if it cancels out.
    pub(crate) fn add_term(&mut self, monomial: Monomial, coeff: F) {
        if coeff == F::ZERO {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(e) => {
                e.insert(coeff);
            }
            Entry::Occupied(mut e) => {
                let sum = *e.get() + coeff;
                if sum == F::ZERO {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
        }
    }

    pub(crate) fn check_same_ring(&self, other: &Self) -> Result<()> {
        if self.ring == other.ring {
            Ok(())
        } else {
            Err(MleError::RingMismatch)
        }
    }
}

/// Mask with one bit per generator of `ring`.
fn ring_mask(ring: &PolynomialRing) -> u64 {
    match ring.num_variables() {
        64 => u64::MAX,
        n => (1u64 << n) - 1,
    }
}

impl<F: Field> Mul<F> for &MultilinearPolynomial<F> {
    type Output = MultilinearPolynomial<F>;

    fn mul(self, rhs: F) -> Self::Output {
        self.scale(rhs)
    }
}

impl<F: Field> Neg for &MultilinearPolynomial<F> {
    type Output = MultilinearPolynomial<F>;

    fn neg(self) -> Self::Output {
        self.scale(F::NEG_ONE)
    }
}
