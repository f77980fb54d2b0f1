use std::collections::BTreeSet;

use p3_util::log2_ceil_usize;
use serde::{Deserialize, Serialize};

use crate::{
    constant::MAX_RING_VARIABLES,
    errors::{MleError, Result},
};

/// A generator of a [`PolynomialRing`], identified by its position.
///
/// Variable `i` always binds bit `i` of a little-endian hypercube index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Position of the generator in its ring.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Bit of a monomial mask occupied by this variable.
    #[inline]
    pub(crate) const fn mask(self) -> u64 {
        1 << self.0
    }
}

/// An ordered set of named generators over which multilinear polynomials are built.
///
/// The coefficient field is the type parameter of the polynomial, so a ring only
/// carries the generator names. Two rings are equal iff they list the same names in
/// the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolynomialRing {
    names: Vec<String>,
}

impl PolynomialRing {
    /// Creates a ring with the given generator names.
    ///
    /// Names must be distinct and there can be at most [`MAX_RING_VARIABLES`] of them.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() > MAX_RING_VARIABLES {
            return Err(MleError::TooManyVariables {
                requested: names.len(),
                max: MAX_RING_VARIABLES,
            });
        }

        let mut seen = BTreeSet::new();
        for (i, name) in names.iter().enumerate() {
            if !seen.insert(name.as_str()) {
                return Err(MleError::DuplicateVariable(i));
            }
        }

        Ok(Self { names })
    }

    /// Ring with `row_bits` generators `X0, X1, ...` followed by `col_bits`
    /// generators `Y0, Y1, ...`.
    pub fn with_row_and_col_bits(row_bits: usize, col_bits: usize) -> Result<Self> {
        let rows = (0..row_bits).map(|i| format!("X{i}"));
        let cols = (0..col_bits).map(|j| format!("Y{j}"));
        Self::new(rows.chain(cols))
    }

    /// Fresh ring sized for the extension of a `rows x cols` matrix.
    ///
    /// Uses `⌈log2 rows⌉` row generators and `⌈log2 cols⌉` column generators.
    pub fn for_matrix(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MleError::EmptyMatrix);
        }
        Self::with_row_and_col_bits(log2_ceil_usize(rows), log2_ceil_usize(cols))
    }

    /// Returns the number of generators.
    #[must_use]
    #[inline]
    pub const fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// All generators in order.
    #[must_use]
    pub fn gens(&self) -> Vec<Variable> {
        (0..self.num_variables()).map(Variable).collect()
    }

    /// Generator at position `index`.
    pub fn var(&self, index: usize) -> Result<Variable> {
        self.check_variable(Variable(index))?;
        Ok(Variable(index))
    }

    /// Looks a generator up by name.
    #[must_use]
    pub fn var_by_name(&self, name: &str) -> Option<Variable> {
        self.names.iter().position(|n| n == name).map(Variable)
    }

    /// Name of a generator.
    #[must_use]
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var.0).map(String::as_str)
    }

    pub(crate) const fn check_variable(&self, var: Variable) -> Result<()> {
        if var.0 < self.num_variables() {
            Ok(())
        } else {
            Err(MleError::UnknownVariable {
                index: var.0,
                num_variables: self.num_variables(),
            })
        }
    }

    /// Checks that `vars` are distinct generators of this ring and returns their
    /// combined monomial mask.
    pub(crate) fn check_distinct(&self, vars: &[Variable]) -> Result<u64> {
        let mut mask = 0u64;
        for &var in vars {
            self.check_variable(var)?;
            if mask & var.mask() != 0 {
                return Err(MleError::DuplicateVariable(var.0));
            }
            mask |= var.mask();
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_matrix_uses_ceil_log2() {
        // 5 rows -> 3 bits, 3 cols -> 2 bits
        let ring = PolynomialRing::for_matrix(5, 3).unwrap();
        assert_eq!(ring.num_variables(), 5);
        assert_eq!(ring.name(Variable(0)), Some("X0"));
        assert_eq!(ring.name(Variable(2)), Some("X2"));
        assert_eq!(ring.name(Variable(3)), Some("Y0"));
        assert_eq!(ring.name(Variable(4)), Some("Y1"));

        // Powers of two need no padding bit.
        assert_eq!(PolynomialRing::for_matrix(4, 8).unwrap().num_variables(), 5);
        // A single row or column needs no variable at all.
        assert_eq!(PolynomialRing::for_matrix(1, 1).unwrap().num_variables(), 0);
    }

    #[test]
    fn test_for_matrix_rejects_empty_shapes() {
        assert_eq!(PolynomialRing::for_matrix(0, 3), Err(MleError::EmptyMatrix));
        assert_eq!(PolynomialRing::for_matrix(3, 0), Err(MleError::EmptyMatrix));
    }

    #[test]
    fn test_rings_compare_by_names() {
        let r1 = PolynomialRing::new(["a", "b"]).unwrap();
        let r2 = PolynomialRing::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        let r3 = PolynomialRing::new(["b", "a"]).unwrap();

        assert_eq!(r1, r2);
        assert_ne!(r1, r3);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert_eq!(
            PolynomialRing::new(["x", "y", "x"]),
            Err(MleError::DuplicateVariable(2))
        );
    }

    #[test]
    fn test_too_many_variables_rejected() {
        let names = (0..=MAX_RING_VARIABLES).map(|i| format!("z{i}"));
        assert_eq!(
            PolynomialRing::new(names),
            Err(MleError::TooManyVariables {
                requested: MAX_RING_VARIABLES + 1,
                max: MAX_RING_VARIABLES,
            })
        );
    }

    #[test]
    fn test_variable_lookup() {
        let ring = PolynomialRing::new(["x", "y", "z"]).unwrap();

        assert_eq!(ring.var_by_name("y"), Some(Variable(1)));
        assert_eq!(ring.var_by_name("w"), None);
        assert_eq!(ring.var(2).unwrap().index(), 2);
        assert_eq!(
            ring.var(3),
            Err(MleError::UnknownVariable {
                index: 3,
                num_variables: 3
            })
        );
        assert_eq!(ring.gens(), vec![Variable(0), Variable(1), Variable(2)]);
    }

    #[test]
    fn test_check_distinct() {
        let ring = PolynomialRing::new(["x", "y", "z"]).unwrap();

        assert_eq!(ring.check_distinct(&[Variable(0), Variable(2)]).unwrap(), 0b101);
        assert_eq!(
            ring.check_distinct(&[Variable(1), Variable(1)]),
            Err(MleError::DuplicateVariable(1))
        );
    }
}
