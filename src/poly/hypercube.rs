use std::{
    collections::BTreeMap,
    ops::{Deref, Range},
};

use crate::errors::{MleError, Result};

/// Represents a point on the binary hypercube `{0,1}^n`.
///
/// The point is encoded via the `n` least significant bits of a `usize` in little-endian
/// order: bit `i` is the coordinate bound to variable `i`.
/// The struct does not store `n`; interpretation relies on context.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinaryHypercubePoint(pub usize);

impl Deref for BinaryHypercubePoint {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl BinaryHypercubePoint {
    /// Coordinate of the point bound to variable `i`.
    #[must_use]
    #[inline]
    pub const fn bit(self, i: usize) -> bool {
        (self.0 >> i) & 1 == 1
    }

    /// Coordinates of the point in `{0,1}^num_variables`, variable 0 first.
    #[must_use]
    pub fn bits_le(self, num_variables: usize) -> Vec<bool> {
        bits_le(self.0, num_variables)
    }
}

/// Iterator over all points of the binary hypercube `{0,1}^n` in lexicographic order.
///
/// Yields `2^n` points from `0..(1<<n)`.
#[derive(Debug, Clone)]
pub struct BinaryHypercube {
    /// Range of points to yield.
    range: Range<usize>,
}

impl BinaryHypercube {
    /// Constructs a new iterator for `{0,1}^num_variables`.
    #[must_use]
    #[inline]
    pub const fn new(num_variables: usize) -> Self {
        // shifting by >= word size is UB
        debug_assert!(num_variables < usize::BITS as usize);
        let end = 1usize << num_variables;
        Self { range: 0..end }
    }

    /// Remaining number of points that will be yielded.
    #[inline]
    pub const fn len(&self) -> usize {
        self.range.end.saturating_sub(self.range.start)
    }

    /// Whether iteration is finished.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }
}

impl Iterator for BinaryHypercube {
    type Item = BinaryHypercubePoint;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(BinaryHypercubePoint)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len();
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BinaryHypercube {}

/// Little-endian bit decomposition of `value`, zero-padded up to `width` bits.
///
/// `width` is a lower bound: a value needing more bits keeps all of them.
///
/// ```
/// use spartan_mle::poly::hypercube::bits_le;
///
/// assert_eq!(bits_le(5, 4), vec![true, false, true, false]);
/// assert_eq!(bits_le(9, 2), vec![true, false, false, true]);
/// ```
#[must_use]
pub fn bits_le(value: usize, width: usize) -> Vec<bool> {
    let bit_len = (usize::BITS - value.leading_zeros()) as usize;
    (0..bit_len.max(width)).map(|i| i < bit_len && (value >> i) & 1 == 1).collect()
}

/// Big-endian bit decomposition of `value`, i.e. `bits_le(value, width)` reversed.
#[must_use]
pub fn bits_be(value: usize, width: usize) -> Vec<bool> {
    let mut bits = bits_le(value, width);
    bits.reverse();
    bits
}

/// Little-endian bit decomposition of `value` into exactly `width` bits.
///
/// Fails instead of truncating when `value >= 2^width`.
pub fn bits_le_capped(value: usize, width: usize) -> Result<Vec<bool>> {
    if !fits_in_bits(value, width) {
        return Err(MleError::ValueTooWide { value, width });
    }
    Ok(bits_le(value, width))
}

/// Maps the little-endian bits of `value` onto `variables` positionally.
///
/// With `variables = [X, Y, Z, W]` and `value = b0 + 2 b1 + 4 b2 + 8 b3`, the result
/// is `{X: b0, Y: b1, Z: b2, W: b3}`.
pub fn bits_to_var_assignment<V>(value: usize, variables: &[V]) -> Result<BTreeMap<V, bool>>
where
    V: Ord + Clone,
{
    let bits = bits_le_capped(value, variables.len())?;
    Ok(variables.iter().cloned().zip(bits).collect())
}

/// Whether `value < 2^width`.
#[inline]
pub(crate) const fn fits_in_bits(value: usize, width: usize) -> bool {
    width >= usize::BITS as usize || value >> width == 0
}
