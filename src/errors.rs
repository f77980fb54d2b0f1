//! Error types for multilinear extension and R1CS operations.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, MleError>;

/// Granular error types for polynomial, extension and R1CS operations.
///
/// Every check is performed eagerly at the point of violation. A returned error
/// means the whole operation was aborted and no partial result is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MleError {
    /// Operand lengths or shapes disagree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which operand was checked.
        context: &'static str,
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A matrix with zero rows or zero columns was supplied.
    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    /// A value needs more bits than the hard cap allows.
    #[error("value {value} does not fit in {width} bits")]
    ValueTooWide {
        /// Value being decomposed.
        value: usize,
        /// Maximum number of bits.
        width: usize,
    },

    /// A hypercube index lies outside `[0, 2^num_variables)`.
    #[error("index {index} cannot be represented with {num_variables} variables")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Dimension of the hypercube.
        num_variables: usize,
    },

    /// A vector has more entries than the hypercube has points.
    #[error("vector of length {len} does not fit on a hypercube of {num_variables} variables")]
    VectorTooLong {
        /// Length of the vector.
        len: usize,
        /// Dimension of the hypercube.
        num_variables: usize,
    },

    /// A variable index is not a generator of the polynomial ring.
    #[error("variable {index} is not a generator of a ring with {num_variables} variables")]
    UnknownVariable {
        /// Offending variable index.
        index: usize,
        /// Number of generators in the ring.
        num_variables: usize,
    },

    /// A variable or generator name occurs twice where distinct ones are required.
    #[error("variable {0} occurs more than once")]
    DuplicateVariable(usize),

    /// A ring was requested with more generators than a monomial can address.
    #[error("ring with {requested} variables exceeds the maximum of {max}")]
    TooManyVariables {
        /// Requested number of generators.
        requested: usize,
        /// Hard limit.
        max: usize,
    },

    /// A product would raise some variable to a power above one.
    #[error("product is not multilinear")]
    NotMultilinear,

    /// Polynomials from different rings were combined.
    ///
    /// The coefficient field itself is a type parameter, so mixing fields is a
    /// compile error; mixing rings over the same field is caught here.
    #[error("operands belong to different polynomial rings")]
    RingMismatch,

    /// `(A·w) ⊙ (B·w) ≠ C·w` at the given constraint.
    #[error("R1CS instance is not satisfied at constraint {row}")]
    UnsatisfiableInstance {
        /// First row where the Hadamard check fails.
        row: usize,
    },
}
