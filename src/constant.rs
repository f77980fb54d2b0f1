/// Maximum number of generators in a polynomial ring.
///
/// A monomial is stored as a `u64` bitmask where bit `i` marks variable `i`, so a ring
/// can have at most 64 generators. This is far beyond what is practical anyway: building
/// a Lagrange basis over `n` variables touches `2^n` monomials.
pub const MAX_RING_VARIABLES: usize = 64;

/// Number of basis polynomials below which the extension builder stays sequential.
///
/// Each basis polynomial over `k` variables has up to `2^k` terms. For the small
/// instances used in tests the thread pool overhead dominates, so parallelism only
/// starts once there is a meaningful amount of work per call.
pub const PARALLEL_BASIS_THRESHOLD: usize = 64;
