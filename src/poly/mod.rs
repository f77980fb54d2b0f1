pub mod eq;
pub mod evals;
pub mod extension;
pub mod hypercube;
pub mod multilinear;
pub mod ring;
pub mod sparse;
