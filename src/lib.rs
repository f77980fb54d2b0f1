pub mod constant;
pub mod errors;
pub mod poly;
pub mod r1cs;
pub mod sumcheck;
pub mod utils;
