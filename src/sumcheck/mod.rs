pub mod hypercube_sum;


pub use hypercube_sum::{HypercubeSum, boolean_hypercube_sum, hypercube_sum};
