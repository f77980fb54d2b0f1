//! Random satisfiable R1CS instances for tests.

use p3_field::Field;
use p3_matrix::dense::RowMajorMatrix;
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom,
};

use super::R1cs;
use crate::utils::{hadamard_product, matrix_vector_product};

/// Samples an instance with `num_rows` constraints over `num_columns` columns.
///
/// `A` and `B` are sparse random matrices with density `log2(n) / n`. Each row of `C`
/// is sparse random too, except for one pivot column, drawn uniformly among the
/// non-zero witness entries, whose coefficient is solved for so that the row holds.
/// A zero witness satisfies every instance, so `C` is then fully random.
pub(crate) fn random_instance<F, R>(
    rng: &mut R,
    num_rows: usize,
    num_columns: usize,
    witness: Option<Vec<F>>,
) -> R1cs<F>
where
    F: Field,
    R: Rng,
    StandardUniform: Distribution<F>,
{
    let witness = witness.unwrap_or_else(|| (0..num_columns).map(|_| rng.random()).collect());
    assert_eq!(witness.len(), num_columns, "witness length must match the column count");

    let density = if num_columns > 1 {
        (num_columns as f64).log2() / num_columns as f64
    } else {
        1.0
    };
    let sparse_row = |rng: &mut R| -> Vec<F> {
        (0..num_columns)
            .map(|_| {
                if rng.random_bool(density) {
                    rng.random()
                } else {
                    F::ZERO
                }
            })
            .collect()
    };

    let a = RowMajorMatrix::new(
        (0..num_rows).flat_map(|_| sparse_row(&mut *rng)).collect(),
        num_columns,
    );
    let b = RowMajorMatrix::new(
        (0..num_rows).flat_map(|_| sparse_row(&mut *rng)).collect(),
        num_columns,
    );

    let support: Vec<usize> = (0..num_columns).filter(|&j| witness[j] != F::ZERO).collect();
    let c_values = if support.is_empty() {
        (0..num_rows * num_columns).map(|_| rng.random()).collect()
    } else {
        let az = matrix_vector_product(&a, &witness).unwrap();
        let bz = matrix_vector_product(&b, &witness).unwrap();
        let target = hadamard_product(&az, &bz).unwrap();

        let mut values = Vec::with_capacity(num_rows * num_columns);
        for expected in target {
            let pivot = *support.choose(rng).unwrap();
            let mut row = sparse_row(&mut *rng);
            row[pivot] = F::ZERO;
            let dot: F = row.iter().zip(&witness).map(|(&c, &w)| c * w).sum();
            row[pivot] = (expected - dot) / witness[pivot];
            values.extend(row);
        }
        values
    };
    let c = RowMajorMatrix::new(c_values, num_columns);

    R1cs::new(a, b, c, witness).expect("generated instance must be satisfiable")
}
