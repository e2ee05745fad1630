use ndarray::ArrayView2;

use crate::{MlErr, Result};

/// Returns the index of the highest logit of every row. Ties resolve to the first maximum.
pub fn argmax_rows(logits: ArrayView2<f32>) -> Vec<usize> {
    logits
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;

            for (i, &z) in row.iter().enumerate() {
                if z > row[best] {
                    best = i;
                }
            }

            best
        })
        .collect()
}

/// Computes the fraction of rows whose predicted class equals the target class.
///
/// # Arguments
/// * `logits` - The model's output, one example per row.
/// * `targets` - The expected class of every example.
///
/// # Returns
/// A value in `[0, 1]`, or an error for empty or mismatched batches.
pub fn accuracy(logits: ArrayView2<f32>, targets: &[usize]) -> Result<f32> {
    if targets.is_empty() {
        return Err(MlErr::EmptyBatch);
    }

    if logits.nrows() != targets.len() {
        return Err(MlErr::SizeMismatch {
            what: "targets",
            got: targets.len(),
            expected: logits.nrows(),
        });
    }

    let hits = argmax_rows(logits)
        .into_iter()
        .zip(targets)
        .filter(|(pred, target)| pred == *target)
        .count();

    Ok(hits as f32 / targets.len() as f32)
}
