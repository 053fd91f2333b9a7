// Adapters layer: concrete stores and consoles behind the domain ports.

pub mod console;
pub mod csv_store;
pub mod dry_run;
pub mod memory_store;

use crate::domain::model::{Dataset, CATEGORY_COUNT};
use crate::utils::error::{Result, SandwichError};

/// Cells of `column` from the last `n` of `rows`, oldest first.
///
/// Every row read must hold exactly `CATEGORY_COUNT` cells.
pub(crate) fn column_tail(
    dataset: Dataset,
    rows: &[Vec<i64>],
    n: usize,
    column: usize,
) -> Result<Vec<i64>> {
    let start = rows.len().saturating_sub(n);

    rows[start..]
        .iter()
        .map(|row| {
            if row.len() != CATEGORY_COUNT {
                return Err(SandwichError::data_shape(
                    dataset.name(),
                    format!("expected {} cells, found {}", CATEGORY_COUNT, row.len()),
                ));
            }
            row.get(column).copied().ok_or_else(|| {
                SandwichError::data_shape(
                    dataset.name(),
                    format!("column {} requested, rows have {} cells", column, CATEGORY_COUNT),
                )
            })
        })
        .collect()
}
