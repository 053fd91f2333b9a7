use crate::domain::model::{CategoryRow, Dataset, SalesRow, SurplusRow, CATEGORY_COUNT};
use crate::utils::error::{Result, SandwichError};

/// Stock minus sales per category. Positive is waste, negative is a
/// shortfall that had to be made on the day.
///
/// `stock` is the raw latest stock row; anything but six cells is a
/// `DataShapeError`. A difference outside the `i64` range is a
/// `DataShapeError` on the surplus dataset rather than a wrapped value.
pub fn calculate_surplus(sales: &SalesRow, stock: &[i64]) -> Result<SurplusRow> {
    let stock = CategoryRow::from_cells(Dataset::Stock, stock)?;

    let mut surplus = [0i64; CATEGORY_COUNT];
    for (category, (stocked, sold)) in stock.iter().zip(sales.iter()).enumerate() {
        surplus[category] = stocked.checked_sub(sold).ok_or_else(|| {
            SandwichError::data_shape(
                Dataset::Surplus.name(),
                format!("category {} overflows: {} - {}", category, stocked, sold),
            )
        })?;
    }

    Ok(CategoryRow::new(surplus))
}
