use crate::domain::model::{CategoryRow, Dataset, ForecastRow, ForecastSettings, CATEGORY_COUNT};
use crate::utils::error::{Result, SandwichError};

/// Recommended stock for the next market.
///
/// `history` holds one column of past sales per category, oldest first.
/// Only the last `settings.window` entries of each column are used; a
/// shorter column is averaged as-is. The mean is scaled by the safety
/// margin and rounded with the configured policy. Sums are taken in
/// `i128`; a forecast that does not fit an `i64` is a `DataShapeError`.
pub fn forecast_stock(history: &[Vec<i64>], settings: &ForecastSettings) -> Result<ForecastRow> {
    if history.len() != CATEGORY_COUNT {
        return Err(SandwichError::data_shape(
            Dataset::Sales.name(),
            format!(
                "expected history for {} categories, found {}",
                CATEGORY_COUNT,
                history.len()
            ),
        ));
    }

    let mut forecast = [0i64; CATEGORY_COUNT];
    for (category, column) in history.iter().enumerate() {
        let start = column.len().saturating_sub(settings.window);
        let window = &column[start..];
        if window.is_empty() {
            return Err(SandwichError::InsufficientHistoryError { category });
        }

        let total: i128 = window.iter().map(|&v| i128::from(v)).sum();
        let average = total as f64 / window.len() as f64;
        let stock = average * settings.safety_margin;
        forecast[category] = settings.rounding.apply(stock).ok_or_else(|| {
            SandwichError::data_shape(
                Dataset::Stock.name(),
                format!("forecast {} for category {} is out of range", stock, category),
            )
        })?;

        tracing::debug!(
            category,
            entries = window.len(),
            average,
            stock,
            rounded = forecast[category],
            "Forecast computed"
        );
    }

    Ok(CategoryRow::new(forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RoundingPolicy;

    fn uniform(value: i64, entries: usize) -> Vec<Vec<i64>> {
        vec![vec![value; entries]; CATEGORY_COUNT]
    }

    #[test]
    fn test_uniform_history_gets_ten_percent_margin() {
        let forecast = forecast_stock(&uniform(10, 5), &ForecastSettings::default()).unwrap();
        assert_eq!(forecast.values(), &[11; CATEGORY_COUNT]);
    }

    #[test]
    fn test_trend_scenario() {
        let mut history = uniform(10, 5);
        history[0] = vec![8, 9, 10, 11, 12];
        history[3] = vec![20, 20, 30, 30, 50];

        let forecast = forecast_stock(&history, &ForecastSettings::default()).unwrap();
        assert_eq!(forecast.values()[0], 11);
        // mean 30 -> 33
        assert_eq!(forecast.values()[3], 33);
    }

    #[test]
    fn test_only_trailing_window_is_used() {
        let mut history = uniform(10, 5);
        history[2] = vec![1000, 1000, 1, 1, 1, 1, 1];

        let forecast = forecast_stock(&history, &ForecastSettings::default()).unwrap();
        assert_eq!(forecast.values()[2], 1);
    }

    #[test]
    fn test_short_history_shrinks_window() {
        let history = uniform(20, 2);
        let forecast = forecast_stock(&history, &ForecastSettings::default()).unwrap();
        assert_eq!(forecast.values(), &[22; CATEGORY_COUNT]);
    }

    #[test]
    fn test_empty_column_is_insufficient_history() {
        let mut history = uniform(10, 3);
        history[4].clear();

        match forecast_stock(&history, &ForecastSettings::default()) {
            Err(SandwichError::InsufficientHistoryError { category }) => assert_eq!(category, 4),
            other => panic!("expected insufficient history, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_category_count_is_shape_error() {
        let history = vec![vec![1, 2, 3]; 4];
        assert!(matches!(
            forecast_stock(&history, &ForecastSettings::default()),
            Err(SandwichError::DataShapeError { .. })
        ));
    }

    #[test]
    fn test_ties_follow_rounding_policy() {
        let mut history = uniform(10, 2);
        history[0] = vec![2, 3]; // 2.5
        history[1] = vec![3, 4]; // 3.5

        let half_even = ForecastSettings {
            safety_margin: 1.0,
            ..ForecastSettings::default()
        };
        let forecast = forecast_stock(&history, &half_even).unwrap();
        assert_eq!(forecast.values()[0], 2);
        assert_eq!(forecast.values()[1], 4);

        let away = ForecastSettings {
            rounding: RoundingPolicy::HalfAwayFromZero,
            ..half_even
        };
        let forecast = forecast_stock(&history, &away).unwrap();
        assert_eq!(forecast.values()[0], 3);
        assert_eq!(forecast.values()[1], 4);
    }

    #[test]
    fn test_rounding_policy_boundaries() {
        assert_eq!(RoundingPolicy::HalfEven.apply(2.5), Some(2));
        assert_eq!(RoundingPolicy::HalfEven.apply(3.5), Some(4));
        assert_eq!(RoundingPolicy::HalfEven.apply(-2.5), Some(-2));
        assert_eq!(RoundingPolicy::HalfEven.apply(2.6), Some(3));
        assert_eq!(RoundingPolicy::HalfAwayFromZero.apply(2.5), Some(3));
        assert_eq!(RoundingPolicy::HalfAwayFromZero.apply(-2.5), Some(-3));
        assert_eq!(RoundingPolicy::HalfEven.apply(f64::NAN), None);
        assert_eq!(RoundingPolicy::HalfEven.apply(1e19), None);
        assert_eq!(RoundingPolicy::HalfEven.apply(-1e19), None);
    }

    #[test]
    fn test_large_sales_sum_without_overflow() {
        // 6e18 + 6e18 does not fit an i64, the mean does
        let settings = ForecastSettings {
            safety_margin: 1.0,
            ..ForecastSettings::default()
        };
        let forecast = forecast_stock(&uniform(6_000_000_000_000_000_000, 2), &settings).unwrap();
        assert_eq!(forecast.values(), &[6_000_000_000_000_000_000; CATEGORY_COUNT]);
    }

    #[test]
    fn test_out_of_range_forecast_is_shape_error() {
        for extreme in [i64::MAX, i64::MIN] {
            match forecast_stock(&uniform(extreme, 2), &ForecastSettings::default()) {
                Err(SandwichError::DataShapeError { dataset, message }) => {
                    assert_eq!(dataset, "stock");
                    assert!(message.contains("category 0"));
                }
                other => panic!("expected out of range forecast, got {other:?}"),
            }
        }
    }
}
