use crate::adapters::column_tail;
use crate::domain::model::Dataset;
use crate::domain::ports::DataStore;
use crate::utils::error::{Result, SandwichError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    rows: HashMap<Dataset, Vec<Vec<i64>>>,
    failing: HashSet<Dataset>,
}

/// In-memory `DataStore`. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to preload a dataset. Replaces any rows already held,
    /// and clones made earlier see the preload too.
    pub async fn with_rows(self, dataset: Dataset, rows: Vec<Vec<i64>>) -> Self {
        self.tables.lock().await.rows.insert(dataset, rows);
        self
    }

    /// Makes every later append to `dataset` fail with a `PersistenceError`.
    pub async fn fail_appends_to(&self, dataset: Dataset) {
        self.tables.lock().await.failing.insert(dataset);
    }

    pub async fn rows(&self, dataset: Dataset) -> Vec<Vec<i64>> {
        self.tables
            .lock()
            .await
            .rows
            .get(&dataset)
            .cloned()
            .unwrap_or_default()
    }
}

impl DataStore for InMemoryStore {
    async fn latest_row(&self, dataset: Dataset) -> Result<Option<Vec<i64>>> {
        let tables = self.tables.lock().await;
        Ok(tables.rows.get(&dataset).and_then(|rows| rows.last().cloned()))
    }

    async fn last_n_rows(&self, dataset: Dataset, n: usize, column: usize) -> Result<Vec<i64>> {
        let tables = self.tables.lock().await;
        let rows = tables.rows.get(&dataset).map(Vec::as_slice).unwrap_or_default();
        column_tail(dataset, rows, n, column)
    }

    async fn append_row(&self, dataset: Dataset, row: &[i64]) -> Result<()> {
        let mut tables = self.tables.lock().await;
        if tables.failing.contains(&dataset) {
            return Err(SandwichError::persistence(
                dataset.name(),
                "append rejected by store",
            ));
        }
        tables.rows.entry(dataset).or_default().push(row.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_and_last_n() {
        let store = InMemoryStore::new()
            .with_rows(
                Dataset::Sales,
                vec![
                    vec![1, 10, 0, 0, 0, 0],
                    vec![2, 20, 0, 0, 0, 0],
                    vec![3, 30, 0, 0, 0, 0],
                ],
            )
            .await;

        assert_eq!(
            store.latest_row(Dataset::Sales).await.unwrap(),
            Some(vec![3, 30, 0, 0, 0, 0])
        );
        assert_eq!(store.latest_row(Dataset::Stock).await.unwrap(), None);
        assert_eq!(
            store.last_n_rows(Dataset::Sales, 2, 1).await.unwrap(),
            vec![20, 30]
        );
        assert_eq!(
            store.last_n_rows(Dataset::Sales, 10, 0).await.unwrap(),
            vec![1, 2, 3]
        );
        assert!(store
            .last_n_rows(Dataset::Surplus, 5, 0)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_rows_of_wrong_width_are_shape_errors() {
        let narrow = InMemoryStore::new()
            .with_rows(Dataset::Sales, vec![vec![1, 2]])
            .await;
        assert!(matches!(
            narrow.last_n_rows(Dataset::Sales, 5, 0).await,
            Err(SandwichError::DataShapeError { .. })
        ));

        let wide = InMemoryStore::new()
            .with_rows(Dataset::Sales, vec![vec![1; 6], vec![1, 2, 3, 4, 5, 6, 7, 8]])
            .await;
        assert!(matches!(
            wide.last_n_rows(Dataset::Sales, 5, 0).await,
            Err(SandwichError::DataShapeError { .. })
        ));
        // a wide row outside the window is never read
        let fine = InMemoryStore::new()
            .with_rows(Dataset::Sales, vec![vec![1, 2, 3, 4, 5, 6, 7, 8], vec![1; 6]])
            .await;
        assert_eq!(fine.last_n_rows(Dataset::Sales, 1, 0).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_preload_is_seen_by_existing_clones() {
        let store = InMemoryStore::new();
        let handle = store.clone();

        let store = store.with_rows(Dataset::Stock, vec![vec![4; 6]]).await;
        assert_eq!(handle.rows(Dataset::Stock).await, vec![vec![4; 6]]);
        assert_eq!(store.rows(Dataset::Stock).await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_tables_and_failures() {
        let store = InMemoryStore::new();
        let handle = store.clone();

        store.append_row(Dataset::Surplus, &[1, 2, 3, 4, 5, 6]).await.unwrap();
        assert_eq!(handle.rows(Dataset::Surplus).await.len(), 1);

        handle.fail_appends_to(Dataset::Surplus).await;
        assert!(matches!(
            store.append_row(Dataset::Surplus, &[0; 6]).await,
            Err(SandwichError::PersistenceError { .. })
        ));
        assert_eq!(handle.rows(Dataset::Surplus).await.len(), 1);
    }
}
