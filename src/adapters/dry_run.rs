use crate::adapters::column_tail;
use crate::domain::model::Dataset;
use crate::domain::ports::DataStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Wraps a store so appends stay in memory while reads see them on top of
/// the real rows. The wrapped store is only ever read.
pub struct DryRunStore<S: DataStore> {
    base: S,
    pending: Arc<Mutex<HashMap<Dataset, Vec<Vec<i64>>>>>,
}

impl<S: DataStore> DryRunStore<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Rows that would have been written to `dataset`.
    pub async fn pending(&self, dataset: Dataset) -> Vec<Vec<i64>> {
        self.pending
            .lock()
            .await
            .get(&dataset)
            .cloned()
            .unwrap_or_default()
    }
}

impl<S: DataStore> DataStore for DryRunStore<S> {
    async fn latest_row(&self, dataset: Dataset) -> Result<Option<Vec<i64>>> {
        if let Some(row) = self.pending(dataset).await.pop() {
            return Ok(Some(row));
        }
        self.base.latest_row(dataset).await
    }

    async fn last_n_rows(&self, dataset: Dataset, n: usize, column: usize) -> Result<Vec<i64>> {
        let pending = self.pending(dataset).await;
        let mut cells = column_tail(dataset, &pending, n, column)?;

        let needed = n.saturating_sub(cells.len());
        if needed > 0 {
            let mut base = self.base.last_n_rows(dataset, needed, column).await?;
            base.append(&mut cells);
            cells = base;
        }
        Ok(cells)
    }

    async fn append_row(&self, dataset: Dataset, row: &[i64]) -> Result<()> {
        tracing::info!(%dataset, ?row, "Dry run: row kept in memory");
        self.pending
            .lock()
            .await
            .entry(dataset)
            .or_default()
            .push(row.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryStore;

    #[tokio::test]
    async fn test_appends_are_visible_but_not_written() {
        let base = InMemoryStore::new()
            .with_rows(Dataset::Sales, vec![vec![1; 6], vec![2; 6], vec![3; 6]])
            .await;
        let store = DryRunStore::new(base.clone());

        store.append_row(Dataset::Sales, &[9; 6]).await.unwrap();

        assert_eq!(store.latest_row(Dataset::Sales).await.unwrap(), Some(vec![9; 6]));
        assert_eq!(
            store.last_n_rows(Dataset::Sales, 3, 0).await.unwrap(),
            vec![2, 3, 9]
        );
        assert_eq!(base.rows(Dataset::Sales).await.len(), 3);
        assert_eq!(store.pending(Dataset::Sales).await, vec![vec![9; 6]]);
    }

    #[tokio::test]
    async fn test_falls_back_to_base_when_nothing_pending() {
        let base = InMemoryStore::new()
            .with_rows(Dataset::Stock, vec![vec![4; 6]])
            .await;
        let store = DryRunStore::new(base);

        assert_eq!(store.latest_row(Dataset::Stock).await.unwrap(), Some(vec![4; 6]));
        assert_eq!(store.latest_row(Dataset::Surplus).await.unwrap(), None);
    }
}
