use crate::adapters::column_tail;
use crate::domain::model::{Dataset, CATEGORY_COUNT};
use crate::domain::ports::DataStore;
use crate::utils::error::{Result, SandwichError};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// `DataStore` keeping each dataset in `<dir>/<dataset>.csv`.
///
/// Every file starts with a header of category names followed by one row
/// of integers per market.
#[derive(Debug, Clone)]
pub struct CsvDataStore {
    base_path: PathBuf,
    categories: Vec<String>,
}

impl CsvDataStore {
    pub fn new(base_path: impl Into<PathBuf>, categories: Vec<String>) -> Self {
        Self {
            base_path: base_path.into(),
            categories,
        }
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.base_path.join(format!("{}.csv", dataset.name()))
    }

    /// Creates the data directory and any missing dataset file with its header.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        for dataset in Dataset::ALL {
            let path = self.path_for(dataset);
            if !path.exists() {
                self.write_header(dataset, &path)?;
                tracing::info!(path = %path.display(), "Created dataset file");
            }
        }
        Ok(())
    }

    fn write_header(&self, dataset: Dataset, path: &Path) -> Result<()> {
        let persist_err = |message: String| SandwichError::persistence(dataset.name(), message);

        let mut writer = csv::Writer::from_path(path).map_err(|e| persist_err(e.to_string()))?;
        writer
            .write_record(&self.categories)
            .map_err(|e| persist_err(e.to_string()))?;
        writer.flush().map_err(|e| persist_err(e.to_string()))?;
        Ok(())
    }

    fn read_rows(&self, dataset: Dataset) -> Result<Vec<Vec<i64>>> {
        let path = self.path_for(dataset);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Dataset file missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| read_error(dataset, e))?;

        let headers = reader.headers().map_err(|e| read_error(dataset, e))?.clone();
        if headers.len() != CATEGORY_COUNT {
            return Err(SandwichError::data_shape(
                dataset.name(),
                format!("header has {} columns, expected {}", headers.len(), CATEGORY_COUNT),
            ));
        }
        if !headers.iter().eq(self.categories.iter().map(String::as_str)) {
            tracing::warn!(
                %dataset,
                found = ?headers.iter().collect::<Vec<_>>(),
                "Dataset header does not match configured categories"
            );
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| read_error(dataset, e))?;
            let row = record
                .iter()
                .map(|cell| {
                    cell.parse::<i64>().map_err(|_| {
                        SandwichError::data_shape(
                            dataset.name(),
                            format!("row {} has non-integer cell '{}'", index + 1, cell),
                        )
                    })
                })
                .collect::<Result<Vec<i64>>>()?;
            rows.push(row);
        }
        Ok(rows)
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn read_error(dataset: Dataset, error: csv::Error) -> SandwichError {
    if error.is_io_error() {
        match error.into_kind() {
            csv::ErrorKind::Io(io) => SandwichError::IoError(io),
            other => SandwichError::data_shape(dataset.name(), format!("{:?}", other)),
        }
    } else {
        SandwichError::data_shape(dataset.name(), error.to_string())
    }
}

impl DataStore for CsvDataStore {
    async fn latest_row(&self, dataset: Dataset) -> Result<Option<Vec<i64>>> {
        Ok(self.read_rows(dataset)?.pop())
    }

    async fn last_n_rows(&self, dataset: Dataset, n: usize, column: usize) -> Result<Vec<i64>> {
        let rows = self.read_rows(dataset)?;
        column_tail(dataset, &rows, n, column)
    }

    async fn append_row(&self, dataset: Dataset, row: &[i64]) -> Result<()> {
        let path = self.path_for(dataset);
        let persist_err = |message: String| SandwichError::persistence(dataset.name(), message);

        if !path.exists() {
            fs::create_dir_all(&self.base_path).map_err(|e| persist_err(e.to_string()))?;
            self.write_header(dataset, &path)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| persist_err(e.to_string()))?;
        // 手動編輯的檔案可能少了結尾換行，先補上以免新列接在最後一列後面
        if !ends_with_newline(&mut file).map_err(|e| persist_err(e.to_string()))? {
            file.write_all(b"\n").map_err(|e| persist_err(e.to_string()))?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| persist_err(e.to_string()))?;
        writer.flush().map_err(|e| persist_err(e.to_string()))?;

        tracing::debug!(%dataset, path = %path.display(), "Row appended to CSV");
        Ok(())
    }
}
