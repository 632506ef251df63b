use crate::observations::error::ObservationError;
use crate::observations::query::ObservationQuery;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

const CACHE_FILE_PREFIX: &str = "observations-";

/// Parquet cache of long observation frames, one file per query.
#[derive(Debug, Clone)]
pub struct ObservationCache {
    cache_dir: PathBuf,
}

impl ObservationCache {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, query: &ObservationQuery) -> PathBuf {
        self.cache_dir
            .join(format!("{}{}.parquet", CACHE_FILE_PREFIX, query.cache_key()))
    }

    /// Returns the cached frame for `query`, if any.
    pub async fn load(
        &self,
        query: &ObservationQuery,
    ) -> Result<Option<LazyFrame>, ObservationError> {
        let path = self.path_for(query);
        if fs::metadata(&path).await.is_err() {
            return Ok(None);
        }
        info!("Cache hit for sources '{}' at {:?}", query.sources, path);
        LazyFrame::scan_parquet(&path, Default::default())
            .map(Some)
            .map_err(|e| ObservationError::ParquetScan(path, e))
    }

    /// Writes `df` as the cached result of `query`.
    pub async fn store(
        &self,
        query: &ObservationQuery,
        mut df: DataFrame,
    ) -> Result<PathBuf, ObservationError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| ObservationError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let path = self.path_for(query);
        let path_buf = path.clone();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| ObservationError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| ObservationError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), ObservationError>(())
        })
        .await??;
        info!("Cached observations for sources '{}' to {:?}", query.sources, path);
        Ok(path)
    }

    /// Removes the cached file for `query`. Missing files are not an error.
    pub async fn clear(&self, query: &ObservationQuery) -> Result<(), ObservationError> {
        let path = self.path_for(query);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ObservationError::CacheDeletion(path, e)),
        }
    }
}
