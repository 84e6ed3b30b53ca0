use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quire_core::Contract;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::record::ContractSummary;
use crate::traits::ContractStore;

/// Contract store backed by a directory of `<id>.json` documents.
///
/// Writes go through a temporary file and a rename, so a crashed write never
/// leaves a truncated document behind. Mutations are serialized within one
/// process; separate processes rely on the version check alone.
#[derive(Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

fn backend(context: &str, path: &Path, err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(format!("{} '{}': {}", context, path.display(), err))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirStore {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_id(id) {
            return Err(StorageError::InvalidId { id: id.to_string() });
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    async fn read(&self, path: &Path) -> Result<Option<Contract>, StorageError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| backend("invalid contract document", path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend("could not read", path, e)),
        }
    }

    async fn write(&self, path: &Path, contract: &Contract) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| backend("could not create", &self.dir, e))?;
        let json = serde_json::to_string_pretty(contract)
            .map_err(|e| backend("could not serialize", path, e))?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| backend("could not write", &tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| backend("could not replace", path, e))
    }
}

#[async_trait]
impl ContractStore for JsonDirStore {
    async fn get_contract(&self, id: &str) -> Result<Option<Contract>, StorageError> {
        let path = self.path_for(id)?;
        self.read(&path).await
    }

    async fn insert_contract(&self, contract: Contract) -> Result<Contract, StorageError> {
        let path = self.path_for(&contract.id)?;
        let _guard = self.write_lock.lock().await;
        if self.read(&path).await?.is_some() {
            return Err(StorageError::AlreadyExists { id: contract.id });
        }
        self.write(&path, &contract).await?;
        tracing::debug!(id = %contract.id, path = %path.display(), "inserted contract");
        Ok(contract)
    }

    async fn update_contract(
        &self,
        contract: Contract,
        expected_version: u32,
    ) -> Result<Contract, StorageError> {
        let path = self.path_for(&contract.id)?;
        let _guard = self.write_lock.lock().await;
        let stored = self
            .read(&path)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                id: contract.id.clone(),
            })?;
        if stored.version != expected_version {
            tracing::warn!(
                id = %contract.id,
                expected_version,
                found_version = stored.version,
                "rejected stale contract update"
            );
            return Err(StorageError::ConcurrentConflict {
                id: contract.id,
                expected_version,
                found_version: stored.version,
            });
        }
        self.write(&path, &contract).await?;
        tracing::debug!(id = %contract.id, version = contract.version, "updated contract");
        Ok(contract)
    }

    async fn list_contracts(&self) -> Result<Vec<ContractSummary>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(backend("could not list", &self.dir, e)),
        };
        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| backend("could not list", &self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(contract) = self.read(&path).await? {
                summaries.push(ContractSummary::from(&contract));
            }
        }
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }
}
