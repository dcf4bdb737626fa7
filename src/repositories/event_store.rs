use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::event::{latest_visitor_index, EventRecord, Payload};

pub type VisitorPatch = Box<dyn FnOnce(&mut Payload) + Send>;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append(&self, record: EventRecord) -> Result<(), StoreError>;

    async fn read_all(&self) -> Result<Vec<EventRecord>, StoreError>;

    async fn amend_latest_visitor_by_ip(
        &self,
        ip: &str,
        patch: VisitorPatch,
    ) -> Result<bool, StoreError>;

    async fn export(&self) -> Result<Vec<u8>, StoreError>;
}

// Each operation rewrites the whole document. The mutex only guards this process.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&store.path).await? {
            info!("Creating empty event log at {}", store.path.display());
            store.write_records(&[]).await?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<EventRecord>, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_records(&self, records: &[EventRecord]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;

        let mut tmp_name = OsString::from(self.path.as_os_str());
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn append(&self, record: EventRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await?;
        let event_type = record.event_type.clone();
        records.push(record);
        self.write_records(&records).await?;

        debug!("Appended {} record ({} total)", event_type, records.len());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn amend_latest_visitor_by_ip(
        &self,
        ip: &str,
        patch: VisitorPatch,
    ) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await?;
        let Some(index) = latest_visitor_index(&records, ip) else {
            debug!("No visitor record for {} to amend", ip);
            return Ok(false);
        };
        let Some(data) = records[index].payload_mut() else {
            return Ok(false);
        };

        patch(data);
        self.write_records(&records).await?;

        debug!("Amended visitor record #{} for {}", index, ip);
        Ok(true)
    }

    async fn export(&self) -> Result<Vec<u8>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(tokio::fs::read(&self.path).await?)
    }
}
