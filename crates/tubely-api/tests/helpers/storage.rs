//! Recording fake for the video object storage.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// One call to `upload_file` or `upload_with_key`.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub key: String,
    pub content_type: String,
    /// Bytes as they were on disk (or in memory) at call time.
    pub data: Vec<u8>,
}

/// Stands in for S3: remembers every upload and answers with S3-style URLs.
pub struct RecordingStorage {
    bucket: String,
    region: String,
    uploads: Mutex<Vec<RecordedUpload>>,
    fail_uploads: AtomicBool,
}

impl RecordingStorage {
    pub fn new(bucket: &str, region: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            region: region.to_string(),
            uploads: Mutex::new(Vec::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Make every following upload fail with `UploadFailed`.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    fn record(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("simulated outage".to_string()));
        }
        self.uploads.lock().unwrap().push(RecordedUpload {
            key: key.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        Ok(self.public_url(key))
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        self.record(storage_key, data, content_type)
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        let data = tokio::fs::read(local_path).await?;
        self.record(storage_key, data, content_type)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.uploads.lock().unwrap().retain(|u| u.key != storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self
            .uploads
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.key == storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, storage_key
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
