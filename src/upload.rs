//! Remote storage for exported diagrams.
//!
//! [`RemoteUpload`] is the capability the canvas hands exported bytes to. The only
//! implementation shipped here is [`MockDriveUpload`], which stands in for a cloud
//! drive integration that has no credentials or API wiring yet.
use crate::error::UploadError;
use log::{info, warn};
use std::future::Future;
use std::time::Duration;

pub const MOCK_FILE_ID: &str = "mock-file-id";
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(1000);

/// What a backend reports after storing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub id: String,
}

/// A destination that can store named blobs.
///
/// Implementations must not hold on to the diagram: they only ever see the bytes they
/// are given, so the user can keep editing while an upload is in flight.
pub trait RemoteUpload {
    fn upload(
        &self,
        bytes: Vec<u8>,
        name: &str,
    ) -> impl Future<Output = Result<UploadReceipt, UploadError>> + Send;
}

/// Simulates a cloud drive upload: waits a fixed latency, then always succeeds.
#[derive(Debug, Clone)]
pub struct MockDriveUpload {
    latency: Duration,
}

impl Default for MockDriveUpload {
    fn default() -> Self {
        Self {
            latency: DEFAULT_MOCK_LATENCY,
        }
    }
}

impl MockDriveUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl RemoteUpload for MockDriveUpload {
    fn upload(
        &self,
        bytes: Vec<u8>,
        name: &str,
    ) -> impl Future<Output = Result<UploadReceipt, UploadError>> + Send {
        let name = name.to_string();
        let latency = self.latency;
        async move {
            info!("Uploading '{}' ({} bytes) to drive", name, bytes.len());
            warn!("Drive API is not configured; simulating upload");
            tokio::time::sleep(latency).await;
            Ok(UploadReceipt {
                id: MOCK_FILE_ID.to_string(),
            })
        }
    }
}
