//! Domain Ports - trait definitions at the repository boundary
//!
//! The advisor consumes drive/file/alert records as opaque injected data.
//! Adapters implement this trait to provide concrete inventories; the
//! decision components never touch storage directly.

use crate::domain::types::{Alert, AlertSeverity, DriveRecord, FileRecord, StorageTier};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

// =============================================================================
// Inventory Port
// =============================================================================

/// Port for read access to the drive/file inventory plus the single
/// mutate operation the system has: alert acknowledgment.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// List all drives
    async fn drives(&self) -> Result<Vec<DriveRecord>>;

    /// Get a drive by id
    async fn drive(&self, id: &str) -> Result<DriveRecord>;

    /// List files, optionally filtered by current tier
    async fn files(&self, tier: Option<StorageTier>) -> Result<Vec<FileRecord>>;

    /// Get a file by id
    async fn file(&self, id: &str) -> Result<FileRecord>;

    /// List alerts, optionally filtered by severity
    async fn alerts(&self, severity: Option<AlertSeverity>) -> Result<Vec<Alert>>;

    /// Acknowledge an alert.
    ///
    /// The transition is one-way (false -> true) and idempotent;
    /// acknowledging an unknown id fails with `AlertNotFound`.
    async fn acknowledge_alert(&self, id: &str) -> Result<Alert>;
}

pub type InventoryRef = Arc<dyn Inventory>;
