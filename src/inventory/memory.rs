//! In-Memory Inventory
//!
//! Holds drive and file records behind read locks and alerts in a
//! concurrent map so acknowledgment is atomic per alert id.

use crate::domain::{
    Alert, AlertSeverity, DriveRecord, FileRecord, Inventory, StorageTier,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::info;

// =============================================================================
// In-Memory Inventory
// =============================================================================

/// Inventory over in-memory collections
pub struct InMemoryInventory {
    drives: RwLock<Vec<DriveRecord>>,
    files: RwLock<Vec<FileRecord>>,
    alerts: DashMap<String, Alert>,
}

impl InMemoryInventory {
    /// Create an inventory from explicit collections
    pub fn new(drives: Vec<DriveRecord>, files: Vec<FileRecord>, alerts: Vec<Alert>) -> Self {
        let alert_map = DashMap::new();
        for alert in alerts {
            alert_map.insert(alert.id.clone(), alert);
        }

        Self {
            drives: RwLock::new(drives),
            files: RwLock::new(files),
            alerts: alert_map,
        }
    }

    /// Replace the drive collection (telemetry refresh)
    pub fn replace_drives(&self, drives: Vec<DriveRecord>) {
        info!(count = drives.len(), "replacing drive inventory");
        *self.drives.write() = drives;
    }

    /// Replace the file collection (metadata refresh)
    pub fn replace_files(&self, files: Vec<FileRecord>) {
        info!(count = files.len(), "replacing file inventory");
        *self.files.write() = files;
    }
}

#[async_trait]
impl Inventory for InMemoryInventory {
    async fn drives(&self) -> Result<Vec<DriveRecord>> {
        Ok(self.drives.read().clone())
    }

    async fn drive(&self, id: &str) -> Result<DriveRecord> {
        self.drives
            .read()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::DriveNotFound { id: id.to_string() })
    }

    async fn files(&self, tier: Option<StorageTier>) -> Result<Vec<FileRecord>> {
        let files = self.files.read();
        Ok(match tier {
            Some(tier) => files.iter().filter(|f| f.tier == tier).cloned().collect(),
            None => files.clone(),
        })
    }

    async fn file(&self, id: &str) -> Result<FileRecord> {
        self.files
            .read()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| Error::FileNotFound { id: id.to_string() })
    }

    async fn alerts(&self, severity: Option<AlertSeverity>) -> Result<Vec<Alert>> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|a| severity.map_or(true, |s| a.severity == s))
            .collect();
        // DashMap iteration order is arbitrary; keep listings stable
        alerts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(alerts)
    }

    async fn acknowledge_alert(&self, id: &str) -> Result<Alert> {
        match self.alerts.get_mut(id) {
            Some(mut entry) => {
                entry.acknowledged = true;
                Ok(entry.clone())
            }
            None => Err(Error::AlertNotFound { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::seed::sample_inventory;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn seeded() -> InMemoryInventory {
        sample_inventory(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_drive_lookup() {
        let inventory = seeded();
        let drives = inventory.drives().await.unwrap();
        assert!(!drives.is_empty());

        let first = inventory.drive(&drives[0].id).await.unwrap();
        assert_eq!(first.id, drives[0].id);

        let missing = inventory.drive("no-such-drive").await;
        assert_matches!(missing, Err(Error::DriveNotFound { .. }));
    }

    #[tokio::test]
    async fn test_file_tier_filter() {
        let inventory = seeded();
        let all = inventory.files(None).await.unwrap();
        let hot = inventory.files(Some(StorageTier::Hot)).await.unwrap();
        assert!(hot.len() < all.len());
        assert!(hot.iter().all(|f| f.tier == StorageTier::Hot));
    }

    #[tokio::test]
    async fn test_file_lookup_miss() {
        let inventory = seeded();
        let missing = inventory.file("no-such-file").await;
        assert_matches!(missing, Err(Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_alert_listing_stable_and_filtered() {
        let inventory = seeded();
        let all = inventory.alerts(None).await.unwrap();
        assert!(!all.is_empty());
        // Stable id order
        for pair in all.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }

        let critical = inventory.alerts(Some(AlertSeverity::Critical)).await.unwrap();
        assert!(critical.iter().all(|a| a.severity == AlertSeverity::Critical));
    }

    #[tokio::test]
    async fn test_acknowledge_idempotent() {
        let inventory = seeded();
        let alerts = inventory.alerts(None).await.unwrap();
        let id = alerts[0].id.clone();

        let first = inventory.acknowledge_alert(&id).await.unwrap();
        assert!(first.acknowledged);

        // Second acknowledgment is safe and stays acknowledged
        let second = inventory.acknowledge_alert(&id).await.unwrap();
        assert!(second.acknowledged);

        let listed = inventory.alerts(None).await.unwrap();
        let alert = listed.iter().find(|a| a.id == id).unwrap();
        assert!(alert.acknowledged);
    }

    #[tokio::test]
    async fn test_acknowledge_unknown_alert() {
        let inventory = seeded();
        let result = inventory.acknowledge_alert("alert-unknown").await;
        assert_matches!(result, Err(Error::AlertNotFound { .. }));
    }
}
