//! Domain Types
//!
//! Record types for drives, files, alerts, and the strategy catalog, plus
//! the enums shared across the decision components. Derived fields on a
//! record (health score, risk level, failure estimate) are recomputed on
//! every read; the records themselves are treated as immutable input except
//! for alert acknowledgment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Risk Level
// =============================================================================

/// Risk level derived from a drive health score, or independently assigned
/// to a file by the owning drive's criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a health score to its risk level.
    ///
    /// Thresholds are evaluated in order so the mapping is total and
    /// monotonic: every score maps to exactly one level, and a higher
    /// score never yields a worse level.
    pub fn from_health_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Low
        } else if score >= 60.0 {
            RiskLevel::Medium
        } else if score >= 40.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

// =============================================================================
// Storage Tier
// =============================================================================

/// Storage tier for access-pattern classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageTier {
    Hot,
    Warm,
    Cold,
    Archive,
}

impl StorageTier {
    /// Monthly unit storage cost for this tier, USD per GB
    pub fn unit_cost_per_gb(&self) -> f64 {
        match self {
            StorageTier::Hot => 0.023,
            StorageTier::Warm => 0.0125,
            StorageTier::Cold => 0.004,
            StorageTier::Archive => 0.00099,
        }
    }

    /// All tiers in classification order (hottest first)
    pub fn all() -> &'static [StorageTier] {
        &[
            StorageTier::Hot,
            StorageTier::Warm,
            StorageTier::Cold,
            StorageTier::Archive,
        ]
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageTier::Hot => write!(f, "HOT"),
            StorageTier::Warm => write!(f, "WARM"),
            StorageTier::Cold => write!(f, "COLD"),
            StorageTier::Archive => write!(f, "ARCHIVE"),
        }
    }
}

impl FromStr for StorageTier {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOT" => Ok(StorageTier::Hot),
            "WARM" => Ok(StorageTier::Warm),
            "COLD" => Ok(StorageTier::Cold),
            "ARCHIVE" => Ok(StorageTier::Archive),
            other => Err(crate::error::Error::ApiValidation(format!(
                "Invalid storage tier: {}. Use HOT, WARM, COLD, or ARCHIVE",
                other
            ))),
        }
    }
}

// =============================================================================
// Drive Records
// =============================================================================

/// Drive kind as reported by the telemetry collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveKind {
    Nvme,
    Ssd,
    Hdd,
    Unknown,
}

impl fmt::Display for DriveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveKind::Nvme => write!(f, "nvme"),
            DriveKind::Ssd => write!(f, "ssd"),
            DriveKind::Hdd => write!(f, "hdd"),
            DriveKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A drive with its SMART telemetry and derived health fields.
///
/// The SMART map holds raw attribute values keyed by attribute name.
/// Missing attributes are neutral, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveRecord {
    /// Drive identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Drive kind
    pub kind: DriveKind,
    /// Total capacity in bytes
    pub capacity_bytes: u64,
    /// Used capacity in bytes
    pub used_bytes: u64,
    /// Raw SMART attributes (attribute name -> value)
    pub smart: BTreeMap<String, f64>,
    /// Derived health score in [0, 100]
    pub health_score: f64,
    /// Derived risk level; always agrees with `health_score`
    pub risk_level: RiskLevel,
    /// Derived days-to-failure estimate; absent for healthy drives
    pub predicted_failure_days: Option<u32>,
    /// Last telemetry refresh
    pub last_updated: DateTime<Utc>,
}

impl DriveRecord {
    /// Fetch a SMART attribute, defaulting when absent
    pub fn smart_attr(&self, name: &str, default: f64) -> f64 {
        self.smart.get(name).copied().unwrap_or(default)
    }
}

// =============================================================================
// File Records
// =============================================================================

/// A file with its access metadata.
///
/// `tier` is the tier the file currently resides on; the recommended tier
/// is recomputed by the classifier and never written back here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// File identifier
    pub id: String,
    /// File name
    pub name: String,
    /// Full path
    pub path: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Lowercased extension without the dot
    pub extension: String,
    /// Tier the file currently resides on
    pub tier: StorageTier,
    /// Total recorded accesses
    pub access_count: u64,
    /// Last access timestamp
    pub last_accessed: DateTime<Utc>,
    /// Risk level assigned by the owning drive's criticality
    pub risk_level: RiskLevel,
}

impl FileRecord {
    /// File size in GB
    pub fn size_gb(&self) -> f64 {
        self.size_bytes as f64 / GIB as f64
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    High,
    Medium,
    Info,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Critical => write!(f, "critical"),
            AlertSeverity::High => write!(f, "high"),
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::Info => write!(f, "info"),
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(AlertSeverity::Critical),
            "high" => Ok(AlertSeverity::High),
            "medium" => Ok(AlertSeverity::Medium),
            "info" => Ok(AlertSeverity::Info),
            other => Err(crate::error::Error::ApiValidation(format!(
                "Invalid alert severity: {}",
                other
            ))),
        }
    }
}

/// A drive health alert.
///
/// The only entity with mutable persisted state: acknowledgment is a
/// one-way false -> true transition and is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Alert identifier
    pub id: String,
    /// Owning drive
    pub drive_id: String,
    /// Severity
    pub severity: AlertSeverity,
    /// Human-readable message
    pub message: String,
    /// Suggested operator action
    pub recommended_action: String,
    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
    /// Whether an operator has acknowledged this alert
    pub acknowledged: bool,
}

// =============================================================================
// Strategy Catalog
// =============================================================================

/// A named fleet-wide tiering strategy.
///
/// External configuration consumed, not computed, by the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCatalogEntry {
    /// Strategy name (e.g. "conservative")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Multiplier applied to the base storage price
    pub cost_multiplier: f64,
    /// Fraction of fleet risk this strategy removes, in [0, 1]
    pub risk_reduction: f64,
    /// Replication factor
    pub replication_factor: u32,
    /// Target cloud tier name
    pub cloud_tier: String,
    /// Compression level applied under this strategy
    pub compression: String,
}

// =============================================================================
// Cloud Options
// =============================================================================

/// A ranked cloud storage option for a tier and size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudOption {
    /// Provider name (upper-cased)
    pub provider: String,
    /// Provider-side tier name
    pub tier: String,
    /// Monthly cost per GB after currency conversion
    pub monthly_cost_per_gb: f64,
    /// Retrieval latency class (e.g. "Instant", "12 hours")
    pub retrieval_time: String,
    /// Total monthly cost for the requested size
    pub total_cost: f64,
    /// Savings versus the standard/hot baseline, percent
    pub savings_percent: f64,
}

// =============================================================================
// Helpers
// =============================================================================

/// Bytes per GiB
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Convert bytes to a human readable string
pub fn format_bytes(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

/// Round to two decimal places (monetary values)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimal places (scalarization scores)
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_health_score(85.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_health_score(80.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_health_score(65.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_health_score(45.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_health_score(10.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_health_score(-5.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_health_score(120.0), RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_monotonic() {
        // Higher score never yields a worse tier
        let rank = |r: RiskLevel| match r {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical => 3,
        };
        let mut prev = rank(RiskLevel::from_health_score(0.0));
        for i in 1..=100 {
            let cur = rank(RiskLevel::from_health_score(i as f64));
            assert!(cur <= prev, "risk worsened at score {}", i);
            prev = cur;
        }
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!("hot".parse::<StorageTier>().unwrap(), StorageTier::Hot);
        assert_eq!("ARCHIVE".parse::<StorageTier>().unwrap(), StorageTier::Archive);
        assert!("frozen".parse::<StorageTier>().is_err());
        assert_eq!(format!("{}", StorageTier::Warm), "WARM");
    }

    #[test]
    fn test_tier_unit_costs_descend() {
        let costs: Vec<f64> = StorageTier::all().iter().map(|t| t.unit_cost_per_gb()).collect();
        for pair in costs.windows(2) {
            assert!(pair[0] > pair[1], "unit costs must descend with coldness");
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(5 * GIB), "5.00 GB");
    }

    #[test]
    fn test_serde_wire_casing() {
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(serde_json::to_string(&StorageTier::Hot).unwrap(), "\"HOT\"");
        assert_eq!(serde_json::to_string(&AlertSeverity::High).unwrap(), "\"high\"");
    }
}
