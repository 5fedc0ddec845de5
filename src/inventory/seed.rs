//! Sample Fleet
//!
//! Deterministic seed data standing in for a real telemetry collector.
//! Drive health fields are derived through the scorer at seed time so the
//! stored score, risk level, and failure estimate always agree.

use crate::analytics::{
    ATTR_PENDING_SECTORS, ATTR_POWER_ON_HOURS, ATTR_RAW_READ_ERROR_RATE,
    ATTR_REALLOCATED_SECTORS, ATTR_SEEK_ERROR_RATE, ATTR_UDMA_CRC_ERRORS, FailurePredictor,
    HealthScorer,
};
use crate::domain::{
    Alert, AlertSeverity, DriveKind, DriveRecord, FileRecord, GIB, RiskLevel, StorageTier,
};
use crate::inventory::InMemoryInventory;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Build the sample inventory relative to a reference time
pub fn sample_inventory(now: DateTime<Utc>) -> InMemoryInventory {
    InMemoryInventory::new(sample_drives(now), sample_files(now), sample_alerts(now))
}

// =============================================================================
// Drives
// =============================================================================

struct DriveSeed {
    id: &'static str,
    name: &'static str,
    kind: DriveKind,
    capacity_gb: u64,
    used_gb: u64,
    reallocated: f64,
    seek_error_rate: f64,
    power_on_hours: f64,
    read_error_rate: f64,
    udma_crc_errors: f64,
    pending_sectors: f64,
}

fn sample_drives(now: DateTime<Utc>) -> Vec<DriveRecord> {
    let seeds = [
        DriveSeed {
            id: "drive-001",
            name: "Samsung 990 PRO 2TB",
            kind: DriveKind::Nvme,
            capacity_gb: 2000,
            used_gb: 820,
            reallocated: 0.0,
            seek_error_rate: 100.0,
            power_on_hours: 8_000.0,
            read_error_rate: 0.0,
            udma_crc_errors: 0.0,
            pending_sectors: 0.0,
        },
        DriveSeed {
            id: "drive-002",
            name: "WD Black SN850X 4TB",
            kind: DriveKind::Nvme,
            capacity_gb: 4000,
            used_gb: 3100,
            reallocated: 0.0,
            seek_error_rate: 99.0,
            power_on_hours: 15_000.0,
            read_error_rate: 10.0,
            udma_crc_errors: 0.0,
            pending_sectors: 0.0,
        },
        DriveSeed {
            id: "drive-003",
            name: "Samsung 870 EVO 2TB",
            kind: DriveKind::Ssd,
            capacity_gb: 2000,
            used_gb: 1750,
            reallocated: 20.0,
            seek_error_rate: 92.0,
            power_on_hours: 30_000.0,
            read_error_rate: 40.0,
            udma_crc_errors: 1.0,
            pending_sectors: 2.0,
        },
        DriveSeed {
            id: "drive-004",
            name: "Seagate IronWolf 8TB",
            kind: DriveKind::Hdd,
            capacity_gb: 8000,
            used_gb: 6900,
            reallocated: 25.0,
            seek_error_rate: 45.0,
            power_on_hours: 52_000.0,
            read_error_rate: 250.0,
            udma_crc_errors: 6.0,
            pending_sectors: 8.0,
        },
        DriveSeed {
            id: "drive-005",
            name: "WD Red Pro 12TB",
            kind: DriveKind::Hdd,
            capacity_gb: 12_000,
            used_gb: 10_400,
            reallocated: 200.0,
            seek_error_rate: 5.0,
            power_on_hours: 65_000.0,
            read_error_rate: 800.0,
            udma_crc_errors: 40.0,
            pending_sectors: 35.0,
        },
    ];

    let scorer = HealthScorer::new();
    let predictor = FailurePredictor::new();

    seeds
        .into_iter()
        .map(|seed| {
            let mut smart = BTreeMap::new();
            smart.insert(ATTR_REALLOCATED_SECTORS.to_string(), seed.reallocated);
            smart.insert(ATTR_SEEK_ERROR_RATE.to_string(), seed.seek_error_rate);
            smart.insert(ATTR_POWER_ON_HOURS.to_string(), seed.power_on_hours);
            smart.insert(ATTR_RAW_READ_ERROR_RATE.to_string(), seed.read_error_rate);
            smart.insert(ATTR_UDMA_CRC_ERRORS.to_string(), seed.udma_crc_errors);
            smart.insert(ATTR_PENDING_SECTORS.to_string(), seed.pending_sectors);

            let assessment = scorer.assess(&smart);
            let predicted = predictor.predict(assessment.health_score, &smart);

            DriveRecord {
                id: seed.id.into(),
                name: seed.name.into(),
                kind: seed.kind,
                capacity_bytes: seed.capacity_gb * GIB,
                used_bytes: seed.used_gb * GIB,
                smart,
                health_score: assessment.health_score,
                risk_level: assessment.risk_level,
                predicted_failure_days: predicted,
                last_updated: now - Duration::minutes(5),
            }
        })
        .collect()
}

// =============================================================================
// Files
// =============================================================================

fn sample_files(now: DateTime<Utc>) -> Vec<FileRecord> {
    struct FileSeed {
        id: &'static str,
        name: &'static str,
        path: &'static str,
        size_gb_tenths: u64,
        extension: &'static str,
        tier: StorageTier,
        access_count: u64,
        days_since_access: i64,
        risk: RiskLevel,
    }

    let seeds = [
        FileSeed {
            id: "file-001",
            name: "orders.db",
            path: "/srv/db/orders.db",
            size_gb_tenths: 18,
            extension: "bin",
            tier: StorageTier::Hot,
            access_count: 4200,
            days_since_access: 0,
            risk: RiskLevel::Critical,
        },
        FileSeed {
            id: "file-002",
            name: "app-server.log",
            path: "/var/log/app-server.log",
            size_gb_tenths: 120,
            extension: "log",
            tier: StorageTier::Hot,
            access_count: 30,
            days_since_access: 45,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-003",
            name: "analytics-2025.csv",
            path: "/data/exports/analytics-2025.csv",
            size_gb_tenths: 84,
            extension: "csv",
            tier: StorageTier::Warm,
            access_count: 12,
            days_since_access: 210,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-004",
            name: "training-set.parquet",
            path: "/data/ml/training-set.parquet",
            size_gb_tenths: 95,
            extension: "parquet",
            tier: StorageTier::Warm,
            access_count: 350,
            days_since_access: 9,
            risk: RiskLevel::Medium,
        },
        FileSeed {
            id: "file-005",
            name: "q3-review.pptx",
            path: "/share/decks/q3-review.pptx",
            size_gb_tenths: 2,
            extension: "pptx",
            tier: StorageTier::Hot,
            access_count: 5,
            days_since_access: 160,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-006",
            name: "holiday-cut.mp4",
            path: "/media/raw/holiday-cut.mp4",
            size_gb_tenths: 460,
            extension: "mp4",
            tier: StorageTier::Warm,
            access_count: 2,
            days_since_access: 300,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-007",
            name: "backup-2024.tar",
            path: "/backup/backup-2024.tar",
            size_gb_tenths: 900,
            extension: "tar",
            tier: StorageTier::Cold,
            access_count: 0,
            days_since_access: 420,
            risk: RiskLevel::Critical,
        },
        FileSeed {
            id: "file-008",
            name: "packet-capture.pcap",
            path: "/sec/captures/packet-capture.pcap",
            size_gb_tenths: 66,
            extension: "pcap",
            tier: StorageTier::Cold,
            access_count: 3,
            days_since_access: 250,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-009",
            name: "site-export.html",
            path: "/www/archive/site-export.html",
            size_gb_tenths: 4,
            extension: "html",
            tier: StorageTier::Warm,
            access_count: 80,
            days_since_access: 30,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-010",
            name: "customer-events.json",
            path: "/data/streams/customer-events.json",
            size_gb_tenths: 52,
            extension: "json",
            tier: StorageTier::Hot,
            access_count: 900,
            days_since_access: 2,
            risk: RiskLevel::High,
        },
        FileSeed {
            id: "file-011",
            name: "mailbox.pst",
            path: "/users/legal/mailbox.pst",
            size_gb_tenths: 110,
            extension: "pst",
            tier: StorageTier::Cold,
            access_count: 1,
            days_since_access: 380,
            risk: RiskLevel::Medium,
        },
        FileSeed {
            id: "file-012",
            name: "renders.zip",
            path: "/media/renders/renders.zip",
            size_gb_tenths: 230,
            extension: "zip",
            tier: StorageTier::Archive,
            access_count: 0,
            days_since_access: 500,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-013",
            name: "schema-dump.sql",
            path: "/srv/db/schema-dump.sql",
            size_gb_tenths: 7,
            extension: "sql",
            tier: StorageTier::Warm,
            access_count: 45,
            days_since_access: 90,
            risk: RiskLevel::Medium,
        },
        FileSeed {
            id: "file-014",
            name: "team-photo.jpg",
            path: "/share/photos/team-photo.jpg",
            size_gb_tenths: 1,
            extension: "jpg",
            tier: StorageTier::Hot,
            access_count: 250,
            days_since_access: 12,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-015",
            name: "metrics-archive.xml",
            path: "/data/legacy/metrics-archive.xml",
            size_gb_tenths: 38,
            extension: "xml",
            tier: StorageTier::Cold,
            access_count: 4,
            days_since_access: 330,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-016",
            name: "install-bundle.exe",
            path: "/dist/install-bundle.exe",
            size_gb_tenths: 15,
            extension: "exe",
            tier: StorageTier::Warm,
            access_count: 60,
            days_since_access: 75,
            risk: RiskLevel::Low,
        },
        FileSeed {
            id: "file-017",
            name: "audit-trail.txt",
            path: "/sec/audit/audit-trail.txt",
            size_gb_tenths: 29,
            extension: "txt",
            tier: StorageTier::Cold,
            access_count: 8,
            days_since_access: 190,
            risk: RiskLevel::High,
        },
        FileSeed {
            id: "file-018",
            name: "model-weights.pkl",
            path: "/data/ml/model-weights.pkl",
            size_gb_tenths: 74,
            extension: "pkl",
            tier: StorageTier::Archive,
            access_count: 15,
            days_since_access: 60,
            risk: RiskLevel::Medium,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| FileRecord {
            id: seed.id.into(),
            name: seed.name.into(),
            path: seed.path.into(),
            size_bytes: seed.size_gb_tenths * GIB / 10,
            extension: seed.extension.into(),
            tier: seed.tier,
            access_count: seed.access_count,
            last_accessed: now - Duration::days(seed.days_since_access),
            risk_level: seed.risk,
        })
        .collect()
}

// =============================================================================
// Alerts
// =============================================================================

fn sample_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let alert = |id: &str,
                 drive_id: &str,
                 severity: AlertSeverity,
                 message: &str,
                 action: &str,
                 hours_ago: i64| Alert {
        id: id.into(),
        drive_id: drive_id.into(),
        severity,
        message: message.into(),
        recommended_action: action.into(),
        timestamp: now - Duration::hours(hours_ago),
        acknowledged: false,
    };

    vec![
        alert(
            "alert-001",
            "drive-005",
            AlertSeverity::Critical,
            "Reallocated sector count rising rapidly (200 sectors)",
            "Back up contents and replace the drive",
            2,
        ),
        alert(
            "alert-002",
            "drive-005",
            AlertSeverity::High,
            "Seek error rate degraded below 10%",
            "Schedule drive replacement",
            8,
        ),
        alert(
            "alert-003",
            "drive-004",
            AlertSeverity::High,
            "Pending sector count above threshold",
            "Run an extended SMART self-test",
            26,
        ),
        alert(
            "alert-004",
            "drive-003",
            AlertSeverity::Medium,
            "Reallocated sectors detected",
            "Monitor reallocation trend weekly",
            72,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_drive_invariants() {
        for drive in sample_drives(reference_now()) {
            assert!(drive.health_score >= 0.0 && drive.health_score <= 100.0);
            // Stored risk always agrees with the stored score
            assert_eq!(drive.risk_level, RiskLevel::from_health_score(drive.health_score));
            // Healthy drives carry no failure estimate
            if drive.health_score >= 80.0 {
                assert_eq!(drive.predicted_failure_days, None);
            } else {
                assert!(drive.predicted_failure_days.unwrap() >= 1);
            }
            assert!(drive.used_bytes <= drive.capacity_bytes);
        }
    }

    #[test]
    fn test_fleet_spans_risk_bands() {
        let drives = sample_drives(reference_now());
        assert!(drives.iter().any(|d| d.risk_level == RiskLevel::Low));
        assert!(drives.iter().any(|d| d.risk_level == RiskLevel::Medium));
        assert!(drives.iter().any(|d| d.risk_level == RiskLevel::High));
        // At least one drive degraded enough to trigger the HOT override
        assert!(drives.iter().any(|d| d.health_score < 50.0));
    }

    #[test]
    fn test_files_span_tiers() {
        let files = sample_files(reference_now());
        for tier in StorageTier::all() {
            assert!(files.iter().any(|f| f.tier == *tier), "missing tier {}", tier);
        }
        assert!(files.iter().any(|f| f.risk_level == RiskLevel::Critical));
        // Extensions stay lowercased
        assert!(files.iter().all(|f| f.extension == f.extension.to_lowercase()));
    }

    #[test]
    fn test_alerts_reference_known_drives() {
        let drives = sample_drives(reference_now());
        for alert in sample_alerts(reference_now()) {
            assert!(drives.iter().any(|d| d.id == alert.drive_id));
            assert!(!alert.acknowledged);
        }
    }
}
