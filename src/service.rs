//! Advisor Service
//!
//! Facade wiring the inventory port to the pure decision components.
//! REST handlers call into this layer only; every method recomputes its
//! result from current records, so repeated calls over unchanged inputs
//! return identical bodies.

use crate::analytics::{
    AccessClassifier, AccessPattern, CompressionAdvisor, CompressionEstimate, FailurePredictor,
    HealthFactor, HealthScorer,
};
use crate::config::Settings;
use crate::domain::{
    Alert, AlertSeverity, CloudOption, DriveRecord, FileRecord, InventoryRef, RiskLevel,
    StorageTier, format_bytes, round2,
};
use crate::error::Result;
use crate::planning::{CloudPricer, RiskTolerance, StrategyOptimizer, TieringPlan, TieringPlanner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

// =============================================================================
// Report Types
// =============================================================================

/// On-demand health analysis for one drive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveHealthReport {
    pub drive_id: String,
    pub health_score: f64,
    pub risk_level: RiskLevel,
    pub predicted_failure_days: Option<u32>,
    /// Per-attribute penalty breakdown, largest impact first
    pub top_factors: Vec<HealthFactor>,
    pub recommendations: Vec<String>,
}

/// File detail with per-file analyses attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDetail {
    #[serde(flatten)]
    pub file: FileRecord,
    pub access_analysis: AccessPattern,
    pub compression_analysis: CompressionEstimate,
    pub size_formatted: String,
}

/// One entry of the fleet-wide compression sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCompressionRecommendation {
    pub file_id: String,
    pub file_name: String,
    #[serde(flatten)]
    pub estimate: CompressionEstimate,
}

/// Fleet-wide compression sweep result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionSweep {
    pub total_recommendations: usize,
    pub total_monthly_savings: f64,
    pub total_size_reduction: String,
    /// Top recommendations by ROI, descending
    pub recommendations: Vec<FileCompressionRecommendation>,
}

/// Capacity rollup for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSummary {
    pub total_capacity_bytes: u64,
    pub total_used_bytes: u64,
    pub utilization_percent: f64,
    pub total_files: usize,
}

/// Fleet health rollup for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    pub average_health_score: f64,
    pub critical_drives: usize,
    pub high_risk_drives: usize,
    pub healthy_drives: usize,
}

/// Per-tier slice of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSlice {
    pub files: usize,
    pub size_gb: f64,
}

/// Unacknowledged alert rollup for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub items: Vec<Alert>,
}

/// Dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub storage_summary: StorageSummary,
    pub health_summary: HealthSummary,
    pub tier_distribution: BTreeMap<String, TierSlice>,
    pub alerts: AlertSummary,
}

/// Result of a simulated plan application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedApply {
    pub status: String,
    pub message: String,
    pub plan_id: String,
    pub simulated_actions: SimulatedActions,
}

/// Advisory action summary; nothing is executed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedActions {
    pub files_migrated: usize,
    pub estimated_time_minutes: u64,
    pub cost_savings: f64,
}

/// Number of compression-sweep entries returned
const TOP_COMPRESSION_RECOMMENDATIONS: usize = 15;

/// Simulated migration time per file, minutes
const SIMULATED_MINUTES_PER_FILE: u64 = 2;

// =============================================================================
// Advisor Service
// =============================================================================

/// Wires the inventory to the decision components
pub struct AdvisorService {
    inventory: InventoryRef,
    settings: Settings,
    scorer: HealthScorer,
    predictor: FailurePredictor,
    classifier: AccessClassifier,
    advisor: CompressionAdvisor,
    pricer: CloudPricer,
    planner: TieringPlanner,
}

impl AdvisorService {
    /// Build a service from an inventory and settings
    pub fn new(inventory: InventoryRef, settings: Settings) -> Self {
        let pricing = settings.pricing.clone();
        let classifier = AccessClassifier::new();
        let optimizer =
            StrategyOptimizer::new(settings.strategy_catalog.clone(), pricing.clone());

        Self {
            inventory,
            scorer: HealthScorer::new(),
            predictor: FailurePredictor::new(),
            classifier,
            advisor: CompressionAdvisor::new(pricing.clone()),
            pricer: CloudPricer::new(settings.cloud_pricing.clone(), pricing.clone()),
            planner: TieringPlanner::new(classifier, optimizer, pricing.currency_factor),
            settings,
        }
    }

    /// Configured settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // =========================================================================
    // Drives
    // =========================================================================

    pub async fn drives(&self) -> Result<Vec<DriveRecord>> {
        self.inventory.drives().await
    }

    pub async fn drive(&self, id: &str) -> Result<DriveRecord> {
        self.inventory.drive(id).await
    }

    /// Recompute the health analysis for one drive from its SMART map
    pub async fn drive_health(&self, id: &str) -> Result<DriveHealthReport> {
        let drive = self.inventory.drive(id).await?;
        let assessment = self.scorer.assess(&drive.smart);
        let predicted = self.predictor.predict(assessment.health_score, &drive.smart);

        Ok(DriveHealthReport {
            drive_id: drive.id,
            health_score: assessment.health_score,
            risk_level: assessment.risk_level,
            predicted_failure_days: predicted,
            recommendations: assessment
                .recommendations()
                .into_iter()
                .map(String::from)
                .collect(),
            top_factors: assessment.factors,
        })
    }

    // =========================================================================
    // Files
    // =========================================================================

    pub async fn files(&self, tier: Option<StorageTier>) -> Result<Vec<FileRecord>> {
        self.inventory.files(tier).await
    }

    /// File detail with access and compression analyses attached
    pub async fn file_detail(&self, id: &str, now: DateTime<Utc>) -> Result<FileDetail> {
        let file = self.inventory.file(id).await?;
        let access_analysis = self.classifier.classify(&file, now);
        let compression_analysis = self.advisor.estimate(&file);
        let size_formatted = format_bytes(file.size_bytes);

        Ok(FileDetail {
            file,
            access_analysis,
            compression_analysis,
            size_formatted,
        })
    }

    // =========================================================================
    // Planning
    // =========================================================================

    /// Build a fleet-wide tiering plan
    pub async fn tiering_plan(
        &self,
        tolerance: RiskTolerance,
        now: DateTime<Utc>,
    ) -> Result<TieringPlan> {
        let files = self.inventory.files(None).await?;
        let drives = self.inventory.drives().await?;
        let plan = self.planner.plan(&files, &drives, tolerance, now);
        info!(
            recommendations = plan.total_recommendations,
            savings = plan.total_estimated_savings,
            "generated tiering plan"
        );
        Ok(plan)
    }

    /// Sweep the fleet for compression candidates.
    ///
    /// `min_roi` defaults to the configured ROI threshold.
    pub async fn compression_sweep(&self, min_roi: Option<f64>) -> Result<CompressionSweep> {
        let min_roi = min_roi.unwrap_or(self.settings.pricing.roi_threshold);
        let files = self.inventory.files(None).await?;

        let mut recommendations = Vec::new();
        let mut total_savings = 0.0;
        let mut total_size_reduction: u64 = 0;

        for file in &files {
            let estimate = self.advisor.estimate(file);
            if estimate.recommend && estimate.roi_score >= min_roi {
                total_savings += estimate.monthly_savings;
                total_size_reduction += estimate.current_size - estimate.compressed_size;
                recommendations.push(FileCompressionRecommendation {
                    file_id: file.id.clone(),
                    file_name: file.name.clone(),
                    estimate,
                });
            }
        }

        let total_recommendations = recommendations.len();
        recommendations
            .sort_by(|a, b| a.estimate.roi_score.total_cmp(&b.estimate.roi_score).reverse());
        recommendations.truncate(TOP_COMPRESSION_RECOMMENDATIONS);

        Ok(CompressionSweep {
            total_recommendations,
            total_monthly_savings: round2(total_savings),
            total_size_reduction: format_bytes(total_size_reduction),
            recommendations,
        })
    }

    /// Ranked cloud options for a tier and size
    pub fn cloud_options(&self, tier: StorageTier, size_gb: f64) -> Vec<CloudOption> {
        self.pricer.options(tier, size_gb)
    }

    // =========================================================================
    // Alerts
    // =========================================================================

    pub async fn alerts(&self, severity: Option<AlertSeverity>) -> Result<Vec<Alert>> {
        self.inventory.alerts(severity).await
    }

    pub async fn acknowledge_alert(&self, id: &str) -> Result<Alert> {
        let alert = self.inventory.acknowledge_alert(id).await?;
        info!(alert_id = %alert.id, "alert acknowledged");
        Ok(alert)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Aggregate fleet overview
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let drives = self.inventory.drives().await?;
        let files = self.inventory.files(None).await?;
        let alerts = self.inventory.alerts(None).await?;

        let total_capacity: u64 = drives.iter().map(|d| d.capacity_bytes).sum();
        let total_used: u64 = drives.iter().map(|d| d.used_bytes).sum();
        let utilization = if total_capacity > 0 {
            total_used as f64 / total_capacity as f64 * 100.0
        } else {
            0.0
        };

        let average_health = if drives.is_empty() {
            0.0
        } else {
            drives.iter().map(|d| d.health_score).sum::<f64>() / drives.len() as f64
        };
        let critical_drives = drives
            .iter()
            .filter(|d| d.risk_level == RiskLevel::Critical)
            .count();
        let high_risk_drives = drives
            .iter()
            .filter(|d| d.risk_level == RiskLevel::High)
            .count();

        let mut tier_distribution: BTreeMap<String, TierSlice> = BTreeMap::new();
        for file in &files {
            let slice = tier_distribution
                .entry(file.tier.to_string())
                .or_insert(TierSlice { files: 0, size_gb: 0.0 });
            slice.files += 1;
            slice.size_gb += file.size_gb();
        }
        for slice in tier_distribution.values_mut() {
            slice.size_gb = round2(slice.size_gb);
        }

        let unacknowledged: Vec<Alert> =
            alerts.into_iter().filter(|a| !a.acknowledged).collect();
        let alert_summary = AlertSummary {
            total: unacknowledged.len(),
            critical: unacknowledged
                .iter()
                .filter(|a| a.severity == AlertSeverity::Critical)
                .count(),
            high: unacknowledged
                .iter()
                .filter(|a| a.severity == AlertSeverity::High)
                .count(),
            items: unacknowledged,
        };

        Ok(DashboardSummary {
            storage_summary: StorageSummary {
                total_capacity_bytes: total_capacity,
                total_used_bytes: total_used,
                utilization_percent: round2(utilization),
                total_files: files.len(),
            },
            health_summary: HealthSummary {
                average_health_score: round2(average_health),
                critical_drives,
                high_risk_drives,
                healthy_drives: drives.len() - critical_drives - high_risk_drives,
            },
            tier_distribution,
            alerts: alert_summary,
        })
    }

    // =========================================================================
    // Simulated Execution
    // =========================================================================

    /// Simulate applying the current tiering plan. Advisory only.
    pub async fn apply_plan(&self, plan_id: &str, now: DateTime<Utc>) -> Result<SimulatedApply> {
        let plan = self.tiering_plan(RiskTolerance::Balanced, now).await?;

        Ok(SimulatedApply {
            status: "simulated".into(),
            message: "Tiering plan execution simulated; no data was moved".into(),
            plan_id: plan_id.to_string(),
            simulated_actions: SimulatedActions {
                files_migrated: plan.total_recommendations,
                estimated_time_minutes: plan.total_recommendations as u64
                    * SIMULATED_MINUTES_PER_FILE,
                cost_savings: plan.total_estimated_savings,
            },
        })
    }

    /// Export a lifecycle policy document for a provider
    pub fn lifecycle_policy(&self, provider: &str) -> serde_json::Value {
        if provider.eq_ignore_ascii_case("aws") {
            serde_json::json!({
                "Rules": [
                    {
                        "ID": "sentinel-hot-to-warm",
                        "Status": "Enabled",
                        "Filter": { "Prefix": "" },
                        "Transitions": [
                            { "Days": 30, "StorageClass": "INTELLIGENT_TIERING" }
                        ]
                    },
                    {
                        "ID": "sentinel-warm-to-cold",
                        "Status": "Enabled",
                        "Filter": { "Prefix": "archive/" },
                        "Transitions": [
                            { "Days": 90, "StorageClass": "GLACIER_IR" }
                        ]
                    },
                    {
                        "ID": "sentinel-cold-to-deep",
                        "Status": "Enabled",
                        "Filter": { "Prefix": "deep-archive/" },
                        "Transitions": [
                            { "Days": 365, "StorageClass": "DEEP_ARCHIVE" }
                        ]
                    }
                ]
            })
        } else {
            serde_json::json!({
                "message": format!("Lifecycle policy for {} not yet implemented", provider)
            })
        }
    }
}
