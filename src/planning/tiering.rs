//! Tiering Planner
//!
//! Walks the full file collection, classifies each file's access pattern,
//! applies the drive-health override, and emits migration recommendations
//! with savings estimates, urgency, and fleet-level summary statistics.

use crate::analytics::AccessClassifier;
use crate::domain::{DriveRecord, FileRecord, GIB, RiskLevel, StorageTier, round2};
use crate::planning::{RankedStrategy, RiskTolerance, StrategyOptimizer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Thresholds
// =============================================================================

/// Drives below this health score trigger the pre-emptive HOT override
/// for CRITICAL files
const OVERRIDE_HEALTH_THRESHOLD: f64 = 50.0;

/// Drives below this health score escalate CRITICAL-file migrations to
/// IMMEDIATE
const IMMEDIATE_HEALTH_THRESHOLD: f64 = 40.0;

/// Classifier confidence above which a migration is scheduled within a week
const CONFIDENT_MIGRATION_THRESHOLD: f64 = 0.8;

/// Number of recommendations returned in the plan body
const TOP_RECOMMENDATIONS: usize = 20;

// =============================================================================
// Plan Types
// =============================================================================

/// Migration urgency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationUrgency {
    #[serde(rename = "IMMEDIATE")]
    Immediate,
    #[serde(rename = "7_DAYS")]
    SevenDays,
    #[serde(rename = "30_DAYS")]
    ThirtyDays,
}

/// A single per-file migration recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieringRecommendation {
    pub file_id: String,
    pub file_name: String,
    pub current_tier: StorageTier,
    pub recommended_tier: StorageTier,
    /// Advisory target, e.g. "AWS S3 WARM"; nothing is migrated here
    pub recommended_cloud: String,
    /// Monthly saving after currency conversion; negative when the move
    /// is protective rather than cost-driven
    pub estimated_savings: f64,
    pub migration_urgency: MigrationUrgency,
    pub reason: String,
    pub confidence: f64,
}

/// Transition counts across the emitted recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub hot_to_warm: usize,
    pub warm_to_cold: usize,
    pub cold_to_archive: usize,
    pub critical_migrations: usize,
}

/// Complete tiering plan for the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieringPlan {
    /// Count of every emitted recommendation, not just the returned top slice
    pub total_recommendations: usize,
    /// Sum of estimated savings across every recommendation
    pub total_estimated_savings: f64,
    /// Top recommendations by savings, descending
    pub recommendations: Vec<TieringRecommendation>,
    /// Ranked strategy options for the requested risk tolerance
    pub strategy_options: Vec<RankedStrategy>,
    pub summary: TransitionSummary,
}

// =============================================================================
// Tiering Planner
// =============================================================================

/// Orchestrates classification, the health override, and plan aggregation
#[derive(Debug, Clone)]
pub struct TieringPlanner {
    classifier: AccessClassifier,
    optimizer: StrategyOptimizer,
    currency_factor: f64,
}

impl TieringPlanner {
    pub fn new(classifier: AccessClassifier, optimizer: StrategyOptimizer, currency_factor: f64) -> Self {
        Self {
            classifier,
            optimizer,
            currency_factor,
        }
    }

    /// Build a tiering plan over the full file/drive collections
    pub fn plan(
        &self,
        files: &[FileRecord],
        drives: &[DriveRecord],
        tolerance: RiskTolerance,
        now: DateTime<Utc>,
    ) -> TieringPlan {
        // The override is an existence check over the fleet; which drive
        // qualifies does not affect the outcome.
        let any_drive_degraded = drives
            .iter()
            .any(|d| d.health_score < OVERRIDE_HEALTH_THRESHOLD);
        let any_drive_failing = drives
            .iter()
            .any(|d| d.health_score < IMMEDIATE_HEALTH_THRESHOLD);

        let mut recommendations = Vec::new();
        let mut total_savings = 0.0;

        for file in files {
            let pattern = self.classifier.classify(file, now);

            let overridden = any_drive_degraded && file.risk_level == RiskLevel::Critical;
            let recommended_tier = if overridden {
                StorageTier::Hot
            } else {
                pattern.tier
            };

            if recommended_tier == file.tier {
                continue;
            }

            let size_gb = file.size_bytes as f64 / GIB as f64;
            let current_cost = size_gb * file.tier.unit_cost_per_gb();
            let new_cost = size_gb * recommended_tier.unit_cost_per_gb();
            let savings = (current_cost - new_cost) * self.currency_factor;

            let urgency = if file.risk_level == RiskLevel::Critical && any_drive_failing {
                MigrationUrgency::Immediate
            } else if pattern.confidence > CONFIDENT_MIGRATION_THRESHOLD {
                MigrationUrgency::SevenDays
            } else {
                MigrationUrgency::ThirtyDays
            };

            let reason = if overridden {
                "Pre-emptive migration: critical file while fleet has a degraded drive".to_string()
            } else {
                format!(
                    "Access pattern: {:.0}% frequency, {:.0}% recency",
                    pattern.frequency_score * 100.0,
                    pattern.recency_score * 100.0
                )
            };

            total_savings += savings;
            recommendations.push(TieringRecommendation {
                file_id: file.id.clone(),
                file_name: file.name.clone(),
                current_tier: file.tier,
                recommended_tier,
                recommended_cloud: format!("AWS S3 {}", recommended_tier),
                estimated_savings: round2(savings),
                migration_urgency: urgency,
                reason,
                confidence: pattern.confidence,
            });
        }

        debug!(
            total = recommendations.len(),
            %tolerance,
            "built tiering plan"
        );

        let summary = summarize(&recommendations);
        let total_recommendations = recommendations.len();

        let total_fleet_gb: f64 = files.iter().map(|f| f.size_bytes as f64).sum::<f64>() / GIB as f64;
        let strategy_options = self.optimizer.rank(total_fleet_gb, tolerance);

        recommendations
            .sort_by(|a, b| a.estimated_savings.total_cmp(&b.estimated_savings).reverse());
        recommendations.truncate(TOP_RECOMMENDATIONS);

        TieringPlan {
            total_recommendations,
            total_estimated_savings: round2(total_savings),
            recommendations,
            strategy_options,
            summary,
        }
    }
}

fn summarize(recommendations: &[TieringRecommendation]) -> TransitionSummary {
    let count = |from: StorageTier, to: StorageTier| {
        recommendations
            .iter()
            .filter(|r| r.current_tier == from && r.recommended_tier == to)
            .count()
    };

    TransitionSummary {
        hot_to_warm: count(StorageTier::Hot, StorageTier::Warm),
        warm_to_cold: count(StorageTier::Warm, StorageTier::Cold),
        cold_to_archive: count(StorageTier::Cold, StorageTier::Archive),
        critical_migrations: recommendations
            .iter()
            .filter(|r| r.migration_urgency == MigrationUrgency::Immediate)
            .count(),
    }
}
