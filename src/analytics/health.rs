//! Drive Health Scoring
//!
//! Turns raw SMART attributes into a 0-100 health score, a risk level,
//! and an optional days-to-failure estimate. The model is a fixed set of
//! independently-capped linear penalty terms over named attributes; there
//! is no training infrastructure behind it.

use crate::domain::{RiskLevel, round2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// =============================================================================
// SMART Attribute Names
// =============================================================================

pub const ATTR_REALLOCATED_SECTORS: &str = "reallocated_sector_ct";
pub const ATTR_SEEK_ERROR_RATE: &str = "seek_error_rate";
pub const ATTR_POWER_ON_HOURS: &str = "power_on_hours";
pub const ATTR_RAW_READ_ERROR_RATE: &str = "raw_read_error_rate";
pub const ATTR_UDMA_CRC_ERRORS: &str = "udma_crc_errors";
pub const ATTR_PENDING_SECTORS: &str = "pending_sectors";

// =============================================================================
// Assessment Result
// =============================================================================

/// One penalty term's contribution to the health score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthFactor {
    /// SMART attribute the penalty is derived from
    pub attribute: String,
    /// Penalty applied to the base score (negative or zero)
    pub penalty: f64,
}

/// Complete health assessment for one drive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Health score in [0, 100]
    pub health_score: f64,
    /// Risk level; a pure function of the score
    pub risk_level: RiskLevel,
    /// Per-attribute penalty breakdown, largest impact first
    pub factors: Vec<HealthFactor>,
}

impl HealthAssessment {
    /// Operator actions suggested by the score band
    pub fn recommendations(&self) -> Vec<&'static str> {
        let score = self.health_score;
        vec![
            if score < 50.0 {
                "Schedule backup within 7 days"
            } else {
                "Monitor closely"
            },
            if score < 70.0 {
                "Enable cloud sync for critical files"
            } else {
                "Standard monitoring"
            },
            if score < 40.0 {
                "Consider drive replacement"
            } else {
                "No immediate action needed"
            },
        ]
    }
}

// =============================================================================
// Health Scorer
// =============================================================================

/// Scores drive health from SMART attributes.
///
/// Starts at 100.0 and applies five independently-capped linear penalties.
/// Missing attributes default to 0, except `seek_error_rate` which defaults
/// to 100 (its raw value is higher-is-better and gets inverted).
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScorer;

impl HealthScorer {
    pub fn new() -> Self {
        Self
    }

    /// Assess one drive's SMART map
    pub fn assess(&self, smart: &BTreeMap<String, f64>) -> HealthAssessment {
        let get = |name: &str, default: f64| smart.get(name).copied().unwrap_or(default);

        let reallocated = get(ATTR_REALLOCATED_SECTORS, 0.0);
        let seek_error = 100.0 - get(ATTR_SEEK_ERROR_RATE, 100.0);
        let power_on = get(ATTR_POWER_ON_HOURS, 0.0);
        let read_error = get(ATTR_RAW_READ_ERROR_RATE, 0.0);
        let udma_errors = get(ATTR_UDMA_CRC_ERRORS, 0.0);

        let mut factors = vec![
            HealthFactor {
                attribute: ATTR_REALLOCATED_SECTORS.into(),
                penalty: -0.35 * (reallocated * 2.0).min(50.0),
            },
            HealthFactor {
                attribute: ATTR_SEEK_ERROR_RATE.into(),
                penalty: -0.25 * seek_error,
            },
            HealthFactor {
                attribute: ATTR_POWER_ON_HOURS.into(),
                penalty: -0.15 * (power_on / 1000.0).min(30.0),
            },
            HealthFactor {
                attribute: ATTR_RAW_READ_ERROR_RATE.into(),
                penalty: -0.15 * (read_error / 10.0).min(30.0),
            },
            HealthFactor {
                attribute: ATTR_UDMA_CRC_ERRORS.into(),
                penalty: -0.10 * (udma_errors * 5.0).min(25.0),
            },
        ];

        let score = 100.0 + factors.iter().map(|f| f.penalty).sum::<f64>();
        // Round before deriving the risk level so score and level can
        // never disagree at a threshold boundary.
        let score = round2(score.clamp(0.0, 100.0));
        let risk_level = RiskLevel::from_health_score(score);

        factors.sort_by(|a, b| a.penalty.abs().total_cmp(&b.penalty.abs()).reverse());

        debug!(score, %risk_level, "assessed drive health");

        HealthAssessment {
            health_score: score,
            risk_level,
            factors,
        }
    }
}

// =============================================================================
// Failure Predictor
// =============================================================================

/// Estimates days until failure for degraded drives.
///
/// Healthy drives (score >= 80) get no prediction. Otherwise a base
/// horizon is selected by score band and reduced by the sector
/// degradation rate, floored at one day. The base horizon is only a
/// ceiling when degradation is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailurePredictor;

impl FailurePredictor {
    pub fn new() -> Self {
        Self
    }

    /// Predict days to failure from a health score and SMART map
    pub fn predict(&self, health_score: f64, smart: &BTreeMap<String, f64>) -> Option<u32> {
        if health_score >= 80.0 {
            return None;
        }

        let base_days: f64 = if health_score < 30.0 {
            7.0
        } else if health_score < 50.0 {
            14.0
        } else if health_score < 70.0 {
            45.0
        } else {
            90.0
        };

        let reallocated = smart.get(ATTR_REALLOCATED_SECTORS).copied().unwrap_or(0.0);
        let pending = smart.get(ATTR_PENDING_SECTORS).copied().unwrap_or(0.0);
        let degradation = reallocated * 0.5 + pending * 0.3;

        let predicted = (base_days - degradation).max(1.0) as u32;
        Some(predicted.max(1))
    }
}
