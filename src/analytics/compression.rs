//! Compression Cost/Benefit Estimation
//!
//! Heuristic advisor: looks up a per-extension compressibility ratio,
//! picks an algorithm/speed profile by ratio band, and gates the
//! recommendation on storage-savings ROI versus compute cost. Advisory
//! only; no data is compressed here.

use crate::config::PricingSettings;
use crate::domain::{FileRecord, GIB, round2};
use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Ratio below which a file is considered already compressed
pub const MIN_COMPRESSIBLE_RATIO: f64 = 0.20;

/// Base compression throughput, GB per hour at speed factor 1.0
const BASE_THROUGHPUT_GB_PER_HOUR: f64 = 2.0;

/// ROI reported when compute cost is effectively zero.
///
/// Sentinel meaning "unbounded": always above any configured threshold,
/// so the recommendation gate passes whenever the ratio does.
pub const ROI_UNBOUNDED: f64 = 999.0;

/// Expected compressibility ratio for an extension.
///
/// The ratio is the fraction of the file the algorithm is expected to
/// remove. Unknown extensions get a pessimistic default.
pub fn compressibility(extension: &str) -> f64 {
    match extension {
        "txt" => 0.75,
        "csv" => 0.72,
        "json" => 0.70,
        "sql" => 0.68,
        "log" => 0.80,
        "xml" => 0.78,
        "yaml" => 0.60,
        "html" => 0.65,
        "pdf" => 0.40,
        "docx" => 0.35,
        "xlsx" => 0.30,
        "pptx" => 0.25,
        "jpg" | "jpeg" => 0.02,
        "png" => 0.03,
        "mp4" => 0.02,
        "zip" => 0.01,
        "gz" => 0.01,
        "tar" => 0.05,
        "exe" => 0.08,
        "bin" => 0.10,
        "apk" => 0.08,
        "pkl" => 0.15,
        "parquet" => 0.55,
        "pbix" => 0.20,
        "fig" => 0.10,
        "pcap" => 0.45,
        "pst" => 0.20,
        _ => 0.15,
    }
}

/// Algorithm and relative speed for a compressibility band
fn algorithm_for_ratio(ratio: f64) -> (&'static str, f64) {
    if ratio > 0.70 {
        ("zstd-19", 0.5)
    } else if ratio > 0.50 {
        ("zstd-11", 1.0)
    } else {
        ("gzip-9", 2.0)
    }
}

// =============================================================================
// Estimate Result
// =============================================================================

/// Compression estimate for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionEstimate {
    /// Whether compressing this file is worth it
    pub recommend: bool,
    /// Chosen algorithm; absent when the file is not worth compressing
    pub algorithm: Option<String>,
    /// Expected compressibility ratio
    pub compression_ratio: f64,
    /// Size before compression, bytes
    pub current_size: u64,
    /// Projected size after compression, bytes
    pub compressed_size: u64,
    /// Projected job duration, minutes
    pub compression_time_minutes: u64,
    /// Projected monthly storage savings after currency conversion
    pub monthly_savings: f64,
    /// Projected one-off compute cost after currency conversion
    pub compute_cost: f64,
    /// Savings-to-cost multiple; `ROI_UNBOUNDED` when cost is ~0
    pub roi_score: f64,
    /// Human-readable justification
    pub reason: String,
}

// =============================================================================
// Compression Advisor
// =============================================================================

/// Estimates compression benefit per file.
///
/// Pricing constants and the ROI threshold come from configuration; the
/// advisor itself holds no tunable domain logic.
#[derive(Debug, Clone)]
pub struct CompressionAdvisor {
    pricing: PricingSettings,
}

impl CompressionAdvisor {
    pub fn new(pricing: PricingSettings) -> Self {
        Self { pricing }
    }

    /// Estimate the cost/benefit of compressing one file
    pub fn estimate(&self, file: &FileRecord) -> CompressionEstimate {
        let ratio = compressibility(&file.extension);

        if ratio < MIN_COMPRESSIBLE_RATIO {
            return CompressionEstimate {
                recommend: false,
                algorithm: None,
                compression_ratio: ratio,
                current_size: file.size_bytes,
                compressed_size: file.size_bytes,
                compression_time_minutes: 0,
                monthly_savings: 0.0,
                compute_cost: 0.0,
                roi_score: 0.0,
                reason: "Already compressed or low compressibility".into(),
            };
        }

        let (algorithm, speed_factor) = algorithm_for_ratio(ratio);

        let current_size = file.size_bytes;
        let compressed_size = (current_size as f64 * (1.0 - ratio)) as u64;
        let size_gb = current_size as f64 / GIB as f64;

        let compression_time_hours = size_gb / (BASE_THROUGHPUT_GB_PER_HOUR * speed_factor);
        let compute_cost = compression_time_hours * self.pricing.compute_cost_per_hour;

        let saved_gb = (current_size - compressed_size) as f64 / GIB as f64;
        let monthly_savings = saved_gb * self.pricing.base_storage_price_per_gb;

        let roi_score = if compute_cost > f64::EPSILON {
            monthly_savings / compute_cost
        } else {
            ROI_UNBOUNDED
        };

        let currency = self.pricing.currency_factor;

        CompressionEstimate {
            recommend: roi_score > self.pricing.roi_threshold,
            algorithm: Some(algorithm.into()),
            compression_ratio: ratio,
            current_size,
            compressed_size,
            compression_time_minutes: (compression_time_hours * 60.0) as u64,
            monthly_savings: round2(monthly_savings * currency),
            compute_cost: round2(compute_cost * currency),
            roi_score: round2(roi_score),
            reason: format!(
                "High compressibility ({:.0}%) with ROI {:.1}x",
                ratio * 100.0,
                roi_score
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskLevel, StorageTier};
    use chrono::{TimeZone, Utc};

    fn file(extension: &str, size_bytes: u64) -> FileRecord {
        FileRecord {
            id: "file-1".into(),
            name: format!("data.{}", extension),
            path: format!("/data/data.{}", extension),
            size_bytes,
            extension: extension.into(),
            tier: StorageTier::Warm,
            access_count: 10,
            last_accessed: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            risk_level: RiskLevel::Low,
        }
    }

    fn advisor() -> CompressionAdvisor {
        CompressionAdvisor::new(PricingSettings::default())
    }

    #[test]
    fn test_jpg_never_recommended() {
        for size in [0, GIB, 100 * GIB] {
            let estimate = advisor().estimate(&file("jpg", size));
            assert!(!estimate.recommend);
            assert_eq!(estimate.algorithm, None);
            assert_eq!(estimate.compression_ratio, 0.02);
            assert_eq!(estimate.compressed_size, size);
            assert_eq!(estimate.reason, "Already compressed or low compressibility");
        }
    }

    #[test]
    fn test_unknown_extension_default_ratio() {
        let estimate = advisor().estimate(&file("wxyz", GIB));
        assert_eq!(estimate.compression_ratio, 0.15);
        assert!(!estimate.recommend);
    }

    #[test]
    fn test_log_file_zstd19() {
        let estimate = advisor().estimate(&file("log", 10 * GIB));
        assert_eq!(estimate.algorithm.as_deref(), Some("zstd-19"));
        assert_eq!(estimate.compression_ratio, 0.80);
        // compressed = 10 GiB x (1 - 0.8)
        assert_eq!(estimate.compressed_size, 2 * GIB);
        // 10 GB at 2 GB/h x 0.5 speed = 10 hours = 600 minutes
        assert_eq!(estimate.compression_time_minutes, 600);
        // savings: 8 GB x 0.023 = 0.184; cost: 10h x 2.0 = 20.0; roi well below 1.5
        assert!(!estimate.recommend);
        assert!(estimate.roi_score < 1.5);
    }

    #[test]
    fn test_algorithm_bands() {
        let est = advisor().estimate(&file("xml", GIB)); // 0.78
        assert_eq!(est.algorithm.as_deref(), Some("zstd-19"));

        let est = advisor().estimate(&file("json", GIB)); // 0.70, not > 0.70
        assert_eq!(est.algorithm.as_deref(), Some("zstd-11"));

        let est = advisor().estimate(&file("pdf", GIB)); // 0.40
        assert_eq!(est.algorithm.as_deref(), Some("gzip-9"));
    }

    #[test]
    fn test_roi_gate_follows_configured_threshold() {
        // Cheap compute makes the same file clear the gate
        let cheap = CompressionAdvisor::new(PricingSettings {
            compute_cost_per_hour: 0.001,
            ..Default::default()
        });
        let estimate = cheap.estimate(&file("log", 10 * GIB));
        assert!(estimate.roi_score > 1.5);
        assert!(estimate.recommend);

        // Raising the threshold flips the decision without touching the math
        let strict = CompressionAdvisor::new(PricingSettings {
            compute_cost_per_hour: 0.001,
            roi_threshold: estimate.roi_score + 1.0,
            ..Default::default()
        });
        assert!(!strict.estimate(&file("log", 10 * GIB)).recommend);
    }

    #[test]
    fn test_zero_compute_cost_is_unbounded_roi() {
        let free = CompressionAdvisor::new(PricingSettings {
            compute_cost_per_hour: 0.0,
            ..Default::default()
        });
        let estimate = free.estimate(&file("log", 10 * GIB));
        assert_eq!(estimate.roi_score, ROI_UNBOUNDED);
        assert!(estimate.recommend);
    }

    #[test]
    fn test_currency_factor_scales_money_not_roi() {
        let base = advisor().estimate(&file("csv", 1000 * GIB));
        let inr = CompressionAdvisor::new(PricingSettings {
            currency_factor: 83.0,
            ..Default::default()
        })
        .estimate(&file("csv", 1000 * GIB));

        // 1000 GB of csv saves exactly 720 GB: 16.56 USD, 1374.48 after conversion
        assert!((base.monthly_savings - 16.56).abs() < 0.01);
        assert!((inr.monthly_savings - 1374.48).abs() < 0.01);
        assert!((inr.compute_cost - base.compute_cost * 83.0).abs() < 0.01);
        assert_eq!(inr.roi_score, base.roi_score);
        assert_eq!(inr.recommend, base.recommend);
    }

    #[test]
    fn test_estimate_deterministic() {
        let f = file("sql", 3 * GIB);
        let a = serde_json::to_vec(&advisor().estimate(&f)).unwrap();
        let b = serde_json::to_vec(&advisor().estimate(&f)).unwrap();
        assert_eq!(a, b);
    }
}
