//! Advisor Configuration
//!
//! Runtime-configurable pricing parameters, the cloud pricing table, and
//! the strategy catalog. All three ship with embedded defaults and can be
//! overridden from a YAML file.
//!
//! Currency conversion is a pure multiplicative parameter applied to every
//! monetary output; domain logic never hardcodes a currency.

use crate::domain::{StorageTier, StrategyCatalogEntry};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Pricing Settings
// =============================================================================

/// Scalar pricing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Multiplicative currency conversion factor applied to monetary outputs
    pub currency_factor: f64,
    /// Base storage price, USD per GB per month (standard/hot baseline)
    pub base_storage_price_per_gb: f64,
    /// Compute price, USD per hour, for compression jobs
    pub compute_cost_per_hour: f64,
    /// Minimum ROI multiple for a compression recommendation
    pub roi_threshold: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            currency_factor: 1.0,
            base_storage_price_per_gb: 0.023,
            compute_cost_per_hour: 2.0,
            roi_threshold: 1.5,
        }
    }
}

impl PricingSettings {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.currency_factor <= 0.0 {
            return Err(Error::Configuration(
                "currency_factor must be positive".into(),
            ));
        }
        if self.base_storage_price_per_gb <= 0.0 {
            return Err(Error::Configuration(
                "base_storage_price_per_gb must be positive".into(),
            ));
        }
        if self.roi_threshold < 0.0 {
            return Err(Error::Configuration("roi_threshold must not be negative".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Cloud Pricing Table
// =============================================================================

/// A single provider offering for a storage tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudCandidate {
    /// Provider name (lowercase in configuration)
    pub provider: String,
    /// Provider-side tier name
    pub tier: String,
    /// Monthly price, USD per GB
    pub price_per_gb: f64,
    /// Retrieval latency class
    pub retrieval_time: String,
}

/// Ordered candidate lists per storage tier.
///
/// Candidate order within a tier is preserved from configuration; the
/// pricer re-sorts by total cost at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudPricingTable {
    /// Candidates keyed by tier
    pub tiers: IndexMap<StorageTier, Vec<CloudCandidate>>,
}

impl Default for CloudPricingTable {
    fn default() -> Self {
        let candidate = |provider: &str, tier: &str, price: f64, retrieval: &str| CloudCandidate {
            provider: provider.into(),
            tier: tier.into(),
            price_per_gb: price,
            retrieval_time: retrieval.into(),
        };

        let mut tiers = IndexMap::new();
        tiers.insert(
            StorageTier::Hot,
            vec![
                candidate("aws", "standard", 0.023, "Instant"),
                candidate("azure", "hot", 0.0184, "Instant"),
                candidate("gcp", "standard", 0.020, "Instant"),
            ],
        );
        tiers.insert(
            StorageTier::Warm,
            vec![
                candidate("aws", "intelligent-tiering", 0.0125, "Instant"),
                candidate("azure", "cool", 0.01, "Instant"),
                candidate("gcp", "nearline", 0.010, "Instant"),
            ],
        );
        tiers.insert(
            StorageTier::Cold,
            vec![
                candidate("aws", "glacier-instant", 0.004, "3-5 hours"),
                candidate("azure", "archive", 0.00099, "12 hours"),
                candidate("gcp", "coldline", 0.004, "Instant"),
            ],
        );
        tiers.insert(
            StorageTier::Archive,
            vec![
                candidate("aws", "glacier-deep", 0.00099, "12-48 hours"),
                candidate("azure", "archive", 0.00099, "12 hours"),
                candidate("gcp", "archive", 0.0012, "Instant"),
            ],
        );

        Self { tiers }
    }
}

impl CloudPricingTable {
    /// Candidates for a tier, falling back to the COLD list when the tier
    /// is missing from configuration
    pub fn candidates(&self, tier: StorageTier) -> &[CloudCandidate] {
        self.tiers
            .get(&tier)
            .or_else(|| self.tiers.get(&StorageTier::Cold))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// =============================================================================
// Strategy Catalog
// =============================================================================

/// Named strategies scored by the optimizer, in catalog order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCatalog {
    pub strategies: Vec<StrategyCatalogEntry>,
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self {
            strategies: vec![
                StrategyCatalogEntry {
                    name: "conservative".into(),
                    description: "Maximize durability: triple replication on standard storage"
                        .into(),
                    cost_multiplier: 1.4,
                    risk_reduction: 0.90,
                    replication_factor: 3,
                    cloud_tier: "standard".into(),
                    compression: "lz4".into(),
                },
                StrategyCatalogEntry {
                    name: "balanced".into(),
                    description: "Balance cost and durability with intelligent tiering".into(),
                    cost_multiplier: 1.0,
                    risk_reduction: 0.70,
                    replication_factor: 2,
                    cloud_tier: "intelligent-tiering".into(),
                    compression: "zstd-11".into(),
                },
                StrategyCatalogEntry {
                    name: "aggressive".into(),
                    description: "Minimize spend: single replica on cold storage".into(),
                    cost_multiplier: 0.6,
                    risk_reduction: 0.45,
                    replication_factor: 1,
                    cloud_tier: "glacier-instant".into(),
                    compression: "zstd-19".into(),
                },
            ],
        }
    }
}

impl StrategyCatalog {
    /// Look up a catalog entry by name
    pub fn get(&self, name: &str) -> Option<&StrategyCatalogEntry> {
        self.strategies.iter().find(|s| s.name == name)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Complete advisor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pricing: PricingSettings,
    pub cloud_pricing: CloudPricingTable,
    pub strategy_catalog: StrategyCatalog,
}

impl Settings {
    /// Load settings from a YAML file, validating parameter ranges
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&raw)?;
        settings.pricing.validate()?;
        Ok(settings)
    }
}
