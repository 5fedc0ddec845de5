//! Strategy Optimization
//!
//! Scores every entry of the external strategy catalog with weighted
//! scalarization and returns them ranked. Lower score wins; the weight
//! profile encodes the caller's risk tolerance. Stateless and pure.

use crate::config::{PricingSettings, StrategyCatalog};
use crate::domain::{StrategyCatalogEntry, round2, round3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Risk Tolerance
// =============================================================================

/// Caller preference selecting the scalarization weight profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    /// Latency normalization constant for this selector.
    ///
    /// Applied uniformly to every catalog entry being scored.
    pub fn latency_norm(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.3,
            RiskTolerance::Balanced => 0.6,
            RiskTolerance::Aggressive => 0.9,
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "conservative"),
            RiskTolerance::Balanced => write!(f, "balanced"),
            RiskTolerance::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for RiskTolerance {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(RiskTolerance::Conservative),
            "balanced" => Ok(RiskTolerance::Balanced),
            "aggressive" => Ok(RiskTolerance::Aggressive),
            other => Err(crate::error::Error::ApiValidation(format!(
                "Invalid risk tolerance: {}. Use conservative, balanced, or aggressive",
                other
            ))),
        }
    }
}

// =============================================================================
// Scalarization Weights
// =============================================================================

/// Weight vector for the scalarization score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarizationWeights {
    pub cost: f64,
    pub risk: f64,
    pub latency: f64,
    pub user: f64,
}

impl ScalarizationWeights {
    /// Fixed weight profile for a risk tolerance
    pub fn for_tolerance(tolerance: RiskTolerance) -> Self {
        match tolerance {
            RiskTolerance::Conservative => Self {
                cost: 0.30,
                risk: 0.30,
                latency: 0.20,
                user: 0.10,
            },
            RiskTolerance::Balanced => Self {
                cost: 0.35,
                risk: 0.25,
                latency: 0.15,
                user: 0.15,
            },
            RiskTolerance::Aggressive => Self {
                cost: 0.40,
                risk: 0.20,
                latency: 0.15,
                user: 0.10,
            },
        }
    }

    /// Weighted scalarization: lower is better
    pub fn score(&self, cost: f64, risk: f64, latency: f64, user_pref: f64) -> f64 {
        self.cost * cost + self.risk * risk + self.latency * latency + self.user * user_pref
    }
}

// =============================================================================
// Ranked Strategy
// =============================================================================

/// A catalog entry with its scalarization score and projected cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStrategy {
    pub name: String,
    pub description: String,
    /// Scalarization score; lower is better
    pub score: f64,
    /// Projected monthly cost for the fleet under this strategy
    pub monthly_cost: f64,
    /// Risk reduction, percent
    pub risk_reduction: f64,
    pub replication_factor: u32,
    pub cloud_tier: String,
    pub compression_level: String,
}

// =============================================================================
// Strategy Optimizer
// =============================================================================

/// Neutral user preference term in the scalarization
const NEUTRAL_USER_PREF: f64 = 0.5;

/// Ranks the strategy catalog for a fleet size and risk tolerance
#[derive(Debug, Clone)]
pub struct StrategyOptimizer {
    catalog: StrategyCatalog,
    pricing: PricingSettings,
}

impl StrategyOptimizer {
    pub fn new(catalog: StrategyCatalog, pricing: PricingSettings) -> Self {
        Self { catalog, pricing }
    }

    /// Score and rank every catalog entry, ascending by score
    pub fn rank(&self, total_fleet_gb: f64, tolerance: RiskTolerance) -> Vec<RankedStrategy> {
        let weights = ScalarizationWeights::for_tolerance(tolerance);
        let latency_norm = tolerance.latency_norm();

        let mut ranked: Vec<RankedStrategy> = self
            .catalog
            .strategies
            .iter()
            .map(|entry| self.score_entry(entry, total_fleet_gb, &weights, latency_norm))
            .collect();

        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        ranked
    }

    fn score_entry(
        &self,
        entry: &StrategyCatalogEntry,
        total_fleet_gb: f64,
        weights: &ScalarizationWeights,
        latency_norm: f64,
    ) -> RankedStrategy {
        let cost_norm = entry.cost_multiplier;
        let risk_norm = 1.0 - entry.risk_reduction;

        let score = weights.score(cost_norm, risk_norm, latency_norm, NEUTRAL_USER_PREF);

        let monthly_cost = total_fleet_gb
            * self.pricing.base_storage_price_per_gb
            * self.pricing.currency_factor
            * entry.cost_multiplier;

        RankedStrategy {
            name: entry.name.clone(),
            description: entry.description.clone(),
            score: round3(score),
            monthly_cost: round2(monthly_cost),
            risk_reduction: round2(entry.risk_reduction * 100.0),
            replication_factor: entry.replication_factor,
            cloud_tier: entry.cloud_tier.clone(),
            compression_level: entry.compression.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimizer() -> StrategyOptimizer {
        StrategyOptimizer::new(StrategyCatalog::default(), PricingSettings::default())
    }

    #[test]
    fn test_ranked_ascending() {
        for tolerance in [
            RiskTolerance::Conservative,
            RiskTolerance::Balanced,
            RiskTolerance::Aggressive,
        ] {
            let ranked = optimizer().rank(1000.0, tolerance);
            assert_eq!(ranked.len(), 3);
            for pair in ranked.windows(2) {
                assert!(pair[0].score <= pair[1].score);
            }
        }
    }

    #[test]
    fn test_weight_profiles_differ() {
        let conservative = ScalarizationWeights::for_tolerance(RiskTolerance::Conservative);
        let aggressive = ScalarizationWeights::for_tolerance(RiskTolerance::Aggressive);
        assert_ne!(conservative, aggressive);
        assert!(aggressive.cost > conservative.cost);
        assert!(conservative.risk > aggressive.risk);
    }

    #[test]
    fn test_tolerance_changes_scores() {
        let opt = optimizer();
        let conservative = opt.rank(1000.0, RiskTolerance::Conservative);
        let aggressive = opt.rank(1000.0, RiskTolerance::Aggressive);

        let score_of = |ranked: &[RankedStrategy], name: &str| {
            ranked.iter().find(|s| s.name == name).unwrap().score
        };
        assert_ne!(
            score_of(&conservative, "balanced"),
            score_of(&aggressive, "balanced")
        );
    }

    #[test]
    fn test_monthly_cost_uses_multiplier() {
        let ranked = optimizer().rank(1000.0, RiskTolerance::Balanced);
        let by_name = |name: &str| ranked.iter().find(|s| s.name == name).unwrap();

        // 1000 GB x 0.023 x multiplier
        assert!((by_name("balanced").monthly_cost - 23.0).abs() < 0.01);
        assert!((by_name("conservative").monthly_cost - 32.2).abs() < 0.01);
        assert!((by_name("aggressive").monthly_cost - 13.8).abs() < 0.01);
    }

    #[test]
    fn test_scalarization_hand_computed() {
        // balanced entry under balanced tolerance:
        // 0.35*1.0 + 0.25*(1-0.70) + 0.15*0.6 + 0.15*0.5 = 0.59
        let ranked = optimizer().rank(0.0, RiskTolerance::Balanced);
        let balanced = ranked.iter().find(|s| s.name == "balanced").unwrap();
        assert_eq!(balanced.score, 0.59);
    }

    #[test]
    fn test_rank_is_pure() {
        let opt = optimizer();
        let a = serde_json::to_vec(&opt.rank(512.0, RiskTolerance::Balanced)).unwrap();
        let b = serde_json::to_vec(&opt.rank(512.0, RiskTolerance::Balanced)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog_is_empty_ranking() {
        let opt = StrategyOptimizer::new(
            StrategyCatalog { strategies: vec![] },
            PricingSettings::default(),
        );
        assert!(opt.rank(1000.0, RiskTolerance::Balanced).is_empty());
    }
}
