//! Cloud Option Ranking
//!
//! Maps a storage tier and size to provider options ranked by total
//! monthly cost. Prices come from the external pricing table; savings are
//! reported against the standard/hot baseline of the same currency system.

use crate::config::{CloudPricingTable, PricingSettings};
use crate::domain::{CloudOption, StorageTier, round2};

// =============================================================================
// Cloud Pricer
// =============================================================================

/// Ranks cloud storage options for a tier and size
#[derive(Debug, Clone)]
pub struct CloudPricer {
    table: CloudPricingTable,
    pricing: PricingSettings,
}

impl CloudPricer {
    pub fn new(table: CloudPricingTable, pricing: PricingSettings) -> Self {
        Self { table, pricing }
    }

    /// Rank provider options for a tier, ascending by total cost.
    ///
    /// A tier missing from the pricing table falls back to the COLD
    /// candidate list.
    pub fn options(&self, tier: StorageTier, size_gb: f64) -> Vec<CloudOption> {
        let size_gb = size_gb.max(0.0);
        let currency = self.pricing.currency_factor;
        let baseline = self.pricing.base_storage_price_per_gb;

        let mut options: Vec<CloudOption> = self
            .table
            .candidates(tier)
            .iter()
            .map(|candidate| CloudOption {
                provider: candidate.provider.to_uppercase(),
                tier: candidate.tier.clone(),
                monthly_cost_per_gb: round2(candidate.price_per_gb * currency),
                retrieval_time: candidate.retrieval_time.clone(),
                total_cost: round2(size_gb * candidate.price_per_gb * currency),
                savings_percent: ((1.0 - candidate.price_per_gb / baseline) * 1000.0).round()
                    / 10.0,
            })
            .collect();

        options.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricer() -> CloudPricer {
        CloudPricer::new(CloudPricingTable::default(), PricingSettings::default())
    }

    #[test]
    fn test_options_sorted_ascending() {
        for tier in StorageTier::all() {
            let options = pricer().options(*tier, 100.0);
            assert_eq!(options.len(), 3);
            for pair in options.windows(2) {
                assert!(pair[0].total_cost <= pair[1].total_cost);
            }
        }
    }

    #[test]
    fn test_total_cost_scales_with_size() {
        let small = pricer().options(StorageTier::Cold, 10.0);
        let large = pricer().options(StorageTier::Cold, 1000.0);
        // Same provider set, hundred-fold cost
        assert_eq!(small.len(), large.len());
        let cheapest_small = &small[0];
        let cheapest_large = &large[0];
        assert!((cheapest_large.total_cost - cheapest_small.total_cost * 100.0).abs() < 0.5);
    }

    #[test]
    fn test_savings_relative_to_hot_baseline() {
        let options = pricer().options(StorageTier::Hot, 100.0);
        // AWS standard IS the baseline: zero savings
        let aws = options.iter().find(|o| o.provider == "AWS").unwrap();
        assert_eq!(aws.savings_percent, 0.0);

        // Everything in the archive tier saves the vast majority
        let archive = pricer().options(StorageTier::Archive, 100.0);
        for option in &archive {
            assert!(option.savings_percent > 90.0);
        }
    }

    #[test]
    fn test_negative_size_clamped() {
        let options = pricer().options(StorageTier::Warm, -5.0);
        for option in &options {
            assert_eq!(option.total_cost, 0.0);
        }
    }

    #[test]
    fn test_currency_applied_to_costs() {
        let inr = CloudPricer::new(
            CloudPricingTable::default(),
            PricingSettings {
                currency_factor: 83.0,
                ..Default::default()
            },
        );
        let usd_options = pricer().options(StorageTier::Hot, 100.0);
        let inr_options = inr.options(StorageTier::Hot, 100.0);
        assert!(
            (inr_options[0].total_cost - usd_options[0].total_cost * 83.0).abs() < 1.0
        );
        // Savings percent is currency-invariant
        assert_eq!(inr_options[0].savings_percent, usd_options[0].savings_percent);
    }

    #[test]
    fn test_providers_uppercased() {
        let options = pricer().options(StorageTier::Warm, 1.0);
        for option in &options {
            assert!(matches!(option.provider.as_str(), "AWS" | "AZURE" | "GCP"));
        }
    }
}
