//! Demo suppliers and pick lists

use chrono::{DateTime, Duration, Utc};
use esg_core::Criterion::{self, *};
use esg_core::{ComplianceFlags, Supplier};
use uuid::Uuid;

pub const COUNTRIES: [&str; 12] = [
    "United States",
    "United Kingdom",
    "Germany",
    "France",
    "Sweden",
    "China",
    "India",
    "Japan",
    "Vietnam",
    "Brazil",
    "Mexico",
    "South Africa",
];

pub const CATEGORIES: [&str; 8] = [
    "Manufacturing",
    "Raw Materials",
    "Logistics",
    "Electronics",
    "Textiles",
    "Chemicals",
    "Energy",
    "Packaging",
];

struct Seed {
    name: &'static str,
    country: &'static str,
    category: &'static str,
    met: &'static [Criterion],
    age_days: i64,
}

const SEEDS: [Seed; 8] = [
    Seed {
        name: "GreenTech Industries",
        country: "Germany",
        category: "Manufacturing",
        met: &[EnvironmentalPolicy, CarbonEmissions, Iso14001, LabourRights, HealthSafety, AntiCorruption],
        age_days: 210,
    },
    Seed {
        name: "Nordic Timber AB",
        country: "Sweden",
        category: "Raw Materials",
        met: &[EnvironmentalPolicy, CarbonEmissions, Iso14001, LabourRights, AntiCorruption],
        age_days: 180,
    },
    Seed {
        name: "Pacific Textiles",
        country: "Vietnam",
        category: "Textiles",
        met: &[CarbonEmissions, HealthSafety],
        age_days: 150,
    },
    Seed {
        name: "Shenzhen Circuit Co",
        country: "China",
        category: "Electronics",
        met: &[Iso14001, HealthSafety, AntiCorruption],
        age_days: 120,
    },
    Seed {
        name: "Atlas Logistics",
        country: "United States",
        category: "Logistics",
        met: &[EnvironmentalPolicy, CarbonEmissions, LabourRights, AntiCorruption],
        age_days: 95,
    },
    Seed {
        name: "Ganges Chemicals",
        country: "India",
        category: "Chemicals",
        met: &[HealthSafety],
        age_days: 60,
    },
    Seed {
        name: "Solaris Energy",
        country: "Brazil",
        category: "Energy",
        met: &[CarbonEmissions, LabourRights, HealthSafety],
        age_days: 45,
    },
    Seed {
        name: "BoxCraft Packaging",
        country: "Mexico",
        category: "Packaging",
        met: &[],
        age_days: 20,
    },
];

/// Seed suppliers with stable ids, covering all three risk tiers
pub fn mock_suppliers(now: DateTime<Utc>) -> Vec<Supplier> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            Supplier::new(
                Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0000 + index as u128 + 1),
                seed.name,
                seed.country,
                seed.category,
                ComplianceFlags::from_met(seed.met.iter().copied()),
                now - Duration::days(seed.age_days),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::aggregate;

    #[test]
    fn test_seed_covers_every_tier() {
        let suppliers = mock_suppliers(Utc::now());
        let stats = aggregate(&suppliers);

        assert_eq!(stats.total_suppliers, SEEDS.len());
        assert!(stats.low_risk > 0 && stats.medium_risk > 0 && stats.high_risk > 0);
    }

    #[test]
    fn test_seed_uses_pick_lists() {
        for supplier in mock_suppliers(Utc::now()) {
            assert!(COUNTRIES.contains(&supplier.country()));
            assert!(CATEGORIES.contains(&supplier.category()));
        }
    }

    #[test]
    fn test_seed_ids_are_stable() {
        let now = Utc::now();
        let first: Vec<Uuid> = mock_suppliers(now).iter().map(|s| s.id()).collect();
        let second: Vec<Uuid> = mock_suppliers(now).iter().map(|s| s.id()).collect();
        assert_eq!(first, second);
    }
}
