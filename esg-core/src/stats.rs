//! Dashboard statistics
//!
//! Recomputed from the current supplier collection on every call; nothing
//! here caches.

use crate::{RiskLevel, Supplier};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Supplier counts per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of suppliers
    pub total_suppliers: usize,

    /// Suppliers classified low risk
    pub low_risk: usize,

    /// Suppliers classified medium risk
    pub medium_risk: usize,

    /// Suppliers classified high risk
    pub high_risk: usize,
}

impl DashboardStats {
    /// Count one supplier in the given tier
    pub fn record(&mut self, level: RiskLevel) {
        self.total_suppliers += 1;
        match level {
            RiskLevel::Low => self.low_risk += 1,
            RiskLevel::Medium => self.medium_risk += 1,
            RiskLevel::High => self.high_risk += 1,
        }
    }

    /// Count for one tier
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low_risk,
            RiskLevel::Medium => self.medium_risk,
            RiskLevel::High => self.high_risk,
        }
    }

    /// Share of suppliers in a tier, as a whole percentage
    pub fn percentage(&self, level: RiskLevel) -> u8 {
        if self.total_suppliers == 0 {
            return 0;
        }
        let share = Decimal::from(self.count(level) * 100) / Decimal::from(self.total_suppliers);
        share
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
            .unwrap_or(100)
    }
}

/// Aggregate a supplier collection into per-tier counts
pub fn aggregate<'a, I>(suppliers: I) -> DashboardStats
where
    I: IntoIterator<Item = &'a Supplier>,
{
    suppliers
        .into_iter()
        .fold(DashboardStats::default(), |mut stats, supplier| {
            stats.record(supplier.risk_level());
            stats
        })
}

/// Figures shown in exported reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Per-tier counts
    #[serde(flatten)]
    pub stats: DashboardStats,

    /// Sum of all ESG scores
    pub total_score: u64,

    /// Mean score to two decimal places; absent for an empty collection
    pub mean_score: Option<Decimal>,

    /// Mean score rounded half-up; absent for an empty collection
    pub average_score: Option<u8>,
}

/// Aggregate counts and average score in one pass
pub fn summarize<'a, I>(suppliers: I) -> ReportSummary
where
    I: IntoIterator<Item = &'a Supplier>,
{
    let (stats, total_score) = suppliers.into_iter().fold(
        (DashboardStats::default(), 0u64),
        |(mut stats, total), supplier| {
            stats.record(supplier.risk_level());
            (stats, total + u64::from(supplier.esg_score().value()))
        },
    );

    let exact_mean = (stats.total_suppliers > 0)
        .then(|| Decimal::from(total_score) / Decimal::from(stats.total_suppliers));

    ReportSummary {
        stats,
        total_score,
        mean_score: exact_mean
            .map(|mean| mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        average_score: exact_mean.and_then(|mean| {
            mean.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u8()
        }),
    }
}
