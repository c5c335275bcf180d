//! Search and filter over the supplier list

use esg_core::{RiskLevel, Supplier};
use serde::{Deserialize, Serialize};

/// Dashboard filter: name search, risk tier and country
///
/// Unset criteria match everything; set criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierFilter {
    pub search: String,
    pub risk: Option<RiskLevel>,
    pub country: Option<String>,
}

impl SupplierFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn risk(mut self, level: RiskLevel) -> Self {
        self.risk = Some(level);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.risk.is_some() || self.country.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, supplier: &Supplier) -> bool {
        let matches_search = self.search.is_empty()
            || supplier
                .name()
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let matches_risk = self.risk.map_or(true, |level| supplier.risk_level() == level);
        let matches_country = self
            .country
            .as_deref()
            .map_or(true, |country| supplier.country() == country);

        matches_search && matches_risk && matches_country
    }

    /// Matching suppliers, in input order
    pub fn apply<'a>(&self, suppliers: &'a [Supplier]) -> Vec<&'a Supplier> {
        suppliers.iter().filter(|s| self.matches(s)).collect()
    }
}
