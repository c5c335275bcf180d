//! Supplier aggregate
//!
//! A supplier owns its compliance flags; score and risk tier are derived
//! from them and recomputed together on every flag change.

use crate::scoring::{self, ScoreBreakdown};
use crate::{ComplianceFlags, Document, EsgScore, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supplier record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SupplierRecord")]
pub struct Supplier {
    id: Uuid,
    name: String,
    country: String,
    category: String,
    esg_score: EsgScore,
    risk_level: RiskLevel,
    #[serde(rename = "esgBreakdown")]
    flags: ComplianceFlags,
    documents: Vec<Document>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Wire shape of a supplier; derived fields are ignored on input
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SupplierRecord {
    id: Uuid,
    name: String,
    country: String,
    category: String,
    #[serde(rename = "esgBreakdown", default)]
    flags: ComplianceFlags,
    #[serde(default)]
    documents: Vec<Document>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRecord> for Supplier {
    fn from(record: SupplierRecord) -> Self {
        let mut supplier = Supplier::new(
            record.id,
            record.name,
            record.country,
            record.category,
            record.flags,
            record.created_at,
        );
        supplier.documents = record.documents;
        supplier.updated_at = record.updated_at;
        supplier
    }
}

impl Supplier {
    /// Create a supplier; score and risk tier are derived from `flags`
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        country: impl Into<String>,
        category: impl Into<String>,
        flags: ComplianceFlags,
        created_at: DateTime<Utc>,
    ) -> Self {
        let esg_score = scoring::score(&flags);
        Self {
            id,
            name: name.into(),
            country: country.into(),
            category: category.into(),
            esg_score,
            risk_level: esg_score.risk_level(),
            flags,
            documents: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Supplier ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Company name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Country
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Industry category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Compliance flags
    pub fn flags(&self) -> &ComplianceFlags {
        &self.flags
    }

    /// Derived ESG score
    pub fn esg_score(&self) -> EsgScore {
        self.esg_score
    }

    /// Derived risk tier
    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Attached documents, oldest first
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Per-criterion breakdown of the current score
    pub fn breakdown(&self) -> ScoreBreakdown {
        scoring::breakdown(&self.flags)
    }

    /// Replace compliance flags and re-derive score and risk tier
    pub fn set_flags(&mut self, flags: ComplianceFlags, at: DateTime<Utc>) {
        self.flags = flags;
        self.esg_score = scoring::score(&flags);
        self.risk_level = self.esg_score.risk_level();
        self.updated_at = at;
    }

    /// Update descriptive attributes
    pub fn set_details(
        &mut self,
        name: impl Into<String>,
        country: impl Into<String>,
        category: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        self.name = name.into();
        self.country = country.into();
        self.category = category.into();
        self.updated_at = at;
    }

    /// Attach a supporting document
    pub fn attach_document(&mut self, document: Document, at: DateTime<Utc>) {
        self.documents.push(document);
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Criterion;
    use chrono::Duration;

    fn supplier(flags: ComplianceFlags) -> Supplier {
        Supplier::new(
            Uuid::new_v4(),
            "GreenTech Industries",
            "Germany",
            "Manufacturing",
            flags,
            Utc::now(),
        )
    }

    #[test]
    fn test_derived_fields_on_create() {
        let s = supplier(ComplianceFlags::all());
        assert_eq!(s.esg_score().value(), 100);
        assert_eq!(s.risk_level(), RiskLevel::Low);
        assert_eq!(s.created_at(), s.updated_at());
    }

    #[test]
    fn test_set_flags_recomputes() {
        let mut s = supplier(ComplianceFlags::all());
        let later = s.created_at() + Duration::minutes(5);

        s.set_flags(ComplianceFlags::from_met([Criterion::CarbonEmissions]), later);

        assert_eq!(s.esg_score().value(), 20);
        assert_eq!(s.risk_level(), RiskLevel::High);
        assert_eq!(s.updated_at(), later);
        assert_eq!(s.breakdown().total, s.esg_score());
    }

    #[test]
    fn test_deserialize_ignores_stale_derived_fields() {
        let json = r#"{
            "id": "6f1c2b1e-3d4a-4c5b-8e9f-0a1b2c3d4e5f",
            "name": "Stale Co",
            "country": "France",
            "category": "Logistics",
            "esgScore": 95,
            "riskLevel": "Low",
            "esgBreakdown": { "carbonEmissions": true },
            "documents": [],
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-03-01T09:30:00Z"
        }"#;

        let s: Supplier = serde_json::from_str(json).unwrap();
        assert_eq!(s.esg_score().value(), 20);
        assert_eq!(s.risk_level(), RiskLevel::High);
        assert_eq!(s.updated_at().to_rfc3339(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_serialize_shape() {
        let s = supplier(ComplianceFlags::none());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["esgScore"], 0);
        assert_eq!(json["riskLevel"], "High");
        assert_eq!(json["esgBreakdown"]["labourRights"], false);
    }
}
