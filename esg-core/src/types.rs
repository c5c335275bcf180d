//! Core types for the ESG engine

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ESG category a criterion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsgCategory {
    /// Environmental
    Environmental,
    /// Social
    Social,
    /// Governance
    Governance,
}

impl EsgCategory {
    /// All categories in display order
    pub const ALL: [EsgCategory; 3] = [
        EsgCategory::Environmental,
        EsgCategory::Social,
        EsgCategory::Governance,
    ];

    /// Category name
    pub fn as_str(&self) -> &'static str {
        match self {
            EsgCategory::Environmental => "Environmental",
            EsgCategory::Social => "Social",
            EsgCategory::Governance => "Governance",
        }
    }
}

impl fmt::Display for EsgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One ESG compliance criterion
///
/// Discriminants index into [`crate::scoring::CRITERION_WEIGHTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    /// Documented environmental management policy
    EnvironmentalPolicy = 0,
    /// Monitors and reports carbon footprint
    CarbonEmissions = 1,
    /// Environmental management system certified
    Iso14001 = 2,
    /// Compliant with ILO standards
    LabourRights = 3,
    /// Workplace safety protocols in place
    HealthSafety = 4,
    /// Anti-bribery and ethics policies
    AntiCorruption = 5,
}

impl Criterion {
    /// All criteria in display order
    pub const ALL: [Criterion; 6] = [
        Criterion::EnvironmentalPolicy,
        Criterion::CarbonEmissions,
        Criterion::Iso14001,
        Criterion::LabourRights,
        Criterion::HealthSafety,
        Criterion::AntiCorruption,
    ];

    /// Field identifier as used in the dashboard's JSON
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::EnvironmentalPolicy => "environmentalPolicy",
            Criterion::CarbonEmissions => "carbonEmissions",
            Criterion::Iso14001 => "iso14001",
            Criterion::LabourRights => "labourRights",
            Criterion::HealthSafety => "healthSafety",
            Criterion::AntiCorruption => "antiCorruption",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::EnvironmentalPolicy => "Environmental Policy",
            Criterion::CarbonEmissions => "Carbon Emissions Tracking",
            Criterion::Iso14001 => "ISO 14001 Certification",
            Criterion::LabourRights => "Labour & Human Rights",
            Criterion::HealthSafety => "Health & Safety",
            Criterion::AntiCorruption => "Anti-Corruption Policy",
        }
    }

    /// Short description of what satisfies the criterion
    pub fn description(&self) -> &'static str {
        match self {
            Criterion::EnvironmentalPolicy => "Documented environmental management policy",
            Criterion::CarbonEmissions => "Monitors and reports carbon footprint",
            Criterion::Iso14001 => "Environmental management system certified",
            Criterion::LabourRights => "Compliant with ILO standards",
            Criterion::HealthSafety => "Workplace safety protocols in place",
            Criterion::AntiCorruption => "Anti-bribery and ethics policies",
        }
    }

    /// Category the criterion counts towards
    pub fn category(&self) -> EsgCategory {
        match self {
            Criterion::EnvironmentalPolicy | Criterion::CarbonEmissions | Criterion::Iso14001 => {
                EsgCategory::Environmental
            }
            Criterion::LabourRights | Criterion::HealthSafety => EsgCategory::Social,
            Criterion::AntiCorruption => EsgCategory::Governance,
        }
    }

    /// Points awarded when the criterion is met
    pub fn weight(&self) -> u8 {
        crate::scoring::CRITERION_WEIGHTS[*self as usize].1
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownCriterion(s.to_string()))
    }
}

/// Compliance flags for one evaluation snapshot
///
/// A flag missing from a JSON payload deserializes as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceFlags {
    /// Environmental policy in place
    pub environmental_policy: bool,
    /// Carbon emissions tracked
    pub carbon_emissions: bool,
    /// ISO 14001 certified
    pub iso14001: bool,
    /// Labour and human rights compliance
    pub labour_rights: bool,
    /// Health and safety protocols
    pub health_safety: bool,
    /// Anti-corruption policy
    pub anti_corruption: bool,
}

impl ComplianceFlags {
    /// No criterion met
    pub fn none() -> Self {
        Self::default()
    }

    /// Every criterion met
    pub fn all() -> Self {
        Self {
            environmental_policy: true,
            carbon_emissions: true,
            iso14001: true,
            labour_rights: true,
            health_safety: true,
            anti_corruption: true,
        }
    }

    /// Flags with exactly the given criteria met
    pub fn from_met<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        criteria
            .into_iter()
            .fold(Self::none(), |flags, criterion| flags.with(criterion, true))
    }

    /// Parse flags from the dashboard's JSON shape
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedFlags(e.to_string()))
    }

    /// Whether a criterion is met
    pub fn is_met(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::EnvironmentalPolicy => self.environmental_policy,
            Criterion::CarbonEmissions => self.carbon_emissions,
            Criterion::Iso14001 => self.iso14001,
            Criterion::LabourRights => self.labour_rights,
            Criterion::HealthSafety => self.health_safety,
            Criterion::AntiCorruption => self.anti_corruption,
        }
    }

    /// Copy with one criterion set
    pub fn with(mut self, criterion: Criterion, met: bool) -> Self {
        let slot = match criterion {
            Criterion::EnvironmentalPolicy => &mut self.environmental_policy,
            Criterion::CarbonEmissions => &mut self.carbon_emissions,
            Criterion::Iso14001 => &mut self.iso14001,
            Criterion::LabourRights => &mut self.labour_rights,
            Criterion::HealthSafety => &mut self.health_safety,
            Criterion::AntiCorruption => &mut self.anti_corruption,
        };
        *slot = met;
        self
    }

    /// Criteria that are met
    pub fn met(&self) -> impl Iterator<Item = Criterion> + '_ {
        Criterion::ALL.into_iter().filter(|c| self.is_met(*c))
    }
}

/// ESG score (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct EsgScore(u8);

impl EsgScore {
    /// Highest achievable score
    pub const MAX: EsgScore = EsgScore(100);

    /// Create a score, rejecting values above 100
    pub fn new(score: u8) -> Result<Self> {
        Self::try_from(i64::from(score))
    }

    /// Score from summed weights; the weight table bounds it to 100
    pub(crate) fn from_points(points: u8) -> Self {
        debug_assert!(points <= 100);
        Self(points)
    }

    /// Get raw score
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Risk tier for this score
    pub fn risk_level(&self) -> RiskLevel {
        crate::classify(i32::from(self.0))
    }
}

impl TryFrom<i64> for EsgScore {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::ScoreOutOfRange(value))
        }
    }
}

impl From<EsgScore> for u8 {
    fn from(score: EsgScore) -> Self {
        score.0
    }
}

impl fmt::Display for EsgScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Risk level
///
/// Ordered `Low < Medium < High`, the inverse of score order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl RiskLevel {
    /// All tiers, lowest risk first
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Tier name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownRiskLevel(s.to_string()))
    }
}

impl From<EsgScore> for RiskLevel {
    fn from(score: EsgScore) -> Self {
        score.risk_level()
    }
}

/// Kind of an uploaded supporting document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF
    Pdf,
    /// Word (OOXML)
    Docx,
}

impl DocumentKind {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }

    /// MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Detect from a file name by extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        [DocumentKind::Pdf, DocumentKind::Docx]
            .into_iter()
            .find(|kind| lower.ends_with(&format!(".{}", kind.extension())))
    }

    /// Detect from a MIME type
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        [DocumentKind::Pdf, DocumentKind::Docx]
            .into_iter()
            .find(|kind| kind.mime_type() == mime)
    }

    /// Detect by MIME type, falling back to the file extension
    pub fn detect(file_name: &str, mime: Option<&str>) -> Result<Self> {
        mime.and_then(Self::from_mime_type)
            .or_else(|| Self::from_file_name(file_name))
            .ok_or_else(|| Error::UnsupportedDocument(file_name.to_string()))
    }
}

/// Supporting document attached to a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document ID
    pub id: Uuid,

    /// Original file name
    pub name: String,

    /// Document kind
    #[serde(rename = "type")]
    pub kind: DocumentKind,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,

    /// Human-readable size, e.g. "2.4 MB"
    pub size: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_to_false() {
        let flags = ComplianceFlags::from_json(r#"{"iso14001": true}"#).unwrap();
        assert!(flags.iso14001);
        assert_eq!(flags.met().count(), 1);
    }

    #[test]
    fn test_malformed_flags_rejected() {
        let err = ComplianceFlags::from_json(r#"{"iso14001": "yes"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedFlags(_)));

        let err = ComplianceFlags::from_json("true").unwrap_err();
        assert!(matches!(err, Error::MalformedFlags(_)));
    }

    #[test]
    fn test_flags_json_shape() {
        let json = serde_json::to_value(ComplianceFlags::all()).unwrap();
        for criterion in Criterion::ALL {
            assert_eq!(json[criterion.key()], serde_json::Value::Bool(true));
        }
    }

    #[test]
    fn test_with_and_from_met() {
        let flags = ComplianceFlags::none()
            .with(Criterion::LabourRights, true)
            .with(Criterion::AntiCorruption, true);
        assert_eq!(
            flags,
            ComplianceFlags::from_met([Criterion::AntiCorruption, Criterion::LabourRights])
        );
        assert!(!flags.with(Criterion::LabourRights, false).labour_rights);
    }

    #[test]
    fn test_esg_score_bounds() {
        assert_eq!(EsgScore::new(100).unwrap(), EsgScore::MAX);
        assert!(matches!(EsgScore::new(101), Err(Error::ScoreOutOfRange(101))));
        assert!(matches!(EsgScore::try_from(-1i64), Err(Error::ScoreOutOfRange(-1))));

        let parsed: std::result::Result<EsgScore, _> = serde_json::from_str("150");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_risk_level_order_and_parse() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!("medium".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert!("critical".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>6}", RiskLevel::Low), "   Low");
        assert_eq!(format!("{:<8}|", EsgCategory::Social), "Social  |");
        assert_eq!(format!("{:>4}", EsgScore::MAX), " 100");
    }

    #[test]
    fn test_criterion_parse() {
        assert_eq!("iso14001".parse::<Criterion>().unwrap(), Criterion::Iso14001);
        assert_eq!(
            "labourRights".parse::<Criterion>().unwrap(),
            Criterion::LabourRights
        );
        assert!("waterUsage".parse::<Criterion>().is_err());
    }

    #[test]
    fn test_document_kind_detection() {
        assert_eq!(DocumentKind::from_file_name("Audit.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("policy.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("policy.doc"), None);
        assert_eq!(
            DocumentKind::from_mime_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
    }

    #[test]
    fn test_document_kind_detect() {
        assert_eq!(
            DocumentKind::detect("upload", Some(DocumentKind::Docx.mime_type())).unwrap(),
            DocumentKind::Docx
        );
        assert_eq!(
            DocumentKind::detect("scan.pdf", Some("application/octet-stream")).unwrap(),
            DocumentKind::Pdf
        );

        let err = DocumentKind::detect("photo.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDocument(ref name) if name == "photo.png"));
    }
}
