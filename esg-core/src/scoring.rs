//! Compliance scoring
//!
//! A supplier's ESG score is the sum of the fixed point values of every
//! criterion it meets. Weights are integers summing to 100, so the score is
//! always within 0-100.

use crate::{ComplianceFlags, Criterion, EsgCategory, EsgScore};
use serde::{Deserialize, Serialize};

/// Points per criterion, indexed by `Criterion` discriminant
pub const CRITERION_WEIGHTS: [(Criterion, u8); 6] = [
    (Criterion::EnvironmentalPolicy, 15),
    (Criterion::CarbonEmissions, 20),
    (Criterion::Iso14001, 15),
    (Criterion::LabourRights, 20),
    (Criterion::HealthSafety, 15),
    (Criterion::AntiCorruption, 15),
];

/// Score a set of compliance flags
pub fn score(flags: &ComplianceFlags) -> EsgScore {
    let points = CRITERION_WEIGHTS
        .iter()
        .filter(|(criterion, _)| flags.is_met(*criterion))
        .map(|(_, weight)| *weight)
        .sum();

    EsgScore::from_points(points)
}

/// Outcome of one criterion within a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResult {
    /// Criterion evaluated
    pub criterion: Criterion,

    /// Whether it is met
    pub met: bool,

    /// Points earned (the weight if met, otherwise zero)
    pub points: u8,

    /// Points available
    pub max_points: u8,
}

/// Points earned within one ESG category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySubtotal {
    /// Category
    pub category: EsgCategory,

    /// Points earned
    pub points: u8,

    /// Points available
    pub max_points: u8,
}

/// Per-criterion view of a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// One entry per criterion, in display order
    pub criteria: Vec<CriterionResult>,

    /// One entry per category, in display order
    pub categories: Vec<CategorySubtotal>,

    /// Total score; equal to [`score`] for the same flags
    pub total: EsgScore,
}

impl ScoreBreakdown {
    /// Criterion results within a category
    pub fn in_category(&self, category: EsgCategory) -> impl Iterator<Item = &CriterionResult> {
        self.criteria
            .iter()
            .filter(move |result| result.criterion.category() == category)
    }
}

/// Break a score down by criterion and category
pub fn breakdown(flags: &ComplianceFlags) -> ScoreBreakdown {
    let criteria: Vec<CriterionResult> = CRITERION_WEIGHTS
        .iter()
        .map(|&(criterion, weight)| {
            let met = flags.is_met(criterion);
            CriterionResult {
                criterion,
                met,
                points: if met { weight } else { 0 },
                max_points: weight,
            }
        })
        .collect();

    let categories = EsgCategory::ALL
        .into_iter()
        .map(|category| {
            let (points, max_points) = criteria
                .iter()
                .filter(|result| result.criterion.category() == category)
                .fold((0u8, 0u8), |(points, max), result| {
                    (points + result.points, max + result.max_points)
                });
            CategorySubtotal {
                category,
                points,
                max_points,
            }
        })
        .collect();

    ScoreBreakdown {
        criteria,
        categories,
        total: score(flags),
    }
}
