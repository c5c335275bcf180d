//! ESG scoring core
//!
//! Maps supplier compliance flags to an ESG score and a risk tier, and
//! folds supplier collections into dashboard statistics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod error;
pub mod scoring;
pub mod stats;
pub mod supplier;
pub mod types;

pub use classify::classify;
pub use error::{Error, Result};
pub use scoring::{breakdown, score, ScoreBreakdown};
pub use stats::{aggregate, summarize, DashboardStats, ReportSummary};
pub use supplier::Supplier;
pub use types::*;
