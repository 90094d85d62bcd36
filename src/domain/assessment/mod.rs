//! Assessment module - metric sets, site assessments and their recalculation.
//!
//! A [`MetricSet`] defines what gets measured and the target for each metric.
//! A [`SiteAssessment`] records one candidate site's measurements and
//! site-visit grades against a set. [`AssessmentRecalculator`] turns those
//! into signal scores with the ScoreEngine.

mod errors;
mod events;
mod metric_set;
mod recalculator;
mod site_assessment;
mod site_visit;

pub use errors::AssessmentError;
pub use events::{AssessmentScoresRecalculated, MetricSetMetricsChanged, MetricTargetsUpdated};
pub use metric_set::{MetricCategory, MetricDefinition, MetricKey, MetricSet, MAX_NAME_LENGTH};
pub use recalculator::{AssessmentRecalculator, MetricBreakdown, RecalculationOutcome};
pub use site_assessment::{MetricValue, SiteAssessment, MAX_SITE_NAME_LENGTH};
pub use site_visit::{
    SiteVisitCriterion, SiteVisitGrade, SiteVisitRating, SITE_VISIT_CRITERIA_COUNT,
};
