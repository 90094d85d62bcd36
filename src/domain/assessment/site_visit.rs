//! Fixed site-visit checklist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Number of site-visit criteria every assessment carries.
pub const SITE_VISIT_CRITERIA_COUNT: usize = SiteVisitCriterion::ALL.len();

/// The observations recorded on an in-person site visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteVisitCriterion {
    Visibility,
    Accessibility,
    Parking,
    Signage,
    TrafficFlow,
    CoTenancy,
    BuildingCondition,
    Safety,
    PedestrianActivity,
    SurroundingArea,
}

impl SiteVisitCriterion {
    pub const ALL: [SiteVisitCriterion; 10] = [
        SiteVisitCriterion::Visibility,
        SiteVisitCriterion::Accessibility,
        SiteVisitCriterion::Parking,
        SiteVisitCriterion::Signage,
        SiteVisitCriterion::TrafficFlow,
        SiteVisitCriterion::CoTenancy,
        SiteVisitCriterion::BuildingCondition,
        SiteVisitCriterion::Safety,
        SiteVisitCriterion::PedestrianActivity,
        SiteVisitCriterion::SurroundingArea,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SiteVisitCriterion::Visibility => "visibility",
            SiteVisitCriterion::Accessibility => "accessibility",
            SiteVisitCriterion::Parking => "parking",
            SiteVisitCriterion::Signage => "signage",
            SiteVisitCriterion::TrafficFlow => "traffic_flow",
            SiteVisitCriterion::CoTenancy => "co_tenancy",
            SiteVisitCriterion::BuildingCondition => "building_condition",
            SiteVisitCriterion::Safety => "safety",
            SiteVisitCriterion::PedestrianActivity => "pedestrian_activity",
            SiteVisitCriterion::SurroundingArea => "surrounding_area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SiteVisitCriterion::Visibility => "Visibility from main road",
            SiteVisitCriterion::Accessibility => "Ingress and egress",
            SiteVisitCriterion::Parking => "Parking availability",
            SiteVisitCriterion::Signage => "Signage opportunities",
            SiteVisitCriterion::TrafficFlow => "Traffic flow and stacking",
            SiteVisitCriterion::CoTenancy => "Co-tenancy",
            SiteVisitCriterion::BuildingCondition => "Building condition",
            SiteVisitCriterion::Safety => "Safety and lighting",
            SiteVisitCriterion::PedestrianActivity => "Pedestrian activity",
            SiteVisitCriterion::SurroundingArea => "Surrounding area",
        }
    }
}

impl fmt::Display for SiteVisitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SiteVisitCriterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteVisitCriterion::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("criterion", format!("unknown criterion '{}'", s))
            })
    }
}

/// Letter grade given to a criterion on the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SiteVisitGrade {
    A,
    B,
    C,
    D,
    F,
}

impl SiteVisitGrade {
    /// Grade points, A = 4 down to F = 0.
    pub fn points(&self) -> u8 {
        match self {
            SiteVisitGrade::A => 4,
            SiteVisitGrade::B => 3,
            SiteVisitGrade::C => 2,
            SiteVisitGrade::D => 1,
            SiteVisitGrade::F => 0,
        }
    }
}

/// One criterion's rating; `grade` stays empty until the visit is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVisitRating {
    pub criterion: SiteVisitCriterion,
    pub grade: Option<SiteVisitGrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SiteVisitRating {
    pub fn is_complete(&self) -> bool {
        self.grade.is_some()
    }
}
