//! Metrics whose entered value is already a 0-100 score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pre-scored "dropdown" metrics.
///
/// The user picks a band from a dropdown and the stored value is the score
/// itself, so no target comparison applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropdownMetric {
    #[serde(rename = "market_saturation_trade_area_overlap")]
    TradeAreaOverlap,
    #[serde(rename = "market_saturation_heat_map_intersection")]
    HeatMapIntersection,
    #[serde(rename = "demand_supply_balance")]
    SupplyDemandBalance,
}

impl DropdownMetric {
    /// Every dropdown metric.
    pub const ALL: [DropdownMetric; 3] = [
        DropdownMetric::TradeAreaOverlap,
        DropdownMetric::HeatMapIntersection,
        DropdownMetric::SupplyDemandBalance,
    ];

    /// Looks up a dropdown metric by its stored identifier.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "market_saturation_trade_area_overlap" => Some(DropdownMetric::TradeAreaOverlap),
            "market_saturation_heat_map_intersection" => Some(DropdownMetric::HeatMapIntersection),
            "demand_supply_balance" => Some(DropdownMetric::SupplyDemandBalance),
            _ => None,
        }
    }

    /// The stored identifier for this metric.
    pub fn identifier(&self) -> &'static str {
        match self {
            DropdownMetric::TradeAreaOverlap => "market_saturation_trade_area_overlap",
            DropdownMetric::HeatMapIntersection => "market_saturation_heat_map_intersection",
            DropdownMetric::SupplyDemandBalance => "demand_supply_balance",
        }
    }
}

impl fmt::Display for DropdownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for metric in DropdownMetric::ALL {
            assert_eq!(DropdownMetric::from_identifier(metric.identifier()), Some(metric));
        }
    }

    #[test]
    fn unknown_identifier_is_not_dropdown() {
        assert_eq!(DropdownMetric::from_identifier("median_household_income"), None);
        assert_eq!(DropdownMetric::from_identifier("Demand_Supply_Balance"), None);
        assert_eq!(DropdownMetric::from_identifier(""), None);
    }

    #[test]
    fn serde_uses_identifier() {
        let json = serde_json::to_string(&DropdownMetric::SupplyDemandBalance).unwrap();
        assert_eq!(json, "\"demand_supply_balance\"");
    }
}
