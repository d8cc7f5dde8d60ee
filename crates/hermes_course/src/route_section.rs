use hermes_directions::{driving_route::DrivingRoute, transit_api::TransitRoute};
use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{transport_mode::TransportMode, waypoint::Waypoint};

/// Directions for one leg, in the shape of the client that resolved it. The
/// two shapes measure time differently and are never mixed within a run.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResolvedLeg {
    Driving(DrivingRoute),
    Transit(TransitRoute),
}

impl ResolvedLeg {
    pub fn mode(&self) -> TransportMode {
        match self {
            ResolvedLeg::Driving(_) => TransportMode::Driving,
            ResolvedLeg::Transit(_) => TransportMode::Transit,
        }
    }

    pub fn distance_meters(&self) -> f64 {
        match self {
            ResolvedLeg::Driving(route) => route.summary.distance,
            ResolvedLeg::Transit(route) => route.total_distance,
        }
    }

    pub fn duration(&self) -> SignedDuration {
        match self {
            ResolvedLeg::Driving(route) => SignedDuration::from_millis(route.summary.duration as i64),
            ResolvedLeg::Transit(route) => SignedDuration::from_mins(route.total_time as i64),
        }
    }

    pub fn transfer_count(&self) -> Option<u32> {
        match self {
            ResolvedLeg::Driving(_) => None,
            ResolvedLeg::Transit(route) => Some(route.transfer_count),
        }
    }
}

/// One leg of the aggregation output. `resolved` is `None` when the leg
/// could not be resolved; the section still keeps its slot.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct RouteSection {
    pub from: Waypoint,
    pub to: Waypoint,
    pub resolved: Option<ResolvedLeg>,
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub mode: TransportMode,
    pub sections: Vec<RouteSection>,
    pub total_distance_meters: f64,
    pub total_duration: SignedDuration,
    pub failed_legs: usize,
}

impl AggregateResult {
    pub fn empty(mode: TransportMode) -> Self {
        Self {
            mode,
            sections: vec![],
            total_distance_meters: 0.0,
            total_duration: SignedDuration::ZERO,
            failed_legs: 0,
        }
    }

    /// Totals over resolved sections only. Failed legs add nothing.
    pub fn from_sections(mode: TransportMode, sections: Vec<RouteSection>) -> Self {
        let (total_distance_meters, total_duration, failed_legs) = sections.iter().fold(
            (0.0, SignedDuration::ZERO, 0),
            |(distance, duration, failed), section| match &section.resolved {
                Some(leg) => (
                    distance + leg.distance_meters(),
                    duration + leg.duration(),
                    failed,
                ),
                None => (distance, duration, failed + 1),
            },
        );

        Self {
            mode,
            sections,
            total_distance_meters,
            total_duration,
            failed_legs,
        }
    }

    pub fn total_transfers(&self) -> Option<u32> {
        match self.mode {
            TransportMode::Driving => None,
            TransportMode::Transit => Some(
                self.sections
                    .iter()
                    .filter_map(|section| section.resolved.as_ref())
                    .filter_map(ResolvedLeg::transfer_count)
                    .sum(),
            ),
        }
    }
}
