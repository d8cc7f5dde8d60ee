use std::{num::NonZeroUsize, str::FromStr};

use futures::{StreamExt, stream};
use hermes_directions::route_option::RouteOption;
use tracing::{info, instrument, warn};

use crate::{
    course::Course,
    leg_directions::{DrivingDirections, TransitDirections},
    route_section::{AggregateResult, ResolvedLeg, RouteSection},
    transport_mode::TransportMode,
    waypoint::Waypoint,
};

/// How many legs may be in flight at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LegConcurrency {
    /// One leg at a time, in course order.
    #[default]
    Sequential,
    Bounded(NonZeroUsize),
}

impl LegConcurrency {
    pub fn limit(&self) -> usize {
        match self {
            LegConcurrency::Sequential => 1,
            LegConcurrency::Bounded(limit) => limit.get(),
        }
    }
}

impl FromStr for LegConcurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("sequential") {
            return Ok(LegConcurrency::Sequential);
        }

        s.parse::<NonZeroUsize>()
            .map(|limit| {
                if limit.get() == 1 {
                    LegConcurrency::Sequential
                } else {
                    LegConcurrency::Bounded(limit)
                }
            })
            .map_err(|_| format!("Invalid leg concurrency: {s}"))
    }
}

/// Folds a course into per-leg sections and travel totals. The same
/// aggregator serves every caller; it keeps no state between runs.
pub struct CourseAggregator<D, T> {
    driving: D,
    transit: T,
    route_option: RouteOption,
    concurrency: LegConcurrency,
}

impl<D, T> CourseAggregator<D, T>
where
    D: DrivingDirections,
    T: TransitDirections,
{
    pub fn new(driving: D, transit: T) -> Self {
        Self {
            driving,
            transit,
            route_option: RouteOption::default(),
            concurrency: LegConcurrency::default(),
        }
    }

    pub fn with_route_option(mut self, route_option: RouteOption) -> Self {
        self.route_option = route_option;
        self
    }

    pub fn with_concurrency(mut self, concurrency: LegConcurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn driving(&self) -> &D {
        &self.driving
    }

    pub fn route_option(&self) -> RouteOption {
        self.route_option
    }

    pub async fn aggregate(&self, course: &Course, mode: TransportMode) -> AggregateResult {
        self.aggregate_with_option(course, mode, self.route_option)
            .await
    }

    /// Resolves every leg of `course` with the client for `mode`. Legs that
    /// fail are kept as unresolved sections and do not count in the totals.
    #[instrument(skip_all, fields(mode = %mode, waypoints = course.len()))]
    pub async fn aggregate_with_option(
        &self,
        course: &Course,
        mode: TransportMode,
        option: RouteOption,
    ) -> AggregateResult {
        if course.len() < 2 {
            return AggregateResult::empty(mode);
        }

        // Leg futures are built up front so the stream holds concrete
        // borrows of `course`, which keeps the whole future `Send`.
        let legs: Vec<_> = course
            .legs()
            .enumerate()
            .map(|(index, (from, to))| self.resolve_leg(index, from, to, mode, option))
            .collect();

        // `buffered` yields in input order whatever the completion order
        let resolved: Vec<Option<ResolvedLeg>> = stream::iter(legs)
            .buffered(self.concurrency.limit())
            .collect()
            .await;

        let sections = course
            .legs()
            .zip(resolved)
            .map(|((from, to), resolved)| RouteSection {
                from: from.clone(),
                to: to.clone(),
                resolved,
            })
            .collect();

        let result = AggregateResult::from_sections(mode, sections);
        info!(
            "Aggregated {} legs ({} failed): {} m, {}",
            result.sections.len(),
            result.failed_legs,
            result.total_distance_meters,
            result.total_duration
        );

        result
    }

    async fn resolve_leg(
        &self,
        index: usize,
        from: &Waypoint,
        to: &Waypoint,
        mode: TransportMode,
        option: RouteOption,
    ) -> Option<ResolvedLeg> {
        let result = match mode {
            TransportMode::Driving => self
                .driving
                .driving_leg(from, to, option)
                .await
                .map(ResolvedLeg::Driving),
            TransportMode::Transit => self
                .transit
                .transit_leg(from, to)
                .await
                .map(ResolvedLeg::Transit),
        };

        match result {
            Ok(leg) => Some(leg),
            Err(error) => {
                warn!(
                    leg = index,
                    from = %from.id,
                    to = %to.id,
                    retryable = error.is_retryable(),
                    "Leg could not be resolved: {error}"
                );
                None
            }
        }
    }
}
