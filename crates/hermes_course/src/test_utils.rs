use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use fxhash::{FxHashMap, FxHashSet};
use hermes_directions::{
    directions_error::DirectionsError,
    driving_route::{DrivingRoute, DrivingSummary},
    route_option::RouteOption,
    transit_api::TransitRoute,
};

use crate::{
    course::Course,
    leg_directions::{DrivingDirections, TransitDirections},
    route_section::ResolvedLeg,
    waypoint::Waypoint,
};

pub fn waypoint(id: &str) -> Waypoint {
    Waypoint {
        id: id.to_string(),
        lat: 37.5,
        lng: 127.0,
        name: format!("Waypoint {id}"),
        address: String::new(),
        category: None,
    }
}

pub fn course(ids: &[&str]) -> Course {
    Course::new(ids.iter().map(|id| waypoint(id)).collect())
}

pub fn driving_route(distance: f64, duration_ms: u64, option: RouteOption) -> DrivingRoute {
    DrivingRoute {
        option,
        path: vec![],
        summary: DrivingSummary {
            distance,
            duration: duration_ms,
            toll_fare: None,
            fuel_price: None,
            taxi_fare: None,
        },
        sections: vec![],
    }
}

pub fn driving_leg(distance: f64, duration_ms: u64) -> ResolvedLeg {
    ResolvedLeg::Driving(driving_route(distance, duration_ms, RouteOption::Optimal))
}

pub fn transit_leg(distance: f64, minutes: u64, transfers: u32) -> ResolvedLeg {
    ResolvedLeg::Transit(TransitRoute {
        total_time: minutes,
        total_distance: distance,
        transfer_count: transfers,
    })
}

/// Directions keyed by the id of a leg's origin. Driving legs are 1000 m and
/// 60 s, transit legs 2000 m, 30 min and one transfer.
#[derive(Default)]
pub struct MockDirections {
    failing: FxHashSet<String>,
    delays: FxHashMap<String, Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDirections {
    pub fn failing(mut self, from_id: &str) -> Self {
        self.failing.insert(from_id.to_string());
        self
    }

    pub fn delayed(mut self, from_id: &str, delay: Duration) -> Self {
        self.delays.insert(from_id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn visit(&self, from: &Waypoint) -> Result<(), DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&from.id) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&from.id) {
            Err(DirectionsError::Provider {
                code: 3,
                message: format!("No route from {}", from.id),
            })
        } else {
            Ok(())
        }
    }
}

impl DrivingDirections for MockDirections {
    async fn driving_leg(
        &self,
        from: &Waypoint,
        _to: &Waypoint,
        option: RouteOption,
    ) -> Result<DrivingRoute, DirectionsError> {
        self.visit(from).await?;
        Ok(driving_route(1000.0, 60_000, option))
    }
}

impl TransitDirections for MockDirections {
    async fn transit_leg(
        &self,
        from: &Waypoint,
        _to: &Waypoint,
    ) -> Result<TransitRoute, DirectionsError> {
        self.visit(from).await?;
        Ok(TransitRoute {
            total_time: 30,
            total_distance: 2000.0,
            transfer_count: 1,
        })
    }
}
