use std::future::Future;

use hermes_directions::{
    directions_error::DirectionsError,
    driving_route::{DrivingRequest, DrivingRoute},
    naver_api::NaverDirectionsClient,
    route_option::RouteOption,
    transit_api::{TransitDirectionsClient, TransitRoute},
};

use crate::waypoint::Waypoint;

/// Resolves a single driving leg.
pub trait DrivingDirections {
    fn driving_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        option: RouteOption,
    ) -> impl Future<Output = Result<DrivingRoute, DirectionsError>> + Send;
}

/// Resolves a single transit leg.
pub trait TransitDirections {
    fn transit_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> impl Future<Output = Result<TransitRoute, DirectionsError>> + Send;
}

impl<D: DrivingDirections> DrivingDirections for &D {
    fn driving_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        option: RouteOption,
    ) -> impl Future<Output = Result<DrivingRoute, DirectionsError>> + Send {
        (**self).driving_leg(from, to, option)
    }
}

impl<T: TransitDirections> TransitDirections for &T {
    fn transit_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> impl Future<Output = Result<TransitRoute, DirectionsError>> + Send {
        (**self).transit_leg(from, to)
    }
}

/// The provider request for a single leg. Waypoints are never passed for a
/// leg; intermediate stops are legs of their own.
pub fn leg_request(from: &Waypoint, to: &Waypoint, option: RouteOption) -> DrivingRequest {
    DrivingRequest::new(from.point(), to.point(), option)
}

impl DrivingDirections for NaverDirectionsClient {
    async fn driving_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
        option: RouteOption,
    ) -> Result<DrivingRoute, DirectionsError> {
        self.route(&leg_request(from, to, option)).await
    }
}

impl TransitDirections for TransitDirectionsClient {
    async fn transit_leg(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> Result<TransitRoute, DirectionsError> {
        self.route(&from.point(), &to.point()).await
    }
}
