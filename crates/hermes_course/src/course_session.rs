use std::{sync::Arc, time::Duration};

use hermes_directions::route_option::RouteOption;
use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    course::Course,
    course_aggregator::CourseAggregator,
    leg_directions::{DrivingDirections, TransitDirections},
    route_section::AggregateResult,
    transport_mode::TransportMode,
};

#[derive(Clone, Debug, Serialize, JsonSchema)]
#[serde(tag = "status")]
pub enum CourseSummaryState {
    Idle,
    InProgress {
        generation: u64,
    },
    Ready {
        generation: u64,
        result: Arc<AggregateResult>,
    },
}

struct SessionState {
    latest_generation: u64,
    summary: CourseSummaryState,
    touched_at: Instant,
}

/// The caller-visible summary of one course being edited. Every refresh
/// starts a new generation; a run only publishes if no newer run has started
/// since, so a slow stale run can never replace fresher results.
pub struct CourseSession {
    state: RwLock<SessionState>,
}

impl Default for CourseSession {
    fn default() -> Self {
        Self {
            state: RwLock::new(SessionState {
                latest_generation: 0,
                summary: CourseSummaryState::Idle,
                touched_at: Instant::now(),
            }),
        }
    }
}

impl CourseSession {
    pub fn state(&self) -> CourseSummaryState {
        self.state.read().summary.clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.state.read().latest_generation
    }

    /// A session expires once it has been left alone for `ttl`. Sessions
    /// with a run in flight never expire.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        let state = self.state.read();
        !matches!(state.summary, CourseSummaryState::InProgress { .. })
            && now.saturating_duration_since(state.touched_at) >= ttl
    }

    /// Recomputes the summary from scratch. Returns `None` when the run was
    /// superseded by a newer refresh before it completed.
    pub async fn refresh<D, T>(
        &self,
        aggregator: &CourseAggregator<D, T>,
        course: &Course,
        mode: TransportMode,
        option: RouteOption,
    ) -> Option<Arc<AggregateResult>>
    where
        D: DrivingDirections,
        T: TransitDirections,
    {
        let generation = {
            let mut state = self.state.write();
            state.latest_generation += 1;
            state.summary = CourseSummaryState::InProgress {
                generation: state.latest_generation,
            };
            state.touched_at = Instant::now();
            state.latest_generation
        };
        debug!("Starting course summary generation {generation}");

        let result = aggregator.aggregate_with_option(course, mode, option).await;

        let mut state = self.state.write();
        if state.latest_generation != generation {
            warn!(
                "Discarding course summary generation {generation}, generation {} is newer",
                state.latest_generation
            );
            return None;
        }

        let result = Arc::new(result);
        state.summary = CourseSummaryState::Ready {
            generation,
            result: Arc::clone(&result),
        };
        state.touched_at = Instant::now();

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        route_section::ResolvedLeg,
        test_utils::{MockDirections, course},
    };

    use super::*;

    fn assert_send<F: Future + Send>(future: F) -> F {
        future
    }

    #[tokio::test]
    async fn test_refresh_publishes_result() {
        let directions = MockDirections::default();
        let aggregator = CourseAggregator::new(&directions, &directions);
        let session = CourseSession::default();

        assert!(matches!(session.state(), CourseSummaryState::Idle));

        let result = session
            .refresh(
                &aggregator,
                &course(&["a", "b", "c"]),
                TransportMode::Driving,
                RouteOption::Optimal,
            )
            .await
            .unwrap();

        assert_eq!(result.sections.len(), 2);
        match session.state() {
            CourseSummaryState::Ready { generation, result } => {
                assert_eq!(generation, 1);
                assert_eq!(result.sections.len(), 2);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_forwards_route_option() {
        let directions = MockDirections::default();
        let aggregator = CourseAggregator::new(&directions, &directions);
        let session = CourseSession::default();

        let result = assert_send(session.refresh(
            &aggregator,
            &course(&["a", "b"]),
            TransportMode::Driving,
            RouteOption::Comfort,
        ))
        .await
        .unwrap();

        match &result.sections[0].resolved {
            Some(ResolvedLeg::Driving(route)) => assert_eq!(route.option, RouteOption::Comfort),
            other => panic!("unexpected leg {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_run_never_overwrites_newer_result() {
        let directions = MockDirections::default().delayed("slow", Duration::from_millis(500));
        let aggregator = CourseAggregator::new(&directions, &directions);
        let session = CourseSession::default();

        let stale_course = course(&["slow", "b"]);
        let fresh_course = course(&["a", "b", "c"]);

        let (stale, fresh) = tokio::join!(
            session.refresh(
                &aggregator,
                &stale_course,
                TransportMode::Driving,
                RouteOption::Optimal
            ),
            session.refresh(
                &aggregator,
                &fresh_course,
                TransportMode::Driving,
                RouteOption::Optimal
            ),
        );

        assert!(stale.is_none());
        assert_eq!(fresh.unwrap().sections.len(), 2);

        match session.state() {
            CourseSummaryState::Ready { generation, result } => {
                assert_eq!(generation, 2);
                assert_eq!(result.sections[0].from.id, "a");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_run_leaves_newer_run_in_progress() {
        let directions = MockDirections::default()
            .delayed("first", Duration::from_millis(100))
            .delayed("second", Duration::from_millis(300));
        let aggregator = CourseAggregator::new(&directions, &directions);
        let session = CourseSession::default();

        let first_course = course(&["first", "b"]);
        let second_course = course(&["second", "b"]);

        let (first, second, midway) = tokio::join!(
            session.refresh(
                &aggregator,
                &first_course,
                TransportMode::Transit,
                RouteOption::Optimal
            ),
            session.refresh(
                &aggregator,
                &second_course,
                TransportMode::Transit,
                RouteOption::Optimal
            ),
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                session.state()
            },
        );

        assert!(first.is_none());
        assert!(second.is_some());
        assert!(matches!(
            midway,
            CourseSummaryState::InProgress { generation: 2 }
        ));
        assert_eq!(session.latest_generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_skips_running_sessions() {
        let directions = MockDirections::default().delayed("a", Duration::from_secs(120));
        let aggregator = CourseAggregator::new(&directions, &directions);
        let session = CourseSession::default();
        let ttl = Duration::from_secs(60);
        let slow_course = course(&["a", "b"]);

        assert!(!session.is_expired(Instant::now(), ttl));

        let (_, expired_midway) = tokio::join!(
            session.refresh(
                &aggregator,
                &slow_course,
                TransportMode::Driving,
                RouteOption::Optimal
            ),
            async {
                tokio::time::sleep(Duration::from_secs(90)).await;
                session.is_expired(Instant::now(), ttl)
            },
        );

        assert!(!expired_midway);
        // the published result touched the session
        assert!(!session.is_expired(Instant::now(), ttl));

        tokio::time::advance(ttl).await;
        assert!(session.is_expired(Instant::now(), ttl));
    }
}
