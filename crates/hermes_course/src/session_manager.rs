use std::{sync::Arc, time::Duration};

use fxhash::FxHashMap;
use tokio::{sync::RwLock, time::Instant};

use crate::course_session::{CourseSession, CourseSummaryState};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Sessions keyed by caller-supplied ids. Ids are not authenticated, so
/// sessions left alone past the TTL are evicted by `evict_expired`.
pub struct SessionManager {
    sessions: RwLock<FxHashMap<String, Arc<CourseSession>>>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The session for `session_id`, created on first use.
    pub async fn session(&self, session_id: &str) -> Arc<CourseSession> {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return Arc::clone(session);
        }

        Arc::clone(
            self.sessions
                .write()
                .await
                .entry(session_id.to_string())
                .or_default(),
        )
    }

    pub async fn get_state(&self, session_id: &str) -> Option<CourseSummaryState> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|session| session.state())
    }

    pub async fn close(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops idle and ready sessions untouched for longer than the TTL.
    /// Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.ttl));

        before - sessions.len()
    }
}
