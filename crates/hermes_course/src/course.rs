use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::waypoint::Waypoint;

/// An ordered list of waypoints. Each adjacent pair is a leg, so every edit
/// shifts leg boundaries and calls for a full re-aggregation.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Course {
    waypoints: Vec<Waypoint>,
}

impl Course {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    /// Inserts at `index`, clamped to the end of the course.
    pub fn insert(&mut self, index: usize, waypoint: Waypoint) {
        let index = index.min(self.waypoints.len());
        self.waypoints.insert(index, waypoint);
    }

    pub fn remove(&mut self, index: usize) -> Option<Waypoint> {
        if index < self.waypoints.len() {
            Some(self.waypoints.remove(index))
        } else {
            None
        }
    }

    /// Moves the waypoint at `from` so that it ends up at `to`.
    pub fn move_waypoint(&mut self, from: usize, to: usize) -> bool {
        if from >= self.waypoints.len() || to >= self.waypoints.len() {
            return false;
        }

        let waypoint = self.waypoints.remove(from);
        self.waypoints.insert(to, waypoint);
        true
    }

    /// Adjacent `(from, to)` pairs in course order.
    pub fn legs(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint)> {
        self.waypoints.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl From<Vec<Waypoint>> for Course {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self::new(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::waypoint;

    use super::*;

    fn ids(course: &Course) -> Vec<&str> {
        course
            .waypoints()
            .iter()
            .map(|waypoint| waypoint.id.as_str())
            .collect()
    }

    #[test]
    fn test_legs_follow_course_order() {
        let course = Course::new(vec![waypoint("a"), waypoint("b"), waypoint("c")]);

        let legs: Vec<(&str, &str)> = course
            .legs()
            .map(|(from, to)| (from.id.as_str(), to.id.as_str()))
            .collect();

        assert_eq!(legs, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_single_waypoint_has_no_legs() {
        let course = Course::new(vec![waypoint("a")]);
        assert_eq!(course.legs().count(), 0);
        assert_eq!(Course::default().legs().count(), 0);
    }

    #[test]
    fn test_edits() {
        let mut course = Course::default();
        course.push(waypoint("a"));
        course.push(waypoint("c"));
        course.insert(1, waypoint("b"));
        course.insert(10, waypoint("d"));
        assert_eq!(ids(&course), vec!["a", "b", "c", "d"]);

        assert!(course.move_waypoint(3, 0));
        assert_eq!(ids(&course), vec!["d", "a", "b", "c"]);
        assert!(!course.move_waypoint(0, 4));

        assert_eq!(course.remove(1).map(|waypoint| waypoint.id), Some(String::from("a")));
        assert_eq!(course.remove(5), None);
        assert_eq!(ids(&course), vec!["d", "b", "c"]);
        assert_eq!(course.len(), 3);
    }

    #[test]
    fn test_course_is_a_json_array() {
        let course: Course = serde_json::from_str(
            r#"[
                { "id": "1", "lat": 37.5, "lng": 127.0, "name": "Seoul Forest", "address": "Seongsu-dong" },
                { "id": "2", "lat": 37.6, "lng": 127.1, "name": "Cafe", "category": "cafe" }
            ]"#,
        )
        .unwrap();

        assert_eq!(course.len(), 2);
        assert_eq!(course.waypoints()[1].category.as_deref(), Some("cafe"));
        assert_eq!(course.waypoints()[1].address, "");
    }
}
