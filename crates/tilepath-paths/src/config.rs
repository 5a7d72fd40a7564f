use std::time::Duration;

use tilepath_core::Vec2;

/// Tuning knobs for searching, building and following paths.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Stop a search once it has run longer than this.
    pub max_search_time: Duration,
    /// Stop a search once the expanded node's `f` exceeds this many times
    /// the start node's `f`.
    pub cost_factor: u32,
    /// Headroom hint passed to every tile permission query.
    pub vertical_clearance: u8,
    /// Upper bound on the number of waypoints in a built path.
    pub max_waypoints: usize,
    /// Collapse straight horizontal/vertical runs to their endpoints.
    pub reduce_points: bool,
    /// Per-axis distance at which a consumer counts as having reached its
    /// current waypoint.
    pub waypoint_threshold: Vec2,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_time: Duration::from_millis(10),
            cost_factor: 5,
            vertical_clearance: 3,
            max_waypoints: 1024,
            reduce_points: true,
            waypoint_threshold: Vec2::new(0.5, 1.0),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = SearchConfig {
            cost_factor: 8,
            reduce_points: false,
            ..SearchConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
