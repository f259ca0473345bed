//! Production statistics derived from a set of shots.
//!
//! Used for per-project summaries and the global dashboard.

use indexmap::IndexMap;
use serde::Serialize;

use crate::pipeline::{ProductionStage, PRODUCTION_STAGES};

/// The statistics-relevant view of a shot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotProgress {
    pub production_status: String,
    pub duration_target_sec: f64,
}

/// Aggregate progress over a set of shots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionStats {
    pub shot_count: i64,
    /// Percentage of shots at `final`, rounded to one decimal place.
    pub completion_pct: f64,
    /// Sum of target durations in seconds.
    pub total_duration: f64,
    /// Shot count per stage, keyed in pipeline order. Every stage is present.
    pub stage_counts: IndexMap<String, i64>,
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// An all-zero stage count map in pipeline order.
pub fn empty_stage_counts() -> IndexMap<String, i64> {
    PRODUCTION_STAGES.iter().map(|s| (s.to_string(), 0)).collect()
}

/// Compute statistics for `shots`.
///
/// Shots carrying an unknown status still count towards `shot_count` and
/// `total_duration` but not towards any stage.
pub fn summarize(shots: &[ShotProgress]) -> ProductionStats {
    let mut stage_counts = empty_stage_counts();
    let mut finals = 0_i64;
    let mut total_duration = 0.0;

    for shot in shots {
        total_duration += shot.duration_target_sec;
        if let Some(count) = stage_counts.get_mut(shot.production_status.as_str()) {
            *count += 1;
        }
        if shot.production_status == ProductionStage::Final.as_str() {
            finals += 1;
        }
    }

    let shot_count = shots.len() as i64;
    let completion_pct = if shot_count > 0 {
        round1(finals as f64 / shot_count as f64 * 100.0)
    } else {
        0.0
    };

    ProductionStats {
        shot_count,
        completion_pct,
        total_duration,
        stage_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(status: &str, secs: f64) -> ShotProgress {
        ShotProgress {
            production_status: status.to_string(),
            duration_target_sec: secs,
        }
    }

    #[test]
    fn empty_set_is_zero_everywhere() {
        let stats = summarize(&[]);
        assert_eq!(stats.shot_count, 0);
        assert_eq!(stats.completion_pct, 0.0);
        assert_eq!(stats.total_duration, 0.0);
        assert_eq!(stats.stage_counts.len(), 7);
        assert!(stats.stage_counts.values().all(|c| *c == 0));
    }

    #[test]
    fn stage_counts_follow_pipeline_order() {
        let stats = summarize(&[]);
        let keys: Vec<&str> = stats.stage_counts.keys().map(String::as_str).collect();
        assert_eq!(keys, PRODUCTION_STAGES);
    }

    #[test]
    fn completion_rounds_to_one_decimal() {
        let shots = [
            progress("final", 5.0),
            progress("concept", 5.0),
            progress("mixed", 5.0),
        ];
        let stats = summarize(&shots);
        assert_eq!(stats.completion_pct, 33.3);
        assert_eq!(stats.total_duration, 15.0);
        assert_eq!(stats.stage_counts["final"], 1);
        assert_eq!(stats.stage_counts["mixed"], 1);
        assert_eq!(stats.stage_counts["concept"], 1);
    }

    #[test]
    fn all_final_is_one_hundred_percent() {
        let shots = [progress("final", 2.0), progress("final", 3.5)];
        let stats = summarize(&shots);
        assert_eq!(stats.completion_pct, 100.0);
        assert_eq!(stats.total_duration, 5.5);
    }

    #[test]
    fn unknown_status_counts_only_towards_totals() {
        let shots = [progress("archived", 4.0), progress("concept", 1.0)];
        let stats = summarize(&shots);
        assert_eq!(stats.shot_count, 2);
        assert_eq!(stats.total_duration, 5.0);
        assert_eq!(stats.stage_counts.values().sum::<i64>(), 1);
    }
}
