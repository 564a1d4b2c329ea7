//! Per-club aggregate statistics
//!
//! Pure and order-independent: any permutation of the input produces the
//! same output.

use crate::models::ShotRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Average/min/max over the observed values of one metric
///
/// All three are 0 when the metric had no observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    /// Summarize present values; zero is a valid reading, not absence
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            avg: sum / values.len() as f64,
            min,
            max,
        }
    }
}

/// Aggregate statistics for one club within a record set
#[derive(Debug, Clone, Serialize)]
pub struct ClubAggregate {
    pub shots: Vec<ShotRecord>,
    pub carry: MetricSummary,
    pub side: MetricSummary,
    pub total: MetricSummary,
    pub ball_speed: MetricSummary,
    pub spin_rate: MetricSummary,
}

impl ClubAggregate {
    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }
}

/// Group records by club and summarize the five tracked metrics
pub fn compute_club_stats(records: &[ShotRecord]) -> BTreeMap<String, ClubAggregate> {
    let mut grouped: BTreeMap<String, Vec<ShotRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.club.clone())
            .or_default()
            .push(record.clone());
    }

    grouped
        .into_iter()
        .map(|(club, shots)| {
            let summarize = |metric: fn(&ShotRecord) -> Option<f64>| -> MetricSummary {
                let values: Vec<f64> = shots.iter().filter_map(metric).collect();
                MetricSummary::from_values(&values)
            };

            let carry = summarize(|s| s.carry_distance);
            let side = summarize(|s| s.side_total);
            let total = summarize(|s| s.total_distance);
            let ball_speed = summarize(|s| s.ball_speed);
            let spin_rate = summarize(|s| s.spin_rate);

            let aggregate = ClubAggregate {
                shots,
                carry,
                side,
                total,
                ball_speed,
                spin_rate,
            };
            (club, aggregate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vendor;
    use chrono::Utc;

    fn shot(club: &str, carry: Option<f64>, ball_speed: Option<f64>) -> ShotRecord {
        ShotRecord {
            owner_id: "user_1".to_string(),
            batch_id: "batch_1".to_string(),
            vendor: Vendor::Rapsodo,
            row_index: 0,
            club: club.to_string(),
            ball_speed,
            club_speed: None,
            vla: None,
            peak_height: None,
            descent_angle: None,
            spin_rate: None,
            carry_distance: carry,
            side_total: None,
            total_distance: None,
            session_name: String::new(),
            notes: String::new(),
            elevation: 0.0,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_groups_by_club() {
        let records = vec![
            shot("Driver", Some(250.0), Some(160.0)),
            shot("Driver", Some(240.0), Some(155.0)),
            shot("7 Iron", Some(150.0), None),
        ];

        let stats = compute_club_stats(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["Driver"].shot_count(), 2);
        assert_eq!(stats["7 Iron"].shot_count(), 1);
    }

    #[test]
    fn test_avg_min_max() {
        let records = vec![
            shot("Driver", Some(250.0), None),
            shot("Driver", Some(240.0), None),
            shot("Driver", Some(260.0), None),
        ];

        let driver = &compute_club_stats(&records)["Driver"];
        assert_eq!(driver.carry.avg, 250.0);
        assert_eq!(driver.carry.min, 240.0);
        assert_eq!(driver.carry.max, 260.0);
    }

    #[test]
    fn test_zero_is_a_valid_reading() {
        let records = vec![
            shot("Sand Wedge", Some(0.0), None),
            shot("Sand Wedge", Some(80.0), None),
        ];

        let wedge = &compute_club_stats(&records)["Sand Wedge"];
        assert_eq!(wedge.carry.min, 0.0);
        assert_eq!(wedge.carry.avg, 40.0);
        assert_eq!(wedge.carry.max, 80.0);
    }

    #[test]
    fn test_metric_without_observations_reports_zeros() {
        let records = vec![shot("Driver", Some(250.0), None)];

        let driver = &compute_club_stats(&records)["Driver"];
        assert_eq!(driver.ball_speed, MetricSummary::default());
        assert_eq!(driver.spin_rate.avg, 0.0);
        assert_eq!(driver.spin_rate.min, 0.0);
        assert_eq!(driver.spin_rate.max, 0.0);
    }

    #[test]
    fn test_deterministic_under_permutation() {
        let a = shot("Driver", Some(250.0), Some(160.0));
        let b = shot("7 Iron", Some(150.0), Some(120.0));
        let c = shot("Driver", Some(240.0), Some(150.0));
        let d = shot("Pitching Wedge", Some(110.0), None);

        let forward = compute_club_stats(&[a.clone(), b.clone(), c.clone(), d.clone()]);
        let backward = compute_club_stats(&[d, c, b, a]);

        let forward_keys: Vec<_> = forward.keys().collect();
        let backward_keys: Vec<_> = backward.keys().collect();
        assert_eq!(forward_keys, backward_keys);

        for (club, stats) in &forward {
            let other = &backward[club];
            assert_eq!(stats.shot_count(), other.shot_count());
            assert_eq!(stats.carry, other.carry);
            assert_eq!(stats.ball_speed, other.ball_speed);
            assert_eq!(stats.spin_rate, other.spin_rate);
        }
    }
}
