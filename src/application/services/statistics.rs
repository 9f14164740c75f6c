//! Dashboard statistics over the full entry set

use serde::Serialize;

use crate::domain::{EntryStatus, FmeaEntry, RiskLevel};

/// Entry counts per derived risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Entry counts per workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// Aggregates shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub total_entries: usize,
    pub risk_distribution: RiskDistribution,
    pub status_distribution: StatusDistribution,
    /// Share of completed entries in percent, rounded to one decimal
    pub completion_rate: f64,
}

/// Compute dashboard statistics.
///
/// The risk tier of every entry is recomputed from its ratings; nothing
/// is read from a stored value.
pub fn compute_statistics(entries: &[FmeaEntry]) -> Statistics {
    let total = entries.len();

    let mut risk = RiskDistribution {
        high: 0,
        medium: 0,
        low: 0,
    };
    let mut status = StatusDistribution {
        open: 0,
        in_progress: 0,
        completed: 0,
    };

    for entry in entries {
        match entry.risk_level() {
            RiskLevel::High => risk.high += 1,
            RiskLevel::Medium => risk.medium += 1,
            RiskLevel::Low => risk.low += 1,
        }
        match entry.status {
            EntryStatus::Open => status.open += 1,
            EntryStatus::InProgress => status.in_progress += 1,
            EntryStatus::Completed => status.completed += 1,
        }
    }

    let completion_rate = if total == 0 {
        0.0
    } else {
        round_one_decimal(status.completed as f64 / total as f64 * 100.0)
    };

    Statistics {
        total_entries: total,
        risk_distribution: risk,
        status_distribution: status,
        completion_rate,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(severity: i32, occurrence: i32, detection: i32, status: EntryStatus) -> FmeaEntry {
        let now = Utc::now();
        FmeaEntry {
            id: 1,
            function: "Temperaturregelung".to_string(),
            failure_mode: "Überhitzung".to_string(),
            failure_effect: "Komponentenschäden".to_string(),
            severity,
            failure_cause: "Defekter Temperatursensor".to_string(),
            occurrence,
            test_method: "Temperaturüberwachung".to_string(),
            detection,
            actions: None,
            status,
            created_by: "user-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_store_yields_zeroes_without_division_fault() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn counts_per_tier_and_status() {
        let entries = vec![
            entry(8, 3, 2, EntryStatus::Open),        // rpn 48, low
            entry(10, 2, 3, EntryStatus::InProgress), // rpn 60, medium
            entry(7, 4, 4, EntryStatus::Completed),   // rpn 112, high
        ];

        let stats = compute_statistics(&entries);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.risk_distribution.high, 1);
        assert_eq!(stats.risk_distribution.medium, 1);
        assert_eq!(stats.risk_distribution.low, 1);
        assert_eq!(stats.status_distribution.open, 1);
        assert_eq!(stats.status_distribution.in_progress, 1);
        assert_eq!(stats.status_distribution.completed, 1);
        assert_eq!(stats.completion_rate, 33.3);
    }

    #[test]
    fn tier_boundaries_match_the_classifier() {
        let entries = vec![
            entry(5, 10, 1, EntryStatus::Open), // rpn 50, low
            entry(5, 10, 2, EntryStatus::Open), // rpn 100, medium
        ];

        let stats = compute_statistics(&entries);
        assert_eq!(stats.risk_distribution.low, 1);
        assert_eq!(stats.risk_distribution.medium, 1);
        assert_eq!(stats.risk_distribution.high, 0);
    }

    #[test]
    fn completion_rate_is_rounded_to_one_decimal() {
        let entries = vec![
            entry(1, 1, 1, EntryStatus::Completed),
            entry(1, 1, 1, EntryStatus::Completed),
            entry(1, 1, 1, EntryStatus::Open),
        ];

        // 2/3 = 66.666... -> 66.7
        assert_eq!(compute_statistics(&entries).completion_rate, 66.7);
    }
}
