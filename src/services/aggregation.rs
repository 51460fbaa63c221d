//! Join, bucket and summarise readings.
//!
//! Everything here is pure: the stores hand over snapshots of panels and
//! readings and the functions below compute over them in memory.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{AggregateBucket, Panel, Reading};

/// Start of the UTC calendar day containing `now`. Readings strictly
/// before this instant are historical.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new(kilo_watt: f64) -> Self {
        Self {
            count: 1,
            sum: kilo_watt,
            min: kilo_watt,
            max: kilo_watt,
        }
    }

    fn push(&mut self, kilo_watt: f64) {
        self.count += 1;
        self.sum += kilo_watt;
        self.min = self.min.min(kilo_watt);
        self.max = self.max.max(kilo_watt);
    }

    fn finish(self, panel_id: i64, date: NaiveDate) -> AggregateBucket {
        // Rounding in the sum can push the mean a hair outside the extrema.
        let average = (self.sum / self.count as f64).clamp(self.min, self.max);

        AggregateBucket {
            panel_id,
            date,
            sum: self.sum,
            average,
            min: self.min,
            max: self.max,
        }
    }
}

/// Groups every reading older than `cutoff` by `(panel_id, day)` and
/// computes sum, average, min and max per group.
///
/// Readings whose panel is not in `panels` are dropped, as are readings
/// with a non-finite `kilo_watt`. Buckets come back ordered by panel id,
/// then date.
pub fn historical_buckets(
    panels: &[Panel],
    readings: &[Reading],
    cutoff: DateTime<Utc>,
) -> Vec<AggregateBucket> {
    let known: HashSet<i64> = panels.iter().map(|p| p.id).collect();
    let mut groups: BTreeMap<(i64, NaiveDate), Accumulator> = BTreeMap::new();

    for reading in readings
        .iter()
        .filter(|r| known.contains(&r.panel_id))
        .filter(|r| r.timestamp < cutoff)
        .filter(|r| r.kilo_watt.is_finite())
    {
        let key = (reading.panel_id, reading.timestamp.date_naive());
        groups
            .entry(key)
            .and_modify(|acc| acc.push(reading.kilo_watt))
            .or_insert_with(|| Accumulator::new(reading.kilo_watt));
    }

    groups
        .into_iter()
        .map(|((panel_id, date), acc)| acc.finish(panel_id, date))
        .collect()
}

/// Per-day breakdown for a single panel.
///
/// Not computed yet: the result is always empty. Callers already receive the
/// bucket shape, so filling this in (for example with `historical_buckets`
/// over `[panel]`) changes no signatures.
pub fn daily_breakdown(_panel: &Panel, _readings: &[Reading]) -> Vec<AggregateBucket> {
    Vec::new()
}
