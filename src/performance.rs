use chrono::{Duration, NaiveDateTime};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::{MatchRecord, PerformanceEntry, Period, SetResult};
use crate::validation::{validate, ValidationError};

/// Win or loss for `athlete_id` in `record`.
///
/// `None` when the athlete did not play, the score is not set yet, or the
/// stored score is not a legal set.
pub fn outcome_for(record: &MatchRecord, athlete_id: &str) -> Option<SetResult> {
    let side = record.side_of(athlete_id)?;
    validate(&record.score())
        .ok()
        .map(|score| score.result_for(side))
}

/// Decided matches of `athlete_id`, oldest first.
///
/// Matches without a usable date cannot be placed on the timeline and are left out.
pub fn performance_history(athlete_id: &str, records: &[MatchRecord]) -> Vec<PerformanceEntry> {
    let entries = records
        .iter()
        .filter_map(|record| {
            let side = record.side_of(athlete_id)?;
            let Some(played_at) = record.played_at else {
                debug!(match_id = %record.id, "skipping match without a date");
                return None;
            };
            match validate(&record.score()) {
                Ok(score) => Some(PerformanceEntry {
                    match_id: record.id.clone(),
                    played_at,
                    score_label: score.label(),
                    result: score.result_for(side),
                    venue: record.venue.clone().unwrap_or_default(),
                }),
                Err(ValidationError::MissingGames) => None,
                Err(reason) => {
                    warn!(
                        match_id = %record.id,
                        %reason,
                        "skipping match with invalid stored score"
                    );
                    None
                }
            }
        })
        .sorted_by_key(|entry| entry.played_at)
        .collect_vec();
    debug!(count = entries.len(), athlete_id, "built performance history");
    entries
}

/// Every match `athlete_id` took part in, newest first. Undated matches come last.
pub fn matches_for_athlete<'a>(
    athlete_id: &str,
    records: &'a [MatchRecord],
) -> Vec<&'a MatchRecord> {
    records
        .iter()
        .filter(|record| record.involves(athlete_id))
        .sorted_by(|a, b| b.played_at.cmp(&a.played_at))
        .collect_vec()
}

/// Wins and losses in `entries`.
pub fn record_summary(entries: &[PerformanceEntry]) -> (usize, usize) {
    entries
        .iter()
        .fold((0, 0), |(wins, losses), entry| match entry.result {
            SetResult::Win => (wins + 1, losses),
            SetResult::Loss => (wins, losses + 1),
        })
}

impl Period {
    /// Keep the records played at or after `now` minus the period.
    ///
    /// Undated records are only kept by [`Period::All`].
    pub fn filter<'a>(
        self,
        records: &'a [MatchRecord],
        now: NaiveDateTime,
    ) -> Vec<&'a MatchRecord> {
        match self.days() {
            None => records.iter().collect_vec(),
            Some(days) => {
                let cutoff = now - Duration::days(days);
                records
                    .iter()
                    .filter(|record| record.played_at.is_some_and(|d| d >= cutoff))
                    .collect_vec()
            }
        }
    }
}
