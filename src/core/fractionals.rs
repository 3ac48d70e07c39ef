//! Fractional times and splits
//!
//! A fractional is the elapsed time from the start to a point of call; a
//! split is the time between two consecutive fractionals. Individual
//! starters rarely have their own fractionals on a chart, so they are
//! estimated from the race fractionals and how far behind the leader the
//! starter was at each point.

use serde::{Deserialize, Serialize};

use crate::core::distance::feet_to_furlongs;
use crate::diagnostics::{Diagnostics, Issue};
use crate::models::Starter;

/// Length of a horse, in feet, used to convert margins into time
pub const FEET_PER_LENGTH: f64 = 8.75;

/// Format milliseconds as `M:SS.mmm` without rounding
pub fn convert_millis_to_time(millis: i64) -> String {
    let minutes = millis / 60_000;
    let seconds = millis / 1000 - minutes * 60;
    let sub_second = millis % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, sub_second)
}

/// Elapsed time to a point of call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fractional {
    pub point: u32,
    pub text: String,
    pub compact: String,
    pub feet: i32,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub millis: Option<i64>,
}

impl Fractional {
    pub fn new(point: u32, text: &str, compact: &str, feet: i32, millis: Option<i64>) -> Self {
        Self {
            point,
            text: text.to_string(),
            compact: compact.to_string(),
            feet,
            time: millis.map(convert_millis_to_time),
            millis,
        }
    }

    /// Fill in `time` from `millis` when only the latter was supplied
    pub fn with_time(self) -> Self {
        match (&self.time, self.millis) {
            (None, Some(millis)) => Self {
                time: Some(convert_millis_to_time(millis)),
                ..self
            },
            _ => self,
        }
    }

    pub fn furlongs(&self) -> f64 {
        feet_to_furlongs(self.feet as i64)
    }
}

/// Time taken between two fractionals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub point: u32,
    pub text: String,
    pub compact: String,
    pub feet: i32,
    pub time: Option<String>,
    pub millis: Option<i64>,
    /// Absent for the split from the start
    pub from: Option<Fractional>,
    pub to: Fractional,
}

impl Split {
    /// Split between `from` and `to`; a missing `from` means the start.
    /// Returns `None`, recording an issue, when `to` is missing.
    pub fn between(
        from: Option<&Fractional>,
        to: Option<&Fractional>,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let Some(to) = to else {
            diagnostics.record(Issue::MissingSplitTarget {
                from: from.map(|f| f.text.clone()),
            });
            return None;
        };

        let split = match from {
            None => Self {
                point: to.point,
                text: format!("Start to {}", to.text),
                compact: format!("Start to {}", to.compact),
                feet: to.feet,
                time: to.time.clone(),
                millis: to.millis,
                from: None,
                to: to.clone(),
            },
            Some(from) => {
                let millis = match (from.millis, to.millis) {
                    (Some(start), Some(end)) => Some(end - start),
                    _ => None,
                };
                Self {
                    point: to.point,
                    text: format!("{} to {}", from.text, to.text),
                    compact: format!("{} to {}", from.compact, to.compact),
                    feet: to.feet - from.feet,
                    time: millis.map(convert_millis_to_time),
                    millis,
                    from: Some(from.clone()),
                    to: to.clone(),
                }
            }
        };
        Some(split)
    }

    pub fn furlongs(&self) -> f64 {
        feet_to_furlongs(self.feet as i64)
    }
}

/// One split per fractional: start to the first, then each consecutive pair
pub fn calculate_splits_from_fractionals(fractionals: &[Fractional]) -> Vec<Split> {
    // every destination is present, so no issues can arise
    let mut diagnostics = Diagnostics::new();
    fractionals
        .iter()
        .enumerate()
        .filter_map(|(i, to)| {
            let from = if i == 0 { None } else { fractionals.get(i - 1) };
            Split::between(from, Some(to), &mut diagnostics)
        })
        .collect()
}

/// Estimate a starter's fractionals from the race fractionals and the
/// lengths the starter was behind the leader at each matching point of call
pub fn calculate_individual_fractionals(
    starter: &Starter,
    race_fractionals: &[Fractional],
    feet_per_length: f64,
    diagnostics: &mut Diagnostics,
) -> Vec<Fractional> {
    let horse = &starter.horse.name;
    let mut fractionals = Vec::with_capacity(race_fractionals.len());

    for race_fractional in race_fractionals {
        let Some(point_of_call) = starter.point_of_call_at(race_fractional.feet) else {
            diagnostics.record(Issue::UnmatchedPointOfCall {
                horse: horse.clone(),
                feet: race_fractional.feet,
            });
            continue;
        };

        let Some(lengths) = point_of_call.lengths_behind_leader() else {
            diagnostics.record(Issue::UnknownLengths {
                horse: horse.clone(),
                point: point_of_call.text.clone(),
            });
            continue;
        };

        let Some(millis) = race_fractional.millis.filter(|m| *m > 0) else {
            diagnostics.record(Issue::MissingFractionalTime {
                point: race_fractional.text.clone(),
            });
            continue;
        };

        let feet_per_milli = race_fractional.feet as f64 / millis as f64;
        let feet_behind = lengths * feet_per_length;
        let individual = (millis as f64 + feet_behind / feet_per_milli) as i64;

        fractionals.push(Fractional::new(
            race_fractional.point,
            &race_fractional.text,
            &race_fractional.compact,
            race_fractional.feet,
            Some(individual),
        ));
    }

    fractionals
}

/// Replace every starter's fractionals and splits with estimates derived
/// from the race fractionals
pub fn calculate_individual_fractionals_from_race(
    starters: Vec<Starter>,
    race_fractionals: &[Fractional],
    feet_per_length: f64,
    diagnostics: &mut Diagnostics,
) -> Vec<Starter> {
    starters
        .into_iter()
        .map(|starter| {
            let fractionals = calculate_individual_fractionals(
                &starter,
                race_fractionals,
                feet_per_length,
                diagnostics,
            );
            let splits = calculate_splits_from_fractionals(&fractionals);
            Starter {
                fractionals,
                splits,
                ..starter
            }
        })
        .collect()
}
