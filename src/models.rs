//! Data models for race drafts and assembled results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::conditions::RaceConditions;
use crate::core::distance::{feet_to_furlongs, RaceDistance};
use crate::core::fractionals::{Fractional, Split};
use crate::core::surface::{SurfaceCourse, TrackCondition};
use crate::core::wagering::{WagerPayoffPools, WinPlaceShowPayoff};
use crate::error::ChartError;

/// Breed of the horses in a race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Breed {
    #[serde(rename = "TB")]
    Thoroughbred,
    #[serde(rename = "QH")]
    QuarterHorse,
    #[serde(rename = "ARAB")]
    Arabian,
    #[serde(rename = "MIX")]
    Mixed,
}

impl Breed {
    pub const ALL: [Breed; 4] = [
        Breed::Thoroughbred,
        Breed::QuarterHorse,
        Breed::Arabian,
        Breed::Mixed,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Breed::Thoroughbred => "TB",
            Breed::QuarterHorse => "QH",
            Breed::Arabian => "ARAB",
            Breed::Mixed => "MIX",
        }
    }

    pub fn chart_value(&self) -> &'static str {
        match self {
            Breed::Thoroughbred => "Thoroughbred",
            Breed::QuarterHorse => "Quarter Horse",
            Breed::Arabian => "Arabian",
            Breed::Mixed => "Mixed",
        }
    }

    /// Match a breed code or its prefix, e.g. "AR" for Arabian
    pub fn from_code(code: &str) -> Result<Self, ChartError> {
        let code = code.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|breed| !code.is_empty() && breed.code().starts_with(&code))
            .ok_or(ChartError::NoMatchingBreed(code))
    }

    /// Match the breed name as printed on a chart, e.g. "Quarter Horse"
    pub fn from_chart_value(text: &str) -> Result<Self, ChartError> {
        Self::ALL
            .into_iter()
            .find(|breed| breed.chart_value() == text)
            .ok_or_else(|| ChartError::NoMatchingBreed(text.to_string()))
    }

    pub fn is_tb_or_arabian(&self) -> bool {
        matches!(self, Breed::Thoroughbred | Breed::Arabian)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horse {
    pub name: String,
}

impl Horse {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jockey {
    #[serde(default)]
    pub first_name: Option<String>,
    pub last_name: String,
}

/// Margin in lengths with its chart notation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lengths {
    pub text: String,
    pub lengths: f64,
}

impl Lengths {
    pub fn from_lengths(lengths: f64) -> Self {
        Self {
            text: lengths_to_text(lengths),
            lengths,
        }
    }
}

/// Chart notation for a margin, e.g. "Nose", "Neck" or "2 1/2"
pub fn lengths_to_text(lengths: f64) -> String {
    let lengths = lengths.abs();

    if lengths > 0.0 && lengths <= 0.05 {
        return "Nose".to_string();
    }
    if lengths > 0.05 && lengths <= 0.10 {
        return "Head".to_string();
    }
    if lengths > 0.10 && lengths < 0.50 {
        return "Neck".to_string();
    }

    let whole = lengths.trunc() as u64;
    let fraction = lengths - whole as f64;
    let quarters = if fraction < 0.25 {
        None
    } else if fraction < 0.50 {
        Some("1/4")
    } else if fraction < 0.75 {
        Some("1/2")
    } else {
        Some("3/4")
    };

    match (whole, quarters) {
        (0, None) => String::new(),
        (0, Some(q)) => q.to_string(),
        (w, None) => w.to_string(),
        (w, Some(q)) => format!("{} {}", w, q),
    }
}

/// A starter's position at a point of call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    #[serde(default)]
    pub position: Option<u32>,
    /// Ahead of the next starter
    #[serde(default)]
    pub lengths_ahead: Option<Lengths>,
    /// Behind the leader
    #[serde(default)]
    pub total_lengths_behind: Option<Lengths>,
    #[serde(default)]
    pub wide: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfCall {
    pub point: u32,
    pub text: String,
    pub compact: String,
    #[serde(default)]
    pub feet: Option<i32>,
    #[serde(default)]
    pub relative_position: Option<RelativePosition>,
}

impl PointOfCall {
    pub fn furlongs(&self) -> Option<f64> {
        self.feet.map(|feet| feet_to_furlongs(feet as i64))
    }

    pub fn position(&self) -> Option<u32> {
        self.relative_position.as_ref().and_then(|r| r.position)
    }

    /// Total lengths behind the leader; a leader with only a lengths-ahead
    /// margin is zero lengths behind
    pub fn lengths_behind_leader(&self) -> Option<f64> {
        let relative = self.relative_position.as_ref()?;
        match (&relative.total_lengths_behind, &relative.lengths_ahead) {
            (Some(behind), _) => Some(behind.lengths),
            (None, Some(_)) => Some(0.0),
            (None, None) => None,
        }
    }
}

/// A starter whose new official position differs from where it finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disqualification {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub horse: Option<Horse>,
    #[serde(default)]
    pub original_position: Option<u32>,
    pub new_position: u32,
}

impl Disqualification {
    pub fn matches(&self, starter: &Starter) -> bool {
        let by_program = match (&self.program, &starter.program) {
            (Some(dq), Some(program)) => dq.eq_ignore_ascii_case(program),
            _ => false,
        };
        let by_horse = match &self.horse {
            Some(horse) => horse.name == starter.horse.name,
            None => false,
        };
        by_program || by_horse
    }
}

/// Starter data as parsed from the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterDraft {
    #[serde(default)]
    pub program: Option<String>,
    pub horse: Horse,
    #[serde(default)]
    pub jockey: Option<Jockey>,
    #[serde(default)]
    pub points_of_call: Vec<PointOfCall>,
    /// Only present when the chart gives the starter its own times
    #[serde(default)]
    pub fractionals: Vec<Fractional>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub favorite: bool,
    /// Overrides the position derived from the final point of call
    #[serde(default)]
    pub finish_position: Option<u32>,
}

/// A fully derived starter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starter {
    pub program: Option<String>,
    pub entry_program: Option<String>,
    pub horse: Horse,
    pub jockey: Option<Jockey>,
    pub points_of_call: Vec<PointOfCall>,
    pub fractionals: Vec<Fractional>,
    pub splits: Vec<Split>,
    pub odds: Option<f64>,
    pub favorite: bool,
    pub choice: Option<u32>,
    pub finish_position: Option<u32>,
    /// Set only when a disqualification changed the result
    pub official_position: Option<u32>,
    pub disqualified: bool,
    pub position_dead_heat: bool,
    pub entry: bool,
    pub win_place_show_payoff: Option<WinPlaceShowPayoff>,
    pub wagering_position: Option<u32>,
}

impl Starter {
    /// The disqualification-adjusted position, else the finish position
    pub fn official_position(&self) -> Option<u32> {
        self.official_position.or(self.finish_position)
    }

    pub fn is_winner(&self) -> bool {
        self.official_position() == Some(1)
    }

    pub fn finished_first(&self) -> bool {
        self.finish_position == Some(1)
    }

    pub fn point_of_call_at(&self, feet: i32) -> Option<&PointOfCall> {
        self.points_of_call.iter().find(|p| p.feet == Some(feet))
    }

    pub fn point_of_call_named(&self, text: &str) -> Option<&PointOfCall> {
        self.points_of_call.iter().find(|p| p.text == text)
    }

    pub fn finish_point_of_call(&self) -> Option<&PointOfCall> {
        self.points_of_call.last()
    }

    pub fn finish_fractional(&self) -> Option<&Fractional> {
        self.fractionals.last()
    }
}

/// Distance and course as parsed from the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceDraft {
    pub feet: u32,
    #[serde(default)]
    pub about: bool,
    pub course: String,
    #[serde(default)]
    pub run_up: Option<i32>,
    #[serde(default)]
    pub temp_rail: Option<i32>,
}

/// Everything parsed from one race chart, before derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDraft {
    pub track: Track,
    pub race_date: NaiveDate,
    pub race_number: u32,
    /// Breed code, e.g. "TB"
    pub breed: String,
    pub distance: DistanceDraft,
    #[serde(default)]
    pub track_condition: Option<String>,
    #[serde(default)]
    pub conditions: RaceConditions,
    pub starters: Vec<StarterDraft>,
    #[serde(default)]
    pub fractionals: Vec<Fractional>,
    #[serde(default)]
    pub wager_payoff_pools: Option<WagerPayoffPools>,
    #[serde(default)]
    pub disqualifications: Vec<Disqualification>,
    #[serde(default)]
    pub footnotes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSurface {
    pub distance: RaceDistance,
    #[serde(flatten)]
    pub surface_course: SurfaceCourse,
}

/// A fully assembled race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub track: Track,
    pub race_date: NaiveDate,
    pub race_number: u32,
    pub breed: Breed,
    pub distance_surface: DistanceSurface,
    pub track_condition: Option<TrackCondition>,
    pub conditions: RaceConditions,
    pub starters: Vec<Starter>,
    pub fractionals: Vec<Fractional>,
    pub splits: Vec<Split>,
    pub dead_heat: bool,
    pub wager_payoff_pools: Option<WagerPayoffPools>,
    pub footnotes: Option<String>,
}

impl RaceResult {
    pub fn number_of_runners(&self) -> usize {
        self.starters.len()
    }

    /// Starters officially placed first (more than one on a dead heat)
    pub fn winners(&self) -> Vec<&Starter> {
        self.starters.iter().filter(|s| s.is_winner()).collect()
    }

    /// Starters that crossed the line first, before any disqualification
    pub fn first_finishers(&self) -> Vec<&Starter> {
        self.starters.iter().filter(|s| s.finished_first()).collect()
    }

    pub fn final_millis(&self) -> Option<i64> {
        self.first_finishers()
            .into_iter()
            .find_map(|s| s.finish_fractional().and_then(|f| f.millis))
    }

    pub fn final_time(&self) -> Option<String> {
        self.first_finishers()
            .into_iter()
            .find_map(|s| s.finish_fractional().and_then(|f| f.time.clone()))
    }

    /// e.g. "PRX 2016-05-07 R8"
    pub fn simple_summary(&self) -> String {
        format!(
            "{} {} R{}",
            self.track.code,
            self.race_date.format("%Y-%m-%d"),
            self.race_number
        )
    }
}
