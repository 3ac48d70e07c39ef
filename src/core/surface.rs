//! Surface, course and track condition lookups

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Dirt,
    Turf,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Flat,
    Jumps,
}

/// Chart course text to (surface, display course, format)
const SURFACE_COURSE_FORMATS: &[(&str, Surface, &str, Format)] = &[
    ("Dirt", Surface::Dirt, "Dirt", Format::Flat),
    ("Turf", Surface::Turf, "Turf", Format::Flat),
    ("All Weather Track", Surface::Synthetic, "All Weather Track", Format::Flat),
    ("Inner track", Surface::Dirt, "Inner Track", Format::Flat),
    ("Inner turf", Surface::Turf, "Inner Turf", Format::Flat),
    ("Hurdle", Surface::Turf, "Hurdle", Format::Jumps),
    ("Downhill turf", Surface::Turf, "Downhill Turf", Format::Flat),
    ("Outer turf", Surface::Turf, "Outer Turf", Format::Flat),
    ("Timber", Surface::Turf, "Timber", Format::Jumps),
    ("Steeplechase", Surface::Turf, "Steeplechase", Format::Jumps),
    ("Hunt on turf", Surface::Turf, "Hunt On Turf", Format::Jumps),
];

/// Where and how a race was run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceCourse {
    pub surface: Surface,
    pub course: String,
    pub format: Format,
}

impl SurfaceCourse {
    pub fn from_course(course: &str) -> Result<Self, ChartError> {
        SURFACE_COURSE_FORMATS
            .iter()
            .find(|(text, ..)| *text == course)
            .map(|(_, surface, display, format)| Self {
                surface: *surface,
                course: display.to_string(),
                format: *format,
            })
            .ok_or_else(|| ChartError::UnknownCourse(course.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackCondition {
    Fast,
    Firm,
    Frozen,
    Good,
    Hard,
    Heavy,
    Muddy,
    Sloppy,
    Slow,
    Soft,
    WetFast,
    Yielding,
    Unknown,
}

const TRACK_CONDITIONS: &[(TrackCondition, &str, &str)] = &[
    (TrackCondition::Fast, "FT", "Fast"),
    (TrackCondition::Firm, "FM", "Firm"),
    (TrackCondition::Frozen, "FZ", "Frozen"),
    (TrackCondition::Good, "GD", "Good"),
    (TrackCondition::Hard, "HD", "Hard"),
    (TrackCondition::Heavy, "HY", "Heavy"),
    (TrackCondition::Muddy, "MY", "Muddy"),
    (TrackCondition::Sloppy, "SY", "Sloppy"),
    (TrackCondition::Slow, "SL", "Slow"),
    (TrackCondition::Soft, "SF", "Soft"),
    (TrackCondition::WetFast, "WF", "Wet Fast"),
    (TrackCondition::Yielding, "YL", "Yielding"),
];

pub const SEALED_SUFFIX: &str = " (Sealed)";

impl TrackCondition {
    /// Lookup by chart code, e.g. "FT"; unrecognised codes map to `Unknown`
    pub fn from_code(code: &str) -> Self {
        TRACK_CONDITIONS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(condition, ..)| *condition)
            .unwrap_or(TrackCondition::Unknown)
    }

    /// Parse chart text such as "Fast" or "Sloppy (Sealed)", returning the
    /// condition and whether the track was sealed
    pub fn parse_text(text: &str) -> (Self, bool) {
        let (name, sealed) = match text.strip_suffix(SEALED_SUFFIX) {
            Some(name) => (name, true),
            None => (text, false),
        };
        let condition = TRACK_CONDITIONS
            .iter()
            .find(|(_, _, t)| *t == name)
            .map(|(condition, ..)| *condition)
            .unwrap_or(TrackCondition::Unknown);
        (condition, sealed)
    }

    pub fn code(&self) -> Option<&'static str> {
        self.entry().map(|(_, code, _)| *code)
    }

    pub fn text(&self) -> Option<&'static str> {
        self.entry().map(|(_, _, text)| *text)
    }

    fn entry(&self) -> Option<&'static (TrackCondition, &'static str, &'static str)> {
        TRACK_CONDITIONS.iter().find(|(c, ..)| c == self)
    }
}
