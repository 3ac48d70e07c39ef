//! Race conditions and the condensed race-class summary
//!
//! The summary is the short code shown alongside a race, e.g.
//! `3+ (C&G) [S] CLM 10-8.5K (NW2 L)`: age and sexes, state-bred marker,
//! grade or race type, claiming price or purse, then the restriction code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Breed;

/// Bitmask value meaning every sex may enter
pub const ALL_SEXES: u32 = 31;

pub const UNKNOWN_RACE_TYPE: &str = "UNKNOWN RACE TYPE";
pub const UNKNOWN_RACE_CODE: &str = "UNK";

/// Sexes bitmask (1 colts, 2 geldings, 4 horses, 8 fillies, 16 mares) to code
const SEXES_CODES: [&str; 32] = [
    "", "C", "G", "C&G", "H", "C&H", "G&H", "C&G&H", "F", "C&F", "G&F", "C&G&F", "F&H", "C&H&F",
    "G&H&F", "C&G&H&F", "M", "C&M", "G&M", "C&G&M", "H&M", "C&H&M", "G&H&M", "C&G&H&M", "F&M",
    "C&F&M", "G&F&M", "C&G&F&M", "H&F&M", "C&H&F&M", "G&H&F&M", "A",
];

/// Race type to short code, longest types first so lookups by code find the
/// most specific type
const RACE_TYPE_CODES: &[(&str, &str)] = &[
    ("SPEED INDEX OPTIONAL CLAIMING", "AOC"),
    ("INVITATIONAL HANDICAP STAKES", "IHS"),
    ("ALLOWANCE OPTIONAL CLAIMING", "AOC"),
    ("OPTIONAL CLAIMING HANDICAP", "OCH"),
    ("STARTER OPTIONAL CLAIMING", "SOC"),
    ("MAIDEN OPTIONAL CLAIMING", "MOC"),
    ("MAIDEN STARTER ALLOWANCE", "MSA"),
    ("OPTIONAL CLAIMING STAKES", "OCS"),
    ("SPEED INDEX CONSOLATION", "SPC"),
    ("WAIVER MAIDEN CLAIMING", "WMC"),
    ("CLAIMING STAKES TRIAL", "CLT"),
    ("CLAIMING STAKES/TRIAL", "CLT"),
    ("INVITATIONAL HANDICAP", "INH"),
    ("MAIDEN SPECIAL WEIGHT", "MSW"),
    ("FUTURITY CONSOLATION", "FCN"),
    ("MATURITY CONSOLATION", "MCN"),
    ("INVITATIONAL STAKES", "INS"),
    ("STAKES CONSOLATION", "SCN"),
    ("CLAIMING HANDICAP", "CLH"),
    ("DERBY CONSOLATION", "DCN"),
    ("OPTIONAL CLAIMING", "OCL"),
    ("SPEED INDEX FINAL", "SPF"),
    ("SPEED INDEX TRIAL", "SPT"),
    ("STARTER ALLOWANCE", "STA"),
    (UNKNOWN_RACE_TYPE, UNKNOWN_RACE_CODE),
    ("SPEED INDEX RACE", "SPI"),
    ("STARTER HANDICAP", "SHP"),
    ("ALLOWANCE FINAL", "ALWFL"),
    ("ALLOWANCE TRIAL", "AWT"),
    ("CLAIMING STAKES", "CST"),
    ("HANDICAP STAKES", "HDS"),
    ("MAIDEN CLAIMING", "MCL"),
    ("WAIVER CLAIMING", "WCL"),
    ("CANCELLED RACE", "CAN"),
    ("FUTURITY FINAL", "FUTFL"),
    ("FUTURITY TRIAL", "FTR"),
    ("MATURITY FINAL", "MATFL"),
    ("MATURITY TRIAL", "MTR"),
    ("STARTER STAKES", "SST"),
    ("MAIDEN STAKES", "MST"),
    ("CHAMPIONSHIP", "CHM"),
    ("INVITATIONAL", "INV"),
    ("MAIDEN TRIAL", "MDT"),
    ("STAKES TRIAL", "STR"),
    ("CONSOLATION", "CON"),
    ("DERBY FINAL", "DBYFL"),
    ("DERBY TRIAL", "DTR"),
    ("EXHIBITION", "EXH"),
    ("MATCH RACE", "MCH"),
    ("ALLOWANCE", "ALW"),
    ("CANCELLED", "CAN"),
    ("CLAIMING", "CLM"),
    ("FUTURITY", "FUT"),
    ("HANDICAP", "HCP"),
    ("MATURITY", "MAT"),
    ("MAIDEN", "MDN"),
    ("STAKES", "STK"),
    ("TRIALS", "TRL"),
    ("DERBY", "DBY"),
    ("FINAL", "FNL"),
    ("MATCH", "MCH"),
    ("STAKE", "STK"),
    ("TRIAL", "TRL"),
];

static CLAIMING_PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Claiming Price: \$([0-9]{1,3}(?:,[0-9]{3})*)(?: - \$([0-9]{1,3}(?:,[0-9]{3})*))?$")
        .unwrap()
});

/// Short code for a race type, e.g. "MAIDEN CLAIMING" -> "MCL"
pub fn code_for_type(race_type: &str) -> Option<&'static str> {
    RACE_TYPE_CODES
        .iter()
        .find(|(t, _)| *t == race_type)
        .map(|(_, code)| *code)
}

/// Race type and canonical code for a chart code, falling back to
/// `UNKNOWN RACE TYPE`/`UNK`
pub fn type_from_code(code: &str, breed: Breed) -> (&'static str, &'static str) {
    let tb_or_arabian = breed.is_tb_or_arabian();
    match code {
        "AOC" if tb_or_arabian => ("ALLOWANCE OPTIONAL CLAIMING", "AOC"),
        "AOC" => ("SPEED INDEX OPTIONAL CLAIMING", "AOC"),
        "TRL" if tb_or_arabian => ("TRIAL", "TRL"),
        "TRL" => ("TRIALS", "TRL"),
        "MAT" if tb_or_arabian => ("MATCH RACE", "MCH"),
        "MCH" => ("MATCH RACE", "MCH"),
        "STR" if tb_or_arabian => ("STARTER ALLOWANCE", "STA"),
        "CAN" | "ZCH" => ("CANCELLED", "CAN"),
        "STK" | "CLT" => ("STAKES", "STK"),
        _ => RACE_TYPE_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .copied()
            .unwrap_or((UNKNOWN_RACE_TYPE, UNKNOWN_RACE_CODE)),
    }
}

pub fn is_claiming_race(race_type: &str) -> bool {
    race_type.contains("CLAIM")
}

/// Dollars in the short "K" form: whole thousands from 10,000 up, otherwise
/// one decimal place rounded half-up
pub fn short_money(value: u32) -> String {
    if value >= 10_000 {
        (value / 1000).to_string()
    } else {
        let tenths = (value + 50) / 100;
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

/// Age, sex and breeding restrictions for entering a race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRestrictions {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub min_age: Option<i32>,
    /// -1 means no upper limit; absent means the same as the minimum
    #[serde(default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub sexes: u32,
    #[serde(default)]
    pub state_bred: bool,
}

impl RaceRestrictions {
    /// e.g. "3", "3+" or "3-4"
    pub fn age_code(&self) -> Option<String> {
        let min = self.min_age?;
        let max = self.max_age.unwrap_or(min);
        Some(if min == max {
            min.to_string()
        } else if max == -1 {
            format!("{}+", min)
        } else {
            format!("{}-{}", min, max)
        })
    }

    /// e.g. "F&M" for fillies and mares
    pub fn sexes_code(&self) -> Option<&'static str> {
        SEXES_CODES
            .get(self.sexes as usize)
            .copied()
            .filter(|code| !code.is_empty())
    }

    /// Fillies, mares, or both
    pub fn female_only(&self) -> bool {
        self.sexes != 0 && self.sexes % 8 == 0
    }
}

/// Race type, name and black type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceType {
    #[serde(rename = "type")]
    pub race_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grade: Option<u32>,
    #[serde(default)]
    pub black_type: Option<String>,
}

impl RaceType {
    /// Short code for the type, `UNK` when the type is not in the table
    pub fn code(&self) -> &'static str {
        code_for_type(&self.race_type).unwrap_or(UNKNOWN_RACE_CODE)
    }

    pub fn is_known(&self) -> bool {
        self.code() != UNKNOWN_RACE_CODE
    }

    pub fn is_claiming(&self) -> bool {
        is_claiming_race(&self.race_type)
    }
}

/// Minimum and maximum claiming prices; a single price has min == max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimingPriceRange {
    pub min: u32,
    pub max: u32,
}

impl ClaimingPriceRange {
    pub fn new(min: u32, max: u32) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Parse a trailing "Claiming Price: $max - $min" from conditions text
    pub fn parse(conditions: &str) -> Option<Self> {
        let caps = CLAIMING_PRICE_PATTERN.captures(conditions)?;
        let max = parse_dollars(caps.get(1)?.as_str())?;
        let min = match caps.get(2) {
            Some(m) => parse_dollars(m.as_str())?,
            None => max,
        };
        Some(Self::new(min, max))
    }

    /// "max-minK" for a range, "maxK" otherwise
    pub fn short_form(&self) -> Option<String> {
        if self.max == 0 {
            return None;
        }
        let mut short = short_money(self.max);
        if self.min != self.max && self.min > 0 {
            short.push('-');
            short.push_str(&short_money(self.min));
        }
        short.push('K');
        Some(short)
    }
}

fn parse_dollars(amount: &str) -> Option<u32> {
    amount.replace(',', "").parse().ok()
}

/// Conditions of entry for a race, with the computed summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConditions {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub restrictions: Option<RaceRestrictions>,
    #[serde(default)]
    pub race_type: Option<RaceType>,
    #[serde(default)]
    pub purse: Option<u32>,
    #[serde(default)]
    pub claiming_price_range: Option<ClaimingPriceRange>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl RaceConditions {
    /// Fill in the claiming range from the text when absent and compute the summary
    pub fn summarized(self) -> Self {
        let claiming_price_range = self
            .claiming_price_range
            .or_else(|| self.text.as_deref().and_then(ClaimingPriceRange::parse));
        let summary = build_summary(
            self.restrictions.as_ref(),
            self.race_type.as_ref(),
            claiming_price_range.as_ref(),
            self.purse,
        );
        Self {
            claiming_price_range,
            summary,
            ..self
        }
    }
}

pub fn build_summary(
    restrictions: Option<&RaceRestrictions>,
    race_type: Option<&RaceType>,
    claiming_price_range: Option<&ClaimingPriceRange>,
    purse: Option<u32>,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(r) = restrictions {
        let sexes = r.sexes_code().filter(|_| r.sexes != ALL_SEXES);
        match (r.age_code(), sexes) {
            (Some(age), Some(sexes)) => parts.push(format!("{} ({})", age, sexes)),
            (Some(age), None) => parts.push(age),
            (None, Some(sexes)) => parts.push(format!("({})", sexes)),
            (None, None) => {}
        }
        if r.state_bred {
            parts.push("[S]".to_string());
        }
    }

    let claiming_race = race_type.map(RaceType::is_claiming).unwrap_or(false);
    if let Some(t) = race_type {
        match t.grade {
            Some(grade) => parts.push(format!("G{}", grade)),
            None if t.is_known() => parts.push(t.code().to_string()),
            // unresolved types are left out of the summary
            None => {}
        }
    }

    if claiming_race {
        if let Some(short) = claiming_price_range.and_then(ClaimingPriceRange::short_form) {
            parts.push(short);
        }
    } else if let Some(value) = purse {
        parts.push(format!("{}K", short_money(value)));
    }

    if let Some(code) = restrictions.and_then(|r| r.code.as_deref()) {
        parts.push(format!("({})", code));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
