//! Wagering pools and attribution of win/place/show payoffs to starters

use serde::{Deserialize, Serialize};

use crate::core::entries::entry_program;
use crate::diagnostics::{Diagnostics, Issue};
use crate::models::{Horse, Starter};

/// Win, place and show payoffs are quoted for a $2 wager
pub const WIN_PLACE_SHOW_UNIT: f64 = 2.0;

/// Odds-to-one implied by a payoff, rounded half-up to three decimals
pub fn wager_odds(unit: f64, payoff: f64) -> Option<f64> {
    if unit <= 0.0 || payoff <= 0.0 {
        return None;
    }
    let odds = (payoff - unit) / unit;
    if odds.is_finite() {
        Some((odds * 1000.0).round() / 1000.0)
    } else {
        None
    }
}

/// Payoffs for one betting interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinPlaceShowPayoff {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub horse: Option<Horse>,
    #[serde(default)]
    pub win: Option<f64>,
    #[serde(default)]
    pub place: Option<f64>,
    #[serde(default)]
    pub show: Option<f64>,
}

impl WinPlaceShowPayoff {
    pub fn entry_program(&self) -> Option<String> {
        self.program.as_deref().map(entry_program)
    }

    /// 1 when paid to win, 2 to place, 3 to show
    pub fn wagering_position(&self) -> Option<u32> {
        if self.win.is_some() {
            Some(1)
        } else if self.place.is_some() {
            Some(2)
        } else if self.show.is_some() {
            Some(3)
        } else {
            None
        }
    }

    pub fn win_odds(&self) -> Option<f64> {
        self.win.and_then(|p| wager_odds(WIN_PLACE_SHOW_UNIT, p))
    }

    pub fn place_odds(&self) -> Option<f64> {
        self.place.and_then(|p| wager_odds(WIN_PLACE_SHOW_UNIT, p))
    }

    pub fn show_odds(&self) -> Option<f64> {
        self.show.and_then(|p| wager_odds(WIN_PLACE_SHOW_UNIT, p))
    }

    fn horse_name(&self) -> Option<&str> {
        self.horse.as_ref().map(|h| h.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinPlaceShowPayoffPool {
    #[serde(default)]
    pub total_pool: Option<u64>,
    #[serde(default)]
    pub payoffs: Vec<WinPlaceShowPayoff>,
}

/// Result of an exotic wager such as an exacta or pick 6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoticPayoffPool {
    #[serde(default)]
    pub unit: Option<f64>,
    #[serde(default)]
    pub payoff: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub winning_numbers: Option<String>,
    #[serde(default)]
    pub number_correct: Option<u32>,
    #[serde(default)]
    pub pool: Option<f64>,
    #[serde(default)]
    pub carryover: Option<f64>,
}

impl ExoticPayoffPool {
    pub fn odds(&self) -> Option<f64> {
        wager_odds(self.unit?, self.payoff?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WagerPayoffPools {
    #[serde(default)]
    pub win_place_show: Option<WinPlaceShowPayoffPool>,
    #[serde(default)]
    pub exotics: Vec<ExoticPayoffPool>,
}

impl WagerPayoffPools {
    pub fn win_place_show_payoffs(&self) -> &[WinPlaceShowPayoff] {
        self.win_place_show
            .as_ref()
            .map(|pool| pool.payoffs.as_slice())
            .unwrap_or(&[])
    }
}

/// Attach payoffs to starters.
///
/// Payoffs are grouped by entry program in order of appearance. A group whose
/// key matches starters' entry programs pays every starter in that entry.
/// Anything left over is matched by horse name against starters still
/// without a payoff.
pub fn match_payoffs(
    starters: Vec<Starter>,
    payoffs: &[WinPlaceShowPayoff],
    diagnostics: &mut Diagnostics,
) -> Vec<Starter> {
    let mut groups: Vec<(Option<String>, Vec<&WinPlaceShowPayoff>)> = Vec::new();
    for payoff in payoffs {
        let key = payoff.entry_program();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(payoff),
            None => groups.push((key, vec![payoff])),
        }
    }

    let mut assigned: Vec<Option<WinPlaceShowPayoff>> = vec![None; starters.len()];
    let mut unmatched: Vec<&WinPlaceShowPayoff> = Vec::new();

    for (key, group) in &groups {
        let members: Vec<usize> = match key {
            Some(key) => starters
                .iter()
                .enumerate()
                .filter(|(_, s)| s.entry_program.as_ref() == Some(key))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };

        if members.is_empty() {
            unmatched.extend(group.iter().copied());
            continue;
        }

        let payoff = group[0];
        for i in members {
            assigned[i] = Some(payoff.clone());
        }
    }

    for payoff in unmatched {
        let found = payoff.horse_name().and_then(|name| {
            starters
                .iter()
                .enumerate()
                .position(|(i, s)| assigned[i].is_none() && s.horse.name == name)
        });
        match found {
            Some(i) => assigned[i] = Some(payoff.clone()),
            None => diagnostics.record(Issue::UnmatchedPayoff {
                program: payoff.program.clone(),
                horse: payoff.horse_name().map(str::to_string),
            }),
        }
    }

    starters
        .into_iter()
        .zip(assigned)
        .map(|(starter, payoff)| match payoff {
            Some(payoff) => Starter {
                wagering_position: payoff.wagering_position(),
                win_place_show_payoff: Some(payoff),
                ..starter
            },
            None => starter,
        })
        .collect()
}
