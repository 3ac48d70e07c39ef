//! Race result assembly
//!
//! Turns a [`RaceDraft`] into a [`RaceResult`] by running the derivation
//! stages in a fixed order. Each stage takes the previous snapshot of the
//! race and returns a new one:
//!
//! 0. starters built from drafts, disqualifications applied
//! 1. entry grouping
//! 2. win/place/show payoff matching
//! 3. race and individual fractionals and splits
//! 4. betting choices
//! 5. position dead heats
//! 6. race dead heat
//!
//! Later stages read what earlier ones derived (payoffs need entry programs,
//! the race dead heat needs official positions), so the order is fixed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::conditions::RaceConditions;
use crate::core::dead_heat::{is_dead_heat_exception, is_race_dead_heat, mark_position_dead_heats};
use crate::core::distance::RaceDistance;
use crate::core::entries::{entry_program, group_entries};
use crate::core::fractionals::{
    calculate_individual_fractionals_from_race, calculate_splits_from_fractionals, Fractional,
    Split, FEET_PER_LENGTH,
};
use crate::core::odds::assign_choices;
use crate::core::surface::{SurfaceCourse, TrackCondition};
use crate::core::wagering::{match_payoffs, WinPlaceShowPayoff};
use crate::diagnostics::{Diagnostics, Issue};
use crate::error::ChartError;
use crate::models::{
    Breed, Disqualification, DistanceSurface, PointOfCall, RaceDraft, RaceResult, Starter,
    StarterDraft,
};

/// Assembly configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Feet per length of margin when estimating individual fractionals
    pub feet_per_length: f64,
    /// Skip the race dead-heat computation for the named exception races
    pub honor_dead_heat_exceptions: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            feet_per_length: FEET_PER_LENGTH,
            honor_dead_heat_exceptions: true,
        }
    }
}

/// An assembled race together with everything skipped along the way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledRace {
    pub result: RaceResult,
    pub diagnostics: Diagnostics,
}

/// Snapshot of the derived race state between stages
#[derive(Debug, Clone, PartialEq)]
struct AssemblyContext {
    starters: Vec<Starter>,
    fractionals: Vec<Fractional>,
    splits: Vec<Split>,
    dead_heat: bool,
    diagnostics: Diagnostics,
}

/// Runs the assembly stages over race drafts
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: AssemblyConfig,
}

impl Assembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Assemble a single race
    pub fn assemble(&self, draft: RaceDraft) -> Result<AssembledRace, ChartError> {
        let mut diagnostics = Diagnostics::new();

        let breed = Breed::from_code(&draft.breed)?;
        let distance = RaceDistance::from_feet(draft.distance.feet, draft.distance.about, breed)?
            .with_run_up(draft.distance.run_up)
            .with_temp_rail(draft.distance.temp_rail);
        let surface_course = SurfaceCourse::from_course(&draft.distance.course)?;

        let track_condition = draft.track_condition.as_deref().map(|code| {
            let condition = TrackCondition::from_code(code);
            if condition == TrackCondition::Unknown {
                diagnostics.record(Issue::UnknownTrackCondition {
                    code: code.to_string(),
                });
            }
            condition
        });

        let conditions: RaceConditions = draft.conditions.summarized();
        if let Some(race_type) = conditions.race_type.as_ref().filter(|t| !t.is_known()) {
            diagnostics.record(Issue::UnknownRaceType {
                race_type: race_type.race_type.clone(),
            });
        }

        let ctx = AssemblyContext {
            starters: Vec::new(),
            fractionals: draft.fractionals.into_iter().map(Fractional::with_time).collect(),
            splits: Vec::new(),
            dead_heat: false,
            diagnostics,
        };

        let payoffs = draft
            .wager_payoff_pools
            .as_ref()
            .map(|pools| pools.win_place_show_payoffs().to_vec())
            .unwrap_or_default();

        let ctx = build_starters(ctx, draft.starters, &draft.disqualifications);
        let ctx = group_entry_stage(ctx);
        let ctx = match_payoffs_stage(ctx, &payoffs);
        let ctx = fractionals_stage(ctx, self.config.feet_per_length);
        let ctx = choices_stage(ctx);
        let ctx = position_dead_heat_stage(ctx);
        let ctx = if self.config.honor_dead_heat_exceptions
            && is_dead_heat_exception(&draft.track.code, draft.race_date, draft.race_number)
        {
            debug!(
                "Skipping race dead heat for {} {} R{}",
                draft.track.code, draft.race_date, draft.race_number
            );
            ctx
        } else {
            race_dead_heat_stage(ctx)
        };

        let result = RaceResult {
            track: draft.track,
            race_date: draft.race_date,
            race_number: draft.race_number,
            breed,
            distance_surface: DistanceSurface {
                distance,
                surface_course,
            },
            track_condition,
            conditions,
            starters: ctx.starters,
            fractionals: ctx.fractionals,
            splits: ctx.splits,
            dead_heat: ctx.dead_heat,
            wager_payoff_pools: draft.wager_payoff_pools,
            footnotes: draft.footnotes,
        };

        info!(
            "Assembled {} with {} starters ({} issues)",
            result.simple_summary(),
            result.number_of_runners(),
            ctx.diagnostics.len()
        );

        Ok(AssembledRace {
            result,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Assemble each race independently; one bad race does not stop the rest
    pub fn assemble_all(&self, drafts: Vec<RaceDraft>) -> Vec<Result<AssembledRace, ChartError>> {
        drafts
            .into_iter()
            .map(|draft| self.assemble(draft))
            .collect()
    }
}

fn build_starter(draft: StarterDraft) -> Starter {
    let program = draft
        .program
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty());
    let fractionals: Vec<Fractional> = draft
        .fractionals
        .into_iter()
        .map(Fractional::with_time)
        .collect();
    let splits = calculate_splits_from_fractionals(&fractionals);

    let starter = Starter {
        entry_program: program.as_deref().map(entry_program),
        program,
        horse: draft.horse,
        jockey: draft.jockey,
        points_of_call: draft.points_of_call,
        fractionals,
        splits,
        odds: draft.odds,
        favorite: draft.favorite,
        choice: None,
        finish_position: draft.finish_position,
        official_position: None,
        disqualified: false,
        position_dead_heat: false,
        entry: false,
        win_place_show_payoff: None,
        wagering_position: None,
    };

    // charts without an explicit finish fall back to the last call
    let finish_position = starter
        .finish_position
        .or_else(|| starter.finish_point_of_call().and_then(PointOfCall::position));
    Starter {
        finish_position,
        ..starter
    }
}

fn build_starters(
    mut ctx: AssemblyContext,
    drafts: Vec<StarterDraft>,
    disqualifications: &[Disqualification],
) -> AssemblyContext {
    let mut starters: Vec<Starter> = drafts.into_iter().map(build_starter).collect();

    for dq in disqualifications {
        let by_program = dq.program.as_ref().and_then(|program| {
            starters.iter().position(|s| {
                s.program
                    .as_ref()
                    .map(|p| p.eq_ignore_ascii_case(program))
                    .unwrap_or(false)
            })
        });
        let index = by_program.or_else(|| starters.iter().position(|s| dq.matches(s)));

        match index {
            Some(i) => {
                let starter = starters[i].clone();
                starters[i] = Starter {
                    official_position: Some(dq.new_position),
                    disqualified: true,
                    ..starter
                };
            }
            None => ctx.diagnostics.record(Issue::UnmatchedDisqualification {
                program: dq.program.clone(),
                horse: dq.horse.as_ref().map(|h| h.name.clone()),
            }),
        }
    }

    debug!("Built {} starters", starters.len());
    AssemblyContext { starters, ..ctx }
}

fn group_entry_stage(ctx: AssemblyContext) -> AssemblyContext {
    AssemblyContext {
        starters: group_entries(ctx.starters),
        ..ctx
    }
}

fn match_payoffs_stage(
    mut ctx: AssemblyContext,
    payoffs: &[WinPlaceShowPayoff],
) -> AssemblyContext {
    let starters = match_payoffs(ctx.starters, payoffs, &mut ctx.diagnostics);
    AssemblyContext { starters, ..ctx }
}

fn fractionals_stage(mut ctx: AssemblyContext, feet_per_length: f64) -> AssemblyContext {
    if ctx.fractionals.is_empty() {
        // no race times on the chart, so the winner's own times stand in
        let fractionals = ctx
            .starters
            .iter()
            .find(|s| s.finished_first() && s.finish_fractional().is_some())
            .map(|s| s.fractionals.clone())
            .unwrap_or_default();
        debug!(
            "Using {} fractionals from the first finisher as race fractionals",
            fractionals.len()
        );
        let splits = calculate_splits_from_fractionals(&fractionals);
        return AssemblyContext {
            fractionals,
            splits,
            ..ctx
        };
    }

    let splits = calculate_splits_from_fractionals(&ctx.fractionals);
    let starters = calculate_individual_fractionals_from_race(
        std::mem::take(&mut ctx.starters),
        &ctx.fractionals,
        feet_per_length,
        &mut ctx.diagnostics,
    );

    AssemblyContext {
        starters,
        splits,
        ..ctx
    }
}

fn choices_stage(ctx: AssemblyContext) -> AssemblyContext {
    AssemblyContext {
        starters: assign_choices(ctx.starters),
        ..ctx
    }
}

fn position_dead_heat_stage(ctx: AssemblyContext) -> AssemblyContext {
    AssemblyContext {
        starters: mark_position_dead_heats(ctx.starters),
        ..ctx
    }
}

fn race_dead_heat_stage(ctx: AssemblyContext) -> AssemblyContext {
    let dead_heat = is_race_dead_heat(&ctx.starters);
    AssemblyContext { dead_heat, ..ctx }
}
