//! Race derivation logic

pub mod assembler;
pub mod conditions;
pub mod dead_heat;
pub mod distance;
pub mod entries;
pub mod fractionals;
pub mod odds;
pub mod surface;
pub mod wagering;

// Re-export commonly used types
pub use assembler::{AssembledRace, Assembler, AssemblyConfig};
pub use conditions::{ClaimingPriceRange, RaceConditions, RaceRestrictions, RaceType};
pub use distance::RaceDistance;
pub use fractionals::{calculate_splits_from_fractionals, convert_millis_to_time, Fractional, Split};
pub use surface::{Format, Surface, SurfaceCourse, TrackCondition};
pub use wagering::{ExoticPayoffPool, WagerPayoffPools, WinPlaceShowPayoff, WinPlaceShowPayoffPool};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Horse, Starter};

    /// A starter with nothing derived yet
    pub fn starter(name: &str, program: Option<&str>) -> Starter {
        Starter {
            program: program.map(str::to_string),
            entry_program: program.map(crate::core::entries::entry_program),
            horse: Horse::new(name),
            jockey: None,
            points_of_call: vec![],
            fractionals: vec![],
            splits: vec![],
            odds: None,
            favorite: false,
            choice: None,
            finish_position: None,
            official_position: None,
            disqualified: false,
            position_dead_heat: false,
            entry: false,
            win_place_show_payoff: None,
            wagering_position: None,
        }
    }
}
