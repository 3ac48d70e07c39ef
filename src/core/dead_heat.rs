//! Dead heat detection

use chrono::NaiveDate;

use crate::models::Starter;

/// A race whose settlement declared co-winners even though the chart does
/// not show two official winners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadHeatException {
    pub track: &'static str,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub race_number: u32,
}

impl DeadHeatException {
    pub fn matches(&self, track: &str, race_date: NaiveDate, race_number: u32) -> bool {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day) == Some(race_date)
            && self.track == track
            && self.race_number == race_number
    }
}

/// 2016 Parx Oaks (Parx Racing, race 8)
pub const PARX_OAKS_2016: DeadHeatException = DeadHeatException {
    track: "PRX",
    year: 2016,
    month: 5,
    day: 7,
    race_number: 8,
};

/// Races where the winner-level dead heat is not computed
pub const DEAD_HEAT_EXCEPTIONS: &[DeadHeatException] = &[PARX_OAKS_2016];

pub fn is_dead_heat_exception(track: &str, race_date: NaiveDate, race_number: u32) -> bool {
    DEAD_HEAT_EXCEPTIONS
        .iter()
        .any(|e| e.matches(track, race_date, race_number))
}

/// Flag every starter that shares its finish position with another starter
pub fn mark_position_dead_heats(starters: Vec<Starter>) -> Vec<Starter> {
    let positions: Vec<Option<u32>> = starters.iter().map(|s| s.finish_position).collect();

    starters
        .into_iter()
        .map(|starter| {
            let tied = match starter.finish_position {
                Some(position) => positions.iter().filter(|p| **p == Some(position)).count() > 1,
                None => false,
            };
            Starter {
                position_dead_heat: tied,
                ..starter
            }
        })
        .collect()
}

/// More than one starter officially placed first
pub fn is_race_dead_heat(starters: &[Starter]) -> bool {
    starters.iter().filter(|s| s.is_winner()).count() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::starter;

    fn finishing(positions: &[Option<u32>]) -> Vec<Starter> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| Starter {
                finish_position: *p,
                ..starter(&format!("Horse {}", i), Some((i + 1).to_string().as_str()))
            })
            .collect()
    }

    #[test]
    fn test_race_dead_heat() {
        assert!(is_race_dead_heat(&finishing(&[Some(1), Some(1), Some(3)])));
        assert!(!is_race_dead_heat(&finishing(&[Some(1), Some(2), Some(3)])));
        assert!(!is_race_dead_heat(&[]));
    }

    #[test]
    fn test_race_dead_heat_uses_official_position() {
        let mut starters = finishing(&[Some(1), Some(2), Some(3)]);
        starters[2].official_position = Some(1);
        assert!(is_race_dead_heat(&starters));

        let mut starters = finishing(&[Some(1), Some(1), Some(3)]);
        starters[1].official_position = Some(3);
        assert!(!is_race_dead_heat(&starters));
    }

    #[test]
    fn test_position_dead_heats() {
        let marked = mark_position_dead_heats(finishing(&[Some(1), Some(2), Some(2)]));
        let flags: Vec<bool> = marked.iter().map(|s| s.position_dead_heat).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_position_dead_heats_ignore_unplaced() {
        let marked = mark_position_dead_heats(finishing(&[Some(1), None, None]));
        assert!(marked.iter().all(|s| !s.position_dead_heat));
    }

    #[test]
    fn test_parx_oaks_exception() {
        let date = NaiveDate::from_ymd_opt(2016, 5, 7).unwrap();
        assert!(is_dead_heat_exception("PRX", date, 8));
        assert!(!is_dead_heat_exception("PRX", date, 7));
        assert!(!is_dead_heat_exception("BEL", date, 8));

        let other_day = NaiveDate::from_ymd_opt(2016, 5, 8).unwrap();
        assert!(!is_dead_heat_exception("PRX", other_day, 8));
    }
}
