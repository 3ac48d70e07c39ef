//! Betting choice ranking

use crate::models::Starter;

/// 1-based rank of each odds value, with equal odds sharing a rank and
/// missing odds unranked
pub fn rank_choices(odds: &[Option<f64>]) -> Vec<Option<u32>> {
    let mut sorted: Vec<f64> = odds.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    odds.iter()
        .map(|value| {
            let value = (*value)?;
            sorted
                .iter()
                .position(|o| *o == value)
                .map(|index| index as u32 + 1)
        })
        .collect()
}

/// Set each starter's betting choice from its odds
pub fn assign_choices(starters: Vec<Starter>) -> Vec<Starter> {
    let odds: Vec<Option<f64>> = starters.iter().map(|s| s.odds).collect();
    let choices = rank_choices(&odds);

    starters
        .into_iter()
        .zip(choices)
        .map(|(starter, choice)| Starter { choice, ..starter })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::starter;

    #[test]
    fn test_rank_choices() {
        let ranks = rank_choices(&[Some(2.0), Some(4.0), None, Some(10.0), Some(4.0)]);
        assert_eq!(ranks, vec![Some(1), Some(2), None, Some(4), Some(2)]);
    }

    #[test]
    fn test_rank_choices_all_missing() {
        assert_eq!(rank_choices(&[None, None]), vec![None, None]);
        assert!(rank_choices(&[]).is_empty());
    }

    #[test]
    fn test_assign_choices_keeps_order() {
        let starters = vec![
            Starter {
                odds: Some(7.5),
                ..starter("Long Shot", Some("1"))
            },
            Starter {
                odds: Some(0.9),
                favorite: true,
                ..starter("Chalk", Some("2"))
            },
            starter("Scratched Odds", Some("3")),
        ];

        let ranked = assign_choices(starters);

        assert_eq!(ranked[0].horse.name, "Long Shot");
        assert_eq!(ranked[0].choice, Some(2));
        assert_eq!(ranked[1].choice, Some(1));
        assert_eq!(ranked[2].choice, None);
    }
}
