//! Race distance descriptions
//!
//! Converts a distance in feet into the three renderings used on charts:
//! long text ("One And One Sixteenth Miles"), alternate text ("1 1/16 Miles")
//! and compact text ("1 1/16m"). Thoroughbred and Arabian races are described
//! in furlongs below a mile; Quarter Horse and Mixed races in yards.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::models::Breed;

pub const FEET_PER_FURLONG: u32 = 660;
pub const FEET_PER_MILE: u32 = 5280;

const NUMERATORS: [&str; 16] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen",
];

const TENS: [&str; 10] = [
    "", "ten", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Furlongs for a distance in feet, rounded half-up to two decimal places
pub fn feet_to_furlongs(feet: i64) -> f64 {
    let per_furlong = i64::from(FEET_PER_FURLONG);
    let hundredths = (feet.abs() * 100 + per_furlong / 2) / per_furlong;
    let furlongs = hundredths as f64 / 100.0;
    if feet < 0 {
        -furlongs
    } else {
        furlongs
    }
}

/// A race distance with its chart descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDistance {
    pub text: String,
    pub alt: String,
    pub compact: String,
    pub feet: u32,
    pub exact: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_up: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_rail: Option<i32>,
}

impl RaceDistance {
    /// Describe a distance of `feet`, estimated when `about` is set, using the
    /// conventions of `breed`
    pub fn from_feet(feet: u32, about: bool, breed: Breed) -> Result<Self, ChartError> {
        if feet == 0 {
            return Err(ChartError::ZeroDistance);
        }
        if feet < 3 {
            return Err(ChartError::DistanceUnderOneYard(feet));
        }

        let miles = feet / FEET_PER_MILE;
        let total_furlongs = feet / FEET_PER_FURLONG;
        let furlongs = total_furlongs - miles * 8;
        let total_yards = feet / 3;
        let yards = total_yards - miles * 1760 - furlongs * 220;

        let (text, alt, compact) = if miles > 0 {
            describe_miles(miles, furlongs, yards)
        } else if breed.is_tb_or_arabian() && furlongs > 0 {
            describe_furlongs(furlongs, yards)
        } else {
            describe_yards(total_yards)
        };

        let (text, alt, compact) = if about {
            (
                format!("about {}", text),
                format!("about {}", alt),
                format!("Abt {}", compact),
            )
        } else {
            (text, alt, compact)
        };

        Ok(Self {
            text: capitalize_words(&text),
            alt: capitalize_words(&alt),
            compact,
            feet,
            exact: !about,
            run_up: None,
            temp_rail: None,
        })
    }

    pub fn furlongs(&self) -> f64 {
        feet_to_furlongs(self.feet as i64)
    }

    pub fn with_run_up(self, run_up: Option<i32>) -> Self {
        Self { run_up, ..self }
    }

    pub fn with_temp_rail(self, temp_rail: Option<i32>) -> Self {
        Self { temp_rail, ..self }
    }
}

fn describe_miles(miles: u32, furlongs: u32, yards: u32) -> (String, String, String) {
    let word = number_words(miles);
    let unit = if miles > 1 { "miles" } else { "mile" };

    if furlongs == 0 && yards == 0 {
        return (
            format!("{} {}", word, unit),
            format!("{} {}", miles, unit),
            format!("{}m", miles),
        );
    }

    if yards == 110 {
        // half a furlong, so a sixteenth of a mile
        let sixteenths = furlongs * 2 + 1;
        return (
            format!("{} and {} sixteenth miles", word, number_words(sixteenths)),
            format!("{} {}/16 miles", miles, sixteenths),
            format!("{} {}/16m", miles, sixteenths),
        );
    }

    if yards == 0 {
        return match furlongs % 4 {
            0 => (
                format!("{} and one half miles", word),
                format!("{} 1/2 miles", miles),
                format!("{} 1/2m", miles),
            ),
            2 => {
                let fourths = furlongs / 2;
                (
                    format!("{} and {} fourth miles", word, number_words(fourths)),
                    format!("{} {}/4 miles", miles, fourths),
                    format!("{} {}/4m", miles, fourths),
                )
            }
            _ => (
                format!("{} and {} eighth miles", word, number_words(furlongs)),
                format!("{} {}/8 miles", miles, furlongs),
                format!("{} {}/8m", miles, furlongs),
            ),
        };
    }

    // only miles and yards are rendered; any furlong part is dropped
    let yard_unit = if yards > 1 { "yards" } else { "yard" };
    (
        format!("{} {} and {} {}", word, unit, rounded_yards_words(yards), yard_unit),
        format!("{} {} {} {}", miles, unit, yards, yard_unit),
        format!("{}m {}y", miles, yards),
    )
}

fn describe_furlongs(furlongs: u32, yards: u32) -> (String, String, String) {
    let word = number_words(furlongs);
    let unit = if furlongs > 1 { "furlongs" } else { "furlong" };

    match yards {
        0 => (
            format!("{} {}", word, unit),
            format!("{} {}", furlongs, unit),
            format!("{}f", furlongs),
        ),
        55 => (
            format!("{} and one fourth furlongs", word),
            format!("{} 1/4 furlongs", furlongs),
            format!("{} 1/4f", furlongs),
        ),
        110 => (
            format!("{} and one half furlongs", word),
            format!("{} 1/2 furlongs", furlongs),
            format!("{} 1/2f", furlongs),
        ),
        _ => {
            let yard_unit = if yards > 1 { "yards" } else { "yard" };
            (
                format!("{} {} and {} {}", word, unit, rounded_yards_words(yards), yard_unit),
                format!("{} {} {} {}", furlongs, unit, yards, yard_unit),
                format!("{}f {}y", furlongs, yards),
            )
        }
    }
}

fn describe_yards(total_yards: u32) -> (String, String, String) {
    let thousands = total_yards / 1000;
    let hundreds = (total_yards % 1000) / 100;
    let remainder = total_yards % 100;

    let mut words: Vec<String> = Vec::new();
    if thousands > 0 {
        words.push(format!("{} thousand", number_words(thousands)));
    }
    if hundreds > 0 {
        words.push(format!("{} hundred", NUMERATORS[hundreds as usize]));
    }
    if remainder > 0 {
        if !words.is_empty() {
            words.push("and".to_string());
        }
        words.push(number_words(remainder));
    }
    let yard_unit = if total_yards > 1 { "yards" } else { "yard" };
    words.push(yard_unit.to_string());

    (
        words.join(" "),
        format!("{} {}", total_yards, yard_unit),
        format!("{}y", total_yards),
    )
}

/// Words for the yards count rounded to the nearest ten
fn rounded_yards_words(yards: u32) -> String {
    if yards < 5 {
        number_words(yards)
    } else {
        number_words((yards + 5) / 10 * 10)
    }
}

/// English words for a whole number below ten thousand
fn number_words(n: u32) -> String {
    match n {
        0..=15 => NUMERATORS[n as usize].to_string(),
        16..=19 => {
            let ones = NUMERATORS[(n - 10) as usize];
            format!("{}teen", ones.trim_end_matches('t'))
        }
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, NUMERATORS[ones as usize]),
            }
        }
        100..=999 => {
            let hundreds = format!("{} hundred", NUMERATORS[(n / 100) as usize]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{} {}", hundreds, number_words(rest)),
            }
        }
        _ => {
            let thousands = format!("{} thousand", number_words(n / 1000));
            match n % 1000 {
                0 => thousands,
                rest => format!("{} {}", thousands, number_words(rest)),
            }
        }
    }
}

/// Upper-case the first character of each whitespace-delimited word
fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(feet: u32, about: bool, breed: Breed) -> RaceDistance {
        RaceDistance::from_feet(feet, about, breed).unwrap()
    }

    #[test]
    fn test_feet_to_furlongs_rounds_half_up() {
        assert!((feet_to_furlongs(660) - 1.0).abs() < 1e-9);
        assert!((feet_to_furlongs(3630) - 5.5).abs() < 1e-9);
        assert!((feet_to_furlongs(8250) - 12.5).abs() < 1e-9);
        // 1000 / 660 = 1.51515...
        assert!((feet_to_furlongs(1000) - 1.52).abs() < 1e-9);
        // 3003 / 660 = 4.55 exactly
        assert!((feet_to_furlongs(3003) - 4.55).abs() < 1e-9);
        assert!((feet_to_furlongs(-660) + 1.0).abs() < 1e-9);
        assert_eq!(feet_to_furlongs(0), 0.0);
    }

    #[test]
    fn test_zero_feet_is_rejected() {
        assert_eq!(
            RaceDistance::from_feet(0, false, Breed::Thoroughbred),
            Err(ChartError::ZeroDistance)
        );
    }

    #[test]
    fn test_under_one_yard_is_rejected() {
        assert_eq!(
            RaceDistance::from_feet(2, false, Breed::QuarterHorse),
            Err(ChartError::DistanceUnderOneYard(2))
        );
        assert!(RaceDistance::from_feet(1, true, Breed::Thoroughbred).is_err());
    }

    #[test]
    fn test_whole_miles() {
        let d = distance(5280, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Mile");
        assert_eq!(d.alt, "1 Mile");
        assert_eq!(d.compact, "1m");
        assert!(d.exact);
        assert!((d.furlongs() - 8.0).abs() < 1e-9);

        let d = distance(10560, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About Two Miles");
        assert_eq!(d.alt, "About 2 Miles");
        assert_eq!(d.compact, "Abt 2m");
        assert!(!d.exact);
    }

    #[test]
    fn test_sixteenth_miles() {
        let d = distance(8250, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About One And Nine Sixteenth Miles");
        assert_eq!(d.alt, "About 1 9/16 Miles");
        assert_eq!(d.compact, "Abt 1 9/16m");
    }

    #[test]
    fn test_eighth_fourth_and_half_miles() {
        let d = distance(11220, false, Breed::Thoroughbred);
        assert_eq!(d.text, "Two And One Eighth Miles");
        assert_eq!(d.alt, "2 1/8 Miles");
        assert_eq!(d.compact, "2 1/8m");

        let d = distance(7920, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About One And One Half Miles");
        assert_eq!(d.compact, "Abt 1 1/2m");

        let d = distance(6600, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One And One Fourth Miles");
        assert_eq!(d.alt, "1 1/4 Miles");
        assert_eq!(d.compact, "1 1/4m");
    }

    #[test]
    fn test_miles_and_yards() {
        let d = distance(10680, false, Breed::Thoroughbred);
        assert_eq!(d.text, "Two Miles And Forty Yards");
        assert_eq!(d.alt, "2 Miles 40 Yards");
        assert_eq!(d.compact, "2m 40y");

        let d = distance(5490, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About One Mile And Seventy Yards");
        assert_eq!(d.alt, "About 1 Mile 70 Yards");
        assert_eq!(d.compact, "Abt 1m 70y");
    }

    #[test]
    fn test_single_yard_is_singular() {
        let d = distance(3, false, Breed::QuarterHorse);
        assert_eq!(d.text, "One Yard");
        assert_eq!(d.alt, "1 Yard");
        assert_eq!(d.compact, "1y");

        // one mile and one yard
        let d = distance(5283, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Mile And One Yard");
        assert_eq!(d.alt, "1 Mile 1 Yard");

        // four furlongs and one yard
        let d = distance(2643, false, Breed::Arabian);
        assert_eq!(d.text, "Four Furlongs And One Yard");
        assert_eq!(d.alt, "4 Furlongs 1 Yard");
    }

    #[test]
    fn test_furlong_part_not_rendered_with_miles_and_yards() {
        // one mile, one furlong and 40 yards
        let d = distance(6060, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Mile And Forty Yards");
        assert_eq!(d.compact, "1m 40y");
        assert!((d.furlongs() - 9.18).abs() < 1e-9);
    }

    #[test]
    fn test_odd_yards_round_to_nearest_ten() {
        // 1 mile 46 yards
        let d = distance(5418, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Mile And Fifty Yards");
        assert_eq!(d.alt, "1 Mile 46 Yards");
        assert_eq!(d.compact, "1m 46y");
    }

    #[test]
    fn test_furlongs() {
        let d = distance(660, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Furlong");
        assert_eq!(d.alt, "1 Furlong");
        assert_eq!(d.compact, "1f");

        let d = distance(4620, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About Seven Furlongs");
        assert_eq!(d.compact, "Abt 7f");

        let d = distance(3630, false, Breed::Thoroughbred);
        assert_eq!(d.text, "Five And One Half Furlongs");
        assert_eq!(d.alt, "5 1/2 Furlongs");
        assert_eq!(d.compact, "5 1/2f");

        let d = distance(3465, true, Breed::Thoroughbred);
        assert_eq!(d.text, "About Five And One Fourth Furlongs");
        assert_eq!(d.compact, "Abt 5 1/4f");
    }

    #[test]
    fn test_furlongs_and_yards_for_arabians() {
        let d = distance(2850, false, Breed::Arabian);
        assert_eq!(d.text, "Four Furlongs And Seventy Yards");
        assert_eq!(d.alt, "4 Furlongs 70 Yards");
        assert_eq!(d.compact, "4f 70y");
    }

    #[test]
    fn test_quarter_horse_yards() {
        let d = distance(600, false, Breed::QuarterHorse);
        assert_eq!(d.text, "Two Hundred Yards");
        assert_eq!(d.alt, "200 Yards");
        assert_eq!(d.compact, "200y");

        let d = distance(3000, false, Breed::QuarterHorse);
        assert_eq!(d.text, "One Thousand Yards");

        let d = distance(1200, true, Breed::QuarterHorse);
        assert_eq!(d.text, "About Four Hundred Yards");
        assert_eq!(d.compact, "Abt 400y");

        let d = distance(1980, false, Breed::QuarterHorse);
        assert_eq!(d.text, "Six Hundred And Sixty Yards");
        assert_eq!(d.compact, "660y");

        let d = distance(3300, false, Breed::QuarterHorse);
        assert_eq!(d.text, "One Thousand One Hundred Yards");

        let d = distance(1125, false, Breed::QuarterHorse);
        assert_eq!(d.text, "Three Hundred And Seventy Five Yards");

        let d = distance(945, false, Breed::QuarterHorse);
        assert_eq!(d.text, "Three Hundred And Fifteen Yards");

        let d = distance(1050, false, Breed::QuarterHorse);
        assert_eq!(d.text, "Three Hundred And Fifty Yards");
        assert_eq!(d.compact, "350y");
    }

    #[test]
    fn test_mixed_yards() {
        let d = distance(660, true, Breed::Mixed);
        assert_eq!(d.text, "About Two Hundred And Twenty Yards");

        let d = distance(3960, false, Breed::Mixed);
        assert_eq!(d.text, "One Thousand Three Hundred And Twenty Yards");
    }

    #[test]
    fn test_short_thoroughbred_distance_uses_yards() {
        let d = distance(300, false, Breed::Thoroughbred);
        assert_eq!(d.text, "One Hundred Yards");
        assert_eq!(d.compact, "100y");
    }

    #[test]
    fn test_number_words() {
        assert_eq!(number_words(16), "sixteen");
        assert_eq!(number_words(18), "eighteen");
        assert_eq!(number_words(19), "nineteen");
        assert_eq!(number_words(75), "seventy five");
        assert_eq!(number_words(1320), "one thousand three hundred twenty");
    }

    #[test]
    fn test_run_up_and_temp_rail() {
        let d = distance(5280, false, Breed::Thoroughbred)
            .with_run_up(Some(50))
            .with_temp_rail(Some(20));
        assert_eq!(d.run_up, Some(50));
        assert_eq!(d.temp_rail, Some(20));
    }
}
