//! Day 2: Cube Conundrum

use core::num::ParseIntError;
use core::str::FromStr;

use lib::prelude::*;
use thiserror::Error;

/// Most cubes of each color which the bag holds.
const LIMIT: Sample = Sample {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseGameError {
    #[error("bad format: missing `:`")]
    MissingColon,
    #[error("bad format: game id")]
    GameId,
    #[error("bad game id: {0}")]
    Id(#[source] ParseIntError),
    #[error("bad format: sample `{0}`")]
    Sample(String),
    #[error("bad count: {0}")]
    Count(#[source] ParseIntError),
}

/// Cubes of each color revealed at the same time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Sample {
    /// Test if every color is within the given limit.
    #[inline]
    fn within(&self, limit: &Sample) -> bool {
        self.red <= limit.red && self.green <= limit.green && self.blue <= limit.blue
    }

    /// Product of every color.
    #[inline]
    pub fn power(&self) -> u64 {
        u64::from(self.red) * u64::from(self.green) * u64::from(self.blue)
    }
}

impl FromStr for Sample {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sample = Sample::default();

        for pull in s.split(',') {
            let pull = pull.trim_matches(' ');

            let mut parts = pull.split(' ');

            let (Some(count), Some(color), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseGameError::Sample(pull.to_owned()));
            };

            let count = count.parse::<u32>().map_err(ParseGameError::Count)?;

            // Unknown colors are ignored.
            match color {
                "red" => sample.red = count,
                "green" => sample.green = count,
                "blue" => sample.blue = count,
                _ => {}
            }
        }

        Ok(sample)
    }
}

/// A single game and every sample taken during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub samples: Vec<Sample>,
}

impl Game {
    /// Test if the game is possible with the cubes in the bag.
    pub fn is_possible(&self) -> bool {
        self.samples.iter().all(|s| s.within(&LIMIT))
    }

    /// The fewest number of cubes of each color which could have been used to
    /// play the game.
    pub fn min_colors(&self) -> Sample {
        self.samples.iter().fold(Sample::default(), |min, s| Sample {
            red: min.red.max(s.red),
            green: min.green.max(s.green),
            blue: min.blue.max(s.blue),
        })
    }
}

impl FromStr for Game {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');

        let (Some(head), Some(rest), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseGameError::MissingColon);
        };

        let id = head
            .strip_prefix("Game ")
            .ok_or(ParseGameError::GameId)?;

        let id = id.parse::<i64>().map_err(ParseGameError::Id)?;

        let samples = rest
            .split(';')
            .map(str::parse)
            .collect::<Result<Vec<Sample>, _>>()?;

        Ok(Game { id, samples })
    }
}

lib::from_input! {
    |line: &str| -> Game {
        Ok(line.parse()?)
    }
}

pub fn solve(mut input: IStr) -> Result<(i64, u64)> {
    let mut games = Vec::new();

    while let Some(game) = input.try_line::<Game>()? {
        games.push(game);
    }

    let mut o1 = 0;

    for game in &games {
        if game.is_possible() {
            o1 += game.id;
        } else {
            debug!("game {} is impossible", game.id);
        }
    }

    let o2 = games.iter().map(|game| game.min_colors().power()).sum();
    Ok((o1, o2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(red: u32, green: u32, blue: u32) -> Sample {
        Sample { red, green, blue }
    }

    fn game(samples: &[Sample]) -> Game {
        Game {
            id: 1,
            samples: samples.to_vec(),
        }
    }

    #[test]
    fn test_parse_game() {
        assert_eq!(
            "Game 33: 1 red, 2 blue, 3 green".parse::<Game>(),
            Ok(Game {
                id: 33,
                samples: vec![sample(1, 3, 2)],
            })
        );

        assert_eq!(
            "Game 4123: 100 red, 23 blue, 13 green; 7 red, 13 blue, 17 green".parse::<Game>(),
            Ok(Game {
                id: 4123,
                samples: vec![sample(100, 13, 23), sample(7, 17, 13)],
            })
        );
    }

    #[test]
    fn test_signed_id() {
        assert_eq!(
            "Game -3: 1 red".parse::<Game>(),
            Ok(Game {
                id: -3,
                samples: vec![sample(1, 0, 0)],
            })
        );
    }

    #[test]
    fn test_repeated_color() {
        assert_eq!(
            "Game 1: 4 red, 2 blue, 1 red".parse::<Game>(),
            Ok(Game {
                id: 1,
                samples: vec![sample(1, 0, 2)],
            })
        );
    }

    #[test]
    fn test_unknown_color() {
        assert_eq!(
            "Game 2: 1 red, 5 purple, 2 blue".parse::<Game>(),
            Ok(Game {
                id: 2,
                samples: vec![sample(1, 0, 2)],
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "Game 1 1 red".parse::<Game>(),
            Err(ParseGameError::MissingColon)
        );
        assert_eq!(
            "Game 1: 1 red: 2 blue".parse::<Game>(),
            Err(ParseGameError::MissingColon)
        );
        assert_eq!(
            "Round 1: 1 red".parse::<Game>(),
            Err(ParseGameError::GameId)
        );
        assert!(matches!(
            "Game x: 1 red".parse::<Game>(),
            Err(ParseGameError::Id(..))
        ));
        assert_eq!(
            "Game 1: 1 red green".parse::<Game>(),
            Err(ParseGameError::Sample("1 red green".to_owned()))
        );
        assert_eq!(
            "Game 1: 1 red, blue".parse::<Game>(),
            Err(ParseGameError::Sample("blue".to_owned()))
        );
        assert!(matches!(
            "Game 1: many red".parse::<Game>(),
            Err(ParseGameError::Count(..))
        ));
    }

    #[test]
    fn test_is_possible() {
        assert!(game(&[sample(12, 13, 14)]).is_possible());
        assert!(game(&[sample(0, 0, 0), sample(12, 0, 14)]).is_possible());
        assert!(!game(&[sample(13, 0, 0)]).is_possible());
        assert!(!game(&[sample(1, 1, 1), sample(0, 14, 0)]).is_possible());
        assert!(!game(&[sample(0, 0, 15)]).is_possible());
    }

    #[test]
    fn test_min_colors() {
        let g = game(&[sample(1, 2, 3)]);
        assert_eq!(g.min_colors(), sample(1, 2, 3));
        assert_eq!(g.min_colors().power(), 6);

        let g = game(&[sample(4, 0, 3), sample(1, 2, 6), sample(0, 2, 0)]);
        assert_eq!(g.min_colors(), sample(4, 2, 6));
        assert_eq!(g.min_colors().power(), 48);
    }

    #[test]
    fn test_example() {
        let input = IStr::new(
            concat!(
                "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green\n",
                "Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue\n",
                "Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red\n",
                "Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red\n",
                "Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green\n",
            )
            .as_bytes(),
            Size::ZERO,
        );

        assert_eq!(solve(input).unwrap(), (8, 2286));
    }

    #[test]
    fn test_error_position() {
        let input = IStr::new(b"Game 1: 1 red\nGame 2 2 red\n", Size::ZERO);
        let error = solve(input).unwrap_err();
        let error = lib::cli::error_context(std::path::Path::new("d02.txt"), input, error);
        assert_eq!(error.to_string(), "d02.txt:2:0");
    }
}
