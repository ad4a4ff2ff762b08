//! species.rs
//!
//! Pet species and the "human years" curve each one maps to.
//!
//! Curves are step functions over whole elapsed years:
//!   • Dog / Cat / Other:  15 at year 1, 24 at year 2, then +4 per year
//!   • Reptile:            10 at year 1, then +3 per year
//!   • Bird:               12 at year 1, then +5 per year
//!   • Rabbit / Hamster:   18 at year 1, then +8 per year

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
    Reptile,
    Bird,
    Rabbit,
    Hamster,
    #[serde(other)]
    Other,
}

/// Growth curve shared by one or more species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    DogCat,
    Reptile,
    Bird,
    SmallMammal,
}

impl Species {
    pub fn curve(self) -> Curve {
        match self {
            Species::Dog | Species::Cat | Species::Other => Curve::DogCat,
            Species::Reptile => Curve::Reptile,
            Species::Bird => Curve::Bird,
            Species::Rabbit | Species::Hamster => Curve::SmallMammal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Reptile => "Reptile",
            Species::Bird => "Bird",
            Species::Rabbit => "Rabbit",
            Species::Hamster => "Hamster",
            Species::Other => "Other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names match exactly, as in the stored records and the serde form.
/// Anything else falls back to `Other`, so parsing never fails.
impl FromStr for Species {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let species = match s {
            "Dog" => Species::Dog,
            "Cat" => Species::Cat,
            "Reptile" => Species::Reptile,
            "Bird" => Species::Bird,
            "Rabbit" => Species::Rabbit,
            "Hamster" => Species::Hamster,
            _ => Species::Other,
        };
        Ok(species)
    }
}

impl Curve {
    /// Human-equivalent years for `age_in_years` whole real years.
    pub fn human_years(self, age_in_years: i64) -> i64 {
        if age_in_years <= 0 {
            return 0;
        }

        match self {
            Curve::DogCat => match age_in_years {
                1 => 15,
                2 => 24,
                n => step(24, n - 2, 4),
            },
            Curve::Reptile => step(10, age_in_years - 1, 3),
            Curve::Bird => step(12, age_in_years - 1, 5),
            Curve::SmallMammal => step(18, age_in_years - 1, 8),
        }
    }
}

fn step(base: i64, extra_years: i64, per_year: i64) -> i64 {
    base.saturating_add(extra_years.saturating_mul(per_year))
}
