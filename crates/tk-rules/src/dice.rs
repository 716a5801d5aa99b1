//! Polyhedral dice.
//!
//! Every roll takes the RNG from the caller, so a seeded generator
//! reproduces a whole character or rest sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A polyhedral die, identified by its side count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Die {
    /// d4.
    D4,
    /// d6.
    D6,
    /// d8.
    D8,
    /// d10.
    D10,
    /// d12.
    D12,
    /// d20.
    D20,
    /// Any other side count (at least 2).
    Other(u32),
}

impl Die {
    /// Side count.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::Other(n) => n,
        }
    }

    /// The die with `sides` faces, or `None` below two.
    pub fn with_sides(sides: u32) -> Option<Self> {
        Some(match sides {
            0 | 1 => return None,
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            n => Self::Other(n),
        })
    }

    /// Parse "d8" or "1d10". A count prefix is accepted and ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (count, sides) = lower.split_once('d')?;
        if !count.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Self::with_sides(sides.parse().ok()?)
    }

    /// Fixed hit point gain for this die: half the sides plus one.
    pub fn average(self) -> u32 {
        self.sides() / 2 + 1
    }

    /// Roll the die once.
    pub fn roll<R: Rng>(self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.sides())
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl TryFrom<String> for Die {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("not a die: {s}"))
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}

/// Several dice of one kind rolled together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// The die rolled.
    pub die: Die,
    /// Face values in roll order.
    pub values: Vec<u32>,
}

impl Roll {
    /// Roll `count` dice.
    pub fn new<R: Rng>(die: Die, count: usize, rng: &mut R) -> Self {
        let values = (0..count).map(|_| die.roll(rng)).collect();
        Self { die, values }
    }

    /// Sum of every face.
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// Sum of the `n` highest faces, e.g. 4d6 keep 3.
    pub fn keep_highest(&self, n: usize) -> u32 {
        let mut sorted = self.values.clone();
        sorted.sort_unstable();
        sorted.iter().rev().take(n).sum()
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.values.iter().map(u32::to_string).collect();
        write!(
            f,
            "{}{} ({}) = {}",
            self.values.len(),
            self.die,
            faces.join(" + "),
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parse_hit_die_strings() {
        assert_eq!(Die::parse("1d10"), Some(Die::D10));
        assert_eq!(Die::parse("d12"), Some(Die::D12));
        assert_eq!(Die::parse(" 1D6 "), Some(Die::D6));
        assert_eq!(Die::parse("d30"), Some(Die::Other(30)));
        assert_eq!(Die::parse("d1"), None);
        assert_eq!(Die::parse("ten"), None);
        assert_eq!(Die::parse("xd8"), None);
    }

    #[test]
    fn average_rounds_up() {
        assert_eq!(Die::D6.average(), 4);
        assert_eq!(Die::D8.average(), 5);
        assert_eq!(Die::D10.average(), 6);
        assert_eq!(Die::D12.average(), 7);
    }

    #[test]
    fn rolls_stay_on_the_die() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!((1..=8).contains(&Die::D8.roll(&mut rng)));
        }
        let roll = Roll::new(Die::D20, 5, &mut rng);
        assert_eq!(roll.values.len(), 5);
        assert!(roll.values.iter().all(|v| (1..=20).contains(v)));
    }

    #[test]
    fn seeded_rolls_repeat() {
        let a = Roll::new(Die::D6, 4, &mut StdRng::seed_from_u64(99));
        let b = Roll::new(Die::D6, 4, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn keep_highest_drops_lowest() {
        let roll = Roll {
            die: Die::D6,
            values: vec![3, 6, 1, 4],
        };
        assert_eq!(roll.total(), 14);
        assert_eq!(roll.keep_highest(3), 13);
        assert_eq!(roll.keep_highest(10), 14);
        assert_eq!(roll.to_string(), "4d6 (3 + 6 + 1 + 4) = 14");
    }

    #[test]
    fn die_serializes_as_text() {
        assert_eq!(serde_json::to_string(&Die::D10).unwrap(), "\"d10\"");
        let die: Die = serde_json::from_str("\"1d8\"").unwrap();
        assert_eq!(die, Die::D8);
        assert!(serde_json::from_str::<Die>("\"d0\"").is_err());
    }
}
