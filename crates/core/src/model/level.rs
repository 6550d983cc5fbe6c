use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

/// An ordinal difficulty scale.
///
/// `rank` is the sort key: lower ranks are easier, so ascending order goes
/// from the easiest level to the hardest.
pub trait Level: Copy + Eq + fmt::Debug {
    fn rank(self) -> u8;
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty of checklists, quizzes and quiz questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Capitalized label used in exported documents.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl Level for Difficulty {
    fn rank(self) -> u8 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 2,
        }
    }
}

//
// ─── TIER ──────────────────────────────────────────────────────────────────────
//

/// Seniority tier of an interview question.
///
/// Kept separate from `Difficulty`: the two scales are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Junior,
    Mid,
    Senior,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Self::Junior, Self::Mid, Self::Senior];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Junior => "junior",
            Tier::Mid => "mid",
            Tier::Senior => "senior",
        }
    }
}

impl Level for Tier {
    fn rank(self) -> u8 {
        match self {
            Tier::Junior => 0,
            Tier::Mid => 1,
            Tier::Senior => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContentError::UnknownLevel(s.to_string()))
    }
}

impl FromStr for Tier {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContentError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_order_easiest_first() {
        assert!(Difficulty::Beginner.rank() < Difficulty::Intermediate.rank());
        assert!(Difficulty::Intermediate.rank() < Difficulty::Advanced.rank());
        assert!(Tier::Junior.rank() < Tier::Mid.rank());
        assert!(Tier::Mid.rank() < Tier::Senior.rank());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!(" senior ".parse::<Tier>().unwrap(), Tier::Senior);
        assert!(matches!(
            "expert".parse::<Difficulty>(),
            Err(ContentError::UnknownLevel(_))
        ));
    }
}
