use serde::{Deserialize, Serialize};

/// One of the two competing parties in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Game and tiebreak counts of a single set, as entered or persisted.
///
/// Every field is optional: `None` means "not provided yet", which is not the
/// same as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub games_a: Option<u32>,
    pub games_b: Option<u32>,
    pub tiebreak_a: Option<u32>,
    pub tiebreak_b: Option<u32>,
}

impl MatchScore {
    /// The score of a freshly created match.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn games(games_a: u32, games_b: u32) -> Self {
        Self {
            games_a: Some(games_a),
            games_b: Some(games_b),
            ..Self::default()
        }
    }

    pub fn with_tiebreak(games_a: u32, games_b: u32, tiebreak_a: u32, tiebreak_b: u32) -> Self {
        Self {
            games_a: Some(games_a),
            games_b: Some(games_b),
            tiebreak_a: Some(tiebreak_a),
            tiebreak_b: Some(tiebreak_b),
        }
    }

    pub fn is_set(&self) -> bool {
        self.games_a.is_some() && self.games_b.is_some()
    }

    /// Whether the games stand at 7-6 or 6-7.
    pub fn is_tiebreak_score(&self) -> bool {
        is_tiebreak_games(self.games_a, self.games_b)
    }
}

fn is_tiebreak_games(games_a: Option<u32>, games_b: Option<u32>) -> bool {
    matches!((games_a, games_b), (Some(7), Some(6)) | (Some(6), Some(7)))
}

/// Who won a set, independent of any participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOutcome {
    SideAWin,
    SideBWin,
    Undecided,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::SideAWin => Some(Side::A),
            MatchOutcome::SideBWin => Some(Side::B),
            MatchOutcome::Undecided => None,
        }
    }

    /// Win or loss from the point of view of `side`, if the set is decided.
    pub fn result_for(self, side: Side) -> Option<SetResult> {
        self.winner().map(|winner| {
            if winner == side {
                SetResult::Win
            } else {
                SetResult::Loss
            }
        })
    }
}

impl From<Side> for MatchOutcome {
    fn from(winner: Side) -> Self {
        match winner {
            Side::A => MatchOutcome::SideAWin,
            Side::B => MatchOutcome::SideBWin,
        }
    }
}

/// A participant's result in a decided set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SetResult {
    Win,
    Loss,
}

/// A score that passed validation, together with the side that won it.
///
/// Only [`crate::validation::validate`] builds these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatedScore {
    games_a: u32,
    games_b: u32,
    tiebreak: Option<(u32, u32)>,
    winner: Side,
}

impl ValidatedScore {
    pub(crate) fn new(
        games_a: u32,
        games_b: u32,
        tiebreak: Option<(u32, u32)>,
        winner: Side,
    ) -> Self {
        Self {
            games_a,
            games_b,
            tiebreak,
            winner,
        }
    }

    pub fn games_a(&self) -> u32 {
        self.games_a
    }

    pub fn games_b(&self) -> u32 {
        self.games_b
    }

    pub fn tiebreak(&self) -> Option<(u32, u32)> {
        self.tiebreak
    }

    pub fn is_tiebreak(&self) -> bool {
        self.tiebreak.is_some()
    }

    pub fn winner(&self) -> Side {
        self.winner
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.winner.into()
    }

    pub fn result_for(&self, side: Side) -> SetResult {
        if self.winner == side {
            SetResult::Win
        } else {
            SetResult::Loss
        }
    }

    /// Short label such as `6x3` or `7x6 (7x5)`.
    pub fn label(&self) -> String {
        match self.tiebreak {
            Some((a, b)) => format!("{}x{} ({a}x{b})", self.games_a, self.games_b),
            None => format!("{}x{}", self.games_a, self.games_b),
        }
    }

    pub fn to_score(&self) -> MatchScore {
        MatchScore {
            games_a: Some(self.games_a),
            games_b: Some(self.games_b),
            tiebreak_a: self.tiebreak.map(|(a, _)| a),
            tiebreak_b: self.tiebreak.map(|(_, b)| b),
        }
    }
}
