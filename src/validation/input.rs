use crate::error::Result;
use crate::model::{MatchScore, ValidatedScore};
use crate::validation::validate;

/// The four score fields of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ScoreField {
    GamesA,
    GamesB,
    TiebreakA,
    TiebreakB,
}

/// A score field whose text is not a non-negative whole number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: ScoreField, value: String },
}

/// Parse one score field. Blank text means the value was not entered yet.
pub fn parse_field(field: ScoreField, text: &str) -> std::result::Result<Option<u32>, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| InputError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Score fields as typed into a form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreInput {
    pub games_a: String,
    pub games_b: String,
    pub tiebreak_a: String,
    pub tiebreak_b: String,
}

impl ScoreInput {
    /// Pre-fill the fields from a stored score, leaving unset values blank.
    pub fn from_score(score: &MatchScore) -> Self {
        let text = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
        Self {
            games_a: text(score.games_a),
            games_b: text(score.games_b),
            tiebreak_a: text(score.tiebreak_a),
            tiebreak_b: text(score.tiebreak_b),
        }
    }

    pub fn parse(&self) -> std::result::Result<MatchScore, InputError> {
        Ok(MatchScore {
            games_a: parse_field(ScoreField::GamesA, &self.games_a)?,
            games_b: parse_field(ScoreField::GamesB, &self.games_b)?,
            tiebreak_a: parse_field(ScoreField::TiebreakA, &self.tiebreak_a)?,
            tiebreak_b: parse_field(ScoreField::TiebreakB, &self.tiebreak_b)?,
        })
    }

    /// Whether the games entered so far call for tiebreak fields.
    pub fn is_tiebreak(&self) -> bool {
        let games_a = parse_field(ScoreField::GamesA, &self.games_a).ok().flatten();
        let games_b = parse_field(ScoreField::GamesB, &self.games_b).ok().flatten();
        MatchScore {
            games_a,
            games_b,
            ..MatchScore::default()
        }
        .is_tiebreak_score()
    }

    /// Parse and validate, ready to be sent to the backend.
    pub fn submission(&self) -> Result<ValidatedScore> {
        let score = self.parse()?;
        Ok(validate(&score)?)
    }
}
