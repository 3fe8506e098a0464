//! Set score validation.
//!
//! A set is decided either on games (6-0 through 6-4, or 7-5) or, at 7-6/6-7,
//! by tiebreak points (first to at least 7, ahead by at least 2).

pub(crate) mod input;

use tracing::debug;

use crate::model::{MatchOutcome, MatchScore, Side, ValidatedScore};

pub use input::{parse_field, InputError, ScoreField, ScoreInput};

/// Games needed to win a set without a tiebreak.
const SET_GAMES: u32 = 6;
/// Points needed to win a tiebreak.
const TIEBREAK_POINTS: u32 = 7;
/// Minimum lead in a 6-game set and in a tiebreak.
const WINNING_MARGIN: u32 = 2;

/// Reasons a score is not a legal completed set.
///
/// The `Display` text is meant to be shown to the person entering the score.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// One or both game counts are absent.
    #[error("both game counts are required")]
    MissingGames,

    /// 6-6 is never a final score; the set goes to a tiebreak.
    #[error("a 6-6 score is not allowed, enter 7-6 or 6-7 with the tiebreak")]
    InvalidSixAllScore,

    /// A 7-6 or 6-7 score without both tiebreak values.
    #[error("tiebreak points are required for a 7-6 or 6-7 score")]
    MissingTiebreak,

    /// Neither side reached 7 tiebreak points.
    #[error("the tiebreak must be played to at least 7 points")]
    TiebreakTooLow,

    /// The tiebreak winner is ahead by fewer than 2 points.
    #[error("the tiebreak must be won by at least 2 points")]
    TiebreakMarginTooSmall,

    /// Tiebreak points given for a score other than 7-6 or 6-7.
    #[error("tiebreak points are only allowed for a 7-6 or 6-7 score")]
    TiebreakNotAllowed,

    /// Game counts that do not finish a set.
    #[error("without a tiebreak only 6-0 to 6-4 or 7-5 are valid set scores")]
    InvalidGameScore,
}

/// Check that `score` is a legal completed set and find out who won it.
pub fn validate(score: &MatchScore) -> Result<ValidatedScore, ValidationError> {
    let result = check(score);
    if let Err(reason) = &result {
        debug!(?score, %reason, "rejected set score");
    }
    result
}

/// [`validate`] over the four loose values.
pub fn validate_parts(
    games_a: Option<u32>,
    games_b: Option<u32>,
    tiebreak_a: Option<u32>,
    tiebreak_b: Option<u32>,
) -> Result<ValidatedScore, ValidationError> {
    validate(&MatchScore {
        games_a,
        games_b,
        tiebreak_a,
        tiebreak_b,
    })
}

/// Who won the set, or `Undecided` when the score is unset or not legal.
pub fn outcome(score: &MatchScore) -> MatchOutcome {
    check(score)
        .map(|validated| validated.outcome())
        .unwrap_or(MatchOutcome::Undecided)
}

fn check(score: &MatchScore) -> Result<ValidatedScore, ValidationError> {
    let (Some(games_a), Some(games_b)) = (score.games_a, score.games_b) else {
        return Err(ValidationError::MissingGames);
    };

    if games_a == SET_GAMES && games_b == SET_GAMES {
        return Err(ValidationError::InvalidSixAllScore);
    }

    if score.is_tiebreak_score() {
        let (Some(tiebreak_a), Some(tiebreak_b)) = (score.tiebreak_a, score.tiebreak_b) else {
            return Err(ValidationError::MissingTiebreak);
        };

        if tiebreak_a.max(tiebreak_b) < TIEBREAK_POINTS {
            return Err(ValidationError::TiebreakTooLow);
        }
        if tiebreak_a.abs_diff(tiebreak_b) < WINNING_MARGIN {
            return Err(ValidationError::TiebreakMarginTooSmall);
        }

        let winner = if tiebreak_a > tiebreak_b { Side::A } else { Side::B };
        return Ok(ValidatedScore::new(
            games_a,
            games_b,
            Some((tiebreak_a, tiebreak_b)),
            winner,
        ));
    }

    if score.tiebreak_a.is_some() || score.tiebreak_b.is_some() {
        return Err(ValidationError::TiebreakNotAllowed);
    }

    let winner_games = games_a.max(games_b);
    let loser_games = games_a.min(games_b);
    let margin = winner_games - loser_games;

    let decided = (winner_games == SET_GAMES && margin >= WINNING_MARGIN)
        || (winner_games == SET_GAMES + 1 && loser_games == SET_GAMES - 1);
    if !decided {
        return Err(ValidationError::InvalidGameScore);
    }

    let winner = if games_a > games_b { Side::A } else { Side::B };
    Ok(ValidatedScore::new(games_a, games_b, None, winner))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn games(a: u32, b: u32) -> Result<ValidatedScore, ValidationError> {
        validate(&MatchScore::games(a, b))
    }

    fn tiebreak(a: u32, b: u32, ta: u32, tb: u32) -> Result<ValidatedScore, ValidationError> {
        validate(&MatchScore::with_tiebreak(a, b, ta, tb))
    }

    #[test]
    fn test_straight_sets() {
        for loser in 0..=4 {
            assert_eq!(games(6, loser).unwrap().winner(), Side::A);
            assert_eq!(games(loser, 6).unwrap().winner(), Side::B);
        }
    }

    #[test]
    fn test_seven_five() {
        let score = games(7, 5).unwrap();
        assert_eq!(score.winner(), Side::A);
        assert_eq!(score.outcome(), MatchOutcome::SideAWin);
        assert_eq!(games(5, 7).unwrap().winner(), Side::B);
    }

    #[test]
    fn test_six_all_rejected() {
        assert_eq!(games(6, 6), Err(ValidationError::InvalidSixAllScore));
        assert_eq!(
            tiebreak(6, 6, 7, 5),
            Err(ValidationError::InvalidSixAllScore)
        );
    }

    #[test]
    fn test_missing_games() {
        assert_eq!(
            validate(&MatchScore::unset()),
            Err(ValidationError::MissingGames)
        );
        assert_eq!(
            validate_parts(Some(6), None, None, None),
            Err(ValidationError::MissingGames)
        );
        assert_eq!(
            validate_parts(None, Some(0), None, None),
            Err(ValidationError::MissingGames)
        );
    }

    #[test]
    fn test_zero_is_a_value() {
        let score = validate_parts(Some(0), Some(6), None, None).unwrap();
        assert_eq!(score.winner(), Side::B);
        assert_eq!(score.games_a(), 0);
    }

    #[test]
    fn test_tiebreak_win() {
        let score = tiebreak(7, 6, 7, 5).unwrap();
        assert_eq!(score.winner(), Side::A);
        assert!(score.is_tiebreak());
        assert_eq!(score.label(), "7x6 (7x5)");

        let extended = tiebreak(6, 7, 10, 12).unwrap();
        assert_eq!(extended.winner(), Side::B);
    }

    #[test]
    fn test_tiebreak_too_low() {
        assert_eq!(tiebreak(7, 6, 6, 5), Err(ValidationError::TiebreakTooLow));
        assert_eq!(tiebreak(6, 7, 0, 0), Err(ValidationError::TiebreakTooLow));
    }

    #[test]
    fn test_tiebreak_margin_too_small() {
        assert_eq!(
            tiebreak(7, 6, 8, 7),
            Err(ValidationError::TiebreakMarginTooSmall)
        );
        assert_eq!(
            tiebreak(7, 6, 7, 7),
            Err(ValidationError::TiebreakMarginTooSmall)
        );
    }

    #[test]
    fn test_missing_tiebreak() {
        assert_eq!(games(7, 6), Err(ValidationError::MissingTiebreak));
        assert_eq!(
            validate_parts(Some(6), Some(7), Some(7), None),
            Err(ValidationError::MissingTiebreak)
        );
    }

    #[test]
    fn test_tiebreak_not_allowed() {
        assert_eq!(
            tiebreak(6, 3, 7, 5),
            Err(ValidationError::TiebreakNotAllowed)
        );
        assert_eq!(
            validate_parts(Some(7), Some(5), None, Some(2)),
            Err(ValidationError::TiebreakNotAllowed)
        );
    }

    #[test]
    fn test_invalid_game_scores() {
        for (a, b) in [(8, 6), (6, 5), (5, 6), (7, 4), (7, 7), (3, 3), (0, 0), (4, 2), (9, 0)] {
            assert_eq!(
                games(a, b),
                Err(ValidationError::InvalidGameScore),
                "{a}-{b} should be rejected"
            );
        }
    }

    #[test]
    fn test_outcome_of_unset_and_invalid_scores() {
        assert_eq!(outcome(&MatchScore::unset()), MatchOutcome::Undecided);
        assert_eq!(outcome(&MatchScore::games(8, 6)), MatchOutcome::Undecided);
        assert_eq!(outcome(&MatchScore::games(2, 6)), MatchOutcome::SideBWin);
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ValidationError::TiebreakTooLow.to_string(),
            "the tiebreak must be played to at least 7 points"
        );
    }

    proptest! {
        #[test]
        fn prop_six_all_always_rejected(
            tiebreak_a in proptest::option::of(0u32..30),
            tiebreak_b in proptest::option::of(0u32..30),
        ) {
            prop_assert_eq!(
                validate_parts(Some(6), Some(6), tiebreak_a, tiebreak_b),
                Err(ValidationError::InvalidSixAllScore)
            );
        }

        #[test]
        fn prop_tiebreak_outside_seven_six_rejected(
            (a, b) in (0u32..15, 0u32..15)
                .prop_filter("not 7-6, 6-7 or 6-6", |&(a, b)| {
                    !matches!((a, b), (7, 6) | (6, 7) | (6, 6))
                }),
            tiebreak_a in 0u32..30,
            tiebreak_b in proptest::option::of(0u32..30),
        ) {
            prop_assert_eq!(
                validate_parts(Some(a), Some(b), Some(tiebreak_a), tiebreak_b),
                Err(ValidationError::TiebreakNotAllowed)
            );
        }

        #[test]
        fn prop_seven_six_without_tiebreak_rejected(a_leads in any::<bool>()) {
            let (a, b) = if a_leads { (7, 6) } else { (6, 7) };
            prop_assert_eq!(games(a, b), Err(ValidationError::MissingTiebreak));
        }

        #[test]
        fn prop_validate_is_deterministic(
            games_a in proptest::option::of(0u32..10),
            games_b in proptest::option::of(0u32..10),
            tiebreak_a in proptest::option::of(0u32..20),
            tiebreak_b in proptest::option::of(0u32..20),
        ) {
            let first = validate_parts(games_a, games_b, tiebreak_a, tiebreak_b);
            let second = validate_parts(games_a, games_b, tiebreak_a, tiebreak_b);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_winner_has_more_games_or_tiebreak_points(
            games_a in 0u32..10,
            games_b in 0u32..10,
            tiebreak_a in proptest::option::of(0u32..20),
            tiebreak_b in proptest::option::of(0u32..20),
        ) {
            let result = validate_parts(Some(games_a), Some(games_b), tiebreak_a, tiebreak_b);
            if let Ok(score) = result {
                let (winner_pts, loser_pts) = match (score.tiebreak(), score.winner()) {
                    (Some((a, b)), Side::A) => (a, b),
                    (Some((a, b)), Side::B) => (b, a),
                    (None, Side::A) => (games_a, games_b),
                    (None, Side::B) => (games_b, games_a),
                };
                prop_assert!(winner_pts > loser_pts);
            }
        }
    }
}
