//! Structural validation of scramble strings.
//!
//! Parses a scramble for a given puzzle type and checks the same grammar the
//! generators follow: alphabet and modifier closure, move count, adjacency
//! rules, Pyraminx tip uniqueness and order, and the Clock pin/dial layout.

use serde::Serialize;

use crate::constraints::{find_violation, MoveRules};
use crate::error::{Result, ScrambleError};
use crate::puzzle::{
    ClockPins, DialTurn, Face, Grammar, Move, PuzzleType, CLOCK_REORIENTATION, DIAL_OFFSETS,
    DIAL_POSITIONS, TWIST_MODIFIERS,
};

/// Counts collected while validating
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrambleMetrics {
    /// Primary moves (dial turns for Clock)
    pub moves: usize,
    /// Pyraminx tip twists
    pub tips: usize,
    /// Clock pins set by the prefix
    pub pins: usize,
}

/// Validate `text` as a scramble for `puzzle`
pub fn validate_scramble(puzzle: PuzzleType, text: &str) -> Result<ScrambleMetrics> {
    if let Some(index) = text.find(['\n', '\r', '`']) {
        return Err(ScrambleError::ConstraintViolation {
            index: text[..index].split_whitespace().count(),
            reason: "scramble must be a single line without backticks".to_string(),
        });
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    match puzzle.grammar() {
        Grammar::Faces(rules) => validate_face_moves(&rules, false, &tokens),
        Grammar::FacesWithTips(rules) => validate_face_moves(&rules, true, &tokens),
        Grammar::Clock => validate_clock(&tokens),
    }
}

/// Check if `text` is a valid scramble for `puzzle`
pub fn is_valid_scramble(puzzle: PuzzleType, text: &str) -> bool {
    validate_scramble(puzzle, text).is_ok()
}

fn invalid(index: usize, token: &str) -> ScrambleError {
    ScrambleError::InvalidToken {
        index,
        token: token.to_string(),
    }
}

fn violation(index: usize, reason: impl Into<String>) -> ScrambleError {
    ScrambleError::ConstraintViolation {
        index,
        reason: reason.into(),
    }
}

fn validate_face_moves(
    rules: &MoveRules,
    allows_tips: bool,
    tokens: &[&str],
) -> Result<ScrambleMetrics> {
    let mut faces: Vec<Face> = Vec::with_capacity(tokens.len());
    let mut tips: Vec<Face> = Vec::new();
    // alphabet index of the last tip; tips follow alphabet order
    let mut last_tip: Option<usize> = None;

    for (index, &token) in tokens.iter().enumerate() {
        let mv = Move::parse(token).ok_or_else(|| invalid(index, token))?;

        if mv.tip {
            let position = rules.alphabet.iter().position(|&f| f == mv.face);
            let Some(position) = position.filter(|_| allows_tips) else {
                return Err(invalid(index, token));
            };
            if !TWIST_MODIFIERS.contains(&mv.modifier) {
                return Err(invalid(index, token));
            }
            if tips.contains(&mv.face) {
                return Err(violation(index, format!("tip {token} appears twice")));
            }
            if last_tip.is_some_and(|last| position < last) {
                return Err(violation(index, format!("tip {token} is out of order")));
            }
            last_tip = Some(position);
            tips.push(mv.face);
            continue;
        }

        if !tips.is_empty() {
            return Err(violation(index, "face move after tip twists"));
        }
        if !rules.alphabet.contains(&mv.face) || !rules.modifiers.contains(&mv.modifier) {
            return Err(invalid(index, token));
        }
        faces.push(mv.face);
    }

    if !rules.length.contains(&faces.len()) {
        let (min, max) = (*rules.length.start(), *rules.length.end());
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min}-{max}")
        };
        return Err(ScrambleError::LengthMismatch {
            expected,
            found: faces.len(),
        });
    }

    if let Some((index, reason)) = find_violation(rules.rule, &faces) {
        return Err(violation(index, reason));
    }

    Ok(ScrambleMetrics {
        moves: faces.len(),
        tips: tips.len(),
        pins: 0,
    })
}

fn validate_clock(tokens: &[&str]) -> Result<ScrambleMetrics> {
    let expected = 1 + 2 * DIAL_POSITIONS.len() + 1;
    if tokens.len() != expected {
        return Err(ScrambleError::LengthMismatch {
            expected: (expected - 1).to_string(),
            found: tokens.len().saturating_sub(1),
        });
    }

    let pins = ClockPins::parse(tokens[0]).ok_or_else(|| invalid(0, tokens[0]))?;

    let reorientation = 1 + DIAL_POSITIONS.len();
    if tokens[reorientation] != CLOCK_REORIENTATION {
        return Err(invalid(reorientation, tokens[reorientation]));
    }

    let passes = [1..reorientation, reorientation + 1..tokens.len()];
    for pass in passes {
        for (slot, index) in pass.enumerate() {
            let turn = DialTurn::parse(tokens[index]).ok_or_else(|| invalid(index, tokens[index]))?;
            if turn.position != DIAL_POSITIONS[slot] {
                return Err(violation(
                    index,
                    format!("expected dial {}", DIAL_POSITIONS[slot].name()),
                ));
            }
            if !DIAL_OFFSETS.contains(&turn.hours) {
                return Err(violation(index, format!("offset {} out of range", turn.hours)));
            }
        }
    }

    Ok(ScrambleMetrics {
        moves: 2 * DIAL_POSITIONS.len(),
        tips: 0,
        pins: pins.0.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cube_scramble() {
        let scramble = "R U F' L2 D B R' U2 F L D' B2 R U' F2 L' D B' R2 U";
        let metrics = validate_scramble(PuzzleType::Cube3, scramble).unwrap();
        assert_eq!(metrics.moves, 20);
        assert_eq!(metrics.tips, 0);
    }

    #[test]
    fn test_axis_repeat_rejected() {
        let scramble = "R L F' L2 D B R' U2 F L D' B2 R U' F2 L' D B' R2 U";
        assert!(matches!(
            validate_scramble(PuzzleType::Cube3, scramble),
            Err(ScrambleError::ConstraintViolation { index: 1, .. })
        ));
    }

    #[test]
    fn test_lookback_rejected() {
        let scramble = "R U R F L D B R' U2 F L D' B2 R U' F2 L' D B' R2";
        assert!(matches!(
            validate_scramble(PuzzleType::Cube3, scramble),
            Err(ScrambleError::ConstraintViolation { index: 2, .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            validate_scramble(PuzzleType::Cube2, "R U F R U"),
            Err(ScrambleError::LengthMismatch { found: 5, .. })
        ));
        assert!(matches!(
            validate_scramble(PuzzleType::Skewb, ""),
            Err(ScrambleError::LengthMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_alphabet_closure() {
        // D is not a 2x2 face in this grammar
        assert!(matches!(
            validate_scramble(PuzzleType::Cube2, "R U F R U F R U F R D"),
            Err(ScrambleError::InvalidToken { index: 10, .. })
        ));
        // no double turns on Skewb
        assert!(matches!(
            validate_scramble(PuzzleType::Skewb, "R2 U L B R U L B R"),
            Err(ScrambleError::InvalidToken { index: 0, .. })
        ));
    }

    #[test]
    fn test_pyraminx_tips() {
        let metrics = validate_scramble(PuzzleType::Pyraminx, "U L R B U' L' R B' l r'").unwrap();
        assert_eq!(metrics.moves, 8);
        assert_eq!(metrics.tips, 2);

        assert!(matches!(
            validate_scramble(PuzzleType::Pyraminx, "U L R B U' L' R B' l l'"),
            Err(ScrambleError::ConstraintViolation { index: 9, .. })
        ));
        assert!(matches!(
            validate_scramble(PuzzleType::Pyraminx, "U L R B U' L' R B' b u"),
            Err(ScrambleError::ConstraintViolation { index: 9, .. })
        ));
        assert!(validate_scramble(PuzzleType::Pyraminx, "U L R B U' L' R B' u l r b'").is_ok());
        assert!(matches!(
            validate_scramble(PuzzleType::Pyraminx, "U L R B l U' L' R B'"),
            Err(ScrambleError::ConstraintViolation { index: 5, .. })
        ));
        assert!(validate_scramble(PuzzleType::Skewb, "U L R B U L R B U r").is_err());
    }

    #[test]
    fn test_clock_layout() {
        let scramble = "(U,D,D,U) UR3+ DR5- DL0+ UL6+ ALL2- y2 UR1+ DR4- DL2+ UL5- ALL3+";
        let metrics = validate_scramble(PuzzleType::Clock, scramble).unwrap();
        assert_eq!(metrics.moves, 10);
        assert_eq!(metrics.pins, 4);

        let missing_y2 = "(U,D,D,U) UR3+ DR5- DL0+ UL6+ ALL2- x2 UR1+ DR4- DL2+ UL5- ALL3+";
        assert!(matches!(
            validate_scramble(PuzzleType::Clock, missing_y2),
            Err(ScrambleError::InvalidToken { index: 6, .. })
        ));

        let out_of_range = "(U,D,D,U) UR3+ DR5- DL0+ UL7+ ALL2- y2 UR1+ DR4- DL2+ UL5- ALL3+";
        assert!(matches!(
            validate_scramble(PuzzleType::Clock, out_of_range),
            Err(ScrambleError::ConstraintViolation { index: 4, .. })
        ));

        let padded = "(U,D,D,U) UR03+ DR5- DL0+ UL6+ ALL2- y2 UR1+ DR4- DL2+ UL5- ALL3+";
        assert!(matches!(
            validate_scramble(PuzzleType::Clock, padded),
            Err(ScrambleError::InvalidToken { index: 1, .. })
        ));

        let bad_pins = "(U,X,D,U) UR3+ DR5- DL0+ UL6+ ALL2- y2 UR1+ DR4- DL2+ UL5- ALL3+";
        assert!(matches!(
            validate_scramble(PuzzleType::Clock, bad_pins),
            Err(ScrambleError::InvalidToken { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_fences_and_newlines() {
        assert!(!is_valid_scramble(PuzzleType::Cube2, "R U F\nR U F R U F R U"));
        assert!(!is_valid_scramble(PuzzleType::Cube2, "```R U F R U F R U F R U"));
        assert!(is_valid_scramble(PuzzleType::Cube2, "R U F R U F R U F R U"));
    }
}
