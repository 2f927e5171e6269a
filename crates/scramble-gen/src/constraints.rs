//! Adjacency rules for face selection.
//!
//! These rules detect face sequences that would make a scramble redundant
//! (a face undone or merged by the next turn) and shrink the candidate set
//! for each slot accordingly.

use std::ops::RangeInclusive;

use smallvec::SmallVec;

use crate::puzzle::{Face, Modifier};

/// How a face restricts the face that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyRule {
    /// Next face must differ from the previous one
    DifferentFace,
    /// Next face must be on another axis, and must not repeat the face two back
    AxisWithLookback,
}

/// Move grammar of one puzzle type
#[derive(Debug, Clone)]
pub struct MoveRules {
    pub alphabet: &'static [Face],
    pub modifiers: &'static [Modifier],
    /// Number of primary moves, inclusive
    pub length: RangeInclusive<usize>,
    pub rule: AdjacencyRule,
}

/// Last two faces emitted by the selection loop
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookback {
    pub last: Option<Face>,
    pub before_last: Option<Face>,
}

impl Lookback {
    pub fn push(&mut self, face: Face) {
        self.before_last = self.last;
        self.last = Some(face);
    }
}

/// Check if `next` may never directly follow `prev`
pub fn is_banned_pair(rule: AdjacencyRule, prev: Face, next: Face) -> bool {
    match rule {
        AdjacencyRule::DifferentFace => prev == next,
        AdjacencyRule::AxisWithLookback => prev.axis() == next.axis(),
    }
}

/// Check if `next` is banned after the sequence `two_back, prev`
pub fn is_banned_trio(rule: AdjacencyRule, two_back: Face, prev: Face, next: Face) -> bool {
    if is_banned_pair(rule, prev, next) {
        return true;
    }

    // R U R style back-and-forth
    rule == AdjacencyRule::AxisWithLookback && two_back == next
}

fn is_banned(rule: AdjacencyRule, lookback: &Lookback, next: Face) -> bool {
    match (lookback.before_last, lookback.last) {
        (Some(two_back), Some(prev)) => is_banned_trio(rule, two_back, prev, next),
        (None, Some(prev)) => is_banned_pair(rule, prev, next),
        _ => false,
    }
}

/// Faces that may be placed in the next slot.
///
/// If the rules exclude every face, the set relaxes to every face except the
/// previous one so selection always progresses.
pub fn candidate_faces(rules: &MoveRules, lookback: &Lookback) -> SmallVec<[Face; 6]> {
    let candidates: SmallVec<[Face; 6]> = rules
        .alphabet
        .iter()
        .copied()
        .filter(|&face| !is_banned(rules.rule, lookback, face))
        .collect();

    if !candidates.is_empty() {
        return candidates;
    }

    rules
        .alphabet
        .iter()
        .copied()
        .filter(|&face| Some(face) != lookback.last)
        .collect()
}

/// Find the first position where `faces` breaks the rule.
///
/// Returns the index of the offending face and a reason.
pub fn find_violation(rule: AdjacencyRule, faces: &[Face]) -> Option<(usize, String)> {
    for i in 1..faces.len() {
        let (prev, next) = (faces[i - 1], faces[i]);
        if is_banned_pair(rule, prev, next) {
            let reason = match rule {
                AdjacencyRule::DifferentFace => {
                    format!("{} repeats the previous move", next.symbol())
                }
                AdjacencyRule::AxisWithLookback => format!(
                    "{} shares an axis with the previous move {}",
                    next.symbol(),
                    prev.symbol()
                ),
            };
            return Some((i, reason));
        }
        if i >= 2 && is_banned_trio(rule, faces[i - 2], prev, next) {
            return Some((
                i,
                format!("{} undoes the move two positions back", next.symbol()),
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{CUBE_FACES, PYRAMINX_FACES, TURN_MODIFIERS, TWIST_MODIFIERS};

    fn cube_rules() -> MoveRules {
        MoveRules {
            alphabet: &CUBE_FACES,
            modifiers: &TURN_MODIFIERS,
            length: 20..=20,
            rule: AdjacencyRule::AxisWithLookback,
        }
    }

    #[test]
    fn test_opposite_faces_banned() {
        let rule = AdjacencyRule::AxisWithLookback;
        assert!(is_banned_pair(rule, Face::R, Face::L));
        assert!(is_banned_pair(rule, Face::U, Face::U));
        assert!(!is_banned_pair(rule, Face::U, Face::F));
    }

    #[test]
    fn test_lookback_only_for_cube_family() {
        assert!(is_banned_trio(
            AdjacencyRule::AxisWithLookback,
            Face::R,
            Face::U,
            Face::R
        ));
        assert!(!is_banned_trio(
            AdjacencyRule::DifferentFace,
            Face::R,
            Face::U,
            Face::R
        ));
    }

    #[test]
    fn test_cube_candidates_after_two_moves() {
        let mut lookback = Lookback::default();
        lookback.push(Face::R);
        lookback.push(Face::U);

        let candidates = candidate_faces(&cube_rules(), &lookback);
        assert_eq!(candidates.as_slice(), &[Face::L, Face::F, Face::B]);
    }

    #[test]
    fn test_first_slot_allows_whole_alphabet() {
        let candidates = candidate_faces(&cube_rules(), &Lookback::default());
        assert_eq!(candidates.len(), CUBE_FACES.len());
    }

    #[test]
    fn test_pyraminx_candidates_exclude_previous() {
        let rules = MoveRules {
            alphabet: &PYRAMINX_FACES,
            modifiers: &TWIST_MODIFIERS,
            length: 8..=10,
            rule: AdjacencyRule::DifferentFace,
        };
        let mut lookback = Lookback::default();
        lookback.push(Face::L);
        lookback.push(Face::B);

        let candidates = candidate_faces(&rules, &lookback);
        assert_eq!(candidates.as_slice(), &[Face::U, Face::L, Face::R]);
    }

    #[test]
    fn test_relaxes_when_every_face_is_banned() {
        static SINGLE_AXIS: [Face; 2] = [Face::U, Face::D];
        let rules = MoveRules {
            alphabet: &SINGLE_AXIS,
            modifiers: &TURN_MODIFIERS,
            length: 4..=4,
            rule: AdjacencyRule::AxisWithLookback,
        };
        let mut lookback = Lookback::default();
        lookback.push(Face::U);

        let candidates = candidate_faces(&rules, &lookback);
        assert_eq!(candidates.as_slice(), &[Face::D]);
    }

    #[test]
    fn test_find_violation() {
        let rule = AdjacencyRule::AxisWithLookback;
        assert_eq!(find_violation(rule, &[Face::R, Face::U, Face::F]), None);
        assert_eq!(
            find_violation(rule, &[Face::R, Face::U, Face::D]).map(|(i, _)| i),
            Some(2)
        );
        assert_eq!(
            find_violation(rule, &[Face::F, Face::R, Face::U, Face::R]).map(|(i, _)| i),
            Some(3)
        );
        assert_eq!(
            find_violation(AdjacencyRule::DifferentFace, &[Face::U, Face::R, Face::U]),
            None
        );
    }
}
